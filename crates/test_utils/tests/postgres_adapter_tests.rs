//! PostgreSQL adapter tests
//!
//! Need a Docker daemon: `cargo test -p test_utils -- --ignored`

use std::sync::Arc;

use core_kernel::{NotificationId, PortError};
use domain_claims::{
    AdminReviewService, ClaimAction, ClaimLifecycleService, ClaimOutcome, NotificationInbox,
    NotificationPort,
};
use domain_items::{ItemPort, ItemStatus};
use domain_users::{Actor, Role, UserPort};
use infra_db::{
    PostgresClaimHistoryAdapter, PostgresClaimLogAdapter, PostgresItemAdapter,
    PostgresNotificationAdapter, PostgresUserAdapter,
};
use test_utils::*;

#[tokio::test]
#[ignore = "requires docker"]
async fn test_item_round_trip_with_comments() -> TestResult<()> {
    let db = create_isolated_test_database().await?;
    let users = PostgresUserAdapter::new(db.pool().clone());
    let items = PostgresItemAdapter::new(db.pool().clone());

    let reporter = UserFixtures::student();
    users.insert_user(&reporter).await?;
    let mut item = TestItemBuilder::from_report(ItemFixtures::found_phone())
        .reported_by(reporter.id)
        .build();
    items.create_item(&item).await?;

    let comment = item.add_comment(reporter.id, "Still at the front desk")?;
    items.add_comment(item.id, &comment).await?;

    let stored = items.get_item(item.id).await?;
    assert_eq!(stored.title, "Black phone");
    assert_eq!(stored.reporter, Some(reporter.id));
    assert_eq!(stored.status, ItemStatus::Pending);
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].text, "Still at the front desk");

    items.delete_item(item.id).await?;
    let missing = items.get_item(item.id).await;
    assert!(matches!(missing, Err(ref e) if e.is_not_found()), "{missing:?}");
    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_conditional_transition_applies_once() -> TestResult<()> {
    let db = create_isolated_test_database().await?;
    let users = PostgresUserAdapter::new(db.pool().clone());
    let items = PostgresItemAdapter::new(db.pool().clone());

    let reporter = UserFixtures::student();
    let first = UserFixtures::student();
    let second = UserFixtures::student();
    for user in [&reporter, &first, &second] {
        users.insert_user(user).await?;
    }
    let item = TestItemBuilder::new().reported_by(reporter.id).build();
    items.create_item(&item).await?;
    let guard = item.guard();

    let won = TestItemBuilder::new().reported_by(reporter.id).claimed_by(first.id).build();
    let lost = TestItemBuilder::new().reported_by(reporter.id).claimed_by(second.id).build();
    let (won, lost) = (
        domain_items::Item { id: item.id, ..won },
        domain_items::Item { id: item.id, ..lost },
    );

    assert!(items.apply_transition(&won, guard).await?);
    assert!(!items.apply_transition(&lost, guard).await?);

    let stored = items.get_item(item.id).await?;
    assert_claimed_by(&stored, first.id);
    assert_eq!(stored.claim.map(|c| c.details), Some(ClaimFixtures::details()));
    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_claim_workflow_over_postgres() -> TestResult<()> {
    let db = create_isolated_test_database().await?;
    let pool = db.pool().clone();
    let items = Arc::new(PostgresItemAdapter::new(pool.clone()));
    let users = Arc::new(PostgresUserAdapter::new(pool.clone()));
    let notifications = Arc::new(PostgresNotificationAdapter::new(pool.clone()));
    let claim_logs = Arc::new(PostgresClaimLogAdapter::new(pool.clone()));
    let history = Arc::new(PostgresClaimHistoryAdapter::new(pool));

    let reporter = UserFixtures::student();
    let claimant = UserFixtures::student();
    let admin = UserFixtures::named("Desk Admin", "desk@campus.edu", Role::Admin);
    for user in [&reporter, &claimant, &admin] {
        users.insert_user(user).await?;
    }
    assert_eq!(users.list_admins().await?.len(), 1);

    let engine = Arc::new(ClaimLifecycleService::new(
        items.clone(),
        users.clone(),
        notifications.clone(),
        history.clone(),
    ));
    let reviews = AdminReviewService::new(engine.clone(), items.clone(), users, claim_logs, history);
    let inbox = NotificationInbox::new(notifications.clone());

    let item = TestItemBuilder::new().reported_by(reporter.id).build();
    items.create_item(&item).await?;

    engine
        .submit_claim(item.id, &Actor::from(&claimant), ClaimFixtures::details())
        .await?;
    let pending = reviews.list_pending_claims(&Actor::from(&admin)).await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].claimant_email, claimant.email);

    let review = reviews
        .review_claim(item.id, &Actor::from(&admin), "approve", Some("Front Desk"))
        .await?;
    assert!(review.audit.is_recorded());
    assert!(review.transition.archived);
    assert_eq!(items.get_item(item.id).await?.status, ItemStatus::Resolved);

    let reporter_inbox = inbox.list(&Actor::from(&reporter)).await?;
    assert_eq!(reporter_inbox.len(), 2);
    assert_mentions(&reporter_inbox, "Front Desk", 1);

    let note = reporter_inbox[0].clone();
    inbox.mark_read(&Actor::from(&reporter), note.id).await?;
    assert!(notifications.get(note.id).await?.read);

    let logs = reviews.list_claim_logs(&Actor::from(&admin)).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, ClaimAction::Approved);
    assert_eq!(logs[0].admin_name, "Desk Admin");

    let closed = reviews.claim_history(&Actor::from(&admin), item.id).await?;
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].outcome, ClaimOutcome::Approved);
    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_missing_notification_is_not_found() -> TestResult<()> {
    let db = create_isolated_test_database().await?;
    let notifications = PostgresNotificationAdapter::new(db.pool().clone());

    let result = notifications.get(NotificationId::new()).await;
    assert!(matches!(result, Err(PortError::NotFound { .. })), "{result:?}");
    Ok(())
}
