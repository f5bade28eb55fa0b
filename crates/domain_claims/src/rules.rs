//! Notification emission rules
//!
//! Decides who hears about a committed transition and what they are told.
//! Recipients come from the event; user records only supply display names,
//! and a user confirmed deleted is skipped.
//!
//! | Event     | Reporter | Claimant | Admins |
//! |-----------|----------|----------|--------|
//! | submitted | yes      | no       | each   |
//! | cancelled | yes      | no       | no     |
//! | approved  | yes      | yes      | no     |
//! | rejected  | yes      | yes      | no     |

use core_kernel::UserId;
use domain_items::{Item, ItemEvent};
use domain_users::User;

/// A party to a transition whose record may or may not have been loaded
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: UserId,
    /// `None` when the lookup failed; the party is still notified
    pub user: Option<User>,
}

impl Contact {
    pub fn resolved(user: User) -> Self {
        Self { id: user.id, user: Some(user) }
    }

    pub fn unresolved(id: UserId) -> Self {
        Self { id, user: None }
    }

    pub fn name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

/// Everyone a transition might notify
#[derive(Debug, Clone, Default)]
pub struct Audience {
    pub reporter: Option<Contact>,
    pub claimant: Option<Contact>,
    pub admins: Vec<User>,
}

/// Which parties must be looked up for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudienceNeeds {
    pub claimant: bool,
    pub admins: bool,
}

impl AudienceNeeds {
    pub fn for_event(event: &ItemEvent) -> Self {
        match event {
            ItemEvent::ClaimSubmitted { .. } => Self { claimant: false, admins: true },
            ItemEvent::ClaimCancelled { .. } => Self { claimant: false, admins: false },
            ItemEvent::ClaimApproved { .. } | ItemEvent::ClaimRejected { .. } => {
                Self { claimant: true, admins: false }
            }
        }
    }
}

/// A notification to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedNotification {
    pub recipient: UserId,
    pub message: String,
}

impl PlannedNotification {
    fn to(recipient: UserId, message: String) -> Self {
        Self { recipient, message }
    }
}

/// Builds the notifications for a committed transition, reporter first
pub fn plan_notifications(event: &ItemEvent, item: &Item, audience: &Audience) -> Vec<PlannedNotification> {
    let kind = item.item_type.as_str();
    let title = item.title.as_str();
    let mut planned = Vec::new();

    match event {
        ItemEvent::ClaimSubmitted { .. } => {
            if let Some(reporter) = &audience.reporter {
                planned.push(PlannedNotification::to(
                    reporter.id,
                    format!("Someone has claimed your {} item: {}", kind, title),
                ));
            }
            for admin in &audience.admins {
                planned.push(PlannedNotification::to(
                    admin.id,
                    format!("New claim requires review: {}", title),
                ));
            }
        }
        ItemEvent::ClaimCancelled { claim, .. } => {
            if let Some(reporter) = audience.reporter.as_ref().filter(|r| r.id != claim.claimant) {
                planned.push(PlannedNotification::to(
                    reporter.id,
                    format!(
                        "The claim on your {} item '{}' has been cancelled by the claimant.",
                        kind, title
                    ),
                ));
            }
        }
        ItemEvent::ClaimApproved { pickup_location, .. } => {
            let claimant = audience.claimant.as_ref();
            let reporter = audience.reporter.as_ref();
            if let Some(reporter) = reporter {
                planned.push(PlannedNotification::to(
                    reporter.id,
                    format!(
                        "Good news! Your {} item '{}' has been claimed and approved. \
                         Please arrange pickup/drop-off at: {}. \
                         Contact the claimant ({} - {}) if needed.",
                        kind,
                        title,
                        pickup_location,
                        claimant.and_then(Contact::name).unwrap_or("N/A"),
                        claimant.and_then(Contact::email).unwrap_or("N/A"),
                    ),
                ));
            }
            if let Some(claimant) = claimant {
                planned.push(PlannedNotification::to(
                    claimant.id,
                    format!(
                        "Your claim for the {} item '{}' has been approved! \
                         Please coordinate the pickup/drop-off at the designated location: {}. \
                         Contact the owner ({} - {}) if needed.",
                        kind,
                        title,
                        pickup_location,
                        reporter.and_then(Contact::name).unwrap_or("Reporter"),
                        reporter.and_then(Contact::email).unwrap_or("N/A"),
                    ),
                ));
            }
        }
        ItemEvent::ClaimRejected { .. } => {
            if let Some(reporter) = &audience.reporter {
                planned.push(PlannedNotification::to(
                    reporter.id,
                    format!(
                        "The claim for your {} item '{}' was rejected. The item is now available again.",
                        kind, title
                    ),
                ));
            }
            if let Some(claimant) = &audience.claimant {
                planned.push(PlannedNotification::to(
                    claimant.id,
                    format!(
                        "Unfortunately, your claim for the {} item '{}' has been rejected by the admin.",
                        kind, title
                    ),
                ));
            }
        }
    }

    planned
}
