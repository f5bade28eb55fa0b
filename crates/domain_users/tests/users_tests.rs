//! Tests for domain_users

use core_kernel::UserId;
use domain_users::{Actor, Role, User};

#[test]
fn test_user_new_assigns_identity() {
    let a = User::new("Alice", "alice@campus.edu", Role::Student);
    let b = User::new("Alice", "alice@campus.edu", Role::Student);
    assert_ne!(a.id, b.id);
    assert!(!a.is_admin());
}

#[test]
fn test_actor_from_user_copies_role() {
    let admin = User::new("Dana", "dana.admin@campus.edu", Role::Admin);
    let actor = Actor::from(&admin);
    assert_eq!(actor.id, admin.id);
    assert!(actor.is_admin());
}

#[test]
fn test_actor_constructors() {
    let id = UserId::new();
    assert!(!Actor::student(id).is_admin());
    assert!(Actor::admin(id).is_admin());
}

#[test]
fn test_user_serializes_camel_case_with_lowercase_role() {
    let user = User::new("Alice", "alice@campus.edu", Role::Admin);
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["role"], "admin");
    assert!(json.get("createdAt").is_some());
}
