//! Pre-built Test Fixtures
//!
//! Fixed values where tests assert on them, generated ones (via `fake`) where
//! any plausible value will do.

use chrono::{DateTime, TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;

use domain_items::{ClaimDetails, ItemType, NewItem};
use domain_users::{Role, User};

/// Fixture for users
pub struct UserFixtures;

impl UserFixtures {
    /// A student with a generated name and email
    pub fn student() -> User {
        User::new(Name().fake::<String>(), SafeEmail().fake::<String>(), Role::Student)
    }

    /// An admin with a generated name and email
    pub fn admin() -> User {
        User::new(Name().fake::<String>(), SafeEmail().fake::<String>(), Role::Admin)
    }

    /// A user with fixed contact details
    pub fn named(name: &str, email: &str, role: Role) -> User {
        User::new(name, email, role)
    }
}

/// Fixture for item reports
pub struct ItemFixtures;

impl ItemFixtures {
    /// A lost backpack reported in the library
    pub fn lost_backpack() -> NewItem {
        NewItem {
            title: "Grey backpack".to_string(),
            description: "North Face, laptop sleeve, keychain on the zipper".to_string(),
            item_type: ItemType::Lost,
            category: "Bags".to_string(),
            location: "Library 2nd floor".to_string(),
            date: TemporalFixtures::reported_on(),
            image_url: None,
            contact_method: Some("email".to_string()),
            is_high_value: false,
            is_anonymous: false,
        }
    }

    /// A found phone handed in at the front desk
    pub fn found_phone() -> NewItem {
        NewItem {
            title: "Black phone".to_string(),
            description: "Cracked screen protector, blue case".to_string(),
            item_type: ItemType::Found,
            category: "Electronics".to_string(),
            location: "Student center".to_string(),
            date: TemporalFixtures::reported_on(),
            image_url: Some("https://img.campus.edu/items/phone.jpg".to_string()),
            contact_method: None,
            is_high_value: true,
            is_anonymous: false,
        }
    }
}

/// Fixture for claim details
pub struct ClaimFixtures;

impl ClaimFixtures {
    pub fn details() -> ClaimDetails {
        ClaimDetails {
            description: "My name is written inside the front pocket".to_string(),
            contact_info: "555-0142".to_string(),
            proof_details: "Photo of me carrying it last week".to_string(),
        }
    }
}

/// Fixture for timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// When fixture items were lost or found
    pub fn reported_on() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    /// A claim timestamp late in the day, for date-projection tests
    pub fn claimed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 23, 45, 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_users_are_distinct() {
        let a = UserFixtures::student();
        let b = UserFixtures::student();
        assert_ne!(a.id, b.id);
        assert!(a.email.contains('@'));
        assert!(UserFixtures::admin().is_admin());
    }
}
