//! User entity, roles, and the authenticated actor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CoreError, UserId};

/// Role granted to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular campus member
    Student,
    /// Reviews claims and manages items
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }

    /// Resolves the effective role from a list of granted role names
    ///
    /// Any `admin` grant wins; everything else is treated as a student.
    pub fn from_grants<S: AsRef<str>>(grants: &[S]) -> Self {
        if grants.iter().any(|g| g.as_ref().eq_ignore_ascii_case("admin")) {
            Role::Admin
        } else {
            Role::Student
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::validation(format!("Unknown role: {}", other))),
        }
    }
}

/// A registered user, as seen by the claim workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh identifier
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new_v7(),
            name: name.into(),
            email: email.into(),
            role,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The authenticated requester of an operation
///
/// Supplied by the credential provider on every authenticated call. Only the
/// id and role are trusted; names and emails are looked up through `UserPort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn student(id: UserId) -> Self {
        Self::new(id, Role::Student)
    }

    pub fn admin(id: UserId) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_grants() {
        assert_eq!(Role::from_grants(&["student"]), Role::Student);
        assert_eq!(Role::from_grants(&["student", "ADMIN"]), Role::Admin);
        assert_eq!(Role::from_grants::<&str>(&[]), Role::Student);
    }

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Student.to_string(), "student");
        assert!("moderator".parse::<Role>().is_err());
    }
}
