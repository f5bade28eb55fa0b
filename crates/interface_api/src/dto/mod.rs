//! Request/Response data transfer objects

pub mod items;
pub mod claims;
