//! Request handlers

pub mod health;
pub mod items;
pub mod claims;
pub mod admin;
pub mod notifications;
