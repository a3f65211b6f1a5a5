//! API route handlers

pub mod cache;
pub mod generate;
pub mod health;
