pub mod client;
pub mod commands;

pub use client::{ApiClient, ApiError, AuthSession};
