//! Shared types, errors, and configuration for Offertory.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management (single loading boundary)
//! - Session wire types and JWT handling
//! - Outbound notification transports (SMTP email, Twilio messaging)
//! - Pagination types for list endpoints

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod jwt;
pub mod messaging;
pub mod types;

pub use config::AppConfig;
pub use email::{EmailError, EmailService};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use messaging::{MessagingError, MessagingService};
