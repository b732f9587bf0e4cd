//! Shared types, errors, and configuration for the voucher workspace.
//!
//! This crate provides common types used across all other crates:
//! - Monetary rounding helpers with decimal precision
//! - Safe-number coercion for loosely typed form input
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;


pub use config::{AppConfig, EngineConfig, LoggingConfig, ValidationConfig};
pub use error::{AppError, AppResult};
