//! Shared identifiers, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for counterparties, transactions, and debt records
//! - Application-wide error categories
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LedgerConfig, LoggingConfig};
pub use error::{AppError, AppResult};
