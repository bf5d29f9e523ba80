//! Financial statements.
//!
//! This module derives the three statements from ledger state:
//! - Balance Sheet
//! - Income Statement
//! - Cash-Flow Statement (of the last transaction)
//!
//! Lines are closed enumerations; only the string query boundary can ask for
//! a line that does not exist.

pub mod service;
pub mod types;


pub use service::StatementComputer;
pub use types::*;
