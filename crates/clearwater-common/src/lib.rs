//! Common types and utilities for the clearwater ledger core.
//!
//! This crate provides the shared value types used across all clearwater
//! modules. It is designed to be dependency-light and contains pure data
//! types with no I/O or side effects, making it suitable as a foundation
//! for all other crates in the workspace.
//!
//! # Overview
//!
//! - [`types`] - Fixed-width identifiers ([`Uint160`], [`Uint256`])
//! - [`amount`] - Currency-tagged signed amounts
//! - [`config`] - Fee schedule configuration
//! - [`error`] - Common error types and the [`Result`] type alias
//!
//! # Example
//!
//! ```rust
//! use clearwater_common::{Amount, FeeSchedule, Uint160};
//!
//! let currency = Uint160::new([7u8; 20]);
//! let limit = Amount::new(5_000, currency);
//! assert!(!limit.is_native());
//!
//! let fees = FeeSchedule::default();
//! assert!(fees.fee_create > fees.fee_default);
//! ```

pub mod amount;
pub mod config;
pub mod error;
pub mod types;

// Re-export key types at crate root for convenience
pub use amount::Amount;
pub use config::FeeSchedule;
pub use error::{Error, Result};
pub use types::{Uint160, Uint256};
