//! Core data models for budget reports
//!
//! This module contains the value types reports are built from: the
//! fixed-point currency amount and the two transaction shapes.

pub mod currency;
pub mod transaction;

pub use currency::{Currency, CurrencyParseError, DEFAULT_SYMBOL};
pub use transaction::{BasicTransaction, Entry, PayerTransaction};
