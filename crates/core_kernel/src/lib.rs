//! Core Kernel - Foundational types shared by the catalog crates
//!
//! This crate provides the building blocks used across the workspace:
//! - `Price`: two-decimal fixed precision amounts matching `NUMERIC(18,2)`
//! - `ValidityPeriod`: the period a temporal row version was current

pub mod price;
pub mod temporal;

pub use price::{Price, PriceError};
pub use temporal::{ValidityPeriod, TemporalVersion, TemporalError, parse_instant};
