//! Core batch types, field and batch validation, and amounts.
//!
//! Everything needed to collect NFTS invoice records and decide whether a
//! batch may be exported. Encoding lives in [`crate::layout`].

pub mod amount;
mod builder;
mod error;
mod taxpayer;
mod types;
mod validation;

pub use amount::{AmountError, Cents};
pub use builder::*;
pub use error::*;
pub use taxpayer::*;
pub use types::*;
pub use validation::*;
