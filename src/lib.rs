//! # nfts
//!
//! Generation of São Paulo NFTS (Nota Fiscal de Tomador de Serviços) batch
//! files: validation of service-invoice records and their fixed-width,
//! ISO-8859-1 encoding.
//!
//! Export is a two-phase contract. [`validate_batch`](core::validate_batch)
//! lists every violation; only a batch with none can become a
//! [`ValidatedBatch`](core::ValidatedBatch), and only a `ValidatedBatch` can be
//! encoded. Monetary values are converted to cents from their decimal digits,
//! never through floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use nfts::core::*;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let ctx = ValidationContext::new(LayoutVariant::Standard).today(today);
//!
//! let record = InvoiceRecordBuilder::new("1", today)
//!     .service("01402", "0107")
//!     .gross_amount("100.00")
//!     .provider(ProviderType::Company, "12345678000199")
//!     .build();
//!
//! let batch = BatchBuilder::new("41650719").add_record(record).build_unchecked();
//! assert!(validate_batch(&batch, &ctx).is_empty());
//!
//! let validated = ValidatedBatch::new(batch, &ctx).unwrap();
//! assert_eq!(validated.period(), Some(("20240615", "20240615")));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record types, field/record/batch validation, amounts, taxpayers |
//! | `layout` | Fixed-width header/detail/footer encoding, ISO-8859-1 file output |
//! | `classification` | Classification → service code lookup for data-entry forms |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "layout")]
pub mod layout;

#[cfg(feature = "classification")]
pub mod classification;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
