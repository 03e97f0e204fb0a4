//! NFTS fixed-width batch file encoding.
//!
//! Renders a [`ValidatedBatch`](crate::core::ValidatedBatch) as the positional
//! text file the municipal system imports: one header line, one 940-character
//! detail line per record (input order), and one footer line, each terminated
//! by CRLF. The file is written in ISO-8859-1 without BOM.
//!
//! | Line | Marker | Length |
//! |------|--------|--------|
//! | Header | `1` | 28 |
//! | Detail | `4` | 940 |
//! | Footer | `9` | 38 |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use nfts::core::*;
//! use nfts::layout;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let ctx = ValidationContext::new(LayoutVariant::Standard).today(today);
//! let record = InvoiceRecordBuilder::new("1", today)
//!     .service("01402", "0107")
//!     .gross_amount("100.00")
//!     .provider(ProviderType::Company, "12345678000199")
//!     .build();
//!
//! let batch = BatchBuilder::new("41650719").add_record(record).build(&ctx)?;
//! let text = layout::encode(&batch)?;
//! assert!(text.starts_with("1001416507192024061520240615\r\n"));
//! assert_eq!(text.lines().count(), 3);
//!
//! let bytes = layout::encode_latin1(&batch)?;
//! assert_eq!(bytes.len(), 28 + 940 + 38 + 3 * 2);
//! # Ok::<(), nfts::NftsError>(())
//! ```

mod export;
mod fields;
mod records;

pub use export::{encode, encode_latin1, to_latin1, write_file};
pub use fields::{
    ADDRESS_BLOCK_LEN, ADDRESS_FIELDS, DETAIL_FIELDS, DETAIL_LEN, FOOTER_FIELDS, FOOTER_LEN,
    FieldSpec, HEADER_FIELDS, HEADER_LEN, LINE_ENDING, Padding,
};
