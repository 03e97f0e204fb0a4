//! Service classification → default service code lookup.
//!
//! The municipal rate table lists, for each service list item (displayed as
//! `1.07`), the CNAE-like service code usually billed under it. Data-entry
//! forms use it to pre-fill the service code while the user types the
//! subitem; the encoder never consults it.
//!
//! # Example
//!
//! ```
//! use nfts::classification::ClassificationTable;
//!
//! let table = ClassificationTable::from_json(
//!     r#"[{"classificacao": "1.07", "cnae": "1402"}, {"classificacao": "1.08", "cnae": ""}]"#,
//! ).unwrap();
//!
//! assert_eq!(table.on_field_change("0107").as_deref(), Some("01402"));
//! assert_eq!(table.on_field_change("0108"), None);
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::NftsError;

/// Width the found service code is zero-padded to.
const SERVICE_CODE_WIDTH: usize = 5;

/// One row of the rate table, in the format of `aliquotas.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    /// Service list item as displayed, e.g. "1.07".
    #[serde(rename = "classificacao")]
    pub classification: String,
    /// Default service code; empty when the item has none.
    #[serde(rename = "cnae", default)]
    pub service_code: String,
}

/// Immutable lookup from normalized classification key to service code.
#[derive(Debug, Clone, Default)]
pub struct ClassificationTable {
    codes: HashMap<String, String>,
}

impl ClassificationTable {
    /// Build the table from entries. Entries without a service code are
    /// skipped; a repeated key keeps the last code.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ClassificationEntry>,
    {
        let mut codes = HashMap::new();
        let mut skipped = 0usize;
        for entry in entries {
            let code = entry.service_code.trim();
            if code.is_empty() {
                skipped += 1;
                continue;
            }
            codes.insert(normalize_key(&entry.classification), code.to_string());
        }
        tracing::debug!(
            entries = codes.len(),
            skipped,
            "loaded classification table"
        );
        Self { codes }
    }

    /// Parse a JSON array of `{"classificacao": ..., "cnae": ...}` objects.
    pub fn from_json(json: &str) -> Result<Self, NftsError> {
        let entries: Vec<ClassificationEntry> = serde_json::from_str(json)
            .map_err(|e| NftsError::Classification(e.to_string()))?;
        Ok(Self::from_entries(entries))
    }

    /// Read and parse a JSON rate table file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NftsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid classification table");
        })
    }

    /// Exact lookup by normalized key (e.g. "107"). Returns the code as stored.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.codes.get(key).map(String::as_str)
    }

    /// Service code to pre-fill after the subitem field changed to `subitem_text`.
    ///
    /// Leading zeros are dropped to form the key ("0107" → "107"); the found
    /// code is zero-padded to 5 digits. Empty or all-zero input yields `None`.
    pub fn on_field_change(&self, subitem_text: &str) -> Option<String> {
        let key = subitem_text.trim_start_matches('0');
        if key.is_empty() {
            return None;
        }
        let code = self.lookup(key)?;
        Some(format!("{code:0>SERVICE_CODE_WIDTH$}"))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Normalize a displayed classification ("1.07") into its lookup key ("107").
pub fn normalize_key(classification: &str) -> String {
    classification.replace('.', "")
}
