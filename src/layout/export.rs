//! Whole-batch encoding and file output.

use std::path::Path;

use crate::core::{Cents, NftsError, ValidatedBatch};

use super::fields::{DETAIL_LEN, FOOTER_LEN, HEADER_LEN, LINE_ENDING};
use super::records;

/// Encode a validated batch as text: header, detail lines in input order,
/// footer, every line terminated by CRLF.
///
/// Deterministic: the same batch always yields the same text. An `Encoding`
/// error means a field escaped validation and is never expected in practice.
pub fn encode(batch: &ValidatedBatch) -> Result<String, NftsError> {
    let records = &batch.batch().records;
    let (period_start, period_end) = batch
        .period()
        .ok_or_else(|| NftsError::Encoding("batch has no records".into()))?;

    let capacity = HEADER_LEN
        + records.len() * DETAIL_LEN
        + FOOTER_LEN
        + (records.len() + 2) * LINE_ENDING.len();
    let mut out = String::with_capacity(capacity);

    records::write_header(
        &mut out,
        &batch.batch().taxpayer_id,
        period_start,
        period_end,
    )?;

    let mut total = Cents::default();
    for (i, record) in records.iter().enumerate() {
        let cents = records::write_detail(&mut out, record, batch.layout())?;
        total = total.checked_add(cents).ok_or_else(|| {
            NftsError::Encoding(format!(
                "services total overflows 15 digits at record {}",
                i + 1
            ))
        })?;
    }

    records::write_footer(&mut out, records.len(), total)?;

    tracing::debug!(
        records = records.len(),
        total_cents = total.0,
        bytes = out.len(),
        "encoded NFTS batch"
    );
    Ok(out)
}

/// Encode a validated batch as ISO-8859-1 bytes, ready to be written out.
pub fn encode_latin1(batch: &ValidatedBatch) -> Result<Vec<u8>, NftsError> {
    to_latin1(&encode(batch)?)
}

/// Convert text to ISO-8859-1, one byte per character.
///
/// Fails on the first character above U+00FF.
pub fn to_latin1(text: &str) -> Result<Vec<u8>, NftsError> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                NftsError::Encoding(format!("character {c:?} is not representable in ISO-8859-1"))
            })
        })
        .collect()
}

/// Encode a validated batch and write it to `path` in one go.
pub fn write_file(path: impl AsRef<Path>, batch: &ValidatedBatch) -> Result<(), NftsError> {
    let path = path.as_ref();
    let bytes = encode_latin1(batch)?;
    std::fs::write(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        records = batch.batch().records.len(),
        bytes = bytes.len(),
        "wrote NFTS batch file"
    );
    Ok(())
}
