//! Header, detail and footer line rendering.

use crate::core::{Cents, InvoiceRecord, LayoutVariant, NftsError, amount};

use super::fields::*;

const HEADER_MARKER: &str = "1";
const LAYOUT_VERSION: &str = "001";
const DETAIL_MARKER: &str = "4";
const FOOTER_MARKER: &str = "9";
/// Detail status: normal (not cancelled) NFTS.
const STATUS_NORMAL: &str = "N";
const NFTS_TYPE: &str = "1";

/// Header: marker, layout version, taxpayer id and the service date period.
pub(crate) fn write_header(
    out: &mut String,
    taxpayer_id: &str,
    period_start: &str,
    period_end: &str,
) -> Result<(), NftsError> {
    write_fields(
        out,
        HEADER_FIELDS,
        &[
            HEADER_MARKER,
            LAYOUT_VERSION,
            taxpayer_id,
            period_start,
            period_end,
        ],
    )?;
    out.push_str(LINE_ENDING);
    Ok(())
}

/// Detail line for one record. Returns the gross amount in cents for the
/// footer total.
pub(crate) fn write_detail(
    out: &mut String,
    record: &InvoiceRecord,
    layout: LayoutVariant,
) -> Result<Cents, NftsError> {
    let gross = amount::to_cents(&record.gross_amount)
        .map_err(|e| NftsError::Encoding(format!("gross_amount: {e}")))?;
    let gross_text = gross.to_string();

    let rate = record.tax_rate.trim();
    let rate = if rate.is_empty() { "0" } else { rate };
    let address = address_block(record, layout)?;

    // Municipal registration, provider name and payment date are not collected.
    let values: [&str; 22] = [
        DETAIL_MARKER,
        &record.document_type,
        &record.series,
        &record.document_number,
        &record.service_date,
        STATUS_NORMAL,
        &record.taxation,
        &gross_text,
        "0",
        &record.service_code,
        &record.subitem,
        rate,
        record.withheld_code(),
        &record.provider_type,
        &record.provider_tax_id,
        "",
        "",
        &address,
        NFTS_TYPE,
        &record.tax_regime,
        "",
        &record.description,
    ];

    let start = out.len();
    write_fields(out, DETAIL_FIELDS, &values)?;

    let written = out[start..].chars().count();
    if written != DETAIL_LEN {
        return Err(NftsError::Encoding(format!(
            "detail line has {written} characters, expected {DETAIL_LEN}"
        )));
    }
    out.push_str(LINE_ENDING);
    Ok(Cents(gross))
}

/// The 258-character address block. Only city, state and postal code are
/// ever populated, and only for [`LayoutVariant::WithAddress`]; the standard
/// variant leaves the whole block blank.
fn address_block(record: &InvoiceRecord, layout: LayoutVariant) -> Result<String, NftsError> {
    let mut block = String::with_capacity(ADDRESS_BLOCK_LEN);
    if layout.requires_address() {
        // Address type, street, number, complement, district and e-mail stay blank.
        let values: [&str; 9] = [
            "",
            "",
            "",
            "",
            "",
            &record.city,
            &record.state_code,
            &record.postal_code,
            "",
        ];
        write_fields(&mut block, ADDRESS_FIELDS, &values)?;
    }
    Ok(block)
}

/// Footer: marker, record count, services total and a zero deductions total.
pub(crate) fn write_footer(out: &mut String, count: usize, total: Cents) -> Result<(), NftsError> {
    let count = count.to_string();
    let total = total.0.to_string();
    let values: [&str; 4] = [FOOTER_MARKER, &count, &total, "0"];
    write_fields(out, FOOTER_FIELDS, &values)?;
    out.push_str(LINE_ENDING);
    Ok(())
}
