//! Field widths of the three line kinds and the padding primitives.

use crate::core::NftsError;

/// Line terminator used after every line, including the footer.
pub const LINE_ENDING: &str = "\r\n";

/// Header line length without line ending.
pub const HEADER_LEN: usize = 28;
/// Detail line length without line ending.
pub const DETAIL_LEN: usize = 940;
/// Footer line length without line ending.
pub const FOOTER_LEN: usize = 38;
/// Width of the provider address block inside a detail line.
pub const ADDRESS_BLOCK_LEN: usize = 258;

/// How a field is filled up to its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// Right-justified, left-filled with `0`.
    Zero,
    /// Left-justified, right-filled with spaces.
    Space,
    /// Always exactly `width` characters; no padding.
    Fixed,
}

/// One positional field of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub width: usize,
    pub padding: Padding,
}

const fn field(name: &'static str, width: usize, padding: Padding) -> FieldSpec {
    FieldSpec {
        name,
        width,
        padding,
    }
}

/// Header line (type 1).
pub const HEADER_FIELDS: &[FieldSpec] = &[
    field("record_type", 1, Padding::Fixed),
    field("layout_version", 3, Padding::Fixed),
    field("taxpayer_id", 8, Padding::Zero),
    field("period_start", 8, Padding::Fixed),
    field("period_end", 8, Padding::Fixed),
];

/// Detail line (type 4), one per invoice record.
pub const DETAIL_FIELDS: &[FieldSpec] = &[
    field("record_type", 1, Padding::Fixed),
    field("document_type", 2, Padding::Zero),
    field("series", 5, Padding::Space),
    field("document_number", 12, Padding::Zero),
    field("service_date", 8, Padding::Fixed),
    field("status", 1, Padding::Fixed),
    field("taxation", 1, Padding::Fixed),
    field("gross_amount", 15, Padding::Zero),
    field("deductions", 15, Padding::Zero),
    field("service_code", 5, Padding::Zero),
    field("subitem", 4, Padding::Zero),
    field("tax_rate", 4, Padding::Zero),
    field("withheld_at_source", 1, Padding::Fixed),
    field("provider_type", 1, Padding::Fixed),
    field("provider_tax_id", 14, Padding::Zero),
    field("municipal_registration", 8, Padding::Space),
    field("provider_name", 75, Padding::Space),
    field("address", ADDRESS_BLOCK_LEN, Padding::Space),
    field("nfts_type", 1, Padding::Fixed),
    field("tax_regime", 1, Padding::Fixed),
    field("payment_date", 8, Padding::Space),
    field("description", 500, Padding::Space),
];

/// Sub-fields of the detail line's address block.
pub const ADDRESS_FIELDS: &[FieldSpec] = &[
    field("address_type", 3, Padding::Space),
    field("street", 50, Padding::Space),
    field("number", 10, Padding::Space),
    field("complement", 30, Padding::Space),
    field("district", 30, Padding::Space),
    field("city", 50, Padding::Space),
    field("state_code", 2, Padding::Space),
    field("postal_code", 8, Padding::Space),
    field("email", 75, Padding::Space),
];

/// Footer line (type 9).
pub const FOOTER_FIELDS: &[FieldSpec] = &[
    field("record_type", 1, Padding::Fixed),
    field("record_count", 7, Padding::Zero),
    field("total_services", 15, Padding::Zero),
    field("total_deductions", 15, Padding::Zero),
];

/// Append `value` right-justified and zero-filled to `width`.
///
/// Refuses anything that is not purely ASCII digits or does not fit.
pub(crate) fn push_zero_padded(
    out: &mut String,
    value: &str,
    width: usize,
    field: &str,
) -> Result<(), NftsError> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NftsError::Encoding(format!(
            "{field}: '{value}' is not numeric"
        )));
    }
    if value.len() > width {
        return Err(overflow(field, value, width));
    }
    out.extend(std::iter::repeat_n('0', width - value.len()));
    out.push_str(value);
    Ok(())
}

/// Append `value` left-justified and space-filled to `width` characters.
pub(crate) fn push_space_padded(
    out: &mut String,
    value: &str,
    width: usize,
    field: &str,
) -> Result<(), NftsError> {
    let len = value.chars().count();
    if len > width {
        return Err(overflow(field, value, width));
    }
    out.push_str(value);
    out.extend(std::iter::repeat_n(' ', width - len));
    Ok(())
}

/// Append `value`, which must already be exactly `width` characters.
pub(crate) fn push_fixed(
    out: &mut String,
    value: &str,
    width: usize,
    field: &str,
) -> Result<(), NftsError> {
    if value.chars().count() != width {
        return Err(NftsError::Encoding(format!(
            "{field}: '{value}' must be exactly {width} characters"
        )));
    }
    out.push_str(value);
    Ok(())
}

fn overflow(field: &str, value: &str, width: usize) -> NftsError {
    NftsError::Encoding(format!(
        "{field}: '{value}' does not fit in {width} characters"
    ))
}

/// Append `value` padded the way `spec` says.
pub(crate) fn push_field(out: &mut String, spec: &FieldSpec, value: &str) -> Result<(), NftsError> {
    match spec.padding {
        Padding::Zero => push_zero_padded(out, value, spec.width, spec.name),
        Padding::Space => push_space_padded(out, value, spec.width, spec.name),
        Padding::Fixed => push_fixed(out, value, spec.width, spec.name),
    }
}

/// Append one value per field, in table order.
pub(crate) fn write_fields(
    out: &mut String,
    fields: &[FieldSpec],
    values: &[&str],
) -> Result<(), NftsError> {
    if fields.len() != values.len() {
        return Err(NftsError::Encoding(format!(
            "{} values for {} fields",
            values.len(),
            fields.len()
        )));
    }
    for (spec, value) in fields.iter().zip(values) {
        push_field(out, spec, value)?;
    }
    Ok(())
}
