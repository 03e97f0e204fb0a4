use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount::{self, Cents};
use super::error::{NftsError, ValidationError};
use super::types::*;

/// Earliest service date the layout accepts.
pub const MIN_SERVICE_DATE: &str = "20000101";

/// Highest accepted tax rate (×100), i.e. 25%.
pub const MAX_TAX_RATE: u32 = 2500;

/// Maximum description length after line-break encoding.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Maximum series length; matches its fixed-width slot.
pub const MAX_SERIES_LEN: usize = 5;

/// Maximum city length; matches its slot in the address block.
pub const MAX_CITY_LEN: usize = 50;

/// Maximum number of detail lines the footer count can express.
pub const MAX_RECORDS: usize = 9_999_999;

/// Outcome of a single field check: `Err` carries the reason.
pub type FieldResult = Result<(), String>;

/// Settings that influence validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Detail line variant the batch will be encoded with.
    pub layout: LayoutVariant,
    /// Upper bound for service dates.
    pub today: NaiveDate,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(LayoutVariant::default())
    }
}

impl ValidationContext {
    /// Context for `layout`, using the local date as "today".
    pub fn new(layout: LayoutVariant) -> Self {
        Self {
            layout,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Override the date used as the service date upper bound.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// A batch that passed [`validate_batch`] and may be encoded.
///
/// The only way to obtain one is [`ValidatedBatch::new`], so encoding
/// unvalidated data is ruled out by construction. To change a record, take the
/// batch back out with [`into_inner`](Self::into_inner) and validate again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBatch {
    batch: Batch,
    layout: LayoutVariant,
}

impl ValidatedBatch {
    /// Validate `batch` and wrap it on success.
    /// Returns all validation errors (not just the first).
    pub fn new(batch: Batch, ctx: &ValidationContext) -> Result<Self, NftsError> {
        let errors = validate_batch(&batch, ctx);
        if !errors.is_empty() {
            return Err(NftsError::Validation(errors));
        }
        Ok(Self {
            batch,
            layout: ctx.layout,
        })
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn layout(&self) -> LayoutVariant {
        self.layout
    }

    pub fn into_inner(self) -> Batch {
        self.batch
    }

    /// Earliest and latest service date, as `YYYYMMDD`.
    pub fn period(&self) -> Option<(&str, &str)> {
        let dates = self.batch.records.iter().map(|r| r.service_date.as_str());
        let min = dates.clone().min()?;
        let max = dates.max()?;
        Some((min, max))
    }
}

/// Validate a whole batch.
///
/// Batch-level preconditions come first and carry no record index, followed by
/// every violation of every record in record order. The result is empty iff
/// the batch can be encoded.
pub fn validate_batch(batch: &Batch, ctx: &ValidationContext) -> Vec<ValidationError> {
    tracing::debug!(
        taxpayer_id = %batch.taxpayer_id,
        records = batch.records.len(),
        layout = ?ctx.layout,
        "validating NFTS batch"
    );

    let mut errors = Vec::new();

    if let Err(reason) = validate_taxpayer_id(&batch.taxpayer_id) {
        errors.push(ValidationError::batch("taxpayer_id", reason));
    }

    if batch.records.is_empty() {
        errors.push(ValidationError::batch(
            "records",
            "batch must contain at least one record",
        ));
    }

    for (i, record) in batch.records.iter().enumerate() {
        errors.extend(validate_record(record, i + 1, ctx));
    }

    validate_totals(batch, &mut errors);

    if errors.is_empty() {
        tracing::debug!(records = batch.records.len(), "NFTS batch is valid");
    } else {
        tracing::warn!(violations = errors.len(), "NFTS batch rejected");
    }
    errors
}

/// Validate one record at 1-based position `index`.
///
/// Runs every field check in layout order and never stops at the first
/// failure, so each failing field shows up exactly once.
pub fn validate_record(
    record: &InvoiceRecord,
    index: usize,
    ctx: &ValidationContext,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut check = |field: &str, result: FieldResult| {
        if let Err(reason) = result {
            errors.push(ValidationError::record(index, field, reason));
        }
    };

    check("document_type", validate_document_type(&record.document_type));
    check(
        "document_number",
        validate_document_number(&record.document_number),
    );
    check(
        "series",
        validate_series(&record.series, &record.document_type),
    );
    check(
        "service_date",
        validate_service_date(&record.service_date, ctx.today),
    );
    check("taxation", validate_taxation(&record.taxation));
    check("service_code", validate_service_code(&record.service_code));
    check("subitem", validate_subitem(&record.subitem));
    check("tax_rate", validate_tax_rate(&record.tax_rate));
    check("gross_amount", validate_gross_amount(&record.gross_amount));
    check(
        "withheld_at_source",
        validate_withheld_at_source(record.withheld_code()),
    );
    check("provider_type", validate_provider_type(&record.provider_type));
    check(
        "provider_tax_id",
        validate_provider_tax_id(&record.provider_tax_id),
    );
    check("tax_regime", validate_tax_regime(&record.tax_regime));

    if ctx.layout.requires_address() {
        check("state_code", validate_state_code(&record.state_code));
        check("postal_code", validate_postal_code(&record.postal_code));
        check("city", validate_city(&record.city));
    }

    check("description", validate_description(&record.description));

    errors
}

fn validate_totals(batch: &Batch, errors: &mut Vec<ValidationError>) {
    if batch.records.len() > MAX_RECORDS {
        errors.push(ValidationError::batch(
            "records",
            format!("batch cannot have more than {MAX_RECORDS} records"),
        ));
    }

    let mut total = Cents::default();
    for record in &batch.records {
        // Malformed amounts are already reported per record.
        let Ok(cents) = record.gross_amount.parse::<Cents>() else {
            continue;
        };
        match total.checked_add(cents) {
            Some(sum) => total = sum,
            None => {
                errors.push(ValidationError::batch(
                    "gross_amount",
                    "sum of gross amounts exceeds 15 digits in cents",
                ));
                return;
            }
        }
    }
}

// ── Field validators ────────────────────────────────────────────────────────

/// Filer registration number: exactly 8 digits.
pub fn validate_taxpayer_id(value: &str) -> FieldResult {
    if !is_digits(value, 8, 8) {
        return Err("must be exactly 8 digits".into());
    }
    Ok(())
}

pub fn validate_document_type(value: &str) -> FieldResult {
    if DocumentType::from_code(value).is_none() {
        return Err(format!("'{value}' is not one of 01, 02, 03"));
    }
    Ok(())
}

pub fn validate_document_number(value: &str) -> FieldResult {
    if !is_digits(value, 1, 12) {
        return Err("must have 1 to 12 digits".into());
    }
    Ok(())
}

/// Series is required for issued documents (type 02) and never longer than
/// its 5-character slot.
pub fn validate_series(value: &str, document_type: &str) -> FieldResult {
    if document_type == DocumentType::Issued.code() && value.trim().is_empty() {
        return Err("required when document type is 02".into());
    }
    if value.chars().count() > MAX_SERIES_LEN {
        return Err(format!("must have at most {MAX_SERIES_LEN} characters"));
    }
    check_writable(value)
}

/// `YYYYMMDD` between 2000-01-01 and `today`, both inclusive.
///
/// Compared as strings, which orders correctly for zero-padded dates.
pub fn validate_service_date(value: &str, today: NaiveDate) -> FieldResult {
    if !is_digits(value, 8, 8) {
        return Err("must be a date in YYYYMMDD format".into());
    }
    let today = today.format("%Y%m%d").to_string();
    if value < MIN_SERVICE_DATE || value > today.as_str() {
        return Err(format!(
            "{value} is outside the allowed range {MIN_SERVICE_DATE}..={today}"
        ));
    }
    Ok(())
}

pub fn validate_taxation(value: &str) -> FieldResult {
    if Taxation::from_code(value).is_none() {
        return Err(format!("'{value}' is not one of T, I, J"));
    }
    Ok(())
}

pub fn validate_service_code(value: &str) -> FieldResult {
    if !is_digits(value, 1, 5) {
        return Err("must have 1 to 5 digits".into());
    }
    Ok(())
}

pub fn validate_subitem(value: &str) -> FieldResult {
    if !is_digits(value, 1, 4) {
        return Err("must have 1 to 4 digits".into());
    }
    Ok(())
}

/// Optional rate ×100: blank, or 1–4 digits not above 2500 (25%).
pub fn validate_tax_rate(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Ok(());
    }
    if !is_digits(value, 1, 4) {
        return Err("must have 1 to 4 digits (e.g. 0500 for 5%)".into());
    }
    let rate: u32 = value
        .parse()
        .map_err(|_| String::from("must have 1 to 4 digits (e.g. 0500 for 5%)"))?;
    if rate > MAX_TAX_RATE {
        return Err(format!(
            "{value} exceeds the maximum of {MAX_TAX_RATE} (25%)"
        ));
    }
    Ok(())
}

pub fn validate_gross_amount(value: &str) -> FieldResult {
    if !amount::is_amount_format(value) {
        return Err("must be numeric with an optional 2-digit fraction (e.g. 123.45)".into());
    }
    amount::to_cents(value)
        .map(|_| ())
        .map_err(|e| e.reason)
}

pub fn validate_withheld_at_source(code: &str) -> FieldResult {
    match code {
        "1" | "2" => Ok(()),
        other => Err(format!("'{other}' is not one of 1, 2")),
    }
}

pub fn validate_provider_type(value: &str) -> FieldResult {
    if ProviderType::from_code(value).is_none() {
        return Err(format!("'{value}' is not one of 1, 2, 3"));
    }
    Ok(())
}

pub fn validate_provider_tax_id(value: &str) -> FieldResult {
    if !is_digits(value, 14, 14) {
        return Err("must be exactly 14 digits".into());
    }
    Ok(())
}

pub fn validate_tax_regime(value: &str) -> FieldResult {
    if TaxRegime::from_code(value).is_none() {
        return Err(format!("'{value}' is not one of 0, 4, 5"));
    }
    Ok(())
}

pub fn validate_state_code(value: &str) -> FieldResult {
    if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err("must be 2 uppercase letters".into());
    }
    Ok(())
}

pub fn validate_postal_code(value: &str) -> FieldResult {
    if !is_digits(value, 8, 8) {
        return Err("must be exactly 8 digits".into());
    }
    Ok(())
}

pub fn validate_city(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err("must not be empty".into());
    }
    if value.chars().count() > MAX_CITY_LEN {
        return Err(format!("must have at most {MAX_CITY_LEN} characters"));
    }
    check_writable(value)
}

/// Description (line breaks already stored as `|`) of at most 500 characters.
pub fn validate_description(value: &str) -> FieldResult {
    if value.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "exceeds {MAX_DESCRIPTION_LEN} characters"
        ));
    }
    check_writable(value)
}

fn is_digits(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Text lands in an ISO-8859-1 file of CRLF-separated lines: characters above
/// U+00FF cannot be written and a CR or LF would split the record.
fn check_writable(value: &str) -> FieldResult {
    match value.chars().find(|c| !is_writable_char(*c)) {
        Some(c) => Err(format!(
            "contains character {c:?} that cannot be written to the file"
        )),
        None => Ok(()),
    }
}

fn is_writable_char(c: char) -> bool {
    u32::from(c) <= 0xFF && c != '\r' && c != '\n'
}
