use chrono::NaiveDate;

use super::error::NftsError;
use super::types::*;
use super::validation::{ValidatedBatch, ValidationContext};

/// Builder for a single [`InvoiceRecord`].
///
/// Defaults: document type 01, taxation T, provider type 2 (company),
/// tax regime 0, not withheld, blank series, tax rate, address and description.
///
/// ```
/// use nfts::core::*;
/// use chrono::NaiveDate;
///
/// let record = InvoiceRecordBuilder::new("1", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
///     .service("01402", "0107")
///     .gross_amount("100.00")
///     .provider(ProviderType::Company, "12345678000199")
///     .build();
/// assert_eq!(record.service_date, "20240315");
/// ```
pub struct InvoiceRecordBuilder {
    record: InvoiceRecord,
}

impl InvoiceRecordBuilder {
    pub fn new(document_number: impl Into<String>, service_date: NaiveDate) -> Self {
        Self {
            record: InvoiceRecord {
                document_type: DocumentType::Exempt.code().into(),
                document_number: document_number.into(),
                series: String::new(),
                service_date: service_date.format("%Y%m%d").to_string(),
                taxation: Taxation::Normal.code().into(),
                service_code: String::new(),
                subitem: String::new(),
                gross_amount: String::new(),
                tax_rate: String::new(),
                withheld_at_source: false,
                provider_type: ProviderType::Company.code().into(),
                provider_tax_id: String::new(),
                tax_regime: TaxRegime::Normal.code().into(),
                city: String::new(),
                state_code: String::new(),
                postal_code: String::new(),
                description: String::new(),
            },
        }
    }

    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.record.document_type = document_type.code().into();
        self
    }

    pub fn series(mut self, series: impl Into<String>) -> Self {
        self.record.series = series.into();
        self
    }

    /// Override the service date with a raw `YYYYMMDD` string.
    pub fn service_date_raw(mut self, date: impl Into<String>) -> Self {
        self.record.service_date = date.into();
        self
    }

    pub fn taxation(mut self, taxation: Taxation) -> Self {
        self.record.taxation = taxation.code().into();
        self
    }

    /// Set the service code and the service list subitem.
    pub fn service(mut self, service_code: impl Into<String>, subitem: impl Into<String>) -> Self {
        self.record.service_code = service_code.into();
        self.record.subitem = subitem.into();
        self
    }

    pub fn gross_amount(mut self, amount: impl Into<String>) -> Self {
        self.record.gross_amount = amount.into();
        self
    }

    /// Tax rate ×100, e.g. "0500" for 5%.
    pub fn tax_rate(mut self, rate: impl Into<String>) -> Self {
        self.record.tax_rate = rate.into();
        self
    }

    pub fn withheld_at_source(mut self, withheld: bool) -> Self {
        self.record.withheld_at_source = withheld;
        self
    }

    pub fn provider(mut self, provider_type: ProviderType, tax_id: impl Into<String>) -> Self {
        self.record.provider_type = provider_type.code().into();
        self.record.provider_tax_id = tax_id.into();
        self
    }

    pub fn tax_regime(mut self, regime: TaxRegime) -> Self {
        self.record.tax_regime = regime.code().into();
        self
    }

    pub fn address(
        mut self,
        city: impl Into<String>,
        state_code: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        self.record.city = city.into();
        self.record.state_code = state_code.into();
        self.record.postal_code = postal_code.into();
        self
    }

    /// Set the service description. Line breaks are stored as `|`.
    pub fn description(mut self, text: &str) -> Self {
        self.record.description = encode_line_breaks(text);
        self
    }

    pub fn build(self) -> InvoiceRecord {
        self.record
    }
}

/// Builder for a [`Batch`] that validates on [`build`](Self::build).
pub struct BatchBuilder {
    batch: Batch,
}

impl BatchBuilder {
    pub fn new(taxpayer_id: impl Into<String>) -> Self {
        Self {
            batch: Batch::new(taxpayer_id),
        }
    }

    pub fn add_record(mut self, record: InvoiceRecord) -> Self {
        self.batch.push(record);
        self
    }

    /// Build the batch without validating it.
    pub fn build_unchecked(self) -> Batch {
        self.batch
    }

    /// Validate the batch and return the encodable snapshot.
    /// Returns all validation errors (not just the first).
    pub fn build(self, ctx: &ValidationContext) -> Result<ValidatedBatch, NftsError> {
        ValidatedBatch::new(self.batch, ctx)
    }
}
