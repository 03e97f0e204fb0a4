use serde::{Deserialize, Serialize};

/// One service invoice taken by the filer (a detail line of the batch).
///
/// Fields hold the raw values collected by the form layer. Nothing here is
/// trusted until [`validate_batch`](super::validate_batch) has accepted the
/// enclosing [`Batch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Document type code: "01", "02" or "03" (see [`DocumentType`]).
    pub document_type: String,
    /// Document number, 1–12 digits.
    pub document_number: String,
    /// Document series, up to 5 characters. Required for document type "02".
    pub series: String,
    /// Service date as `YYYYMMDD`.
    pub service_date: String,
    /// Taxation code: "T", "I" or "J" (see [`Taxation`]).
    pub taxation: String,
    /// Service code (CNAE-like), 1–5 digits.
    pub service_code: String,
    /// Service list item/subitem, 1–4 digits (e.g. "0107" for item 1.07).
    pub subitem: String,
    /// Gross amount as a decimal string, `.` or `,` separated, 2 fraction digits.
    pub gross_amount: String,
    /// Tax rate ×100 (e.g. "0500" for 5%). Blank means zero.
    pub tax_rate: String,
    /// ISS withheld by the service taker.
    pub withheld_at_source: bool,
    /// Provider type code: "1", "2" or "3" (see [`ProviderType`]).
    pub provider_type: String,
    /// Provider tax id (CNPJ/CPF), exactly 14 digits.
    pub provider_tax_id: String,
    /// Provider tax regime code: "0", "4" or "5" (see [`TaxRegime`]).
    pub tax_regime: String,
    /// Provider city. Only written by [`LayoutVariant::WithAddress`].
    pub city: String,
    /// Provider state (UF), 2 uppercase letters.
    pub state_code: String,
    /// Provider postal code (CEP), 8 digits.
    pub postal_code: String,
    /// Service description with line breaks stored as `|`.
    pub description: String,
}

impl InvoiceRecord {
    /// Layout code for [`withheld_at_source`](Self::withheld_at_source).
    pub fn withheld_code(&self) -> &'static str {
        if self.withheld_at_source { "1" } else { "2" }
    }
}

/// The unit of export: one filer, one or more invoice records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// 8-digit municipal registration (CCM) of the filer.
    pub taxpayer_id: String,
    /// Records in export order.
    pub records: Vec<InvoiceRecord>,
}

impl Batch {
    pub fn new(taxpayer_id: impl Into<String>) -> Self {
        Self {
            taxpayer_id: taxpayer_id.into(),
            records: Vec::new(),
        }
    }

    /// Append a record at the end of the batch.
    pub fn push(&mut self, record: InvoiceRecord) {
        self.records.push(record);
    }

    /// Replace the record at 0-based `index`, returning the previous one.
    ///
    /// Returns `None` (and drops nothing) when `index` is out of range.
    pub fn replace(&mut self, index: usize, record: InvoiceRecord) -> Option<InvoiceRecord> {
        let slot = self.records.get_mut(index)?;
        Some(std::mem::replace(slot, record))
    }

    /// Remove the record at 0-based `index`.
    pub fn remove(&mut self, index: usize) -> Option<InvoiceRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Which flavor of the detail line to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// Provider address block left blank.
    #[default]
    Standard,
    /// Provider city, state and postal code required and written.
    WithAddress,
}

impl LayoutVariant {
    pub fn requires_address(&self) -> bool {
        matches!(self, Self::WithAddress)
    }
}

/// Fiscal document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    /// `01`: document issuance waived.
    Exempt,
    /// `02`: document issued.
    Issued,
    /// `03`: document not issued.
    NotIssued,
}

impl DocumentType {
    pub const ALL: [Self; 3] = [Self::Exempt, Self::Issued, Self::NotIssued];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Exempt => "01",
            Self::Issued => "02",
            Self::NotIssued => "03",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Label shown by the data-entry form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exempt => "01 - Dispensado",
            Self::Issued => "02 - Com emissão",
            Self::NotIssued => "03 - Sem emissão",
        }
    }
}

/// Service taxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Taxation {
    /// `T`: normal operation.
    Normal,
    /// `I`: immune.
    Immune,
    /// `J`: ISS suspended.
    Suspended,
}

impl Taxation {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Immune, Self::Suspended];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "T",
            Self::Immune => "I",
            Self::Suspended => "J",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "T - Operação Normal",
            Self::Immune => "I - Imune",
            Self::Suspended => "J - ISS Suspenso",
        }
    }
}

/// Kind of service provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderType {
    /// `1`: individual (CPF).
    Individual,
    /// `2`: company (CNPJ).
    Company,
    /// `3`: established abroad.
    Foreign,
}

impl ProviderType {
    pub const ALL: [Self; 3] = [Self::Individual, Self::Company, Self::Foreign];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Individual => "1",
            Self::Company => "2",
            Self::Foreign => "3",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Individual => "1 - CPF",
            Self::Company => "2 - CNPJ",
            Self::Foreign => "3 - Exterior",
        }
    }
}

/// Provider tax regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxRegime {
    /// `0`: normal or Simples Nacional paying through DAMSP.
    Normal,
    /// `4`: Simples Nacional paying through DAS.
    SimplesNacionalDas,
    /// `5`: individual micro-entrepreneur (MEI).
    Mei,
}

impl TaxRegime {
    pub const ALL: [Self; 3] = [Self::Normal, Self::SimplesNacionalDas, Self::Mei];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "0",
            Self::SimplesNacionalDas => "4",
            Self::Mei => "5",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "0 - Normal/SN-DAMSP",
            Self::SimplesNacionalDas => "4 - SN-DAS",
            Self::Mei => "5 - MEI",
        }
    }
}

/// Replace line breaks (`\r\n`, `\n`, `\r`) with the `|` the layout uses.
pub fn encode_line_breaks(text: &str) -> String {
    text.replace("\r\n", "|").replace(['\n', '\r'], "|")
}

/// Turn a stored description back into multi-line text for editing.
pub fn decode_line_breaks(text: &str) -> String {
    text.replace('|', "\n")
}
