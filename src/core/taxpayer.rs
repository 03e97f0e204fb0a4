/// A filer the batch can be submitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taxpayer {
    /// 8-digit municipal registration number (CCM), digits only.
    pub id: &'static str,
    /// Name shown when picking the filer.
    pub name: &'static str,
}

/// The taxpayer identities batches are generated for.
pub const KNOWN_TAXPAYERS: &[Taxpayer] = &[
    Taxpayer {
        id: "41650719",
        name: "IM Filial",
    },
    Taxpayer {
        id: "76612740",
        name: "IM Matriz",
    },
];

impl Taxpayer {
    /// Look up a known taxpayer by its 8-digit id.
    pub fn by_id(id: &str) -> Option<&'static Taxpayer> {
        KNOWN_TAXPAYERS.iter().find(|t| t.id == id)
    }

    /// The registration number in its printed form, e.g. "4.165.071-9".
    pub fn formatted_id(&self) -> String {
        format_ccm(self.id).unwrap_or_else(|| self.id.to_string())
    }

    /// Label for a picker: formatted id followed by the name.
    pub fn label(&self) -> String {
        format!("{} – {}", self.formatted_id(), self.name)
    }
}

/// Format an 8-digit CCM as `d.ddd.ddd-d`. Returns `None` for anything else.
pub fn format_ccm(id: &str) -> Option<String> {
    if id.len() != 8 || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!(
        "{}.{}.{}-{}",
        &id[..1],
        &id[1..4],
        &id[4..7],
        &id[7..]
    ))
}
