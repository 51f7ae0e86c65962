use super::{document::DocumentId, form_state::FormState};

#[derive(Debug, Clone, PartialEq)]
pub struct TaxpayerInfo {
    pub name: String,
    pub id_type: String,
    pub id_number: String,
    pub city: String,
    pub tax_year: String,
}

impl Default for TaxpayerInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            id_type: "CC".to_string(),
            id_number: String::new(),
            city: "Bogotá D.C.".to_string(),
            tax_year: "2024".to_string(),
        }
    }
}

/// What a saved session file holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub state: FormState,
    pub active_document_id: Option<DocumentId>,
    pub active_tab: String,
    pub taxpayer_info: TaxpayerInfo,
    /// ISO-8601 time the session was saved, if known.
    pub saved_at: Option<String>,
}
