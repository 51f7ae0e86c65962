/// A monetary value extracted from a document, waiting to be assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    pub id: String,
    pub value: f64,
    pub label: String,
    pub page: u32,
    /// Identifier assigned by the extraction service, if any.
    pub doc_id: Option<String>,
    pub region: Option<ChipRegion>,
}

/// Location of the chip on its page image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Chip {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
            label: String::new(),
            page: 1,
            doc_id: None,
            region: None,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}
