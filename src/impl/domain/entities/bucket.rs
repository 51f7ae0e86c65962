use super::{chip::Chip, document::DocumentId};

/// Document name recorded on sources typed in by the user rather than
/// assigned from a document.
pub const MANUAL_ENTRY_DOC_NAME: &str = "Entrada Manual";

/// Official line number of the form (ex. "32").
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub struct BucketId(pub(crate) String);

impl BucketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BucketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shorthand constructor.
pub fn line(id: impl Into<String>) -> BucketId {
    BucketId(id.into())
}

/// A single contribution to a manual bucket's value.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSource {
    pub doc_name: String,
    /// Exactly the amount added to the bucket when the source was recorded.
    pub value: f64,
    /// Back-references, only present when the value was assigned from a
    /// document.
    pub chip_id: Option<String>,
    pub document_id: Option<DocumentId>,
    /// Copy of the chip as it was when assigned, so it can be returned to its
    /// document if this source is deleted.
    pub original_chip: Option<Chip>,
}

impl BucketSource {
    pub fn manual(value: f64) -> Self {
        Self {
            doc_name: MANUAL_ENTRY_DOC_NAME.to_string(),
            value,
            chip_id: None,
            document_id: None,
            original_chip: None,
        }
    }

    pub fn from_chip(doc_name: impl Into<String>, document_id: DocumentId, chip: Chip) -> Self {
        Self {
            doc_name: doc_name.into(),
            value: chip.value,
            chip_id: Some(chip.id.clone()),
            document_id: Some(document_id),
            original_chip: Some(chip),
        }
    }

    /// The chip and its origin document, if this source can be reversed into a
    /// document pool.
    pub fn restorable_chip(&self) -> Option<(&DocumentId, &Chip)> {
        self.document_id.as_ref().zip(self.original_chip.as_ref())
    }
}

/// One line item of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub(crate) id: BucketId,
    pub(crate) name: String,
    pub(crate) section: String,
    pub(crate) value: f64,
    pub(crate) sources: Vec<BucketSource>,
    pub(crate) calculated: bool,
}

impl Bucket {
    pub fn id(&self) -> &BucketId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// In insertion order. Not authoritative for calculated buckets.
    pub fn sources(&self) -> &[BucketSource] {
        &self.sources
    }

    pub fn is_calculated(&self) -> bool {
        self.calculated
    }

    pub(crate) fn sources_total(&self) -> f64 {
        self.sources.iter().fold(0.0, |total, s| total + s.value)
    }
}
