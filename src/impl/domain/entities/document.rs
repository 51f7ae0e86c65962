use super::chip::Chip;

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct DocumentId(pub(crate) String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shorthand constructor.
pub fn document_id(id: impl Into<String>) -> DocumentId {
    DocumentId(id.into())
}

/// An uploaded source file and the chips not yet assigned to any bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) id: DocumentId,
    pub(crate) name: String,
    pub(crate) chips: Vec<Chip>,
    pub(crate) image_urls: Vec<String>,
}

impl Document {
    pub fn new(id: DocumentId, name: impl Into<String>, chips: Vec<Chip>) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            image_urls: Vec::new(),
        }
    }

    pub fn with_image_urls(mut self, image_urls: Vec<String>) -> Self {
        self.image_urls = image_urls;
        self
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    /// Chips worth showing; zero-valued chips stay in the pool but are hidden.
    pub fn visible_chips(&self) -> impl Iterator<Item = &Chip> {
        self.chips.iter().filter(|c| c.value != 0.0)
    }

    pub fn chip(&self, chip_id: &str) -> Option<&Chip> {
        self.chips.iter().find(|c| c.id == chip_id)
    }

    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }
}
