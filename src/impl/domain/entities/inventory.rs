use super::document::Document;

/// Uploaded documents, in upload order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentInventory {
    pub(crate) documents: Vec<Document>,
}
