use async_trait::async_trait;
use fractic_server_error::ServerError;

use super::{chip::Chip, document::DocumentId};

/// Completed result of extracting a single file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractionResult {
    pub chips: Vec<Chip>,
    pub image_urls: Vec<String>,
}

/// A file handed to the extraction service.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub contents: Vec<u8>,
}

/// External service turning an uploaded file into candidate chips.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract(&self, file: &UploadFile) -> Result<ExtractionResult, ServerError>;
}

#[derive(Debug)]
pub struct UploadFailure {
    pub file_name: String,
    pub error: ServerError,
}

#[derive(Debug, Default)]
pub struct UploadReport {
    /// Documents appended to the inventory, in upload order.
    pub added: Vec<DocumentId>,
    pub failures: Vec<UploadFailure>,
}
