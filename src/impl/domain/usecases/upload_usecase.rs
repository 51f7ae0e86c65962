use async_trait::async_trait;
use fractic_server_error::ServerError;
use futures::future::join_all;

use crate::{
    data::datasources::extraction_response_datasource::{
        ExtractionResponseDatasource, ExtractionResponseDatasourceImpl,
    },
    entities::{Document, DocumentId, ExtractionResult, ExtractionService, UploadFailure, UploadFile},
};

#[async_trait]
pub trait UploadUsecase: Send + Sync {
    /// Runs every file through `service` concurrently. Successful documents
    /// come back in input order; failures never abort the others.
    async fn extract_all<S>(
        &self,
        service: &S,
        files: &[UploadFile],
    ) -> (Vec<Document>, Vec<UploadFailure>)
    where
        S: ExtractionService + ?Sized;

    /// Builds a document from a raw extraction-service response body.
    fn from_response(&self, file_name: &str, body: &str) -> Result<Document, ServerError>;
}

pub(crate) struct UploadUsecaseImpl<
    DS = ExtractionResponseDatasourceImpl, // Default.
> where
    DS: ExtractionResponseDatasource,
{
    response_datasource: DS,
}

fn to_document(file_name: &str, result: ExtractionResult) -> Document {
    Document::new(DocumentId::generate(), file_name, result.chips).with_image_urls(result.image_urls)
}

#[async_trait]
impl<DS> UploadUsecase for UploadUsecaseImpl<DS>
where
    DS: ExtractionResponseDatasource + Send + Sync,
{
    async fn extract_all<S>(
        &self,
        service: &S,
        files: &[UploadFile],
    ) -> (Vec<Document>, Vec<UploadFailure>)
    where
        S: ExtractionService + ?Sized,
    {
        let results = join_all(files.iter().map(|file| service.extract(file))).await;

        let mut documents = Vec::new();
        let mut failures = Vec::new();
        for (file, result) in files.iter().zip(results) {
            match result {
                Ok(extraction) => {
                    tracing::debug!(
                        file_name = %file.name,
                        chips = extraction.chips.len(),
                        "extraction completed"
                    );
                    documents.push(to_document(&file.name, extraction));
                }
                Err(error) => {
                    tracing::warn!(file_name = %file.name, error = ?error, "extraction failed");
                    failures.push(UploadFailure {
                        file_name: file.name.clone(),
                        error,
                    });
                }
            }
        }
        (documents, failures)
    }

    fn from_response(&self, file_name: &str, body: &str) -> Result<Document, ServerError> {
        let result = self.response_datasource.from_string(file_name, body)?;
        Ok(to_document(file_name, result))
    }
}

impl UploadUsecaseImpl {
    pub(crate) fn new() -> Self {
        UploadUsecaseImpl {
            response_datasource: ExtractionResponseDatasourceImpl::new(),
        }
    }
}
