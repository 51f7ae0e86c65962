use fractic_server_error::ServerError;

use crate::{
    data::models::extraction_response_model::ExtractionResponseModel,
    entities::ExtractionResult, errors::InvalidExtractionResponse,
};

/// Parses the raw JSON body returned by the extraction service.
pub(crate) trait ExtractionResponseDatasource {
    fn from_string(&self, file_name: &str, body: &str) -> Result<ExtractionResult, ServerError>;
}

pub(crate) struct ExtractionResponseDatasourceImpl;

impl ExtractionResponseDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ExtractionResponseDatasource for ExtractionResponseDatasourceImpl {
    fn from_string(&self, file_name: &str, body: &str) -> Result<ExtractionResult, ServerError> {
        let model: ExtractionResponseModel = serde_json::from_str(body)
            .map_err(|e| InvalidExtractionResponse::with_debug(file_name, &e))?;
        Ok(model.into())
    }
}
