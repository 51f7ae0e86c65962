use crate::entities::ExtractionResult;

use super::chip_model::ChipModel;

/// Body returned by the extraction service's upload endpoint.
#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct ExtractionResponseModel {
    #[serde(default)]
    pub(crate) chips: Vec<ChipModel>,
    #[serde(default)]
    pub(crate) image_urls: Vec<String>,
}

impl Into<ExtractionResult> for ExtractionResponseModel {
    fn into(self) -> ExtractionResult {
        ExtractionResult {
            chips: self.chips.into_iter().map(Into::into).collect(),
            image_urls: self.image_urls,
        }
    }
}
