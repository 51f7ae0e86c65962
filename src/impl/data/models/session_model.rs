use crate::entities::{
    document_id, line, Bucket, BucketSource, Document, DocumentInventory, Session, TaxpayerInfo,
};

use super::chip_model::ChipModel;

/// Saved session file.
#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionModel {
    #[serde(default)]
    pub(crate) buckets: Option<Vec<BucketModel>>,
    #[serde(default)]
    pub(crate) documents: Vec<DocumentModel>,
    #[serde(default)]
    pub(crate) active_document_id: Option<String>,
    #[serde(default)]
    pub(crate) active_tab: Option<String>,
    #[serde(default)]
    pub(crate) taxpayer_info: Option<TaxpayerInfoModel>,
    #[serde(default)]
    pub(crate) timestamp: Option<String>,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BucketModel {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) value: f64,
    #[serde(default)]
    pub(crate) sources: Vec<BucketSourceModel>,
    #[serde(default)]
    pub(crate) section: String,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BucketSourceModel {
    pub(crate) doc_name: String,
    pub(crate) value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) chip_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) original_chip: Option<ChipModel>,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentModel {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) chips: Vec<ChipModel>,
    #[serde(default)]
    pub(crate) image_urls: Vec<String>,
}

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaxpayerInfoModel {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) id_type: String,
    #[serde(default)]
    pub(crate) id_number: String,
    #[serde(default)]
    pub(crate) city: String,
    #[serde(default)]
    pub(crate) tax_year: String,
}

// Loading.
// ---

impl Into<Bucket> for BucketModel {
    /// Classification is not stored; the ledger takes it from the schema.
    fn into(self) -> Bucket {
        Bucket {
            id: line(self.id),
            name: self.name,
            section: self.section,
            value: self.value,
            sources: self.sources.into_iter().map(Into::into).collect(),
            calculated: false,
        }
    }
}

impl Into<BucketSource> for BucketSourceModel {
    fn into(self) -> BucketSource {
        BucketSource {
            doc_name: self.doc_name,
            value: self.value,
            chip_id: self.chip_id,
            document_id: self.document_id.map(document_id),
            original_chip: self.original_chip.map(Into::into),
        }
    }
}

impl Into<Document> for DocumentModel {
    fn into(self) -> Document {
        Document::new(
            document_id(self.id),
            self.name,
            self.chips.into_iter().map(Into::into).collect(),
        )
        .with_image_urls(self.image_urls)
    }
}

impl Into<TaxpayerInfo> for TaxpayerInfoModel {
    fn into(self) -> TaxpayerInfo {
        TaxpayerInfo {
            name: self.name,
            id_type: self.id_type,
            id_number: self.id_number,
            city: self.city,
            tax_year: self.tax_year,
        }
    }
}

// Saving.
// ---

impl From<&Bucket> for BucketModel {
    fn from(bucket: &Bucket) -> Self {
        Self {
            id: bucket.id.0.clone(),
            name: bucket.name.clone(),
            value: bucket.value,
            sources: bucket.sources.iter().map(Into::into).collect(),
            section: bucket.section.clone(),
        }
    }
}

impl From<&BucketSource> for BucketSourceModel {
    fn from(source: &BucketSource) -> Self {
        Self {
            doc_name: source.doc_name.clone(),
            value: source.value,
            chip_id: source.chip_id.clone(),
            document_id: source.document_id.as_ref().map(|id| id.0.clone()),
            original_chip: source.original_chip.as_ref().map(Into::into),
        }
    }
}

impl From<&Document> for DocumentModel {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id.0.clone(),
            name: document.name.clone(),
            chips: document.chips.iter().map(Into::into).collect(),
            image_urls: document.image_urls.clone(),
        }
    }
}

impl From<&TaxpayerInfo> for TaxpayerInfoModel {
    fn from(info: &TaxpayerInfo) -> Self {
        Self {
            name: info.name.clone(),
            id_type: info.id_type.clone(),
            id_number: info.id_number.clone(),
            city: info.city.clone(),
            tax_year: info.tax_year.clone(),
        }
    }
}

impl From<&Session> for SessionModel {
    /// Page images are not persisted.
    fn from(session: &Session) -> Self {
        let DocumentInventory { documents } = session.state.inventory.without_images();
        Self {
            buckets: Some(session.state.ledger.buckets.iter().map(Into::into).collect()),
            documents: documents.iter().map(Into::into).collect(),
            active_document_id: session.active_document_id.as_ref().map(|id| id.0.clone()),
            active_tab: Some(session.active_tab.clone()),
            taxpayer_info: Some((&session.taxpayer_info).into()),
            timestamp: session.saved_at.clone(),
        }
    }
}
