use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::session_json_datasource::{SessionJsonDatasource, SessionJsonDatasourceImpl},
        models::session_model::SessionModel,
    },
    domain::repositories::session_repository::SessionRepository,
    entities::{
        document_id, Bucket, DocumentInventory, FormSchema, FormState, Ledger, Session,
        TaxpayerInfo,
    },
};

pub(crate) struct SessionRepositoryImpl<DS = SessionJsonDatasourceImpl>
where
    DS: SessionJsonDatasource,
{
    session_datasource: DS,
}

impl<DS: SessionJsonDatasource> SessionRepositoryImpl<DS> {
    fn build(&self, schema: Arc<FormSchema>, model: SessionModel) -> Session {
        let ledger = match model.buckets {
            Some(buckets) => Ledger::restore(
                schema.clone(),
                buckets.into_iter().map(Into::<Bucket>::into).collect(),
            ),
            None => Ledger::new(schema.clone()),
        };
        let inventory = DocumentInventory {
            documents: model.documents.into_iter().map(Into::into).collect(),
        };

        let active_document_id = model
            .active_document_id
            .map(document_id)
            .filter(|id| {
                let known = inventory.contains(id);
                if !known {
                    tracing::debug!(document_id = %id, "saved active document not in session");
                }
                known
            });
        let sections = schema.sections();
        let active_tab = model
            .active_tab
            .filter(|tab| sections.contains(&tab.as_str()))
            .or_else(|| sections.first().map(|s| s.to_string()))
            .unwrap_or_default();

        Session {
            state: FormState { ledger, inventory },
            active_document_id,
            active_tab,
            taxpayer_info: model
                .taxpayer_info
                .map(Into::into)
                .unwrap_or_else(TaxpayerInfo::default),
            saved_at: model.timestamp,
        }
    }
}

#[async_trait]
impl<DS: SessionJsonDatasource> SessionRepository for SessionRepositoryImpl<DS> {
    fn from_string(&self, schema: Arc<FormSchema>, s: &str) -> Result<Session, ServerError> {
        let model = self.session_datasource.from_string(s)?;
        Ok(self.build(schema, model))
    }

    async fn from_file<P>(&self, schema: Arc<FormSchema>, path: P) -> Result<Session, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let model = self.session_datasource.from_file(path).await?;
        Ok(self.build(schema, model))
    }

    fn to_string(&self, session: &Session) -> Result<String, ServerError> {
        self.session_datasource.to_json(&session.into())
    }

    async fn to_file<P>(&self, session: &Session, path: P) -> Result<(), ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let model: SessionModel = session.into();
        self.session_datasource.to_file(&model, path).await
    }
}

impl SessionRepositoryImpl {
    pub(crate) fn new() -> Self {
        Self {
            session_datasource: SessionJsonDatasourceImpl::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        domain::logic::utils::test_support::{small_schema, small_state},
        entities::{line, BucketSource, Chip},
    };

    fn session() -> Session {
        let mut state = small_state();
        let chip = state.inventory.remove_chip(&document_id("d1"), "c1").unwrap();
        state
            .ledger
            .set_manual_value(
                &line("32"),
                BucketSource::from_chip("certificado_ingresos.pdf", document_id("d1"), chip),
            )
            .unwrap();
        state
            .inventory
            .restore_chip(&document_id("d1"), Chip::new("c9", 12.0))
            .unwrap();
        Session {
            state,
            active_document_id: Some(document_id("d1")),
            active_tab: "Cédula General".to_string(),
            taxpayer_info: TaxpayerInfo {
                name: "Ana Gómez".to_string(),
                ..TaxpayerInfo::default()
            },
            saved_at: Some("2024-11-02T10:00:00.000Z".to_string()),
        }
    }

    #[test]
    fn round_trip_preserves_provenance_and_workbench_state() {
        let repository = SessionRepositoryImpl::new();
        let original = session();
        let json = repository.to_string(&original).unwrap();
        let loaded = repository.from_string(small_schema(), &json).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn page_images_are_not_saved() {
        let repository = SessionRepositoryImpl::new();
        let mut original = session();
        original.state.inventory.documents[0].image_urls = vec!["p1.png".to_string()];
        let json = repository.to_string(&original).unwrap();
        assert!(!json.contains("p1.png"));
        let loaded = repository.from_string(small_schema(), &json).unwrap();
        assert!(loaded.state.inventory().documents()[0].image_urls().is_empty());
    }

    #[test]
    fn empty_session_gets_defaults() {
        let loaded = SessionRepositoryImpl::new()
            .from_string(small_schema(), "{}")
            .unwrap();
        assert_eq!(loaded.state.ledger(), &Ledger::new(small_schema()));
        assert!(loaded.state.inventory().documents().is_empty());
        assert_eq!(loaded.active_document_id, None);
        assert_eq!(loaded.active_tab, "Patrimonio");
        assert_eq!(loaded.taxpayer_info, TaxpayerInfo::default());
    }

    #[test]
    fn unknown_tab_and_dangling_active_document_are_dropped() {
        let loaded = SessionRepositoryImpl::new()
            .from_string(
                small_schema(),
                r#"{ "activeTab": "Laboral", "activeDocumentId": "gone", "documents": [] }"#,
            )
            .unwrap();
        assert_eq!(loaded.active_tab, "Patrimonio");
        assert_eq!(loaded.active_document_id, None);
    }

    #[test]
    fn malformed_session_is_rejected() {
        let result = SessionRepositoryImpl::new().from_string(small_schema(), "[1, 2");
        assert!(result.is_err());
    }
}
