use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use fractic_server_error::ServerError;

use crate::{
    data::repositories::session_repository_impl::SessionRepositoryImpl,
    domain::{
        logic::formula_evaluator::FormulaEvaluator,
        repositories::session_repository::SessionRepository,
    },
    entities::{FormSchema, Session},
};

#[async_trait]
pub trait SessionUsecase: Send + Sync {
    fn load_from_string(&self, schema: Arc<FormSchema>, s: &str) -> Result<Session, ServerError>;

    async fn load_from_file<P>(
        &self,
        schema: Arc<FormSchema>,
        path: P,
    ) -> Result<Session, ServerError>
    where
        P: AsRef<Path> + Send;

    /// Serializes `session`, stamped with the current time.
    fn save_to_string(&self, session: &Session) -> Result<String, ServerError>;

    async fn save_to_file<P>(&self, session: &Session, path: P) -> Result<(), ServerError>
    where
        P: AsRef<Path> + Send;
}

pub(crate) struct SessionUsecaseImpl<
    R1 = SessionRepositoryImpl, // Default.
> where
    R1: SessionRepository,
{
    session_repository: R1,
}

fn recompute(mut session: Session) -> Session {
    session.state.ledger = FormulaEvaluator::new(&session.state.ledger).process();
    session
}

fn stamped(session: &Session) -> Session {
    Session {
        saved_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        ..session.clone()
    }
}

#[async_trait]
impl<R1> SessionUsecase for SessionUsecaseImpl<R1>
where
    R1: SessionRepository,
{
    fn load_from_string(&self, schema: Arc<FormSchema>, s: &str) -> Result<Session, ServerError> {
        let session = self.session_repository.from_string(schema, s)?;
        Ok(recompute(session))
    }

    async fn load_from_file<P>(
        &self,
        schema: Arc<FormSchema>,
        path: P,
    ) -> Result<Session, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let session = self.session_repository.from_file(schema, path).await?;
        Ok(recompute(session))
    }

    fn save_to_string(&self, session: &Session) -> Result<String, ServerError> {
        self.session_repository.to_string(&stamped(session))
    }

    async fn save_to_file<P>(&self, session: &Session, path: P) -> Result<(), ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let session = stamped(session);
        self.session_repository.to_file(&session, path).await
    }
}

impl SessionUsecaseImpl {
    pub(crate) fn new() -> Self {
        SessionUsecaseImpl {
            session_repository: SessionRepositoryImpl::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        domain::logic::utils::test_support::small_schema,
        entities::{line, TaxpayerInfo},
    };

    #[test]
    fn load_repairs_stale_calculated_lines() {
        let json = r#"{
            "buckets": [
                { "id": "29", "value": 5000000, "sources": [{ "docName": "Entrada Manual", "value": 5000000 }] },
                { "id": "30", "value": 1000000, "sources": [{ "docName": "Entrada Manual", "value": 1000000 }] },
                { "id": "31", "value": 42, "sources": [] }
            ]
        }"#;
        let session = SessionUsecaseImpl::new()
            .load_from_string(small_schema(), json)
            .unwrap();
        let ledger = session.state.ledger();
        assert_eq!(ledger.get(&line("31")).unwrap().value(), 4_000_000.0);
        assert_eq!(ledger.get(&line("31")).unwrap().name(), "Total patrimonio líquido");
    }

    #[test]
    fn save_stamps_the_current_time() {
        let usecase = SessionUsecaseImpl::new();
        let session = Session {
            state: crate::domain::logic::utils::test_support::small_state(),
            active_document_id: None,
            active_tab: "Patrimonio".to_string(),
            taxpayer_info: TaxpayerInfo::default(),
            saved_at: None,
        };
        let json = usecase.save_to_string(&session).unwrap();
        let loaded = usecase.load_from_string(small_schema(), &json).unwrap();
        let saved_at = loaded.saved_at.unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&saved_at).is_ok());
        assert!(saved_at.ends_with('Z'));
        assert_eq!(loaded.state, session.state);
    }
}
