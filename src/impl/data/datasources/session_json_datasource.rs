use std::path::Path;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::models::session_model::SessionModel,
    errors::{InvalidSession, ReadError, SessionWriteError, WriteError},
};

#[async_trait]
pub(crate) trait SessionJsonDatasource: Send + Sync {
    fn from_string(&self, s: &str) -> Result<SessionModel, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<SessionModel, ServerError>
    where
        P: AsRef<Path> + Send;

    fn to_json(&self, model: &SessionModel) -> Result<String, ServerError>;

    async fn to_file<P>(&self, model: &SessionModel, path: P) -> Result<(), ServerError>
    where
        P: AsRef<Path> + Send;
}

pub(crate) struct SessionJsonDatasourceImpl;

impl SessionJsonDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionJsonDatasource for SessionJsonDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<SessionModel, ServerError> {
        serde_json::from_str(s).map_err(|e| InvalidSession::with_debug(&e))
    }

    async fn from_file<P>(&self, path: P) -> Result<SessionModel, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        self.from_string(&contents)
    }

    fn to_json(&self, model: &SessionModel) -> Result<String, ServerError> {
        serde_json::to_string_pretty(model).map_err(|e| SessionWriteError::with_debug(&e))
    }

    async fn to_file<P>(&self, model: &SessionModel, path: P) -> Result<(), ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let contents = self.to_json(model)?;
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| WriteError::with_debug(&e))
    }
}
