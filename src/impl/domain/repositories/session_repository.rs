use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{FormSchema, Session};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Rebuilds a session against `schema`. Derived lines are returned as
    /// they were saved, not recomputed.
    fn from_string(&self, schema: Arc<FormSchema>, s: &str) -> Result<Session, ServerError>;

    async fn from_file<P>(&self, schema: Arc<FormSchema>, path: P) -> Result<Session, ServerError>
    where
        P: AsRef<Path> + Send;

    fn to_string(&self, session: &Session) -> Result<String, ServerError>;

    async fn to_file<P>(&self, session: &Session, path: P) -> Result<(), ServerError>
    where
        P: AsRef<Path> + Send;
}
