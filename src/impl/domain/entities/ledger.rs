use std::sync::Arc;

use super::{bucket::Bucket, form_schema::FormSchema};

/// Every bucket of the form, in schema order. Buckets are never added or
/// removed after construction, only mutated through the ledger's methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub(crate) schema: Arc<FormSchema>,
    pub(crate) buckets: Vec<Bucket>,
}
