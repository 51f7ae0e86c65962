use fractic_server_error::ServerError;

use crate::{
    entities::{
        line, AssignmentOutcome, AssignmentState, BucketId, BucketSource, Chip, DocumentId,
        FormState, Rejection,
    },
    errors::ChipNotFound,
};

use super::{history_manager::HistoryManager, utils::commit};

/// Moves values into the ledger, from a document's chip pool or typed in by
/// the user, and back out again.
#[derive(Debug, Default)]
pub struct AssignmentProtocol {
    state: AssignmentState,
}

impl AssignmentProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AssignmentState {
        &self.state
    }

    /// Start transferring a chip. A transfer already in flight is abandoned.
    pub(crate) fn pick_up(
        &mut self,
        form: &FormState,
        document_id: &DocumentId,
        chip_id: &str,
    ) -> Result<(), ServerError> {
        let chip = form
            .inventory
            .get(document_id)?
            .chip(chip_id)
            .cloned()
            .ok_or_else(|| ChipNotFound::new(chip_id, document_id.as_str()))?;
        tracing::debug!(document_id = %document_id, chip_id, value = chip.value, "chip picked up");
        self.state = AssignmentState::Pending {
            document_id: document_id.clone(),
            chip,
        };
        Ok(())
    }

    pub(crate) fn cancel(&mut self) -> AssignmentOutcome {
        if let AssignmentState::Pending { chip, .. } = std::mem::take(&mut self.state) {
            tracing::debug!(chip_id = %chip.id, "assignment cancelled");
        }
        AssignmentOutcome::Cancelled
    }

    /// Finish the pending transfer over `target`, or over nothing at all.
    /// Always leaves the protocol idle.
    pub(crate) fn drop_on(
        &mut self,
        form: &mut FormState,
        history: &mut HistoryManager,
        target: Option<&BucketId>,
    ) -> Result<AssignmentOutcome, ServerError> {
        let AssignmentState::Pending { document_id, chip } = std::mem::take(&mut self.state)
        else {
            return Ok(AssignmentOutcome::Cancelled);
        };
        let Some(bucket_id) = target else {
            tracing::debug!(chip_id = %chip.id, "chip dropped outside the form");
            return Ok(AssignmentOutcome::Cancelled);
        };
        if let Some(rejection) = Self::guard(form, bucket_id)? {
            return Ok(AssignmentOutcome::Rejected(rejection));
        }

        commit(form, history, |next| {
            let document_name = next.inventory.get(&document_id)?.name().to_string();
            let owned_chip = next.inventory.remove_chip(&document_id, &chip.id)?;
            next.ledger.set_manual_value(
                bucket_id,
                BucketSource::from_chip(document_name, document_id.clone(), owned_chip),
            )
        })?;
        tracing::info!(
            bucket_id = %bucket_id,
            document_id = %document_id,
            chip_id = %chip.id,
            value = chip.value,
            "chip assigned"
        );
        Ok(AssignmentOutcome::Committed {
            bucket_id: bucket_id.clone(),
        })
    }

    /// Record a value typed in by the user.
    pub(crate) fn add_manual_value(
        &self,
        form: &mut FormState,
        history: &mut HistoryManager,
        bucket_id: &BucketId,
        amount: f64,
    ) -> Result<AssignmentOutcome, ServerError> {
        if let Some(rejection) = Self::guard(form, bucket_id)? {
            return Ok(AssignmentOutcome::Rejected(rejection));
        }
        commit(form, history, |next| {
            next.ledger
                .set_manual_value(bucket_id, BucketSource::manual(amount))
        })?;
        tracing::info!(bucket_id = %bucket_id, value = amount, "manual value added");
        Ok(AssignmentOutcome::Committed {
            bucket_id: bucket_id.clone(),
        })
    }

    /// Delete a provenance entry, returning its chip to the origin document
    /// when there is one.
    pub(crate) fn delete_source(
        &self,
        form: &mut FormState,
        history: &mut HistoryManager,
        bucket_id: &BucketId,
        index: usize,
    ) -> Result<BucketSource, ServerError> {
        let removed = commit(form, history, |next| {
            let removed = next.ledger.remove_source(bucket_id, index)?;
            if let Some((document_id, chip)) = removed.restorable_chip() {
                if !next.inventory.contains(document_id) {
                    tracing::warn!(
                        document_id = %document_id,
                        chip_id = %chip.id,
                        "origin document was removed, chip not restored"
                    );
                } else if !next.inventory.restore_chip(document_id, chip.clone())? {
                    tracing::debug!(chip_id = %chip.id, "chip already back in its pool");
                }
            }
            Ok(removed)
        })?;
        tracing::info!(
            bucket_id = %bucket_id,
            index,
            value = removed.value,
            doc_name = %removed.doc_name,
            "source deleted"
        );
        Ok(removed)
    }

    fn guard(form: &FormState, bucket_id: &BucketId) -> Result<Option<Rejection>, ServerError> {
        let bucket = form.ledger.get(bucket_id)?;
        if bucket.is_calculated() {
            tracing::debug!(bucket_id = %bucket_id, "write to calculated line rejected");
            return Ok(Some(Rejection::CalculatedField {
                bucket_id: bucket_id.clone(),
            }));
        }
        Ok(None)
    }
}

/// Lines worth highlighting while a chip is hovered or dragged.
pub fn suggested_buckets(chip: &Chip) -> Vec<BucketId> {
    if chip.value > 10_000_000.0 {
        vec![line("32")]
    } else if chip.value > 1_000_000.0 {
        vec![line("32"), line("45")]
    } else {
        Vec::new()
    }
}
