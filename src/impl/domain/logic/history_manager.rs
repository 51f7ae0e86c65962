use crate::entities::FormState;

/// Undo stack of full (ledger, documents) snapshots. Unbounded.
#[derive(Debug, Default)]
pub struct HistoryManager {
    snapshots: Vec<FormState>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a copy of the state as it is before a mutation.
    pub fn snapshot(&mut self, state: &FormState) {
        self.record(state.clone());
    }

    pub(crate) fn record(&mut self, previous: FormState) {
        self.snapshots.push(previous);
    }

    /// Replace `current` wholesale with the most recent snapshot. Returns
    /// false, leaving `current` untouched, when there is nothing to undo.
    pub fn undo(&mut self, current: &mut FormState) -> bool {
        match self.snapshots.pop() {
            Some(previous) => {
                *current = previous;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
