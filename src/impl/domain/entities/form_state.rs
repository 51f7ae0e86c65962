use super::{inventory::DocumentInventory, ledger::Ledger};

/// Everything a history entry restores: the ledger together with the
/// documents its provenance points into.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub(crate) ledger: Ledger,
    pub(crate) inventory: DocumentInventory,
}

impl FormState {
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn inventory(&self) -> &DocumentInventory {
        &self.inventory
    }
}
