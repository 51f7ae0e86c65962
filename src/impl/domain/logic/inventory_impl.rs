use fractic_server_error::ServerError;

use crate::{
    entities::{Chip, Document, DocumentId, DocumentInventory},
    errors::{ChipNotFound, DocumentNotFound},
};

impl DocumentInventory {
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, id: &DocumentId) -> Result<&Document, ServerError> {
        self.documents
            .iter()
            .find(|d| &d.id == id)
            .ok_or_else(|| DocumentNotFound::new(id.as_str()))
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.documents.iter().any(|d| &d.id == id)
    }

    fn get_mut(&mut self, id: &DocumentId) -> Result<&mut Document, ServerError> {
        self.documents
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(|| DocumentNotFound::new(id.as_str()))
    }

    pub(crate) fn add_documents(&mut self, documents: impl IntoIterator<Item = Document>) {
        self.documents.extend(documents);
    }

    /// Values already assigned from the document stay in the ledger.
    pub(crate) fn remove_document(&mut self, id: &DocumentId) -> Result<Document, ServerError> {
        let position = self
            .documents
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| DocumentNotFound::new(id.as_str()))?;
        Ok(self.documents.remove(position))
    }

    pub(crate) fn rename(
        &mut self,
        id: &DocumentId,
        name: impl Into<String>,
    ) -> Result<(), ServerError> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    pub(crate) fn remove_chip(
        &mut self,
        document_id: &DocumentId,
        chip_id: &str,
    ) -> Result<Chip, ServerError> {
        let document = self.get_mut(document_id)?;
        let position = document
            .chips
            .iter()
            .position(|c| c.id == chip_id)
            .ok_or_else(|| ChipNotFound::new(chip_id, document_id.as_str()))?;
        Ok(document.chips.remove(position))
    }

    /// Return a chip to its document's pool. Returns false, without changing
    /// anything, when a chip with the same id is already there.
    pub(crate) fn restore_chip(
        &mut self,
        document_id: &DocumentId,
        chip: Chip,
    ) -> Result<bool, ServerError> {
        let document = self.get_mut(document_id)?;
        if document.chips.iter().any(|c| c.id == chip.id) {
            return Ok(false);
        }
        document.chips.push(chip);
        Ok(true)
    }

    /// Drop page images, which are not persisted with the session.
    pub(crate) fn without_images(&self) -> Self {
        Self {
            documents: self
                .documents
                .iter()
                .cloned()
                .map(|d| d.with_image_urls(Vec::new()))
                .collect(),
        }
    }
}
