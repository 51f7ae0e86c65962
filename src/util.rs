use std::{
    path::{Path, PathBuf},
    str::FromStr as _,
    sync::Arc,
};

use chrono::Utc;
use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::form_schema_datasource::{FormSchemaDatasource as _, FormSchemaDatasourceImpl},
        models::manual_amount_model::ManualAmountModel,
    },
    domain::{
        logic::{
            assignment_protocol::AssignmentProtocol, history_manager::HistoryManager,
            utils::commit,
        },
        usecases::{
            session_usecase::{SessionUsecase as _, SessionUsecaseImpl},
            upload_usecase::{UploadUsecase as _, UploadUsecaseImpl},
        },
    },
    entities::{
        AssignmentOutcome, AssignmentState, BucketId, BucketSource, Document, DocumentId,
        DocumentInventory, ExtractionResult, ExtractionService, FormSchema, FormState, Ledger,
        Session, TaxpayerInfo, UploadFile, UploadReport,
    },
    errors::{DocumentNotFound, SectionNotFound, WriteError},
    presentation::{csv_exporter::CsvExporter, summary_printer::SummaryPrinter},
};

/// A tax-form workbench: the ledger, the uploaded documents, the undo history
/// and the UI-facing session state, owned in one place. Every mutation goes
/// through this type.
pub struct TaxFormUtil {
    schema: Arc<FormSchema>,
    state: FormState,
    history: HistoryManager,
    assignment: AssignmentProtocol,
    active_document_id: Option<DocumentId>,
    active_tab: String,
    taxpayer_info: TaxpayerInfo,
    session_usecase: SessionUsecaseImpl,
    upload_usecase: UploadUsecaseImpl,
    csv_exporter: CsvExporter,
    summary_printer: SummaryPrinter,
}

impl TaxFormUtil {
    /// Empty Formulario 210.
    pub fn new() -> Result<Self, ServerError> {
        Ok(Self::from_schema(FormSchemaDatasourceImpl::new().embedded()?))
    }

    /// Empty form for a schema given in RON.
    pub fn with_schema_ron(schema_ron: &str) -> Result<Self, ServerError> {
        Ok(Self::from_schema(
            FormSchemaDatasourceImpl::new().from_string(schema_ron)?,
        ))
    }

    fn from_schema(schema: FormSchema) -> Self {
        let schema = Arc::new(schema);
        let active_tab = schema
            .sections()
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default();
        Self {
            state: FormState {
                ledger: Ledger::new(schema.clone()),
                inventory: DocumentInventory::default(),
            },
            schema,
            history: HistoryManager::new(),
            assignment: AssignmentProtocol::new(),
            active_document_id: None,
            active_tab,
            taxpayer_info: TaxpayerInfo::default(),
            session_usecase: SessionUsecaseImpl::new(),
            upload_usecase: UploadUsecaseImpl::new(),
            csv_exporter: CsvExporter::new(),
            summary_printer: SummaryPrinter::new(),
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn ledger(&self) -> &Ledger {
        &self.state.ledger
    }

    pub fn inventory(&self) -> &DocumentInventory {
        &self.state.inventory
    }

    pub fn assignment_state(&self) -> &AssignmentState {
        self.assignment.state()
    }

    /// Number of mutations that can be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // Assignment.
    // ---

    /// Start dragging a chip out of a document's pool.
    pub fn pick_up(&mut self, document_id: &DocumentId, chip_id: &str) -> Result<(), ServerError> {
        self.assignment.pick_up(&self.state, document_id, chip_id)
    }

    /// Release the dragged chip over a line, or over nothing (`None`).
    pub fn drop_on(&mut self, target: Option<&BucketId>) -> Result<AssignmentOutcome, ServerError> {
        self.assignment
            .drop_on(&mut self.state, &mut self.history, target)
    }

    pub fn cancel_assignment(&mut self) -> AssignmentOutcome {
        self.assignment.cancel()
    }

    /// Add an amount typed in by the user, ex. "$ 1,500,000".
    pub fn add_manual_value(
        &mut self,
        bucket_id: &BucketId,
        text: &str,
    ) -> Result<AssignmentOutcome, ServerError> {
        let amount = ManualAmountModel::from_str(text)?;
        self.add_manual_amount(bucket_id, amount.into())
    }

    pub fn add_manual_amount(
        &mut self,
        bucket_id: &BucketId,
        amount: f64,
    ) -> Result<AssignmentOutcome, ServerError> {
        self.assignment
            .add_manual_value(&mut self.state, &mut self.history, bucket_id, amount)
    }

    /// Remove the source at `index` from a line. A chip source goes back to
    /// its document.
    pub fn delete_source(
        &mut self,
        bucket_id: &BucketId,
        index: usize,
    ) -> Result<BucketSource, ServerError> {
        self.assignment
            .delete_source(&mut self.state, &mut self.history, bucket_id, index)
    }

    /// Revert the most recent mutation. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.state) {
            tracing::debug!("nothing to undo");
            return false;
        }
        self.assignment.cancel();
        self.fix_active_document();
        tracing::info!(remaining = self.history.len(), "undo");
        true
    }

    // Documents.
    // ---

    /// Extract every file concurrently and add the documents that succeeded,
    /// in input order, as a single undoable step. The first one becomes the
    /// active document.
    pub async fn upload_documents<S>(
        &mut self,
        service: &S,
        files: &[UploadFile],
    ) -> Result<UploadReport, ServerError>
    where
        S: ExtractionService + ?Sized,
    {
        let (documents, failures) = self.upload_usecase.extract_all(service, files).await;
        let added: Vec<DocumentId> = documents.iter().map(|d| d.id().clone()).collect();
        if !documents.is_empty() {
            commit(&mut self.state, &mut self.history, |next| {
                next.inventory.add_documents(documents);
                Ok(())
            })?;
            self.active_document_id = added.first().cloned();
        }
        tracing::info!(
            added = added.len(),
            failed = failures.len(),
            "documents uploaded"
        );
        Ok(UploadReport { added, failures })
    }

    /// Add a document from an extraction result obtained elsewhere.
    pub fn add_extracted_document(
        &mut self,
        file_name: &str,
        result: ExtractionResult,
    ) -> Result<DocumentId, ServerError> {
        let document = Document::new(DocumentId::generate(), file_name, result.chips)
            .with_image_urls(result.image_urls);
        self.add_document(document)
    }

    /// Add a document from the raw JSON body returned by the extraction
    /// service.
    pub fn add_document_from_response(
        &mut self,
        file_name: &str,
        body: &str,
    ) -> Result<DocumentId, ServerError> {
        let document = self.upload_usecase.from_response(file_name, body)?;
        self.add_document(document)
    }

    fn add_document(&mut self, document: Document) -> Result<DocumentId, ServerError> {
        let id = document.id().clone();
        commit(&mut self.state, &mut self.history, |next| {
            next.inventory.add_documents([document]);
            Ok(())
        })?;
        self.active_document_id = Some(id.clone());
        tracing::info!(document_id = %id, "document added");
        Ok(id)
    }

    /// Values already assigned from the document stay in the form.
    pub fn remove_document(&mut self, document_id: &DocumentId) -> Result<(), ServerError> {
        commit(&mut self.state, &mut self.history, |next| {
            next.inventory.remove_document(document_id).map(|_| ())
        })?;
        let picked_from_removed = matches!(
            self.assignment.state(),
            AssignmentState::Pending { document_id: pending, .. } if pending == document_id
        );
        if picked_from_removed {
            self.assignment.cancel();
        }
        self.fix_active_document();
        tracing::info!(document_id = %document_id, "document removed");
        Ok(())
    }

    /// Blank names and unchanged names are ignored.
    pub fn rename_document(
        &mut self,
        document_id: &DocumentId,
        name: &str,
    ) -> Result<(), ServerError> {
        let name = name.trim();
        if name.is_empty() || self.state.inventory.get(document_id)?.name() == name {
            return Ok(());
        }
        commit(&mut self.state, &mut self.history, |next| {
            next.inventory.rename(document_id, name)
        })?;
        tracing::info!(document_id = %document_id, name, "document renamed");
        Ok(())
    }

    pub fn active_document_id(&self) -> Option<&DocumentId> {
        self.active_document_id.as_ref()
    }

    pub fn set_active_document(&mut self, document_id: &DocumentId) -> Result<(), ServerError> {
        if !self.state.inventory.contains(document_id) {
            return Err(DocumentNotFound::new(document_id.as_str()));
        }
        self.active_document_id = Some(document_id.clone());
        Ok(())
    }

    /// Keep the active document pointing at an existing document, falling
    /// back to the first one.
    fn fix_active_document(&mut self) {
        let documents = self.state.inventory.documents();
        let still_there = self
            .active_document_id
            .as_ref()
            .is_some_and(|id| self.state.inventory.contains(id));
        if !still_there {
            self.active_document_id = documents.first().map(|d| d.id().clone());
        }
    }

    // Tabs and taxpayer.
    // ---

    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    pub fn set_active_tab(&mut self, section: &str) -> Result<(), ServerError> {
        if !self.schema.sections().contains(&section) {
            return Err(SectionNotFound::new(section));
        }
        self.active_tab = section.to_string();
        Ok(())
    }

    /// Move to the next section, staying on the last one.
    pub fn next_tab(&mut self) -> &str {
        self.step_tab(1)
    }

    /// Move to the previous section, staying on the first one.
    pub fn previous_tab(&mut self) -> &str {
        self.step_tab(-1)
    }

    fn step_tab(&mut self, step: isize) -> &str {
        let sections = self.schema.sections();
        if let Some(current) = sections.iter().position(|s| *s == self.active_tab) {
            let target = current
                .saturating_add_signed(step)
                .min(sections.len().saturating_sub(1));
            self.active_tab = sections[target].to_string();
        }
        &self.active_tab
    }

    pub fn taxpayer_info(&self) -> &TaxpayerInfo {
        &self.taxpayer_info
    }

    pub fn set_taxpayer_info(&mut self, taxpayer_info: TaxpayerInfo) {
        self.taxpayer_info = taxpayer_info;
    }

    // Exports.
    // ---

    pub fn export_form_csv(&self) -> Result<String, ServerError> {
        self.csv_exporter.form_csv(&self.state.ledger)
    }

    pub fn export_audit_csv(&self) -> Result<String, ServerError> {
        self.csv_exporter.audit_csv(&self.state.ledger)
    }

    /// Write the form and audit CSVs into `dir` under dated file names,
    /// returning their paths.
    pub async fn export_to_dir<P>(&self, dir: P) -> Result<(PathBuf, PathBuf), ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let today = Utc::now().date_naive();
        let form_path = dir.as_ref().join(self.csv_exporter.form_file_name(today));
        let audit_path = dir.as_ref().join(self.csv_exporter.audit_file_name(today));
        tokio::fs::write(&form_path, self.export_form_csv()?)
            .await
            .map_err(|e| WriteError::with_debug(&e))?;
        tokio::fs::write(&audit_path, self.export_audit_csv()?)
            .await
            .map_err(|e| WriteError::with_debug(&e))?;
        tracing::info!(form = %form_path.display(), audit = %audit_path.display(), "form exported");
        Ok((form_path, audit_path))
    }

    pub fn print_summary(&self) -> String {
        self.summary_printer
            .print_summary(&self.state.ledger, &self.taxpayer_info)
    }

    // Sessions.
    // ---

    fn session(&self) -> Session {
        Session {
            state: self.state.clone(),
            active_document_id: self.active_document_id.clone(),
            active_tab: self.active_tab.clone(),
            taxpayer_info: self.taxpayer_info.clone(),
            saved_at: None,
        }
    }

    pub fn save_session(&self) -> Result<String, ServerError> {
        let json = self.session_usecase.save_to_string(&self.session())?;
        tracing::info!(bytes = json.len(), "session saved");
        Ok(json)
    }

    pub async fn save_session_to_file<P>(&self, path: P) -> Result<(), ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let path = path.as_ref().to_path_buf();
        self.session_usecase
            .save_to_file(&self.session(), &path)
            .await?;
        tracing::info!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Save as `session_{date}.json` inside `dir`, returning the path.
    pub async fn save_session_to_dir<P>(&self, dir: P) -> Result<PathBuf, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let file_name = format!("session_{}.json", Utc::now().date_naive().format("%Y-%m-%d"));
        let path = dir.as_ref().join(file_name);
        self.save_session_to_file(&path).await?;
        Ok(path)
    }

    /// Replace the whole workbench with a saved session. Nothing changes if
    /// the session cannot be read. The load itself can be undone.
    pub fn load_session(&mut self, json: &str) -> Result<(), ServerError> {
        let session = self
            .session_usecase
            .load_from_string(self.schema.clone(), json)?;
        self.apply_session(session)
    }

    pub async fn load_session_from_file<P>(&mut self, path: P) -> Result<(), ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let session = self
            .session_usecase
            .load_from_file(self.schema.clone(), path)
            .await?;
        self.apply_session(session)
    }

    fn apply_session(&mut self, session: Session) -> Result<(), ServerError> {
        let Session {
            state,
            active_document_id,
            active_tab,
            taxpayer_info,
            saved_at,
        } = session;
        commit(&mut self.state, &mut self.history, |next| {
            *next = state;
            Ok(())
        })?;
        self.assignment.cancel();
        self.active_document_id = active_document_id;
        self.active_tab = active_tab;
        self.taxpayer_info = taxpayer_info;
        tracing::info!(
            saved_at = saved_at.as_deref().unwrap_or("unknown"),
            documents = self.state.inventory.documents().len(),
            "session loaded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::{document_id, line, Chip};

    fn util() -> TaxFormUtil {
        TaxFormUtil::new().unwrap()
    }

    fn with_document(util: &mut TaxFormUtil) -> DocumentId {
        util.add_extracted_document(
            "certificado_ingresos.pdf",
            ExtractionResult {
                chips: vec![Chip::new("c1", 300_000.0), Chip::new("c2", 45_000.0)],
                image_urls: vec!["/images/p1.png".to_string()],
            },
        )
        .unwrap()
    }

    #[test]
    fn starts_empty_on_the_first_tab() {
        let util = util();
        assert_eq!(util.ledger().buckets().len(), 109);
        assert_eq!(util.active_tab(), "Patrimonio");
        assert!(util.inventory().documents().is_empty());
        assert_eq!(util.history_len(), 0);
    }

    #[test]
    fn tabs_stop_at_both_ends() {
        let mut util = util();
        assert_eq!(util.previous_tab(), "Patrimonio");
        assert_eq!(util.next_tab(), "Cédula General");
        util.set_active_tab("Liquidación Final").unwrap();
        assert_eq!(util.next_tab(), "Liquidación Final");
        assert!(util.set_active_tab("Laboral").is_err());
        assert_eq!(util.active_tab(), "Liquidación Final");
    }

    #[test]
    fn typed_amounts_are_parsed() {
        let mut util = util();
        util.add_manual_value(&line("29"), "$ 5,000,000").unwrap();
        assert_eq!(util.ledger().get(&line("29")).unwrap().value(), 5_000_000.0);
        assert!(util.add_manual_value(&line("29"), "-3").is_err());
        assert_eq!(util.history_len(), 1);
    }

    #[test]
    fn adding_a_document_makes_it_active() {
        let mut util = util();
        let id = with_document(&mut util);
        assert_eq!(util.active_document_id(), Some(&id));
        assert_eq!(util.history_len(), 1);
    }

    #[test]
    fn removing_the_active_document_moves_to_the_first_remaining() {
        let mut util = util();
        let first = with_document(&mut util);
        let second = with_document(&mut util);
        assert_eq!(util.active_document_id(), Some(&second));

        util.remove_document(&second).unwrap();
        assert_eq!(util.active_document_id(), Some(&first));
        util.remove_document(&first).unwrap();
        assert_eq!(util.active_document_id(), None);
        assert!(util.remove_document(&first).is_err());
    }

    #[test]
    fn removing_a_document_keeps_assigned_values() {
        let mut util = util();
        let id = with_document(&mut util);
        util.pick_up(&id, "c1").unwrap();
        util.drop_on(Some(&line("32"))).unwrap();
        util.pick_up(&id, "c2").unwrap();

        util.remove_document(&id).unwrap();
        assert_eq!(util.assignment_state(), &AssignmentState::Idle);
        assert_eq!(util.ledger().get(&line("32")).unwrap().value(), 300_000.0);
    }

    #[test]
    fn rename_ignores_blank_and_unchanged_names() {
        let mut util = util();
        let id = with_document(&mut util);
        util.rename_document(&id, "  ").unwrap();
        util.rename_document(&id, "certificado_ingresos.pdf").unwrap();
        assert_eq!(util.history_len(), 1);

        util.rename_document(&id, "certificado 2024.pdf").unwrap();
        assert_eq!(util.inventory().get(&id).unwrap().name(), "certificado 2024.pdf");
        assert_eq!(util.history_len(), 2);
        assert!(util.rename_document(&document_id("nope"), "x").is_err());
    }

    #[test]
    fn undo_of_an_upload_clears_the_active_document() {
        let mut util = util();
        with_document(&mut util);
        assert!(util.undo());
        assert!(util.inventory().documents().is_empty());
        assert_eq!(util.active_document_id(), None);
        assert!(!util.undo());
    }

    #[test]
    fn failed_load_leaves_everything_untouched() {
        let mut util = util();
        util.add_manual_amount(&line("29"), 10.0).unwrap();
        util.set_active_tab("Ganancias Ocasionales").unwrap();
        let before = util.state().clone();

        assert!(util.load_session("{ \"buckets\": 12 }").is_err());
        assert_eq!(util.state(), &before);
        assert_eq!(util.active_tab(), "Ganancias Ocasionales");
        assert_eq!(util.history_len(), 1);
    }

    #[test]
    fn load_can_be_undone() {
        let mut util = util();
        util.add_manual_amount(&line("29"), 10.0).unwrap();
        let before = util.state().clone();

        util.load_session("{}").unwrap();
        assert_eq!(util.ledger().get(&line("29")).unwrap().value(), 0.0);
        assert!(util.undo());
        assert_eq!(util.state(), &before);
    }

    #[test]
    fn custom_schema() {
        let util = TaxFormUtil::with_schema_ron(
            r#"FormSchemaModel(
                form: "Prueba",
                lines: [(id: "1", name: "Uno", section: "Única")],
                calculated: [],
            )"#,
        )
        .unwrap();
        assert_eq!(util.schema().form(), "Prueba");
        assert_eq!(util.active_tab(), "Única");
        assert!(TaxFormUtil::with_schema_ron("nope").is_err());
    }
}
