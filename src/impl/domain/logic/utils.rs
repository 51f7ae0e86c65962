use fractic_server_error::ServerError;

use crate::entities::FormState;

use super::{formula_evaluator::FormulaEvaluator, history_manager::HistoryManager};

/// Apply `mutation` to a copy of `state`, recompute the derived lines, and
/// only then swap the result in, pushing the previous state onto `history`.
/// On error neither `state` nor `history` is touched.
pub(crate) fn commit<T>(
    state: &mut FormState,
    history: &mut HistoryManager,
    mutation: impl FnOnce(&mut FormState) -> Result<T, ServerError>,
) -> Result<T, ServerError> {
    let mut next = state.clone();
    let out = mutation(&mut next)?;
    next.ledger = FormulaEvaluator::new(&next.ledger).process();
    history.record(std::mem::replace(state, next));
    Ok(out)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::{
        data::datasources::form_schema_datasource::{
            FormSchemaDatasource as _, FormSchemaDatasourceImpl,
        },
        entities::{
            document_id, line, Chip, Document, DocumentInventory, FormLine, FormSchema, FormState,
            Ledger,
        },
    };

    /// Lines 29-34 of the form, with 31 and 34 calculated.
    pub(crate) fn small_schema() -> Arc<FormSchema> {
        let l = |id: &str, name: &str, section: &str| FormLine {
            id: line(id),
            name: name.to_string(),
            section: section.to_string(),
        };
        Arc::new(
            FormSchema::new(
                "Formulario 210",
                vec![
                    l("29", "Total patrimonio bruto", "Patrimonio"),
                    l("30", "Deudas", "Patrimonio"),
                    l("31", "Total patrimonio líquido", "Patrimonio"),
                    l("32", "Ingresos brutos por rentas de trabajo", "Cédula General"),
                    l("33", "Ingresos no constitutivos de renta", "Cédula General"),
                    l("34", "Renta líquida ordinaria rentas de trabajo", "Cédula General"),
                ],
                vec![line("31"), line("34")],
            )
            .unwrap(),
        )
    }

    pub(crate) fn form_210_schema() -> Arc<FormSchema> {
        Arc::new(FormSchemaDatasourceImpl::new().embedded().unwrap())
    }

    /// Small ledger plus one document `d1` holding chip `c1` (300,000).
    pub(crate) fn small_state() -> FormState {
        let mut inventory = DocumentInventory::default();
        inventory.add_documents(vec![Document::new(
            document_id("d1"),
            "certificado_ingresos.pdf",
            vec![Chip::new("c1", 300_000.0).labeled("Salarios")],
        )]);
        FormState {
            ledger: Ledger::new(small_schema()),
            inventory,
        }
    }
}
