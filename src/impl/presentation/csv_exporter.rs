use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use fractic_server_error::ServerError;

use crate::{entities::Ledger, errors::CsvWriteError};

use super::utils::format_plain;

const NO_SOURCES: &str = "Sin fuentes";

/// Spreadsheet exports of the ledger: the form itself, one row per line, and
/// the audit trail, one row per provenance entry.
pub(crate) struct CsvExporter;

impl CsvExporter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn form_csv(&self, ledger: &Ledger) -> Result<String, ServerError> {
        let mut writer = Self::writer();
        Self::write(&mut writer, ["Sección", "Renglón", "Concepto", "Valor", "Fuentes"])?;
        for bucket in ledger.buckets() {
            let sources = bucket
                .sources()
                .iter()
                .map(|s| format!("{}: ${}", s.doc_name, format_plain(s.value)))
                .collect::<Vec<_>>()
                .join("; ");
            Self::write(
                &mut writer,
                [
                    bucket.section(),
                    bucket.id().as_str(),
                    bucket.name(),
                    format_plain(bucket.value()).as_str(),
                    if sources.is_empty() {
                        NO_SOURCES
                    } else {
                        sources.as_str()
                    },
                ],
            )?;
        }
        Self::finish(writer)
    }

    pub(crate) fn audit_csv(&self, ledger: &Ledger) -> Result<String, ServerError> {
        let mut writer = Self::writer();
        Self::write(
            &mut writer,
            ["Sección", "Renglón", "Concepto", "Documento Fuente", "Valor"],
        )?;
        for bucket in ledger.buckets() {
            for source in bucket.sources() {
                Self::write(
                    &mut writer,
                    [
                        bucket.section(),
                        bucket.id().as_str(),
                        bucket.name(),
                        source.doc_name.as_str(),
                        format_plain(source.value).as_str(),
                    ],
                )?;
            }
        }
        Self::finish(writer)
    }

    pub(crate) fn form_file_name(&self, date: NaiveDate) -> String {
        format!("formulario_210_{}.csv", date.format("%Y-%m-%d"))
    }

    pub(crate) fn audit_file_name(&self, date: NaiveDate) -> String {
        format!("audit_trail_{}.csv", date.format("%Y-%m-%d"))
    }

    fn writer() -> csv::Writer<Vec<u8>> {
        WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new())
    }

    fn write<'a>(
        writer: &mut csv::Writer<Vec<u8>>,
        record: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ServerError> {
        writer
            .write_record(record)
            .map_err(|e| CsvWriteError::with_debug(&e))
    }

    fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ServerError> {
        let bytes = writer
            .into_inner()
            .map_err(|e| CsvWriteError::with_debug(e.error()))?;
        String::from_utf8(bytes).map_err(|e| CsvWriteError::with_debug(&e))
    }
}
