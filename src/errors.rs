use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_client_error!(WriteError, "Error writing file.");

// Parsing-related.
define_internal_error!(InvalidFormSchema, "Invalid form schema: {details}.", { details: &str });
define_client_error!(InvalidSession, "Invalid session file (invalid JSON format).");
define_client_error!(
    InvalidExtractionResponse,
    "Invalid response from extraction service for '{file_name}'.",
    { file_name: &str }
);
define_client_error!(
    InvalidManualAmount,
    "Invalid amount: '{value}'. Enter a positive number.",
    { value: &str }
);

// Ledger-related.
define_client_error!(
    CalculatedFieldViolation,
    "Line {bucket_id} is calculated automatically and does not accept manual values.",
    { bucket_id: &str }
);
define_internal_error!(BucketNotFound, "Line '{bucket_id}' is not part of the form.", { bucket_id: &str });
define_internal_error!(
    SourceIndexOutOfRange,
    "Line {bucket_id} has no source at index {index} (sources: {len}).",
    { bucket_id: &str, index: usize, len: usize }
);

// Document-related.
define_internal_error!(DocumentNotFound, "Document '{document_id}' not found.", { document_id: &str });
define_internal_error!(
    ChipNotFound,
    "Chip '{chip_id}' is not in the pool of document '{document_id}'.",
    { chip_id: &str, document_id: &str }
);
define_client_error!(
    ExtractionFailed,
    "Extraction failed for '{file_name}'.",
    { file_name: &str }
);

// Workbench-related.
define_internal_error!(SectionNotFound, "Section '{section}' is not part of the form.", { section: &str });

// Export-related.
define_internal_error!(CsvWriteError, "Error writing CSV export.");
define_internal_error!(SessionWriteError, "Error serializing session.");
