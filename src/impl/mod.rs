// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod extraction_response_datasource;
        pub(crate) mod form_schema_datasource;
        pub(crate) mod session_json_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod chip_model;
        pub(crate) mod extraction_response_model;
        pub(crate) mod form_schema_model;
        pub(crate) mod manual_amount_model;
        pub(crate) mod session_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod session_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod assignment;
        pub(crate) mod bucket;
        pub(crate) mod chip;
        pub(crate) mod document;
        pub(crate) mod extraction;
        pub(crate) mod form_schema;
        pub(crate) mod form_state;
        pub(crate) mod inventory;
        pub(crate) mod ledger;
        pub(crate) mod session;
    }
    pub(crate) mod logic {
        pub(crate) mod assignment_protocol;
        pub(crate) mod formula_evaluator;
        pub(crate) mod history_manager;
        pub(crate) mod inventory_impl;
        pub(crate) mod ledger_impl;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod session_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod session_usecase;
        pub(crate) mod upload_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod csv_exporter;
    pub(crate) mod summary_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::assignment::*;
        pub use crate::domain::entities::bucket::*;
        pub use crate::domain::entities::chip::*;
        pub use crate::domain::entities::document::*;
        pub use crate::domain::entities::extraction::*;
        pub use crate::domain::entities::form_schema::*;
        pub use crate::domain::entities::form_state::*;
        pub use crate::domain::entities::inventory::*;
        pub use crate::domain::entities::ledger::*;
        pub use crate::domain::entities::session::*;
        pub use crate::domain::logic::assignment_protocol::suggested_buckets;
    }
}
