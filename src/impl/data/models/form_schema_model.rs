use std::convert::TryFrom;

use fractic_server_error::ServerError;

use crate::entities::{line, FormLine, FormSchema};

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct FormSchemaModel {
    pub(crate) form: String,
    pub(crate) lines: Vec<FormLineModel>,
    pub(crate) calculated: Vec<String>,
}

#[derive(Debug, serde_derive::Deserialize)]
pub(crate) struct FormLineModel {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) section: String,
}

impl TryFrom<FormSchemaModel> for FormSchema {
    type Error = ServerError;

    fn try_from(model: FormSchemaModel) -> Result<Self, Self::Error> {
        let lines = model
            .lines
            .into_iter()
            .map(|l| FormLine {
                id: line(l.id),
                name: l.name,
                section: l.section,
            })
            .collect();
        FormSchema::new(model.form, lines, model.calculated.into_iter().map(line))
    }
}
