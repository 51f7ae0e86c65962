use fractic_server_error::ServerError;

use crate::{
    data::models::form_schema_model::FormSchemaModel, entities::FormSchema,
    errors::InvalidFormSchema,
};

const FORM_210_RON: &str = include_str!("../../../../assets/form_210.ron");

pub(crate) trait FormSchemaDatasource {
    fn from_string(&self, s: &str) -> Result<FormSchema, ServerError>;

    /// Formulario 210, as shipped with the crate.
    fn embedded(&self) -> Result<FormSchema, ServerError>;
}

pub(crate) struct FormSchemaDatasourceImpl;

impl FormSchemaDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl FormSchemaDatasource for FormSchemaDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<FormSchema, ServerError> {
        let model: FormSchemaModel =
            ron::from_str(s).map_err(|e| InvalidFormSchema::with_debug("malformed RON", &e))?;
        FormSchema::try_from(model)
    }

    fn embedded(&self) -> Result<FormSchema, ServerError> {
        self.from_string(FORM_210_RON)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::line;

    #[test]
    fn embedded_schema_covers_lines_29_to_137() {
        let schema = FormSchemaDatasourceImpl::new().embedded().unwrap();
        assert_eq!(schema.form(), "Formulario 210");
        assert_eq!(schema.lines().len(), 109);
        assert_eq!(schema.lines().first().unwrap().id, line("29"));
        assert_eq!(schema.lines().last().unwrap().id, line("137"));
        assert_eq!(schema.calculated.len(), 39);
        assert!(schema.is_calculated(&line("111")));
        assert!(!schema.is_calculated(&line("98")));
    }

    #[test]
    fn embedded_schema_sections_in_tab_order() {
        let schema = FormSchemaDatasourceImpl::new().embedded().unwrap();
        assert_eq!(
            schema.sections(),
            vec![
                "Patrimonio",
                "Cédula General",
                "Cédula de Pensiones",
                "Cédula de Dividendos y Participaciones",
                "Ganancias Ocasionales",
                "Liquidación Privada",
                "Descuentos Tributarios",
                "Liquidación Final",
            ]
        );
    }

    #[test]
    fn custom_schema_from_string() {
        let schema = FormSchemaDatasourceImpl::new()
            .from_string(
                r#"FormSchemaModel(
                    form: "Prueba",
                    lines: [
                        (id: "1", name: "Uno", section: "A"),
                        (id: "2", name: "Dos", section: "A"),
                    ],
                    calculated: ["2"],
                )"#,
            )
            .unwrap();
        assert_eq!(schema.form(), "Prueba");
        assert!(schema.is_calculated(&line("2")));
    }

    #[test]
    fn rejects_malformed_and_inconsistent_schemas() {
        let datasource = FormSchemaDatasourceImpl::new();
        assert!(datasource.from_string("not ron").is_err());
        assert!(datasource
            .from_string(
                r#"FormSchemaModel(
                    form: "Prueba",
                    lines: [(id: "1", name: "Uno", section: "A")],
                    calculated: ["9"],
                )"#,
            )
            .is_err());
        assert!(datasource
            .from_string(
                r#"FormSchemaModel(
                    form: "Prueba",
                    lines: [
                        (id: "1", name: "Uno", section: "A"),
                        (id: "1", name: "Otra vez", section: "A"),
                    ],
                    calculated: [],
                )"#,
            )
            .is_err());
    }
}
