use std::collections::{HashMap, HashSet};

use fractic_server_error::ServerError;

use crate::errors::InvalidFormSchema;

use super::bucket::BucketId;

#[derive(Debug, Clone, PartialEq)]
pub struct FormLine {
    pub id: BucketId,
    pub name: String,
    pub section: String,
}

/// Fixed definition of the form: its lines, in display order, and the closed
/// set of lines derived by formula.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub(crate) form: String,
    pub(crate) lines: Vec<FormLine>,
    pub(crate) calculated: HashSet<BucketId>,
    pub(crate) positions: HashMap<BucketId, usize>,
}

impl FormSchema {
    pub fn new(
        form: impl Into<String>,
        lines: Vec<FormLine>,
        calculated: impl IntoIterator<Item = BucketId>,
    ) -> Result<Self, ServerError> {
        let mut positions = HashMap::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            if positions.insert(line.id.clone(), i).is_some() {
                return Err(InvalidFormSchema::new(&format!("duplicate line '{}'", line.id)));
            }
        }
        let calculated: HashSet<BucketId> = calculated.into_iter().collect();
        if let Some(unknown) = calculated.iter().find(|id| !positions.contains_key(*id)) {
            return Err(InvalidFormSchema::new(&format!(
                "calculated line '{}' is not declared",
                unknown
            )));
        }
        Ok(Self {
            form: form.into(),
            lines,
            calculated,
            positions,
        })
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn lines(&self) -> &[FormLine] {
        &self.lines
    }

    pub fn contains(&self, id: &BucketId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn is_calculated(&self, id: &BucketId) -> bool {
        self.calculated.contains(id)
    }

    pub(crate) fn position(&self, id: &BucketId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Sections in order of first appearance.
    pub fn sections(&self) -> Vec<&str> {
        self.lines.iter().fold(Vec::new(), |mut acc, line| {
            if !acc.contains(&line.section.as_str()) {
                acc.push(line.section.as_str());
            }
            acc
        })
    }
}
