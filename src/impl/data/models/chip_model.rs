use crate::entities::{Chip, ChipRegion};

fn first_page() -> u32 {
    1
}

/// Chip as produced by the extraction service and stored in sessions.
#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) struct ChipModel {
    pub(crate) id: String,
    pub(crate) value: f64,
    #[serde(default)]
    pub(crate) label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) height: Option<f64>,
    #[serde(default = "first_page")]
    pub(crate) page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) doc_id: Option<String>,
}

impl Into<Chip> for ChipModel {
    fn into(self) -> Chip {
        let region = match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(width), Some(height)) => Some(ChipRegion {
                x,
                y,
                width,
                height,
            }),
            _ => None,
        };
        Chip {
            id: self.id,
            value: self.value,
            label: self.label,
            page: self.page,
            doc_id: self.doc_id,
            region,
        }
    }
}

impl From<&Chip> for ChipModel {
    fn from(chip: &Chip) -> Self {
        Self {
            id: chip.id.clone(),
            value: chip.value,
            label: chip.label.clone(),
            x: chip.region.map(|r| r.x),
            y: chip.region.map(|r| r.y),
            width: chip.region.map(|r| r.width),
            height: chip.region.map(|r| r.height),
            page: chip.page,
            doc_id: chip.doc_id.clone(),
        }
    }
}
