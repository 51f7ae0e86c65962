use super::{bucket::BucketId, chip::Chip, document::DocumentId};

/// The single in-flight transfer of a chip towards a bucket.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssignmentState {
    #[default]
    Idle,
    Pending {
        document_id: DocumentId,
        chip: Chip,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOutcome {
    Committed { bucket_id: BucketId },
    Rejected(Rejection),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    CalculatedField { bucket_id: BucketId },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::CalculatedField { .. } => write!(
                f,
                "Este campo es calculado automáticamente y no acepta valores manuales."
            ),
        }
    }
}
