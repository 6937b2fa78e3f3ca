use geo_core::{FailureKind, GenerationFailure, GenerationResult, GenerationTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted {
        ticket: GenerationTicket,
        result: Result<GenerationResult, GenerationError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("generation cancelled")]
    Cancelled,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("generator failed: {0}")]
    Internal(String),
}

impl From<GenerationError> for GenerationFailure {
    fn from(err: GenerationError) -> Self {
        let kind = match &err {
            GenerationError::Cancelled => FailureKind::Cancelled,
            GenerationError::InvalidInput(_) => FailureKind::InvalidInput,
            GenerationError::Internal(_) => FailureKind::Internal,
        };
        GenerationFailure::new(kind, err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("could not start the generator runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn errors_map_to_panel_failures() {
        let failure = GenerationFailure::from(GenerationError::InvalidInput(
            "business description is empty".to_string(),
        ));
        assert_eq!(failure.kind, FailureKind::InvalidInput);
        assert_eq!(failure.message, "invalid input: business description is empty");

        let failure = GenerationFailure::from(GenerationError::Cancelled);
        assert_eq!(failure.kind, FailureKind::Cancelled);
    }
}
