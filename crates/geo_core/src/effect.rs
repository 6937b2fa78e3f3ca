use crate::{GenerationRequest, GenerationTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the current location's query; never push a new entry.
    ReplaceUrl { query: String },
    RunGenerator {
        ticket: GenerationTicket,
        request: GenerationRequest,
    },
    CancelGenerator { ticket: GenerationTicket },
}
