//! GEO engine: generator collaborators and the runtime that drives them.
mod catalog;
mod engine;
mod generator;
mod settings;
mod types;

pub use catalog::{respond, ALTERNATIVE_PROMPTS};
pub use engine::EngineHandle;
pub use generator::{Generator, MockGenerator};
pub use settings::GeneratorSettings;
pub use types::{EngineError, EngineEvent, GenerationError};
