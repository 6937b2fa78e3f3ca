use geo_engine::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize the view: {0}")]
    Json(#[from] serde_json::Error),
}
