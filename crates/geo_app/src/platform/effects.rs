use std::sync::{mpsc, Arc};
use std::thread;

use chrono::Utc;
use geo_core::{Effect, GenerationFailure, Msg};
use geo_engine::{EngineEvent, EngineHandle, GeneratorSettings, MockGenerator};
use geo_logging::{geo_debug, geo_info, geo_warn};

use super::app::Inbox;
use crate::error::AppError;

/// Carries out controller effects: generator runs go to the engine, URL
/// replacements update the shell's location bar.
pub struct EffectRunner {
    engine: EngineHandle,
    location: String,
}

impl EffectRunner {
    pub fn new(
        settings: GeneratorSettings,
        location: impl Into<String>,
        inbox: mpsc::Sender<Inbox>,
    ) -> Result<Self, AppError> {
        let generator = Arc::new(MockGenerator::new(settings));
        let (engine, events) = EngineHandle::new(generator)?;
        spawn_event_loop(events, inbox);
        Ok(Self {
            engine,
            location: location.into(),
        })
    }

    /// Query string the location bar currently shows.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ReplaceUrl { query } => {
                    geo_debug!("Location replaced: ?{} -> ?{}", self.location, query);
                    self.location = query;
                }
                Effect::RunGenerator { ticket, request } => {
                    geo_info!(
                        "RunGenerator ticket={} tool={} ({})",
                        ticket,
                        request.tool(),
                        request.loading_message()
                    );
                    self.engine.run(ticket, request);
                }
                Effect::CancelGenerator { ticket } => {
                    geo_info!("CancelGenerator ticket={}", ticket);
                    self.engine.cancel(ticket);
                }
            }
        }
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, inbox: mpsc::Sender<Inbox>) {
    thread::spawn(move || {
        for event in events {
            let EngineEvent::GenerationCompleted { ticket, result } = event;
            if let Err(err) = &result {
                geo_warn!("Generation {} ended without a result: {}", ticket, err);
            }
            let msg = Msg::GenerationFinished {
                ticket,
                outcome: result.map_err(GenerationFailure::from),
                finished_at: Utc::now(),
            };
            if inbox.send(Inbox::Dispatch(msg)).is_err() {
                break;
            }
        }
    });
}
