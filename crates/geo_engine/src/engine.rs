use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;

use geo_core::{GenerationRequest, GenerationTicket};
use geo_logging::{geo_debug, geo_info};
use tokio_util::sync::CancellationToken;

use crate::{EngineError, EngineEvent, Generator};

enum EngineCommand {
    Run {
        ticket: GenerationTicket,
        request: GenerationRequest,
    },
    Cancel {
        ticket: GenerationTicket,
    },
}

/// Handle to the generator thread. Cloning it shares the same runtime.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Starts the runtime thread. Completions arrive on the returned
    /// receiver, one per run, cancelled runs included.
    pub fn new(
        generator: Arc<dyn Generator>,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_time()
            .thread_name("geo-generator")
            .build()?;

        thread::Builder::new()
            .name("geo-engine".to_string())
            .spawn(move || {
                let mut running: HashMap<GenerationTicket, CancellationToken> = HashMap::new();
                while let Ok(command) = cmd_rx.recv() {
                    // Finished runs cancel their own token.
                    running.retain(|_, token| !token.is_cancelled());
                    match command {
                        EngineCommand::Run { ticket, request } => {
                            let token = CancellationToken::new();
                            running.insert(ticket, token.clone());
                            let generator = generator.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let result = generator.generate(&request, &token).await;
                                token.cancel();
                                let _ = event_tx
                                    .send(EngineEvent::GenerationCompleted { ticket, result });
                            });
                        }
                        EngineCommand::Cancel { ticket } => match running.remove(&ticket) {
                            Some(token) => {
                                geo_info!("Cancelling generation {}", ticket);
                                token.cancel();
                            }
                            None => geo_debug!("Generation {} already finished", ticket),
                        },
                    }
                }
            })?;

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn run(&self, ticket: GenerationTicket, request: GenerationRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Run { ticket, request });
    }

    pub fn cancel(&self, ticket: GenerationTicket) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { ticket });
    }
}
