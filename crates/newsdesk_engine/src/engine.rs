use std::sync::{mpsc, Arc};
use std::thread;

use newsdesk_logging::{desk_debug, desk_warn};

use crate::{EngineError, EngineEvent, RequestId, SearchClient, SearchRequest};

/// Receives engine events on the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        if self.tx.send(event).is_err() {
            desk_warn!("Event receiver is gone; dropping engine event");
        }
    }
}

enum EngineCommand {
    Search {
        request_id: RequestId,
        request: SearchRequest,
    },
    Refresh {
        request_id: RequestId,
    },
}

/// Runs requests on a background thread, strictly one at a time and in
/// submission order. The thread exits once the handle is dropped.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn SearchClient>, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("newsdesk-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let event = runtime.block_on(handle_command(client.as_ref(), command));
                    sink.emit(event);
                }
                desk_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn search(&self, request_id: RequestId, request: SearchRequest) {
        self.send(EngineCommand::Search {
            request_id,
            request,
        });
    }

    pub fn refresh(&self, request_id: RequestId) {
        self.send(EngineCommand::Refresh { request_id });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            desk_warn!("Engine thread is gone; dropping command");
        }
    }
}

async fn handle_command(client: &dyn SearchClient, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Search {
            request_id,
            request,
        } => EngineEvent::SearchCompleted {
            request_id,
            result: client.search(&request).await,
        },
        EngineCommand::Refresh { request_id } => EngineEvent::RefreshCompleted {
            request_id,
            result: client.refresh().await,
        },
    }
}
