use std::sync::{mpsc, Arc};

use newsdesk_core::{CorpusStatus, Effect, Msg, RequestFailure, ResultItem};
use newsdesk_engine::{
    ClientError, ClientSettings, EngineError, EngineEvent, EngineHandle, EventSink, FailureKind,
    RefreshSummary, ReqwestSearchClient, SearchHit, SearchRequest,
};
use newsdesk_logging::{desk_info, desk_warn};

use super::app::Inbox;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, inbox: mpsc::Sender<Inbox>) -> Result<Self, EngineError> {
        let client = ReqwestSearchClient::new(settings)?;
        desk_info!("Search service at {}", client.base_url());
        let engine = EngineHandle::new(Arc::new(client), Arc::new(InboxSink { tx: inbox }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Search { request_id, query } => {
                    desk_info!(
                        "Search request_id={} page={} include_all={}",
                        request_id,
                        query.page,
                        query.include_all
                    );
                    self.engine.search(
                        request_id,
                        SearchRequest {
                            query: query.text,
                            page: query.page,
                            include_all: query.include_all,
                        },
                    );
                }
                Effect::RefreshCorpus { request_id } => {
                    desk_info!("Refresh request_id={}", request_id);
                    self.engine.refresh(request_id);
                }
            }
        }
    }
}

struct InboxSink {
    tx: mpsc::Sender<Inbox>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) {
        if self.tx.send(Inbox::Msg(map_event(event))).is_err() {
            desk_warn!("Dispatcher is gone; dropping engine event");
        }
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
            request_id,
            result: result
                .map(|hits| hits.into_iter().map(map_hit).collect())
                .map_err(map_failure),
        },
        EngineEvent::RefreshCompleted { request_id, result } => Msg::CorpusRefreshed {
            request_id,
            result: result.map(map_summary).map_err(map_failure),
        },
    }
}

fn map_hit(hit: SearchHit) -> ResultItem {
    ResultItem {
        url: hit.url,
        title: hit.title.unwrap_or_default(),
        description: hit.description.unwrap_or_default(),
        relevance_score: hit.score,
        sentiment_score: hit.sentiment_score,
        sentiment_label: hit.sentiment,
    }
}

fn map_summary(summary: RefreshSummary) -> CorpusStatus {
    if let Some(message) = &summary.message {
        desk_info!("Refresh: {}", message);
    }
    CorpusStatus::new(summary.sources, summary.count)
}

fn map_failure(err: ClientError) -> RequestFailure {
    desk_warn!("Request failed: {}", err);
    match err.kind {
        FailureKind::HttpStatus(status) => RequestFailure::Service { status },
        FailureKind::MalformedResponse | FailureKind::TooLarge { .. } => {
            RequestFailure::MalformedResponse(err.message)
        }
        FailureKind::InvalidUrl
        | FailureKind::InvalidRequest
        | FailureKind::Network
        | FailureKind::Timeout => {
            RequestFailure::Network(err.to_string())
        }
    }
}
