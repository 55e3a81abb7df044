//! Newsdesk engine: remote search client and request execution.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, ReqwestSearchClient, SearchClient};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{
    ClientError, EngineError, EngineEvent, FailureKind, RefreshSummary, RequestId, SearchHit,
    SearchRequest,
};
