use crate::{CorpusStatus, ResultItem, SortSpec};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub query: String,
    pub sort: SortSpec,
    pub results: Vec<ResultItem>,
    pub current_page: u32,
    pub has_more: bool,
    /// A search, load-all or refresh is in flight.
    pub loading: bool,
    /// A load-more is in flight.
    pub loading_more: bool,
    /// An action is parked behind the in-flight request.
    pub queued: bool,
    pub corpus: CorpusStatus,
    pub last_error: Option<String>,
    pub dirty: bool,
}
