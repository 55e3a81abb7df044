use crate::view_model::AppViewModel;
use crate::{CorpusStatus, Query, RequestFailure, ResultItem, ResultSet, SortSpec};

pub type RequestId = u64;

/// Batch size the search service pages with.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How a search response is folded into the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// New search: replace results, reset to page 1.
    Fresh,
    /// Next page: append and advance the cursor.
    LoadMore,
    /// Whole corpus: replace results, stay on page 1.
    LoadAll,
}

/// The single request currently awaiting a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InFlight {
    Search {
        id: RequestId,
        mode: SearchMode,
        query: Query,
    },
    Refresh {
        id: RequestId,
    },
}

impl InFlight {
    pub fn id(&self) -> RequestId {
        match self {
            InFlight::Search { id, .. } | InFlight::Refresh { id } => *id,
        }
    }
}

/// A network action waiting for the in-flight request to finish.
///
/// Query text is captured when the user acts; page numbers are resolved at
/// dispatch time against the state current then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Search { text: String },
    LoadMore { text: String },
    LoadAll { text: String },
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub has_more: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            has_more: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    query_input: String,
    sort: SortSpec,
    results: ResultSet,
    pagination: PaginationState,
    corpus: CorpusStatus,
    in_flight: Option<InFlight>,
    parked: Option<PendingAction>,
    next_request_id: RequestId,
    page_size: usize,
    last_error: Option<RequestFailure>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state that treats full-corpus batches shorter than
    /// `page_size` as the last page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            query_input: String::new(),
            sort: SortSpec::default(),
            results: ResultSet::default(),
            pagination: PaginationState::default(),
            corpus: CorpusStatus::default(),
            in_flight: None,
            parked: None,
            next_request_id: 1,
            page_size: page_size.max(1),
            last_error: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let (loading, loading_more) = match &self.in_flight {
            Some(InFlight::Search {
                mode: SearchMode::LoadMore,
                ..
            }) => (false, true),
            Some(_) => (true, false),
            None => (false, false),
        };
        AppViewModel {
            query: self.query_input.clone(),
            sort: self.sort,
            results: self.results.to_items(),
            current_page: self.pagination.current_page,
            has_more: self.pagination.has_more,
            loading,
            loading_more,
            queued: self.parked.is_some(),
            corpus: self.corpus.clone(),
            last_error: self.last_error.as_ref().map(ToString::to_string),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn corpus(&self) -> &CorpusStatus {
        &self.corpus
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub fn parked(&self) -> Option<&PendingAction> {
        self.parked.as_ref()
    }

    pub fn last_error(&self) -> Option<&RequestFailure> {
        self.last_error.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_query_input(&mut self, text: String) {
        if self.query_input != text {
            self.query_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_sort_spec(&mut self, spec: SortSpec) {
        self.sort = spec;
        self.results.resort(spec);
        self.mark_dirty();
    }

    /// Parks `action`, replacing whatever was parked before. Returns the
    /// displaced action, if any.
    pub(crate) fn park(&mut self, action: PendingAction) -> Option<PendingAction> {
        self.mark_dirty();
        self.parked.replace(action)
    }

    pub(crate) fn take_parked(&mut self) -> Option<PendingAction> {
        let parked = self.parked.take();
        if parked.is_some() {
            self.mark_dirty();
        }
        parked
    }

    pub(crate) fn begin(&mut self, make: impl FnOnce(RequestId) -> InFlight) -> &InFlight {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.mark_dirty();
        self.in_flight.insert(make(id))
    }

    /// Clears the in-flight search when `request_id` matches it and returns
    /// how its response should be applied.
    pub(crate) fn finish_search(&mut self, request_id: RequestId) -> Option<(SearchMode, Query)> {
        match self.in_flight.take() {
            Some(InFlight::Search { id, mode, query }) if id == request_id => {
                self.mark_dirty();
                Some((mode, query))
            }
            other => {
                self.in_flight = other;
                None
            }
        }
    }

    /// Clears the in-flight refresh when `request_id` matches it.
    pub(crate) fn finish_refresh(&mut self, request_id: RequestId) -> bool {
        match self.in_flight.take() {
            Some(InFlight::Refresh { id }) if id == request_id => {
                self.mark_dirty();
                true
            }
            other => {
                self.in_flight = other;
                false
            }
        }
    }

    pub(crate) fn apply_batch(&mut self, mode: SearchMode, query: &Query, batch: Vec<ResultItem>) {
        let has_more = self.batch_may_continue(query, batch.len());
        match mode {
            SearchMode::Fresh | SearchMode::LoadAll => {
                self.results = ResultSet::from_batch(batch, self.sort);
                self.pagination.current_page = 1;
            }
            SearchMode::LoadMore => {
                self.results.append_batch(batch, self.sort);
                self.pagination.current_page = query.page;
            }
        }
        self.pagination.has_more = has_more;
        self.last_error = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_corpus(&mut self, corpus: CorpusStatus) {
        self.corpus = corpus;
        self.last_error = None;
        self.mark_dirty();
    }

    pub(crate) fn record_failure(&mut self, failure: RequestFailure) {
        self.last_error = Some(failure);
        self.mark_dirty();
    }

    // Filtered pages can come back short because the service drops
    // zero-score hits, so only an empty filtered page ends paging.
    fn batch_may_continue(&self, query: &Query, batch_len: usize) -> bool {
        if batch_len == 0 {
            return false;
        }
        !query.include_all || batch_len >= self.page_size
    }
}
