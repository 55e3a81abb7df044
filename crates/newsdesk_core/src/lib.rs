//! Newsdesk core: pure search orchestration state machine and view-model helpers.
mod aggregate;
mod effect;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use aggregate::{sort_entries, ResultEntry, ResultSet};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, InFlight, PaginationState, PendingAction, RequestId, SearchMode, DEFAULT_PAGE_SIZE,
};
pub use types::{
    CorpusStatus, Query, RequestFailure, ResultItem, SortDirection, SortKey, SortSpec,
};
pub use update::update;
pub use view_model::AppViewModel;
