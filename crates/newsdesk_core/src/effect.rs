use crate::{Query, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the query to the search endpoint.
    Search { request_id: RequestId, query: Query },
    /// GET the refresh endpoint.
    RefreshCorpus { request_id: RequestId },
}
