#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the query input box.
    QueryChanged(String),
    /// User submitted the current query (Enter or the Search button).
    SearchSubmitted,
    /// User asked for the next page of results.
    LoadMoreClicked,
    /// User asked for the full corpus listing.
    LoadAllClicked,
    /// User asked the service to re-ingest its news sources.
    RefreshClicked,
    /// User picked a sort key and/or direction.
    SortSpecSelected(crate::SortSpec),
    /// User flipped the sort direction.
    DirectionToggled,
    /// Engine finished a search request.
    SearchCompleted {
        request_id: crate::RequestId,
        result: Result<Vec<crate::ResultItem>, crate::RequestFailure>,
    },
    /// Engine finished a corpus refresh.
    CorpusRefreshed {
        request_id: crate::RequestId,
        result: Result<crate::CorpusStatus, crate::RequestFailure>,
    },
}
