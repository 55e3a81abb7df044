use newsdesk_logging::{desk_debug, desk_warn};

use crate::{AppState, Effect, InFlight, Msg, PendingAction, Query, SearchMode};

/// Pure update function: applies a message to state and returns any effects.
///
/// At most one request is outstanding at a time. A network action that
/// arrives while a request is in flight is parked in a single slot (a newer
/// action replaces an older parked one) and dispatched once the in-flight
/// request completes, whatever its outcome.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(text) => {
            state.set_query_input(text);
            Vec::new()
        }
        Msg::SearchSubmitted => {
            let text = state.query_input().to_owned();
            request(&mut state, PendingAction::Search { text })
        }
        Msg::LoadMoreClicked => {
            let text = state.query_input().to_owned();
            request(&mut state, PendingAction::LoadMore { text })
        }
        Msg::LoadAllClicked => {
            let text = state.query_input().to_owned();
            request(&mut state, PendingAction::LoadAll { text })
        }
        Msg::RefreshClicked => request(&mut state, PendingAction::Refresh),
        Msg::SortSpecSelected(spec) => {
            state.apply_sort_spec(spec);
            Vec::new()
        }
        Msg::DirectionToggled => {
            let spec = state.sort_spec().toggled();
            state.apply_sort_spec(spec);
            Vec::new()
        }
        Msg::SearchCompleted { request_id, result } => {
            let Some((mode, query)) = state.finish_search(request_id) else {
                desk_warn!("Discarding stale search response request_id={}", request_id);
                return (state, Vec::new());
            };
            match result {
                Ok(batch) => {
                    desk_debug!(
                        "Search request_id={} mode={:?} page={} batch_len={}",
                        request_id,
                        mode,
                        query.page,
                        batch.len()
                    );
                    state.apply_batch(mode, &query, batch);
                }
                Err(failure) => {
                    desk_warn!("Search request_id={} failed: {}", request_id, failure);
                    state.record_failure(failure);
                }
            }
            resume_parked(&mut state)
        }
        Msg::CorpusRefreshed { request_id, result } => {
            if !state.finish_refresh(request_id) {
                desk_warn!("Discarding stale refresh response request_id={}", request_id);
                return (state, Vec::new());
            }
            match result {
                Ok(corpus) => {
                    desk_debug!(
                        "Refresh request_id={} sources={} articles={}",
                        request_id,
                        corpus.connected_sources.len(),
                        corpus.article_count
                    );
                    state.apply_corpus(corpus);
                }
                Err(failure) => {
                    desk_warn!("Refresh request_id={} failed: {}", request_id, failure);
                    state.record_failure(failure);
                }
            }
            resume_parked(&mut state)
        }
    };

    (state, effects)
}

fn request(state: &mut AppState, action: PendingAction) -> Vec<Effect> {
    if let Some(in_flight) = state.in_flight() {
        let busy_with = in_flight.id();
        if let Some(displaced) = state.park(action) {
            desk_debug!("Parked action replaced {:?}", displaced);
        }
        desk_debug!("Action parked behind request_id={}", busy_with);
        return Vec::new();
    }
    dispatch(state, action).into_iter().collect()
}

fn resume_parked(state: &mut AppState) -> Vec<Effect> {
    match state.take_parked() {
        Some(action) => dispatch(state, action).into_iter().collect(),
        None => Vec::new(),
    }
}

fn dispatch(state: &mut AppState, action: PendingAction) -> Option<Effect> {
    let in_flight = match action {
        PendingAction::Search { text } => {
            let include_all = text.is_empty();
            let query = Query::new(text, include_all, 1);
            state.begin(|id| InFlight::Search {
                id,
                mode: SearchMode::Fresh,
                query,
            })
        }
        PendingAction::LoadMore { text } => {
            let pagination = state.pagination();
            if !pagination.has_more {
                desk_debug!(
                    "Ignoring load-more past the last page (page {})",
                    pagination.current_page
                );
                return None;
            }
            let query = Query::new(text, true, pagination.current_page + 1);
            state.begin(|id| InFlight::Search {
                id,
                mode: SearchMode::LoadMore,
                query,
            })
        }
        PendingAction::LoadAll { text } => {
            let query = Query::new(text, true, 1);
            state.begin(|id| InFlight::Search {
                id,
                mode: SearchMode::LoadAll,
                query,
            })
        }
        PendingAction::Refresh => state.begin(|id| InFlight::Refresh { id }),
    };
    Some(effect_for(in_flight))
}

fn effect_for(in_flight: &InFlight) -> Effect {
    match in_flight {
        InFlight::Search { id, query, .. } => Effect::Search {
            request_id: *id,
            query: query.clone(),
        },
        InFlight::Refresh { id } => Effect::RefreshCorpus { request_id: *id },
    }
}
