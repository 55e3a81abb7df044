use newsdesk_core::{update, AppState, Effect, Msg, Query, RequestFailure, ResultItem};
use pretty_assertions::assert_eq;

fn init_logging() {
    newsdesk_logging::initialize_for_tests();
}

fn item(url: &str, score: f64) -> ResultItem {
    ResultItem {
        url: url.to_string(),
        title: url.to_uppercase(),
        description: format!("about {url}"),
        relevance_score: score,
        sentiment_score: 0.5,
        sentiment_label: "POSITIVE".to_string(),
    }
}

fn batch(prefix: &str, len: usize) -> Vec<ResultItem> {
    (0..len)
        .map(|i| item(&format!("{prefix}{i}"), i as f64 / 10.0))
        .collect()
}

fn respond(state: AppState, effects: &[Effect], items: Vec<ResultItem>) -> (AppState, Vec<Effect>) {
    let request_id = match effects {
        [Effect::Search { request_id, .. }] => *request_id,
        other => panic!("expected one search effect, got {other:?}"),
    };
    update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(items),
        },
    )
}

fn searched(state: AppState, text: &str, items: Vec<ResultItem>) -> AppState {
    let (state, _) = update(state, Msg::QueryChanged(text.to_string()));
    let (state, effects) = update(state, Msg::SearchSubmitted);
    respond(state, &effects, items).0
}

fn scores(state: &AppState) -> Vec<f64> {
    state
        .view()
        .results
        .iter()
        .map(|r| r.relevance_score)
        .collect()
}

#[test]
fn load_more_requests_next_page_with_include_all() {
    init_logging();
    let state = searched(AppState::new(), "storm", batch("a", 10));

    let (state, effects) = update(state, Msg::LoadMoreClicked);

    match effects.as_slice() {
        [Effect::Search { query, .. }] => assert_eq!(query, &Query::new("storm", true, 2)),
        other => panic!("expected search effect, got {other:?}"),
    }
    let view = state.view();
    assert!(view.loading_more);
    assert!(!view.loading);
}

#[test]
fn load_more_appends_batch_and_advances_page() {
    init_logging();
    let state = searched(AppState::new(), "", batch("a", 10));
    let before: Vec<String> = state.view().results.into_iter().map(|r| r.url).collect();

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (state, _) = respond(state, &effects, batch("b", 10));

    let view = state.view();
    assert_eq!(view.results.len(), 20);
    assert_eq!(view.current_page, 2);
    assert!(!view.loading_more);
    for url in before {
        assert!(view.results.iter().any(|r| r.url == url), "{url} was lost");
    }

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    match effects.as_slice() {
        [Effect::Search { query, .. }] => assert_eq!(query.page, 3),
        other => panic!("expected search effect, got {other:?}"),
    }
    let (state, _) = respond(state, &effects, batch("c", 10));
    assert_eq!(state.view().current_page, 3);
    assert_eq!(state.view().results.len(), 30);
}

#[test]
fn later_page_is_merged_into_sorted_position() {
    init_logging();
    let state = searched(AppState::with_page_size(1), "", vec![item("five", 5.0)]);

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (state, _) = respond(state, &effects, vec![item("nine", 9.0)]);

    assert_eq!(scores(&state), vec![9.0, 5.0]);
}

#[test]
fn new_search_resets_page_to_one() {
    init_logging();
    let state = searched(AppState::new(), "", batch("a", 10));
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (state, _) = respond(state, &effects, batch("b", 10));
    assert_eq!(state.view().current_page, 2);

    let state = searched(state, "storm", batch("c", 3));

    let view = state.view();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.results.len(), 3);
    assert!(view.has_more);
}

#[test]
fn load_all_replaces_results_and_keeps_page_one() {
    init_logging();
    let state = searched(AppState::new(), "", batch("a", 10));
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (state, _) = respond(state, &effects, batch("b", 10));

    let (state, effects) = update(state, Msg::LoadAllClicked);
    let (state, _) = respond(state, &effects, batch("all", 10));

    let view = state.view();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.results.len(), 10);
    assert!(view.results.iter().all(|r| r.url.starts_with("all")));
}

#[test]
fn page_size_defaults_to_ten_and_never_drops_below_one() {
    assert_eq!(AppState::new().page_size(), 10);
    assert_eq!(AppState::with_page_size(0).page_size(), 1);

    let state = searched(AppState::with_page_size(0), "", batch("a", 1));
    assert!(state.view().has_more);
}

#[test]
fn short_full_corpus_page_ends_paging() {
    init_logging();
    let state = searched(AppState::new(), "", batch("a", 10));
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (state, _) = respond(state, &effects, batch("b", 4));

    let view = state.view();
    assert!(!view.has_more);
    assert_eq!(view.results.len(), 14);

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    assert!(effects.is_empty());
    assert!(!state.view().loading_more);
    assert!(state.in_flight().is_none());
}

#[test]
fn empty_page_ends_paging_but_still_advances_cursor() {
    init_logging();
    let state = searched(AppState::new(), "", batch("a", 10));
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let (state, _) = respond(state, &effects, Vec::new());

    let view = state.view();
    assert_eq!(view.current_page, 2);
    assert_eq!(view.results.len(), 10);
    assert!(!view.has_more);
}

#[test]
fn short_filtered_page_keeps_paging_open() {
    init_logging();
    let state = searched(AppState::new(), "storm", batch("a", 2));
    assert!(state.view().has_more);

    let state = searched(state, "nothing", Vec::new());
    assert!(!state.view().has_more);

    let (_state, effects) = update(state, Msg::LoadMoreClicked);
    assert!(effects.is_empty());
}

#[test]
fn new_search_reopens_paging() {
    init_logging();
    let state = searched(AppState::new(), "", batch("a", 3));
    assert!(!state.view().has_more);

    let state = searched(state, "", batch("b", 10));
    assert!(state.view().has_more);
}

#[test]
fn failed_load_more_keeps_page_and_results() {
    init_logging();
    let state = searched(AppState::new(), "", batch("a", 10));
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let request_id = match effects.as_slice() {
        [Effect::Search { request_id, .. }] => *request_id,
        other => panic!("expected search effect, got {other:?}"),
    };

    let (state, effects) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Err(RequestFailure::Network("timed out".to_string())),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.results.len(), 10);
    assert!(!view.loading_more);
    assert!(view.has_more);
}
