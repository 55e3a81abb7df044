use std::sync::Once;

use newsdesk_core::{update, AppState, Effect, Msg, ResultItem, SortDirection, SortKey, SortSpec};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(newsdesk_logging::initialize_for_tests);
}

fn item(url: &str, score: f64, sentiment_score: f64, label: &str) -> ResultItem {
    ResultItem {
        url: url.to_string(),
        title: url.to_string(),
        description: String::new(),
        relevance_score: score,
        sentiment_score,
        sentiment_label: label.to_string(),
    }
}

fn loaded(state: AppState, items: Vec<ResultItem>) -> AppState {
    let (state, effects) = update(state, Msg::SearchSubmitted);
    let request_id = match effects.as_slice() {
        [Effect::Search { request_id, .. }] => *request_id,
        other => panic!("expected search effect, got {other:?}"),
    };
    update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(items),
        },
    )
    .0
}

fn urls(state: &AppState) -> Vec<String> {
    state.view().results.into_iter().map(|r| r.url).collect()
}

fn three() -> Vec<ResultItem> {
    vec![
        item("a", 0.5, 0.9, "NEUTRAL"),
        item("b", 0.9, 0.1, "POSITIVE"),
        item("c", 0.1, 0.5, "NEGATIVE"),
    ]
}

#[test]
fn initial_sort_is_relevance_descending() {
    init_logging();
    let view = AppState::new().view();
    assert_eq!(
        view.sort,
        SortSpec::new(SortKey::Relevance, SortDirection::Desc)
    );
}

#[test]
fn selecting_sort_spec_reorders_without_request() {
    init_logging();
    let state = loaded(AppState::new(), three());
    assert_eq!(urls(&state), vec!["b", "a", "c"]);

    let (mut state, effects) = update(
        state,
        Msg::SortSpecSelected(SortSpec::new(SortKey::SentimentScore, SortDirection::Desc)),
    );
    assert!(effects.is_empty());
    assert_eq!(urls(&state), vec!["a", "c", "b"]);
    assert!(state.consume_dirty());

    let (state, effects) = update(
        state,
        Msg::SortSpecSelected(SortSpec::new(SortKey::SentimentLabel, SortDirection::Desc)),
    );
    assert!(effects.is_empty());
    assert_eq!(urls(&state), vec!["c", "a", "b"]);
}

#[test]
fn toggling_direction_reverses_and_toggles_back() {
    init_logging();
    let state = loaded(AppState::new(), three());

    let (state, effects) = update(state, Msg::DirectionToggled);
    assert!(effects.is_empty());
    assert_eq!(state.sort_spec().direction, SortDirection::Asc);
    assert_eq!(urls(&state), vec!["c", "a", "b"]);

    let (state, _) = update(state, Msg::DirectionToggled);
    assert_eq!(state.sort_spec().direction, SortDirection::Desc);
    assert_eq!(urls(&state), vec!["b", "a", "c"]);
}

#[test]
fn sort_spec_persists_across_searches() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::SortSpecSelected(SortSpec::new(SortKey::SentimentScore, SortDirection::Asc)),
    );

    let state = loaded(state, three());

    assert_eq!(urls(&state), vec!["b", "c", "a"]);
    assert_eq!(
        state.sort_spec(),
        SortSpec::new(SortKey::SentimentScore, SortDirection::Asc)
    );
}

#[test]
fn sort_change_applies_while_request_in_flight() {
    init_logging();
    let state = loaded(AppState::new(), three());
    let (state, effects) = update(state, Msg::LoadAllClicked);
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(state, Msg::DirectionToggled);
    assert!(effects.is_empty());
    assert_eq!(urls(&state), vec!["c", "a", "b"]);
    assert!(state.view().loading);
}

#[test]
fn merged_page_follows_ascending_spec() {
    init_logging();
    let (state, _) = update(AppState::with_page_size(1), Msg::DirectionToggled);
    let state = loaded(state, vec![item("nine", 9.0, 0.0, "X")]);

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let request_id = match effects.as_slice() {
        [Effect::Search { request_id, .. }] => *request_id,
        other => panic!("expected search effect, got {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(vec![item("five", 5.0, 0.0, "X")]),
        },
    );

    assert_eq!(urls(&state), vec!["five", "nine"]);
}
