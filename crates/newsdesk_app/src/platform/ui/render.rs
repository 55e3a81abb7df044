use chrono::{DateTime, Local};
use newsdesk_core::{AppViewModel, ResultItem, SortDirection};

/// Renders the view as printable lines.
pub fn render(view: &AppViewModel, last_refresh: Option<&DateTime<Local>>) -> Vec<String> {
    let mut lines = Vec::with_capacity(4 + view.results.len() * 4);

    let sources = view
        .corpus
        .connected_sources
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let mut corpus_line = format!(
        "Connected APIs: {} | Total news articles: {}",
        if sources.is_empty() { "-" } else { sources.as_str() },
        view.corpus.article_count
    );
    if let Some(at) = last_refresh {
        corpus_line.push_str(&format!(" | refreshed {}", at.format("%Y-%m-%d %H:%M:%S")));
    }
    lines.push(corpus_line);

    let direction = match view.sort.direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    };
    let paging = if view.has_more { "more available" } else { "end of results" };
    lines.push(format!(
        "Order by: {} ({}) | {} results | page {} | {}",
        view.sort.key.label(),
        direction,
        view.results.len(),
        view.current_page,
        paging
    ));

    let mut activity = Vec::new();
    if view.loading {
        activity.push("loading...");
    }
    if view.loading_more {
        activity.push("loading more...");
    }
    if view.queued {
        activity.push("next action queued");
    }
    if !activity.is_empty() {
        lines.push(format!("[{}]", activity.join(", ")));
    }
    if let Some(error) = &view.last_error {
        lines.push(format!("Error: {error}"));
    }

    for (index, result) in view.results.iter().enumerate() {
        push_result(&mut lines, index + 1, result);
    }
    lines
}

fn push_result(lines: &mut Vec<String>, position: usize, result: &ResultItem) {
    let title = if result.title.is_empty() {
        "(untitled)"
    } else {
        result.title.as_str()
    };
    lines.push(format!("{position:>3}. {title}"));
    lines.push(format!("     {}", result.url));
    lines.push(format!(
        "     TF-IDF score: {:.4} | Sentiment score: {:.4} | Sentiment: {}",
        result.relevance_score, result.sentiment_score, result.sentiment_label
    ));
    if !result.description.is_empty() {
        lines.push(format!("     {}", result.description));
    }
}
