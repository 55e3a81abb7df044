use std::collections::BTreeSet;
use std::fmt;

/// One search request as sent to the service. Never modified after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub include_all: bool,
    /// 1-indexed page number.
    pub page: u32,
}

impl Query {
    pub fn new(text: impl Into<String>, include_all: bool, page: u32) -> Self {
        Self {
            text: text.into(),
            include_all,
            page: page.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Relevance,
    SentimentScore,
    SentimentLabel,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [
        SortKey::Relevance,
        SortKey::SentimentScore,
        SortKey::SentimentLabel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Relevance => "TF-IDF score",
            SortKey::SentimentScore => "sentiment score",
            SortKey::SentimentLabel => "sentiment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn with_direction(self, direction: SortDirection) -> Self {
        Self { direction, ..self }
    }

    pub fn toggled(self) -> Self {
        self.with_direction(self.direction.flipped())
    }
}

/// A single hit returned by the search service. Scores are computed upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub url: String,
    pub title: String,
    pub description: String,
    pub relevance_score: f64,
    pub sentiment_score: f64,
    pub sentiment_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorpusStatus {
    pub connected_sources: BTreeSet<String>,
    pub article_count: u64,
}

impl CorpusStatus {
    pub fn new<I, S>(sources: I, article_count: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            connected_sources: sources.into_iter().map(Into::into).collect(),
            article_count,
        }
    }
}

/// Why a remote request failed, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// Transport-level failure (connection, timeout, bad endpoint).
    Network(String),
    /// The service answered with a non-success status.
    Service { status: u16 },
    /// The payload did not have the expected shape.
    MalformedResponse(String),
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::Network(message) => write!(f, "network error: {message}"),
            RequestFailure::Service { status } => write!(f, "service returned status {status}"),
            RequestFailure::MalformedResponse(message) => {
                write!(f, "malformed response: {message}")
            }
        }
    }
}
