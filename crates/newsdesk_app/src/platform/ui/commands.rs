use newsdesk_core::{Msg, SortDirection, SortKey, SortSpec};

pub const HELP: &str = "\
commands:
  search [text]   new search (empty text lists the whole corpus)
  more            load the next page
  all             load the whole corpus for the current query
  refresh         re-ingest news sources on the service
  sort <key>      relevance | score | label
  asc | desc      set sort direction
  toggle          flip sort direction
  help            show this text
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    More,
    All,
    Refresh,
    Sort(SortKey),
    Direction(SortDirection),
    Toggle,
    Help,
    Quit,
}

impl Command {
    /// Translates the command into core messages. Sort commands keep the part
    /// of `current` they do not mention.
    pub fn into_msgs(self, current: SortSpec) -> Vec<Msg> {
        match self {
            Command::Search(text) => vec![Msg::QueryChanged(text), Msg::SearchSubmitted],
            Command::More => vec![Msg::LoadMoreClicked],
            Command::All => vec![Msg::LoadAllClicked],
            Command::Refresh => vec![Msg::RefreshClicked],
            Command::Sort(key) => vec![Msg::SortSpecSelected(SortSpec { key, ..current })],
            Command::Direction(direction) => {
                vec![Msg::SortSpecSelected(current.with_direction(direction))]
            }
            Command::Toggle => vec![Msg::DirectionToggled],
            Command::Help | Command::Quit => Vec::new(),
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "more" | "m" => Ok(Command::More),
        "all" => Ok(Command::All),
        "refresh" | "r" => Ok(Command::Refresh),
        "sort" => parse_sort_key(rest).map(Command::Sort),
        "asc" => Ok(Command::Direction(SortDirection::Asc)),
        "desc" => Ok(Command::Direction(SortDirection::Desc)),
        "toggle" | "t" => Ok(Command::Toggle),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "" => Err("empty command; type `help`".to_string()),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    match raw.to_ascii_lowercase().as_str() {
        "relevance" | "tfidf" => Ok(SortKey::Relevance),
        "score" | "sentiment_score" => Ok(SortKey::SentimentScore),
        "label" | "sentiment" => Ok(SortKey::SentimentLabel),
        "" => Err("sort needs a key: relevance | score | label".to_string()),
        other => Err(format!("unknown sort key `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_keeps_inner_whitespace_and_allows_empty_text() {
        assert_eq!(
            parse_command("search  heavy   rain "),
            Ok(Command::Search("heavy   rain".to_string()))
        );
        assert_eq!(parse_command("search"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn sort_keys_accept_original_names() {
        assert_eq!(parse_command("sort tfidf"), Ok(Command::Sort(SortKey::Relevance)));
        assert_eq!(parse_command("sort score"), Ok(Command::Sort(SortKey::SentimentScore)));
        assert_eq!(
            parse_command("sort sentiment_score"),
            Ok(Command::Sort(SortKey::SentimentScore))
        );
        assert_eq!(parse_command("SORT Label"), Ok(Command::Sort(SortKey::SentimentLabel)));
        assert!(parse_command("sort").is_err());
        assert!(parse_command("sort date").is_err());
    }

    #[test]
    fn unknown_and_empty_lines_are_errors() {
        assert!(parse_command("   ").is_err());
        assert!(parse_command("fetch").is_err());
    }

    #[test]
    fn search_command_emits_query_then_submit() {
        let msgs = Command::Search("flood".to_string()).into_msgs(SortSpec::default());
        assert_eq!(
            msgs,
            vec![Msg::QueryChanged("flood".to_string()), Msg::SearchSubmitted]
        );
    }

    #[test]
    fn sort_commands_keep_the_other_half_of_the_spec() {
        let current = SortSpec::new(SortKey::SentimentLabel, SortDirection::Asc);

        assert_eq!(
            Command::Sort(SortKey::Relevance).into_msgs(current),
            vec![Msg::SortSpecSelected(SortSpec::new(
                SortKey::Relevance,
                SortDirection::Asc
            ))]
        );
        assert_eq!(
            Command::Direction(SortDirection::Desc).into_msgs(current),
            vec![Msg::SortSpecSelected(SortSpec::new(
                SortKey::SentimentLabel,
                SortDirection::Desc
            ))]
        );
    }
}
