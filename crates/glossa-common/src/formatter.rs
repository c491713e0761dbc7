use crate::history::RecentSearches;
use crate::protocol::{SearchResult, Session};

pub const NO_SUGGESTIONS: &str = "No suggestions found.";

/// Renders the outcome of a submitted search.
pub fn format_search_result(result: &SearchResult) -> String {
    if result.exact_match {
        let meaning = result.meaning.as_deref().unwrap_or_default();
        return format!("{}\n  {}", result.word, meaning);
    }

    let mut output = format!("No exact match for \"{}\".\n", result.word);
    if result.suggestions.is_empty() {
        output.push_str(NO_SUGGESTIONS);
    } else {
        output.push_str(&format!("did you mean: {}", result.suggestions.join(", ")));
    }
    output
}

/// Renders the autocomplete dropdown, numbered from 1 for `pick`.
pub fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return "(no suggestions)".to_string();
    }

    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("[{}] {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_recent_searches(history: &RecentSearches) -> String {
    if history.is_empty() {
        return "No recent searches.".to_string();
    }

    let mut output = String::from("Recent searches:");
    for entry in history.entries() {
        output.push_str(&format!("\n  {}", entry.word));
        if let Some(preview) = entry.meaning_preview() {
            output.push_str(&format!(" - {preview}"));
        }
    }
    output
}

pub fn format_session(session: &Session) -> String {
    match session.username() {
        Some(username) if session.is_authenticated => format!("@{username}"),
        _ => "Not logged in.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::RecentSearchEntry;
    use chrono::Utc;

    #[test]
    fn test_exact_match_shows_meaning_verbatim() {
        let result = SearchResult::exact("cat", "a small domesticated feline");
        assert_eq!(
            format_search_result(&result),
            "cat\n  a small domesticated feline"
        );
    }

    #[test]
    fn test_fuzzy_result_lists_suggestions() {
        let result = SearchResult::fuzzy("xyz", vec!["xylophone".into()]);
        let output = format_search_result(&result);
        assert!(output.ends_with("did you mean: xylophone"));
    }

    #[test]
    fn test_fuzzy_result_without_suggestions() {
        let result = SearchResult::fuzzy("qqqq", vec![]);
        assert!(format_search_result(&result).ends_with(NO_SUGGESTIONS));
    }

    #[test]
    fn test_suggestions_are_numbered() {
        let list = vec!["apple".to_string(), "apply".to_string()];
        assert_eq!(format_suggestions(&list), "[1] apple\n[2] apply");
    }

    #[test]
    fn test_recent_searches_show_preview() {
        let mut history = RecentSearches::new();
        history.record(RecentSearchEntry::exact(
            "cat",
            Some("a small domesticated feline".into()),
            Utc::now(),
        ));
        assert_eq!(
            format_recent_searches(&history),
            "Recent searches:\n  cat - a small domesticated feline"
        );
    }

    #[test]
    fn test_session_display() {
        assert_eq!(format_session(&Session::authenticated("ada")), "@ada");
        assert_eq!(format_session(&Session::default()), "Not logged in.");
    }
}
