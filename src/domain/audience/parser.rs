//! Parsing of the moderator's numbered list.
//!
//! Expected format, one event per line:
//!
//! ```text
//! 1. [Event label] - One sentence describing the impact
//! ```

use super::event::EventCandidate;

/// Description used when a line carries no `-` separator.
pub const DEFAULT_DESCRIPTION: &str = "Disruptive event";

/// Extracts events from a numbered-list response.
///
/// Blank lines and lines not starting with a digit are ignored. The `N.`
/// prefix is stripped, then the first `-` splits label from description.
/// Square brackets around the label are removed.
pub fn parse_event_list(response: &str) -> Vec<EventCandidate> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> EventCandidate {
    let body = match line.split_once('.') {
        Some((_, rest)) => rest.trim(),
        None => line,
    };

    match body.split_once('-') {
        Some((label, description)) => EventCandidate::new(
            label.trim().trim_matches(|c| c == '[' || c == ']').trim(),
            description.trim(),
        ),
        None => EventCandidate::new(body, DEFAULT_DESCRIPTION),
    }
}

/// Renders suggestions as a dash list for the moderation prompt.
pub fn format_suggestions(suggestions: &[String]) -> String {
    suggestions
        .iter()
        .map(|s| format!("- {}", s))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_response() {
        let response = "1. The dog barks - It wants to go out\n\
                        2. The doorbell rings - It's the postman\n\
                        3. Jeanne coughs - She needs water";

        let events = parse_event_list(response);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].label, "The dog barks");
        assert_eq!(events[0].description, "It wants to go out");
        assert_eq!(events[2].label, "Jeanne coughs");
    }

    #[test]
    fn strips_square_brackets_from_label() {
        let events = parse_event_list("1. [The kettle whistles] - Jeanne runs to the kitchen");

        assert_eq!(events[0].label, "The kettle whistles");
        assert_eq!(events[0].description, "Jeanne runs to the kitchen");
    }

    #[test]
    fn missing_dash_uses_default_description() {
        let events = parse_event_list("1. The cat meows");

        assert_eq!(events[0].label, "The cat meows");
        assert_eq!(events[0].description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn ignores_non_numbered_lines() {
        let response = "Here are my picks:\n\
                        \n\
                        1. The dog barks - Wants out\n\
                        - not numbered - skip me\n\
                        Some closing remark";

        let events = parse_event_list(response);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, "The dog barks");
    }

    #[test]
    fn splits_on_first_dash_only() {
        let events = parse_event_list("2. Phone rings - family calling - again");

        assert_eq!(events[0].label, "Phone rings");
        assert_eq!(events[0].description, "family calling - again");
    }

    #[test]
    fn empty_response_yields_nothing() {
        assert!(parse_event_list("").is_empty());
        assert!(parse_event_list("no list at all").is_empty());
    }

    #[test]
    fn formats_suggestions_as_dash_list() {
        let suggestions = vec!["Event 1".to_string(), "Event 2".to_string(), "Event 3".to_string()];

        let formatted = format_suggestions(&suggestions);

        assert_eq!(formatted, "- Event 1\n- Event 2\n- Event 3");
    }
}
