use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: String,
    pub event: String,
}

/// What came back from the model for a timeline request.
///
/// The model is asked for JSON but nothing enforces it, so the raw reply is
/// always kept next to whatever could be parsed out of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimelineOutcome {
    /// Nothing to build a timeline from; the model was not called.
    Empty { timeline: Vec<TimelineEvent> },
    Parsed {
        timeline: Vec<TimelineEvent>,
        raw: String,
    },
    Unparsed { raw: String, error: String },
}

impl TimelineOutcome {
    pub fn empty() -> Self {
        TimelineOutcome::Empty { timeline: Vec::new() }
    }

    pub fn events(&self) -> &[TimelineEvent] {
        match self {
            TimelineOutcome::Empty { timeline } | TimelineOutcome::Parsed { timeline, .. } => {
                timeline
            }
            TimelineOutcome::Unparsed { .. } => &[],
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            TimelineOutcome::Empty { .. } => None,
            TimelineOutcome::Parsed { raw, .. } | TimelineOutcome::Unparsed { raw, .. } => {
                Some(raw)
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimelineShape {
    Wrapped { timeline: Vec<TimelineEvent> },
    Bare(Vec<TimelineEvent>),
}

/// Best-effort parse of a model reply into timeline events.
pub fn parse_timeline(raw: &str) -> TimelineOutcome {
    let body = strip_code_fence(raw);
    match serde_json::from_str::<TimelineShape>(body) {
        Ok(TimelineShape::Wrapped { timeline }) | Ok(TimelineShape::Bare(timeline)) => {
            TimelineOutcome::Parsed {
                timeline,
                raw: raw.to_string(),
            }
        }
        Err(e) => TimelineOutcome::Unparsed {
            raw: raw.to_string(),
            error: e.to_string(),
        },
    }
}

// Models like to wrap JSON in ```json fences.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapped_object() {
        let raw = r#"{"timeline": [{"date": "2024-01-01", "event": "Something happened."}]}"#;
        let outcome = parse_timeline(raw);
        assert!(matches!(outcome, TimelineOutcome::Parsed { .. }));
        assert_eq!(outcome.events().len(), 1);
        assert_eq!(outcome.events()[0].date, "2024-01-01");
        assert_eq!(outcome.raw(), Some(raw));
    }

    #[test]
    fn test_parse_fenced_reply() {
        let raw = "```json\n{\"timeline\": [{\"date\": \"May 2\", \"event\": \"A\"}, {\"date\": \"May 3\", \"event\": \"B\"}]}\n```\n";
        let outcome = parse_timeline(raw);
        assert_eq!(outcome.events().len(), 2);
        assert_eq!(outcome.events()[1].event, "B");
    }

    #[test]
    fn test_parse_bare_array() {
        let outcome = parse_timeline(r#"[{"date": "2023", "event": "X"}]"#);
        assert_eq!(outcome.events().len(), 1);
    }

    #[test]
    fn test_unparseable_reply_keeps_raw_text() {
        let raw = "Here is your timeline: 1. stuff happened";
        match parse_timeline(raw) {
            TimelineOutcome::Unparsed { raw: kept, error } => {
                assert_eq!(kept, raw);
                assert!(!error.is_empty());
            }
            other => panic!("expected unparsed, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_outcome_serializes_with_empty_timeline() {
        let json = serde_json::to_value(TimelineOutcome::empty()).unwrap();
        assert_eq!(json["status"], "empty");
        assert_eq!(json["timeline"], serde_json::json!([]));
        assert_eq!(TimelineOutcome::empty().raw(), None);
    }
}
