//! Text extraction from line-delimited JSON event output

use serde::Deserialize;
use tracing::trace;

#[derive(Debug, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Event {
    #[serde(rename = "type")]
    kind: String,
    part: Option<serde_json::Value>,
}

/// Extract plain text from a tool's raw output.
///
/// With `wants_structured` false the output is returned as is. Otherwise
/// every non-blank line is parsed on its own; lines shaped like
/// `{"type":"text","part":{"text":...}}` contribute their text, joined with
/// newlines. Lines that are not JSON, or other event types, are skipped.
/// When nothing was collected the raw output is returned unchanged.
pub fn extract_text(raw: &str, wants_structured: bool) -> String {
    if !wants_structured {
        return raw.to_string();
    }

    let fragments: Vec<String> = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(text_fragment)
        .collect();

    if fragments.is_empty() {
        raw.to_string()
    } else {
        fragments.join("\n")
    }
}

fn text_fragment(line: &str) -> Option<String> {
    let event: Event = match serde_json::from_str(line.trim()) {
        Ok(event) => event,
        Err(e) => {
            trace!(error = %e, "skipping non-event line");
            return None;
        }
    };
    if event.kind != "text" {
        return None;
    }
    serde_json::from_value::<TextPart>(event.part?)
        .ok()
        .map(|p| p.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_text_events() {
        let raw = "{\"type\":\"text\",\"part\":{\"text\":\"hi\"}}\nignored-garbage";
        assert_eq!(extract_text(raw, true), "hi");
    }

    #[test]
    fn test_plain_text_falls_back() {
        assert_eq!(
            extract_text("plain text, no JSON", true),
            "plain text, no JSON"
        );
    }

    #[test]
    fn test_unstructured_passthrough() {
        let raw = "{\"type\":\"text\",\"part\":{\"text\":\"hi\"}}";
        assert_eq!(extract_text(raw, false), raw);
    }

    #[test]
    fn test_joins_fragments_and_skips_other_events() {
        let raw = r#"{"type":"step_start","part":{"id":"1"}}
{"type":"text","part":{"text":"first"}}

{"type":"tool_use","part":{"tool":"bash"}}
{"type":"text","part":{"text":"second"}}
{"type":"text","part":{"text":42}}
{"type":"text"}
[1,2,3]"#;
        assert_eq!(extract_text(raw, true), "first\nsecond");
    }

    #[test]
    fn test_only_non_text_events_fall_back() {
        let raw = r#"{"type":"step_finish","part":{}}"#;
        assert_eq!(extract_text(raw, true), raw);
    }
}
