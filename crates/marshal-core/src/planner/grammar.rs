//! Line-oriented step grammars for unstructured model output.
//!
//! Two grammars are tried in order. The primary one understands the
//! `Step 1: Agent: HrAgent: ...` shape (with optional markdown bold), the
//! secondary one the plain `1. HrAgent: ...` shape. A step's action runs
//! from the end of its header to the next step boundary or the end of the
//! text.
//!
//! The `regex` crate has no look-ahead, so each grammar is a header pattern
//! plus a boundary pattern searched for from the header end.

use std::sync::LazyLock;

use regex::Regex;

static PRIMARY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Step)?\s*(\d+)[:.]\s*\*?\*?(?:Agent)?:\s*\*?([^:*\n]+)\*?[:\s]*")
        .expect("valid primary step header pattern")
});

static PRIMARY_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Step)?\s*\d+[:.]")
        .expect("valid primary step boundary pattern")
});

static SECONDARY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)[.:)]\s*([^:]*?):\s*")
        .expect("valid secondary step header pattern")
});

static SECONDARY_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+[.:)]").expect("valid secondary step boundary pattern")
});

static GOAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Goal|Initial Goal|Plan):\s*(.+)")
        .expect("valid goal pattern")
});

/// One step recognized in free text, before agent resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMatch {
    /// The number the model wrote. Kept for diagnostics only.
    pub number: String,
    /// Agent text exactly as captured.
    pub agent: String,
    /// Action text, trimmed.
    pub action: String,
}

struct Grammar {
    header: &'static LazyLock<Regex>,
    boundary: &'static LazyLock<Regex>,
    /// Whether an action must contain at least one character.
    non_empty_action: bool,
}

static PRIMARY: Grammar = Grammar {
    header: &PRIMARY_HEADER,
    boundary: &PRIMARY_BOUNDARY,
    non_empty_action: true,
};

static SECONDARY: Grammar = Grammar {
    header: &SECONDARY_HEADER,
    boundary: &SECONDARY_BOUNDARY,
    non_empty_action: false,
};

impl Grammar {
    fn matches(&self, text: &str) -> Vec<StepMatch> {
        let mut found = Vec::new();
        let mut cursor = 0;

        loop {
            let Some(caps) = self.header.captures_at(text, cursor) else {
                break;
            };
            let (Some(whole), Some(number), Some(agent)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                break;
            };

            let action_start = whole.end();
            let search_from = if self.non_empty_action {
                match text[action_start..].chars().next() {
                    Some(c) => action_start + c.len_utf8(),
                    None => break,
                }
            } else {
                action_start
            };

            let action_end = self
                .boundary
                .find_at(text, search_from)
                .map_or(text.len(), |m| m.start());

            found.push(StepMatch {
                number: number.as_str().to_string(),
                agent: agent.as_str().to_string(),
                action: text[action_start..action_end].trim().to_string(),
            });

            // Headers are never empty, so this always moves forward.
            cursor = action_end;
        }

        found
    }
}

/// Steps recognized by the primary grammar, in text order.
pub fn primary_matches(text: &str) -> Vec<StepMatch> {
    PRIMARY.matches(text)
}

/// Steps recognized by the secondary grammar, in text order.
pub fn secondary_matches(text: &str) -> Vec<StepMatch> {
    SECONDARY.matches(text)
}

/// Steps from the primary grammar, or from the secondary grammar when the
/// primary recognizes nothing.
pub fn step_matches(text: &str) -> Vec<StepMatch> {
    let primary = primary_matches(text);
    if !primary.is_empty() {
        return primary;
    }
    secondary_matches(text)
}

/// The first `Goal:`, `Initial Goal:` or `Plan:` line, trimmed. Blank goals
/// count as absent.
pub fn extract_goal(text: &str) -> Option<String> {
    GOAL.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|goal| !goal.is_empty())
}
