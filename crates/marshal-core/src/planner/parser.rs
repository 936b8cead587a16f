//! Turns raw model text into candidate plan fields.
//!
//! Parsing never fails. A JSON object is read leniently first; anything
//! that is not one falls through to the step grammars in
//! [`super::grammar`], which may legitimately find no steps at all.

use log::{debug, warn};
use serde_json::{Map, Value};

use super::grammar;
use crate::{agents::AvailableAgents, models::InputTask};

/// Steps beyond this count are kept but logged; the limit is part of the
/// prompt, not of parsing.
pub const MAX_PLAN_STEPS: usize = 6;

/// Summary used when a structured response does not provide one.
pub const DEFAULT_SUMMARY: &str = "Plan created based on task description";

/// Which strategy produced a [`ParsedPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    /// The response was a JSON object.
    Structured,
    /// The response was free text read with the step grammars.
    Pattern,
}

/// Plan-level fields recovered from a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFields {
    pub initial_goal: String,
    pub summary: Option<String>,
    pub human_clarification_request: Option<String>,
}

/// One step recovered from a response, with its agent already resolved
/// against the available set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFields {
    pub action: String,
    pub agent: String,
}

/// Best-effort reading of a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPlan {
    pub fields: PlanFields,
    pub steps: Vec<StepFields>,
    pub tier: ParseTier,
}

/// Parses model responses against a fixed set of agents.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    agents: AvailableAgents,
}

impl ResponseParser {
    pub fn new(agents: AvailableAgents) -> Self {
        Self { agents }
    }

    pub fn agents(&self) -> &AvailableAgents {
        &self.agents
    }

    /// Reads `raw` as a JSON plan, or as free text when that fails.
    pub fn parse(&self, raw: &str, task: &InputTask) -> ParsedPlan {
        let text = raw.trim();

        let parsed = match self.parse_structured(text, task) {
            Some(plan) => plan,
            None => {
                debug!("Response is not a JSON plan, reading it as free text");
                self.parse_pattern(text, task)
            }
        };

        if parsed.steps.len() > MAX_PLAN_STEPS {
            warn!(
                "Model proposed {} steps, more than the limit of {MAX_PLAN_STEPS}; keeping all of them",
                parsed.steps.len()
            );
        }
        debug!(
            "Parsed {} steps with the {:?} tier",
            parsed.steps.len(),
            parsed.tier
        );
        parsed
    }

    fn parse_structured(&self, text: &str, task: &InputTask) -> Option<ParsedPlan> {
        let raw = read_json_object(text).or_else(|| fenced_block(text).and_then(read_json_object))?;

        let steps = raw
            .get("steps")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| {
                let Some(step) = entry.as_object() else {
                    debug!("Skipping step entry that is not an object: {entry}");
                    return None;
                };
                Some(StepFields {
                    action: string_field(step, "action").unwrap_or_default().to_string(),
                    agent: self.agents.resolve(string_field(step, "agent").unwrap_or_default()),
                })
            })
            .collect();

        Some(ParsedPlan {
            fields: PlanFields {
                initial_goal: non_blank(string_field(&raw, "initial_goal"))
                    .unwrap_or_else(|| task.description.clone()),
                summary: Some(
                    string_field(&raw, "summary_plan_and_steps")
                        .unwrap_or(DEFAULT_SUMMARY)
                        .to_string(),
                ),
                human_clarification_request: non_blank(string_field(
                    &raw,
                    "human_clarification_request",
                )),
            },
            steps,
            tier: ParseTier::Structured,
        })
    }

    fn parse_pattern(&self, text: &str, task: &InputTask) -> ParsedPlan {
        let steps = grammar::step_matches(text)
            .into_iter()
            .map(|m| StepFields {
                agent: self.agents.resolve(&m.agent),
                action: m.action,
            })
            .collect();

        ParsedPlan {
            fields: PlanFields {
                initial_goal: grammar::extract_goal(text)
                    .unwrap_or_else(|| task.description.clone()),
                summary: None,
                human_clarification_request: None,
            },
            steps,
            tier: ParseTier::Pattern,
        }
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(AvailableAgents::default())
    }
}

/// Parses `text` as a JSON object. Keys are read individually afterwards,
/// so a field of the wrong type only loses that field.
fn read_json_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(text) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) => {
            debug!("Structured parse failed: response is JSON but not an object");
            None
        }
        Err(e) => {
            debug!("Structured parse failed: {e}");
            None
        }
    }
}

/// The string stored under `key`; other types count as absent.
fn string_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

/// Body of the first markdown code fence, preferring a `json` fence.
fn fenced_block(text: &str) -> Option<&str> {
    for opener in ["```json", "```"] {
        if let Some(start) = text.find(opener) {
            let body_start = start + opener.len();
            if let Some(len) = text[body_start..].find("```") {
                return Some(text[body_start..body_start + len].trim());
            }
        }
    }
    None
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}
