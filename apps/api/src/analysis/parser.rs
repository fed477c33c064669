//! Parses the model's evaluation response into a score and improvement areas.
//!
//! Structured-first: the prompt requests a JSON object, so JSON (with code
//! fences tolerated) is tried before anything else. When the model drifts,
//! the parser falls back to grammar v1 — the literal `Score: <digits>` line —
//! and finally degrades to a null score carrying the full response text.
//! The HTTP contract keeps the score nullable, so degradation is logged,
//! not fatal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Grammar v1: the literal phrase the model is told to fall back to.
static SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Score: (\d+)").unwrap());

/// The parsed outcome of one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvEvaluation {
    pub score: Option<u32>,
    pub improvement_areas: String,
}

/// The JSON schema the prompt requests from the model.
#[derive(Debug, Deserialize)]
struct StructuredEvaluation {
    score: Option<u32>,
    improvement_areas: String,
}

/// Parses a raw model response: JSON first, then grammar v1.
pub fn parse_model_response(raw: &str) -> CvEvaluation {
    if let Some(evaluation) = parse_structured(raw) {
        return evaluation;
    }

    warn!("Model response was not valid JSON; falling back to the Score: grammar");
    let evaluation = parse_score_text(raw);
    if evaluation.score.is_none() {
        warn!("Model response matched neither JSON nor the Score: grammar; score is null");
    }
    evaluation
}

fn parse_structured(raw: &str) -> Option<CvEvaluation> {
    let text = strip_json_fences(raw);
    let parsed: StructuredEvaluation = serde_json::from_str(text).ok()?;
    Some(CvEvaluation {
        score: parsed.score,
        improvement_areas: parsed.improvement_areas.trim().to_string(),
    })
}

/// Grammar v1: a single `Score: <digits>` match. The matched substring is
/// stripped and the trimmed remainder becomes the improvement areas; with no
/// match the score is null and the whole (trimmed) text is kept.
pub fn parse_score_text(raw: &str) -> CvEvaluation {
    match SCORE_RE.captures(raw) {
        Some(captures) => {
            let score = captures[1].parse::<u32>().ok();
            let remainder = SCORE_RE.replace(raw, "");
            CvEvaluation {
                score,
                improvement_areas: remainder.trim().to_string(),
            }
        }
        None => CvEvaluation {
            score: None,
            improvement_areas: raw.trim().to_string(),
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
