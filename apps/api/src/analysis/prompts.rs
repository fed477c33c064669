//! Prompt assembly for the CV evaluation call.
//!
//! The CV text and job description are each held to a fixed character budget
//! before the prompt is assembled, with a visible marker where truncation
//! occurred. CV content is otherwise passed through unmodified.

/// System prompt — enforces the structured JSON contract.
pub const CV_EVAL_SYSTEM: &str =
    "You are an expert recruiter evaluating a candidate CV against a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Evaluation prompt template. Replace `{cv_text}` and `{jd_text}` before sending.
///
/// The plain-text fallback line documents grammar v1 (`Score: <digits>`),
/// which the parser accepts when the model fails to produce JSON.
pub const CV_EVAL_PROMPT_TEMPLATE: &str = r#"Evaluate the following CV against the given job description. Provide a score out of 100 and highlight areas for improvement.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 87,
  "improvement_areas": "Concrete, actionable feedback as prose."
}

"score" is an integer from 0 to 100, or null if the CV cannot be scored.
If you are unable to produce JSON, reply in plain text containing the literal line "Score: <number>" followed by the improvement areas.

CV:
{cv_text}

Job Description:
{jd_text}"#;

/// Character budget for the CV text portion of the prompt.
pub const MAX_CV_CHARS: usize = 20_000;
/// Character budget for the job description portion of the prompt.
pub const MAX_JD_CHARS: usize = 8_000;
/// Appended where input was cut to fit its budget.
pub const TRUNCATION_MARKER: &str = "\n[input truncated to fit the model budget]";

/// Assembles the evaluation prompt, enforcing the length budgets.
pub fn build_cv_eval_prompt(cv_text: &str, job_description: &str) -> String {
    let cv = truncate_chars(cv_text, MAX_CV_CHARS);
    let jd = truncate_chars(job_description, MAX_JD_CHARS);
    CV_EVAL_PROMPT_TEMPLATE
        .replace("{cv_text}", &cv)
        .replace("{jd_text}", &jd)
}

/// Cuts `text` to at most `max_chars` characters (not bytes), appending the
/// truncation marker when anything was dropped.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
