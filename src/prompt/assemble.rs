//! Report prompt assembly: fixed instruction block plus the narrowed
//! body, focus items, and blockers.

use crate::error::PromptError;
use crate::prompt::narrow::DiffPayload;

/// Placeholder rendered when no focus items were given.
pub const FOCUS_PLACEHOLDER: &str = "N/A";

/// Placeholder rendered when the blockers input is empty or a negation.
pub const BLOCKERS_PLACEHOLDER: &str = "Nenhum no momento.";

/// Inputs that read as "no blockers", case-insensitive.
const NEGATION_WORDS: [&str; 7] = ["n/a", "na", "no", "none", "nao", "não", "nenhum"];

const REPORT_INSTRUCTIONS: &str = "\
You are writing a daily work report for a software developer based on their recent activity.
Write the report in first person, in plain text, with exactly three labeled sections in this order: Advances, Focus, Blockers.
Summarize the activity below into short bullet points under Advances.
Carry the focus items and blockers into their sections, rewriting them as full sentences where needed.
Do not add a greeting, preamble, or closing remarks.";

const REPORT_CLOSING: &str = "Remember: respond with exactly three sections labeled \
Advances, Focus and Blockers, in that order, and nothing else.";

/// Assemble the full report prompt.
///
/// The body is the narrowed payload text; when narrowing discarded the
/// diff, `manual_summary` becomes the sole body and its absence is an
/// error. Gathering that summary interactively is the caller's job.
pub fn assemble_report(
    payload: &DiffPayload,
    manual_summary: Option<&str>,
    extra_context: Option<&str>,
    focus_items: &[String],
    blockers: Option<&str>,
) -> Result<String, PromptError> {
    let body = match payload.text() {
        Some(text) => text,
        None => manual_summary
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(PromptError::SummaryRequired)?,
    };

    let context_block = match extra_context.map(str::trim).filter(|s| !s.is_empty()) {
        Some(context) => format!("{context}\n\n"),
        None => String::new(),
    };

    Ok(format!(
        "{REPORT_INSTRUCTIONS}\n\n\
         {context_block}\
         ## Activity\n{body}\n\n\
         ## Focus for today\n{focus}\n\n\
         ## Blockers\n{blockers}\n\n\
         {REPORT_CLOSING}\n",
        focus = render_focus(focus_items),
        blockers = render_blockers(blockers),
    ))
}

/// Render focus items as a `* item` bullet list, or the placeholder.
pub fn render_focus(items: &[String]) -> String {
    if items.is_empty() {
        return FOCUS_PLACEHOLDER.to_string();
    }
    items
        .iter()
        .map(|item| format!("* {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render blockers verbatim, or the placeholder for empty and negation
/// inputs.
pub fn render_blockers(input: Option<&str>) -> String {
    let trimmed = input.map(str::trim).unwrap_or("");
    if trimmed.is_empty() || NEGATION_WORDS.contains(&trimmed.to_lowercase().as_str()) {
        return BLOCKERS_PLACEHOLDER.to_string();
    }
    trimmed.to_string()
}
