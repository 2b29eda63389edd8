//! Prompt assembly for evidence-annotated and plain-context generation.
//!
//! Templates use [`minijinja`] syntax. The evidence template receives the
//! variables `evidence` and `question`; the chat answer template receives
//! `context`, `question` and `history`.

use std::collections::HashSet;

use minijinja::{Environment, context};

use crate::document::{Document, ScoredDocument};
use crate::error::{RagError, Result};

/// Separator placed between evidence blocks.
pub const EVIDENCE_SEPARATOR: &str = "\n\n---\n\n";

/// Default instruction template for evidence-annotated answers.
pub const DEFAULT_EVIDENCE_TEMPLATE: &str = "\
You are a lab assistant for Electrical Engineering labs.
Analyze the evidence below and provide a comprehensive answer.
If there are any equations in the answer please state them in the form which they appear.
Reference evidence numbers when relevant (e.g., \"According to Evidence 1...\").

{{ evidence }}

Question: {{ question }}

Answer:";

/// Default instruction template for conversational answers.
pub const DEFAULT_ANSWER_TEMPLATE: &str = "\
You are a helpful lab assistant for Electrical Engineering labs.
Use the context below to answer the question accurately.
If you cannot answer based on the context, say so.
{% if history %}
Conversation so far:
{{ history }}
{% endif %}
Context:
{{ context }}

Question: {{ question }}

Answer:";

/// Variables every evidence template must reference.
pub const EVIDENCE_TEMPLATE_VARS: &[&str] = &["evidence", "question"];

/// Variables every answer template must reference.
pub const ANSWER_TEMPLATE_VARS: &[&str] = &["context", "question"];

/// Format ranked documents into numbered evidence blocks.
///
/// Each block carries its 1-based index, the ranking score to three decimal
/// places, the source, the page and the full content.
pub fn format_evidence(ranked: &[ScoredDocument]) -> String {
    ranked
        .iter()
        .enumerate()
        .map(|(i, scored)| {
            format!(
                "Evidence {} (Score: {:.3})\nSource: {}, Page {}\n{}",
                i + 1,
                scored.score,
                scored.document.source(),
                scored.document.page(),
                scored.document.content
            )
        })
        .collect::<Vec<_>>()
        .join(EVIDENCE_SEPARATOR)
}

/// Format documents into a plain context block for conversational answers.
pub fn format_context<'a, I>(documents: I) -> String
where
    I: IntoIterator<Item = &'a Document>,
{
    documents
        .into_iter()
        .map(|doc| {
            format!("Source Document: {}, Page {}:\n{}", doc.source(), doc.page(), doc.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the evidence template with the formatted evidence and the question.
///
/// # Errors
///
/// Returns [`RagError::PromptError`] if the template fails to parse or render.
pub fn build_evidence_prompt(
    template: &str,
    query: &str,
    ranked: &[ScoredDocument],
) -> Result<String> {
    let evidence = format_evidence(ranked);
    let env = Environment::new();
    Ok(env.render_str(template, context! { evidence => evidence, question => query })?)
}

/// Render the answer template with context, question and prior conversation.
///
/// # Errors
///
/// Returns [`RagError::PromptError`] if the template fails to parse or render.
pub fn build_answer_prompt(
    template: &str,
    query: &str,
    context_text: &str,
    history: &str,
) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(
        template,
        context! { context => context_text, question => query, history => history },
    )?)
}

/// Check that `template` parses and references every name in `required`.
///
/// # Errors
///
/// Returns [`RagError::ConfigError`] naming the template and the missing
/// variables.
pub fn validate_template(name: &str, template: &str, required: &[&str]) -> Result<()> {
    let env = Environment::new();
    let parsed = env
        .template_from_str(template)
        .map_err(|e| RagError::ConfigError(format!("{name} does not parse: {e}")))?;
    let declared: HashSet<String> = parsed.undeclared_variables(false);
    let missing: Vec<&str> =
        required.iter().copied().filter(|var| !declared.contains(*var)).collect();
    if !missing.is_empty() {
        return Err(RagError::ConfigError(format!(
            "{name} must reference {}",
            missing.iter().map(|v| format!("`{{{{ {v} }}}}`")).collect::<Vec<_>>().join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked() -> Vec<ScoredDocument> {
        let mut first = ScoredDocument::new(
            Document::new("The voltage is V=IR").with_source("Lab1.pdf").with_page(3),
            0.5,
        );
        first.score = 0.5019;
        let second = ScoredDocument::new(Document::new("Use a multimeter."), 0.25);
        vec![first, second]
    }

    #[test]
    fn evidence_blocks_are_numbered_and_separated() {
        let text = format_evidence(&ranked());
        assert_eq!(
            text,
            "Evidence 1 (Score: 0.502)\nSource: Lab1.pdf, Page 3\nThe voltage is V=IR\
             \n\n---\n\n\
             Evidence 2 (Score: 0.250)\nSource: Unknown, Page ?\nUse a multimeter."
        );
    }

    #[test]
    fn evidence_prompt_contains_evidence_and_question() {
        let prompt = build_evidence_prompt(DEFAULT_EVIDENCE_TEMPLATE, "What is V?", &ranked())
            .unwrap();
        assert!(prompt.contains("Evidence 1 (Score: 0.502)"));
        assert!(prompt.contains("Question: What is V?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn template_syntax_inside_content_is_not_expanded() {
        let docs = vec![ScoredDocument::new(Document::new("literal {{ question }}"), 0.1)];
        let prompt = build_evidence_prompt("{{ evidence }}|{{ question }}", "Q", &docs).unwrap();
        assert!(prompt.contains("literal {{ question }}"));
        assert!(prompt.ends_with("|Q"));
    }

    #[test]
    fn context_uses_source_document_headers() {
        let docs = [Document::new("a").with_source("x.pdf").with_page(1), Document::new("b")];
        assert_eq!(
            format_context(docs.iter()),
            "Source Document: x.pdf, Page 1:\na\n\nSource Document: Unknown, Page ?:\nb"
        );
    }

    #[test]
    fn answer_prompt_omits_history_section_when_empty() {
        let prompt = build_answer_prompt(DEFAULT_ANSWER_TEMPLATE, "Q?", "ctx", "").unwrap();
        assert!(!prompt.contains("Conversation so far"));
        let prompt = build_answer_prompt(DEFAULT_ANSWER_TEMPLATE, "Q?", "ctx", "user: hi").unwrap();
        assert!(prompt.contains("Conversation so far:\nuser: hi"));
    }

    #[test]
    fn validation_reports_missing_variables() {
        assert!(validate_template("t", DEFAULT_EVIDENCE_TEMPLATE, EVIDENCE_TEMPLATE_VARS).is_ok());
        assert!(validate_template("t", DEFAULT_ANSWER_TEMPLATE, ANSWER_TEMPLATE_VARS).is_ok());

        let err = validate_template("t", "{{ evidence }} only", EVIDENCE_TEMPLATE_VARS)
            .unwrap_err()
            .to_string();
        assert!(err.contains("question"));
        assert!(!err.contains("`{{ evidence }}`"));
    }
}
