//! Prompt assembly and reply post-processing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use medsense_nlp::SymptomMatch;
use medsense_risk::{RiskAssessment, RiskLevel};

use crate::types::{ChatMessage, Personalization};

/// How many trailing conversation turns are included in the prompt.
pub const HISTORY_WINDOW: usize = 8;

static JSON_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

/// Render the trailing conversation window as `ROLE: text` lines.
fn render_history(history: &[ChatMessage]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|m| format!("{}: {}", m.role.to_uppercase(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the full LLM prompt from the pipeline outputs.
pub fn build_prompt(
    history: &[ChatMessage],
    user_message: &str,
    matches: &[SymptomMatch],
    risk: &RiskAssessment,
    context_docs: &[String],
) -> String {
    let mapped = serde_json::to_string(matches).unwrap_or_else(|_| "[]".into());
    let risk_json = serde_json::to_string(risk).unwrap_or_else(|_| "{}".into());
    let context_block = context_docs.join("\n\n---\n");

    format!(
        "\
You are MedSense, a medically-safe AI assistant. You analyze symptoms but DO NOT diagnose.

Here is the past conversation:
{past}

Here is the new user message:
{message}

MAPPED SYMPTOMS:
{mapped}

RISK ASSESSMENT:
{risk}

RELEVANT MEDICAL CONTEXT:
{context}

Return a CLEAN JSON with keys:
- possible_causes (short list)
- lifestyle_factors
- red_flags
- explanation (very clear, 2-3 sentences)
- suggested_actions
- risk_score
- risk_level
- llm_insights (explain reasoning)
- clarification_needed (what follow-up questions should be asked)
- personalized_diet (diet advice based on problem)
- urgent_advice (if high risk)

Keep text SHORT and medically safe.
",
        past = render_history(history),
        message = user_message,
        mapped = mapped,
        risk = risk_json,
        context = context_block,
    )
}

/// Pull the first `{...}` block out of the model reply. Replies that
/// contain no parseable JSON are wrapped as `{"raw_text": ...}`.
pub fn extract_json(text: &str) -> Value {
    if let Some(block) = JSON_BLOCK.find(text) {
        if let Ok(value) = serde_json::from_str::<Value>(block.as_str()) {
            return value;
        }
    }
    json!({ "raw_text": text })
}

/// Rule-based personalization: diet advice keyed off the risk tier.
pub fn personalize(risk: &RiskAssessment) -> Personalization {
    let urgent = risk.risk_level == RiskLevel::High;
    let recommended_diet = if urgent {
        vec![
            "Hydrate lightly".to_string(),
            "Avoid spicy/heavy meals".to_string(),
            "Eat soft, stomach-friendly foods".to_string(),
            "Avoid caffeine/alcohol".to_string(),
        ]
    } else {
        vec![
            "Balanced meal".to_string(),
            "High fiber".to_string(),
            "Low sodium".to_string(),
            "Plenty of fruits".to_string(),
        ]
    };
    Personalization { urgent, recommended_diet }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(score: i64) -> RiskAssessment {
        RiskAssessment { risk_score: score, risk_level: RiskLevel::from_score(score) }
    }

    #[test]
    fn test_prompt_contains_pipeline_outputs() {
        let matches = vec![SymptomMatch {
            symptom: "fever".into(),
            severity: 5,
            related_conditions: vec!["flu".into()],
        }];
        let docs = vec!["Fever guidance.".to_string(), "Flu overview.".to_string()];
        let prompt = build_prompt(&[], "I have a fever", &matches, &risk(75), &docs);

        assert!(prompt.contains("DO NOT diagnose"));
        assert!(prompt.contains("I have a fever"));
        assert!(prompt.contains(r#""symptom":"fever""#));
        assert!(prompt.contains(r#""risk_level":"High""#));
        assert!(prompt.contains("Fever guidance.\n\n---\nFlu overview."));
    }

    #[test]
    fn test_history_window_is_last_eight() {
        let history: Vec<ChatMessage> =
            (0..12).map(|i| ChatMessage::user(format!("msg{}", i))).collect();
        let prompt = build_prompt(&history, "now", &[], &risk(0), &[]);
        assert!(!prompt.contains("msg3"));
        assert!(prompt.contains("USER: msg4"));
        assert!(prompt.contains("USER: msg11"));
    }

    #[test]
    fn test_extract_json_happy_path() {
        let value = extract_json("Sure! Here you go:\n{\"explanation\": \"rest\"}\nThanks.");
        assert_eq!(value["explanation"], "rest");
    }

    #[test]
    fn test_extract_json_fallback() {
        let value = extract_json("no json here");
        assert_eq!(value["raw_text"], "no json here");
    }

    #[test]
    fn test_personalize_by_tier() {
        let high = personalize(&risk(80));
        assert!(high.urgent);
        assert!(high.recommended_diet.iter().any(|d| d.contains("Hydrate")));

        let low = personalize(&risk(10));
        assert!(!low.urgent);
        assert!(low.recommended_diet.iter().any(|d| d.contains("Balanced")));
    }
}
