use serde_json::Value;

use crate::{
    constants::quiz_prompt::{CONTEXT_PLACEHOLDER, QUIZ_QUESTION_PROMPT, TOPIC_PLACEHOLDER},
    errors::SynthesisError,
    models::{domain::Question, dto::question_dto::GeneratedQuestionDto},
    providers::GenerationCapability,
};

/// Renders the question prompt, calls the model once and validates what comes back.
pub struct QuestionSynthesizer {
    template: String,
}

impl Default for QuestionSynthesizer {
    fn default() -> Self {
        Self {
            template: QUIZ_QUESTION_PROMPT.to_string(),
        }
    }
}

impl QuestionSynthesizer {
    pub fn render_prompt(&self, topic: &str, context: &str) -> String {
        render(&self.template, topic, context)
    }

    pub async fn synthesize(
        &self,
        topic: &str,
        context: &str,
        generator: &dyn GenerationCapability,
    ) -> Result<Question, SynthesisError> {
        let prompt = self.render_prompt(topic, context);
        let text = generator.generate(&prompt).await?;
        parse_question(&text)
    }
}

/// Substitute both placeholders in a single pass, so text inserted for one is
/// never scanned for the other.
fn render(template: &str, topic: &str, context: &str) -> String {
    let mut out = String::with_capacity(template.len() + topic.len() + context.len());
    let mut rest = template;

    loop {
        let next = [(TOPIC_PLACEHOLDER, topic), (CONTEXT_PLACEHOLDER, context)]
            .into_iter()
            .filter_map(|(placeholder, value)| {
                rest.find(placeholder).map(|at| (at, placeholder, value))
            })
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, placeholder, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + placeholder.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

/// Models like to wrap JSON in Markdown fences or chat around it; keep only
/// the outermost object.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

pub fn parse_question(text: &str) -> Result<Question, SynthesisError> {
    let candidate = extract_json_object(text).ok_or_else(|| {
        SynthesisError::ParseFailure("response contains no JSON object".to_string())
    })?;

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| SynthesisError::ParseFailure(e.to_string()))?;

    let dto: GeneratedQuestionDto = serde_json::from_value(value)
        .map_err(|e| SynthesisError::SchemaViolation(e.to_string()))?;

    Question::try_from(dto)
}
