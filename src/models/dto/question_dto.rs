use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::SynthesisError;
use crate::models::domain::question::{Choice, ChoiceKey, Question, CHOICE_COUNT};

/// The JSON object the generation model is asked to produce.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, JsonSchema)]
pub struct GeneratedQuestionDto {
    #[validate(length(min = 1))]
    pub question: String,

    #[validate(length(equal = 4), nested)]
    pub choices: Vec<GeneratedChoiceDto>,

    #[validate(length(min = 1))]
    pub answer: String,

    #[validate(length(min = 1))]
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, JsonSchema)]
pub struct GeneratedChoiceDto {
    #[validate(length(equal = 1))]
    pub key: String,

    #[validate(length(min = 1))]
    pub value: String,
}

impl TryFrom<GeneratedQuestionDto> for Question {
    type Error = SynthesisError;

    fn try_from(dto: GeneratedQuestionDto) -> Result<Self, Self::Error> {
        let dto = dto.normalized();
        dto.validate()
            .map_err(|e| SynthesisError::SchemaViolation(e.to_string()))?;

        let mut choices = Vec::with_capacity(CHOICE_COUNT);
        for choice in dto.choices {
            let key = choice.key.parse::<ChoiceKey>().map_err(|_| {
                SynthesisError::SchemaViolation(format!("choice key '{}' is not A-D", choice.key))
            })?;
            choices.push(Choice {
                key,
                value: choice.value,
            });
        }

        let answer = dto.answer.parse::<ChoiceKey>().map_err(|_| {
            SynthesisError::SchemaViolation(format!(
                "answer '{}' does not match any choice key",
                dto.answer
            ))
        })?;

        Question::new(dto.question, choices, answer, dto.explanation)
    }
}

impl GeneratedQuestionDto {
    fn normalized(mut self) -> Self {
        self.question = self.question.trim().to_string();
        self.answer = self.answer.trim().to_ascii_uppercase();
        self.explanation = self.explanation.trim().to_string();
        for choice in &mut self.choices {
            choice.key = choice.key.trim().to_ascii_uppercase();
            choice.value = choice.value.trim().to_string();
        }
        self
    }
}

impl From<&Question> for GeneratedQuestionDto {
    fn from(question: &Question) -> Self {
        GeneratedQuestionDto {
            question: question.question().to_string(),
            choices: question
                .choices()
                .iter()
                .map(|c| GeneratedChoiceDto {
                    key: c.key.to_string(),
                    value: c.value.clone(),
                })
                .collect(),
            answer: question.answer().to_string(),
            explanation: question.explanation().to_string(),
        }
    }
}
