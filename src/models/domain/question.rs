use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::errors::{InputError, SynthesisError};

pub const CHOICE_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ChoiceKey {
    A,
    B,
    C,
    D,
}

impl ChoiceKey {
    pub const ALL: [ChoiceKey; CHOICE_COUNT] = [ChoiceKey::A, ChoiceKey::B, ChoiceKey::C, ChoiceKey::D];

    pub fn as_char(self) -> char {
        match self {
            ChoiceKey::A => 'A',
            ChoiceKey::B => 'B',
            ChoiceKey::C => 'C',
            ChoiceKey::D => 'D',
        }
    }
}

impl fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for ChoiceKey {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(ChoiceKey::A),
            "B" => Ok(ChoiceKey::B),
            "C" => Ok(ChoiceKey::C),
            "D" => Ok(ChoiceKey::D),
            _ => Err(InputError::InvalidChoice(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub key: ChoiceKey,
    pub value: String,
}

/// A validated multiple choice question.
///
/// The only way to obtain one is [`Question::new`], so every instance has
/// four choices with distinct keys and an answer naming one of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    question: String,
    choices: Vec<Choice>,
    answer: ChoiceKey,
    explanation: String,
}

impl Question {
    pub fn new(
        question: impl Into<String>,
        choices: Vec<Choice>,
        answer: ChoiceKey,
        explanation: impl Into<String>,
    ) -> Result<Self, SynthesisError> {
        let question = question.into();
        let explanation = explanation.into();

        if question.trim().is_empty() {
            return Err(SynthesisError::SchemaViolation(
                "question text is empty".to_string(),
            ));
        }

        if explanation.trim().is_empty() {
            return Err(SynthesisError::SchemaViolation(
                "explanation is empty".to_string(),
            ));
        }

        if choices.len() != CHOICE_COUNT {
            return Err(SynthesisError::SchemaViolation(format!(
                "expected {} choices, got {}",
                CHOICE_COUNT,
                choices.len()
            )));
        }

        let mut seen = Vec::with_capacity(CHOICE_COUNT);
        for choice in &choices {
            if seen.contains(&choice.key) {
                return Err(SynthesisError::SchemaViolation(format!(
                    "duplicate choice key {}",
                    choice.key
                )));
            }
            if choice.value.trim().is_empty() {
                return Err(SynthesisError::SchemaViolation(format!(
                    "choice {} has no text",
                    choice.key
                )));
            }
            seen.push(choice.key);
        }

        if !seen.contains(&answer) {
            return Err(SynthesisError::SchemaViolation(format!(
                "answer {} does not match any choice key",
                answer
            )));
        }

        Ok(Question {
            question,
            choices,
            answer,
            explanation,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn answer(&self) -> ChoiceKey {
        self.answer
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn is_correct(&self, selected: ChoiceKey) -> bool {
        self.answer == selected
    }
}
