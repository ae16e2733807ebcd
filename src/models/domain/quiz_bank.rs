use serde::Serialize;

use crate::{errors::BankError, models::domain::Question};

pub const MIN_QUESTIONS: usize = 1;
pub const MAX_QUESTIONS: usize = 10;

/// The fixed, ordered question set a session navigates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizBank {
    topic: String,
    questions: Vec<Question>,
}

impl QuizBank {
    pub fn new(topic: impl Into<String>, questions: Vec<Question>) -> Result<Self, BankError> {
        check_count(questions.len())?;
        Ok(QuizBank {
            topic: topic.into(),
            questions,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

pub fn check_count(num_questions: usize) -> Result<(), BankError> {
    if (MIN_QUESTIONS..=MAX_QUESTIONS).contains(&num_questions) {
        Ok(())
    } else {
        Err(BankError::InvalidCount(num_questions))
    }
}
