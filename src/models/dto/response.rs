use serde::{Deserialize, Serialize};

use crate::models::domain::{question::ChoiceKey, Question};

/// What the user sees of a question before answering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub question: String,
    pub choices: Vec<ChoiceView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub key: String,
    pub value: String,
}

impl QuestionView {
    pub fn new(index: usize, total: usize, question: &Question) -> Self {
        QuestionView {
            index,
            total,
            question: question.question().to_string(),
            choices: question
                .choices()
                .iter()
                .map(|c| ChoiceView {
                    key: c.key.to_string(),
                    value: c.value.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_key: ChoiceKey,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub filename: String,
    pub pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestionSummary {
    pub documents: Vec<DocumentReport>,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizCreatedResponse {
    pub topic: String,
    pub question_count: usize,
    pub chunk_count: usize,
    pub current: QuestionView,
}
