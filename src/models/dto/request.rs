use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub topic: String,

    #[validate(range(min = 1, max = 10))]
    pub num_questions: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 1))]
    pub key: String,
}
