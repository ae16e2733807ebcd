#[cfg(test)]
pub mod fixtures {
    use serde_json::json;

    use crate::models::domain::{question::Choice, ChoiceKey, Question};

    /// A valid question whose answer rotates through A..D with `n`.
    pub fn sample_question(n: usize) -> Question {
        let choices = ChoiceKey::ALL
            .iter()
            .map(|key| Choice {
                key: *key,
                value: format!("Option {} for question {}", key, n),
            })
            .collect();
        Question::new(
            format!("Sample question {}?", n),
            choices,
            ChoiceKey::ALL[n % 4],
            format!("Explanation {}", n),
        )
        .expect("fixture question should be valid")
    }

    /// The JSON a well-behaved model would return for question `n`.
    pub fn sample_question_json(n: usize) -> String {
        json!({
            "question": format!("Sample question {}?", n),
            "choices": [
                { "key": "A", "value": format!("Option A for question {}", n) },
                { "key": "B", "value": format!("Option B for question {}", n) },
                { "key": "C", "value": format!("Option C for question {}", n) },
                { "key": "D", "value": format!("Option D for question {}", n) }
            ],
            "answer": ChoiceKey::ALL[n % 4].to_string(),
            "explanation": format!("Explanation {}", n)
        })
        .to_string()
    }
}

#[cfg(test)]
pub mod fakes {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use async_trait::async_trait;

    use crate::{
        errors::ProviderError,
        providers::{EmbeddingCapability, GenerationCapability},
    };

    /// 26 letter counts, enough to make identical texts the closest match.
    pub fn letter_vector(text: &str) -> Vec<f32> {
        let mut counts = vec![0.0; 26];
        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            counts[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
        }
        counts
    }

    #[derive(Default)]
    pub struct LetterEmbedder;

    #[async_trait]
    impl EmbeddingCapability for LetterEmbedder {
        async fn embed_one(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
            Ok(letter_vector(text))
        }

        async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
            Ok(texts.iter().map(|t| letter_vector(t)).collect())
        }
    }

    /// Replays canned responses in order and remembers every prompt.
    pub struct ScriptedGenerator {
        responses: Mutex<Vec<Result<String, ProviderError>>>,
        prompts: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        pub fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl GenerationCapability for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().expect("lock").push(prompt.to_string());
            self.responses
                .lock()
                .expect("lock")
                .pop()
                .unwrap_or_else(|| Err(ProviderError::Api("script exhausted".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::fixtures::*;
    use crate::models::dto::question_dto::GeneratedQuestionDto;
    use crate::models::domain::Question;

    #[test]
    fn test_fixture_json_matches_fixture_question() {
        for n in 0..4 {
            let dto: GeneratedQuestionDto =
                serde_json::from_str(&sample_question_json(n)).expect("fixture json");
            let question = Question::try_from(dto).expect("fixture converts");
            assert_eq!(question, sample_question(n));
        }
    }

    #[test]
    fn test_letter_vector_counts_letters() {
        let v = letter_vector("Abba!");
        assert_eq!(v[0], 2.0);
        assert_eq!(v[1], 2.0);
        assert_eq!(v.iter().sum::<f32>(), 4.0);
    }
}
