use crate::{
    constants::DEFAULT_TOPIC,
    errors::{BankError, SynthesisError},
    models::domain::{quiz_bank::check_count, Question, QuizBank},
    providers::GenerationCapability,
    services::{
        question_synthesizer::QuestionSynthesizer, retrieval_service::RetrievalContextBuilder,
        vector_index::VectorIndex,
    },
};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Why a single attempt at a slot did not produce a usable question.
enum Rejection {
    Synthesis(SynthesisError),
    Duplicate(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Synthesis(e) => write!(f, "{}", e),
            Rejection::Duplicate(q) => write!(f, "duplicate question '{}'", q),
        }
    }
}

pub struct QuizBankService {
    retrieval: RetrievalContextBuilder,
    synthesizer: QuestionSynthesizer,
    max_attempts: u32,
}

impl Default for QuizBankService {
    fn default() -> Self {
        Self::new(RetrievalContextBuilder::default(), DEFAULT_MAX_ATTEMPTS)
    }
}

impl QuizBankService {
    pub fn new(retrieval: RetrievalContextBuilder, max_attempts: u32) -> Self {
        Self {
            retrieval,
            synthesizer: QuestionSynthesizer::default(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Fill `num_questions` slots, or fail as a whole. Parse and schema
    /// failures are retried up to `max_attempts` per slot; provider failures
    /// end the build immediately.
    pub async fn generate(
        &self,
        topic: &str,
        num_questions: usize,
        index: &VectorIndex,
        generator: &dyn GenerationCapability,
    ) -> Result<QuizBank, BankError> {
        check_count(num_questions)?;

        let topic = match topic.trim() {
            "" => DEFAULT_TOPIC,
            t => t,
        };

        let mut questions: Vec<Question> = Vec::with_capacity(num_questions);
        for slot in 0..num_questions {
            let question = self.fill_slot(slot, topic, index, generator, &questions).await?;
            questions.push(question);
        }

        log::info!("Generated {} questions on '{}'", questions.len(), topic);
        QuizBank::new(topic, questions)
    }

    async fn fill_slot(
        &self,
        slot: usize,
        topic: &str,
        index: &VectorIndex,
        generator: &dyn GenerationCapability,
        accepted: &[Question],
    ) -> Result<Question, BankError> {
        let context = self
            .retrieval
            .build_context(index, topic)
            .await
            .map_err(|source| BankError::Retrieval { slot, source })?;

        let mut last: Option<Rejection> = None;
        for attempt in 1..=self.max_attempts {
            let rejection = match self.synthesizer.synthesize(topic, &context, generator).await {
                Ok(question) if is_duplicate(&question, accepted) => {
                    Rejection::Duplicate(question.question().to_string())
                }
                Ok(question) => return Ok(question),
                Err(e) if e.is_retryable() => Rejection::Synthesis(e),
                Err(e) => {
                    log::error!("Generation failed for slot {}: {}", slot, e);
                    return Err(match e {
                        SynthesisError::Upstream(source) => BankError::Upstream { slot, source },
                        other => BankError::SynthesisExhausted {
                            slot,
                            attempts: attempt,
                            last_error: other.to_string(),
                        },
                    });
                }
            };

            log::warn!(
                "Slot {} attempt {}/{} rejected: {}",
                slot,
                attempt,
                self.max_attempts,
                rejection
            );
            last = Some(rejection);
        }

        Err(BankError::SynthesisExhausted {
            slot,
            attempts: self.max_attempts,
            last_error: last.map(|r| r.to_string()).unwrap_or_default(),
        })
    }
}

fn is_duplicate(question: &Question, accepted: &[Question]) -> bool {
    accepted
        .iter()
        .any(|q| q.question().trim().eq_ignore_ascii_case(question.question().trim()))
}
