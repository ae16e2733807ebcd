mod common;

use std::sync::Arc;

use quizzify_server::{
    errors::{AppError, BankError, IndexError},
    models::domain::{Chunk, ChoiceKey, Document},
    services::{
        chunker::TextChunker,
        quiz_bank_service::QuizBankService,
        quiz_builder_service::QuizBuilderService,
        quiz_session::{Direction, QuizSession},
        text_cleaner,
        vector_index::VectorIndex,
    },
};

use common::{config, question_json, LetterEmbedder, ScriptedGenerator};

const PHOTOSYNTHESIS: &str = "Photosynthesis is the process by which green plants use sunlight to synthesize food.\n\n\
Chlorophyll in the chloroplasts absorbs mostly blue and red light.\n\n\
The light-dependent reactions take place in the thylakoid membranes and produce ATP and NADPH.\n\n\
The Calvin cycle uses ATP and NADPH to fix carbon dioxide into sugars.";

fn sample_texts() -> Vec<String> {
    vec![
        String::new(),
        "short".to_string(),
        PHOTOSYNTHESIS.to_string(),
        "x".repeat(5000),
        (0..300)
            .map(|i| format!("sentence {} \u{2013} caf\u{e9}\r\n", i))
            .collect::<String>(),
        (0..50)
            .map(|i| "para ".repeat(i * 7 % 60 + 1))
            .collect::<Vec<_>>()
            .join("\n\n"),
    ]
}

#[test]
fn cleaned_text_is_printable_ascii_and_stable() {
    for text in sample_texts() {
        let cleaned = text_cleaner::clean(&text);
        assert!(cleaned.bytes().all(|b| (0x20..=0x7E).contains(&b)));
        assert_eq!(text_cleaner::clean(&cleaned), cleaned);
    }
}

#[test]
fn chunks_never_exceed_max_size() {
    for (max, overlap) in [(1000, 200), (100, 30), (37, 0), (10, 9)] {
        let chunker = TextChunker::new(max, overlap).expect("valid parameters");
        for text in sample_texts() {
            for chunk in chunker.split(&text) {
                assert!(chunk.chars().count() <= max, "{} > {}", chunk.len(), max);
            }
        }
    }
}

#[tokio::test]
async fn query_before_build_is_not_built() {
    let index = VectorIndex::new(Arc::new(LetterEmbedder::default()));
    assert_eq!(index.query("Photosynthesis", 4).await, Err(IndexError::NotBuilt));
}

#[tokio::test]
async fn empty_chunk_set_leaves_index_unbuilt() {
    let embedder = Arc::new(LetterEmbedder::default());
    let mut index = VectorIndex::new(embedder.clone());

    assert_eq!(index.build(Vec::new()).await, Err(IndexError::EmptyInput));
    assert_eq!(embedder.calls(), 0);
    assert_eq!(index.query("anything", 4).await, Err(IndexError::NotBuilt));
}

#[tokio::test]
async fn every_indexed_chunk_is_its_own_best_match() {
    let chunker = TextChunker::new(120, 20).expect("valid parameters");
    let chunks: Vec<Chunk> = chunker
        .split(PHOTOSYNTHESIS)
        .into_iter()
        .map(Chunk::new)
        .collect();
    assert!(chunks.len() > 1);

    let mut index = VectorIndex::new(Arc::new(LetterEmbedder::default()));
    index.build(chunks.clone()).await.expect("index should build");

    for chunk in &chunks {
        let results = index.query(&chunk.text, 4).await.expect("query should succeed");
        let best = results[0].1;
        assert!(results
            .iter()
            .any(|(c, score)| c.text == chunk.text && *score == best));
    }
}

async fn photosynthesis_index() -> VectorIndex {
    let mut index = VectorIndex::new(Arc::new(LetterEmbedder::default()));
    index
        .build(
            TextChunker::default()
                .split(PHOTOSYNTHESIS)
                .into_iter()
                .map(Chunk::new)
                .collect(),
        )
        .await
        .expect("index should build");
    index
}

#[tokio::test]
async fn three_question_session_wraps_backwards() {
    let generator = ScriptedGenerator::new(vec![
        question_json("Photosynthesis", 0, "A"),
        question_json("Photosynthesis", 1, "B"),
        question_json("Photosynthesis", 2, "D"),
    ]);
    let index = photosynthesis_index().await;

    let bank = QuizBankService::default()
        .generate("Photosynthesis", 3, &index, &generator)
        .await
        .expect("bank should build");
    let mut session = QuizSession::new(bank.clone());

    assert_eq!(session.len(), 3);
    assert_eq!(session.current_index(), 0);

    session.advance(Direction::Previous);
    assert_eq!(session.current_index(), 2);
    assert!(session.check_answer(bank.questions()[2].answer()));
    assert_eq!(bank.questions()[2].answer(), ChoiceKey::D);
}

#[tokio::test]
async fn two_malformed_responses_then_valid_takes_three_calls() {
    let generator = ScriptedGenerator::new(vec![
        "```json\n{ \"question\": \"broken\", ".to_string(),
        "{\"question\": \"Q\", \"choices\": [], \"answer\": \"A\", \"explanation\": \"\"}".to_string(),
        question_json("Photosynthesis", 0, "C"),
    ]);
    let index = photosynthesis_index().await;

    let bank = QuizBankService::default()
        .generate("Photosynthesis", 1, &index, &generator)
        .await
        .expect("third attempt should succeed");

    assert_eq!(generator.calls(), 3);
    assert_eq!(bank.len(), 1);
    assert_eq!(bank.questions()[0].answer(), ChoiceKey::C);
}

#[tokio::test]
async fn eleven_questions_is_rejected_without_generation() {
    let generator = ScriptedGenerator::new(vec![]);
    let index = photosynthesis_index().await;

    let result = QuizBankService::default()
        .generate("Photosynthesis", 11, &index, &generator)
        .await;

    assert_eq!(result, Err(BankError::InvalidCount(11)));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn builder_runs_from_documents_to_session() {
    let embedder = Arc::new(LetterEmbedder::default());
    let generator = Arc::new(ScriptedGenerator::new(vec![
        question_json("Plants", 0, "A"),
        question_json("Plants", 1, "B"),
    ]));
    let builder = QuizBuilderService::new(&config(), embedder.clone(), generator.clone())
        .expect("config is valid");

    let documents = vec![
        Document::from_page("plants.pdf", 1, PHOTOSYNTHESIS),
        Document::from_page("plants.pdf", 2, "Roots absorb water and minerals."),
    ];

    let built = builder
        .build_quiz(&documents, "Plants", 2)
        .await
        .expect("quiz should build");

    assert_eq!(built.chunk_count, 2);
    assert_eq!(built.session.len(), 2);
    assert_eq!(generator.calls(), 2);
    assert!(embedder.calls() > 0);
}

#[tokio::test]
async fn builder_rejects_bad_count_before_embedding() {
    let embedder = Arc::new(LetterEmbedder::default());
    let generator = Arc::new(ScriptedGenerator::new(vec![]));
    let builder = QuizBuilderService::new(&config(), embedder.clone(), generator.clone())
        .expect("config is valid");

    let documents = vec![Document::from_page("plants.pdf", 1, PHOTOSYNTHESIS)];
    let result = builder.build_quiz(&documents, "Plants", 0).await;

    assert!(matches!(result, Err(AppError::Bank(BankError::InvalidCount(0)))));
    assert_eq!(embedder.calls(), 0);
    assert_eq!(generator.calls(), 0);
}
