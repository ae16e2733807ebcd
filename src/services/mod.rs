pub mod chunker;
pub mod document_processor;
pub mod question_synthesizer;
pub mod quiz_bank_service;
pub mod quiz_builder_service;
pub mod quiz_session;
pub mod retrieval_service;
pub mod text_cleaner;
pub mod vector_index;
