pub mod chunk;
pub mod document;
pub mod question;
pub mod quiz_bank;
pub use chunk::{Chunk, VectorRecord};
pub use document::Document;
pub use question::{Choice, ChoiceKey, Question};
pub use quiz_bank::QuizBank;
