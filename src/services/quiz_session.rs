use crate::models::{
    domain::{ChoiceKey, Question, QuizBank},
    dto::response::{AnswerFeedback, QuestionView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }
}

/// Cursor over a fixed quiz bank. Navigation wraps at both ends, so the
/// session has no terminal state.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuizBank,
    current_index: usize,
    last_selected_choice: Option<ChoiceKey>,
}

impl QuizSession {
    pub fn new(bank: QuizBank) -> Self {
        Self {
            bank,
            current_index: 0,
            last_selected_choice: None,
        }
    }

    pub fn bank(&self) -> &QuizBank {
        &self.bank
    }

    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn last_selected_choice(&self) -> Option<ChoiceKey> {
        self.last_selected_choice
    }

    pub fn current(&self) -> &Question {
        // The bank holds 1..=10 questions and the index is kept in range.
        &self.bank.questions()[self.current_index]
    }

    pub fn advance(&mut self, direction: Direction) {
        let len = self.bank.len() as isize;
        self.current_index = (self.current_index as isize + direction.step()).rem_euclid(len) as usize;
        self.last_selected_choice = None;
    }

    pub fn next(&mut self) {
        self.advance(Direction::Next);
    }

    pub fn previous(&mut self) {
        self.advance(Direction::Previous);
    }

    pub fn check_answer(&self, selected: ChoiceKey) -> bool {
        self.current().is_correct(selected)
    }

    pub fn current_question(&self) -> QuestionView {
        QuestionView::new(self.current_index, self.len(), self.current())
    }

    pub fn submit_answer(&mut self, selected: ChoiceKey) -> AnswerFeedback {
        self.last_selected_choice = Some(selected);
        let question = self.current();
        AnswerFeedback {
            correct: question.is_correct(selected),
            correct_key: question.answer(),
            explanation: question.explanation().to_string(),
        }
    }
}
