//! Sliding window of the most recent questions asked.
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct ConversationMemory {
    capacity: usize,
    questions: VecDeque<String>,
}

impl ConversationMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            questions: VecDeque::with_capacity(capacity),
        }
    }

    /// Seed the window from previously stored questions, given
    /// oldest first. Only the last `capacity` are kept.
    pub fn initialize(capacity: usize, history: Vec<String>) -> Self {
        let mut memory = Self::new(capacity);
        let skip = history.len().saturating_sub(capacity);
        memory.questions.extend(history.into_iter().skip(skip));
        memory
    }

    /// Recent questions, most recent last.
    pub fn context(&self) -> Vec<String> {
        self.questions.iter().cloned().collect()
    }

    /// Recent questions with `question` added to the end. The window
    /// itself is not modified.
    pub fn context_with(&self, question: &str) -> Vec<String> {
        let mut context = self.context();
        context.push(question.to_string());
        context
    }

    pub fn append(&mut self, question: &str) {
        if self.capacity == 0 {
            return;
        }
        while self.questions.len() >= self.capacity {
            self.questions.pop_front();
        }
        self.questions.push_back(question.to_string());
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
