use crate::config::QuestionConfig;
use crate::types::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const DEFAULT_POOL: &[(&str, &str)] = &[
  ("What is the capital of France?", "Paris"),
  ("What is the area of a 5 cm by 3 cm rectangle, in square centimetres?", "15"),
  ("Who wrote the novel \"War and Peace\"?", "Leo Tolstoy"),
  ("In which year did World War II end?", "1945"),
  ("What is the process of water turning from liquid into gas called?", "Evaporation"),
  ("What is the longest river in the world?", "Amazon"),
  ("Who developed the theory of relativity?", "Albert Einstein"),
  ("What chemical compound is the main component of table salt?", "Sodium chloride"),
  ("What shape has four equal sides and four equal angles?", "Square"),
  ("Which animal is the best known symbol of Australia?", "Kangaroo"),
  ("Which law relates current, voltage and resistance?", "Ohm's law"),
  ("Which element is the basis of organic compounds?", "Carbon"),
  ("In which year did humans first land on the Moon?", "1969"),
  ("Who wrote \"Crime and Punishment\"?", "Fyodor Dostoevsky"),
  ("Which star is at the centre of our solar system?", "Sun"),
  ("Which lake is the deepest in the world?", "Baikal"),
  ("Which mathematical operation is written with the sign \"-\"?", "Subtraction"),
  ("Who wrote \"Romeo and Juliet\"?", "William Shakespeare"),
  ("In which country is the Great Wall located?", "China"),
  ("How many continents are there on Earth?", "7"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub prompt: String,
  answer: String,
}

impl Question {
  pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
    Self {
      prompt: prompt.into(),
      answer: answer.into(),
    }
  }

  pub fn answer(&self) -> &str {
    &self.answer
  }

  /// Case-insensitive comparison, ignoring surrounding whitespace.
  pub fn accepts(&self, candidate: &str) -> bool {
    normalize(candidate) == normalize(&self.answer)
  }
}

fn normalize(text: &str) -> String {
  text.trim().to_lowercase()
}

/// Fixed, never empty pool of questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
  pool: Vec<Question>,
}

impl QuestionBank {
  pub fn try_new(pool: Vec<Question>) -> Result<Self> {
    Some(pool)
      .filter(|pool| !pool.is_empty())
      .map(|pool| Self { pool })
      .ok_or(Error::EmptyQuestionBank)
  }

  pub fn from_config(questions: &[QuestionConfig]) -> Result<Self> {
    if questions.is_empty() {
      return Ok(Self::default());
    }

    Self::try_new(
      questions
        .iter()
        .map(|question| Question::new(question.prompt.trim(), question.answer.trim()))
        .collect(),
    )
  }

  pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
    // pool is non-empty by construction
    self.pool.choose(rng).cloned().unwrap_or_else(|| self.pool[0].clone())
  }

  pub fn len(&self) -> usize {
    self.pool.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pool.is_empty()
  }

  pub fn find(&self, prompt: &str) -> Option<&Question> {
    self.pool.iter().find(|question| question.prompt == prompt)
  }
}

impl Default for QuestionBank {
  fn default() -> Self {
    Self {
      pool: DEFAULT_POOL
        .iter()
        .map(|(prompt, answer)| Question::new(*prompt, *answer))
        .collect(),
    }
  }
}
