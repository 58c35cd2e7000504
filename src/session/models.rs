//! The two models compared in one annotation task.

use uuid::Uuid;

use super::error::{SessionError, SessionResult};

/// Which side of the comparison a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLabel {
    A,
    B,
}

impl ModelLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelLabel::A => "modelA",
            ModelLabel::B => "modelB",
        }
    }
}

impl std::fmt::Display for ModelLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two distinct model ids; model B always runs whichever one model A did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPair {
    models: [String; 2],
}

impl ModelPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            models: [first.into(), second.into()],
        }
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    /// The model that was not used for `model`.
    pub fn opposite(&self, model: &str) -> SessionResult<&str> {
        match self.models.iter().position(|m| m == model) {
            Some(index) => Ok(&self.models[1 - index]),
            None => Err(SessionError::UnknownModel(model.to_string())),
        }
    }

    /// Pick a model for the first session at random, so annotators cannot
    /// infer which model ran first.
    pub fn choose_random(&self) -> &str {
        let coin = Uuid::new_v4().as_bytes()[0] & 1;
        &self.models[usize::from(coin)]
    }
}
