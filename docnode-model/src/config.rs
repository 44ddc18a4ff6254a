use serde::{Deserialize, Serialize};

/// How strictly entity construction and writes are checked against the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Unknown initial keys are dropped with a warning; values are not type-checked.
    #[default]
    Lenient,
    /// Unknown initial keys and values of the wrong JSON kind are rejected.
    Strict,
}

/// Entity factory settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryConfig {
    #[serde(default)]
    pub validation: Validation,
}

impl FactoryConfig {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            validation: Validation::Strict,
        }
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.validation == Validation::Strict
    }
}
