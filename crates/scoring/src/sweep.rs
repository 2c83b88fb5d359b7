//! Sanity checks run over every model and a set of personas.
//!
//! A model that gives the same score to everybody, or a persona that gets
//! the same score from every model, usually means a threshold is off.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::context::ScoringContext;
use crate::error::RegistryError;
use crate::registry::{AdviceScore, Registry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepViolation {
    #[error("Model {model_id:?} failed for persona {persona:?}: {error}")]
    ModelFailed {
        model_id: String,
        persona: String,
        error: String,
    },

    #[error("Persona {0:?} has the same score across all models")]
    FlatPersona(String),

    #[error("Model {0:?} has the same score for all personas")]
    InsensitiveModel(String),

    #[error("Personas {first:?} and {second:?} get the same scores from every model")]
    IdenticalPersonas { first: String, second: String },
}

/// Scores of every persona for a fixed list of models.
#[derive(Debug, Clone, Default)]
pub struct ScoreMatrix {
    pub model_ids: Vec<String>,
    /// One row per persona, in `model_ids` order
    pub rows: BTreeMap<String, Vec<AdviceScore>>,
}

impl ScoreMatrix {
    pub fn new(model_ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            model_ids: model_ids.into_iter().collect(),
            rows: BTreeMap::new(),
        }
    }

    /// Score one persona with every model of the matrix.
    pub fn record(
        &mut self,
        persona: impl Into<String>,
        registry: &Registry,
        context: &ScoringContext<'_>,
    ) -> Result<(), RegistryError> {
        let scores = registry.score_project(context, &self.model_ids)?;
        self.rows.insert(persona.into(), scores);
        Ok(())
    }

    fn scores_of(&self, persona: &str) -> Vec<i32> {
        self.rows
            .get(persona)
            .map(|row| row.iter().map(|s| s.score).collect())
            .unwrap_or_default()
    }

    /// Every broken property, empty when the sweep passes.
    pub fn violations(&self, registry: &Registry) -> Result<Vec<SweepViolation>, RegistryError> {
        let mut violations = Vec::new();

        for (persona, row) in &self.rows {
            for score in row {
                if let Some(error) = &score.error {
                    violations.push(SweepViolation::ModelFailed {
                        model_id: score.advice_id.clone(),
                        persona: persona.clone(),
                        error: error.clone(),
                    });
                }
            }
        }

        if self.model_ids.len() > 1 {
            for persona in self.rows.keys() {
                let scores = self.scores_of(persona);
                if scores.windows(2).all(|pair| pair[0] == pair[1]) {
                    violations.push(SweepViolation::FlatPersona(persona.clone()));
                }
            }
        }

        if self.rows.len() > 1 {
            for (index, model_id) in self.model_ids.iter().enumerate() {
                if registry.get_model(model_id)?.is_constant() {
                    continue;
                }
                let mut column = self.rows.values().map(|row| row.get(index).map(|s| s.score));
                let first = column.next().flatten();
                if column.all(|score| score == first) {
                    violations.push(SweepViolation::InsensitiveModel(model_id.clone()));
                }
            }
        }

        let personas: Vec<&String> = self.rows.keys().collect();
        for (i, first) in personas.iter().enumerate() {
            for second in &personas[i + 1..] {
                if self.scores_of(first) == self.scores_of(second) {
                    violations.push(SweepViolation::IdenticalPersonas {
                        first: first.to_string(),
                        second: second.to_string(),
                    });
                }
            }
        }

        Ok(violations)
    }
}
