//! Advice scoring engine.
//!
//! Given a user and their job-search project, each advice model scores how
//! relevant one piece of advice is, from 0 (not relevant) to 3 (essential),
//! and may gather the evidence needed to personalize it.
//!
//! ```ignore
//! let context = ScoringContext::new(&user, &project, &store, &catalog);
//! let scores = Registry::new().score_project(&context, &["advice-commute", "constant(2)"])?;
//! ```

mod context;
mod error;
pub mod models;
mod registry;
pub mod sweep;

#[cfg(test)]
mod testing;

pub use context::ScoringContext;
pub use error::{RegistryError, ScoringError};
pub use models::{AdviceModel, ExtraData, ScoringModel, MAX_SCORE};
pub use registry::{get_model, list_model_ids, AdviceScore, Registry};
pub use sweep::{ScoreMatrix, SweepViolation};
