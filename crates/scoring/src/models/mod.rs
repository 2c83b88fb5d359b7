//! Advice scoring models.
//!
//! Each model is a small strategy scoring how relevant one piece of advice
//! is for a project, on a 0 to 3 scale. Some of them can also gather the
//! evidence needed to personalize the advice.

use advisor_model::{Job, SpecificToJobAdvice, Training};
use serde::Serialize;

use crate::context::ScoringContext;
use crate::error::ScoringError;

mod application_mode;
mod commute;
mod filtered;
mod job_group;
mod thresholds;
mod trainings;

pub use application_mode::{ApplicationModeModel, Coverage, ModeScoreTable};
pub use commute::{CommuteModel, CommutingCity};
pub use filtered::{AssociationHelp, JobBoards, SpecificToJob, Volunteer};
pub use job_group::{BetterJobInGroup, OtherWorkEnvironments};
pub use thresholds::{
    ImproveInterview, ImproveResume, LessApplications, LifeBalance, SeasonalRelocate, Senior,
    SingleJobAdvice, ValidationOfExperience,
};
pub use trainings::TrainingModel;

/// Highest score a model may give.
pub const MAX_SCORE: i32 = 3;

/// A scoring strategy for one kind of advice.
pub trait AdviceModel {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError>;

    /// Evidence used to personalize the advice, when the advice needs any.
    fn compute_extra_data(&self, _context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        Ok(None)
    }
}

/// Evidence attached to an advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "camelCase")]
pub enum ExtraData {
    /// Nearby cities hiring more, best first
    Commute { cities: Vec<CommutingCity> },

    /// A lesser-known job board
    JobBoard {
        job_board_title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },

    /// A job of the same group that is in higher demand
    BetterJob { better_job: Job },

    WorkEnvironments {
        structures: Vec<String>,
        sectors: Vec<String>,
    },

    SpecificToJob(SpecificToJobAdvice),

    Associations { association_names: Vec<String> },

    Volunteering { mission_titles: Vec<String> },

    Trainings { trainings: Vec<Training> },
}

/// Model used for advice nobody wrote a model for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeutralModel;

impl AdviceModel for NeutralModel {
    fn score(&self, _context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        Ok(0)
    }
}

/// Always the same score, whatever the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantScore {
    pub score: i32,
}

impl AdviceModel for ConstantScore {
    fn score(&self, _context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        Ok(self.score)
    }
}

/// Every model the registry can hand out.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringModel {
    Neutral(NeutralModel),
    Constant(ConstantScore),
    ApplicationMode(ApplicationModeModel),
    Commute(CommuteModel),
    BetterJobInGroup(BetterJobInGroup),
    OtherWorkEnvironments(OtherWorkEnvironments),
    JobBoards(JobBoards),
    SpecificToJob(SpecificToJob),
    AssociationHelp(AssociationHelp),
    Volunteer(Volunteer),
    Training(TrainingModel),
    Senior(Senior),
    LifeBalance(LifeBalance),
    ValidationOfExperience(ValidationOfExperience),
    LessApplications(LessApplications),
    ImproveInterview(ImproveInterview),
    ImproveResume(ImproveResume),
    SeasonalRelocate(SeasonalRelocate),
    SingleJob(SingleJobAdvice),
}

impl ScoringModel {
    fn strategy(&self) -> &dyn AdviceModel {
        match self {
            Self::Neutral(model) => model,
            Self::Constant(model) => model,
            Self::ApplicationMode(model) => model,
            Self::Commute(model) => model,
            Self::BetterJobInGroup(model) => model,
            Self::OtherWorkEnvironments(model) => model,
            Self::JobBoards(model) => model,
            Self::SpecificToJob(model) => model,
            Self::AssociationHelp(model) => model,
            Self::Volunteer(model) => model,
            Self::Training(model) => model,
            Self::Senior(model) => model,
            Self::LifeBalance(model) => model,
            Self::ValidationOfExperience(model) => model,
            Self::LessApplications(model) => model,
            Self::ImproveInterview(model) => model,
            Self::ImproveResume(model) => model,
            Self::SeasonalRelocate(model) => model,
            Self::SingleJob(model) => model,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

impl AdviceModel for ScoringModel {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let score = self.strategy().score(context)?;
        tracing::debug!(model = ?self, score, "Scored advice");
        Ok(score)
    }

    fn compute_extra_data(&self, context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        self.strategy().compute_extra_data(context)
    }
}
