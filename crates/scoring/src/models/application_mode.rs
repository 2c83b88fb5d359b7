//! Advice pushing one hiring channel when it matters in the user's market.

use advisor_features::ModeRanking;
use advisor_model::ApplicationMode;

use super::{AdviceModel, MAX_SCORE};
use crate::context::ScoringContext;
use crate::error::ScoringError;

/// Network estimate from which we consider the user already well connected.
const GOOD_NETWORK_ESTIMATE: i32 = 2;

/// How the per sub-market ranks of a channel are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// One sub-market ranking the channel is enough
    AnySubMarket,
    /// Every sub-market has to rank the channel
    EverySubMarket,
}

/// Scores given depending on the rank of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeScoreTable {
    pub coverage: Coverage,
    pub first: i32,
    pub second: i32,
    pub other: i32,
    /// Score when the job group has no application mode data
    pub no_data: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationModeModel {
    pub mode: ApplicationMode,
    pub table: ModeScoreTable,
    /// Score forced when the user already has a good network
    pub good_network_score: Option<i32>,
    /// Added when the user has a weak network
    pub weak_network_bonus: i32,
}

impl ApplicationModeModel {
    /// "Improve your network": contacts hire everywhere in this job group.
    pub fn improve_network() -> Self {
        Self {
            mode: ApplicationMode::PersonalOrProfessionalContacts,
            table: ModeScoreTable {
                coverage: Coverage::EverySubMarket,
                first: 3,
                second: 2,
                other: 1,
                no_data: 1,
            },
            good_network_score: Some(0),
            weak_network_bonus: 0,
        }
    }

    /// "Send spontaneous applications".
    pub fn spontaneous_application() -> Self {
        Self {
            mode: ApplicationMode::SpontaneousApplication,
            table: ModeScoreTable {
                coverage: Coverage::AnySubMarket,
                first: 3,
                second: 2,
                other: 0,
                no_data: 0,
            },
            good_network_score: None,
            weak_network_bonus: 0,
        }
    }

    /// "Go to hiring events" to meet people when contacts matter.
    pub fn events() -> Self {
        Self {
            mode: ApplicationMode::PersonalOrProfessionalContacts,
            table: ModeScoreTable {
                coverage: Coverage::AnySubMarket,
                first: 2,
                second: 1,
                other: 0,
                no_data: 0,
            },
            good_network_score: None,
            weak_network_bonus: 1,
        }
    }

    fn rank_score(&self, ranking: &ModeRanking) -> i32 {
        if ranking.is_empty() {
            return self.table.no_data;
        }
        let in_top = |n| match self.table.coverage {
            Coverage::AnySubMarket => ranking.in_top_of_any(n),
            Coverage::EverySubMarket => ranking.in_top_of_all(n),
        };
        if in_top(1) {
            self.table.first
        } else if in_top(2) {
            self.table.second
        } else {
            self.table.other
        }
    }
}

impl AdviceModel for ApplicationModeModel {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let has_good_network = context.project().network_estimate >= GOOD_NETWORK_ESTIMATE;
        if let (true, Some(score)) = (has_good_network, self.good_network_score) {
            return Ok(score);
        }

        let ranking = context
            .job_group_info()?
            .map(|info| ModeRanking::compute(&info.application_modes, self.mode))
            .unwrap_or_default();

        let mut score = self.rank_score(&ranking);
        if !has_good_network {
            score += self.weak_network_bonus;
        }
        Ok(score.min(MAX_SCORE))
    }
}
