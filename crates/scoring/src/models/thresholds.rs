//! Models comparing a few profile fields against fixed cutoffs.

use advisor_model::{
    AreaType, DegreeLevel, EmploymentType, FamilySituation, Frustration, NumberOfferEstimate, Seniority,
    TrainingFulfillment,
};

use super::AdviceModel;
use crate::context::ScoringContext;
use crate::error::ScoringError;

/// Search lengths are clamped to this window before being compared to the
/// number of interviews.
const MIN_SEARCH_MONTHS: i32 = 1;
const MAX_SEARCH_MONTHS: i32 = 6;

fn clamped_search_months(context: &ScoringContext<'_>) -> i32 {
    context
        .project()
        .job_search_length_months
        .clamp(MIN_SEARCH_MONTHS, MAX_SEARCH_MONTHS)
}

const SENIOR_AGE: i32 = 50;
const NEAR_SENIOR_AGE: i32 = 40;

/// "Deal with age discrimination".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Senior;

impl AdviceModel for Senior {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let age = context.user_age();
        Ok(if age >= SENIOR_AGE {
            2
        } else if age >= NEAR_SENIOR_AGE {
            if context.has_frustration(Frustration::AgeDiscrimination) {
                2
            } else {
                1
            }
        } else {
            0
        })
    }
}

const LIFE_BALANCE_MONTHS: i32 = 4;

/// "Take care of yourself" once the search gets long.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifeBalance;

impl AdviceModel for LifeBalance {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        Ok(if context.project().job_search_length_months >= LIFE_BALANCE_MONTHS {
            1
        } else {
            0
        })
    }
}

/// "Get your experience validated as a diploma" (VAE).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOfExperience;

impl AdviceModel for ValidationOfExperience {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let project = context.project();
        let fulfillment = project.training_fulfillment_estimate;
        if fulfillment == TrainingFulfillment::EnoughDiplomas {
            return Ok(0);
        }

        let enough_experience = fulfillment == TrainingFulfillment::EnoughExperience;
        if project.seniority == Seniority::Expert && enough_experience {
            return Ok(3);
        }
        if project.seniority >= Seniority::Senior && context.has_frustration(Frustration::Training) {
            return Ok(if enough_experience { 3 } else { 2 });
        }
        if project.seniority == Seniority::Senior && enough_experience {
            return Ok(2);
        }
        Ok(0)
    }
}

/// "Send fewer, better applications".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LessApplications;

impl AdviceModel for LessApplications {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        Ok(
            if context.project().weekly_applications_estimate >= NumberOfferEstimate::DecentAmount {
                3
            } else {
                0
            },
        )
    }
}

/// "Prepare your interviews": many interviews but no job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImproveInterview;

impl AdviceModel for ImproveInterview {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let project = context.project();
        if !project.has_applied() {
            return Ok(0);
        }

        let months = clamped_search_months(context);
        let interviews = project.total_interview_count;
        Ok(if interviews > 3 * months {
            3
        } else if interviews >= 2 * months {
            1
        } else {
            0
        })
    }
}

/// Markets with at most this many offers per 10 candidates are very tight.
const TIGHT_MARKET_OFFERS_PER_10: f64 = 1.0;

/// "Improve your resume": applications do not turn into interviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImproveResume;

impl ImproveResume {
    fn is_tight_market(context: &ScoringContext<'_>) -> Result<bool, ScoringError> {
        let offers_per_10 = context
            .local_diagnosis()?
            .and_then(|diagnosis| diagnosis.imt.as_ref()?.yearly_avg_offers_per_10_candidates);
        Ok(offers_per_10.is_some_and(|offers| offers <= TIGHT_MARKET_OFFERS_PER_10))
    }
}

impl AdviceModel for ImproveResume {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let project = context.project();
        if !project.has_applied() || project.total_interview_count >= clamped_search_months(context) {
            return Ok(0);
        }

        let score = match project.weekly_applications_estimate {
            NumberOfferEstimate::DecentAmount | NumberOfferEstimate::ALot => 3,
            NumberOfferEstimate::SomeAmount => 2,
            NumberOfferEstimate::LessThan2 | NumberOfferEstimate::Unknown => 1,
        };
        if Self::is_tight_market(context)? {
            return Ok((score - 1).max(0));
        }
        Ok(score)
    }
}

const YOUNG_AGE: i32 = 23;
const YOUNGISH_AGE: i32 = 35;

/// "Take a seasonal job elsewhere".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonalRelocate;

impl SeasonalRelocate {
    fn is_eligible(context: &ScoringContext<'_>) -> bool {
        let user = context.user();
        let project = context.project();
        let permanent_only = project.employment_types == [EmploymentType::Cdi];
        user.family_situation == FamilySituation::Single
            && user.highest_degree <= DegreeLevel::BtsDutDeug
            && project.mobility.area_type >= AreaType::Country
            && !permanent_only
    }
}

impl AdviceModel for SeasonalRelocate {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        if !Self::is_eligible(context) {
            return Ok(0);
        }
        let age = context.user_age();
        Ok(if age <= YOUNG_AGE {
            3
        } else if age <= YOUNGISH_AGE {
            2
        } else {
            0
        })
    }
}

/// Advice written for one job group, except for one of its jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleJobAdvice {
    pub rome_id: &'static str,
    pub excluded_job: &'static str,
}

impl SingleJobAdvice {
    /// Bakers, but not chief bakers.
    pub fn wow_baker() -> Self {
        Self {
            rome_id: "D1102",
            excluded_job: "12006",
        }
    }
}

impl AdviceModel for SingleJobAdvice {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        Ok(if context.rome_id() == self.rome_id && context.job_code() != self.excluded_job {
            3
        } else {
            0
        })
    }
}
