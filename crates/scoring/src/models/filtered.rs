//! Advice backed by reference rows restricted with filter predicates.

use advisor_filters::{filters_match, FilterSet};
use advisor_model::{Frustration, JobBoard, NumberOfferEstimate};

use super::{AdviceModel, ExtraData, MAX_SCORE};
use crate::context::ScoringContext;
use crate::error::ScoringError;

/// "Use specialized job boards".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobBoards;

impl JobBoards {
    /// The most specific board applying to the user. Well-known boards are
    /// never proposed; ties go to the first board of the collection.
    fn best_board(context: &ScoringContext<'_>) -> Result<Option<JobBoard>, ScoringError> {
        let boards = context.job_boards()?;
        let mut best: Option<(&JobBoard, usize)> = None;
        for board in boards.iter().filter(|board| !board.is_well_known) {
            let Ok(filters) = FilterSet::parse(&board.filters) else {
                tracing::warn!(title = %board.title, "Ignoring job board with an invalid filter");
                continue;
            };
            if !filters.matches(context) {
                continue;
            }
            if best.map_or(true, |(_, specificity)| filters.len() > specificity) {
                best = Some((board, filters.len()));
            }
        }
        Ok(best.map(|(board, _)| board.clone()))
    }
}

impl AdviceModel for JobBoards {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        if context.has_frustration(Frustration::NoOffers) {
            return Ok(3);
        }
        if context.project().weekly_offers_estimate >= NumberOfferEstimate::DecentAmount {
            return Ok(1);
        }
        Ok(2)
    }

    fn compute_extra_data(&self, context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        Ok(Self::best_board(context)?.map(|board| ExtraData::JobBoard {
            job_board_title: board.title,
            link: board.link,
        }))
    }
}

/// Advice written for a specific job, e.g. how to approach bakers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecificToJob;

impl AdviceModel for SpecificToJob {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let advice = context.specific_to_job_advice()?;
        Ok(if advice.iter().any(|a| filters_match(&a.filters, context)) {
            3
        } else {
            0
        })
    }

    fn compute_extra_data(&self, context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        let advice = context.specific_to_job_advice()?;
        Ok(advice
            .iter()
            .find(|a| filters_match(&a.filters, context))
            .map(|a| ExtraData::SpecificToJob(a.clone())))
    }
}

/// Number of associations from which the user has plenty of choice.
const MANY_ASSOCIATIONS: usize = 4;
const LONG_SEARCH_MONTHS: i32 = 6;
const VERY_LONG_SEARCH_MONTHS: i32 = 12;

/// "Get help from an association".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssociationHelp;

impl AssociationHelp {
    fn association_names(context: &ScoringContext<'_>) -> Result<Vec<String>, ScoringError> {
        Ok(context
            .associations()?
            .iter()
            .filter(|association| filters_match(&association.filters, context))
            .map(|association| association.name.clone())
            .collect())
    }
}

impl AdviceModel for AssociationHelp {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let associations = Self::association_names(context)?.len();
        if associations == 0 {
            return Ok(0);
        }

        let months = context.project().job_search_length_months;
        if context.has_frustration(Frustration::Motivation) || months >= VERY_LONG_SEARCH_MONTHS {
            return Ok(MAX_SCORE);
        }
        if associations >= MANY_ASSOCIATIONS && months >= LONG_SEARCH_MONTHS {
            return Ok(MAX_SCORE);
        }
        Ok(2)
    }

    fn compute_extra_data(&self, context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        let association_names = Self::association_names(context)?;
        if association_names.is_empty() {
            return Ok(None);
        }
        Ok(Some(ExtraData::Associations { association_names }))
    }
}

const VOLUNTEER_LONG_SEARCH_MONTHS: i32 = 9;
const MAX_EXTRA_MISSIONS: usize = 3;

/// "Volunteer while searching".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Volunteer;

impl AdviceModel for Volunteer {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let has_missions = context
            .volunteering_missions()?
            .is_some_and(|missions| !missions.missions.is_empty());
        if !has_missions {
            return Ok(0);
        }
        if context.project().job_search_length_months >= VOLUNTEER_LONG_SEARCH_MONTHS {
            return Ok(2);
        }
        Ok(1)
    }

    fn compute_extra_data(&self, context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        let Some(missions) = context.volunteering_missions()? else {
            return Ok(None);
        };
        let mission_titles: Vec<String> = missions
            .missions
            .iter()
            .take(MAX_EXTRA_MISSIONS)
            .map(|mission| mission.title.clone())
            .collect();
        if mission_titles.is_empty() {
            return Ok(None);
        }
        Ok(Some(ExtraData::Volunteering { mission_titles }))
    }
}
