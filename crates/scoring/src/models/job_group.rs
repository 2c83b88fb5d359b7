//! Advice built on what we know of the targeted job group.

use std::cmp::Ordering;

use advisor_model::{Job, JobGroupInfo, JobRequirement, ProjectKind};

use super::{AdviceModel, ExtraData};
use crate::context::ScoringContext;
use crate::error::ScoringError;

/// Percentage points a job must lead by to be worth a reorientation.
pub const MATERIAL_MARGIN: f64 = 10.0;

/// Searching for a job for at most this long is a short search.
const BRIEF_SEARCH_MONTHS: i32 = 3;

fn weight(requirement: &JobRequirement) -> f64 {
    requirement.percent_suggested.unwrap_or(0.0)
}

/// "Try another job of the same group".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BetterJobInGroup;

impl BetterJobInGroup {
    /// The most suggested job of the group and how far ahead of the
    /// targeted job it is. `None` when the user already targets it.
    fn better_job(info: &JobGroupInfo, target_code: &str) -> Option<(Job, f64)> {
        let specific_jobs = &info.requirements.as_ref()?.specific_jobs;
        let best = specific_jobs
            .iter()
            .max_by(|a, b| weight(a).partial_cmp(&weight(b)).unwrap_or(Ordering::Equal))?;
        if weight(best) <= 0.0 || best.code_ogr == target_code {
            return None;
        }

        let current = specific_jobs
            .iter()
            .find(|job| job.code_ogr == target_code)
            .map_or(0.0, weight);
        let lead = weight(best) - current;
        if lead <= 0.0 {
            return None;
        }

        let name = best
            .name
            .clone()
            .or_else(|| {
                info.jobs
                    .iter()
                    .find(|job| job.code_ogr == best.code_ogr)
                    .map(|job| job.name.clone())
            })
            .unwrap_or_default();
        Some((
            Job {
                code_ogr: best.code_ogr.clone(),
                name,
            },
            lead,
        ))
    }
}

impl AdviceModel for BetterJobInGroup {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let Some(info) = context.job_group_info()? else {
            return Ok(0);
        };
        let Some((_, lead)) = Self::better_job(&info, context.job_code()) else {
            return Ok(0);
        };

        let project = context.project();
        if project.kind.is_open_to_reorientation() && lead >= MATERIAL_MARGIN {
            return Ok(3);
        }
        if project.kind == ProjectKind::FindAFirstJob || project.job_search_length_months <= BRIEF_SEARCH_MONTHS {
            return Ok(2);
        }
        Ok(1)
    }

    fn compute_extra_data(&self, context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        let Some(info) = context.job_group_info()? else {
            return Ok(None);
        };
        Ok(Self::better_job(&info, context.job_code()).map(|(better_job, _)| ExtraData::BetterJob { better_job }))
    }
}

/// "Other work environments": the job exists in many kinds of structures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OtherWorkEnvironments;

impl AdviceModel for OtherWorkEnvironments {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let keywords = context
            .job_group_info()?
            .and_then(|info| info.work_environment_keywords.clone());
        Ok(match keywords {
            Some(keywords) if keywords.structures.len() > 1 || keywords.sectors.len() > 1 => 2,
            _ => 0,
        })
    }

    fn compute_extra_data(&self, context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        Ok(context
            .job_group_info()?
            .and_then(|info| info.work_environment_keywords.clone())
            .map(|keywords| ExtraData::WorkEnvironments {
                structures: keywords.structures,
                sectors: keywords.sectors,
            }))
    }
}
