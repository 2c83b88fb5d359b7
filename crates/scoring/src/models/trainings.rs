//! "Get a training" advice, backed by the external training catalog.

use std::rc::Rc;

use advisor_model::Training;

use super::{AdviceModel, ExtraData};
use crate::context::ScoringContext;
use crate::error::ScoringError;

const LONG_SEARCH_MONTHS: i32 = 3;
const STARTED_SEARCH_MONTHS: i32 = 1;
const MAX_EXTRA_TRAININGS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingModel;

impl TrainingModel {
    fn trainings(context: &ScoringContext<'_>) -> Result<Rc<Vec<Training>>, ScoringError> {
        if context.rome_id().is_empty() {
            return Ok(Rc::default());
        }
        context.trainings()
    }
}

impl AdviceModel for TrainingModel {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        if Self::trainings(context)?.is_empty() {
            return Ok(0);
        }

        let project = context.project();
        let months = project.job_search_length_months;
        Ok(if project.kind.is_open_to_reorientation() || months >= LONG_SEARCH_MONTHS {
            3
        } else if months >= STARTED_SEARCH_MONTHS {
            2
        } else {
            1
        })
    }

    fn compute_extra_data(&self, context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        let trainings: Vec<Training> = Self::trainings(context)?
            .iter()
            .take(MAX_EXTRA_TRAININGS)
            .cloned()
            .collect();
        if trainings.is_empty() {
            return Ok(None);
        }
        Ok(Some(ExtraData::Trainings { trainings }))
    }
}
