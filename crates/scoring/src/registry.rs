//! Advice identifier to model lookup, and scoring of a whole project.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::Serialize;

use crate::context::ScoringContext;
use crate::error::RegistryError;
use crate::models::{
    AdviceModel, ApplicationModeModel, AssociationHelp, BetterJobInGroup, CommuteModel, ConstantScore,
    ImproveInterview, ImproveResume, JobBoards, LessApplications, LifeBalance, NeutralModel,
    OtherWorkEnvironments, ScoringModel, SeasonalRelocate, Senior, SingleJobAdvice, SpecificToJob,
    TrainingModel, ValidationOfExperience, Volunteer, MAX_SCORE,
};

/// Name of the only parameterized model.
const CONSTANT_MODEL: &str = "constant";

/// Constant model registered so that sweeps exercise the parameterized path.
const REGISTERED_CONSTANT: &str = "constant(2)";

/// Score of one advice for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceScore {
    pub advice_id: String,

    /// Between 0 and 3, 0 when the model failed
    pub score: i32,

    /// Why the model failed, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// All known advice models, keyed by advice id.
#[derive(Debug, Clone)]
pub struct Registry {
    models: BTreeMap<&'static str, ScoringModel>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let models = BTreeMap::from([
            ("advice-improve-network", ScoringModel::ApplicationMode(ApplicationModeModel::improve_network())),
            (
                "advice-spontaneous-application",
                ScoringModel::ApplicationMode(ApplicationModeModel::spontaneous_application()),
            ),
            ("advice-event", ScoringModel::ApplicationMode(ApplicationModeModel::events())),
            ("advice-commute", ScoringModel::Commute(CommuteModel)),
            ("advice-better-job-in-group", ScoringModel::BetterJobInGroup(BetterJobInGroup)),
            ("advice-other-work-env", ScoringModel::OtherWorkEnvironments(OtherWorkEnvironments)),
            ("advice-job-boards", ScoringModel::JobBoards(JobBoards)),
            ("advice-specific-to-job", ScoringModel::SpecificToJob(SpecificToJob)),
            ("advice-association-help", ScoringModel::AssociationHelp(AssociationHelp)),
            ("advice-volunteer", ScoringModel::Volunteer(Volunteer)),
            ("advice-training", ScoringModel::Training(TrainingModel)),
            ("advice-senior", ScoringModel::Senior(Senior)),
            ("advice-life-balance", ScoringModel::LifeBalance(LifeBalance)),
            ("advice-vae", ScoringModel::ValidationOfExperience(ValidationOfExperience)),
            ("advice-less-applications", ScoringModel::LessApplications(LessApplications)),
            ("advice-improve-interview", ScoringModel::ImproveInterview(ImproveInterview)),
            ("advice-improve-resume", ScoringModel::ImproveResume(ImproveResume)),
            ("advice-seasonal-relocate", ScoringModel::SeasonalRelocate(SeasonalRelocate)),
            ("advice-wow-baker", ScoringModel::SingleJob(SingleJobAdvice::wow_baker())),
            (REGISTERED_CONSTANT, ScoringModel::Constant(ConstantScore { score: 2 })),
        ]);
        Self { models }
    }

    /// Model for an advice id.
    ///
    /// Unknown ids get the neutral model. Only a malformed parameterized id
    /// such as `constant(two)` is an error.
    pub fn get_model(&self, id: &str) -> Result<ScoringModel, RegistryError> {
        if let Some(model) = self.models.get(id) {
            return Ok(model.clone());
        }
        if let Some(model) = parse_parameterized(id)? {
            return Ok(model);
        }

        tracing::debug!(advice_id = id, "No model for advice, using the neutral one");
        Ok(ScoringModel::Neutral(NeutralModel))
    }

    pub fn list_model_ids(&self) -> BTreeSet<String> {
        self.models.keys().map(|id| id.to_string()).collect()
    }

    /// Score each advice for the project in `context`.
    ///
    /// A failing model gets a 0 score along with its error. Ids are all
    /// resolved before any model runs, so a malformed id fails the whole call.
    pub fn score_project<S: AsRef<str>>(
        &self,
        context: &ScoringContext<'_>,
        advice_ids: &[S],
    ) -> Result<Vec<AdviceScore>, RegistryError> {
        let models = advice_ids
            .iter()
            .map(|id| Ok((id.as_ref(), self.get_model(id.as_ref())?)))
            .collect::<Result<Vec<_>, RegistryError>>()?;

        Ok(models
            .into_iter()
            .map(|(advice_id, model)| match model.score(context) {
                Ok(score) => AdviceScore {
                    advice_id: advice_id.to_string(),
                    score: score.clamp(0, MAX_SCORE),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(advice_id, error = %e, "Advice model failed");
                    AdviceScore {
                        advice_id: advice_id.to_string(),
                        score: 0,
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect())
    }
}

/// Parse ids of the form `name(argument)`.
///
/// Returns `None` for ids without parentheses and for parameterized names
/// that no model handles.
fn parse_parameterized(id: &str) -> Result<Option<ScoringModel>, RegistryError> {
    let Some((name, rest)) = id.split_once('(') else {
        return Ok(None);
    };
    let Some(argument) = rest.strip_suffix(')') else {
        return Err(RegistryError::MalformedIdentifier(id.to_string()));
    };
    if name != CONSTANT_MODEL {
        return Ok(None);
    }

    let score: i32 = argument
        .trim()
        .parse()
        .map_err(|_| RegistryError::InvalidArgument {
            name: name.to_string(),
            argument: argument.to_string(),
        })?;
    if !(0..=MAX_SCORE).contains(&score) {
        return Err(RegistryError::ScoreOutOfRange(score));
    }
    Ok(Some(ScoringModel::Constant(ConstantScore { score })))
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::new)
}

/// Model for an advice id, from the process-wide registry.
pub fn get_model(id: &str) -> Result<ScoringModel, RegistryError> {
    registry().get_model(id)
}

/// Ids of every registered model.
pub fn list_model_ids() -> BTreeSet<String> {
    registry().list_model_ids()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{personas, reference_catalog, reference_store, Persona};
    use advisor_backend_catalog::StaticCatalog;
    use advisor_store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constant_model() {
        let store = MemoryStore::new();
        let catalog = StaticCatalog::empty();
        for persona in personas().into_values() {
            let context = persona.context(&store, &catalog);
            assert_eq!(get_model("constant(2)").unwrap().score(&context).unwrap(), 2);
            assert_eq!(get_model("constant(0)").unwrap().score(&context).unwrap(), 0);
        }
        assert!(get_model("constant( 3 )").unwrap().is_constant());
    }

    #[test]
    fn test_malformed_constant() {
        assert_eq!(
            get_model("constant(two)").unwrap_err(),
            RegistryError::InvalidArgument {
                name: "constant".to_string(),
                argument: "two".to_string(),
            }
        );
        assert_eq!(get_model("constant(4)").unwrap_err(), RegistryError::ScoreOutOfRange(4));
        assert_eq!(get_model("constant(-1)").unwrap_err(), RegistryError::ScoreOutOfRange(-1));
        assert_eq!(
            get_model("constant(2").unwrap_err(),
            RegistryError::MalformedIdentifier("constant(2".to_string())
        );
    }

    #[test]
    fn test_unknown_model_is_neutral() {
        let store = MemoryStore::new();
        let catalog = StaticCatalog::empty();
        let persona = Persona::default();
        let context = persona.context(&store, &catalog);

        for id in ["advice-does-not-exist", "", "other-model(1)"] {
            let model = get_model(id).unwrap();
            assert_eq!(model, ScoringModel::Neutral(NeutralModel));
            assert_eq!(model.score(&context).unwrap(), 0);
            assert_eq!(model.compute_extra_data(&context).unwrap(), None);
        }
    }

    #[test]
    fn test_list_model_ids() {
        let ids = list_model_ids();
        assert_eq!(ids.len(), 20);
        assert!(ids.contains("advice-improve-network"));
        assert!(ids.contains("constant(2)"));
        for id in &ids {
            assert!(get_model(id).is_ok(), "{}", id);
        }
    }

    #[test]
    fn test_score_project() {
        let store = MemoryStore::new();
        let catalog = StaticCatalog::empty();
        let persona = Persona::default();
        let context = persona.context(&store, &catalog);

        let scores = Registry::new()
            .score_project(&context, &["constant(3)", "advice-unknown", "advice-life-balance"])
            .unwrap();
        assert_eq!(
            scores,
            vec![
                AdviceScore {
                    advice_id: "constant(3)".to_string(),
                    score: 3,
                    error: None,
                },
                AdviceScore {
                    advice_id: "advice-unknown".to_string(),
                    score: 0,
                    error: None,
                },
                AdviceScore {
                    advice_id: "advice-life-balance".to_string(),
                    score: 1,
                    error: None,
                },
            ]
        );
    }

    #[test]
    fn test_score_project_malformed_id() {
        let store = MemoryStore::new();
        let catalog = StaticCatalog::empty();
        let persona = Persona::default();
        let context = persona.context(&store, &catalog);

        let result = Registry::new().score_project(&context, &["advice-senior", "constant(9)"]);
        assert_eq!(result, Err(RegistryError::ScoreOutOfRange(9)));
    }

    #[test]
    fn test_score_project_survives_failing_model() {
        let mut store = MemoryStore::new();
        store.insert_one(
            advisor_store::Collection::JobGroupInfo,
            serde_json::json!({"_id": "M1607", "jobs": "not a list"}),
        );
        let catalog = StaticCatalog::empty();
        let persona = Persona::default();
        let context = persona.context(&store, &catalog);

        let scores = Registry::new()
            .score_project(&context, &["advice-other-work-env", "constant(1)"])
            .unwrap();
        assert_eq!(scores[0].score, 0);
        assert!(scores[0].error.as_deref().is_some_and(|e| e.contains("job_group_info")));
        assert_eq!(scores[1].score, 1);
    }

    #[test]
    fn test_scores_are_stable() {
        let store = reference_store();
        let catalog = reference_catalog();
        for persona in personas().into_values() {
            let context = persona.context(&store, &catalog);
            for id in list_model_ids() {
                let model = get_model(&id).unwrap();
                let first = model.score(&context).unwrap();
                assert_eq!(model.score(&context).unwrap(), first, "{}", id);
                assert_eq!(
                    model.compute_extra_data(&context).unwrap(),
                    model.compute_extra_data(&context).unwrap(),
                    "{}",
                    id
                );
            }
        }
    }
}
