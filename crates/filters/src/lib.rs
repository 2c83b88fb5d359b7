//! Filter predicates attached to reference rows.
//!
//! Rows such as job boards or associations carry short textual conditions
//! (`for-departement(69)`, `not-for-job(12006)`) restricting who they apply
//! to. They are parsed into typed `Predicate`s and combined with AND.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Malformed filter: {0:?}")]
    Malformed(String),
    #[error("Unknown filter: {0:?}")]
    UnknownFilter(String),
    #[error("Filter has no argument: {0:?}")]
    MissingArgument(String),
}

/// What a predicate can be evaluated against.
pub trait FilterTarget {
    fn departement_id(&self) -> &str;

    /// ROME id of the targeted job group
    fn rome_id(&self) -> &str;

    /// OGR code of the targeted job
    fn job_code(&self) -> &str;

    fn has_feature(&self, feature: &str) -> bool;
}

/// A single parsed filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    ForDepartement(Vec<String>),
    NotForDepartement(Vec<String>),
    /// Matches job groups whose ROME id starts with any of the prefixes
    ForJobGroup(Vec<String>),
    NotForJobGroup(Vec<String>),
    ForJob(Vec<String>),
    NotForJob(Vec<String>),
    ForFeature(String),
}

impl FromStr for Predicate {
    type Err = FilterError;

    fn from_str(filter: &str) -> Result<Self, FilterError> {
        let filter = filter.trim();
        let (name, rest) = filter
            .split_once('(')
            .ok_or_else(|| FilterError::Malformed(filter.to_string()))?;
        let args = rest
            .strip_suffix(')')
            .ok_or_else(|| FilterError::Malformed(filter.to_string()))?;
        let args: Vec<String> = args
            .split(',')
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(str::to_string)
            .collect();
        if args.is_empty() {
            return Err(FilterError::MissingArgument(filter.to_string()));
        }

        let predicate = match name.trim() {
            "for-departement" => Self::ForDepartement(args),
            "not-for-departement" => Self::NotForDepartement(args),
            "for-job-group" => Self::ForJobGroup(args),
            "not-for-job-group" => Self::NotForJobGroup(args),
            "for-job" => Self::ForJob(args),
            "not-for-job" => Self::NotForJob(args),
            "for-feature" => match args.as_slice() {
                [feature] => Self::ForFeature(feature.clone()),
                _ => return Err(FilterError::Malformed(filter.to_string())),
            },
            _ => return Err(FilterError::UnknownFilter(filter.to_string())),
        };
        Ok(predicate)
    }
}

impl Predicate {
    pub fn matches(&self, target: &impl FilterTarget) -> bool {
        match self {
            Self::ForDepartement(ids) => contains(ids, target.departement_id()),
            Self::NotForDepartement(ids) => !contains(ids, target.departement_id()),
            Self::ForJobGroup(prefixes) => has_prefix(prefixes, target.rome_id()),
            Self::NotForJobGroup(prefixes) => !has_prefix(prefixes, target.rome_id()),
            Self::ForJob(codes) => contains(codes, target.job_code()),
            Self::NotForJob(codes) => !contains(codes, target.job_code()),
            Self::ForFeature(feature) => target.has_feature(feature),
        }
    }
}

fn contains(values: &[String], value: &str) -> bool {
    !value.is_empty() && values.iter().any(|v| v == value)
}

fn has_prefix(prefixes: &[String], value: &str) -> bool {
    !value.is_empty() && prefixes.iter().any(|p| value.starts_with(p.as_str()))
}

/// All the filters of one row, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn parse<S: AsRef<str>>(filters: &[S]) -> Result<Self, FilterError> {
        let predicates = filters
            .iter()
            .map(|f| f.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { predicates })
    }

    /// Number of conditions, used to prefer the most specific rows.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, target: &impl FilterTarget) -> bool {
        self.predicates.iter().all(|p| p.matches(target))
    }
}

/// Whether a row with these raw filters applies to the target.
///
/// A row whose filters cannot be parsed never applies.
pub fn filters_match<S: AsRef<str>>(filters: &[S], target: &impl FilterTarget) -> bool {
    match FilterSet::parse(filters) {
        Ok(set) => set.matches(target),
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring row with an invalid filter");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Target {
        departement: &'static str,
        rome: &'static str,
        job: &'static str,
    }

    impl FilterTarget for Target {
        fn departement_id(&self) -> &str {
            self.departement
        }

        fn rome_id(&self) -> &str {
            self.rome
        }

        fn job_code(&self) -> &str {
            self.job
        }

        fn has_feature(&self, feature: &str) -> bool {
            feature == "alpha"
        }
    }

    const BAKER_IN_LYON: Target = Target {
        departement: "69",
        rome: "D1102",
        job: "10868",
    };

    #[test]
    fn test_parse() {
        assert_eq!(
            "for-departement(69, 31)".parse::<Predicate>(),
            Ok(Predicate::ForDepartement(vec!["69".into(), "31".into()]))
        );
        assert_eq!(
            "not-for-job(12006)".parse::<Predicate>(),
            Ok(Predicate::NotForJob(vec!["12006".into()]))
        );
        assert_eq!(
            "for-feature(alpha)".parse::<Predicate>(),
            Ok(Predicate::ForFeature("alpha".into()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "for-departement".parse::<Predicate>(),
            Err(FilterError::Malformed(_))
        ));
        assert!(matches!(
            "for-departement(69".parse::<Predicate>(),
            Err(FilterError::Malformed(_))
        ));
        assert!(matches!(
            "for-departement()".parse::<Predicate>(),
            Err(FilterError::MissingArgument(_))
        ));
        assert!(matches!(
            "for-planet(mars)".parse::<Predicate>(),
            Err(FilterError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_departement() {
        assert!(filters_match(&["for-departement(69)"], &BAKER_IN_LYON));
        assert!(!filters_match(&["for-departement(31)"], &BAKER_IN_LYON));
        assert!(filters_match(&["not-for-departement(31,75)"], &BAKER_IN_LYON));
    }

    #[test]
    fn test_job_group_prefix() {
        assert!(filters_match(&["for-job-group(D11)"], &BAKER_IN_LYON));
        assert!(filters_match(&["for-job-group(M16,D1102)"], &BAKER_IN_LYON));
        assert!(!filters_match(&["not-for-job-group(D)"], &BAKER_IN_LYON));
    }

    #[test]
    fn test_and_composition() {
        let filters = ["for-job-group(D1102)", "not-for-job(12006)"];
        assert!(filters_match(&filters, &BAKER_IN_LYON));

        let chief = Target {
            job: "12006",
            ..BAKER_IN_LYON
        };
        assert!(!filters_match(&filters, &chief));
    }

    #[test]
    fn test_no_filters_always_match() {
        let none: [&str; 0] = [];
        assert!(filters_match(&none, &BAKER_IN_LYON));
        assert_eq!(FilterSet::parse(&none).unwrap().len(), 0);
    }

    #[test]
    fn test_invalid_filter_never_matches() {
        assert!(!filters_match(&["for-departement(69)", "bogus"], &BAKER_IN_LYON));
    }

    #[test]
    fn test_empty_target_fields() {
        let unknown = Target {
            departement: "",
            rome: "",
            job: "",
        };
        assert!(!filters_match(&["for-departement(69)"], &unknown));
        assert!(filters_match(&["not-for-job(12006)"], &unknown));
        assert!(filters_match(&["for-feature(alpha)"], &unknown));
        assert!(!filters_match(&["for-feature(beta)"], &unknown));
    }
}
