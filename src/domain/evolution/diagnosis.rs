//! Adequacy diagnosis of one iteration's dominant trade-off.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// What a diagnosis flag blames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemSubject {
    Drivers,
    TradeoffRationale,
    Scenarios,
}

impl ProblemSubject {
    pub const ALL: [ProblemSubject; 3] = [
        ProblemSubject::Drivers,
        ProblemSubject::TradeoffRationale,
        ProblemSubject::Scenarios,
    ];

    /// Name used in feedback text.
    pub fn human_readable(&self) -> &'static str {
        match self {
            ProblemSubject::Drivers => "driver selection",
            ProblemSubject::TradeoffRationale => "tradeoff rationale",
            ProblemSubject::Scenarios => "scenario evidence",
        }
    }
}

impl fmt::Display for ProblemSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.human_readable())
    }
}

/// Three-flag adequacy diagnosis plus free-text explanations.
///
/// Flags read `YES`/`NO` (any case) or booleans and are written back as
/// `YES`/`NO`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    #[serde(
        rename = "tradeoff-id",
        default,
        deserialize_with = "deserialize_tradeoff_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub tradeoff_id: Option<String>,
    #[serde(default, with = "yes_no")]
    pub is_drivers_problem: bool,
    #[serde(default, with = "yes_no")]
    pub is_tradeoff_rationale_problem: bool,
    #[serde(default, with = "yes_no")]
    pub is_scenarios_problem: bool,
    #[serde(default)]
    pub drivers: String,
    #[serde(default)]
    pub tradeoff_rationale: String,
    #[serde(default)]
    pub scenarios: String,
}

impl Diagnosis {
    /// A diagnosis reporting no problems.
    pub fn adequate() -> Self {
        Self::default()
    }

    /// Sets one flag with its explanation.
    pub fn flag(mut self, subject: ProblemSubject, explanation: impl Into<String>) -> Self {
        let explanation = explanation.into();
        match subject {
            ProblemSubject::Drivers => {
                self.is_drivers_problem = true;
                self.drivers = explanation;
            }
            ProblemSubject::TradeoffRationale => {
                self.is_tradeoff_rationale_problem = true;
                self.tradeoff_rationale = explanation;
            }
            ProblemSubject::Scenarios => {
                self.is_scenarios_problem = true;
                self.scenarios = explanation;
            }
        }
        self
    }

    pub fn for_tradeoff(mut self, tradeoff_id: impl Into<String>) -> Self {
        self.tradeoff_id = Some(tradeoff_id.into());
        self
    }

    pub fn is_flagged(&self, subject: ProblemSubject) -> bool {
        match subject {
            ProblemSubject::Drivers => self.is_drivers_problem,
            ProblemSubject::TradeoffRationale => self.is_tradeoff_rationale_problem,
            ProblemSubject::Scenarios => self.is_scenarios_problem,
        }
    }

    pub fn explanation(&self, subject: ProblemSubject) -> &str {
        match subject {
            ProblemSubject::Drivers => &self.drivers,
            ProblemSubject::TradeoffRationale => &self.tradeoff_rationale,
            ProblemSubject::Scenarios => &self.scenarios,
        }
    }

    /// True when all three flags are false.
    pub fn is_adequate(&self) -> bool {
        ProblemSubject::ALL.iter().all(|s| !self.is_flagged(*s))
    }

    pub fn flagged_subjects(&self) -> Vec<ProblemSubject> {
        ProblemSubject::ALL
            .into_iter()
            .filter(|s| self.is_flagged(*s))
            .collect()
    }

    /// Checks flags against explanations and the trade-off reference.
    ///
    /// `known_tradeoffs` are the record ids of the current iteration.
    pub fn check_consistency(&self, known_tradeoffs: &[u32]) -> Vec<DiagnosisWarning> {
        let mut warnings: Vec<_> = self
            .flagged_subjects()
            .into_iter()
            .filter(|subject| self.explanation(*subject).trim().is_empty())
            .map(|subject| DiagnosisWarning::MissingExplanation { subject })
            .collect();

        if let Some(tradeoff_id) = &self.tradeoff_id {
            let known = tradeoff_id
                .trim()
                .parse::<u32>()
                .map(|id| known_tradeoffs.contains(&id))
                .unwrap_or(false);
            if !known {
                warnings.push(DiagnosisWarning::UnknownTradeoff {
                    tradeoff_id: tradeoff_id.clone(),
                });
            }
        }

        warnings
    }
}

/// An inconsistency in what the collaborators returned. Reported, never
/// acted upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosisWarning {
    MissingExplanation { subject: ProblemSubject },
    UnknownTradeoff { tradeoff_id: String },
    /// A rationale statement that does not read `X vs Y`.
    MalformedTradeoff { tradeoff_id: u32, statement: String },
}

impl fmt::Display for DiagnosisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosisWarning::MissingExplanation { subject } => {
                write!(f, "{} flagged without an explanation", subject)
            }
            DiagnosisWarning::UnknownTradeoff { tradeoff_id } => {
                write!(f, "diagnosis refers to unknown trade-off '{}'", tradeoff_id)
            }
            DiagnosisWarning::MalformedTradeoff {
                tradeoff_id,
                statement,
            } => {
                write!(
                    f,
                    "trade-off {} statement '{}' is not of the form 'X vs Y'",
                    tradeoff_id, statement
                )
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTradeoffId {
    Number(u64),
    Text(String),
}

fn deserialize_tradeoff_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawTradeoffId>::deserialize(deserializer)?.map(|raw| match raw {
        RawTradeoffId::Number(n) => n.to_string(),
        RawTradeoffId::Text(s) => s,
    }))
}

mod yes_no {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Text(String),
    }

    pub fn serialize<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *flag { "YES" } else { "NO" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match RawFlag::deserialize(deserializer)? {
            RawFlag::Bool(flag) => Ok(flag),
            RawFlag::Text(text) => match text.trim().to_ascii_uppercase().as_str() {
                "YES" | "TRUE" => Ok(true),
                "NO" | "FALSE" | "" => Ok(false),
                other => Err(D::Error::custom(format!(
                    "expected YES or NO, found '{}'",
                    other
                ))),
            },
        }
    }
}
