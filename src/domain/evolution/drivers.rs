//! Quality-attribute drivers and scenarios supplied per iteration.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::ScenarioEvidence;

/// A quality attribute judged architecturally significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAttributeDriver {
    pub quality_attribute: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub influencing_factors: Vec<String>,
    #[serde(default)]
    pub related_stakeholders: Vec<String>,
    #[serde(default)]
    pub related_constraints: Vec<String>,
}

impl QualityAttributeDriver {
    pub fn new(quality_attribute: impl Into<String>) -> Self {
        Self {
            quality_attribute: quality_attribute.into(),
            rationale: String::new(),
            influencing_factors: Vec::new(),
            related_stakeholders: Vec::new(),
            related_constraints: Vec::new(),
        }
    }
}

/// Six-part quality-attribute scenario (source and artifact omitted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScenario {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_driver: Option<String>,
    pub stimulus: String,
    pub environment: String,
    pub response: String,
    pub response_measure: String,
}

/// Everything the driver/scenario provider returns for one iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverScenarioSet {
    #[serde(default)]
    pub drivers: Vec<QualityAttributeDriver>,
    #[serde(default)]
    pub scenarios: Vec<QualityScenario>,
    #[serde(default)]
    pub evidence: ScenarioEvidence,
}

impl DriverScenarioSet {
    /// Named drivers, blank names skipped.
    pub fn driver_names(&self) -> Vec<String> {
        self.drivers
            .iter()
            .map(|d| d.quality_attribute.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn scenarios_for<'a>(&'a self, driver: &'a str) -> impl Iterator<Item = &'a QualityScenario> {
        self.scenarios
            .iter()
            .filter(move |s| s.related_driver.as_deref() == Some(driver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SET: &str = r#"
drivers:
  - quality_attribute: "performance"
    rationale: "Peak traffic at checkout"
  - quality_attribute: "  "
  - quality_attribute: "availability"
scenarios:
  - id: "SC-performance-1"
    related_driver: "performance"
    stimulus: "Flash sale"
    environment: "Peak load"
    response: "Orders are accepted"
    response_measure: "p99 latency under 300ms"
evidence:
  evaluations:
    A:
      SC-performance-1: { risk: "low" }
"#;

    #[test]
    fn parses_provider_output() {
        let set: DriverScenarioSet = serde_yaml::from_str(SET).unwrap();
        assert_eq!(set.drivers.len(), 3);
        assert_eq!(set.scenarios_for("performance").count(), 1);
        assert_eq!(set.scenarios_for("availability").count(), 0);
        assert_eq!(set.evidence.evaluations.len(), 1);
    }

    #[test]
    fn driver_names_skip_blank_entries() {
        let set: DriverScenarioSet = serde_yaml::from_str(SET).unwrap();
        assert_eq!(set.driver_names(), vec!["performance", "availability"]);
    }
}
