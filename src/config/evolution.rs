//! Evolution loop configuration

use serde::Deserialize;

/// Evolution loop configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EvolutionConfig {
    /// Iteration cap; `0` disables it
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl EvolutionConfig {
    /// The cap as the controller expects it
    pub fn iteration_cap(&self) -> Option<u32> {
        match self.max_iterations {
            0 => None,
            cap => Some(cap),
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_max_iterations() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cap_is_ten() {
        assert_eq!(EvolutionConfig::default().iteration_cap(), Some(10));
    }

    #[test]
    fn zero_disables_the_cap() {
        let config = EvolutionConfig { max_iterations: 0 };
        assert_eq!(config.iteration_cap(), None);
    }
}
