use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Shape of the synthetic classification traffic.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub classes: Vec<String>,
    pub confidence_min: f64,
    pub confidence_max: f64,
    /// Probability that a classify-now request reports failure.
    pub failure_rate: f64,
    /// Records generated at startup, spread over `seed_hours`.
    pub seed_records: usize,
    pub seed_hours: u32,
    pub max_history: usize,
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            classes: ["PLASTICO", "PAPEL", "VIDRO", "METAL", "LIXO", "PAPELAO"]
                .iter()
                .map(|class| class.to_string())
                .collect(),
            confidence_min: 0.6,
            confidence_max: 0.95,
            failure_rate: 0.1,
            seed_records: 40,
            seed_hours: 6,
            max_history: 500,
            seed: 312,
        }
    }
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario config {}", path_ref.display()))?;
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.classes.is_empty() {
            anyhow::bail!("scenario needs at least one class");
        }
        if !(0.0..=1.0).contains(&self.confidence_min)
            || !(0.0..=1.0).contains(&self.confidence_max)
            || self.confidence_min > self.confidence_max
        {
            anyhow::bail!(
                "confidence range {}..{} must lie within [0, 1]",
                self.confidence_min,
                self.confidence_max
            );
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            anyhow::bail!("failure_rate {} must lie within [0, 1]", self.failure_rate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_scenario_is_valid() {
        let cfg = ScenarioConfig::default();
        assert_eq!(cfg.classes.len(), 6);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_reads_yaml_overrides() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"classes: [GLASS, METAL]\nfailure_rate: 0.5\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = ScenarioConfig::load(&path).unwrap();
        assert_eq!(cfg.classes, vec!["GLASS", "METAL"]);
        assert_eq!(cfg.failure_rate, 0.5);
        assert_eq!(cfg.confidence_min, 0.6);
    }

    #[test]
    fn inverted_confidence_range_is_rejected() {
        let cfg = ScenarioConfig {
            confidence_min: 0.9,
            confidence_max: 0.2,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
