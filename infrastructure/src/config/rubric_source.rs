//! Rubric source backed by the `[[rubrics]]` configuration records

use super::file_config::FileConfig;
use panel_application::ports::rubric_source::{RubricSource, RubricSourceError};
use panel_domain::RubricRecord;

/// [`RubricSource`] over configured rubric records
#[derive(Debug, Clone)]
pub struct ConfigRubricSource {
    records: Vec<RubricRecord>,
}

impl ConfigRubricSource {
    pub fn new(records: Vec<RubricRecord>) -> Self {
        Self { records }
    }

    pub fn from_config(config: &FileConfig) -> Self {
        Self::new(config.rubrics.clone())
    }
}

impl RubricSource for ConfigRubricSource {
    fn load(&self) -> Result<Vec<RubricRecord>, RubricSourceError> {
        if self.records.is_empty() {
            return Err(RubricSourceError::Unavailable(
                "no [[rubrics]] entries configured".to_string(),
            ));
        }
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_unavailable() {
        let source = ConfigRubricSource::from_config(&FileConfig::default());
        assert!(matches!(
            source.load(),
            Err(RubricSourceError::Unavailable(_))
        ));
    }

    #[test]
    fn test_records_keep_order() {
        let toml_str = r#"
[[rubrics]]
name = "B"

[[rubrics]]
name = "A"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let records = ConfigRubricSource::from_config(&config).load().unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
