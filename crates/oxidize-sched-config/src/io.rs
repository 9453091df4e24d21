use std::fs;
use std::path::Path;

use oxidize_sched_core::error::{SchedResult, SchedulerError};
use serde_json::Value;

use crate::config::{SchedulerConfig, SCHEDULER_NAMES};

/// Parse a scheduler configuration from JSON text.
pub fn from_json_str(json: &str) -> SchedResult<SchedulerConfig> {
    let value: Value = serde_json::from_str(json)?;
    from_json_value(value)
}

/// Parse a scheduler configuration from an already decoded JSON value.
///
/// Names are checked before decoding so that an unregistered scheduler is
/// reported as [`SchedulerError::UnknownScheduler`] rather than a generic
/// decoding error.
pub fn from_json_value(value: Value) -> SchedResult<SchedulerConfig> {
    check_names(&value)?;
    Ok(serde_json::from_value(value)?)
}

fn check_names(value: &Value) -> SchedResult<()> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| SchedulerError::config("scheduler config needs a string \"name\" field"))?;

    if !SCHEDULER_NAMES.contains(&name) {
        return Err(SchedulerError::UnknownScheduler(name.to_string()));
    }

    if name == "composite" {
        let children = value.get("schedulers").and_then(Value::as_array).ok_or_else(|| {
            SchedulerError::config("composite scheduler needs both a list of schedulers and lengths")
        })?;
        for child in children {
            check_names(child)?;
        }
    }
    Ok(())
}

/// Load a scheduler configuration from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> SchedResult<SchedulerConfig> {
    let json = fs::read_to_string(path.as_ref())?;
    from_json_str(&json)
}

/// Save a scheduler configuration to a JSON file.
pub fn save_config(config: &SchedulerConfig, path: impl AsRef<Path>) -> SchedResult<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_scheduler_name() {
        let err = from_json_str(r#"{"name": "cyclic", "value": 1.0}"#).unwrap_err();
        assert!(matches!(err, SchedulerError::UnknownScheduler(ref n) if n == "cyclic"));
    }

    #[test]
    fn test_unknown_nested_scheduler_name() {
        let value = json!({
            "name": "composite",
            "schedulers": [{"name": "constant", "value": 1.0}, {"name": "exponential"}],
            "lengths": [0.5, 0.5]
        });
        let err = from_json_value(value).unwrap_err();
        assert!(matches!(err, SchedulerError::UnknownScheduler(ref n) if n == "exponential"));
    }

    #[test]
    fn test_missing_fields() {
        let no_name = from_json_str(r#"{"value": 1.0}"#).unwrap_err();
        assert!(matches!(no_name, SchedulerError::Configuration(_)));

        let no_children = from_json_str(r#"{"name": "composite", "lengths": [1.0]}"#).unwrap_err();
        assert!(matches!(no_children, SchedulerError::Configuration(_)));

        let no_value = from_json_str(r#"{"name": "constant"}"#).unwrap_err();
        assert!(matches!(no_value, SchedulerError::Json(_)));
        assert!(no_value.is_configuration());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("oxidize_sched_cfg_{}.json", std::process::id()));
        let cfg = SchedulerConfig::Linear { start_value: 0.0, end_value: 0.1 };

        save_config(&cfg, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("/nonexistent/oxidize_sched.json").unwrap_err();
        assert!(matches!(err, SchedulerError::Io(_)));
    }
}
