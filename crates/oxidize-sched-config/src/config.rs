use oxidize_sched_core::{IntervalScaling, UpdateInterval};
use serde::{Deserialize, Serialize};

/// Every scheduler name the registry knows how to build.
pub const SCHEDULER_NAMES: &[&str] = &[
    "constant",
    "linear",
    "cosine",
    "polynomial",
    "step",
    "multistep",
    "step_with_fixed_gamma",
    "composite",
];

/// Serializable description of a scheduler, keyed by its `"name"` field.
///
/// `num_epochs` is optional on the step families so that an enclosing
/// composite can supply it; building still fails if nobody does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum SchedulerConfig {
    Constant {
        value: f64,
    },
    Linear {
        #[serde(alias = "start_lr")]
        start_value: f64,
        #[serde(alias = "end_lr")]
        end_value: f64,
    },
    Cosine {
        #[serde(alias = "start_lr")]
        start_value: f64,
        #[serde(alias = "end_lr")]
        end_value: f64,
    },
    Polynomial {
        #[serde(alias = "base_lr")]
        base_value: f64,
        power: f64,
    },
    Step {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        num_epochs: Option<usize>,
        values: Vec<f64>,
    },
    #[serde(rename = "multistep")]
    MultiStep {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        num_epochs: Option<usize>,
        values: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        milestones: Option<Vec<usize>>,
    },
    StepWithFixedGamma {
        base_value: f64,
        num_decays: usize,
        gamma: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        num_epochs: Option<usize>,
    },
    Composite(CompositeConfig),
}

/// Configuration of a composite scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeConfig {
    pub schedulers: Vec<SchedulerConfig>,
    pub lengths: Vec<f64>,
    #[serde(default)]
    pub update_interval: UpdateInterval,
    /// Defaults to `rescaled` for every segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_scaling: Option<Vec<IntervalScaling>>,
    /// Pushed down into every child before it is built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_epochs: Option<usize>,
}

impl SchedulerConfig {
    /// The registry name of this configuration.
    pub fn name(&self) -> &'static str {
        match self {
            SchedulerConfig::Constant { .. } => "constant",
            SchedulerConfig::Linear { .. } => "linear",
            SchedulerConfig::Cosine { .. } => "cosine",
            SchedulerConfig::Polynomial { .. } => "polynomial",
            SchedulerConfig::Step { .. } => "step",
            SchedulerConfig::MultiStep { .. } => "multistep",
            SchedulerConfig::StepWithFixedGamma { .. } => "step_with_fixed_gamma",
            SchedulerConfig::Composite(_) => "composite",
        }
    }

    /// Set `num_epochs` wherever this configuration carries one, replacing
    /// any value already present.
    pub fn with_num_epochs(mut self, epochs: usize) -> Self {
        match &mut self {
            SchedulerConfig::Step { num_epochs, .. }
            | SchedulerConfig::MultiStep { num_epochs, .. }
            | SchedulerConfig::StepWithFixedGamma { num_epochs, .. } => *num_epochs = Some(epochs),
            SchedulerConfig::Composite(c) => c.num_epochs = Some(epochs),
            SchedulerConfig::Constant { .. }
            | SchedulerConfig::Linear { .. }
            | SchedulerConfig::Cosine { .. }
            | SchedulerConfig::Polynomial { .. } => {}
        }
        self
    }
}

impl CompositeConfig {
    pub fn new(schedulers: Vec<SchedulerConfig>, lengths: Vec<f64>) -> Self {
        CompositeConfig {
            schedulers,
            lengths,
            update_interval: UpdateInterval::Step,
            interval_scaling: None,
            num_epochs: None,
        }
    }

    pub fn with_update_interval(mut self, update_interval: UpdateInterval) -> Self {
        self.update_interval = update_interval;
        self
    }

    pub fn with_interval_scaling(mut self, interval_scaling: Vec<IntervalScaling>) -> Self {
        self.interval_scaling = Some(interval_scaling);
        self
    }

    pub fn with_num_epochs(mut self, num_epochs: usize) -> Self {
        self.num_epochs = Some(num_epochs);
        self
    }

    /// Interval scaling per segment, `rescaled` when unspecified.
    pub fn resolved_interval_scaling(&self) -> Vec<IntervalScaling> {
        match &self.interval_scaling {
            Some(scaling) => scaling.clone(),
            None => vec![IntervalScaling::Rescaled; self.schedulers.len()],
        }
    }

    /// Child configurations with the composite's `num_epochs` applied.
    pub fn resolved_schedulers(&self) -> Vec<SchedulerConfig> {
        match self.num_epochs {
            Some(epochs) => self
                .schedulers
                .iter()
                .cloned()
                .map(|s| s.with_num_epochs(epochs))
                .collect(),
            None => self.schedulers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leaf_configs() {
        let cfg: SchedulerConfig =
            serde_json::from_str(r#"{"name": "cosine", "start_value": 0.42, "end_value": 0.0001}"#).unwrap();
        assert_eq!(cfg, SchedulerConfig::Cosine { start_value: 0.42, end_value: 0.0001 });
        assert_eq!(cfg.name(), "cosine");

        let cfg: SchedulerConfig =
            serde_json::from_str(r#"{"name": "multistep", "values": [1.0, 0.1], "num_epochs": 10}"#).unwrap();
        assert_eq!(
            cfg,
            SchedulerConfig::MultiStep { num_epochs: Some(10), values: vec![1.0, 0.1], milestones: None }
        );
    }

    #[test]
    fn test_parse_lr_field_aliases() {
        let cfg: SchedulerConfig =
            serde_json::from_str(r#"{"name": "polynomial", "base_lr": 0.1, "power": 0.9}"#).unwrap();
        assert_eq!(cfg, SchedulerConfig::Polynomial { base_value: 0.1, power: 0.9 });

        let cfg: SchedulerConfig =
            serde_json::from_str(r#"{"name": "cosine", "start_lr": 0.42, "end_lr": 0.0001}"#).unwrap();
        assert_eq!(cfg, SchedulerConfig::Cosine { start_value: 0.42, end_value: 0.0001 });

        let cfg: SchedulerConfig =
            serde_json::from_str(r#"{"name": "linear", "start_lr": 0.0, "end_lr": 0.1}"#).unwrap();
        assert_eq!(cfg, SchedulerConfig::Linear { start_value: 0.0, end_value: 0.1 });
    }

    #[test]
    fn test_builder_matches_parsed_config() {
        let parsed: CompositeConfig = serde_json::from_str(
            r#"{
                "schedulers": [{"name": "constant", "value": 1.0}],
                "lengths": [1.0],
                "update_interval": "epoch",
                "interval_scaling": ["fixed"],
                "num_epochs": 12
            }"#,
        )
        .unwrap();
        let built = CompositeConfig::new(vec![SchedulerConfig::Constant { value: 1.0 }], vec![1.0])
            .with_update_interval(UpdateInterval::Epoch)
            .with_interval_scaling(vec![IntervalScaling::Fixed])
            .with_num_epochs(12);
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_parse_composite_defaults() {
        let cfg: SchedulerConfig = serde_json::from_str(
            r#"{
                "name": "composite",
                "schedulers": [
                    {"name": "constant", "value": 0.42},
                    {"name": "cosine", "start_value": 0.42, "end_value": 0.0001}
                ],
                "lengths": [0.3, 0.7]
            }"#,
        )
        .unwrap();

        let SchedulerConfig::Composite(composite) = cfg else {
            panic!("expected a composite config");
        };
        assert_eq!(composite.update_interval, UpdateInterval::Step);
        assert_eq!(composite.interval_scaling, None);
        assert_eq!(
            composite.resolved_interval_scaling(),
            vec![IntervalScaling::Rescaled, IntervalScaling::Rescaled]
        );
    }

    #[test]
    fn test_parse_composite_explicit_fields() {
        let cfg: CompositeConfig = serde_json::from_str(
            r#"{
                "schedulers": [{"name": "constant", "value": 1.0}],
                "lengths": [1.0],
                "update_interval": "epoch",
                "interval_scaling": ["fixed"]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.update_interval, UpdateInterval::Epoch);
        assert_eq!(cfg.resolved_interval_scaling(), vec![IntervalScaling::Fixed]);
    }

    #[test]
    fn test_rejects_bad_enum_strings() {
        let bad_interval = serde_json::from_str::<CompositeConfig>(
            r#"{"schedulers": [], "lengths": [], "update_interval": "batch"}"#,
        );
        assert!(bad_interval.is_err());

        let bad_scaling = serde_json::from_str::<CompositeConfig>(
            r#"{"schedulers": [], "lengths": [], "interval_scaling": ["stretched"]}"#,
        );
        assert!(bad_scaling.is_err());
    }

    #[test]
    fn test_num_epochs_propagation() {
        let inner = SchedulerConfig::Composite(CompositeConfig::new(
            vec![SchedulerConfig::Step { num_epochs: Some(3), values: vec![1.0, 0.5] }],
            vec![1.0],
        ));
        let cfg = CompositeConfig::new(
            vec![SchedulerConfig::Constant { value: 0.1 }, inner],
            vec![0.5, 0.5],
        )
        .with_num_epochs(90);

        let resolved = cfg.resolved_schedulers();
        assert_eq!(resolved[0], SchedulerConfig::Constant { value: 0.1 });
        let SchedulerConfig::Composite(inner) = &resolved[1] else {
            panic!("expected a composite config");
        };
        assert_eq!(inner.num_epochs, Some(90));
        // The nested child still holds its own value until the inner composite resolves
        assert_eq!(
            inner.resolved_schedulers()[0],
            SchedulerConfig::Step { num_epochs: Some(90), values: vec![1.0, 0.5] }
        );
    }

    #[test]
    fn test_serialize_round_trip_keeps_name_tag() {
        let cfg = SchedulerConfig::StepWithFixedGamma {
            base_value: 0.1,
            num_decays: 3,
            gamma: 0.1,
            num_epochs: None,
        };
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["name"], "step_with_fixed_gamma");
        assert!(json.get("num_epochs").is_none());
    }

    #[test]
    fn test_names_cover_every_variant() {
        let configs = [
            SchedulerConfig::Constant { value: 0.0 },
            SchedulerConfig::Linear { start_value: 0.0, end_value: 1.0 },
            SchedulerConfig::Cosine { start_value: 1.0, end_value: 0.0 },
            SchedulerConfig::Polynomial { base_value: 1.0, power: 1.0 },
            SchedulerConfig::Step { num_epochs: None, values: vec![1.0] },
            SchedulerConfig::MultiStep { num_epochs: None, values: vec![1.0], milestones: None },
            SchedulerConfig::StepWithFixedGamma { base_value: 1.0, num_decays: 1, gamma: 0.1, num_epochs: None },
            SchedulerConfig::Composite(CompositeConfig::new(vec![], vec![])),
        ];
        let names: Vec<&str> = configs.iter().map(|c| c.name()).collect();
        assert_eq!(names, SCHEDULER_NAMES);
    }
}
