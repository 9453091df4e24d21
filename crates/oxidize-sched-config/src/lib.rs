pub mod config;
pub mod io;
pub mod registry;

pub use config::{CompositeConfig, SchedulerConfig, SCHEDULER_NAMES};
pub use io::{from_json_str, from_json_value, load_config, save_config};
pub use registry::{build_from_json, build_param_scheduler};
