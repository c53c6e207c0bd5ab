pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::config::config_path;
pub use frameworks::server::{run_demo, run_with_config};
