// Frameworks layer: runtime bootstrap and configuration sources.

pub mod config;
pub mod server;
