// Interface adapters: host world implementations of the domain ports.

pub mod sandbox;

pub use sandbox::SandboxWorld;
