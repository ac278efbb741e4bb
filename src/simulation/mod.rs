pub mod chance;
pub mod config;
pub mod engine;
