pub mod adapter;
pub mod configuration;
pub mod context;
pub mod describe;
pub mod help;
#[cfg(test)]
mod mock_adapter;
pub mod resolver;
pub mod runner;
pub mod template_expander;
pub mod template_string;
pub mod types;
pub mod version;
