use harbor_core::config::ConfigError;
use harbor_core::scenario::ScenarioError;

/// Errors that end a demo run.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("usage: harbor-demo [--config <config.toml>] [<scenario.toml|scenario.json>]")]
    Usage,

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),
}
