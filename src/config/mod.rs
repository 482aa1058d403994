#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_PORTFOLIO_PATH: &str = "my_portfolio.csv";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
