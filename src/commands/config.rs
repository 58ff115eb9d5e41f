//! Config subcommands handler

use std::path::Path;

use anyhow::Result;

use castsvg::Config;

/// Show the effective configuration as TOML.
///
/// Without a config file this prints the built-in defaults, which is a
/// convenient starting point for a custom configuration.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{}", toml_str);
    Ok(())
}
