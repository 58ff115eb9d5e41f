//! Templates subcommand handler

use anyhow::Result;

use castsvg::svg::template::{BUILTIN_TEMPLATES, DEFAULT_TEMPLATE};

/// List built-in templates, marking the default one.
#[cfg(not(tarpaulin_include))]
pub fn handle() -> Result<()> {
    for (name, _) in BUILTIN_TEMPLATES {
        if *name == DEFAULT_TEMPLATE {
            println!("{} (default)", name);
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}
