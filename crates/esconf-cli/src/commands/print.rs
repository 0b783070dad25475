//! Print command implementation.

use anyhow::Result;
use esconf::{configuration, render_module, to_pretty_json, Flavor};

use crate::PrintFormat;

/// Prints the exported document for `flavor`.
pub fn run(flavor: Flavor, format: PrintFormat) -> Result<()> {
    let doc = configuration(flavor);
    match format {
        PrintFormat::Json => println!("{}", to_pretty_json(doc)?),
        PrintFormat::Module => print!("{}", render_module(doc)?),
    }
    Ok(())
}
