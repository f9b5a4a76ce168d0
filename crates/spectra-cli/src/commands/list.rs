//! List command
//!
//! Prints the registered operations and their parameters.

use anyhow::Result;
use spectra_ops::registry::OperationRegistry;
#[allow(unused_imports)]
use tracing::{debug, trace};

pub fn run(verbose: u8) -> Result<()> {
    trace!("list::run");
    let registry = OperationRegistry::with_builtin();

    for id in registry.ids() {
        let op = registry.create(id)?;
        println!("{:<34} {}", id, op.name());
        for spec in op.params() {
            println!("    {:<10} {:<10} default {}", spec.property, spec.name, spec.default);
        }
        if verbose > 0 && op.params().is_empty() {
            println!("    (no parameters)");
        }
    }

    Ok(())
}
