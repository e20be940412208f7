//! Remove command handler.
//!
//! Removes a server definition from the registry. The process itself is
//! left alone - stop it first if it is running.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_record_summary;
use crate::utils::input;

/// Execute the remove command.
///
/// Shows the record and confirms with the user unless `yes` is set.
pub async fn execute(ctx: &CliContext, id: &str, yes: bool) -> Result<()> {
    let record = ctx.registry().get(id).await.map_err(CliError::from)?;

    if !yes {
        print_record_summary(&record);
        println!();

        let confirm = input::prompt_confirmation("Remove this server from the registry?")
            .map_err(CliError::from)?;
        if !confirm {
            println!("Remove operation cancelled.");
            return Ok(());
        }
    }

    ctx.registry().remove(id).await.map_err(CliError::from)?;
    println!("✅ Server '{id}' removed.");
    Ok(())
}
