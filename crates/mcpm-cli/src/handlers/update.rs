//! Update command handler.

use anyhow::Result;

use mcpm_core::services::ServerUpdate;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the update command.
///
/// Applies a partial update; a name change renames the id atomically.
pub async fn execute(
    ctx: &CliContext,
    id: &str,
    name: Option<String>,
    command: Option<String>,
    args: Option<Vec<String>>,
) -> Result<()> {
    if name.is_none() && command.is_none() && args.is_none() {
        return Err(CliError::Arguments(
            "nothing to update: pass --name, --command or --args".to_string(),
        )
        .into());
    }

    let updated = ctx
        .registry()
        .update(
            id,
            ServerUpdate {
                name,
                command,
                args,
            },
        )
        .await
        .map_err(CliError::from)?;

    if updated.id == id {
        println!("✅ Server '{id}' updated.");
    } else {
        println!("✅ Server '{}' updated (renamed from '{}').", updated.id, id);
    }
    Ok(())
}
