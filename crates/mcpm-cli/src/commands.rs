//! Main commands enum and subcommand arguments.

use clap::Subcommand;

/// Available commands for the MCP server manager.
#[derive(Subcommand)]
pub enum Commands {
    /// Add a server definition to the registry
    Add {
        /// Human-readable server name (the id is derived from it)
        name: String,
        /// Executable name or path
        command: String,
        /// Arguments passed verbatim to the process, in order
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Update an existing server definition
    Update {
        /// Id of the server to update
        id: String,
        /// New name (renames the id)
        #[arg(long)]
        name: Option<String>,
        /// New executable
        #[arg(long)]
        command: Option<String>,
        /// New argument list, replacing the old one entirely
        #[arg(long, num_args = 0.., allow_hyphen_values = true)]
        args: Option<Vec<String>>,
    },

    /// Remove a server definition from the registry
    Remove {
        /// Id of the server to remove
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List all registered servers
    List,

    /// Start a server and verify it came online
    Start {
        /// Id of the server to start
        id: String,
    },

    /// Stop a server (graceful, with one forceful escalation)
    Stop {
        /// Id of the server to stop
        id: String,
        /// Kill immediately without verification
        #[arg(short, long)]
        force: bool,
    },

    /// Restart a server (graceful stop, then start)
    Restart {
        /// Id of the server to restart
        id: String,
    },

    /// Probe liveness and refresh stored status
    Status {
        /// Id of a single server (all servers when omitted)
        id: Option<String>,
    },
}
