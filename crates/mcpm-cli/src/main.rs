//! CLI entry point - parse, compose, dispatch.
//!
//! Infrastructure wiring happens only in `bootstrap`; this file routes
//! parsed commands to their handlers and maps failures to exit codes.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcpm_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

async fn dispatch(ctx: &mcpm_cli::CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Add {
            name,
            command,
            args,
        } => handlers::add::execute(ctx, &name, &command, args).await,
        Commands::Update {
            id,
            name,
            command,
            args,
        } => handlers::update::execute(ctx, &id, name, command, args).await,
        Commands::Remove { id, yes } => handlers::remove::execute(ctx, &id, yes).await,
        Commands::List => handlers::list::execute(ctx).await,
        Commands::Start { id } => handlers::start::execute(ctx, &id).await,
        Commands::Stop { id, force } => handlers::stop::execute(ctx, &id, force).await,
        Commands::Restart { id } => handlers::restart::execute(ctx, &id).await,
        Commands::Status { id } => handlers::status::execute(ctx, id.as_deref()).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; --verbose turns on debug output unless RUST_LOG
    // already says otherwise.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::resolve(cli.config)?;
    let ctx = bootstrap(&config);

    if let Err(err) = dispatch(&ctx, command).await {
        eprintln!("❌ {err:#}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
    Ok(())
}
