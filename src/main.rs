use clap::Parser;
use ragasiya::cli::{output, Cli, Commands};
use ragasiya::errors::VaultError;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr; RUST_LOG wins over --verbose.
    let default_level = if cli.verbose { "ragasiya=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::New { ref file } => ragasiya::cli::commands::new::execute(file),
        Commands::Import {
            ref source,
            ref file,
        } => ragasiya::cli::commands::import_cmd::execute(source, file),
        Commands::Show {
            ref file,
            ref filter,
        } => ragasiya::cli::commands::show::execute(file, filter.as_deref()),
        Commands::Add {
            ref file,
            ref values,
        } => ragasiya::cli::commands::add::execute(file, values),
        Commands::Edit {
            ref file,
            row,
            ref column,
            ref value,
        } => ragasiya::cli::commands::edit::execute(file, row, column, value),
        Commands::Delete {
            ref file,
            row,
            force,
        } => ragasiya::cli::commands::delete::execute(file, row, force),
        Commands::CheckPassword { ref password } => {
            ragasiya::cli::commands::check_password::execute(password.as_deref())
        }
        Commands::Completions { shell } => ragasiya::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        if matches!(
            e,
            VaultError::MalformedField(_)
                | VaultError::MalformedHeader(_)
                | VaultError::ArityMismatch { .. }
        ) {
            output::tip("The vault file appears to be corrupt.");
        }
        std::process::exit(1);
    }
}
