use clap::Parser;
use stream_lineup::cli::commands::{cmd_lineup, cmd_merge, cmd_save, cmd_saved, cmd_watch};
use stream_lineup::cli::config::{Cli, Commands, load_config, resolve_interval};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());

    // Library path: CLI > config > default
    let library_path = cli.library.clone().unwrap_or_else(|| config.library.path.clone());

    match cli.command {
        Commands::Merge { previous, next } => {
            cmd_merge(previous.as_deref(), next.as_deref())?;
        }
        Commands::Lineup {
            source,
            category,
            sort,
        } => {
            cmd_lineup(source.as_deref(), &category, sort, &library_path, &config)?;
        }
        Commands::Watch {
            source,
            category,
            sort,
            interval,
            cycles,
            trace,
        } => {
            let trace_path = trace.or_else(|| config.trace.path.clone());
            cmd_watch(
                source.as_deref(),
                &category,
                sort,
                resolve_interval(interval, &config.poll),
                cycles,
                trace_path.as_deref(),
                &library_path,
                &config,
            )?;
        }
        Commands::Save { id } => cmd_save(&library_path, &id, true)?,
        Commands::Unsave { id } => cmd_save(&library_path, &id, false)?,
        Commands::Saved => cmd_saved(&library_path)?,
    }

    Ok(())
}
