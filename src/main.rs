//! keytally daemon entry point.

use clap::Parser;
use keytally::collector::StatsCollector;
use keytally::platform;
use keytally::pump::EventPump;
use keytally::resolve::SymbolResolver;
use keytally::shutdown::ShutdownCoordinator;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

/// Passive keyboard statistics daemon.
///
/// Counts keysym frequencies and 2-/3-symbol sequences across all
/// applications, dumping the model to the output file every time the press
/// threshold is reached.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Stay in the foreground with debug logging instead of daemonizing.
    #[arg(short = 'd', long)]
    foreground: bool,

    /// Output file for the periodic dumps.
    #[arg(short = 'f', long, default_value = "keytally.log")]
    output: PathBuf,

    /// Number of key presses per dump window.
    #[arg(short = 'c', long, default_value_t = 1000)]
    threshold: u64,

    /// Count only base-level (unshifted) symbols, i.e. physical keys.
    #[arg(short = 'l', long)]
    base_only: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.foreground { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("keytally: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> keytally::Result<()> {
    // The sink opens before daemonization so a relative path still means
    // the directory keytally was started from.
    let sink = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.output)?;
    log::info!(
        "dumping to {} every {} presses",
        cli.output.display(),
        cli.threshold
    );

    if !cli.foreground {
        platform::daemonize()?;
    }

    let keymap = platform::keymap()?;
    let resolver = SymbolResolver::new(keymap, cli.base_only);
    let collector = StatsCollector::new(resolver, cli.threshold, BufWriter::new(sink));

    let coordinator = ShutdownCoordinator::arm()?;
    let (handle, events) = platform::capture()?;
    let coordinator_thread = coordinator.spawn(handle);

    let mut pump = EventPump::new(events, collector);
    pump.run()?;

    // The pump only returns once the source stops delivering. On a signal
    // the coordinator is already past its stop request; if the source died
    // on its own the coordinator is still parked on the signal channel and
    // process exit tears it down. The partial window is discarded.
    if coordinator_thread.is_finished() {
        let _ = coordinator_thread.join();
    }
    log::info!("exiting");
    Ok(())
}
