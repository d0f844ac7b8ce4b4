//! Nucamp - a Winamp-style terminal dashboard for the Nuclei scanner.

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nucamp::scan::ScanStatus;
use nucamp::session::{ScanSession, SessionError, SpawnError};
use nucamp::ui::{TuiSurface, DEMO_VIEWPORT_HEIGHT};

#[derive(Parser)]
#[command(
    name = "nucamp",
    about = "A Winamp-style terminal dashboard for the Nuclei vulnerability scanner",
    version,
    after_help = "It really whips the CLI's ass!"
)]
struct Cli {
    /// Render one frame of sample data instead of running a scan.
    #[arg(long)]
    demo: bool,

    /// Arguments forwarded verbatim to nuclei.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    scanner_args: Vec<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    println!("Usage: nucamp [--demo] [NUCLEI ARGS...]");
    println!();
    println!("Examples:");
    println!("  nucamp -u https://example.com");
    println!("  nucamp -l targets.txt -t cves/");
    println!("  nucamp --demo");
}

async fn run(cli: Cli) -> i32 {
    if cli.demo {
        let mut session = ScanSession::new(TuiSurface::inline(DEMO_VIEWPORT_HEIGHT));
        return match session.run_demo() {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{} {e}", "Error:".red().bold());
                1
            }
        };
    }

    if cli.scanner_args.is_empty() {
        print_usage();
        return 0;
    }

    // The session owns the surface; dropping it restores the terminal
    // before anything is printed below.
    let outcome = {
        let mut session = ScanSession::new(TuiSurface::fullscreen());
        session.run_scan(&cli.scanner_args).await
    };

    match outcome {
        Ok(ScanStatus::Interrupted) => {
            eprintln!("{}", "Scan interrupted by user".yellow().bold());
            0
        }
        Ok(_) => 0,
        Err(SessionError::Spawn(SpawnError::NotFound)) => {
            eprintln!(
                "{} Nuclei not found! Please install it first.",
                "Error:".red().bold()
            );
            eprintln!("Visit: https://github.com/projectdiscovery/nuclei");
            1
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            1
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();
    std::process::exit(run(cli).await);
}
