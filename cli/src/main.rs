use std::io::Write;

use anyhow::Error;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

mod show;
use show::Show;

const NAME: &str = env!("CARGO_BIN_NAME");

/// Build grids and print strided views of them.
///
/// Views are derived from a row-major grid by axis permutation and windowing, and may have one
/// axis fixed to an index. The view metadata is printed above its elements.
#[derive(Debug, Parser)]
#[command(name = NAME, author, version, about, long_about)]
#[command(subcommand_required = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress warnings.
    ///
    /// Disables all logging, including warnings.
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbosity.
    ///
    /// Without this flag, only warnings are logged. Set once to log timings, twice to log grid
    /// construction, and three times for everything.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print CLI arguments for debugging.
    #[arg(long, hide = true, global = true)]
    debug: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Off,
            (false, 0) => LevelFilter::Warn,
            (false, 1) => LevelFilter::Info,
            (false, 2) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }

    pub fn run(self) -> Result<(), Error> {
        if self.debug {
            eprintln!("{self:#?}");
        }

        init_logger(self.log_level());

        self.command.run()
    }
}

fn init_logger(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let level = record.level().as_str().to_lowercase();
            writeln!(buf, "[{NAME} {level:>5}] {}", record.args())
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("failed to set up logger: {e}");
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Show(Show),
}

impl Command {
    fn run(self) -> Result<(), Error> {
        match self {
            Command::Show(show) => show.run(),
        }
    }
}

impl TryFrom<Command> for Show {
    type Error = Command;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        match command {
            Command::Show(show) => Ok(show),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
