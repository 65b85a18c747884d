use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::io::{self, BufRead, Write};
use sweeper_core::{Game, LaunchOptions};
use tracing_subscriber::filter::LevelFilter;

mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Plays Minesweeper on the console", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board width, at least 10
    width: Option<String>,

    /// Board height, at least 5
    height: Option<String>,

    /// Number of mines, at least 1 and fewer than width * height
    mines: Option<String>,
}

impl Args {
    fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            width: self.width.clone(),
            height: self.height.clone(),
            mines: self.mines.clone(),
        }
    }
}

fn init_logging(level: log::LevelFilter) {
    let level = match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let config = args.launch_options().resolve();
    log::debug!("seed: {:?}, config: {:?}", args.seed, config);

    let game = match args.seed {
        Some(seed) => Game::with_seed(config, seed)?,
        None => Game::new(config)?,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    session::Session::new(game).run(stdin.lock(), stdout.lock())?;

    log::debug!("Application stopped");
    Ok(())
}

/// Prompts and reads one line, `None` at end of input.
pub(crate) fn read_line(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::BoardConfig;

    fn resolve(argv: &[&str]) -> BoardConfig {
        Args::try_parse_from(argv).unwrap().launch_options().resolve()
    }

    #[test]
    fn negative_mine_count_falls_back_to_default() {
        assert_eq!(resolve(&["sweeper", "10", "5", "-3"]), BoardConfig::new_unchecked(10, 5, 36));
    }

    #[test]
    fn negative_dimensions_fall_back_individually() {
        assert_eq!(resolve(&["sweeper", "-10", "6", "12"]), BoardConfig::new_unchecked(20, 6, 12));
    }

    #[test]
    fn flags_mix_with_positionals() {
        let args = Args::try_parse_from(["sweeper", "-s", "42", "12", "8", "20"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.launch_options().resolve(), BoardConfig::new_unchecked(12, 8, 20));
    }

    #[test]
    fn no_arguments_use_defaults() {
        assert_eq!(resolve(&["sweeper"]), BoardConfig::default());
    }
}
