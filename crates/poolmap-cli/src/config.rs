use anyhow::bail;
use clap::{ArgAction, Parser, builder::BoolishValueParser};
use poolmap::MapConfig;
use std::path::PathBuf;

/// Command-line arguments for the `poolmap` binary.
///
/// Every option can also be supplied through the environment (or a `.env`
/// file), which makes the tool easy to tune from CI without editing scripts.
/// The command and its fixed arguments come last; each input line is appended
/// to them as one extra argument.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "poolmap",
    version,
    about = "Run a command once per input line on a bounded pool of workers",
    after_help = "Example:\n  ls *.png | poolmap --workers 4 -- optipng -quiet"
)]
pub struct CliArgs {
    /// Maximum number of commands running at the same time.
    ///
    /// Defaults to the number of logical CPUs.
    ///
    /// Environment variable: `POOLMAP_WORKERS`
    #[arg(short, long, env = "POOLMAP_WORKERS")]
    pub workers: Option<usize>,

    /// Do not draw a progress bar or log per-item failures while running.
    ///
    /// Failed items are still listed once the batch is over.
    ///
    /// Environment variable: `POOLMAP_SILENT` (`1`/`0`, `yes`/`no`,
    /// `on`/`off`, `true`/`false`)
    #[arg(
        short,
        long,
        env = "POOLMAP_SILENT",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub silent: bool,

    /// Read items from this file instead of stdin. One item per line; blank
    /// lines are skipped.
    ///
    /// Environment variable: `POOLMAP_INPUT`
    #[arg(short, long, env = "POOLMAP_INPUT")]
    pub input: Option<PathBuf>,

    /// Program to run, followed by its fixed arguments.
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub map: MapConfig,
    pub input: Option<PathBuf>,
    pub program: String,
    pub args: Vec<String>,
}

impl TryFrom<CliArgs> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let mut map = MapConfig::default().with_silent(args.silent);
        if let Some(workers) = args.workers {
            if workers == 0 {
                bail!("--workers/POOLMAP_WORKERS must be greater than 0");
            }
            map = map.with_workers(workers);
        }

        let Some((program, rest)) = args.command.split_first() else {
            bail!("no command given");
        };
        if program.is_empty() {
            bail!("command must not be empty");
        }

        Ok(Self {
            map,
            input: args.input,
            program: program.clone(),
            args: rest.to_vec(),
        })
    }
}
