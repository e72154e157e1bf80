use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use fmtcheck_lib::exit_codes::exit;
use fmtcheck_lib::{Config, Git, RunOptions, ToolRegistry};

/// Checks and fixes formatting for source files.
///
/// This uses clang-format, gn format, gofmt, and python -m yapf to format
/// source code. These tools must be available on the path.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files or directories to check. In a git repository, tracked files
    /// under these paths are checked too.
    #[arg(required = false)]
    paths: Vec<PathBuf>,

    /// Exclude files matching this regular expression from git listing (repeatable)
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Only check files changed since this git revision
    #[arg(long, value_name = "REVISION")]
    base: Option<String>,

    /// Apply formatting fixes in place.
    #[arg(long)]
    fix: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore configuration files
    #[arg(long)]
    isolated: bool,

    /// Show detailed output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print diffs and errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn try_main(cli: &Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let config = Config::load(cli.config.as_deref(), cli.isolated, &cwd)?;

    let mut exclude = config.exclude.clone();
    exclude.extend(cli.exclude.iter().cloned());

    let options = RunOptions {
        paths: cli.paths.clone(),
        exclude,
        base: cli.base.clone(),
        fix: cli.fix,
    };
    let registry = ToolRegistry::builtin(&config.tools);
    let git = Git::new(&cwd);

    Ok(fmtcheck_lib::run(&options, &git, &registry, &cwd)?)
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    match try_main(&cli) {
        Ok(code) => exit::with_code(code),
        Err(e) => {
            log::error!("{e:#}");
            exit::tool_error();
        }
    }
}
