use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_local;
use crate::args::{DEFAULT_CONFIG_FILES, TesterArgs};
use crate::error::AppResult;

/// Parses the command line, initializes logging, and runs the load test.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, the runtime cannot
/// be built, or the run fails before dispatching.
pub fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<Option<(TesterArgs, ArgMatches)>> {
    let mut cmd = TesterArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = TesterArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(mut args: TesterArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, matches, &config)?;
    }
    run_local(&args).await
}
