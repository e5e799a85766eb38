//! Command dispatch and handlers.

pub mod extract;
pub mod generate;
pub mod show;
pub mod targets;

use std::env;
use std::path::Path;

use crate::cli::{Cli, Command};
use crate::config::DepGenConfig;
use crate::context::ServiceContext;

/// Records all filesystem calls of the run to this cassette path.
pub const RECORD_ENV_VAR: &str = "DEPGEN_RECORD";
/// Serves all filesystem calls from this cassette path.
pub const REPLAY_ENV_VAR: &str = "DEPGEN_REPLAY";
/// Reports each scanned source on stderr when set.
pub const VERBOSE_ENV_VAR: &str = "DEPGEN_VERBOSE";

/// Dispatch parsed arguments to their handler.
///
/// `DEPGEN_REPLAY` takes precedence over `DEPGEN_RECORD`; with neither set
/// the run uses the real disk.
///
/// # Errors
///
/// Returns an error string if the context cannot be built or the handler
/// fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let verbose = env::var_os(VERBOSE_ENV_VAR).is_some_and(|v| !v.is_empty());
    let ctx = context_from_env()?.verbose(verbose);
    dispatch_with_context(cli, &ctx)
}

fn context_from_env() -> Result<ServiceContext, String> {
    if let Ok(path) = env::var(REPLAY_ENV_VAR) {
        return ServiceContext::replaying(Path::new(&path));
    }
    if let Ok(path) = env::var(RECORD_ENV_VAR) {
        return Ok(ServiceContext::recording(Path::new(&path)));
    }
    Ok(ServiceContext::live())
}

/// Dispatch with the given service context.
///
/// # Errors
///
/// Returns an error string if config loading or the handler fails.
pub fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext) -> Result<(), String> {
    let config = || DepGenConfig::locate(ctx.fs.as_ref(), cli.config.as_deref());
    match &cli.command {
        None => generate::run(ctx, &config()?, &[]),
        Some(Command::Generate { targets }) => generate::run(ctx, &config()?, targets),
        Some(Command::Show { target, json }) => {
            show::run(ctx, &config()?, target.as_deref(), *json)
        }
        Some(Command::Extract { input, output, comment }) => {
            extract::run(ctx, input, output, comment.as_deref())
        }
        Some(Command::Targets) => targets::run(&config()?),
    }
}
