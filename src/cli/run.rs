//! The pre-commit entry: check, then stamp.

use tracing::info;

use crate::cli::stamp::{report, resolve_stamp};
use crate::cli::Context;
use crate::error::Error;
use crate::stamp::check_then_stamp;

/// Run the run command. A broken file aborts before anything is rewritten.
pub fn run(ctx: &Context, backup: bool) -> Result<(), Error> {
    let stamp = resolve_stamp(None)?;
    let backup = backup || ctx.config.backup;

    let files = ctx.candidates()?;
    info!(count = files.len(), "Checking and stamping staged files");

    let results = check_then_stamp(&ctx.git, ctx.root(), &files, &stamp, backup)?;
    report(&results);

    Ok(())
}
