//! Validate staged HTML before stamping.

use tracing::info;

use crate::cli::Context;
use crate::error::Error;
use crate::stamp::validate_all;

/// Run the check command. Fails on the first file that cannot be stamped.
pub fn run(ctx: &Context) -> Result<(), Error> {
    let files = ctx.candidates()?;
    info!(count = files.len(), "Checking staged files");
    validate_all(ctx.root(), &files)?;
    Ok(())
}
