//! Stamp staged HTML with today's date.

use chrono::Utc;

use crate::cli::Context;
use crate::error::Error;
use crate::footer::{date_stamp, parse_date_stamp};
use crate::stamp::{stamp_all, StampOutcome};

/// Run the stamp command.
///
/// `date` overrides the current UTC date and must be `DD/Mon/YYYY`; `backup`
/// forces `.bkup` copies on even when the config leaves them off.
pub fn run(ctx: &Context, date: Option<String>, backup: bool) -> Result<(), Error> {
    let stamp = resolve_stamp(date.as_deref())?;
    let backup = backup || ctx.config.backup;

    let files = ctx.candidates()?;
    println!("Checking times of: {:?}", files);

    let results = stamp_all(&ctx.git, ctx.root(), &files, &stamp, backup)?;
    report(&results);

    Ok(())
}

/// Today's stamp, or the validated override.
pub(crate) fn resolve_stamp(date: Option<&str>) -> Result<String, Error> {
    match date {
        Some(date) => parse_date_stamp(date),
        None => Ok(date_stamp(Utc::now())),
    }
}

pub(crate) fn report(results: &[(String, StampOutcome)]) {
    for (file, outcome) in results {
        if let StampOutcome::Stamped { backup } = outcome {
            println!("Updated footer of {}", file);
            if let Some(backup) = backup {
                println!("Saved original as {}", backup.display());
            }
        }
    }
}
