//! Show which staged files a commit would stamp.

use serde::Serialize;

use crate::cli::{hooks, Context};
use crate::error::Error;
use crate::stamp::{file_ages, FileAge};

/// Status report, also printed as JSON.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub hook_installed: bool,
    pub files: Vec<FileAge>,
}

/// Run the status command.
pub fn run(ctx: &Context, json: bool) -> Result<(), Error> {
    let files = ctx.candidates()?;
    let report = StatusReport {
        hook_installed: hooks::hook_installed(ctx.root()),
        files: file_ages(ctx.root(), &files)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.hook_installed {
        println!("pre-commit hook: installed");
    } else {
        println!("pre-commit hook: not installed (run 'htmlstamp install-hook')");
    }

    if report.files.is_empty() {
        println!("No staged files to stamp.");
        return Ok(());
    }

    println!("Staged files to stamp:");
    for age in &report.files {
        println!(
            "  {}  (modified {})",
            age.path,
            age.modified.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    Ok(())
}
