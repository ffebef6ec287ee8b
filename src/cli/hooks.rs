//! pre-commit hook installation and removal.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;

const BLOCK_START: &str = "# START htmlstamp";
const BLOCK_END: &str = "# END htmlstamp";

/// Hook body: validate, then stamp. `run` exits non-zero on a broken file.
const HOOK_BODY: &str = "htmlstamp run || exit 1";

fn managed_block() -> String {
    format!("{}\n{}\n{}\n", BLOCK_START, HOOK_BODY, BLOCK_END)
}

/// Path of the pre-commit hook for the repository at `root`.
pub fn hook_path(root: &Path) -> PathBuf {
    root.join(".git").join("hooks").join("pre-commit")
}

/// Check if our section is present in the pre-commit hook.
pub fn hook_installed(root: &Path) -> bool {
    fs::read_to_string(hook_path(root))
        .map(|content| content.contains(BLOCK_START))
        .unwrap_or(false)
}

/// Run the install-hook command.
pub fn install(root: &Path, force: bool) -> Result<(), Error> {
    let git_dir = root.join(".git");
    if !git_dir.is_dir() {
        return Err(Error::NotARepository(root.to_path_buf()));
    }

    let path = hook_path(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let existing = if path.exists() && !force {
        Some(fs::read_to_string(&path)?)
    } else {
        None
    };

    match install_content(existing.as_deref()) {
        Some(content) => {
            fs::write(&path, content)?;
            make_executable(&path)?;
            info!(path = %path.display(), "Installed pre-commit hook");
            println!("pre-commit hook installed.");
        }
        None => println!("pre-commit hook already installed."),
    }

    Ok(())
}

/// Run the uninstall-hook command.
pub fn uninstall(root: &Path) -> Result<(), Error> {
    let path = hook_path(root);
    if !path.exists() {
        println!("No pre-commit hook found.");
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let Some(cleaned) = remove_managed_block(&content) else {
        println!("pre-commit hook does not run htmlstamp.");
        return Ok(());
    };

    if cleaned.trim().is_empty() || cleaned.trim() == "#!/bin/sh" {
        fs::remove_file(&path)?;
    } else {
        fs::write(&path, cleaned)?;
    }
    info!(path = %path.display(), "Removed htmlstamp from pre-commit hook");
    println!("pre-commit hook removed.");

    Ok(())
}

/// New hook content, or `None` if `existing` already runs htmlstamp.
fn install_content(existing: Option<&str>) -> Option<String> {
    match existing {
        Some(existing) if existing.contains(BLOCK_START) => None,
        Some(existing) if !existing.trim().is_empty() => {
            Some(format!("{}\n\n{}", existing.trim_end(), managed_block()))
        }
        _ => Some(format!("#!/bin/sh\n\n{}", managed_block())),
    }
}

/// Content with the managed block cut out, or `None` if there is no block.
fn remove_managed_block(content: &str) -> Option<String> {
    let start = content.find(BLOCK_START)?;
    let end = start + content[start..].find(BLOCK_END)? + BLOCK_END.len();

    let before = content[..start].trim_end();
    let after = content[end..].trim_start();
    let joined = match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (false, true) => before.to_string(),
        (false, false) => format!("{}\n{}", before, after),
    };
    Some(format!("{}\n", joined.trim_end()))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), Error> {
    Ok(())
}
