//! Managed attachments directory.

use crate::errors::{AppError, AppResult};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy `source` into `dir` as `<YYYYmmddHHMMSS>_<file name>`.
pub fn store_attachment(dir: &Path, source: &Path) -> AppResult<PathBuf> {
    if !source.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Attachment not found: {}", source.display()),
        )
        .into());
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| AppError::Other(format!("invalid attachment path: {}", source.display())))?
        .to_string_lossy();

    fs::create_dir_all(dir)?;
    let dest = dir.join(format!(
        "{}_{}",
        Local::now().format("%Y%m%d%H%M%S"),
        file_name
    ));

    fs::copy(source, &dest)?;
    Ok(dest)
}

/// Open a stored file with the platform's default application.
pub fn open_with_system(path: &Path) -> AppResult<()> {
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Attachment file missing: {}", path.display()),
        )
        .into());
    }

    #[cfg(target_os = "windows")]
    let status = std::process::Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .status()?;

    #[cfg(target_os = "macos")]
    let status = std::process::Command::new("open").arg(path).status()?;

    #[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
    let status = std::process::Command::new("xdg-open").arg(path).status()?;

    if !status.success() {
        return Err(AppError::Other(format!(
            "could not open {} (exit status {})",
            path.display(),
            status
        )));
    }
    Ok(())
}
