use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success, warning};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally zipped.
    /// Returns the final backup path, or `None` when the user declined
    /// to overwrite an existing file.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool) -> AppResult<Option<PathBuf>> {
        let src = cfg.database_path();
        let dest = Path::new(dest_file);

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // 3️⃣ Existing destination → ask
        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        if final_target.exists() {
            warning(format!("The file '{}' already exists.", final_target.display()));
            if !confirm("Do you want to overwrite it?")? {
                info("Backup cancelled by user.");
                return Ok(None);
            }
        }

        // 4️⃣ Copy (or zip) the database
        if compress {
            compress_backup(&src, &final_target)?;
        } else {
            fs::copy(&src, &final_target)?;
        }

        success(format!("Backup created: {}", final_target.display()));
        Ok(Some(final_target))
    }
}

/// Write `src` into a new zip archive at `zip_path`.
fn compress_backup(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "company_data.db".to_string());

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(())
}
