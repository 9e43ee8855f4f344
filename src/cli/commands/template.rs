use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ensure_writable;
use crate::export::template::write_import_template;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Template { file, force } = cmd {
        let path = expand_tilde(file);
        ensure_writable(&path, *force)?;

        write_import_template(&path, cfg.locale.labels())?;
        success(format!("Import template written: {}", path.display()));
    }

    Ok(())
}
