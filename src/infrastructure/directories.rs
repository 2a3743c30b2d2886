use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

/// Creates the logs directory if needed and probes that it is writable
/// before the file logger starts appending to it.
pub fn ensure_logs_dir(cfg: &DirectoryConfig) -> Result<PathBuf> {
    let dir = PathBuf::from(&cfg.logs_dir);
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create logs directory {}", cfg.logs_dir))?;
    }

    let probe_file = dir.join(".write-test");
    fs::write(&probe_file, b"ok")
        .with_context(|| format!("logs directory {} is not writable", cfg.logs_dir))?;
    fs::remove_file(&probe_file)?;

    Ok(dir.canonicalize().unwrap_or(dir))
}
