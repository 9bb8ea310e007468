use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub(crate) const DEFAULT_PAGE_SIZE: u32 = 5;
pub(crate) const DEFAULT_LATENCY_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) page_size: u32,
    pub(crate) latency: Duration,
    pub(crate) log_filter: String,
}

impl Config {
    pub(crate) fn from_env(interactive: bool) -> Result<Self> {
        let data_dir = data_dir()?;
        Self::from_lookup(&data_dir, interactive, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        data_dir: &Path,
        interactive: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let db_path = lookup("TXTRIAGE_DB")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("txtriage.db"));

        let page_size = match lookup("TXTRIAGE_PAGE_SIZE") {
            Some(raw) => {
                let size: u32 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("TXTRIAGE_PAGE_SIZE: '{raw}' is not a number"))?;
                if size == 0 {
                    anyhow::bail!("TXTRIAGE_PAGE_SIZE must be at least 1");
                }
                size
            }
            None => DEFAULT_PAGE_SIZE,
        };

        let latency_ms = match lookup("TXTRIAGE_LATENCY_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("TXTRIAGE_LATENCY_MS: '{raw}' is not a number"))?,
            None if interactive => DEFAULT_LATENCY_MS,
            None => 0,
        };

        let log_filter = lookup("TXTRIAGE_LOG").unwrap_or_else(|| "info".into());

        Ok(Self {
            db_path,
            log_path: data_dir.join("txtriage.log"),
            page_size,
            latency: Duration::from_millis(latency_ms),
            log_filter,
        })
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "txtriage", "TxTriage")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
