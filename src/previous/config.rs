use crate::previous::clock::ReferenceClock;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub dir: PathBuf,
    pub extension: String,
    pub id_column: String,
    pub size_column: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("archive/data"),
            extension: "csv".to_string(),
            id_column: "student_id".to_string(),
            size_column: "file_size".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClockConfig {
    /// IANA zone name. Unset means the process's local clock.
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WarnConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LookupConfig {
    pub archive: ArchiveConfig,
    pub clock: ClockConfig,
    pub warn: WarnConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialLookupConfig {
    archive: Option<ArchiveConfig>,
    clock: Option<ClockConfig>,
    warn: Option<WarnConfig>,
}

/// Values given on the command line; each one replaces the file/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub archive_dir: Option<PathBuf>,
    pub timezone: Option<String>,
    pub verbose: bool,
}

impl LookupConfig {
    pub fn reference_clock(&self) -> Result<ReferenceClock> {
        ReferenceClock::from_timezone(self.clock.timezone.as_deref())
    }
}

fn validate(cfg: &LookupConfig) -> Result<()> {
    let ext = cfg.archive.extension.trim();
    if ext.is_empty() {
        return Err(anyhow!("invalid archive extension: cannot be empty"));
    }
    if ext.starts_with('.') || ext.contains(['/', '\\']) {
        return Err(anyhow!(
            "invalid archive extension `{ext}`: give the bare extension, e.g. `csv`"
        ));
    }
    if cfg.archive.id_column.trim().is_empty() {
        return Err(anyhow!("invalid id column: cannot be empty"));
    }
    if cfg.archive.size_column.trim().is_empty() {
        return Err(anyhow!("invalid size column: cannot be empty"));
    }
    cfg.reference_clock()?;
    Ok(())
}

fn merge_file_config(base: &mut LookupConfig, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(path)
        .map_err(|err| anyhow!("failed to read config {}: {err}", path.display()))?;
    let parsed: PartialLookupConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse config {}: {err}", path.display()))?;
    if let Some(archive) = parsed.archive {
        base.archive = archive;
    }
    if let Some(clock) = parsed.clock {
        base.clock = clock;
    }
    if let Some(warn) = parsed.warn {
        base.warn = warn;
    }
    Ok(())
}

fn apply_overrides(cfg: &mut LookupConfig, overrides: &ConfigOverrides) {
    if let Some(dir) = &overrides.archive_dir {
        cfg.archive.dir = dir.clone();
    }
    if let Some(tz) = overrides.timezone.as_deref().map(str::trim) {
        cfg.clock.timezone = (!tz.is_empty()).then(|| tz.to_string());
    }
    if overrides.verbose {
        cfg.warn.enabled = true;
    }
}

pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<LookupConfig> {
    let mut cfg = LookupConfig::default();
    if let Some(path) = path {
        merge_file_config(&mut cfg, path)?;
    }
    apply_overrides(&mut cfg, overrides);

    validate(&cfg)?;
    Ok(cfg)
}
