//! Visualizer configuration, usually stored as `sortviz.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Visualizer configuration (TOML).
///
/// Missing fields default to the reference pacing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Number of values generated per run.
    pub element_count: usize,

    /// Seed for value generation. Unset means fresh entropy per controller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    pub pacing: PacingConfig,
}

/// Per-step delays and animation shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    /// Hold time for Compare and Snapshot frames.
    pub compare_delay_ms: u64,
    /// Hold time after the closing frame of a swap.
    pub swap_settle_delay_ms: u64,
    /// Interpolation steps of a move; the animation draws `swap_frame_count + 1` frames.
    pub swap_frame_count: u32,
    pub swap_frame_delay_ms: u64,
    /// Hold time after the closing frame of an insertion.
    pub insert_settle_delay_ms: u64,
    pub overwrite_delay_ms: u64,
    /// Peak vertical offset of a moving block.
    pub arc_height: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            compare_delay_ms: 500,
            swap_settle_delay_ms: 200,
            swap_frame_count: 20,
            swap_frame_delay_ms: 25,
            insert_settle_delay_ms: 500,
            overwrite_delay_ms: 100,
            arc_height: 50.0,
        }
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            element_count: 10,
            seed: None,
            pacing: PacingConfig::default(),
        }
    }
}

impl VisualizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.element_count == 0 {
            return Err(anyhow!("element_count must be > 0"));
        }
        if self.pacing.swap_frame_count == 0 {
            return Err(anyhow!("pacing.swap_frame_count must be > 0"));
        }
        if !self.pacing.arc_height.is_finite() {
            return Err(anyhow!("pacing.arc_height must be finite"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `VisualizerConfig::default()`.
pub fn load_config(path: &Path) -> Result<VisualizerConfig> {
    if !path.exists() {
        let cfg = VisualizerConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: VisualizerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &VisualizerConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

/// Write the default config to `path`.
///
/// Fails if the file already exists unless `force` is set.
pub fn init_config(path: &Path, force: bool) -> Result<VisualizerConfig> {
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    let cfg = VisualizerConfig::default();
    write_config(path, &cfg)?;
    Ok(cfg)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
