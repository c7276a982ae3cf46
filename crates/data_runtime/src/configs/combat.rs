//! Combat rules loaded from data/config/combat.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CombatCfg {
    /// When false, player actors ignore non-forced stuns.
    pub players_can_be_stunned: bool,
    /// When set, bombs only destroy the marked quest block kind.
    pub restrict_bombs_to_secret_stone: bool,
    pub combo_window_ticks: u32,
    pub combo_max_hits: usize,
}

impl Default for CombatCfg {
    fn default() -> Self {
        Self {
            players_can_be_stunned: false,
            restrict_bombs_to_secret_stone: false,
            combo_window_ticks: 20,
            combo_max_hits: 16,
        }
    }
}

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

fn clamp(mut cfg: CombatCfg) -> CombatCfg {
    if cfg.combo_window_ticks == 0 {
        cfg.combo_window_ticks = 1;
    }
    if cfg.combo_max_hits < 2 {
        cfg.combo_max_hits = 2;
    }
    cfg
}

/// Load the combat config from the default location, falling back to defaults.
pub fn load_default() -> Result<CombatCfg> {
    let path = data_root().join("config/combat.toml");
    if !path.is_file() {
        return Ok(CombatCfg::default());
    }
    let txt =
        std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let parsed: CombatCfg = toml::from_str(&txt).context("parse combat TOML")?;
    Ok(clamp(parsed))
}
