//! Bomb tuning loaded from data/config/bombs.toml with defaults and
//! clamping.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Blast radius is capped here and again in the explosion engine.
const MAX_RADIUS: f32 = 16.0;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct BombSpec {
    pub radius: f32,
    /// 0 means distance-scaled damage.
    pub damage: f32,
    pub motion_factor: f32,
    pub burn_ticks: u32,
    pub fuse_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct BombSpecDb {
    pub standard: BombSpec,
    pub water: BombSpec,
    pub fire: BombSpec,
}

impl Default for BombSpecDb {
    fn default() -> Self {
        Self {
            standard: BombSpec {
                radius: 3.0,
                damage: 0.0,
                motion_factor: 1.0,
                burn_ticks: 0,
                fuse_ticks: 56,
            },
            water: BombSpec {
                radius: 2.0,
                damage: 0.0,
                motion_factor: 1.0,
                burn_ticks: 0,
                fuse_ticks: 56,
            },
            fire: BombSpec {
                radius: 3.0,
                damage: 0.0,
                motion_factor: 1.0,
                burn_ticks: 100,
                fuse_ticks: 56,
            },
        }
    }
}

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

fn clamp(mut db: BombSpecDb) -> BombSpecDb {
    for spec in [&mut db.standard, &mut db.water, &mut db.fire] {
        if spec.radius > MAX_RADIUS {
            spec.radius = MAX_RADIUS;
        }
        if spec.radius < 0.0 {
            spec.radius = 0.0;
        }
        if spec.motion_factor < 0.0 {
            spec.motion_factor = 0.0;
        }
    }
    db
}

/// Load bomb specs from the default location, falling back to defaults.
pub fn load_default() -> Result<BombSpecDb> {
    let path = data_root().join("config/bombs.toml");
    if !path.is_file() {
        return Ok(BombSpecDb::default());
    }
    let txt =
        std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let parsed: BombSpecDb = toml::from_str(&txt).context("parse bombs TOML")?;
    Ok(clamp(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_distance_scaled() {
        let db = BombSpecDb::default();
        assert_eq!(db.standard.damage, 0.0);
        assert!(db.fire.burn_ticks > 0);
        assert!(db.water.radius <= db.standard.radius);
    }

    #[test]
    fn clamp_caps_radius() {
        let mut db = BombSpecDb::default();
        db.standard.radius = 100.0;
        let db = clamp(db);
        assert_eq!(db.standard.radius, MAX_RADIUS);
    }
}
