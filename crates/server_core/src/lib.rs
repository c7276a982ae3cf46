//! server_core: authoritative combat and blast simulation state.
//!
//! Owns the voxel world, the actor store, and the per-tick event queues.
//! Systems in [`systems`] drain the queues in a fixed order each tick.

#![forbid(unsafe_code)]

pub mod actor;
pub mod schedule;
pub mod systems {
    pub mod boss;
    pub mod combat;
    pub mod detonation;
}
pub mod telemetry;
pub mod tick;

pub use actor::{Actor, ActorId, ActorStore, Team};

use blast_core::BombKind;
use data_runtime::configs::bombs::BombSpecDb;
use data_runtime::configs::combat::CombatCfg;
use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use voxel_world::{BlockRegistry, SparseWorld};

/// One queued melee swing, resolved by the combat system this tick.
#[derive(Clone, Copy, Debug)]
pub struct MeleeAttack {
    pub attacker: ActorId,
    pub victim: ActorId,
    pub base_damage: f32,
    /// Stun carried by the weapon, 0 for none.
    pub stun_ticks: u32,
}

/// One queued bomb detonation, resolved by the detonation system this tick.
#[derive(Clone, Copy, Debug)]
pub struct DetonationRequest {
    pub origin: Vec3,
    pub kind: BombKind,
    pub source: Option<ActorId>,
}

/// A placed bomb counting down its fuse; detonates when it reaches zero.
#[derive(Clone, Copy, Debug)]
pub struct ArmedBomb {
    pub request: DetonationRequest,
    pub fuse: u32,
}

/// Stable seed mix for deterministic per-event RNG streams.
pub(crate) fn hash64(a: u64, b: u64) -> u64 {
    // xorshift-like mix; stable across platforms
    let mut x = a ^ 0x9E3779B97F4A7C15u64;
    x ^= b.wrapping_mul(0xBF58476D1CE4E5B9u64).rotate_left(31);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EBu64);
    x ^ (x >> 31)
}

pub struct ServerState {
    pub world: SparseWorld,
    pub actors: ActorStore,
    pub combat_cfg: CombatCfg,
    pub bombs: BombSpecDb,
    pub rng: SmallRng,
    pub tick_count: u64,
    pub pending_attacks: Vec<MeleeAttack>,
    pub pending_detonations: Vec<ArmedBomb>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    pub fn new() -> Self {
        Self::with_seed(0xB007)
    }

    /// Build a state with a fixed RNG seed; configs fall back to defaults
    /// when the data directory is absent or malformed.
    pub fn with_seed(seed: u64) -> Self {
        let combat_cfg = match data_runtime::configs::combat::load_default() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("server: failed to load combat config: {e:#}");
                CombatCfg::default()
            }
        };
        let bombs = match data_runtime::configs::bombs::load_default() {
            Ok(b) => b,
            Err(e) => {
                log::warn!("server: failed to load bomb specs: {e:#}");
                BombSpecDb::default()
            }
        };
        Self {
            world: SparseWorld::new(BlockRegistry::with_defaults()),
            actors: ActorStore::new(),
            combat_cfg,
            bombs,
            rng: SmallRng::seed_from_u64(hash64(seed, 0)),
            tick_count: 0,
            pending_attacks: Vec::new(),
            pending_detonations: Vec::new(),
        }
    }

    /// Spawn an actor whose combo tracker follows the combat config.
    pub fn spawn_actor(&mut self, team: Team, pos: Vec3, health: f32) -> ActorId {
        let id = self.actors.spawn(team, pos, health);
        if let Some(a) = self.actors.get_mut(id) {
            a.combat.skills.combo = combat_core::skills::Combo::new(
                self.combat_cfg.combo_max_hits,
                self.combat_cfg.combo_window_ticks,
            );
        }
        id
    }

    pub fn queue_melee(&mut self, attack: MeleeAttack) {
        self.pending_attacks.push(attack);
    }

    /// Detonate on the next tick, skipping the fuse.
    pub fn queue_detonation(&mut self, req: DetonationRequest) {
        self.pending_detonations.push(ArmedBomb {
            request: req,
            fuse: 0,
        });
    }

    /// Place a bomb with its configured fuse. Returns the fuse length.
    pub fn place_bomb(&mut self, origin: Vec3, kind: BombKind, source: Option<ActorId>) -> u32 {
        let fuse = match kind {
            BombKind::Standard => self.bombs.standard.fuse_ticks,
            BombKind::Water => self.bombs.water.fuse_ticks,
            BombKind::Fire => self.bombs.fire.fuse_ticks,
        };
        self.pending_detonations.push(ArmedBomb {
            request: DetonationRequest { origin, kind, source },
            fuse,
        });
        fuse
    }
}
