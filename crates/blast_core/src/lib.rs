//! blast_core: ray-marched block destruction + radial entity damage.
//!
//! An [`Explosion`] is built per detonation and consumed within one tick:
//! gather the affected-block set, apply entity damage/knockback, destroy
//! blocks, discard. The voxel grid and entity set are collaborators
//! supplied by the caller (`voxel_world::VoxelWorld` + a slice of
//! [`BlastTarget`] views).
//!
//! Determinism
//! - Per-ray budget jitter comes from the caller's seeded RNG; the affected
//!   set is emitted in sorted order so it can be replicated verbatim to
//!   observers rather than recomputed remotely.

#![forbid(unsafe_code)]

use glam::{IVec3, Vec3};
use rand::Rng;
use rand::rngs::SmallRng;
use std::collections::HashSet;
use voxel_world::{AIR, Aabb, BlockId, Material, VoxelWorld, sight_density};

/// Angular sampling grid dimension; only the cube's outer shell is rayed.
const SHELL: i32 = 16;
/// Fixed march increment in blocks.
const RAY_STEP: f32 = 0.3;
/// Blocks can never be affected beyond this radius, regardless of size.
pub const MAX_RADIUS: f32 = 16.0;

/// Which liquids are transparent to the blast (neither absorbing budget nor
/// destroyed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LiquidPolicy {
    /// Liquids absorb budget and can be destroyed like any block.
    #[default]
    Affect,
    IgnoreAll,
    IgnoreWater,
    IgnoreLava,
}

impl LiquidPolicy {
    #[inline]
    fn ignores(self, m: Material) -> bool {
        match self {
            LiquidPolicy::Affect => false,
            LiquidPolicy::IgnoreAll => m.is_liquid(),
            LiquidPolicy::IgnoreWater => m == Material::Water,
            LiquidPolicy::IgnoreLava => m == Material::Lava,
        }
    }
}

/// Stock bomb variants; each maps to a liquid policy and incendiary flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombKind {
    Standard,
    Water,
    Fire,
}

/// Entity view handed to the explosion by the caller (typically everything
/// inside [`Explosion::entity_box`]).
#[derive(Clone, Debug)]
pub struct BlastTarget {
    pub pos: Vec3,
    pub eye_height: f32,
    pub aabb: Aabb,
    /// Blast-protection enchantment level; attenuates knockback.
    pub protection_level: u32,
    pub immune_to_fire: bool,
}

/// Damage/knockback computed for one target; indices refer to the input
/// slice of `affect_entities`.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityImpact {
    pub target: usize,
    pub damage: f32,
    pub knockback: Vec3,
    pub burn_ticks: u32,
}

/// Result of a full detonation, consumed by the server for world mutation
/// and replication.
#[derive(Clone, Debug, Default)]
pub struct BlastOutcome {
    pub affected_blocks: Vec<IVec3>,
    pub impacts: Vec<EntityImpact>,
}

/// A single detonation. Constructed per event, consumed within the tick.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub origin: Vec3,
    pub radius: f32,
    /// 0.0 means distance-scaled damage via the quadratic falloff formula.
    pub damage: f32,
    pub destroys_blocks: bool,
    pub inflicts_damage: bool,
    pub incendiary: bool,
    pub liquid_policy: LiquidPolicy,
    /// Restrict destruction to one block kind (explodable blocks always pass).
    pub target_block: Option<BlockId>,
    pub motion_factor: f32,
    pub burn_ticks: u32,
    /// Opaque tag the host maps to its damage-source taxonomy.
    pub damage_tag: String,
    /// Restricts (or expands) block destruction; hot worlds halve it for
    /// non-fireproof blasts.
    pub destruction_factor: f32,
    fireproof: bool,
}

impl Explosion {
    pub fn new(origin: Vec3, radius: f32) -> Self {
        Self {
            origin,
            radius,
            damage: 0.0,
            destroys_blocks: true,
            inflicts_damage: true,
            incendiary: false,
            liquid_policy: LiquidPolicy::default(),
            target_block: None,
            motion_factor: 1.0,
            burn_ticks: 0,
            damage_tag: "explosion".to_string(),
            destruction_factor: 1.0,
            fireproof: false,
        }
    }

    /// Explosion pre-configured for a bomb variant.
    pub fn for_bomb(kind: BombKind, origin: Vec3, radius: f32) -> Self {
        let mut e = Self::new(origin, radius);
        match kind {
            BombKind::Standard => {}
            BombKind::Water => {
                e.liquid_policy = LiquidPolicy::IgnoreWater;
            }
            BombKind::Fire => {
                e.liquid_policy = LiquidPolicy::IgnoreLava;
                e.incendiary = true;
                e.burn_ticks = 100;
                e.fireproof = true;
            }
        }
        e
    }

    pub fn with_damage(mut self, amount: f32) -> Self {
        self.damage = amount;
        self
    }

    pub fn with_burn_ticks(mut self, ticks: u32) -> Self {
        self.burn_ticks = ticks;
        self
    }

    pub fn with_motion_factor(mut self, factor: f32) -> Self {
        self.motion_factor = factor;
        self
    }

    pub fn with_target_block(mut self, id: BlockId) -> Self {
        self.target_block = Some(id);
        self
    }

    pub fn with_damage_tag(mut self, tag: &str) -> Self {
        self.damage_tag = tag.to_string();
        self
    }

    pub fn with_destruction_factor(mut self, factor: f32) -> Self {
        self.destruction_factor = factor;
        self
    }

    /// True when the damage amount scales with distance (and fire chance
    /// with exposure) instead of being flat.
    #[inline]
    pub fn scales_with_distance(&self) -> bool {
        self.damage == 0.0
    }

    /// Effective block-destruction radius in `world`, never above
    /// [`MAX_RADIUS`]. Hot worlds halve destruction for non-fireproof blasts.
    pub fn destruction_radius(&self, world: &dyn VoxelWorld) -> f32 {
        let mut factor = self.destruction_factor;
        if world.is_hot() && !self.fireproof {
            factor *= 0.5;
        }
        (self.radius * factor).min(MAX_RADIUS)
    }

    /// Bounding box of side `2 * (radius + 1)` centered on the origin;
    /// entities outside it are unaffected.
    pub fn entity_box(&self) -> Aabb {
        Aabb::centered(self.origin, Vec3::splat(self.radius + 1.0))
    }

    /// Ray-march the angular sampling grid and return the deduplicated,
    /// sorted set of affected block coordinates.
    pub fn gather_affected_blocks(
        &self,
        world: &dyn VoxelWorld,
        rng: &mut SmallRng,
    ) -> Vec<IVec3> {
        let radius = self.destruction_radius(world);
        if radius <= 0.0 {
            return Vec::new();
        }
        let mut set: HashSet<IVec3> = HashSet::new();
        for i in 0..SHELL {
            for j in 0..SHELL {
                for k in 0..SHELL {
                    let on_shell = i == 0
                        || i == SHELL - 1
                        || j == 0
                        || j == SHELL - 1
                        || k == 0
                        || k == SHELL - 1;
                    if !on_shell {
                        continue;
                    }
                    let to_unit = |c: i32| c as f32 / (SHELL as f32 - 1.0) * 2.0 - 1.0;
                    let dir =
                        Vec3::new(to_unit(i), to_unit(j), to_unit(k)).normalize();
                    // Per-ray budget; jitter gives the blast its irregular edge.
                    let mut budget = radius * (0.7 + rng.random::<f32>() * 0.6);
                    let mut pos = self.origin;
                    while budget > 0.0 {
                        let cell = IVec3::new(
                            pos.x.floor() as i32,
                            pos.y.floor() as i32,
                            pos.z.floor() as i32,
                        );
                        let id = world.block_at(cell);
                        let def = world.registry().get(id);
                        let transparent_liquid =
                            def.material.is_liquid() && self.liquid_policy.ignores(def.material);
                        if id != AIR && !transparent_liquid {
                            budget -= (def.resistance + RAY_STEP) * RAY_STEP;
                        }
                        if budget > 0.0
                            && !transparent_liquid
                            && self.passes_target_filter(id, def.explodable)
                        {
                            set.insert(cell);
                        }
                        pos += dir * RAY_STEP;
                        budget -= RAY_STEP * 0.75;
                    }
                }
            }
        }
        let mut out: Vec<IVec3> = set.into_iter().collect();
        out.sort_unstable_by_key(|c| (c.x, c.y, c.z));
        out
    }

    #[inline]
    fn passes_target_filter(&self, id: BlockId, explodable: bool) -> bool {
        match self.target_block {
            None => true,
            Some(t) => id == t || (id != AIR && explodable),
        }
    }

    /// Compute per-entity damage, knockback, and ignition for targets
    /// gathered from [`Explosion::entity_box`]. Targets beyond the
    /// diameter-normalized distance 1.0 are skipped.
    pub fn affect_entities(
        &self,
        world: &dyn VoxelWorld,
        targets: &[BlastTarget],
        rng: &mut SmallRng,
    ) -> Vec<EntityImpact> {
        if !self.inflicts_damage {
            return Vec::new();
        }
        let diameter = self.radius * 2.0;
        let mut impacts = Vec::new();
        for (idx, t) in targets.iter().enumerate() {
            let d = if self.scales_with_distance() {
                t.pos.distance(self.origin) / diameter
            } else {
                0.0
            };
            if d > 1.0 {
                continue;
            }
            let eye = t.pos + Vec3::new(0.0, t.eye_height, 0.0);
            let delta = eye - self.origin;
            let dist = delta.length();
            if dist == 0.0 {
                continue;
            }
            let unit = delta / dist;
            let density = sight_density(world, self.origin, &t.aabb);
            let factor = (1.0 - d) * density;
            let damage = if self.scales_with_distance() {
                ((factor * factor + factor) / 2.0 * 8.0 * diameter + 1.0).trunc()
            } else {
                self.damage * factor
            };
            let burn_ticks = if self.incendiary
                && !t.immune_to_fire
                && (!self.scales_with_distance() || rng.random::<f32>() < factor)
            {
                self.burn_ticks
            } else {
                0
            };
            let exposure = blast_mitigation(t.protection_level, factor);
            let knockback = unit * exposure * self.motion_factor;
            impacts.push(EntityImpact {
                target: idx,
                damage,
                knockback,
                burn_ticks,
            });
        }
        impacts
    }

    /// Clear the affected blocks and, for incendiary blasts, fill a third of
    /// the emptied cells above opaque ground with fire.
    pub fn apply_block_destruction(
        &self,
        world: &mut dyn VoxelWorld,
        blocks: &[IVec3],
        rng: &mut SmallRng,
    ) {
        for &c in blocks {
            if world.block_at(c) != AIR {
                world.set_block(c, AIR);
            }
        }
        if self.incendiary {
            let fire = world.registry().find("fire");
            if let Some(fire) = fire {
                for &c in blocks {
                    let below = c - IVec3::Y;
                    if world.block_at(c) == AIR
                        && world.def_at(below).opaque
                        && rng.random_range(0..3) == 0
                    {
                        world.set_block(c, fire);
                    }
                }
            }
        }
    }

    /// Full single-tick pipeline: gather blocks, affect entities, destroy.
    pub fn detonate(
        &self,
        world: &mut dyn VoxelWorld,
        targets: &[BlastTarget],
        rng: &mut SmallRng,
    ) -> BlastOutcome {
        let affected_blocks = if self.destroys_blocks && self.destruction_factor > 0.0 {
            self.gather_affected_blocks(world, rng)
        } else {
            Vec::new()
        };
        let impacts = self.affect_entities(world, targets, rng);
        if self.destroys_blocks {
            self.apply_block_destruction(world, &affected_blocks, rng);
        }
        BlastOutcome {
            affected_blocks,
            impacts,
        }
    }
}

/// Blast-protection mitigation: each enchantment level sheds 15% of the
/// knockback exposure, floored at zero.
#[inline]
pub fn blast_mitigation(protection_level: u32, exposure: f32) -> f32 {
    exposure * (1.0 - 0.15 * protection_level as f32).max(0.0)
}
