//! voxel_world: block registry + sparse voxel world collaborator.
//!
//! Scope
//! - `BlockId`/`BlockDef`/`BlockRegistry`: block identity, blast resistance,
//!   material class, and capability flags.
//! - `VoxelWorld`: the minimal world-grid contract the combat/blast layers
//!   talk to; a host engine supplies its own implementation.
//! - `SparseWorld`: hash-map backed implementation used by tests and demos.
//! - `Aabb` + grid raycast helpers (see `raycast` module).

#![forbid(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

use glam::{IVec3, Vec3};
use std::collections::HashMap;

pub mod raycast;

pub use raycast::{RayHit, raycast_solid, sight_density};

/// Stable identifier for a block kind within a [`BlockRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u16);

/// Id 0 is always air.
pub const AIR: BlockId = BlockId(0);

/// Coarse material class; drives liquid filtering and line-of-sight checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
    Air,
    Solid,
    Water,
    Lava,
}

impl Material {
    #[inline]
    pub fn is_liquid(self) -> bool {
        matches!(self, Material::Water | Material::Lava)
    }
}

/// Static properties of a block kind.
#[derive(Clone, Debug)]
pub struct BlockDef {
    pub name: String,
    /// Blast resistance absorbed per ray step (see `blast_core`).
    pub resistance: f32,
    pub material: Material,
    /// Destructible even when an explosion restricts its target block.
    pub explodable: bool,
    /// Blocks line of sight for density sampling.
    pub opaque: bool,
}

impl BlockDef {
    pub fn solid(name: &str, resistance: f32) -> Self {
        Self {
            name: name.to_string(),
            resistance,
            material: Material::Solid,
            explodable: false,
            opaque: true,
        }
    }
}

/// Vec-indexed block table; id 0 is reserved for air.
#[derive(Debug)]
pub struct BlockRegistry {
    defs: Vec<BlockDef>,
}

impl BlockRegistry {
    /// Empty registry containing only air.
    pub fn new() -> Self {
        Self {
            defs: vec![BlockDef {
                name: "air".to_string(),
                resistance: 0.0,
                material: Material::Air,
                explodable: false,
                opaque: false,
            }],
        }
    }

    /// Registry with the stock block set used by demos and tests.
    pub fn with_defaults() -> Self {
        let mut r = Self::new();
        r.register(BlockDef::solid("stone", 6.0));
        r.register(BlockDef::solid("dirt", 0.5));
        r.register(BlockDef {
            explodable: true,
            ..BlockDef::solid("secret_stone", 6.0)
        });
        r.register(BlockDef {
            name: "water".to_string(),
            resistance: 500.0,
            material: Material::Water,
            explodable: false,
            opaque: false,
        });
        r.register(BlockDef {
            name: "lava".to_string(),
            resistance: 500.0,
            material: Material::Lava,
            explodable: false,
            opaque: false,
        });
        r.register(BlockDef {
            name: "fire".to_string(),
            resistance: 0.0,
            material: Material::Solid,
            explodable: false,
            opaque: false,
        });
        r.register(BlockDef::solid("wood", 2.0));
        r
    }

    /// Appends a block definition and returns its id.
    pub fn register(&mut self, def: BlockDef) -> BlockId {
        let id = BlockId(self.defs.len() as u16);
        self.defs.push(def);
        id
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> &BlockDef {
        &self.defs[id.0 as usize]
    }

    /// Look a block up by name.
    pub fn find(&self, name: &str) -> Option<BlockId> {
        self.defs
            .iter()
            .position(|d| d.name == name)
            .map(|i| BlockId(i as u16))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// World-grid contract consumed by the blast and combat layers. The host
/// engine owns chunk storage; this crate only ships the sparse test world.
pub trait VoxelWorld {
    fn block_at(&self, pos: IVec3) -> BlockId;
    fn set_block(&mut self, pos: IVec3, id: BlockId);
    fn registry(&self) -> &BlockRegistry;

    /// Hot dimensions halve block destruction for non-fire bombs.
    fn is_hot(&self) -> bool {
        false
    }

    #[inline]
    fn def_at(&self, pos: IVec3) -> &BlockDef {
        self.registry().get(self.block_at(pos))
    }

    #[inline]
    fn resistance_at(&self, pos: IVec3) -> f32 {
        self.def_at(pos).resistance
    }

    #[inline]
    fn material_at(&self, pos: IVec3) -> Material {
        self.def_at(pos).material
    }
}

/// Hash-map backed voxel world; unset coordinates are air.
pub struct SparseWorld {
    registry: BlockRegistry,
    blocks: HashMap<IVec3, BlockId>,
    pub hot: bool,
}

impl SparseWorld {
    pub fn new(registry: BlockRegistry) -> Self {
        Self {
            registry,
            blocks: HashMap::new(),
            hot: false,
        }
    }

    /// Fill an inclusive box with one block kind.
    pub fn fill(&mut self, min: IVec3, max: IVec3, id: BlockId) {
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    self.blocks.insert(IVec3::new(x, y, z), id);
                }
            }
        }
    }

    /// Number of non-air blocks present.
    pub fn solid_count(&self) -> usize {
        self.blocks.values().filter(|&&b| b != AIR).count()
    }
}

impl VoxelWorld for SparseWorld {
    #[inline]
    fn block_at(&self, pos: IVec3) -> BlockId {
        self.blocks.get(&pos).copied().unwrap_or(AIR)
    }

    fn set_block(&mut self, pos: IVec3, id: BlockId) {
        if id == AIR {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, id);
        }
    }

    #[inline]
    fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    #[inline]
    fn is_hot(&self) -> bool {
        self.hot
    }
}

/// Axis-aligned box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of half-side `half` centered on `c`.
    pub fn centered(c: Vec3, half: Vec3) -> Self {
        Self {
            min: c - half,
            max: c + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn expand(&self, by: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(by),
            max: self.max + Vec3::splat(by),
        }
    }
}
