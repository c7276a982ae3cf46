//! Temple boss spawning via a tagged-variant factory registry.
//!
//! Each boss kind maps to a plain function that shapes a freshly spawned
//! actor. Unknown biomes degrade to no spawn with a warning.

use combat_core::{Buff, BuffInstance};
use glam::Vec3;

use crate::actor::{Actor, ActorId, Team};
use crate::ServerState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossKind {
    Hell,
    Desert,
    Forest,
    Taiga,
    Ocean,
    Swamp,
    Mountain,
}

impl BossKind {
    /// Boss kind generated for a biome, if any.
    pub fn by_biome(biome: &str) -> Option<Self> {
        match biome {
            "hell" => Some(Self::Hell),
            "desert" | "deserthills" => Some(Self::Desert),
            "forest" | "foresthills" => Some(Self::Forest),
            "taiga" | "taigahills" | "iceplains" => Some(Self::Taiga),
            "ocean" | "frozenocean" => Some(Self::Ocean),
            "swampland" => Some(Self::Swamp),
            "extremehills" | "extremehillsedge" => Some(Self::Mountain),
            _ => None,
        }
    }
}

type BossFactory = fn(&mut Actor);

fn factory_for(kind: BossKind) -> BossFactory {
    match kind {
        BossKind::Hell => |a| {
            a.max_health = 50.0;
            a.health = 50.0;
            a.immune_to_fire = true;
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::ResistFire, 100));
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::WeaknessIce, 100));
        },
        BossKind::Desert => |a| {
            a.max_health = 40.0;
            a.health = 40.0;
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::ResistFire, 50));
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::ResistShock, 50));
        },
        BossKind::Forest => |a| {
            a.max_health = 30.0;
            a.health = 30.0;
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::EvadeUp, 25));
        },
        BossKind::Taiga => |a| {
            a.max_health = 40.0;
            a.health = 40.0;
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::ResistIce, 100));
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::WeaknessFire, 100));
        },
        BossKind::Ocean => |a| {
            a.max_health = 40.0;
            a.health = 40.0;
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::ResistMagic, 50));
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::WeaknessShock, 50));
        },
        BossKind::Swamp => |a| {
            a.max_health = 35.0;
            a.health = 35.0;
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::ResistMagic, 50));
        },
        BossKind::Mountain => |a| {
            a.max_health = 60.0;
            a.health = 60.0;
            a.protection_level = 2;
            a.combat
                .buffs
                .apply(BuffInstance::permanent(Buff::ResistQuake, 100));
        },
    }
}

/// Spawn a temple boss at `pos`. Returns the actor id, or `None` with a
/// warning when the biome has no boss.
pub fn spawn_boss_for_biome(
    srv: &mut ServerState,
    biome: &str,
    pos: Vec3,
) -> Option<ActorId> {
    let Some(kind) = BossKind::by_biome(biome) else {
        log::warn!("server: no boss registered for biome '{biome}'");
        return None;
    };
    Some(spawn_boss(srv, kind, pos))
}

pub fn spawn_boss(srv: &mut ServerState, kind: BossKind, pos: Vec3) -> ActorId {
    let id = srv.spawn_actor(Team::Monsters, pos, 1.0);
    if let Some(actor) = srv.actors.get_mut(id) {
        factory_for(kind)(actor);
    }
    log::info!("server: spawned {kind:?} boss as {id:?}");
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hell_boss_is_fireproof() {
        let mut srv = ServerState::with_seed(2);
        let id = spawn_boss(&mut srv, BossKind::Hell, Vec3::ZERO);
        let boss = srv.actors.get(id).unwrap();
        assert!(boss.immune_to_fire);
        assert!(boss.combat.buffs.is_permanent(Buff::ResistFire));
        assert_eq!(boss.health, 50.0);
    }

    #[test]
    fn unknown_biome_degrades_to_none() {
        let mut srv = ServerState::with_seed(2);
        assert!(spawn_boss_for_biome(&mut srv, "mushroomisland", Vec3::ZERO).is_none());
        assert!(srv.actors.is_empty());
    }

    #[test]
    fn biome_lookup_covers_variants() {
        assert_eq!(BossKind::by_biome("frozenocean"), Some(BossKind::Ocean));
        assert_eq!(BossKind::by_biome("deserthills"), Some(BossKind::Desert));
        assert_eq!(BossKind::by_biome("plains"), None);
    }
}
