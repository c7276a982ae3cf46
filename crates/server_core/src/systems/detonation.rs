//! Bomb detonation: blast the world, route damage, replicate to observers.

use blast_core::{BombKind, Explosion};
use combat_core::{AttackInput, DamageTags, DamageType, HurtOutcome};
use glam::Vec3;
use net_core::snapshot::ExplosionSync;

use crate::actor::{ActorId, Team};
use crate::schedule::Ctx;
use crate::{hash64, ServerState};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use voxel_world::VoxelWorld;

/// Squared-distance cutoff for explosion observers, in m².
const OBSERVER_CUTOFF_SQ: f32 = 4096.0;

/// Count down bomb fuses and detonate the expired ones. Each detonation
/// runs the full blast pipeline in one tick: block gathering, entity
/// impacts through the damage pipeline, world mutation, then one
/// `ExplosionSync` per nearby player.
pub fn detonation_apply(srv: &mut ServerState, ctx: &mut Ctx) {
    let bombs = std::mem::take(&mut srv.pending_detonations);
    for (i, bomb) in bombs.into_iter().enumerate() {
        if bomb.fuse > 0 {
            srv.pending_detonations.push(crate::ArmedBomb {
                fuse: bomb.fuse - 1,
                ..bomb
            });
            continue;
        }
        let req = bomb.request;
        let spec = match req.kind {
            BombKind::Standard => &srv.bombs.standard,
            BombKind::Water => &srv.bombs.water,
            BombKind::Fire => &srv.bombs.fire,
        };
        let mut explosion = Explosion::for_bomb(req.kind, req.origin, spec.radius)
            .with_damage(spec.damage)
            .with_motion_factor(spec.motion_factor);
        if spec.burn_ticks > 0 {
            explosion = explosion.with_burn_ticks(spec.burn_ticks);
        }
        if srv.combat_cfg.restrict_bombs_to_secret_stone {
            if let Some(id) = srv.world.registry().find("secret_stone") {
                explosion = explosion.with_target_block(id);
            }
        }

        let ids = srv.actors.ids_in_box(&explosion.entity_box());
        let targets: Vec<_> = ids
            .iter()
            .filter_map(|id| srv.actors.get(*id))
            .map(|a| blast_core::BlastTarget {
                pos: a.pos,
                eye_height: a.eye_height,
                aabb: a.aabb(),
                protection_level: a.protection_level,
                immune_to_fire: a.immune_to_fire,
            })
            .collect();

        // per-event stream keeps a detonation deterministic given its seed
        let mut rng = SmallRng::seed_from_u64(hash64(srv.tick_count, i as u64));
        let outcome = explosion.detonate(&mut srv.world, &targets, &mut rng);

        let mut tags = DamageTags::explosion();
        if explosion.incendiary {
            tags = tags.with(DamageType::Fire);
        }
        let mut knockbacks: Vec<(ActorId, Vec3)> = Vec::new();
        for impact in &outcome.impacts {
            let id = ids[impact.target];
            let Some(actor) = srv.actors.get_mut(id) else {
                continue;
            };
            let input = AttackInput {
                base_damage: impact.damage,
                tags: tags.clone(),
                victim_id: id.0,
                victim_health: actor.health,
                stun_ticks: 0,
                victim_stun_immune: false,
            };
            if let HurtOutcome::Landed { amount, .. } =
                combat_core::resolve_attack(&input, None, &mut actor.combat, &mut rng)
            {
                actor.health -= amount;
            }
            actor.velocity += impact.knockback;
            if impact.burn_ticks > 0 {
                actor.fire_ticks = actor.fire_ticks.max(impact.burn_ticks);
            }
            knockbacks.push((id, impact.knockback));
        }

        metrics::counter!("explosion.detonations").increment(1);
        metrics::histogram!("explosion.blocks").record(outcome.affected_blocks.len() as f64);

        let blocks: Vec<[i32; 3]> = outcome
            .affected_blocks
            .iter()
            .map(|c| [c.x, c.y, c.z])
            .collect();
        for observer in srv.actors.iter() {
            if observer.team != Team::Players {
                continue;
            }
            if observer.pos.distance_squared(req.origin) > OBSERVER_CUTOFF_SQ {
                continue;
            }
            let kb = knockbacks
                .iter()
                .find(|(id, _)| *id == observer.id)
                .map_or([0.0; 3], |(_, v)| [v.x, v.y, v.z]);
            ctx.sync.push((
                observer.id,
                ExplosionSync {
                    origin: [req.origin.x, req.origin.y, req.origin.z],
                    radius: explosion.radius,
                    blocks: blocks.clone(),
                    knockback: kb,
                },
            ));
        }
    }
}
