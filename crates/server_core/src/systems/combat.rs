//! Combat systems: per-actor ticking, melee resolution, fire, deaths.

use combat_core::{
    AttackInput, CancelReason, DamageTags, DamageType, HitEffect, HurtOutcome, SkillEffect,
};

use crate::actor::{ActorId, Team};
use crate::schedule::Ctx;
use crate::ServerState;

/// Advance every actor's buffs and skill timers. Feeds each pending
/// ending-blow strike the current health of its target.
pub fn buffs_and_skills_tick(srv: &mut ServerState) {
    let pending: Vec<(ActorId, Option<f32>)> = srv
        .actors
        .iter()
        .map(|a| {
            let health = a
                .combat
                .skills
                .ending_blow
                .pending_target()
                .map(|t| srv.actors.get(ActorId(t)).map_or(0.0, |v| v.health));
            (a.id, health)
        })
        .collect();
    for (id, target_health) in pending {
        let Some(actor) = srv.actors.get_mut(id) else {
            continue;
        };
        let fx = actor.combat.tick(target_health, &mut srv.rng);
        for f in fx {
            match f {
                SkillEffect::BonusXp(xp) => actor.xp += xp,
                // sword swap and the defense penalty are handled inside CombatState
                SkillEffect::SwordDrawn { .. } | SkillEffect::DefenseDown { .. } => {}
            }
        }
    }
}

/// Drain queued melee swings through the attack pipeline.
pub fn melee_resolve(srv: &mut ServerState, _ctx: &mut Ctx) {
    let attacks = std::mem::take(&mut srv.pending_attacks);
    let players_stunnable = srv.combat_cfg.players_can_be_stunned;
    for ev in attacks {
        let Some((attacker, victim)) = srv.actors.get2_mut(ev.attacker, ev.victim) else {
            continue;
        };
        if !attacker.alive() || !victim.alive() {
            continue;
        }
        let mut tags = DamageTags::melee();
        if ev.stun_ticks > 0 {
            tags = tags.with(DamageType::Stun);
        }
        let input = AttackInput {
            base_damage: ev.base_damage,
            tags,
            victim_id: victim.id.0,
            victim_health: victim.health,
            stun_ticks: ev.stun_ticks,
            victim_stun_immune: victim.team == Team::Players && !players_stunnable,
        };
        match combat_core::resolve_attack(
            &input,
            Some(&mut attacker.combat),
            &mut victim.combat,
            &mut srv.rng,
        ) {
            HurtOutcome::Landed {
                amount, effects, ..
            } => {
                victim.health -= amount;
                for e in effects {
                    match e {
                        HitEffect::Launch(v) => victim.velocity.y += v,
                    }
                }
            }
            HurtOutcome::Canceled(CancelReason::Parried { disarm: true }) => {
                attacker.combat.loadout.held = None;
            }
            HurtOutcome::Canceled(reason) => {
                log::debug!(
                    "attack {:?} -> {:?} canceled: {reason:?}",
                    ev.attacker,
                    ev.victim
                );
            }
        }
    }
}

/// Burn down fire ticks; one heart every second of burning.
pub fn fire_tick(srv: &mut ServerState) {
    for actor in srv.actors.iter_mut() {
        if actor.fire_ticks == 0 {
            continue;
        }
        if !actor.immune_to_fire && actor.fire_ticks % 20 == 0 {
            actor.health -= 1.0;
            actor.combat.skills.combo.on_owner_hurt();
        }
        actor.fire_ticks -= 1;
    }
}

/// Reap dead actors and record them for observers.
pub fn deaths_and_cleanup(srv: &mut ServerState, ctx: &mut Ctx) {
    let dead = srv.actors.remove_dead();
    if !dead.is_empty() {
        metrics::counter!("combat.deaths").increment(dead.len() as u64);
        for id in &dead {
            log::info!("actor {id:?} died");
        }
        ctx.deaths.extend(dead);
    }
}
