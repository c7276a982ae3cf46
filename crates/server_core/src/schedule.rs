//! Ordered tick schedule over the authoritative state.
//!
//! Systems run in a fixed order; buffs and skill timers advance before any
//! attack resolves, and detonations destroy blocks before deaths are
//! reaped, so an explosion's hole and its kills land in the same tick.

use crate::actor::ActorId;
use crate::systems::{combat, detonation};
use crate::ServerState;
use net_core::snapshot::ExplosionSync;

/// Per-tick scratch: outbound replication and deaths observed this tick.
#[derive(Default)]
pub struct Ctx {
    pub sync: Vec<(ActorId, ExplosionSync)>,
    pub deaths: Vec<ActorId>,
}

pub struct Schedule;

impl Schedule {
    pub fn run(&mut self, srv: &mut ServerState, ctx: &mut Ctx) {
        combat::buffs_and_skills_tick(srv);
        combat::melee_resolve(srv, ctx);
        detonation::detonation_apply(srv, ctx);
        combat::fire_tick(srv);
        combat::deaths_and_cleanup(srv, ctx);
    }
}

/// System order, for structural tests.
pub fn system_names_for_test() -> Vec<&'static str> {
    vec![
        "buffs_and_skills_tick",
        "melee_resolve",
        "detonation_apply",
        "fire_tick",
        "deaths_and_cleanup",
    ]
}
