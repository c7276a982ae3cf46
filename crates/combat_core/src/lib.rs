//! Buffs, typed damage, combat skills, and the attack resolution pipeline.
//!
//! Everything here is engine-agnostic and tick-driven: the server crate owns
//! actors and calls into [`resolve_attack`] and the per-entity tick methods.

#![forbid(unsafe_code)]

pub mod buff;
pub mod damage;
pub mod pipeline;
pub mod skills;

pub use buff::{Buff, BuffEvent, BuffInstance, BuffMap};
pub use damage::{DamageTags, DamageType, resistance_buff, weakness_buff};
pub use pipeline::{
    AttackInput, CancelReason, CombatState, HitEffect, HurtOutcome, STAGE_NAMES, resolve_attack,
};
pub use skills::{Interception, ItemKind, Loadout, SkillEffect, SkillSet};
