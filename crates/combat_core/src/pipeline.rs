//! Attack resolution: gates, defensive interception, then the ordered
//! damage-modifier stages.

use rand::Rng;

use crate::buff::{Buff, BuffMap};
use crate::damage::{DamageTags, DamageType, resistance_buff, weakness_buff};
use crate::skills::{Interception, Loadout, SkillEffect, SkillSet};

/// Stage order of [`resolve_attack`], exposed for structural tests.
pub const STAGE_NAMES: [&str; 13] = [
    "attacker_stun_gate",
    "evade_roll",
    "defensive_skills",
    "combo_damage_bonus",
    "armor_break_bypass",
    "mortal_draw_double",
    "attack_modifiers",
    "weaknesses",
    "defense_modifiers",
    "resistances",
    "offensive_impacts",
    "combo_update",
    "secondary_effects",
];

/// Everything combat-related an actor owns.
#[derive(Debug, Default)]
pub struct CombatState {
    pub buffs: BuffMap,
    pub skills: SkillSet,
    pub loadout: Loadout,
}

impl CombatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// One authoritative tick: buffs, then skills. `pending_target_health`
    /// feeds the deferred ending-blow kill check.
    pub fn tick<R: Rng>(
        &mut self,
        pending_target_health: Option<f32>,
        rng: &mut R,
    ) -> Vec<SkillEffect> {
        self.buffs.tick();
        let fx = self.skills.tick(&mut self.loadout, pending_target_health, rng);
        for f in &fx {
            if let SkillEffect::DefenseDown {
                duration,
                amplifier,
            } = f
            {
                self.buffs.apply_simple(Buff::DefenseDown, *duration, *amplifier);
            }
        }
        fx
    }
}

/// One incoming hit before resolution.
#[derive(Clone, Debug)]
pub struct AttackInput {
    pub base_damage: f32,
    pub tags: DamageTags,
    pub victim_id: u32,
    /// Victim health before the hit, for the ending-blow xp roll.
    pub victim_health: f32,
    /// Stun applied on a landed hit carrying the stun damage type.
    pub stun_ticks: u32,
    /// Kind-level stun immunity (e.g. players with stun disabled).
    pub victim_stun_immune: bool,
}

impl AttackInput {
    pub fn melee(base_damage: f32, victim_id: u32, victim_health: f32) -> Self {
        Self {
            base_damage,
            tags: DamageTags::melee(),
            victim_id,
            victim_health,
            stun_ticks: 0,
            victim_stun_immune: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelReason {
    AttackerStunned,
    Evaded,
    Dodged,
    Parried { disarm: bool },
    /// Defender's sword break: the attacker's weapon takes the damage.
    SwordBroken,
    /// Mortal draw counter-guard.
    GuardDrawn,
}

/// Effects the caller applies to the world after a landed hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitEffect {
    /// Rising cut: upward velocity on the victim.
    Launch(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub enum HurtOutcome {
    Canceled(CancelReason),
    Landed {
        amount: f32,
        /// Armor break: skip armor and enchantment reduction downstream.
        armor_bypass: bool,
        effects: Vec<HitEffect>,
    },
}

impl HurtOutcome {
    pub fn landed_amount(&self) -> Option<f32> {
        match self {
            HurtOutcome::Landed { amount, .. } => Some(*amount),
            HurtOutcome::Canceled(_) => None,
        }
    }
}

fn weakness_multiplier(buffs: &BuffMap, tags: &DamageTags) -> f32 {
    let mut m = 1.0;
    for t in tags.types() {
        if let Some(b) = weakness_buff(*t) {
            m *= 1.0 + buffs.amplifier(b) as f32 * 0.01;
        }
    }
    // coarse source flags, unless already counted as a typed tag
    if tags.fire && !tags.has(DamageType::Fire) {
        m *= 1.0 + buffs.amplifier(Buff::WeaknessFire) as f32 * 0.01;
    }
    if tags.magic && !tags.has(DamageType::Magic) {
        m *= 1.0 + buffs.amplifier(Buff::WeaknessMagic) as f32 * 0.01;
    }
    m
}

fn resistance_multiplier(buffs: &BuffMap, tags: &DamageTags) -> f32 {
    let mut m = 1.0;
    for t in tags.types() {
        if let Some(b) = resistance_buff(*t) {
            m *= 1.0 - buffs.amplifier(b) as f32 * 0.01;
        }
    }
    if tags.fire && !tags.has(DamageType::Fire) {
        m *= 1.0 - buffs.amplifier(Buff::ResistFire) as f32 * 0.01;
    }
    if tags.magic && !tags.has(DamageType::Magic) {
        m *= 1.0 - buffs.amplifier(Buff::ResistMagic) as f32 * 0.01;
    }
    m
}

/// Run one attack through the full pipeline. `attacker` is absent for
/// environmental sources (explosions, fire); those skip the attacker-side
/// gates and hooks but still meet the victim's modifiers.
pub fn resolve_attack<R: Rng>(
    input: &AttackInput,
    mut attacker: Option<&mut CombatState>,
    victim: &mut CombatState,
    rng: &mut R,
) -> HurtOutcome {
    // attacker_stun_gate
    if let Some(a) = attacker.as_deref() {
        if a.buffs.is_stunned() {
            return HurtOutcome::Canceled(CancelReason::AttackerStunned);
        }
    }

    if input.tags.from_entity {
        // evade_roll
        let evade = victim.buffs.amplifier(Buff::EvadeUp) as f32 * 0.01;
        if evade > 0.0 {
            let penalty = victim.buffs.amplifier(Buff::EvadeDown) as f32 * 0.01;
            if rng.random::<f32>() < evade - penalty {
                return HurtOutcome::Canceled(CancelReason::Evaded);
            }
        }
        // defensive_skills
        if let Some(icept) = victim.skills.intercept(&mut victim.loadout, rng) {
            return HurtOutcome::Canceled(match icept {
                Interception::Dodged => CancelReason::Dodged,
                Interception::Parried { disarm } => CancelReason::Parried { disarm },
                Interception::SwordBroken => CancelReason::SwordBroken,
                Interception::GuardDrawn => CancelReason::GuardDrawn,
            });
        }
    }

    let mut amount = input.base_damage;
    let mut effects = Vec::new();
    let mut armor_bypass = false;

    if let Some(a) = attacker.as_deref_mut() {
        // combo_damage_bonus
        if a.skills.combo.in_progress() {
            amount += a.skills.combo.size() as f32;
        }
        // armor_break_bypass: charged strike skips every modifier below
        if a.skills.armor_break.on_impact() {
            armor_bypass = true;
        }
        if !armor_bypass {
            // mortal_draw_double
            if a.skills.mortal_draw.is_active() {
                amount *= a.skills.mortal_draw.on_impact();
            }
            // attack_modifiers
            amount *= 1.0 - a.buffs.amplifier(Buff::AttackDown) as f32 * 0.01;
            amount *= 1.0 + a.buffs.amplifier(Buff::AttackUp) as f32 * 0.01;
        }
    }

    if !armor_bypass {
        // weaknesses
        amount *= weakness_multiplier(&victim.buffs, &input.tags);
        // defense_modifiers
        let down = victim.buffs.amplifier(Buff::DefenseDown) as f32 * 0.01;
        let up = victim.buffs.amplifier(Buff::DefenseUp) as f32 * 0.01;
        amount *= 1.0 + down - up;
        // resistances
        amount *= resistance_multiplier(&victim.buffs, &input.tags);
    }

    if let Some(a) = attacker.as_deref_mut() {
        // offensive_impacts
        if !armor_bypass {
            if a.skills.rising_cut.on_impact() {
                effects.push(HitEffect::Launch(a.skills.rising_cut.launch_power()));
            } else if a.skills.ending_blow.is_active() {
                amount *= a.skills.ending_blow.on_impact(
                    &a.skills.combo,
                    input.victim_id,
                    input.victim_health,
                    rng,
                );
            }
        }
        // combo_update
        if amount > 0.0 {
            a.skills.combo.on_hit_target(input.victim_id, amount);
        }
    }

    if amount > 0.0 {
        victim.skills.combo.on_owner_hurt();
        // secondary_effects
        if input.stun_ticks > 0 && input.tags.has(DamageType::Stun) {
            victim
                .buffs
                .stun(input.stun_ticks, false, input.victim_stun_immune);
        }
    }

    HurtOutcome::Landed {
        amount: amount.max(0.0),
        armor_bypass,
        effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buff::BuffInstance;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn stunned_attacker_cannot_swing() {
        let mut attacker = CombatState::new();
        attacker.buffs.stun(20, true, false);
        let mut victim = CombatState::new();
        let input = AttackInput::melee(4.0, 1, 20.0);
        let out = resolve_attack(&input, Some(&mut attacker), &mut victim, &mut rng());
        assert_eq!(out, HurtOutcome::Canceled(CancelReason::AttackerStunned));
    }

    #[test]
    fn full_evade_always_cancels() {
        let mut victim = CombatState::new();
        victim.buffs.apply(BuffInstance::permanent(Buff::EvadeUp, 100));
        let input = AttackInput::melee(4.0, 1, 20.0);
        let mut r = rng();
        for _ in 0..32 {
            let out = resolve_attack(&input, None, &mut victim, &mut r);
            assert_eq!(out, HurtOutcome::Canceled(CancelReason::Evaded));
        }
    }

    #[test]
    fn evade_down_negates_evade_up() {
        let mut victim = CombatState::new();
        victim.buffs.apply(BuffInstance::permanent(Buff::EvadeUp, 100));
        victim.buffs.apply(BuffInstance::permanent(Buff::EvadeDown, 100));
        let input = AttackInput::melee(4.0, 1, 20.0);
        let out = resolve_attack(&input, None, &mut victim, &mut rng());
        assert!(matches!(out, HurtOutcome::Landed { .. }));
    }

    #[test]
    fn environmental_damage_skips_evade_and_skills() {
        let mut victim = CombatState::new();
        victim.buffs.apply(BuffInstance::permanent(Buff::EvadeUp, 100));
        victim.skills.sword_break.level = 1;
        victim.skills.sword_break.activate();
        let input = AttackInput {
            base_damage: 6.0,
            tags: DamageTags::explosion(),
            victim_id: 1,
            victim_health: 20.0,
            stun_ticks: 0,
            victim_stun_immune: false,
        };
        let out = resolve_attack(&input, None, &mut victim, &mut rng());
        assert_eq!(out.landed_amount(), Some(6.0));
    }

    #[test]
    fn modifier_stages_apply_in_order() {
        let mut attacker = CombatState::new();
        attacker.buffs.apply_simple(Buff::AttackUp, 100, 50);
        let mut victim = CombatState::new();
        victim.buffs.apply_simple(Buff::WeaknessFire, 100, 100);
        victim.buffs.apply_simple(Buff::DefenseUp, 100, 50);
        victim.buffs.apply_simple(Buff::ResistFire, 100, 50);
        let input = AttackInput {
            base_damage: 8.0,
            tags: DamageTags::melee().with(DamageType::Fire),
            victim_id: 1,
            victim_health: 20.0,
            stun_ticks: 0,
            victim_stun_immune: false,
        };
        let out = resolve_attack(&input, Some(&mut attacker), &mut victim, &mut rng());
        // 8 * 1.5 (attack up) * 2.0 (weakness) * 0.5 (defense up) * 0.5 (resist)
        assert_eq!(out.landed_amount(), Some(6.0));
    }

    #[test]
    fn combo_bonus_adds_chain_size() {
        let mut attacker = CombatState::new();
        attacker.skills.combo.on_hit_target(1, 2.0);
        attacker.skills.combo.on_hit_target(1, 2.0);
        let mut victim = CombatState::new();
        let input = AttackInput::melee(5.0, 1, 20.0);
        let out = resolve_attack(&input, Some(&mut attacker), &mut victim, &mut rng());
        assert_eq!(out.landed_amount(), Some(7.0));
        assert_eq!(attacker.skills.combo.size(), 3);
    }

    #[test]
    fn armor_break_bypasses_all_modifiers() {
        let mut attacker = CombatState::new();
        attacker.skills.armor_break.level = 2;
        attacker.skills.armor_break.begin_charge();
        for _ in 0..40 {
            attacker.skills.armor_break.tick(true);
        }
        let mut victim = CombatState::new();
        victim.buffs.apply_simple(Buff::DefenseUp, 100, 90);
        let input = AttackInput::melee(8.0, 1, 20.0);
        let out = resolve_attack(&input, Some(&mut attacker), &mut victim, &mut rng());
        assert_eq!(
            out,
            HurtOutcome::Landed {
                amount: 8.0,
                armor_bypass: true,
                effects: vec![]
            }
        );
    }

    #[test]
    fn mortal_draw_doubles_then_cools_down() {
        let mut attacker = CombatState::new();
        attacker.skills.mortal_draw.level = 1;
        attacker.loadout.hotbar[0] = Some(crate::skills::ItemKind::Sword);
        assert!(attacker.skills.mortal_draw.activate(&attacker.loadout));
        let mut victim = CombatState::new();
        let input = AttackInput::melee(3.0, 1, 20.0);
        let out = resolve_attack(&input, Some(&mut attacker), &mut victim, &mut rng());
        assert_eq!(out.landed_amount(), Some(6.0));
        assert!(!attacker.skills.mortal_draw.is_active());
    }

    #[test]
    fn landed_hit_breaks_victim_combo_and_stuns() {
        let mut victim = CombatState::new();
        victim.skills.combo.on_hit_target(9, 1.0);
        assert!(victim.skills.combo.in_progress());
        let input = AttackInput {
            base_damage: 5.0,
            tags: DamageTags::melee().with(DamageType::Stun),
            victim_id: 1,
            victim_health: 20.0,
            stun_ticks: 30,
            victim_stun_immune: false,
        };
        let out = resolve_attack(&input, None, &mut victim, &mut rng());
        assert!(matches!(out, HurtOutcome::Landed { .. }));
        assert!(!victim.skills.combo.in_progress());
        assert!(victim.buffs.is_stunned());
    }

    #[test]
    fn stage_listing_matches_pipeline() {
        assert_eq!(STAGE_NAMES.len(), 13);
        let gates = &STAGE_NAMES[..3];
        assert_eq!(
            gates,
            ["attacker_stun_gate", "evade_roll", "defensive_skills"]
        );
        let attack = STAGE_NAMES
            .iter()
            .position(|n| *n == "attack_modifiers")
            .unwrap();
        let weak = STAGE_NAMES.iter().position(|n| *n == "weaknesses").unwrap();
        let def = STAGE_NAMES
            .iter()
            .position(|n| *n == "defense_modifiers")
            .unwrap();
        let resist = STAGE_NAMES.iter().position(|n| *n == "resistances").unwrap();
        assert!(attack < weak && weak < def && def < resist);
    }
}
