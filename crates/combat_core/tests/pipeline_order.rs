//! Structural guard on the attack pipeline's stage order.
use combat_core::STAGE_NAMES;

fn idx(name: &str) -> usize {
    STAGE_NAMES
        .iter()
        .position(|n| *n == name)
        .unwrap_or_else(|| panic!("stage {name} present"))
}

#[test]
fn gates_precede_modifiers_and_combo_updates_last() {
    assert!(idx("attacker_stun_gate") < idx("evade_roll"));
    assert!(idx("evade_roll") < idx("defensive_skills"));
    assert!(idx("defensive_skills") < idx("combo_damage_bonus"));
    assert!(idx("armor_break_bypass") < idx("mortal_draw_double"));
    assert!(idx("attack_modifiers") < idx("weaknesses"));
    assert!(idx("weaknesses") < idx("defense_modifiers"));
    assert!(idx("defense_modifiers") < idx("resistances"));
    assert!(idx("resistances") < idx("offensive_impacts"));
    assert!(idx("combo_update") < idx("secondary_effects"));
}
