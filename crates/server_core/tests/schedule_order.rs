//! Guards the tick order: skill timers advance before attacks resolve, and
//! detonations mutate the world before deaths are reaped.
use server_core as sc;

#[test]
fn skills_tick_before_melee_and_detonations_before_reaping() {
    let order = sc::schedule::system_names_for_test();
    let skills = order
        .iter()
        .position(|n| *n == "buffs_and_skills_tick")
        .expect("system name present");
    let melee = order
        .iter()
        .position(|n| *n == "melee_resolve")
        .expect("system name present");
    let boom = order
        .iter()
        .position(|n| *n == "detonation_apply")
        .expect("system name present");
    let reap = order
        .iter()
        .position(|n| *n == "deaths_and_cleanup")
        .expect("system name present");
    assert!(skills < melee);
    assert!(melee < boom);
    assert!(boom < reap);
}
