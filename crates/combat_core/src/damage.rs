//! Damage typing and the type -> buff lookup tables used by the pipeline.

use crate::buff::Buff;

/// Elemental/typed damage categories recognized by resistances and
/// weaknesses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageType {
    Blast,
    Fire,
    Ice,
    Magic,
    Shock,
    Quake,
    Stun,
}

/// Resistance buff countering a damage type, if any.
pub fn resistance_buff(t: DamageType) -> Option<Buff> {
    match t {
        DamageType::Fire => Some(Buff::ResistFire),
        DamageType::Ice => Some(Buff::ResistIce),
        DamageType::Magic => Some(Buff::ResistMagic),
        DamageType::Shock => Some(Buff::ResistShock),
        DamageType::Quake => Some(Buff::ResistQuake),
        DamageType::Stun => Some(Buff::ResistStun),
        DamageType::Blast => None,
    }
}

/// Weakness buff amplifying a damage type, if any.
pub fn weakness_buff(t: DamageType) -> Option<Buff> {
    match t {
        DamageType::Fire => Some(Buff::WeaknessFire),
        DamageType::Ice => Some(Buff::WeaknessIce),
        DamageType::Magic => Some(Buff::WeaknessMagic),
        DamageType::Shock => Some(Buff::WeaknessShock),
        DamageType::Quake => Some(Buff::WeaknessQuake),
        DamageType::Stun => Some(Buff::WeaknessStun),
        DamageType::Blast => None,
    }
}

/// Tag set carried by one damage event. `fire`/`magic` mirror the engine's
/// coarse source flags and apply on top of the typed tags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DamageTags {
    types: Vec<DamageType>,
    pub fire: bool,
    pub magic: bool,
    /// Direct melee/projectile hit from another entity (defensive skills
    /// only intercept these).
    pub from_entity: bool,
}

impl DamageTags {
    pub fn melee() -> Self {
        Self {
            from_entity: true,
            ..Self::default()
        }
    }

    pub fn explosion() -> Self {
        Self::default().with(DamageType::Blast)
    }

    pub fn with(mut self, t: DamageType) -> Self {
        if !self.types.contains(&t) {
            self.types.push(t);
        }
        match t {
            DamageType::Fire => self.fire = true,
            DamageType::Magic => self.magic = true,
            _ => {}
        }
        self
    }

    #[inline]
    pub fn types(&self) -> &[DamageType] {
        &self.types
    }

    #[inline]
    pub fn has(&self, t: DamageType) -> bool {
        self.types.contains(&t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_tag_sets_fire_flag() {
        let tags = DamageTags::melee().with(DamageType::Fire);
        assert!(tags.fire);
        assert!(tags.from_entity);
        assert!(tags.has(DamageType::Fire));
    }

    #[test]
    fn tags_deduplicate() {
        let tags = DamageTags::default()
            .with(DamageType::Ice)
            .with(DamageType::Ice);
        assert_eq!(tags.types().len(), 1);
    }

    #[test]
    fn every_elemental_type_has_both_tables() {
        for t in [
            DamageType::Fire,
            DamageType::Ice,
            DamageType::Magic,
            DamageType::Shock,
            DamageType::Quake,
            DamageType::Stun,
        ] {
            assert!(resistance_buff(t).is_some());
            assert!(weakness_buff(t).is_some());
        }
        assert!(resistance_buff(DamageType::Blast).is_none());
    }
}
