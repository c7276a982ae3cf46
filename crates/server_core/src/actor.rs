//! Authoritative actor records and the store that owns them.

use combat_core::CombatState;
use glam::Vec3;
use voxel_world::Aabb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Team {
    Players,
    Monsters,
    Wild,
}

/// One live entity on the server.
#[derive(Debug)]
pub struct Actor {
    pub id: ActorId,
    pub team: Team,
    pub pos: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub height: f32,
    pub eye_height: f32,
    pub health: f32,
    pub max_health: f32,
    pub protection_level: u32,
    pub immune_to_fire: bool,
    pub fire_ticks: u32,
    pub xp: u32,
    pub combat: CombatState,
}

impl Actor {
    #[inline]
    pub fn alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: Vec3::new(
                self.pos.x - self.radius,
                self.pos.y,
                self.pos.z - self.radius,
            ),
            max: Vec3::new(
                self.pos.x + self.radius,
                self.pos.y + self.height,
                self.pos.z + self.radius,
            ),
        }
    }

    #[inline]
    pub fn eye_pos(&self) -> Vec3 {
        self.pos + Vec3::new(0.0, self.eye_height, 0.0)
    }
}

/// Flat store keyed by id. Ids are never reused within a session.
#[derive(Default, Debug)]
pub struct ActorStore {
    actors: Vec<Actor>,
    next_id: u32,
}

impl ActorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, team: Team, pos: Vec3, health: f32) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.push(Actor {
            id,
            team,
            pos,
            velocity: Vec3::ZERO,
            radius: 0.3,
            height: 1.8,
            eye_height: 1.62,
            health,
            max_health: health,
            protection_level: 0,
            immune_to_fire: false,
            fire_ticks: 0,
            xp: 0,
            combat: CombatState::new(),
        });
        id
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    /// Disjoint mutable access to two actors.
    pub fn get2_mut(&mut self, a: ActorId, b: ActorId) -> Option<(&mut Actor, &mut Actor)> {
        if a == b {
            return None;
        }
        let ia = self.actors.iter().position(|x| x.id == a)?;
        let ib = self.actors.iter().position(|x| x.id == b)?;
        let (lo, hi, swap) = if ia < ib {
            (ia, ib, false)
        } else {
            (ib, ia, true)
        };
        let (left, right) = self.actors.split_at_mut(hi);
        let first = &mut left[lo];
        let second = &mut right[0];
        Some(if swap { (second, first) } else { (first, second) })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Ids of living actors whose position lies inside `bounds`.
    pub fn ids_in_box(&self, bounds: &Aabb) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|a| a.alive() && bounds.contains(a.pos))
            .map(|a| a.id)
            .collect()
    }

    /// Drop dead actors, returning their ids in spawn order.
    pub fn remove_dead(&mut self) -> Vec<ActorId> {
        let dead: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|a| !a.alive())
            .map(|a| a.id)
            .collect();
        self.actors.retain(|a| a.alive());
        dead
    }
}
