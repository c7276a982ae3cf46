//! Interest management (who gets which event).
//!
//! Explosions replicate to observers near the blast; everything else is a
//! simple spherical inclusion test.

/// Squared-distance cutoff for explosion observers, in m².
pub const EXPLOSION_INTEREST_SQ: f32 = 4096.0;

/// Interest providers decide whether to include an item for a given client.
pub trait InterestProvider<T> {
    fn in_interest(&self, item: &T) -> bool;
}

/// Types that expose a point in world space for interest testing.
pub trait HasPoint {
    fn point(&self) -> [f32; 3];
}

/// Spherical interest volume in world coordinates.
#[derive(Clone, Copy, Debug)]
pub struct SphereInterest {
    pub center: [f32; 3],
    pub radius: f32,
}

impl SphereInterest {
    /// Observer volume for an explosion at `center`.
    pub fn for_explosion(center: [f32; 3]) -> Self {
        Self {
            center,
            radius: EXPLOSION_INTEREST_SQ.sqrt(),
        }
    }
}

impl<T: HasPoint> InterestProvider<T> for SphereInterest {
    fn in_interest(&self, item: &T) -> bool {
        let p = item.point();
        let dx = p[0] - self.center[0];
        let dy = p[1] - self.center[1];
        let dz = p[2] - self.center[2];
        dx * dx + dy * dy + dz * dz <= self.radius * self.radius
    }
}
