//! Grid raycast (Amanatides & Woo DDA) and line-of-sight density sampling.
//!
//! The DDA walks signed voxel coordinates; there is no grid boundary, the
//! walk stops at `max_dist` or on the first opaque block.

use crate::{Aabb, VoxelWorld};
use glam::{IVec3, Vec3};

/// First opaque voxel hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayHit {
    pub voxel: IVec3,
}

/// March from `origin` along `dir` up to `max_dist`, returning the first
/// voxel whose block is opaque. Zero-length directions return `None`.
pub fn raycast_solid(
    world: &dyn VoxelWorld,
    origin: Vec3,
    dir: Vec3,
    max_dist: f32,
) -> Option<RayHit> {
    if dir.length_squared() <= 1e-12 {
        return None;
    }
    let d = dir.normalize();
    let mut x = origin.x.floor() as i32;
    let mut y = origin.y.floor() as i32;
    let mut z = origin.z.floor() as i32;
    // Starting inside an opaque block counts as an immediate hit.
    if world.def_at(IVec3::new(x, y, z)).opaque {
        return Some(RayHit {
            voxel: IVec3::new(x, y, z),
        });
    }
    let step = |c: f32| -> i32 {
        if c > 0.0 {
            1
        } else if c < 0.0 {
            -1
        } else {
            0
        }
    };
    let (step_x, step_y, step_z) = (step(d.x), step(d.y), step(d.z));
    let inf = f32::INFINITY;
    let next_boundary = |p: f32, dir: i32| -> f32 {
        let f = p - p.floor();
        if dir > 0 { 1.0 - f } else { f }
    };
    let mut t_max_x = if step_x == 0 {
        inf
    } else {
        next_boundary(origin.x, step_x) / d.x.abs()
    };
    let mut t_max_y = if step_y == 0 {
        inf
    } else {
        next_boundary(origin.y, step_y) / d.y.abs()
    };
    let mut t_max_z = if step_z == 0 {
        inf
    } else {
        next_boundary(origin.z, step_z) / d.z.abs()
    };
    let t_delta_x = if step_x == 0 { inf } else { 1.0 / d.x.abs() };
    let t_delta_y = if step_y == 0 { inf } else { 1.0 / d.y.abs() };
    let t_delta_z = if step_z == 0 { inf } else { 1.0 / d.z.abs() };

    let mut t = 0.0f32;
    // One cell per unit distance per axis, with slack for diagonal walks.
    let safety_steps = (max_dist.ceil() as usize + 2) * 4;
    for _ in 0..safety_steps {
        if t > max_dist {
            break;
        }
        if t_max_x <= t_max_y && t_max_x <= t_max_z {
            x += step_x;
            t = t_max_x;
            t_max_x += t_delta_x;
        } else if t_max_y <= t_max_z {
            y += step_y;
            t = t_max_y;
            t_max_y += t_delta_y;
        } else {
            z += step_z;
            t = t_max_z;
            t_max_z += t_delta_z;
        }
        if t > max_dist {
            break;
        }
        if world.def_at(IVec3::new(x, y, z)).opaque {
            return Some(RayHit {
                voxel: IVec3::new(x, y, z),
            });
        }
    }
    None
}

/// True when the segment `from -> to` crosses no opaque block.
pub fn line_unobstructed(world: &dyn VoxelWorld, from: Vec3, to: Vec3) -> bool {
    let delta = to - from;
    let dist = delta.length();
    if dist <= 1e-6 {
        return true;
    }
    raycast_solid(world, from, delta, dist).is_none()
}

/// Fraction of sample points inside `target` with an unobstructed line to
/// `from`. Sampling resolution follows the box extents, so small targets
/// still get a meaningful estimate.
pub fn sight_density(world: &dyn VoxelWorld, from: Vec3, target: &Aabb) -> f32 {
    let ext = target.max - target.min;
    let step = Vec3::new(
        1.0 / (ext.x * 2.0 + 1.0),
        1.0 / (ext.y * 2.0 + 1.0),
        1.0 / (ext.z * 2.0 + 1.0),
    );
    if !step.is_finite() || step.min_element() <= 0.0 {
        return 0.0;
    }
    let mut seen = 0u32;
    let mut total = 0u32;
    let mut fx = 0.0f32;
    while fx <= 1.0 {
        let mut fy = 0.0f32;
        while fy <= 1.0 {
            let mut fz = 0.0f32;
            while fz <= 1.0 {
                let p = target.min + ext * Vec3::new(fx, fy, fz);
                if line_unobstructed(world, p, from) {
                    seen += 1;
                }
                total += 1;
                fz += step.z;
            }
            fy += step.y;
        }
        fx += step.x;
    }
    if total == 0 {
        0.0
    } else {
        seen as f32 / total as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockRegistry, SparseWorld};

    fn world_with_stone_at(cells: &[(i32, i32, i32)]) -> SparseWorld {
        let mut w = SparseWorld::new(BlockRegistry::with_defaults());
        let stone = w.registry().find("stone").unwrap();
        for &(x, y, z) in cells {
            w.set_block(IVec3::new(x, y, z), stone);
        }
        w
    }

    #[test]
    fn dda_hits_axis_aligned_voxel() {
        let w = world_with_stone_at(&[(5, 5, 5)]);
        let hit = raycast_solid(&w, Vec3::new(0.0, 5.2, 5.2), Vec3::X, 100.0).unwrap();
        assert_eq!(hit.voxel, IVec3::new(5, 5, 5));
    }

    #[test]
    fn dda_diagonal_and_negative_coords() {
        let w = world_with_stone_at(&[(-7, -7, -7)]);
        let hit = raycast_solid(
            &w,
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::splat(-1.0),
            100.0,
        )
        .unwrap();
        assert_eq!(hit.voxel, IVec3::new(-7, -7, -7));
    }

    #[test]
    fn dda_respects_max_dist() {
        let w = world_with_stone_at(&[(10, 0, 0)]);
        assert!(raycast_solid(&w, Vec3::new(0.5, 0.5, 0.5), Vec3::X, 5.0).is_none());
        assert!(raycast_solid(&w, Vec3::new(0.5, 0.5, 0.5), Vec3::X, 50.0).is_some());
    }

    #[test]
    fn density_is_one_in_open_air_and_zero_behind_wall() {
        let open = world_with_stone_at(&[]);
        let target = Aabb::centered(Vec3::new(6.0, 0.5, 0.5), Vec3::splat(0.4));
        let from = Vec3::new(0.5, 0.5, 0.5);
        assert!((sight_density(&open, from, &target) - 1.0).abs() < 1e-6);

        // 5x5 wall between origin and the target
        let mut cells = Vec::new();
        for y in -2..=2 {
            for z in -2..=2 {
                cells.push((3, y, z));
            }
        }
        let walled = world_with_stone_at(&cells);
        assert_eq!(sight_density(&walled, from, &target), 0.0);
    }
}
