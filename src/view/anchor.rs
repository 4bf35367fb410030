//! Anchor point solver: maps a node and a [`ViewAngle`] to a world-space
//! point on the node's bounding sphere.

use glam::Vec3;

use super::angle::ViewAngle;
use crate::error::CameramanError;
use crate::scene::{Aabb, BoundingSphere, NodeId, SceneGraph};

/// World-space bounds of a node's framed geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Axis-aligned box over every framed mesh.
    pub aabb: Aabb,
    /// Sphere circumscribing `aabb`.
    pub sphere: BoundingSphere,
}

impl BoundingVolume {
    /// Full box extents.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.aabb.size()
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.sphere.center
    }

    /// Anchor point for `angle` on this volume.
    ///
    /// The direction is built from the box half-extents and then stretched
    /// onto the sphere. A zero-length direction (zero-extent box) collapses
    /// to the center.
    #[must_use]
    pub fn anchor(&self, angle: ViewAngle) -> Vec3 {
        let Some(angles) = angle.angles() else {
            return self.center();
        };
        let v = angles.direction_factors() * self.size() * 0.5;
        let len = v.length();
        let scale = if len > 0.0 {
            self.sphere.radius / len
        } else {
            0.0
        };
        self.center() + v * scale
    }
}

/// Refresh world transforms for `target`'s scene and measure its framed
/// geometry.
///
/// Fails when `target` is not attached to a scene root, since the world
/// matrices could be stale.
pub fn bounding_volume(
    graph: &mut SceneGraph,
    target: NodeId,
) -> Result<BoundingVolume, CameramanError> {
    let root = graph.scene_root(target)?;
    graph.update_world_transforms(root)?;

    let mut aabb = Aabb::EMPTY;
    for id in graph.framed_meshes(target)? {
        let node = graph.node(id)?;
        if let Some(bounds) = node.mesh_bounds() {
            aabb.expand_by_transformed(bounds, &node.world_matrix());
        }
    }

    if aabb.is_empty() {
        let origin = graph.node(target)?.world_position();
        log::debug!(
            "Node {target} has no framed geometry; collapsing to its origin"
        );
        aabb = Aabb::from_corners(origin, origin);
    }

    Ok(BoundingVolume {
        aabb,
        sphere: aabb.bounding_sphere(),
    })
}

/// World-space anchor point of `target` seen from `angle`.
pub fn view_point(
    graph: &mut SceneGraph,
    target: NodeId,
    angle: ViewAngle,
) -> Result<Vec3, CameramanError> {
    Ok(bounding_volume(graph, target)?.anchor(angle))
}

#[cfg(test)]
mod tests {
    use glam::Quat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::scene::{NodeKind, Transform};

    const EPS: f32 = 1e-3;

    fn cube_scene(size: Vec3, center: Vec3) -> (SceneGraph, NodeId) {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let mesh = g
            .add_mesh(scene, "cube", Aabb::from_center_size(center, size))
            .unwrap();
        (g, mesh)
    }

    #[test]
    fn non_center_angles_land_on_sphere() {
        let (mut g, cube) =
            cube_scene(Vec3::new(4.0, 2.0, 8.0), Vec3::new(1.0, -3.0, 2.0));
        let volume = bounding_volume(&mut g, cube).unwrap();
        for angle in &ViewAngle::ALL[1..] {
            let p = view_point(&mut g, cube, *angle).unwrap();
            let d = p.distance(volume.sphere.center);
            assert!(
                (d - volume.sphere.radius).abs() < EPS,
                "{angle}: distance {d} vs radius {}",
                volume.sphere.radius
            );
        }
    }

    #[test]
    fn random_boxes_keep_anchors_on_sphere() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let size = Vec3::new(
                rng.random_range(0.1..50.0),
                rng.random_range(0.1..50.0),
                rng.random_range(0.1..50.0),
            );
            let center = Vec3::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
            );
            let (mut g, cube) = cube_scene(size, center);
            let sphere = bounding_volume(&mut g, cube).unwrap().sphere;
            let tolerance = (sphere.radius * 1e-4).max(EPS);
            for angle in &ViewAngle::ALL[1..] {
                let p = view_point(&mut g, cube, *angle).unwrap();
                let d = p.distance(sphere.center);
                assert!((d - sphere.radius).abs() < tolerance);
            }
        }
    }

    #[test]
    fn center_is_box_center() {
        let (mut g, cube) =
            cube_scene(Vec3::splat(3.0), Vec3::new(5.0, 6.0, 7.0));
        let p = view_point(&mut g, cube, ViewAngle::Center).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(5.0, 6.0, 7.0), 1e-6));
    }

    #[test]
    fn unknown_angle_matches_center() {
        let (mut g, cube) = cube_scene(Vec3::splat(3.0), Vec3::ONE);
        let fallback = ViewAngle::parse_or_center("diagonal-ish");
        let a = view_point(&mut g, cube, fallback).unwrap();
        let b = view_point(&mut g, cube, ViewAngle::Center).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cube_cardinals_reflect_through_center() {
        let (mut g, cube) = cube_scene(Vec3::splat(10.0), Vec3::ZERO);
        let front = view_point(&mut g, cube, ViewAngle::Front).unwrap();
        let rear = view_point(&mut g, cube, ViewAngle::Rear).unwrap();
        let left = view_point(&mut g, cube, ViewAngle::Left).unwrap();
        let right = view_point(&mut g, cube, ViewAngle::Right).unwrap();
        assert!(front.abs_diff_eq(-rear, 1e-5));
        assert!(left.abs_diff_eq(-right, 1e-5));
        let radius = 75.0_f32.sqrt();
        assert!(front.abs_diff_eq(Vec3::new(0.0, 0.0, radius), 1e-4));
    }

    #[test]
    fn zero_extent_box_collapses_to_center() {
        let (mut g, point) = cube_scene(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0));
        for angle in ViewAngle::ALL {
            let p = view_point(&mut g, point, angle).unwrap();
            assert_eq!(p, Vec3::new(2.0, 2.0, 2.0));
        }
    }

    #[test]
    fn flat_box_has_no_trig_noise_on_empty_axis() {
        let (mut g, plane) =
            cube_scene(Vec3::new(10.0, 0.0, 10.0), Vec3::ZERO);
        // top of a flat plane has a zero-length direction
        let top = view_point(&mut g, plane, ViewAngle::Top).unwrap();
        assert_eq!(top, Vec3::ZERO);
    }

    #[test]
    fn excluded_nodes_do_not_affect_framing() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let car = g.add_group(scene, "car").unwrap();
        let _body = g
            .add_mesh(
                car,
                "body",
                Aabb::from_center_size(Vec3::ZERO, Vec3::ONE),
            )
            .unwrap();
        let plane = g
            .add_mesh(
                car,
                "plane",
                Aabb::from_center_size(Vec3::ZERO, Vec3::splat(100.0)),
            )
            .unwrap();
        g.set_exclude_from_box(plane, Some(true)).unwrap();
        let volume = bounding_volume(&mut g, car).unwrap();
        assert!(volume.size().abs_diff_eq(Vec3::ONE, 1e-6));
    }

    #[test]
    fn moved_target_is_measured_in_world_space() {
        let (mut g, cube) = cube_scene(Vec3::splat(2.0), Vec3::ZERO);
        let transform = Transform {
            translation: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(2.0),
        };
        g.set_transform(cube, transform).unwrap();
        let volume = bounding_volume(&mut g, cube).unwrap();
        assert!(volume.center().abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-5));
        assert!(volume.size().abs_diff_eq(Vec3::splat(4.0), 1e-5));
    }

    #[test]
    fn detached_target_fails_fast() {
        let mut g = SceneGraph::new();
        let group = g.add_detached("loose", NodeKind::Group);
        let mesh = g
            .add_mesh(group, "m", Aabb::from_center_size(Vec3::ZERO, Vec3::ONE))
            .unwrap();
        assert!(matches!(
            view_point(&mut g, mesh, ViewAngle::Front),
            Err(CameramanError::SceneRootMissing { .. })
        ));
    }

    #[test]
    fn empty_group_collapses_to_its_origin() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let empty = g.add_group(scene, "empty").unwrap();
        g.set_transform(empty, Transform::from_translation(Vec3::Y * 4.0))
            .unwrap();
        let p = view_point(&mut g, empty, ViewAngle::FrontTop).unwrap();
        assert!(p.abs_diff_eq(Vec3::Y * 4.0, 1e-6));
    }
}
