use glam::{Mat4, Vec3};

/// Axis-aligned bounding box.
///
/// A freshly created box is *empty* (`min > max`); expanding it by any point
/// makes it valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

/// Sphere circumscribing an [`Aabb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center (equal to the box center).
    pub center: Vec3,
    /// Half the box diagonal.
    pub radius: f32,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// Box containing nothing.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Box spanning two corners (in any order).
    #[must_use]
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box of the given full extents centered at `center`.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Whether no point has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x
            || self.max.y < self.min.y
            || self.max.z < self.min.z
    }

    /// Grow to include `point`.
    pub fn expand_by_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow to include `other` after transforming it by `transform`.
    ///
    /// All eight corners are transformed, so the result is the world AABB
    /// of the rotated box, not a tight fit of the underlying geometry.
    pub fn expand_by_transformed(&mut self, other: &Self, transform: &Mat4) {
        if other.is_empty() {
            return;
        }
        for corner in other.corners() {
            self.expand_by_point(transform.transform_point3(corner));
        }
    }

    /// The eight corners of the box.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Full extents. Zero for an empty box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Box center. Origin for an empty box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Circumscribing sphere.
    #[must_use]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere {
            center: self.center(),
            radius: self.size().length() * 0.5,
        }
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Whether `point` lies strictly inside (not on a face).
    #[must_use]
    pub fn strictly_contains_point(&self, point: Vec3) -> bool {
        point.cmpgt(self.min).all() && point.cmplt(self.max).all()
    }
}
