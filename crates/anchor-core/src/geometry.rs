//! Geometry - vectors, rotations and rigid transforms
//!
//! The renderer and the tracking subsystem each bring their own 3D vector
//! type. `SceneVector` is the renderer's named-field form, `TrackerVector` is
//! the array form the tracker's projection routines take. Converting between
//! the two copies the three scalars and nothing else.

use std::ops::{Add, Mul, Neg, Sub};

/// 3D vector in the renderer's representation (metres, right-handed, +Y up)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SceneVector {
    /// World up
    pub const UP: SceneVector = SceneVector {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Camera looks down -Z
    pub const FORWARD: SceneVector = SceneVector {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    pub const RIGHT: SceneVector = SceneVector {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn dot(&self, other: &SceneVector) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &SceneVector) -> SceneVector {
        SceneVector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero
    pub fn normalized(&self) -> SceneVector {
        let len = self.length();
        if len < 1e-6 {
            return SceneVector::zero();
        }
        *self * (1.0 / len)
    }

    /// Linear interpolation
    pub fn lerp(&self, other: &SceneVector, t: f32) -> SceneVector {
        SceneVector {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Distance to another point
    pub fn distance(&self, other: &SceneVector) -> f32 {
        (*self - *other).length()
    }

    pub fn approx_eq(&self, other: &SceneVector, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }
}

impl Add for SceneVector {
    type Output = SceneVector;

    fn add(self, rhs: SceneVector) -> SceneVector {
        SceneVector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for SceneVector {
    type Output = SceneVector;

    fn sub(self, rhs: SceneVector) -> SceneVector {
        SceneVector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for SceneVector {
    type Output = SceneVector;

    fn mul(self, rhs: f32) -> SceneVector {
        SceneVector::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for SceneVector {
    type Output = SceneVector;

    fn neg(self) -> SceneVector {
        SceneVector::new(-self.x, -self.y, -self.z)
    }
}

/// 3D vector in the tracking subsystem's representation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackerVector(pub [f32; 3]);

impl TrackerVector {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self([x, y, z])
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.0[2]
    }
}

impl From<SceneVector> for TrackerVector {
    #[inline]
    fn from(v: SceneVector) -> Self {
        TrackerVector([v.x, v.y, v.z])
    }
}

impl From<TrackerVector> for SceneVector {
    #[inline]
    fn from(v: TrackerVector) -> Self {
        let [x, y, z] = v.0;
        SceneVector { x, y, z }
    }
}

/// Anything that can unproject a screen-space point into world space.
///
/// `point.x`/`point.y` are pixel coordinates, `point.z` is normalized depth
/// (0 = near plane, 1 = far plane). The renderer implements this in its own
/// representation.
pub trait ScreenProjector {
    fn unproject_point(&self, point: SceneVector) -> SceneVector;
}

/// Unproject a point given and returned in tracker representation.
pub fn unproject_tracker_point<P: ScreenProjector + ?Sized>(
    projector: &P,
    point: TrackerVector,
) -> TrackerVector {
    TrackerVector::from(projector.unproject_point(SceneVector::from(point)))
}

/// Rotation (unit quaternion)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotation of `angle` radians about `axis`
    pub fn from_axis_angle(axis: SceneVector, angle: f32) -> Self {
        let axis = axis.normalized();
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            w: half.cos(),
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// Shortest rotation taking direction `from` onto direction `to`.
    pub fn from_arc(from: SceneVector, to: SceneVector) -> Self {
        let from = from.normalized();
        let to = to.normalized();
        let dot = from.dot(&to);

        if dot >= 1.0 - 1e-6 {
            return Self::identity();
        }

        if dot <= -1.0 + 1e-6 {
            // Opposite directions: half turn about any axis orthogonal to `from`
            let mut axis = SceneVector::RIGHT.cross(&from);
            if axis.length() < 1e-6 {
                axis = SceneVector::UP.cross(&from);
            }
            return Self::from_axis_angle(axis, std::f32::consts::PI);
        }

        let c = from.cross(&to);
        Rotation {
            w: 1.0 + dot,
            x: c.x,
            y: c.y,
            z: c.z,
        }
        .normalize()
    }

    /// Apply this rotation to a vector
    pub fn rotate(&self, v: SceneVector) -> SceneVector {
        let q = SceneVector::new(self.x, self.y, self.z);
        let t = q.cross(&v) * 2.0;
        v + t * self.w + q.cross(&t)
    }

    /// Hamilton product: `self` applied after `other`
    pub fn mul(&self, other: &Rotation) -> Rotation {
        Rotation {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    pub fn normalize(&self) -> Rotation {
        let len = (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if len < 0.0001 {
            return Rotation::identity();
        }
        Rotation {
            w: self.w / len,
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }
}

/// Rigid transform (position + rotation)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub position: SceneVector,
    pub rotation: Rotation,
}

impl Transform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn from_position(position: SceneVector) -> Self {
        Self {
            position,
            rotation: Rotation::identity(),
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Map a point from this transform's local space into its parent space
    pub fn transform_point(&self, point: SceneVector) -> SceneVector {
        self.rotation.rotate(point) + self.position
    }

    /// Compose: `child` expressed in this transform's local space
    pub fn then(&self, child: &Transform) -> Transform {
        Transform {
            position: self.transform_point(child.position),
            rotation: self.rotation.mul(&child.rotation).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vector_lerp() {
        let a = SceneVector::new(0.0, 0.0, 0.0);
        let b = SceneVector::new(10.0, 10.0, 10.0);

        let mid = a.lerp(&b, 0.5);
        assert!(mid.approx_eq(&SceneVector::new(5.0, 5.0, 5.0), 0.01));
    }

    #[test]
    fn test_normalized_zero_stays_zero() {
        assert_eq!(SceneVector::zero().normalized(), SceneVector::zero());
        let n = SceneVector::new(0.0, 3.0, 4.0).normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_arc_maps_up_onto_target() {
        let targets = [
            SceneVector::UP,
            SceneVector::new(1.0, 0.0, 0.0),
            SceneVector::new(0.0, 0.0, 1.0),
            SceneVector::new(0.3, 0.8, -0.5),
            -SceneVector::UP,
        ];

        for target in targets {
            let r = Rotation::from_arc(SceneVector::UP, target);
            let rotated = r.rotate(SceneVector::UP);
            assert!(
                rotated.approx_eq(&target.normalized(), 1e-5),
                "{:?} -> {:?}",
                target,
                rotated
            );
        }
    }

    #[test]
    fn test_transform_composition() {
        let parent = Transform::from_position(SceneVector::new(1.0, 0.0, 0.0)).with_rotation(
            Rotation::from_axis_angle(SceneVector::UP, std::f32::consts::FRAC_PI_2),
        );
        let child = Transform::from_position(SceneVector::FORWARD);

        // -Z rotated 90 degrees about +Y points along -X
        let world = parent.then(&child);
        assert!(world
            .position
            .approx_eq(&SceneVector::new(0.0, 0.0, 0.0), 1e-5));
    }

    struct Halving;

    impl ScreenProjector for Halving {
        fn unproject_point(&self, point: SceneVector) -> SceneVector {
            point * 0.5
        }
    }

    #[test]
    fn test_unproject_tracker_point_goes_through_projector() {
        let out = unproject_tracker_point(&Halving, TrackerVector::new(2.0, 4.0, 1.0));
        assert_eq!(out, TrackerVector::new(1.0, 2.0, 0.5));
    }

    proptest! {
        #[test]
        fn vector_conversion_round_trip_is_bit_exact(
            x in any::<f32>(),
            y in any::<f32>(),
            z in any::<f32>(),
        ) {
            let scene = SceneVector::new(x, y, z);
            let back = SceneVector::from(TrackerVector::from(scene));
            prop_assert_eq!(back.x.to_bits(), x.to_bits());
            prop_assert_eq!(back.y.to_bits(), y.to_bits());
            prop_assert_eq!(back.z.to_bits(), z.to_bits());

            let tracker = TrackerVector::new(x, y, z);
            let back = TrackerVector::from(SceneVector::from(tracker));
            prop_assert_eq!(back.x().to_bits(), x.to_bits());
            prop_assert_eq!(back.y().to_bits(), y.to_bits());
            prop_assert_eq!(back.z().to_bits(), z.to_bits());
        }

        #[test]
        fn rotation_preserves_length(
            ax in -1.0f32..1.0, ay in -1.0f32..1.0, az in -1.0f32..1.0,
            angle in -6.3f32..6.3,
            vx in -10.0f32..10.0, vy in -10.0f32..10.0, vz in -10.0f32..10.0,
        ) {
            prop_assume!(SceneVector::new(ax, ay, az).length() > 1e-3);
            let r = Rotation::from_axis_angle(SceneVector::new(ax, ay, az), angle);
            let v = SceneVector::new(vx, vy, vz);
            prop_assert!((r.rotate(v).length() - v.length()).abs() < 1e-3);
        }
    }
}
