// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orientation decoding
//!
//! QDF stores each record's pose as a septuple `{a,b,c,d,x,y,z}`. The first
//! four numbers are a quaternion (scalar first) whose components were written
//! as `sign(v) * v²`; the last three are a position in millimetres.
//!
//! Decoding undoes the signed square, reorders into `(x=b, y=c, z=d, w=a)`,
//! normalizes, and right-multiplies by a fixed 90° rotation about +Z that maps
//! the QDF axis convention onto the consumer's.

use nalgebra::{Isometry3, Matrix4, Point3, Quaternion, Translation3, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;

use crate::error::Result;
use crate::parser::parse_orientation_block;

/// Raw orientation septuple exactly as written in the file
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientationRaw {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl OrientationRaw {
    pub fn from_array([a, b, c, d, x, y, z]: [f64; 7]) -> Self {
        Self { a, b, c, d, x, y, z }
    }

    /// Parse a `{a,b,c,d,x,y,z}` block
    pub fn parse(block: &str) -> Result<Self> {
        parse_orientation_block(block).map(Self::from_array)
    }

    #[inline]
    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Decode the compressed quaternion into the consumer's frame
    pub fn decode_quaternion(&self) -> UnitQuaternion<f64> {
        let q = Quaternion::new(
            reverse_squared_scaling(self.a),
            reverse_squared_scaling(self.b),
            reverse_squared_scaling(self.c),
            reverse_squared_scaling(self.d),
        );
        // An all-zero rotation has no direction; treat it as "no rotation"
        let base = UnitQuaternion::try_new(q, f64::EPSILON).unwrap_or_else(UnitQuaternion::identity);
        let corrected = base * axis_correction();
        UnitQuaternion::new_normalize(corrected.into_inner())
    }

    /// Decoded transform with the raw position
    pub fn to_transform(&self) -> Transform {
        Transform {
            position: self.position(),
            quaternion: self.decode_quaternion(),
        }
    }
}

/// World pose of a record
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Point3<f64>,
    pub quaternion: UnitQuaternion<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            quaternion: UnitQuaternion::identity(),
        }
    }
}

impl Transform {
    /// Shift the position by a vector expressed in the record's local frame
    pub fn with_local_offset(self, local: Vector3<f64>) -> Self {
        Self {
            position: self.position + self.quaternion * local,
            quaternion: self.quaternion,
        }
    }

    /// 4x4 homogeneous matrix (rotation then translation)
    pub fn to_matrix(&self) -> Matrix4<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.quaternion)
            .to_homogeneous()
    }
}

/// Forward QDF component encoding: `sign(v) * v²`
#[inline]
pub fn forward_squared_scaling(v: f64) -> f64 {
    v.signum() * v * v
}

/// Inverse of [`forward_squared_scaling`]: `sign(v) * sqrt(|v|)`
#[inline]
pub fn reverse_squared_scaling(v: f64) -> f64 {
    v.signum() * v.abs().sqrt()
}

/// Fixed 90° rotation about +Z applied to every decoded quaternion
pub fn axis_correction() -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2)
}

/// Tubes are anchored at one end; move the anchor to the tube's center
pub fn tube_center_transform(raw: &OrientationRaw, length: f64) -> Transform {
    raw.to_transform()
        .with_local_offset(Vector3::new(0.0, -length / 2.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_squared_scaling_roundtrip() {
        for v in [-3.5, -1.0, -0.25, 0.0, 0.001, 0.5, 1.0, 42.0] {
            assert_relative_eq!(
                reverse_squared_scaling(forward_squared_scaling(v)),
                v,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_reverse_keeps_sign() {
        assert_relative_eq!(reverse_squared_scaling(-0.25), -0.5);
        assert_relative_eq!(reverse_squared_scaling(0.25), 0.5);
    }

    #[test]
    fn test_identity_gets_axis_correction() {
        let raw = OrientationRaw::from_array([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let q = raw.decode_quaternion();
        assert_relative_eq!(q.angle_to(&axis_correction()), 0.0, epsilon = 1e-6);

        // +X in QDF maps to +Y in the consumer frame
        let v = q * Vector3::x();
        assert_relative_eq!(v, Vector3::y(), epsilon = 1e-9);
    }

    #[test]
    fn test_decoded_quaternion_is_unit() {
        let samples = [
            [0.3, -0.2, 0.1, 0.4, 1.0, 2.0, 3.0],
            [0.0, 0.0, 0.0, 1.0, 100.0, 200.0, 300.0],
            [-0.5, 0.5, -0.5, 0.5, 0.0, 0.0, 0.0],
            [2.0, 3.0, -7.0, 0.01, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ];
        for sample in samples {
            let q = OrientationRaw::from_array(sample).decode_quaternion();
            assert!((q.into_inner().norm() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_component_order() {
        // Encoded 90° about X: w = x = sqrt(0.5), stored squared as 0.5
        let raw = OrientationRaw::from_array([0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let expected = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2)
            * axis_correction();
        assert_relative_eq!(raw.decode_quaternion().angle_to(&expected), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_position_is_not_decoded() {
        let raw = OrientationRaw::from_array([1.0, 0.0, 0.0, 0.0, 4.0, -9.0, 16.0]);
        assert_eq!(raw.to_transform().position, Point3::new(4.0, -9.0, 16.0));
    }

    #[test]
    fn test_tube_center_offset() {
        // Identity + correction: local -Y maps to world +X
        let raw = OrientationRaw::from_array([1.0, 0.0, 0.0, 0.0, 10.0, 20.0, 30.0]);
        let transform = tube_center_transform(&raw, 500.0);
        assert_relative_eq!(transform.position, Point3::new(260.0, 20.0, 30.0), epsilon = 1e-9);
    }

    #[test]
    fn test_matrix_translation() {
        let raw = OrientationRaw::from_array([1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
        let m = raw.to_transform().to_matrix();
        assert_relative_eq!(m[(0, 3)], 1.0);
        assert_relative_eq!(m[(1, 3)], 2.0);
        assert_relative_eq!(m[(2, 3)], 3.0);
    }
}
