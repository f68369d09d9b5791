//! Constants, unit conversions and vector geometry shared across the telemetry workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity used to convert `gee_asl` multiples and specific impulse (m/s²).
    pub const G0: f64 = 9.81;
    /// Air density at one atmosphere of static pressure (kg/m³ per atm).
    pub const DENSITY_PER_ATM: f64 = 1.223_094_855_487_4;
    /// Drag area per tonne of vessel mass used by the stock drag model (m²/t).
    pub const DRAG_AREA_PER_TONNE: f64 = 0.008;
    /// Seconds per day on the reference clock.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Unit conversion helpers.
pub mod units {
    /// Convert a surface gravity expressed in multiples of `G0` to m/s².
    #[inline]
    pub fn gees_to_ms2(gees: f64) -> f64 {
        gees * super::constants::G0
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in metres or m/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Negate a vector.
    #[inline]
    pub fn neg(v: &Vector3) -> Vector3 {
        scale(v, -1.0)
    }

    /// `true` when every component is finite.
    #[inline]
    pub fn is_finite(v: &Vector3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

/// Projection and angle helpers built on [`vector`].
///
/// Every function here rejects zero-length or non-finite inputs with
/// [`GeometryError`] instead of producing NaN.
pub mod geometry {
    use thiserror::Error;

    use super::vector::{self, Vector3};

    /// Squared magnitude below which a vector is treated as zero-length.
    const MIN_NORM_SQUARED: f64 = 1.0e-24;

    #[derive(Debug, Clone, Copy, PartialEq, Error)]
    pub enum GeometryError {
        #[error("{name} vector has zero length")]
        DegenerateVector { name: &'static str },
        #[error("{name} vector has a non-finite component")]
        NonFinite { name: &'static str },
    }

    fn check(v: &Vector3, name: &'static str) -> Result<f64, GeometryError> {
        if !vector::is_finite(v) {
            return Err(GeometryError::NonFinite { name });
        }
        let norm_sq = vector::dot(v, v);
        if norm_sq < MIN_NORM_SQUARED {
            return Err(GeometryError::DegenerateVector { name });
        }
        Ok(norm_sq.sqrt())
    }

    /// Unit vector in the direction of `v`.
    pub fn normalize(v: &Vector3) -> Result<Vector3, GeometryError> {
        let n = check(v, "input")?;
        Ok(vector::scale(v, 1.0 / n))
    }

    /// Component of `v` along `axis`.
    pub fn project(v: &Vector3, axis: &Vector3) -> Result<Vector3, GeometryError> {
        let axis_norm = check(axis, "axis")?;
        if !vector::is_finite(v) {
            return Err(GeometryError::NonFinite { name: "input" });
        }
        let factor = vector::dot(v, axis) / (axis_norm * axis_norm);
        Ok(vector::scale(axis, factor))
    }

    /// `v` minus its projection onto `axis`, i.e. `v` flattened into the plane normal to `axis`.
    pub fn exclude_component(v: &Vector3, axis: &Vector3) -> Result<Vector3, GeometryError> {
        let along = project(v, axis)?;
        Ok(vector::sub(v, &along))
    }

    /// Unsigned angle between `a` and `b` in degrees, in `[0, 180]`.
    pub fn angle_between(a: &Vector3, b: &Vector3) -> Result<f64, GeometryError> {
        let na = check(a, "first")?;
        let nb = check(b, "second")?;
        let cos = (vector::dot(a, b) / (na * nb)).clamp(-1.0, 1.0);
        Ok(cos.acos().to_degrees())
    }

    /// Angle from `a` to `b` in degrees, resolved to `[0, 360)` by the rotation sense
    /// about `reference_normal`.
    ///
    /// The unsigned angle is mirrored to `360 - angle` when
    /// `dot(cross(reference_normal, a), b) < 0`.
    pub fn signed_angle(
        a: &Vector3,
        b: &Vector3,
        reference_normal: &Vector3,
    ) -> Result<f64, GeometryError> {
        check(reference_normal, "reference normal")?;
        let angle = angle_between(a, b)?;
        let sense = vector::dot(&vector::cross(reference_normal, a), b);
        let resolved = if sense < 0.0 { 360.0 - angle } else { angle };
        Ok(resolved.rem_euclid(360.0))
    }

}
