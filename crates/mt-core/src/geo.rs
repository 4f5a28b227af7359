//! Geographic coordinate type and the per-axis helpers the animation uses.
//!
//! `GeoPoint` uses `f64`.  The animation narrows gaps by a small fraction
//! (`0.002` by default) every frame and compares against an arrival epsilon
//! of `1e-4` degrees, which is below `f32` resolution at typical longitudes.

/// A WGS-84 geographic coordinate.
///
/// Out-of-range values are stored as given; validation is the data source's
/// concern.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Linear blend in degree space: `t = 0` is `self`, `t = 1` is `other`.
    ///
    /// Does not follow the great circle; segments between telemetry fixes are
    /// short enough that the difference is invisible on a map.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    /// Move a fraction `speed` of the remaining gap toward `target`, on each
    /// axis independently.
    #[inline]
    pub fn approach(self, target: GeoPoint, speed: f64) -> GeoPoint {
        self.lerp(target, speed)
    }

    /// `true` when both axis deltas to `other` are strictly under `epsilon`.
    #[inline]
    pub fn within(self, other: GeoPoint, epsilon: f64) -> bool {
        (other.lat - self.lat).abs() < epsilon && (other.lon - self.lon).abs() < epsilon
    }

}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
