//! Shared angle helpers.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    // -1e-20 % 360 + 360 rounds to exactly 360.0
    if r < 0.0 {
        let wrapped = r + 360.0;
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    } else {
        r
    }
}

/// Normalize an angle to (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Length of the shorter arc between two angles, in [0, 180].
pub fn angular_distance(a_deg: f64, b_deg: f64) -> f64 {
    normalize_to_pm180(a_deg - b_deg).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero() {
        assert!((normalize_360(0.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_360_wraps() {
        assert!((normalize_360(360.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_large_negative() {
        assert!((normalize_360(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_in_range() {
        let r = normalize_360(-1e-20);
        assert!((0.0..360.0).contains(&r), "got {r}");
    }

    #[test]
    fn pm180_range() {
        assert!((normalize_to_pm180(190.0) + 170.0).abs() < 1e-12);
        assert!((normalize_to_pm180(-190.0) - 170.0).abs() < 1e-12);
        assert!((normalize_to_pm180(180.0) - 180.0).abs() < 1e-12);
        assert!((normalize_to_pm180(-180.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn distance_across_seam() {
        assert!((angular_distance(359.0, 1.0) - 2.0).abs() < 1e-12);
        assert!((angular_distance(1.0, 359.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn distance_opposite() {
        assert!((angular_distance(10.0, 190.0) - 180.0).abs() < 1e-12);
    }
}
