//! Design-instant search against the analytic solar theory.

use bodygraph_base::{Body, angular_distance, normalize_360};
use bodygraph_search::{
    DesignSearchConfig, Ephemeris, SolarTheory, design_instant, design_instant_from,
};
use bodygraph_time::{BirthData, UtcTime};
use proptest::prelude::*;

fn birth_jd(date: &str, time: &str, zone: &str) -> f64 {
    BirthData::parse(date, time, zone).unwrap().birth_jd().unwrap()
}

#[test]
fn summer_birth_design_about_three_months_earlier() {
    let sun = SolarTheory::default();
    let birth = birth_jd("1990-06-15", "12:00", "UTC");
    let sol = design_instant_from(&sun, birth, &DesignSearchConfig::refined()).unwrap();

    assert!(sol.converged, "{sol:?}");
    let days = sol.days_before(birth);
    assert!((85.0..93.0).contains(&days), "days before birth = {days}");

    let arc = angular_distance(
        sun.longitude_deg(Body::Sun, birth).unwrap(),
        sun.longitude_deg(Body::Sun, sol.jd).unwrap(),
    );
    assert!((arc - 88.0).abs() < 0.01, "arc = {arc}");

    let design = UtcTime::from_jd(sol.jd);
    assert_eq!((design.year, design.month), (1990, 3));
}

#[test]
fn coarse_scan_is_within_half_a_step_of_motion() {
    let sun = SolarTheory::default();
    let birth = birth_jd("1984-11-02", "03:15", "+01:00");
    let sol = design_instant_from(&sun, birth, &DesignSearchConfig::default()).unwrap();
    // 0.5-day grid at about 1 deg/day
    assert!(sol.error_deg < 0.26, "{sol:?}");
    assert!(sol.jd < birth);
    assert!(sol.evaluations <= 201);
}

#[test]
fn refined_never_worse_than_coarse() {
    let sun = SolarTheory::default();
    let births = [
        ("1955-02-24", "19:15"),
        ("2001-09-09", "00:00"),
        ("2024-12-31", "23:59"),
    ];
    for (date, time) in births {
        let birth = birth_jd(date, time, "UTC");
        let coarse = design_instant_from(&sun, birth, &DesignSearchConfig::default()).unwrap();
        let fine = design_instant_from(&sun, birth, &DesignSearchConfig::refined()).unwrap();
        assert!(fine.error_deg <= coarse.error_deg, "{date}");
        assert!(fine.converged, "{date}");
    }
}

#[test]
fn target_across_aries_point() {
    // Solstice birth: Sun near 90 deg, target near 2 deg, and the scan
    // passes through the 0/360 seam on the way
    let sun = SolarTheory::default();
    let birth = birth_jd("2010-06-21", "11:28", "UTC");
    let sol = design_instant_from(&sun, birth, &DesignSearchConfig::refined()).unwrap();
    assert!(sol.converged);
    let seam = normalize_360(sol.target_longitude_deg + 180.0);
    assert!(seam > 170.0 && seam < 190.0, "target = {}", sol.target_longitude_deg);
}

proptest! {
    #[test]
    fn linear_sun_refined_converges_before_birth(
        rate in 0.9f64..1.1,
        offset in 0.0f64..360.0,
        birth in 2_400_000.0f64..2_500_000.0,
    ) {
        let sun = |t: f64| offset + rate * (t - birth);
        let sol = design_instant(birth, sun, &DesignSearchConfig::refined()).unwrap();
        prop_assert!(sol.jd < birth);
        prop_assert!(sol.converged, "{:?}", sol);
        prop_assert!((sol.days_before(birth) - 88.0 / rate).abs() < 0.01);
    }

    #[test]
    fn coarse_scan_stays_before_birth(
        rate in 0.5f64..1.5,
        birth in 2_400_000.0f64..2_500_000.0,
    ) {
        let sol = design_instant(birth, |t| rate * t, &DesignSearchConfig::default()).unwrap();
        prop_assert!(sol.jd < birth);
        prop_assert!(sol.evaluations >= 2);
    }
}
