//! Chart pipeline against a scripted ephemeris.

use bodygraph_base::{
    Body, Center, GATE_SPAN, MEASURED_BODIES, Pass, gate_from_longitude, gate_start_deg,
};
use bodygraph_search::{
    DesignSearchConfig, Ephemeris, EphemerisError, SearchError, SolarTheory, compute_chart,
    compute_chart_for_birth, longitudes_at,
};
use bodygraph_time::BirthData;

const BIRTH: f64 = 2_447_000.25;

fn mid(gate: u8) -> f64 {
    gate_start_deg(gate).unwrap() + GATE_SPAN / 2.0
}

/// Sun moves 1 deg/day; Moon sits in gate 1 and Mercury in gate 8 at all
/// times; everything else is parked in gate 41.
struct Scripted {
    sun_at_birth: f64,
}

impl Ephemeris for Scripted {
    fn longitude_deg(&self, body: Body, jd: f64) -> Result<f64, EphemerisError> {
        Ok(match body {
            Body::Sun => self.sun_at_birth + (jd - BIRTH),
            Body::Moon => mid(1),
            Body::Mercury => mid(8),
            _ => mid(41),
        })
    }
}

#[test]
fn longitudes_cover_measured_bodies_only() {
    let lons = longitudes_at(&Scripted { sun_at_birth: 400.0 }, BIRTH).unwrap();
    assert_eq!(lons.len(), MEASURED_BODIES.len());
    assert!(!lons.contains(Body::Earth));
    assert!(!lons.contains(Body::SouthNode));
    assert!((lons.get(Body::Sun).unwrap() - 40.0).abs() < 1e-9);
}

#[test]
fn scripted_chart_matches_hand_derivation() {
    let eph = Scripted {
        sun_at_birth: mid(13),
    };
    let out = compute_chart(&eph, BIRTH, &DesignSearchConfig::refined()).unwrap();
    let chart = &out.chart;

    assert!(out.design.converged);
    assert!((out.design.days_before(BIRTH) - 88.0).abs() < 0.01);
    assert_eq!(chart.personality_gates.len(), 13);
    assert_eq!(chart.design_gates.len(), 13);

    let p_sun = gate_from_longitude(mid(13)).unwrap();
    let d_sun = gate_from_longitude(mid(13) - 88.0).unwrap();
    assert_eq!(chart.cross.personality_sun, 13);
    let p_earth = gate_from_longitude(mid(13) + 180.0).unwrap();
    assert_eq!(chart.cross.personality_earth, p_earth.gate);
    assert_eq!(chart.cross.design_sun, d_sun.gate);
    assert_eq!(chart.profile.personality_line, p_sun.line);
    assert_eq!(chart.profile.design_line, d_sun.line);

    assert!(chart.active_channels.iter().any(|c| c.id() == "1-8"));
    assert!(chart.is_defined(Center::G));
    assert!(chart.is_defined(Center::Throat));
    let moon = chart.activation(Body::Moon, Pass::Design).unwrap();
    assert_eq!(moon.gate, 1);
}

#[test]
fn ephemeris_failure_propagates_unchanged() {
    // The solar theory can run the design search but knows nothing of the Moon
    let r = compute_chart(&SolarTheory::default(), BIRTH, &DesignSearchConfig::default());
    assert_eq!(
        r.unwrap_err(),
        SearchError::Ephemeris(EphemerisError::Unsupported(Body::Moon))
    );
}

#[test]
fn invalid_config_is_rejected_before_any_query() {
    struct Panicking;
    impl Ephemeris for Panicking {
        fn longitude_deg(&self, _: Body, _: f64) -> Result<f64, EphemerisError> {
            panic!("queried with an invalid config");
        }
    }
    let cfg = DesignSearchConfig {
        step_days: -1.0,
        ..DesignSearchConfig::default()
    };
    assert!(matches!(
        compute_chart(&Panicking, BIRTH, &cfg),
        Err(SearchError::InvalidConfig(_))
    ));
}

#[test]
fn birth_data_entry_point() {
    let eph = Scripted { sun_at_birth: 10.0 };
    let birth = BirthData::parse("1987-08-10", "18:00", "UTC").unwrap();
    let jd = birth.birth_jd().unwrap();
    let a = compute_chart_for_birth(&eph, &birth, &DesignSearchConfig::default()).unwrap();
    let b = compute_chart(&eph, jd, &DesignSearchConfig::default()).unwrap();
    assert_eq!(a, b);
    assert!((a.birth_jd - jd).abs() < 1e-12);
}

#[test]
fn boxed_ephemeris_is_accepted() {
    let eph: Box<dyn Ephemeris> = Box::new(Scripted { sun_at_birth: 200.0 });
    let out = compute_chart(eph.as_ref(), BIRTH, &DesignSearchConfig::default()).unwrap();
    assert_eq!(out.chart.personality_gates[0].body, Body::Sun);
}
