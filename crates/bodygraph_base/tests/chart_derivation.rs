//! Integration tests for chart derivation.
//!
//! Longitudes are placed at gate midpoints so every test reads in gate
//! numbers rather than degrees.

use std::collections::BTreeSet;

use bodygraph_base::{
    ALL_BODIES, Authority, Body, BodyLongitudes, Center, Chart, ChartError, ChartType, Definition,
    GATE_SPAN, Pass, Strategy, derive_chart, gate_start_deg,
};
use proptest::prelude::*;

fn mid(gate: u8) -> f64 {
    gate_start_deg(gate).unwrap() + GATE_SPAN / 2.0
}

/// Longitudes for (body, gate) pairs, with explicit Earth so no extra gate
/// sneaks in.
fn lons(pairs: &[(Body, u8)]) -> BodyLongitudes {
    pairs.iter().map(|&(b, g)| (b, mid(g))).collect()
}

fn channel_ids(chart: &Chart) -> Vec<String> {
    chart.active_channels.iter().map(|c| c.id()).collect()
}

#[test]
fn no_complete_channel_is_reflector() {
    // 19-49 lacks 49, 30-41 lacks 30, 13-33 lacks 33.
    let p = lons(&[(Body::Sun, 41), (Body::Earth, 19)]);
    let d = lons(&[(Body::Sun, 13), (Body::Earth, 13)]);
    let chart = derive_chart(&p, &d).unwrap();

    assert_eq!(chart.gates(), BTreeSet::from([13, 19, 41]));
    assert!(chart.active_channels.is_empty());
    assert!(chart.defined_centers.is_empty());
    assert_eq!(chart.chart_type, ChartType::Reflector);
    assert_eq!(chart.strategy, Strategy::WaitLunarCycle);
    assert_eq!(chart.strategy.as_str(), "Wait a Lunar Cycle");
    assert_eq!(chart.definition, Definition::None);
    assert_eq!(chart.authority, Authority::Lunar);
}

#[test]
fn g_to_throat_only_is_self_projected_projector() {
    let p = lons(&[(Body::Sun, 1), (Body::Earth, 8)]);
    let d = lons(&[(Body::Sun, 8), (Body::Earth, 1)]);
    let chart = derive_chart(&p, &d).unwrap();

    assert_eq!(channel_ids(&chart), vec!["1-8"]);
    assert_eq!(
        chart.defined_centers,
        BTreeSet::from([Center::G, Center::Throat])
    );
    assert!(!chart.is_defined(Center::Sacral));
    assert_eq!(chart.chart_type, ChartType::Projector);
    assert_eq!(chart.authority, Authority::SelfProjected);
    assert_eq!(chart.strategy, Strategy::WaitForInvitation);
    assert_eq!(chart.definition, Definition::Single);
}

#[test]
fn channel_may_span_both_passes() {
    // 21 only in personality, 45 only in design.
    let p = lons(&[(Body::Sun, 21), (Body::Earth, 48)]);
    let d = lons(&[(Body::Sun, 45), (Body::Earth, 26)]);
    let chart = derive_chart(&p, &d).unwrap();
    assert_eq!(channel_ids(&chart), vec!["21-45"]);
    assert_eq!(chart.chart_type, ChartType::Manifestor);
    assert_eq!(chart.authority, Authority::Ego);
}

#[test]
fn sacral_with_motor_throat_is_manifesting_generator() {
    let p = lons(&[
        (Body::Sun, 20),
        (Body::Earth, 34),
        (Body::Moon, 2),
        (Body::Mars, 14),
    ]);
    let d = lons(&[(Body::Sun, 3), (Body::Earth, 3)]);
    let chart = derive_chart(&p, &d).unwrap();
    assert_eq!(channel_ids(&chart), vec!["2-14", "20-34"]);
    assert_eq!(chart.chart_type, ChartType::ManifestingGenerator);
    assert_eq!(chart.strategy, Strategy::ToRespond);
    assert_eq!(chart.authority, Authority::Sacral);
    assert_eq!(chart.definition, Definition::Split);
}

#[test]
fn many_channels_reach_quadruple_split() {
    // 4-63 (Head, Ajna), 17-62 (Ajna, Throat), 1-8 (G, Throat),
    // 26-44 (Ego, Spleen), 9-52 (Root, Sacral)
    let p = lons(&[
        (Body::Sun, 4),
        (Body::Earth, 63),
        (Body::Moon, 17),
        (Body::Mercury, 62),
        (Body::Venus, 1),
    ]);
    let d = lons(&[
        (Body::Sun, 8),
        (Body::Earth, 26),
        (Body::Moon, 44),
        (Body::Mars, 9),
        (Body::Jupiter, 52),
    ]);
    let chart = derive_chart(&p, &d).unwrap();
    assert_eq!(chart.defined_centers.len(), 8);
    assert_eq!(chart.definition, Definition::QuadrupleSplit);
    assert_eq!(chart.authority, Authority::Splenic);
    // Sacral defined but no motor reaches the throat.
    assert_eq!(chart.chart_type, ChartType::Generator);
}

#[test]
fn profile_and_cross_from_sun_and_earth() {
    let sun = gate_start_deg(13).unwrap() + 3.5 * (GATE_SPAN / 6.0); // line 4
    let p = BodyLongitudes::new().with(Body::Sun, sun);
    let d_sun = gate_start_deg(1).unwrap() + 5.5 * (GATE_SPAN / 6.0); // line 6
    let d = BodyLongitudes::new().with(Body::Sun, d_sun);
    let chart = derive_chart(&p, &d).unwrap();

    assert_eq!(chart.profile.to_string(), "4/6");
    let p_earth = chart.activation(Body::Earth, Pass::Personality).unwrap();
    let d_earth = chart.activation(Body::Earth, Pass::Design).unwrap();
    assert_eq!(p_earth.gate, 7);
    assert_eq!(d_earth.gate, 2);
    assert_eq!(chart.cross.to_string(), "13/7 | 1/2");
}

#[test]
fn full_body_set_keeps_iteration_order() {
    let p: BodyLongitudes = ALL_BODIES
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.is_derived())
        .map(|(i, &b)| (b, i as f64 * 27.0 + 1.0))
        .collect();
    let d = p.clone();
    let chart = derive_chart(&p, &d).unwrap();
    let order: Vec<Body> = chart.personality_gates.iter().map(|a| a.body).collect();
    assert_eq!(order, ALL_BODIES.to_vec());
    assert_eq!(chart.design_gates.len(), 13);
}

#[test]
fn derivation_is_idempotent() {
    let p = lons(&[(Body::Sun, 20), (Body::Earth, 34), (Body::Moon, 57)]);
    let d = lons(&[(Body::Sun, 10), (Body::Earth, 15)]);
    let a = derive_chart(&p, &d).unwrap();
    let b = derive_chart(&p, &d).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn unnormalized_input_matches_normalized() {
    let p = BodyLongitudes::new().with(Body::Sun, 10.0 + 720.0);
    let d = BodyLongitudes::new().with(Body::Sun, 10.0 - 360.0);
    let n = BodyLongitudes::new().with(Body::Sun, 10.0);
    let a = derive_chart(&p, &d).unwrap();
    let b = derive_chart(&n, &n).unwrap();
    assert_eq!(a.cross, b.cross);
    assert_eq!(a.profile, b.profile);
}

#[test]
fn serde_roundtrip_recomputes_derived_fields() {
    let p = lons(&[(Body::Sun, 1), (Body::Earth, 8)]);
    let d = lons(&[(Body::Sun, 8), (Body::Earth, 1)]);
    let chart = derive_chart(&p, &d).unwrap();

    let mut json: serde_json::Value = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["active_channels"], serde_json::json!(["1-8"]));
    assert_eq!(json["type"], "Projector");

    // Corrupt every cached field; loading must ignore them.
    json["active_channels"] = serde_json::json!(["2-14"]);
    json["defined_centers"] = serde_json::json!(["sacral"]);
    json["type"] = serde_json::json!("Generator");
    json["profile"] = serde_json::json!("1/1");
    let back: Chart = serde_json::from_value(json).unwrap();
    assert_eq!(back, chart);
}

#[test]
fn deserialize_without_design_sun_fails() {
    let p = lons(&[(Body::Sun, 1), (Body::Earth, 8)]);
    let chart = derive_chart(&p, &p).unwrap();
    let mut json = serde_json::to_value(&chart).unwrap();
    json["design_gates"] = serde_json::json!([]);
    let err = serde_json::from_value::<Chart>(json).unwrap_err();
    assert!(err.to_string().contains("missing Sun"), "got {err}");
}

#[test]
fn deserialize_rejects_out_of_range_activation() {
    let p = lons(&[(Body::Sun, 1), (Body::Earth, 8)]);
    let chart = derive_chart(&p, &p).unwrap();
    let json = serde_json::to_value(&chart).unwrap();

    let mut bad_gate = json.clone();
    bad_gate["personality_gates"][0]["gate"] = serde_json::json!(99);
    let err = serde_json::from_value::<Chart>(bad_gate).unwrap_err();
    assert!(err.to_string().contains("invalid gate number: 99"), "got {err}");

    let mut bad_line = json;
    bad_line["design_gates"][1]["line"] = serde_json::json!(0);
    let err = serde_json::from_value::<Chart>(bad_line).unwrap_err();
    assert!(err.to_string().contains("invalid line number: 0"), "got {err}");
}

#[test]
fn deserialize_rejects_activation_in_wrong_sequence() {
    let p = lons(&[(Body::Sun, 1), (Body::Earth, 8)]);
    let d = lons(&[(Body::Sun, 8), (Body::Earth, 1)]);
    let chart = derive_chart(&p, &d).unwrap();
    let mut json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["design_gates"][0]["pass"], "design");
    json["design_gates"][0]["pass"] = serde_json::json!("personality");
    let err = serde_json::from_value::<Chart>(json).unwrap_err();
    assert!(
        err.to_string()
            .contains("Sun activation tagged personality in the design sequence"),
        "got {err}"
    );
}

#[test]
fn missing_body_error_names_pass() {
    let p = BodyLongitudes::new().with(Body::Sun, 1.0);
    let d = BodyLongitudes::new().with(Body::Moon, 1.0);
    let err = derive_chart(&p, &d).unwrap_err();
    assert_eq!(
        err,
        ChartError::MissingBody {
            body: Body::Sun,
            pass: Pass::Design
        }
    );
    assert_eq!(err.to_string(), "missing Sun in design longitudes");
}

proptest! {
    /// Moving a gate from one pass to the other never changes the graph.
    #[test]
    fn channels_depend_only_on_gate_set(
        p_gates in proptest::collection::vec(1u8..=64, 13),
        d_gates in proptest::collection::vec(1u8..=64, 13),
        swap_at in 0usize..13,
    ) {
        let build = |gates: &[u8]| -> BodyLongitudes {
            ALL_BODIES.iter().zip(gates).map(|(&b, &g)| (b, mid(g))).collect()
        };
        let mut p2 = p_gates.clone();
        let mut d2 = d_gates.clone();
        std::mem::swap(&mut p2[swap_at], &mut d2[swap_at]);

        let a = derive_chart(&build(&p_gates), &build(&d_gates)).unwrap();
        let b = derive_chart(&build(&p2), &build(&d2)).unwrap();
        prop_assert_eq!(a.gates(), b.gates());
        prop_assert_eq!(&a.active_channels, &b.active_channels);
        prop_assert_eq!(&a.defined_centers, &b.defined_centers);
        prop_assert_eq!(a.chart_type, b.chart_type);
        prop_assert_eq!(a.authority, b.authority);
        prop_assert_eq!(a.definition, b.definition);
    }

    #[test]
    fn defined_centers_are_channel_endpoints(
        gates in proptest::collection::vec(1u8..=64, 13),
    ) {
        let lons: BodyLongitudes =
            ALL_BODIES.iter().zip(&gates).map(|(&b, &g)| (b, mid(g))).collect();
        let chart = derive_chart(&lons, &lons).unwrap();
        let endpoints: BTreeSet<Center> =
            chart.active_channels.iter().flat_map(|c| c.centers()).collect();
        prop_assert_eq!(&endpoints, &chart.defined_centers);
        prop_assert_eq!(
            chart.definition,
            Definition::from_center_count(chart.defined_centers.len())
        );
        prop_assert_eq!(chart.strategy, Strategy::for_type(chart.chart_type));
    }
}
