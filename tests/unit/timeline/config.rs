use super::*;

fn phase(name: &str, weight: f64) -> PhaseSpec {
    PhaseSpec {
        name: name.to_owned(),
        weight,
    }
}

#[test]
fn payment_flow_preset_is_valid() {
    let cfg = TimelineConfig::payment_flow();
    cfg.validate().unwrap();
    assert_eq!(cfg.phase_count(), 7);
    assert_eq!(cfg.loop_duration_secs, 12.0);
    assert_eq!(cfg.phase_name(3), Some("routing"));
    assert_eq!(cfg.phase_name(7), None);
}

#[test]
fn rejects_empty_and_bad_sums() {
    assert!(matches!(
        TimelineConfig::new(12.0, vec![]),
        Err(MotionError::Timeline(_))
    ));
    assert!(TimelineConfig::new(12.0, vec![phase("a", 0.5), phase("b", 0.4)]).is_err());
    assert!(TimelineConfig::new(12.0, vec![phase("a", 1.5), phase("b", -0.5)]).is_err());
    assert!(TimelineConfig::new(12.0, vec![phase("a", f64::NAN)]).is_err());
}

#[test]
fn rejects_non_positive_duration() {
    assert!(TimelineConfig::new(0.0, vec![phase("a", 1.0)]).is_err());
    assert!(TimelineConfig::new(-1.0, vec![phase("a", 1.0)]).is_err());
    assert!(TimelineConfig::new(f64::INFINITY, vec![phase("a", 1.0)]).is_err());
}

#[test]
fn zero_weight_phases_are_allowed_alongside_positive_ones() {
    let cfg = TimelineConfig::new(4.0, vec![phase("a", 0.0), phase("b", 1.0)]).unwrap();
    assert_eq!(cfg.phase_count(), 2);
}

#[test]
fn from_durations_normalizes() {
    let cfg = TimelineConfig::from_durations([("a", 1.0), ("b", 3.0)]).unwrap();
    assert_eq!(cfg.loop_duration_secs, 4.0);
    assert!((cfg.phases[0].weight - 0.25).abs() < 1e-12);
    assert!((cfg.phases[1].weight - 0.75).abs() < 1e-12);

    assert!(TimelineConfig::from_durations([("a", 0.0)]).is_err());
    assert!(TimelineConfig::from_durations([("a", -1.0), ("b", 2.0)]).is_err());
}

#[test]
fn json_defaults_speed_and_delta() {
    let json = r#"{
        "loop_duration_secs": 6.0,
        "phases": [
            { "name": "card", "weight": 0.5 },
            { "name": "settlement", "weight": 0.5 }
        ]
    }"#;
    let cfg = TimelineConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.speed, SpeedModulation::urgent());
    assert_eq!(cfg.max_tick_delta_secs, DEFAULT_MAX_TICK_DELTA_SECS);
}

#[test]
fn json_is_validated_after_parse() {
    let json = r#"{ "loop_duration_secs": 6.0, "phases": [] }"#;
    assert!(TimelineConfig::from_json_str(json).is_err());
    assert!(matches!(
        TimelineConfig::from_json_str("{"),
        Err(MotionError::Serde(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = TimelineConfig::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn payment_phase_names_round_trip() {
    for (i, p) in PaymentPhase::ALL.iter().enumerate() {
        assert_eq!(PaymentPhase::from_index(i), Some(*p));
        assert_eq!(PaymentPhase::from_name(p.name()), Some(*p));
    }
    assert_eq!(PaymentPhase::from_index(7), None);
}
