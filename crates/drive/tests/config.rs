use std::f64::consts::PI;
use std::fs;

use drive::track::{TrackError, TrackSpec};
use drive::{DriveConfig, DriveError, RewardBase, SimConfig, Variant};

#[test]
fn presets_carry_their_variant_rules() {
    let bounded = DriveConfig::bounded();
    assert!(bounded.off_track_terminal);
    assert!((bounded.start_heading - PI / 4.0).abs() < 1e-12);
    assert!((bounded.turn_delta - PI / 18.0).abs() < 1e-12);
    assert_eq!(bounded.speed_recovery, 0.05);
    assert_eq!(bounded.finish_reward, Some(100.0));

    let straight = DriveConfig::straight();
    assert!(!straight.off_track_terminal);
    assert!((straight.turn_delta - PI / 36.0).abs() < 1e-12);
    assert_eq!(straight.reward_base, RewardBase::Flat { value: 1.0 });

    let segmented = DriveConfig::segmented();
    assert_eq!(segmented.reward_base, RewardBase::Centerline);
    assert_eq!(segmented.finish_reward, None);

    for variant in Variant::ALL {
        let config = SimConfig::preset(variant);
        assert!(config.drive.validate().is_ok(), "{variant}");
        assert!(config.build().is_ok(), "{variant}");
    }
}

#[test]
fn variant_names_parse_case_insensitively() {
    assert_eq!("straight".parse::<Variant>(), Ok(Variant::Straight));
    assert_eq!("Bounded".parse::<Variant>(), Ok(Variant::Bounded));
    assert_eq!("SEGMENTED".parse::<Variant>(), Ok(Variant::Segmented));
    assert_eq!(
        "oval".parse::<Variant>(),
        Err(DriveError::UnknownVariant("oval".to_owned()))
    );
    for variant in Variant::ALL {
        assert_eq!(variant.to_string().parse::<Variant>(), Ok(variant));
    }
}

#[test]
fn invalid_track_fails_before_a_simulation_exists() {
    let config = SimConfig {
        track: TrackSpec { width: -1.0, ..TrackSpec::straight() },
        drive: DriveConfig::straight(),
    };
    assert_eq!(
        config.build().unwrap_err(),
        DriveError::Track(TrackError::InvalidDimension { name: "width", value: -1.0 })
    );
}

#[test]
fn invalid_drive_rules_are_named() {
    let cases = [
        (DriveConfig { turn_delta: 0.0, ..DriveConfig::straight() }, "turn_delta"),
        (DriveConfig { max_speed: -1.0, ..DriveConfig::straight() }, "max_speed"),
        (DriveConfig { speed_recovery: f64::NAN, ..DriveConfig::straight() }, "speed_recovery"),
        (DriveConfig { off_track_reward: f64::INFINITY, ..DriveConfig::straight() }, "off_track_reward"),
        (DriveConfig { finish_line: Some(0.0), ..DriveConfig::straight() }, "finish_line"),
        (DriveConfig { finish_reward: Some(f64::NAN), ..DriveConfig::straight() }, "finish_reward"),
        (
            DriveConfig { reward_base: RewardBase::Flat { value: f64::NAN }, ..DriveConfig::straight() },
            "reward_base",
        ),
        (
            DriveConfig { forward_bonus: 5.0, backward_penalty: 1.0, ..DriveConfig::straight() },
            "backward_penalty",
        ),
        (
            DriveConfig { forward_bonus: 3.0, backward_penalty: 3.0, ..DriveConfig::straight() },
            "backward_penalty",
        ),
    ];
    for (config, expected) in cases {
        match config.validate() {
            Err(DriveError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected {expected} to be rejected, got {other:?}"),
        }
        let sim = SimConfig { track: TrackSpec::straight(), drive: config }.build();
        assert!(sim.is_err());
    }
}

#[test]
fn sim_config_loads_from_json() {
    let json = fs::read_to_string("tests/data/segmented_seeded.json").unwrap();
    let config: SimConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config.drive, DriveConfig::segmented());
    assert_eq!(config.track, TrackSpec::segmented_random(Some(17)));

    let a = config.build().unwrap();
    let b = config.build().unwrap();
    assert_eq!(a.track(), b.track());
}

#[test]
fn sim_config_survives_json() {
    for variant in Variant::ALL {
        let config = SimConfig::preset(variant);
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
