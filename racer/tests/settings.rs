use std::path::Path;

use drive::{DriveConfig, SimConfig, Variant};
use racer::settings::ConfigFile;
use track::{ShapeSpec, TrackSpec};

#[test]
fn missing_sections_come_from_the_preset() {
    let file = ConfigFile::load(Path::new("tests/data/bounded_only.json")).unwrap();
    assert_eq!(file.resolve(None), SimConfig::preset(Variant::Bounded));
}

#[test]
fn command_line_variant_wins_over_the_file() {
    let file = ConfigFile::load(Path::new("tests/data/bounded_only.json")).unwrap();
    assert_eq!(file.resolve(Some(Variant::Segmented)), SimConfig::preset(Variant::Segmented));
}

#[test]
fn empty_config_means_straight() {
    assert_eq!(ConfigFile::default().resolve(None), SimConfig::preset(Variant::Straight));
}

#[test]
fn track_section_replaces_only_the_track() {
    let file = ConfigFile::load(Path::new("tests/data/override_track.json")).unwrap();
    let config = file.resolve(None);
    assert_eq!(config.drive, DriveConfig::straight());
    assert_eq!(
        config.track,
        TrackSpec {
            length: 60.0,
            width: 4.0,
            shape: ShapeSpec::Straight { straight_length: 20.0, slope: 0.25 },
        }
    );
    assert!(config.build().is_ok());
}

#[test]
fn bad_dimensions_parse_but_do_not_build() {
    let file = ConfigFile::load(Path::new("tests/data/bad_width.json")).unwrap();
    assert!(file.resolve(None).build().is_err());
}

#[test]
fn unknown_sections_are_rejected() {
    assert!(ConfigFile::load(Path::new("tests/data/unknown_section.json")).is_err());
    assert!(ConfigFile::parse("{ not json").is_err());
}

#[test]
fn missing_file_names_the_path() {
    let err = ConfigFile::load(Path::new("tests/data/does_not_exist.json")).unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.json"), "{err:#}");
}
