use std::f64::consts::{FRAC_PI_2, PI, TAU};

use drive::{Action, DVec2, DriveError, Simulation, StepOutcome, Variant, VehicleState};

const EPS: f64 = 1e-9;

#[test]
fn reset_places_vehicle_on_the_centerline() {
    let mut straight = Simulation::preset(Variant::Straight).unwrap();
    let obs = straight.reset();
    assert_eq!(obs.position, DVec2::ZERO);
    assert_eq!(obs.heading, 0.0);
    assert_eq!(obs.distance_to_left, 2.5);
    assert_eq!(obs.distance_to_right, 2.5);
    assert_eq!(straight.speed(), 1.0);
    assert!(!straight.is_terminal());

    let mut bounded = Simulation::preset(Variant::Bounded).unwrap();
    let obs = bounded.reset();
    assert_eq!(obs.position, DVec2::new(0.0, 2.5));
    assert!((obs.heading - PI / 4.0).abs() < EPS);
    assert_eq!(obs.distance_to_left, 2.5);
    assert_eq!(obs.distance_to_right, 2.5);

    let mut segmented = Simulation::preset(Variant::Segmented).unwrap();
    let obs = segmented.reset();
    assert_eq!(obs.position, DVec2::ZERO);
    assert_eq!(obs.heading, 0.0);
}

#[test]
fn four_right_turns_on_straight_track() {
    let mut sim = Simulation::preset(Variant::Straight).unwrap();
    sim.reset();
    let delta = PI / 36.0;

    let mut expected = DVec2::ZERO;
    for k in 1..=4 {
        let step = sim.step(Action::TurnRight).unwrap();
        assert_eq!(step.outcome, StepOutcome::Progress);
        // flat base reward plus the forward bonus
        assert_eq!(step.reward, 3.0);
        assert!(!step.terminal);
        let angle = -f64::from(k) * delta;
        expected += DVec2::new(angle.cos(), angle.sin());
    }

    assert!((sim.heading() - (TAU - 4.0 * delta)).abs() < EPS, "heading={}", sim.heading());
    // Speed starts at the maximum, so every tick moves exactly one unit along
    // the freshly turned heading.
    assert_eq!(sim.speed(), 1.0);
    let diff = (sim.position() - expected).length();
    assert!(diff < EPS, "diff={diff}");
    assert!((sim.position().x - 4.0 * (4.0 * delta).cos()).abs() < 0.2);
}

#[test]
fn backward_motion_is_penalised() {
    let mut sim = Simulation::preset(Variant::Straight).unwrap();
    sim.reset_with(VehicleState::new(DVec2::new(10.0, 0.0), PI, 1.0));
    let step = sim.step(Action::TurnLeft).unwrap();
    assert_eq!(step.outcome, StepOutcome::Progress);
    assert_eq!(step.reward, 1.0 - 3.0);
    assert!(sim.position().x < 10.0);

    for variant in Variant::ALL {
        let config = variant.drive();
        assert!(config.backward_penalty > config.forward_bonus, "{variant}");
    }
}

#[test]
fn off_track_clamps_stops_and_penalises() {
    let mut sim = Simulation::preset(Variant::Straight).unwrap();
    sim.reset_with(VehicleState::new(DVec2::new(10.0, 2.4), FRAC_PI_2, 1.0));

    let step = sim.step(Action::TurnLeft).unwrap();
    let predicted_y = 2.4 + (FRAC_PI_2 + PI / 36.0).sin();

    assert_eq!(step.outcome, StepOutcome::OffTrack);
    assert_eq!(step.reward, -10.0);
    assert!(!step.terminal);
    assert_eq!(sim.position(), DVec2::new(10.0, 2.5));
    assert_eq!(sim.speed(), 0.0);

    // The observation reports the committed position but measures the
    // boundary distances from where the vehicle tried to go.
    assert_eq!(step.observation.position, DVec2::new(10.0, 2.5));
    assert!((step.observation.distance_to_right - (2.5 - predicted_y)).abs() < EPS);
    assert!(step.observation.distance_to_right < 0.0);
    assert!((step.observation.distance_to_left - (predicted_y + 2.5)).abs() < EPS);
}

#[test]
fn stopped_vehicle_restarts_from_the_boundary() {
    let mut sim = Simulation::preset(Variant::Straight).unwrap();
    // Start outside the lane and already stopped.
    sim.reset_with(VehicleState::new(DVec2::new(10.0, 4.0), FRAC_PI_2, 0.0));

    let step = sim.step(Action::TurnLeft).unwrap();
    assert_eq!(step.outcome, StepOutcome::OffTrack);
    assert_eq!(sim.position(), DVec2::new(10.0, 2.5));

    // With zero speed the prediction sits exactly on the (inclusive)
    // boundary, so the same action now counts as progress and speed recovers.
    let step = sim.step(Action::TurnLeft).unwrap();
    assert_eq!(step.outcome, StepOutcome::Progress);
    // No predicted motion, so no shaping either way.
    assert_eq!(step.reward, 1.0);
    assert!((sim.speed() - 0.1).abs() < EPS);
}

#[test]
fn bounded_variant_ends_on_leaving_the_corridor() {
    let mut sim = Simulation::preset(Variant::Bounded).unwrap();
    let initial = sim.reset();

    let mut last = None;
    for _ in 0..10 {
        let step = sim.step(Action::TurnLeft).unwrap();
        last = Some(step);
        if step.terminal {
            break;
        }
    }
    let last = last.unwrap();
    assert!(last.terminal);
    assert_eq!(last.outcome, StepOutcome::OffTrack);
    assert_eq!(last.reward, -10.0);
    assert_eq!(sim.position().y, 5.0);
    assert_eq!(sim.speed(), 0.0);

    assert_eq!(sim.step(Action::TurnLeft), Err(DriveError::EpisodeTerminated));
    assert_eq!(sim.step(Action::TurnRight), Err(DriveError::EpisodeTerminated));
    assert_eq!(sim.reset(), initial);
    assert!(!sim.is_terminal());
}

#[test]
fn reset_with_wraps_heading_and_clamps_speed() {
    let mut sim = Simulation::preset(Variant::Straight).unwrap();
    let state = VehicleState {
        position: DVec2::new(5.0, 1.0),
        heading: -FRAC_PI_2,
        speed: 7.5,
        terminal: true,
    };
    let obs = sim.reset_with(state);
    assert!((obs.heading - 3.0 * FRAC_PI_2).abs() < EPS);
    assert_eq!(sim.speed(), 1.0);
    assert!(!sim.is_terminal());
    assert_eq!(obs.distance_to_left, 3.5);
    assert_eq!(obs.distance_to_right, 1.5);
}

#[test]
fn random_rollouts_respect_state_invariants() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let mut off_track = 0;

    for variant in Variant::ALL {
        let mut sim = Simulation::preset(variant).unwrap();
        let max_speed = sim.config().max_speed;
        sim.reset();

        for tick in 0..2000 {
            // Bursts of left turns make sure the lane gets left now and then.
            let action = if tick % 50 < 20 {
                Action::TurnLeft
            } else if rng.bool() {
                Action::TurnLeft
            } else {
                Action::TurnRight
            };
            let before = sim.position();
            let step = sim.step(action).unwrap();

            let heading = sim.heading();
            assert!((0.0..TAU).contains(&heading), "heading={heading}");
            assert!((0.0..=max_speed).contains(&sim.speed()), "speed={}", sim.speed());
            assert_eq!(step.observation.heading, heading);

            if step.outcome == StepOutcome::OffTrack {
                off_track += 1;
                assert_eq!(sim.position().x, before.x);
                assert_eq!(sim.speed(), 0.0);
            }
            if step.terminal {
                sim.reset();
            }
        }
    }
    assert!(off_track > 0);
}

#[test]
fn regenerate_only_changes_random_tracks() {
    let mut rng = fastrand::Rng::with_seed(5);
    let mut segmented = Simulation::preset(Variant::Segmented).unwrap();
    let before = segmented.track().clone();
    assert!(segmented.regenerate_track(&mut rng));
    assert_ne!(segmented.track(), &before);

    let mut straight = Simulation::preset(Variant::Straight).unwrap();
    assert!(!straight.regenerate_track(&mut rng));
}
