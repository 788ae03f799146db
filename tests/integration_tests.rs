use parachute_simulation::{
    run_batch, run_sweep, simulate, size_time_grid, ParachuteModel, Sex, SimulationConfig,
    SimulationError, SweepParameter, GRAVITY,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Helper function to create the default split-coefficient jump
fn create_default_jump() -> SimulationConfig {
    SimulationConfig {
        drag_closed: Some(15.0),
        ..SimulationConfig::default()
    }
}

#[test]
fn test_full_jump_from_default_parameters() {
    println!("INTEGRATION TEST: Full jump with parachute opening at 1000 m");

    let config = create_default_jump();
    let model = ParachuteModel::from_config(&config).expect("default parameters must be valid");
    let grid = size_time_grid(&model).expect("default parameters must size a grid");
    let trajectory = simulate(&model).expect("default parameters must integrate");

    println!(
        "Grid: {} points over {:.1}s | Retained: {} samples over {:.1}s",
        grid.num_points,
        grid.t_final,
        trajectory.len(),
        trajectory.fall_duration()
    );
    println!(
        "Landing: x = {:.1}m | speed = {:.2}m/s | max speed = {:.2}m/s",
        trajectory.landing_distance(),
        trajectory.landing_speed(),
        trajectory.max_speed()
    );

    // The jumper must actually reach the ground inside the sized horizon.
    assert!(
        trajectory.len() < grid.num_points,
        "the below-ground tail should have been filtered out"
    );

    // Last retained sample sits just above the ground (one grid step at most).
    let final_altitude = trajectory.landing_state().position.y;
    assert!(
        final_altitude >= 0.0 && final_altitude < 1.0,
        "final altitude should be just above ground level, got {}",
        final_altitude
    );

    // Near the ground the fall has settled at the open-canopy terminal speed.
    let terminal_open = config.mass * GRAVITY / config.drag_open;
    let landing_speed = trajectory.landing_speed();
    assert!(
        (landing_speed - terminal_open).abs() < 1.0,
        "landing speed {} should sit near the open terminal speed {}",
        landing_speed,
        terminal_open
    );

    // The horizontal speed decays with time constant m/k, so the carried
    // distance stays bounded well below v0 * fall duration.
    let distance = trajectory.landing_distance();
    assert!(
        distance > 0.0 && distance < 1000.0,
        "landing distance should be positive and bounded, got {}",
        distance
    );
}

#[test]
fn test_earlier_opening_extends_the_fall() {
    println!("INTEGRATION TEST: Sweep over the trigger altitude");

    let config = create_default_jump();
    let result = run_sweep(&config, SweepParameter::TriggerAltitude, 500.0, 3500.0, 1000.0)
        .expect("trigger-altitude sweep must succeed");

    assert_eq!(result.runs.len(), 4);
    for pair in result.runs.windows(2) {
        println!(
            "ht={:.0}m -> {:.1}s | ht={:.0}m -> {:.1}s",
            pair[0].value,
            pair[0].trajectory.fall_duration(),
            pair[1].value,
            pair[1].trajectory.fall_duration()
        );
        assert!(
            pair[0].trajectory.fall_duration() < pair[1].trajectory.fall_duration(),
            "a higher trigger altitude opens the canopy earlier and slows the fall"
        );
    }
}

#[test]
fn test_batch_of_jumpers_lands_in_order_of_mass() {
    println!("INTEGRATION TEST: Monte-Carlo batch of 30 jumpers");

    let config = create_default_jump();
    let mut rng = StdRng::seed_from_u64(2024);
    let result = run_batch(&config, 30, &mut rng).expect("batch must succeed");

    assert_eq!(result.jumpers.len(), 30);

    let male = result.range_statistics(Sex::Male);
    let female = result.range_statistics(Sex::Female);
    println!(
        "Male:   n={} mean={:.1}m std={:.1}m",
        male.count, male.mean, male.std_dev
    );
    println!(
        "Female: n={} mean={:.1}m std={:.1}m",
        female.count, female.mean, female.std_dev
    );

    assert_eq!(male.count, 15);
    assert_eq!(female.count, 15);

    // Heavier jumpers keep their horizontal speed longer, so the male ranges
    // should come out ahead of the female ones on average.
    assert!(
        male.mean > female.mean,
        "male mean range {} should exceed female mean range {}",
        male.mean,
        female.mean
    );

    // Landing positions spread out with the aircraft's travel.
    for jumper in &result.jumpers {
        assert!(jumper.landing_position > jumper.range);
    }
}

#[test]
fn test_invalid_parameters_never_reach_the_integrator() {
    let bad_mass = SimulationConfig {
        mass: 0.0,
        ..create_default_jump()
    };
    let err = ParachuteModel::from_config(&bad_mass).expect_err("zero mass must be rejected");
    assert!(matches!(err, SimulationError::InvalidParameter(_)));

    let bad_drag = SimulationConfig {
        drag_open: -5.0,
        ..create_default_jump()
    };
    let err = ParachuteModel::from_config(&bad_drag).expect_err("negative drag must be rejected");
    assert!(matches!(err, SimulationError::InvalidParameter(_)));

    let grounded = SimulationConfig {
        initial_altitude: 0.0,
        ..create_default_jump()
    };
    let model = ParachuteModel::from_config(&grounded).expect("the model itself is fine");
    let err = simulate(&model).expect_err("a jump from ground level has no time horizon");
    assert!(matches!(err, SimulationError::InvalidParameter(_)));
}
