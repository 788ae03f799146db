use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};

use crate::constants::{
    FEMALE_MASS_MEAN, FEMALE_MASS_STD_DEV, LAUNCH_GAP_MEAN, MALE_MASS_MEAN, MALE_MASS_STD_DEV,
};
use crate::errors::SimulationError;
use crate::trajectory_system::integrator::simulate;
use crate::trajectory_system::parachute::{ParachuteModel, SimulationConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

#[derive(Debug, Clone)]
pub struct JumperOutcome {
    pub sex: Sex,
    pub mass: f64,
    pub launch_time: f64,
    /// Horizontal distance covered between leaving the aircraft and landing.
    pub range: f64,
    /// Range offset by the distance the aircraft travelled before the jump.
    pub landing_position: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RangeStatistics {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub jumpers: Vec<JumperOutcome>,
}

impl BatchResult {
    pub fn ranges(&self, sex: Sex) -> Vec<f64> {
        self.jumpers
            .iter()
            .filter(|j| j.sex == sex)
            .map(|j| j.range)
            .collect()
    }

    /// Population mean and standard deviation of the ranges for one sex.
    pub fn range_statistics(&self, sex: Sex) -> RangeStatistics {
        let ranges = self.ranges(sex);
        let count = ranges.len();
        let mean = ranges.iter().sum::<f64>() / count as f64;
        let variance = ranges.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / count as f64;

        RangeStatistics {
            count,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Simulates a stream of jumpers leaving the same aircraft. Launch gaps are
/// exponentially distributed; masses alternate between the male and female
/// distributions jumper by jumper.
pub fn run_batch(
    config: &SimulationConfig,
    num_jumpers: usize,
    rng: &mut impl Rng,
) -> Result<BatchResult, SimulationError> {
    if num_jumpers == 0 {
        return Err(SimulationError::InvalidParameter(
            "a batch needs at least one jumper".to_string(),
        ));
    }

    let launch_gap = Exp::new(1.0 / LAUNCH_GAP_MEAN).map_err(|e| {
        SimulationError::InvalidParameter(format!("invalid launch-gap distribution: {}", e))
    })?;
    let male_mass = Normal::new(MALE_MASS_MEAN, MALE_MASS_STD_DEV).map_err(|e| {
        SimulationError::InvalidParameter(format!("invalid male mass distribution: {}", e))
    })?;
    let female_mass = Normal::new(FEMALE_MASS_MEAN, FEMALE_MASS_STD_DEV).map_err(|e| {
        SimulationError::InvalidParameter(format!("invalid female mass distribution: {}", e))
    })?;

    let mut jumpers = Vec::with_capacity(num_jumpers);
    let mut launch_time = 0.0;

    for index in 0..num_jumpers {
        launch_time += launch_gap.sample(rng);

        let (sex, mass) = if index % 2 == 0 {
            (Sex::Male, male_mass.sample(rng))
        } else {
            (Sex::Female, female_mass.sample(rng))
        };

        let mut jump_config = config.clone();
        jump_config.mass = mass;

        let model = ParachuteModel::from_config(&jump_config)?;
        let trajectory = simulate(&model)?;

        let range = trajectory.landing_distance();
        let landing_position = config.initial_horizontal_speed * launch_time + range;

        jumpers.push(JumperOutcome {
            sex,
            mass,
            launch_time,
            range,
            landing_position,
        });
    }

    Ok(BatchResult { jumpers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run_seeded_batch(num_jumpers: usize, seed: u64) -> BatchResult {
        let config = SimulationConfig {
            drag_closed: Some(15.0),
            ..SimulationConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        run_batch(&config, num_jumpers, &mut rng).expect("batch should succeed")
    }

    #[test]
    fn test_batch_size_and_sex_alternation() {
        let batch = run_seeded_batch(7, 42);

        assert_eq!(batch.jumpers.len(), 7);
        for (index, jumper) in batch.jumpers.iter().enumerate() {
            let expected = if index % 2 == 0 { Sex::Male } else { Sex::Female };
            assert_eq!(jumper.sex, expected, "jumper {} has the wrong sex", index);
        }

        let males = batch.ranges(Sex::Male).len();
        let females = batch.ranges(Sex::Female).len();
        assert_eq!(males, 4);
        assert_eq!(females, 3);
    }

    #[test]
    fn test_launch_times_strictly_increasing() {
        let batch = run_seeded_batch(20, 7);

        let mut previous = 0.0;
        for jumper in &batch.jumpers {
            assert!(
                jumper.launch_time > previous,
                "launch times must accumulate: {} after {}",
                jumper.launch_time,
                previous
            );
            previous = jumper.launch_time;
        }
    }

    #[test]
    fn test_masses_follow_their_distributions() {
        let batch = run_seeded_batch(40, 11);

        for jumper in &batch.jumpers {
            match jumper.sex {
                // 5 sigma bands around the configured means.
                Sex::Male => assert!(
                    (60.0..90.0).contains(&jumper.mass),
                    "male mass out of band: {}",
                    jumper.mass
                ),
                Sex::Female => assert!(
                    (50.0..70.0).contains(&jumper.mass),
                    "female mass out of band: {}",
                    jumper.mass
                ),
            }
        }
    }

    #[test]
    fn test_landing_position_offsets_range_by_aircraft_travel() {
        let batch = run_seeded_batch(10, 3);

        for jumper in &batch.jumpers {
            let expected = 50.0 * jumper.launch_time + jumper.range;
            assert_relative_eq!(jumper.landing_position, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_seeded_batches_are_reproducible() {
        let first = run_seeded_batch(12, 99);
        let second = run_seeded_batch(12, 99);

        for (a, b) in first.jumpers.iter().zip(&second.jumpers) {
            assert_eq!(a.mass, b.mass);
            assert_eq!(a.launch_time, b.launch_time);
            assert_eq!(a.range, b.range);
        }
    }

    #[test]
    fn test_range_statistics() {
        let batch = BatchResult {
            jumpers: vec![
                JumperOutcome {
                    sex: Sex::Male,
                    mass: 75.0,
                    launch_time: 1.0,
                    range: 100.0,
                    landing_position: 150.0,
                },
                JumperOutcome {
                    sex: Sex::Male,
                    mass: 76.0,
                    launch_time: 2.0,
                    range: 104.0,
                    landing_position: 204.0,
                },
                JumperOutcome {
                    sex: Sex::Female,
                    mass: 60.0,
                    launch_time: 3.0,
                    range: 90.0,
                    landing_position: 240.0,
                },
            ],
        };

        let male = batch.range_statistics(Sex::Male);
        assert_eq!(male.count, 2);
        assert_relative_eq!(male.mean, 102.0);
        assert_relative_eq!(male.std_dev, 2.0);

        let female = batch.range_statistics(Sex::Female);
        assert_eq!(female.count, 1);
        assert_relative_eq!(female.mean, 90.0);
        assert_relative_eq!(female.std_dev, 0.0);
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let err = run_batch(&config, 0, &mut rng).expect_err("zero jumpers must fail");
        assert!(matches!(err, SimulationError::InvalidParameter(_)));
    }
}
