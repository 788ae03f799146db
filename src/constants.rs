// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²

// Simulation Parameters
pub const SAMPLES_PER_SECOND: f64 = 50.0; // density of the requested time grid
pub const TIME_HORIZON_MARGIN: f64 = 1.5; // safety factor on the estimated fall time

// Default Jump Parameters (command-line defaults)
pub const DEFAULT_MASS: f64 = 75.0; // kg
pub const DEFAULT_INITIAL_ALTITUDE: f64 = 4_000.0; // m
pub const DEFAULT_HORIZONTAL_SPEED: f64 = 50.0; // m/s (carried over from the aircraft)
pub const DEFAULT_DRAG_OPEN: f64 = 60.0; // kg/s
pub const DEFAULT_TRIGGER_ALTITUDE: f64 = 1_000.0; // m

// Batch Generation Parameters
pub const LAUNCH_GAP_MEAN: f64 = 20.0; // s, mean gap between consecutive jumps
pub const MALE_MASS_MEAN: f64 = 75.0; // kg
pub const MALE_MASS_STD_DEV: f64 = 3.0; // kg
pub const FEMALE_MASS_MEAN: f64 = 60.0; // kg
pub const FEMALE_MASS_STD_DEV: f64 = 2.0; // kg
pub const DEFAULT_NUM_JUMPERS: usize = 500;
