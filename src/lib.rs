pub mod analysis_system;
pub mod constants;
pub mod errors;
pub mod plotting_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::integrator::{simulate, size_time_grid, TimeGrid, Trajectory};
pub use trajectory_system::parachute::{ParachuteModel, SimulationConfig, State};

// Re-export commonly used items from analysis_system
pub use analysis_system::monte_carlo::{
    run_batch, BatchResult, JumperOutcome, RangeStatistics, Sex,
};
pub use analysis_system::sweep::{
    parameter_values, run_sweep, SweepParameter, SweepResult, SweepRun,
};

// Re-export commonly used items from plotting_system
pub use plotting_system::charts::{plot_batch, plot_sweep, plot_trajectory};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
