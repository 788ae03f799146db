use crate::constants::{GRAVITY, SAMPLES_PER_SECOND, TIME_HORIZON_MARGIN};
use crate::errors::SimulationError;
use crate::trajectory_system::parachute::{ParachuteModel, State};

/// Sizing of the requested time grid, derived from the jump parameters before
/// any integration happens.
#[derive(Debug, Clone, Copy)]
pub struct TimeGrid {
    pub t_final: f64,
    pub num_points: usize,
}

impl TimeGrid {
    pub fn times(&self) -> Vec<f64> {
        if self.num_points == 1 {
            return vec![0.0];
        }
        let dt = self.t_final / (self.num_points as f64 - 1.0);
        (0..self.num_points).map(|i| i as f64 * dt).collect()
    }
}

/// Fall samples retained up to ground contact. Times are strictly increasing
/// and parallel to the states; both are non-empty.
#[derive(Debug, Clone)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<State>,
}

impl Trajectory {
    fn new(times: Vec<f64>, states: Vec<State>) -> Self {
        assert_eq!(
            times.len(),
            states.len(),
            "times and states must stay parallel"
        );
        assert!(!times.is_empty(), "a trajectory holds at least one sample");
        Trajectory { times, states }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn landing_state(&self) -> &State {
        &self.states[self.states.len() - 1]
    }

    /// Horizontal distance covered when the last above-ground sample was taken.
    pub fn landing_distance(&self) -> f64 {
        self.landing_state().position.x
    }

    pub fn landing_speed(&self) -> f64 {
        self.landing_state().speed()
    }

    pub fn max_speed(&self) -> f64 {
        self.states
            .iter()
            .map(State::speed)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn fall_duration(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}

/// Sizes the time grid from the terminal-velocity estimate. The estimate uses
/// the open-parachute coefficient alone, matching the historical heuristic even
/// when the closed coefficient dominates the actual fall time.
pub fn size_time_grid(model: &ParachuteModel) -> Result<TimeGrid, SimulationError> {
    let v_terminal = model.mass * GRAVITY / model.drag_open;
    let t_estimate = model.initial_altitude / v_terminal;
    let t_final = t_estimate * TIME_HORIZON_MARGIN;

    if t_final <= 0.0 {
        return Err(SimulationError::InvalidParameter(format!(
            "non-positive time horizon ({} s); the jump must start above the ground",
            t_final
        )));
    }

    let num_points = (t_final * SAMPLES_PER_SECOND).floor() as usize;
    if num_points < 1 {
        return Err(SimulationError::InvalidParameter(format!(
            "time horizon {} s is too short to hold a single sample",
            t_final
        )));
    }

    Ok(TimeGrid {
        t_final,
        num_points,
    })
}

fn rk4_step(model: &ParachuteModel, state: State, dt: f64) -> State {
    let k1 = model.derivatives(&state);
    let k2 = model.derivatives(&State::new(
        state.position + k1.0 * (dt / 2.0),
        state.velocity + k1.1 * (dt / 2.0),
    ));
    let k3 = model.derivatives(&State::new(
        state.position + k2.0 * (dt / 2.0),
        state.velocity + k2.1 * (dt / 2.0),
    ));
    let k4 = model.derivatives(&State::new(
        state.position + k3.0 * dt,
        state.velocity + k3.1 * dt,
    ));

    State::new(
        state.position + (dt / 6.0) * (k1.0 + 2.0 * k2.0 + 2.0 * k3.0 + k4.0),
        state.velocity + (dt / 6.0) * (k1.1 + 2.0 * k2.1 + 2.0 * k3.1 + k4.1),
    )
}

/// Runs the fall to completion: sizes the grid, integrates the equations of
/// motion and drops every sample that ended up below ground level.
pub fn simulate(model: &ParachuteModel) -> Result<Trajectory, SimulationError> {
    let grid = size_time_grid(model)?;
    let times = grid.times();

    let mut states = Vec::with_capacity(times.len());
    let mut state = model.initial_state();
    states.push(state);

    for window in times.windows(2) {
        let dt = window[1] - window[0];
        state = rk4_step(model, state, dt);
        if !state.is_finite() {
            return Err(SimulationError::IntegrationFailure(format!(
                "state diverged at t = {:.3} s",
                window[1]
            )));
        }
        states.push(state);
    }

    // Per-sample mask, not an early stop: every sample at or above the ground
    // is kept in its original order.
    let (kept_times, kept_states): (Vec<f64>, Vec<State>) = times
        .into_iter()
        .zip(states)
        .filter(|(_, s)| s.position.y >= 0.0)
        .unzip();

    if kept_times.is_empty() {
        return Err(SimulationError::IntegrationFailure(
            "every computed sample was below ground level".to_string(),
        ));
    }

    Ok(Trajectory::new(kept_times, kept_states))
}
