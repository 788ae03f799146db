use crate::errors::SimulationError;
use crate::trajectory_system::integrator::{simulate, Trajectory};
use crate::trajectory_system::parachute::{ParachuteModel, SimulationConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepParameter {
    Mass,
    InitialAltitude,
    InitialHorizontalSpeed,
    DragOpen,
    DragClosed,
    TriggerAltitude,
}

impl SweepParameter {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "m" => Some(SweepParameter::Mass),
            "h0" => Some(SweepParameter::InitialAltitude),
            "v0" => Some(SweepParameter::InitialHorizontalSpeed),
            "ka" => Some(SweepParameter::DragOpen),
            "kc" => Some(SweepParameter::DragClosed),
            "ht" => Some(SweepParameter::TriggerAltitude),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SweepParameter::Mass => "m",
            SweepParameter::InitialAltitude => "h0",
            SweepParameter::InitialHorizontalSpeed => "v0",
            SweepParameter::DragOpen => "ka",
            SweepParameter::DragClosed => "kc",
            SweepParameter::TriggerAltitude => "ht",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SweepParameter::Mass => "kg",
            SweepParameter::InitialAltitude => "m",
            SweepParameter::InitialHorizontalSpeed => "m/s",
            SweepParameter::DragOpen => "kg/s",
            SweepParameter::DragClosed => "kg/s",
            SweepParameter::TriggerAltitude => "m",
        }
    }

    fn apply(&self, config: &mut SimulationConfig, value: f64) {
        match self {
            SweepParameter::Mass => config.mass = value,
            SweepParameter::InitialAltitude => config.initial_altitude = value,
            SweepParameter::InitialHorizontalSpeed => config.initial_horizontal_speed = value,
            SweepParameter::DragOpen => config.drag_open = value,
            SweepParameter::DragClosed => config.drag_closed = Some(value),
            SweepParameter::TriggerAltitude => config.trigger_altitude = value,
        }
    }
}

/// Values `start, start + step, ...` up to and including `stop` (numpy
/// `arange(start, stop + step, step)` semantics, so `stop` itself makes the
/// list whenever the step divides the span).
pub fn parameter_values(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, SimulationError> {
    if step <= 0.0 {
        return Err(SimulationError::InvalidParameter(format!(
            "sweep step must be positive, got {}",
            step
        )));
    }
    if stop < start {
        return Err(SimulationError::InvalidParameter(format!(
            "sweep range is empty: start {} is past stop {}",
            start, stop
        )));
    }

    let mut values = Vec::new();
    let mut index = 0u32;
    loop {
        let value = start + f64::from(index) * step;
        if value >= stop + step {
            break;
        }
        values.push(value);
        index += 1;
    }

    Ok(values)
}

#[derive(Debug, Clone)]
pub struct SweepRun {
    pub value: f64,
    pub landing_distance: f64,
    pub landing_speed: f64,
    pub max_speed: f64,
    pub trajectory: Trajectory,
}

#[derive(Debug, Clone)]
pub struct SweepResult {
    pub parameter: SweepParameter,
    pub base: SimulationConfig,
    pub runs: Vec<SweepRun>,
}

/// Simulates one fall per parameter value, the remaining parameters taken from
/// the base configuration.
pub fn run_sweep(
    base: &SimulationConfig,
    parameter: SweepParameter,
    start: f64,
    stop: f64,
    step: f64,
) -> Result<SweepResult, SimulationError> {
    let values = parameter_values(start, stop, step)?;

    let mut runs = Vec::with_capacity(values.len());
    for value in values {
        let mut config = base.clone();
        parameter.apply(&mut config, value);

        let model = ParachuteModel::from_config(&config)?;
        let trajectory = simulate(&model)?;

        runs.push(SweepRun {
            value,
            landing_distance: trajectory.landing_distance(),
            landing_speed: trajectory.landing_speed(),
            max_speed: trajectory.max_speed(),
            trajectory,
        });
    }

    Ok(SweepResult {
        parameter,
        base: base.clone(),
        runs,
    })
}
