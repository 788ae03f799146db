use crate::constants::{
    DEFAULT_DRAG_OPEN, DEFAULT_HORIZONTAL_SPEED, DEFAULT_INITIAL_ALTITUDE, DEFAULT_MASS,
    DEFAULT_TRIGGER_ALTITUDE, GRAVITY,
};
use crate::errors::SimulationError;
use crate::utils::vector2d::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl State {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        State { position, velocity }
    }

    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Jump parameters as supplied by the caller, before validation. `drag_closed`
/// left unset means a single-coefficient fall with `drag_open` throughout.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub mass: f64,
    pub initial_altitude: f64,
    pub initial_horizontal_speed: f64,
    pub drag_open: f64,
    pub drag_closed: Option<f64>,
    pub trigger_altitude: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            mass: DEFAULT_MASS,
            initial_altitude: DEFAULT_INITIAL_ALTITUDE,
            initial_horizontal_speed: DEFAULT_HORIZONTAL_SPEED,
            drag_open: DEFAULT_DRAG_OPEN,
            drag_closed: None,
            trigger_altitude: DEFAULT_TRIGGER_ALTITUDE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParachuteModel {
    pub mass: f64,
    pub initial_altitude: f64,
    pub initial_horizontal_speed: f64,
    pub drag_open: f64,
    pub drag_closed: f64,
    pub trigger_altitude: f64,
}

impl ParachuteModel {
    pub fn new(
        mass: f64,
        initial_altitude: f64,
        initial_horizontal_speed: f64,
        drag_open: f64,
        drag_closed: Option<f64>,
        trigger_altitude: f64,
    ) -> Result<Self, SimulationError> {
        if mass <= 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "mass must be positive, got {} kg",
                mass
            )));
        }
        if drag_open <= 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "open-parachute drag coefficient must be positive, got {} kg/s",
                drag_open
            )));
        }
        let drag_closed = drag_closed.unwrap_or(drag_open);
        if drag_closed <= 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "closed-parachute drag coefficient must be positive, got {} kg/s",
                drag_closed
            )));
        }

        Ok(ParachuteModel {
            mass,
            initial_altitude,
            initial_horizontal_speed,
            drag_open,
            drag_closed,
            trigger_altitude,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        ParachuteModel::new(
            config.mass,
            config.initial_altitude,
            config.initial_horizontal_speed,
            config.drag_open,
            config.drag_closed,
            config.trigger_altitude,
        )
    }

    /// Drag coefficient in effect at the given altitude: `drag_closed` above
    /// the trigger altitude, `drag_open` at or below it. Re-evaluated from the
    /// current altitude on every call; there is no latched "deployed" mode.
    pub fn drag_coefficient(&self, altitude: f64) -> f64 {
        if altitude > self.trigger_altitude {
            self.drag_closed
        } else {
            self.drag_open
        }
    }

    pub fn derivatives(&self, state: &State) -> (Vector2D, Vector2D) {
        let drag = self.drag_coefficient(state.position.y);
        let acceleration = Vector2D::new(
            -(drag / self.mass) * state.velocity.x,
            -(drag / self.mass) * state.velocity.y - GRAVITY,
        );

        (state.velocity, acceleration)
    }

    pub fn initial_state(&self) -> State {
        State::new(
            Vector2D::new(0.0, self.initial_altitude),
            Vector2D::new(self.initial_horizontal_speed, 0.0),
        )
    }
}
