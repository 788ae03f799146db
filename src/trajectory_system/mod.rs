pub mod integrator;
pub mod parachute;
