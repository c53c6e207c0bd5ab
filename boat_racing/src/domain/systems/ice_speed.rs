use crate::domain::state::{SpeedPhase, SurfaceInputs};
use crate::domain::tuning::SpeedTuning;
use glam::DVec3;

/// Below this speed a boat counts as stopped and is handed back to host physics.
pub const SPEED_EPSILON: f64 = 0.01;

/// Result of one tick of the speed model for a single vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Speed to keep for the next tick; `None` once the boat has stopped.
    pub speed: Option<f64>,
    /// Velocity to apply this tick, if any.
    pub velocity: Option<DVec3>,
    pub phase: SpeedPhase,
    /// Ceiling of the surface the boat was on.
    pub ceiling: f64,
}

impl TickOutcome {
    /// Speed shown to the rider: the stored value, or zero once dropped.
    pub fn displayed_speed(&self) -> f64 {
        self.speed.unwrap_or(0.0)
    }
}

/// Advances a scalar speed by one tick.
///
/// A non-finite impulse compares false on both sides and is treated as neutral.
pub fn step_speed(speed: f64, on_ice: bool, impulse: f32, cfg: &SpeedTuning) -> (f64, SpeedPhase) {
    if on_ice {
        if impulse > 0.0 {
            (
                cfg.max_ice_speed.min(speed + cfg.acceleration),
                SpeedPhase::IceAccelerating,
            )
        } else if impulse < 0.0 {
            (speed * cfg.brake_factor, SpeedPhase::IceBraking)
        } else {
            (speed * cfg.deceleration_factor, SpeedPhase::IceGliding)
        }
    } else if impulse > 0.0 {
        // Ice momentum carried over the edge bleeds off instead of being clamped,
        // and the rider cannot push past the off-ice ceiling.
        if speed > cfg.max_off_ice_speed {
            (speed * cfg.momentum_loss_factor, SpeedPhase::OffIceCoasting)
        } else {
            (
                cfg.max_off_ice_speed.min(speed + cfg.acceleration),
                SpeedPhase::OffIceExiting,
            )
        }
    } else if impulse < 0.0 {
        (speed * cfg.brake_factor, SpeedPhase::OffIceBraking)
    } else {
        (speed * cfg.momentum_loss_factor, SpeedPhase::OffIceDrifting)
    }
}

/// Full tick update: previous speed (absent = 0) and surface inputs in, new
/// speed and velocity command out.
pub fn update(current: Option<f64>, inputs: SurfaceInputs, cfg: &SpeedTuning) -> TickOutcome {
    let (next, phase) = step_speed(current.unwrap_or(0.0), inputs.on_ice, inputs.impulse, cfg);
    let ceiling = cfg.ceiling(phase.is_on_ice());

    if next < SPEED_EPSILON {
        return TickOutcome {
            speed: None,
            velocity: None,
            phase,
            ceiling,
        };
    }

    TickOutcome {
        speed: Some(next),
        velocity: horizontal_direction(inputs.facing).map(|dir| dir * next),
        phase,
        ceiling,
    }
}

/// Unit facing vector flattened onto the horizontal plane.
pub fn horizontal_direction(facing: DVec3) -> Option<DVec3> {
    DVec3::new(facing.x, 0.0, facing.z).try_normalize()
}
