use serde::Serialize;

/// Gameplay tuning for the ice-racing boat speed model.
///
/// Keep this separate from runtime configuration (tick rates, channel sizes, etc.).
/// Speeds are in world units per tick; factors are per-tick multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpeedTuning {
    /// Speed ceiling while the hull is over ice.
    pub max_ice_speed: f64,

    /// Speed ceiling off ice (enough to climb back out onto the track).
    pub max_off_ice_speed: f64,

    /// Speed added each tick while the rider pushes forward.
    #[serde(rename = "acceleration-amount")]
    pub acceleration: f64,

    /// Passive glide decay on ice.
    pub deceleration_factor: f64,

    /// Momentum loss off ice, both passive and while over the off-ice ceiling.
    pub momentum_loss_factor: f64,

    /// Active braking, same on every surface.
    pub brake_factor: f64,

    /// Send each rider a per-tick status line.
    pub debug: bool,
}

impl Default for SpeedTuning {
    fn default() -> Self {
        Self {
            max_ice_speed: 1.5,
            max_off_ice_speed: 0.45,
            acceleration: 0.025,
            deceleration_factor: 0.98,
            momentum_loss_factor: 0.92,
            brake_factor: 0.85,
            debug: false,
        }
    }
}

impl SpeedTuning {
    /// Ceiling that applies on the given surface.
    pub fn ceiling(&self, on_ice: bool) -> f64 {
        if on_ice {
            self.max_ice_speed
        } else {
            self.max_off_ice_speed
        }
    }
}
