// Domain-level vehicle identities, terrain types and per-tick inputs.

use std::fmt;

/// Stable identity of one vehicle instance for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vehicle-{}", self.0)
    }
}

/// Stable identity of a connected player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Boat,
    Minecart,
    Horse,
}

/// Block material occupying a world cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Air,
    Water,
    Ice,
    PackedIce,
    BlueIce,
    Snow,
    Stone,
    Grass,
    Sand,
}

/// Materials treated as low-friction racing surfaces.
pub const ICE_BLOCKS: [Material; 3] = [Material::Ice, Material::PackedIce, Material::BlueIce];

impl Material {
    pub fn is_ice(self) -> bool {
        ICE_BLOCKS.contains(&self)
    }
}

/// Occupant of a vehicle seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passenger<P> {
    /// A player-controlled rider.
    Player(P),
    /// Any other entity (mobs, armor stands, items).
    Other,
}

/// Everything the speed model needs to know about one tick.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceInputs {
    /// Whether the block just below the hull is in the ice set.
    pub on_ice: bool,
    /// Signed forward input; only the sign is used.
    pub impulse: f32,
    /// Horizontal facing of the vehicle (y is ignored).
    pub facing: glam::DVec3,
}

/// Which branch of the speed model produced this tick's speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedPhase {
    IceAccelerating,
    IceBraking,
    IceGliding,
    /// Carried-over ice momentum bleeding off while the rider still pushes forward.
    OffIceCoasting,
    /// Normal acceleration up to the off-ice ceiling.
    OffIceExiting,
    OffIceBraking,
    OffIceDrifting,
}

impl SpeedPhase {
    pub fn is_on_ice(self) -> bool {
        matches!(
            self,
            SpeedPhase::IceAccelerating | SpeedPhase::IceBraking | SpeedPhase::IceGliding
        )
    }

    /// Human-readable tag shown to the rider in debug mode.
    pub fn tag(self) -> &'static str {
        match self {
            SpeedPhase::IceAccelerating => "On ice: Accelerating",
            SpeedPhase::IceBraking => "On ice: Braking",
            SpeedPhase::IceGliding => "On ice: Gliding",
            SpeedPhase::OffIceCoasting => "Off ice: Inertia (coasting)",
            SpeedPhase::OffIceExiting => "Off ice: Exiting",
            SpeedPhase::OffIceBraking => "Off ice: Braking",
            SpeedPhase::OffIceDrifting => "Off ice: Inertia",
        }
    }
}

impl fmt::Display for SpeedPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Debug readout sent to a rider after each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusLine {
    pub phase: SpeedPhase,
    /// Post-update speed, zero once the boat has stopped.
    pub speed: f64,
    pub ceiling: f64,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Speed: {:.2} / {:.2}",
            self.phase, self.speed, self.ceiling
        )
    }
}
