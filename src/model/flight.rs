use std::fmt;

/// Everything the flight simulation tracks between frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightState {
    /// Vertical offset of the rocket; the launch pad sits at 0.
    pub height: f32,
    pub charge_gauge: f32,
    pub vertical_speed: f32,
    /// Tilt in degrees, applied once the rocket starts falling.
    pub rotation: f32,
    pub parachute_deployed: bool,
    pub launched: bool,
    pub landed: bool,
    pub rotating_to_fall: bool,
    /// Set while the charge key is held and charging is allowed. A release only
    /// acts on an armed gauge.
    pub charge_armed: bool,
}

impl FlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FlightPhase {
        if self.landed {
            FlightPhase::Landed
        } else if self.launched && self.parachute_deployed {
            FlightPhase::ParachuteDeployed
        } else if self.launched && self.rotating_to_fall {
            FlightPhase::Descending
        } else if self.launched {
            FlightPhase::Ascending
        } else if self.charge_armed {
            FlightPhase::Charging
        } else {
            FlightPhase::Idle
        }
    }

    pub fn pose(&self) -> RocketPose {
        RocketPose {
            height: self.height,
            rotation: self.rotation,
            parachute_visible: self.parachute_deployed,
            landed: self.landed,
            launched: self.launched,
            rotating_to_fall: self.rotating_to_fall,
            vertical_speed: self.vertical_speed,
            charge_gauge: self.charge_gauge,
            phase: self.phase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightPhase {
    Idle,
    Charging,
    Ascending,
    Descending,
    ParachuteDeployed,
    Landed,
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlightPhase::Idle => "idle",
            FlightPhase::Charging => "charging",
            FlightPhase::Ascending => "ascending",
            FlightPhase::Descending => "descending",
            FlightPhase::ParachuteDeployed => "parachute",
            FlightPhase::Landed => "landed",
        };
        f.write_str(name)
    }
}

/// Snapshot of the rocket handed to the renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketPose {
    pub height: f32,
    /// Degrees.
    pub rotation: f32,
    pub parachute_visible: bool,
    pub landed: bool,
    pub launched: bool,
    pub rotating_to_fall: bool,
    pub vertical_speed: f32,
    pub charge_gauge: f32,
    pub phase: FlightPhase,
}
