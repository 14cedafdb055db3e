use crate::config::{FlightConfig, TickMode};
use crate::controller::input::ChargeInput;
use crate::model::{FlightState, RocketPose};

/// Advances the launch/fall/land state machine once per frame.
///
/// Tick order is charge, release, then physics, so the frame that launches the
/// rocket already moves it.
#[derive(Debug, Clone, Default)]
pub struct FlightController {
    pub params: FlightConfig,
}

impl FlightController {
    pub fn new(params: FlightConfig) -> Self {
        Self { params }
    }

    /// How many "ticks" worth of change this frame applies. A rate that is not
    /// a positive finite number falls back to one tick per frame.
    fn tick_scale(&self, dt: f32) -> f32 {
        match self.params.tick_mode.sanitized() {
            TickMode::PerFrame => 1.0,
            TickMode::FixedRate { hz } => dt.max(0.0) * hz,
        }
    }

    pub fn update(&self, flight: &mut FlightState, dt: f32, input: ChargeInput) -> RocketPose {
        let scale = self.tick_scale(dt);

        if input.held {
            self.charge(flight, scale);
        }
        if input.just_released {
            self.release(flight);
        }
        if flight.launched && !flight.landed {
            self.integrate(flight, scale);
        }

        flight.pose()
    }

    fn charge(&self, flight: &mut FlightState, scale: f32) {
        if flight.launched || flight.landed {
            return;
        }
        flight.charge_gauge = (flight.charge_gauge + self.params.charge_step * scale)
            .min(self.params.max_charge)
            .max(0.0);
        flight.charge_armed = true;
    }

    fn release(&self, flight: &mut FlightState) {
        if !flight.charge_armed {
            return;
        }
        if !flight.launched {
            flight.launched = true;
            flight.vertical_speed = flight.charge_gauge;
            tracing::debug!(speed = flight.vertical_speed, "launch");
        }
        if flight.landed {
            self.reset(flight);
        }
    }

    /// Back to the pad. Height goes to `reset_height`, every other field to its
    /// initial value.
    pub fn reset(&self, flight: &mut FlightState) {
        *flight = FlightState {
            height: self.params.reset_height,
            ..FlightState::default()
        };
    }

    fn integrate(&self, flight: &mut FlightState, scale: f32) {
        let p = &self.params;

        if !flight.parachute_deployed {
            flight.vertical_speed -= p.gravity_decay * scale;
        }
        if flight.vertical_speed < 0.0 {
            flight.rotating_to_fall = true;
            flight.rotation = p.fall_tilt_deg;
        }
        if flight.vertical_speed < p.parachute_speed {
            flight.parachute_deployed = true;
            flight.vertical_speed /= p.parachute_drag;
        }

        flight.height += flight.vertical_speed / p.gravity * scale;

        if flight.height < p.landing_height {
            flight.landed = true;
        }
    }
}
