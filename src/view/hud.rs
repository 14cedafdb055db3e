//! One-line textual status, shown in the window title in place of an overlay.

use crate::controller::FrameOutput;
use crate::model::FlightPhase;

pub fn status_line(frame: &FrameOutput) -> String {
    let pose = &frame.pose;
    let fps = if frame.dt > 0.0 { 1.0 / frame.dt } else { 0.0 };
    let hint = match pose.phase {
        FlightPhase::Idle => "hold Space to charge",
        FlightPhase::Charging => "release Space to launch",
        FlightPhase::Landed => "press Space to reset",
        _ => "",
    };

    let mut line = format!(
        "{} | h {:.2} | v {:+.2} | gauge {:.2}/3 | {:.0} fps",
        pose.phase, pose.height, pose.vertical_speed, pose.charge_gauge, fps
    );
    if !hint.is_empty() {
        line.push_str(" | ");
        line.push_str(hint);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlightState;
    use glam::Mat4;

    fn frame(flight: &FlightState, dt: f32) -> FrameOutput {
        FrameOutput {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            pose: flight.pose(),
            dt,
        }
    }

    #[test]
    fn test_idle_line_has_hint() {
        let line = status_line(&frame(&FlightState::new(), 0.0));
        assert!(line.starts_with("idle | h 0.00"));
        assert!(line.ends_with("hold Space to charge"));
    }

    #[test]
    fn test_flight_line_reports_speed() {
        let flight = FlightState {
            launched: true,
            vertical_speed: 1.5,
            height: 3.0,
            charge_gauge: 2.0,
            ..FlightState::default()
        };
        let line = status_line(&frame(&flight, 0.02));
        assert_eq!(line, "ascending | h 3.00 | v +1.50 | gauge 2.00/3 | 50 fps");
    }
}
