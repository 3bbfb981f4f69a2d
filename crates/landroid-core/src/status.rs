//! The one-line status summary shown under the mower name.

use serde_json::Value;

use crate::format::FormatContext;
use crate::model::{EPOCH, MowerView};

/// Localized status plus the detail that matters in that state: remaining
/// rain delay, the zone being mowed, the error, or the next scheduled start.
pub fn status_line(view: &MowerView, ctx: &FormatContext<'_>) -> String {
    let status = view.status.as_str();
    let mut line = ctx.localize_or(&format!("status.{status}"), status);

    match status {
        "rain_delay" => {
            let remaining = ctx.format("remaining", Some(&Value::from(view.rain_sensor.remaining)));
            line.push_str(&format!(" ({remaining})"));
        }
        "mowing" => {
            let zone = ctx.localize_or("attr.zone", "");
            line.push_str(&format!(" - {zone} {}", view.zone.current.saturating_add(1)));
        }
        "error" if view.error.is_error() => {
            let description = &view.error.description;
            let text = ctx.localize_or(&format!("error.{description}"), description);
            line.push_str(&format!(" {}: {text}", view.error.id));
        }
        "docked" | "idle" if has_schedule(&view.next_scheduled_start) => {
            let label = ctx.localize_or("attr.next_scheduled_start", "");
            let at = ctx.format(
                "next_scheduled_start",
                Some(&Value::from(view.next_scheduled_start.as_str())),
            );
            line.push_str(&format!(" - {label} {at}"));
        }
        _ => {}
    }

    line
}

/// The epoch default stands for "nothing scheduled"; the segment is left
/// out rather than showing a 1970 start time.
fn has_schedule(next: &str) -> bool {
    !next.is_empty() && next != EPOCH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Formatter, UnitSystem};
    use pretty_assertions::assert_eq;

    fn line(view: &MowerView) -> String {
        let formatter = Formatter::default();
        status_line(view, &formatter.context())
    }

    fn with_status(status: &str) -> MowerView {
        MowerView {
            status: status.into(),
            state: status.into(),
            ..MowerView::default()
        }
    }

    #[test]
    fn plain_states_are_localized() {
        assert_eq!(line(&with_status("returning")), "Returning home");
        assert_eq!(line(&with_status("some_new_state")), "some_new_state");
    }

    #[test]
    fn rain_delay_shows_remaining_time() {
        let mut view = with_status("rain_delay");
        view.rain_sensor.remaining = 75;
        assert_eq!(line(&view), "Rain delay (1 hr 15 min)");
    }

    #[test]
    fn mowing_shows_one_based_zone() {
        let mut view = with_status("mowing");
        view.zone.current = 1;
        assert_eq!(line(&view), "Mowing - Zone 2");
    }

    #[test]
    fn error_shows_id_and_description() {
        let mut view = with_status("error");
        assert_eq!(line(&view), "Error");
        view.error.id = 3;
        view.error.description = "wire_missing".into();
        assert_eq!(line(&view), "Error 3: Wire missing");
        view.error.description = "Custom failure".into();
        assert_eq!(line(&view), "Error 3: Custom failure");
    }

    #[test]
    fn docked_shows_next_start_when_scheduled() {
        let mut view = with_status("docked");
        assert_eq!(line(&view), "Docked");
        view.next_scheduled_start = "2024-03-05T14:07:00+00:00".into();
        assert_eq!(line(&view), "Docked - Next start 05/03/2024, 14:07");
    }

    #[test]
    fn unscheduled_next_start_is_omitted() {
        for next in [EPOCH, ""] {
            let mut view = with_status("idle");
            view.next_scheduled_start = next.into();
            assert_eq!(line(&view), "Idle");
        }
    }

    #[test]
    fn german_status() {
        let formatter = Formatter::new("de", UnitSystem::metric());
        let mut view = with_status("mowing");
        view.zone.current = 0;
        assert_eq!(status_line(&view, &formatter.context()), "Mäht - Zone 1");
    }
}
