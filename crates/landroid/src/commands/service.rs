//! `service`: the host call the card makes for a card action.

use serde_json::Map;

use landroid_core::{Action, CardEvent};

use crate::cli::{GlobalOpts, ServiceArgs};
use crate::error::CliError;
use crate::output;

use super::toolbar::describe;
use super::util::{Session, parse_value};

pub fn handle(args: &ServiceArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let action = Action::parse(&args.action)?;
    let session = Session::load(global)?;
    let entity_id = session.entity_id()?;
    let router = session.router(&entity_id);
    let is_request = !args.no_request;

    let event = if args.data.is_empty() {
        router.handle_action(action, None, is_request)?
    } else {
        router.call_service(action, is_request, parse_data(&args.data)?)
    };
    render_event(&event, global)
}

/// `key=value` pairs as service data. Values are JSON when they parse.
fn parse_data(pairs: &[String]) -> Result<Map<String, serde_json::Value>, CliError> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| CliError::Validation {
                field: "data".into(),
                reason: format!("expected KEY=VALUE, got '{pair}'"),
            })?;
            if key.is_empty() {
                return Err(CliError::Validation {
                    field: "data".into(),
                    reason: format!("empty key in '{pair}'"),
                });
            }
            Ok((key.to_owned(), parse_value(value)))
        })
        .collect()
}

pub fn render_event(event: &CardEvent, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(
        &global.output,
        event,
        |e| match e {
            CardEvent::CallService(call) => {
                let data = serde_json::to_string(&call.data).unwrap_or_default();
                let pending = if call.is_request { " (request)" } else { "" };
                format!("{} {data}{pending}", call.qualified_name())
            }
            CardEvent::MoreInfo { .. } => describe(e),
        },
        describe,
    )?;
    output::print_output(&out, global.quiet)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_pairs_parse_json_values() {
        let data = parse_data(&["zone=2".into(), "label=front lawn".into(), "on=true".into()]).unwrap();
        assert_eq!(data.get("zone"), Some(&json!(2)));
        assert_eq!(data.get("label"), Some(&json!("front lawn")));
        assert_eq!(data.get("on"), Some(&json!(true)));
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert!(matches!(parse_data(&["zone".into()]), Err(CliError::Validation { .. })));
        assert!(matches!(parse_data(&["=1".into()]), Err(CliError::Validation { .. })));
    }
}
