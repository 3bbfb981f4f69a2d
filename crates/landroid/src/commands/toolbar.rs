//! `toolbar`: buttons the card offers in the snapshot's state, each with
//! the event a press produces.

use serde::Serialize;
use tabled::Tabled;

use landroid_core::{
    CardEvent, FormatContext, ToolbarButton, ToolbarItem, configbar_for, toolbar_for,
};

use crate::cli::{GlobalOpts, ToolbarArgs};
use crate::error::CliError;
use crate::output;

use super::util::Session;

#[derive(Debug, Clone, Serialize, Tabled)]
struct ButtonRow {
    #[tabled(rename = "Button")]
    name: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Calls")]
    calls: String,
    #[tabled(skip)]
    event: CardEvent,
}

pub fn handle(args: &ToolbarArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let session = Session::load(global)?;
    let ctx = session.formatter.context();
    let entity_id = session.entity_id()?;
    let router = session.router(&entity_id);

    let rows = if args.configbar {
        configbar_for(&session.view)
            .iter()
            .map(|button| -> Result<ButtonRow, CliError> {
                Ok(button_row(button, button.event(&router)?, &ctx))
            })
            .collect::<Result<Vec<_>, _>>()?
    } else {
        toolbar_for(&session.view, &session.config.card.shortcuts)
            .iter()
            .map(|item| -> Result<ButtonRow, CliError> {
                let event = item.event(&router)?;
                Ok(match item {
                    ToolbarItem::Button(button) => button_row(button, event, &ctx),
                    ToolbarItem::Shortcut(shortcut) => ButtonRow {
                        name: shortcut.name.clone(),
                        title: shortcut.name.clone(),
                        icon: shortcut.icon.clone(),
                        calls: describe(&event),
                        event,
                    },
                })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let out = output::render_list(&global.output, &rows, ButtonRow::clone, |r| r.name.clone())?;
    output::print_output(&out, global.quiet)
}

fn button_row(
    button: &ToolbarButton,
    event: CardEvent,
    ctx: &FormatContext<'_>,
) -> ButtonRow {
    let caption_key = button.label_key.as_deref().unwrap_or(&button.title_key);
    ButtonRow {
        name: button.action.to_string(),
        title: ctx.localize_or(caption_key, button.action.name()),
        icon: button.icon.clone(),
        calls: describe(&event),
        event,
    }
}

/// `domain.service` for calls, `more-info` for the dialog.
pub fn describe(event: &CardEvent) -> String {
    match event {
        CardEvent::CallService(call) => call.qualified_name(),
        CardEvent::MoreInfo { entity_id } => format!("more-info {entity_id}"),
    }
}
