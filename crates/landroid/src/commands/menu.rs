//! `menu`: one of the card's list menus, or the event for a selection.

use tabled::Tabled;

use landroid_core::{Menu, MenuKind, MenuRow, list_menu};

use crate::cli::{GlobalOpts, MenuArgs};
use crate::error::CliError;
use crate::output;

use super::service::render_event;
use super::util::Session;

#[derive(Debug, Tabled)]
struct RowView {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Entry")]
    text: String,
}

impl From<&MenuRow> for RowView {
    fn from(row: &MenuRow) -> Self {
        let indent = if row.nested { "  " } else { "" };
        Self {
            marker: if row.selected { "*" } else { "" },
            key: row.key.clone(),
            text: format!("{indent}{}", row.text()),
        }
    }
}

pub fn handle(args: &MenuArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let kind = MenuKind::parse(&args.kind)?;
    let session = Session::load(global)?;
    let ctx = session.formatter.context();
    let menu = list_menu(kind, &session.view, &ctx);

    if let Some(option) = &args.select {
        let entity_id = session.entity_id()?;
        let router = session.router(&entity_id);
        return match menu.select(option, &router)? {
            Some(event) => render_event(&event, global),
            None => {
                if !global.quiet {
                    eprintln!("Menu '{kind}' is informational; nothing to select");
                }
                Ok(())
            }
        };
    }

    let out = output::render_single(&global.output, &menu, detail, |m| {
        m.rows
            .iter()
            .filter(|r| !r.is_label)
            .map(MenuRow::text)
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    output::print_output(&out, global.quiet)
}

fn detail(menu: &Menu) -> String {
    let heading = match &menu.header {
        Some(header) if menu.value_right => format!("{} {}  {header}", menu.icon, menu.title),
        Some(header) => format!("{header}  {} {}", menu.icon, menu.title),
        None => format!("{} {}", menu.icon, menu.title),
    };
    let rows: Vec<RowView> = menu.rows.iter().map(RowView::from).collect();
    format!("{heading}\n{}", output::render_table(&rows))
}
