//! `icons`: the icon table resolved against the snapshot.

use serde::Serialize;
use tabled::Tabled;

use landroid_core::{IconEntry, all_icons};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util::Session;

#[derive(Debug, Clone, Serialize, Tabled)]
struct IconRow {
    #[tabled(rename = "Entry")]
    entry: IconEntry,
    #[tabled(rename = "Icon")]
    icon: String,
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let session = Session::load(global)?;
    let rows: Vec<IconRow> = all_icons(&session.view)
        .into_iter()
        .map(|(entry, icon)| IconRow { entry, icon })
        .collect();

    let out = output::render_list(&global.output, &rows, IconRow::clone, |r| {
        format!("{} {}", r.entry, r.icon)
    })?;
    output::print_output(&out, global.quiet)
}
