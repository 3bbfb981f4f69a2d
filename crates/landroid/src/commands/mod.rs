//! Command dispatch: bridges CLI args -> core rendering -> output formatting.

pub mod config_cmd;
pub mod format;
pub mod icons;
pub mod menu;
pub mod service;
pub mod show;
pub mod toolbar;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a rendering command to its handler.
pub fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Show(args) => show::handle(&args, global),
        Command::Format(args) => format::handle_format(&args, global),
        Command::Fields => format::handle_fields(global),
        Command::Icons => icons::handle(global),
        Command::Toolbar(args) => toolbar::handle(&args, global),
        Command::Menu(args) => menu::handle(&args, global),
        Command::Service(args) => service::handle(&args, global),
        Command::Config(args) => config_cmd::handle(args, global),
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}
