use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

// cli.rs only depends on clap + clap_complete (both build-dependencies),
// so it can be included here without the rest of the crate.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR").map(PathBuf::from) else {
        println!("cargo::warning=OUT_DIR not set; skipping man pages");
        return;
    };
    let man_dir = out_dir.join("man");
    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo::warning=failed to create {}: {e}", man_dir.display());
        return;
    }

    generate_manpages(&cli::Cli::command(), &man_dir);
}

/// Man pages for a command and each visible subcommand, `landroid-menu.1`
/// style.
fn generate_manpages(cmd: &clap::Command, dir: &Path) {
    let name = cmd.get_name().to_owned();
    let path = dir.join(format!("{name}.1"));

    let mut buf = Vec::new();
    let rendered = clap_mangen::Man::new(cmd.clone())
        .render(&mut buf)
        .and_then(|()| fs::write(&path, &buf));
    if let Err(e) = rendered {
        println!("cargo::warning=man page for `{name}` failed: {e}");
    }

    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        generate_manpages(&sub, dir);
    }
}
