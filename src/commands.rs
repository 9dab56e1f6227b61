//! High-level command orchestration for the CLI.
//!
//! Each handler here corresponds to one action flag in `main.rs` and prints
//! through `crate::ui`. The filesystem work lives in `crate::sets` and
//! `crate::switch`.

use anstyle::AnsiColor;
use anyhow::{Context, Result};

use crate::paths::SwitchEnv;
use crate::sets::list_sets;
use crate::switch::{FileReport, LinkOutcome, LinkStatus, active_set, link_statuses, switch_to_set};
use crate::ui::Ui;

/// List all valid configurations
pub fn list(env: &SwitchEnv, ui: &Ui) -> Result<()> {
    let sets = list_sets(&env.paths).with_context(|| {
        format!(
            "Failed to read configs directory: {}",
            env.paths.root_dir.display()
        )
    })?;

    if sets.is_empty() {
        ui.warn(format!(
            "No valid configurations found in {}",
            env.paths.root_dir.display()
        ));
        ui.println(format!(
            "A configuration is a directory containing: {}",
            env.paths.required_files.join(", ")
        ));
        return Ok(());
    }

    ui.section(LIST_HEADING);
    ui.println(listing(&sets));
    Ok(())
}

const LIST_HEADING: &str = "> Below are available configurations:";

/// One set name per line
fn listing(sets: &[String]) -> String {
    sets.join("\n")
}

/// Validate a configuration and point the managed links at it
pub fn switch(env: &SwitchEnv, name: &str, ui: &Ui) -> Result<()> {
    ui.info(format!("Switching to configuration '{}'", name));

    let report = switch_to_set(env, name, |file| print_progress(ui, file))?;

    if report.is_complete() {
        ui.ok(format!("Active configuration: {}", ui.bold(name)));
        return Ok(());
    }

    // Per-file problems were printed as they happened; link failures under
    // the abort policy already returned an error
    let problems: Vec<&str> = report.problems().map(|f| f.file.as_str()).collect();
    ui.warn(format!(
        "Switched to '{}' with {} of {} links not updated: {}",
        name,
        problems.len(),
        report.files.len(),
        problems.join(", ")
    ));
    Ok(())
}

fn print_progress(ui: &Ui, report: &FileReport) {
    let target = report.target.display();
    match &report.outcome {
        LinkOutcome::Created => ui.ok(format!("Linked {} -> {}", report.file, target)),
        LinkOutcome::Replaced { previous } => ui.ok(format!(
            "Linked {} -> {} {}",
            report.file,
            target,
            ui.dim(format!("(was {})", previous.display()))
        )),
        LinkOutcome::Unchanged => ui.info(format!(
            "{} already points to {}",
            report.file, target
        )),
        LinkOutcome::Skipped(reason) => ui.warn(format!("Skipped: {}", reason)),
        LinkOutcome::Failed(err) => ui.err(err.to_string()),
    }
}

/// Show what each managed path currently is
pub fn status(env: &SwitchEnv, ui: &Ui) -> Result<()> {
    ui.section("Managed Links");
    ui.println(ui.dim(format!(
        "{} in {} (configs: {})",
        env.platform.name(),
        env.paths.workdir.display(),
        env.paths.root_dir.display()
    )));
    ui.newline();

    let mut table = ui.table();
    table.set_header(vec![
        ui.header_cell(""),
        ui.header_cell("File"),
        ui.header_cell("Link"),
        ui.header_cell("Configuration"),
    ]);

    for (file, status) in link_statuses(&env.paths) {
        let status = match status {
            Ok(status) => status,
            Err(err) => {
                table.add_row(vec![
                    ui.cell(ui.icon_err()),
                    ui.cell(file),
                    ui.colored_cell(format!("unreadable: {}", err), AnsiColor::Red),
                    ui.cell("-"),
                ]);
                continue;
            }
        };

        let set = status
            .target()
            .map(|t| env.paths.set_of_target(t).unwrap_or_else(|| "(external)".into()))
            .unwrap_or_else(|| "-".into());

        let (icon, link_cell) = match &status {
            LinkStatus::Missing => (
                ui.icon_warn(),
                ui.colored_cell("missing", AnsiColor::Yellow),
            ),
            LinkStatus::RegularFile => (ui.icon_warn(), ui.cell("regular file (unmanaged)")),
            LinkStatus::Directory => (ui.icon_warn(), ui.cell("directory (unmanaged)")),
            LinkStatus::Symlink { target } => {
                (ui.icon_ok(), ui.cell(format!("→ {}", target.display())))
            }
            LinkStatus::BrokenSymlink { target } => (
                ui.icon_err(),
                ui.colored_cell(format!("broken → {}", target.display()), AnsiColor::Red),
            ),
        };

        table.add_row(vec![ui.cell(icon), ui.cell(file), link_cell, ui.cell(set)]);
    }

    ui.println(table.to_string());
    ui.newline();

    match active_set(&env.paths) {
        Some(name) => ui.ok(format!("Active configuration: {}", ui.bold(name))),
        None => ui.warn("No single configuration is fully active"),
    }
    Ok(())
}
