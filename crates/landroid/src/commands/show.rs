//! `show`: the normalized view of a snapshot, formatted field by field.

use serde::Serialize;
use serde_json::{Map, Value};
use tabled::Tabled;

use landroid_core::{FormatContext, MowerView, status_line};

use crate::cli::{GlobalOpts, ShowArgs};
use crate::error::CliError;
use crate::output;

use super::util::Session;

#[derive(Debug, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Debug, Serialize)]
struct ShowReport {
    entity_id: String,
    name: String,
    state: String,
    status_line: String,
    fields: Vec<FieldRow>,
    view: MowerView,
}

pub fn handle(args: &ShowArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let session = Session::load(global)?;
    let ctx = session.formatter.context();

    let mut fields = Vec::new();
    let attributes = session.view.to_attributes().into_inner();
    collect_rows(&attributes, None, args.raw, &ctx, &mut fields);
    if !args.fields.is_empty() {
        fields.retain(|row| {
            args.fields.iter().any(|wanted| {
                row.field == *wanted || row.field.starts_with(&format!("{wanted}."))
            })
        });
    }

    let report = ShowReport {
        entity_id: session.snapshot.entity_id.clone(),
        name: session.view.friendly_name.clone(),
        state: session.view.state.clone(),
        status_line: status_line(&session.view, &ctx),
        fields,
        view: session.view.clone(),
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &report,
        |r| detail(r, color),
        |r| {
            r.fields
                .iter()
                .map(|f| format!("{}={}", f.field, f.value))
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet)
}

fn detail(report: &ShowReport, color: bool) -> String {
    let heading = if report.name.is_empty() {
        report.entity_id.clone()
    } else {
        format!("{} ({})", report.name, report.entity_id)
    };
    format!(
        "{}\n{}\n{}",
        output::dim(&heading, color),
        output::paint_state(&report.state, &report.status_line, color),
        output::render_table(&report.fields)
    )
}

/// One row per scalar. Nested objects expand to dotted keys, each leaf
/// formatted under its own field name.
fn collect_rows(
    map: &Map<String, Value>,
    parent: Option<&str>,
    raw: bool,
    ctx: &FormatContext<'_>,
    rows: &mut Vec<FieldRow>,
) {
    for (key, value) in map {
        let path = parent.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        match value {
            Value::Object(children) if !children.is_empty() => {
                collect_rows(children, Some(&path), raw, ctx, rows);
            }
            _ => rows.push(FieldRow {
                label: ctx.localize_or(&format!("attr.{key}"), key),
                value: if raw {
                    value.to_string()
                } else {
                    ctx.format(key, Some(value))
                },
                field: path,
            }),
        }
    }
}
