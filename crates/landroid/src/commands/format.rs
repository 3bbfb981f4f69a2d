//! `format` and `fields`: the formatter on its own, without a snapshot.

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use landroid_core::{FieldCategory, format_value};

use crate::cli::{FormatArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util::parse_value;

#[derive(Debug, Serialize)]
struct Formatted {
    field: String,
    category: FieldCategory,
    input: Option<Value>,
    formatted: String,
}

pub fn handle_format(args: &FormatArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_effective(global)?;
    let formatter = config::formatter(&cfg)?;
    let ctx = formatter.context();

    let input = args.value.as_deref().map(parse_value);
    let result = Formatted {
        field: args.field.clone(),
        category: FieldCategory::of(&args.field),
        formatted: format_value(&args.field, input.as_ref(), &ctx),
        input,
    };

    let out = output::render_single(
        &global.output,
        &result,
        |r| r.formatted.clone(),
        |r| r.formatted.clone(),
    )?;
    output::print_output(&out, global.quiet)
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct FieldInfo {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Category")]
    category: FieldCategory,
    #[tabled(rename = "Label")]
    label: String,
}

pub fn handle_fields(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_effective(global)?;
    let formatter = config::formatter(&cfg)?;
    let ctx = formatter.context();

    let mut fields: Vec<FieldInfo> = FieldCategory::known_fields()
        .map(|(field, category)| FieldInfo {
            field,
            category,
            label: ctx.localize_or(&format!("attr.{field}"), field),
        })
        .collect();
    fields.sort_by_key(|f| f.field);

    let out = output::render_list(&global.output, &fields, FieldInfo::clone, |f| f.field.to_owned())?;
    output::print_output(&out, global.quiet)
}
