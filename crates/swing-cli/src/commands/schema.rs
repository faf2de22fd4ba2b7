use schemars::schema_for;
use swing_core::entities::{MatchedPair, Session};
use swing_core::responses::Reconciliation;

use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::cli::{GlobalFlags, OutputFormat};

/// Handle `swingsync schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    println!("{}", render(args.type_name, flags.format)?);
    Ok(())
}

fn render(type_name: SchemaType, format: OutputFormat) -> anyhow::Result<String> {
    let schema = match type_name {
        SchemaType::Session => schema_for!(Session),
        SchemaType::Pair => schema_for!(MatchedPair),
        SchemaType::Reconciliation => schema_for!(Reconciliation),
    };
    let rendered = match format {
        OutputFormat::Raw => serde_json::to_string(&schema)?,
        OutputFormat::Json | OutputFormat::Table => serde_json::to_string_pretty(&schema)?,
    };
    Ok(rendered)
}
