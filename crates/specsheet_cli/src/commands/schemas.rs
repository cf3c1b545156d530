//! Schemas command - List the tab schema catalog.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use specsheet_schema::{FieldLayout, SchemaRegistry, TabAllowance, TabNamePattern, TabSchema};

use super::CommandError;

#[derive(Args)]
pub struct SchemasArgs {
    /// Show a single schema with its fields
    #[arg(short, long)]
    name: Option<String>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

/// The catalog as printed by `--json`.
#[derive(Serialize)]
struct CatalogView<'r> {
    exact_names: &'r [&'static str],
    patterns: Vec<PatternView>,
    schemas: Vec<&'r TabSchema>,
}

#[derive(Serialize)]
struct PatternView {
    pattern: TabNamePattern,
    schema: &'static str,
}

pub async fn execute(args: SchemasArgs) -> Result<()> {
    let registry = SchemaRegistry::register();

    if let Some(name) = &args.name {
        let schema = registry
            .get_required(name)
            .map_err(|e| CommandError::InvalidArgument(e.to_string()))?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(schema)?);
        } else {
            print_schema(schema);
        }
        return Ok(());
    }

    if args.json {
        let view = CatalogView {
            exact_names: registry.exact_names(),
            patterns: registry
                .pattern_schemas()
                .map(|p| PatternView {
                    pattern: p.pattern,
                    schema: p.schema.name,
                })
                .collect(),
            schemas: registry.schemas().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("📚 Tab schemas ({})", registry.len());
    println!();
    println!("Matched by name:");
    for name in registry.exact_names() {
        println!("   {}", name);
    }
    println!();
    println!("Matched by pattern, in priority order:");
    for (index, candidate) in registry.pattern_schemas().enumerate() {
        println!("   {}. {:<12} {}", index + 1, candidate.schema.name, candidate.pattern);
    }
    println!();
    for schema in registry.schemas() {
        println!(
            "   {:<14} {:>2} fields  {}",
            schema.name,
            schema.fields.len(),
            schema.description
        );
    }

    Ok(())
}

fn allowance(value: TabAllowance) -> &'static str {
    match value {
        TabAllowance::NotAllowed => "-",
        TabAllowance::Allowed => "allowed",
        TabAllowance::Required => "required",
    }
}

fn print_schema(schema: &TabSchema) {
    let layout = match schema.layout {
        FieldLayout::Columns => "columns",
        FieldLayout::NameValueRows => "name/value rows",
    };
    println!("📄 {} ({})", schema.name, layout);
    if !schema.description.is_empty() {
        println!("   {}", schema.description);
    }
    println!(
        "   profile: {}, resource: {}, data type: {}",
        allowance(schema.applicability.profile),
        allowance(schema.applicability.resource),
        allowance(schema.applicability.data_type)
    );
    println!();
    for field in &schema.fields {
        println!("   {:<24} {:<12} {}", field.name, field.level, field.display_name);
    }
}
