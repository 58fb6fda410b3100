//! Schema command - JSON Schema for ordo.config.json

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Default)]
pub struct SchemaArgs {
    /// Write the schema to node_modules/.ordo/ordo.config.schema.json
    /// instead of printing it
    #[arg(short, long)]
    pub write: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub fn run(args: SchemaArgs) {
    let schema = match serde_json::to_string_pretty(&ordo_vitrine::options_json_schema()) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Failed to render schema: {}", e);
            std::process::exit(1);
        }
    };

    if !args.write {
        println!("{}", schema);
        return;
    }

    let base = args
        .dir
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let schema_dir = base.join("node_modules/.ordo");
    let schema_path = schema_dir.join("ordo.config.schema.json");

    let written = std::fs::create_dir_all(&schema_dir)
        .and_then(|()| std::fs::write(&schema_path, schema));
    match written {
        Ok(()) => eprintln!("Wrote {}", schema_path.display()),
        Err(e) => {
            eprintln!("Failed to write {}: {}", schema_path.display(), e);
            std::process::exit(1);
        }
    }
}
