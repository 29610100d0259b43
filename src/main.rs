//! GEL Blender CLI
//!
//! Entry point for the `blender` command-line tool.

use std::env;
use std::path::Path;
use std::process;

use gel_blender::manifest::MANIFEST_FILE;
use gel_blender::render::DEFAULT_RENDERER;
use gel_blender::{
    blend, check_input, load_manifest_config, tokenize, ExitCode, OptionSchema, ProcessRenderer,
    RendererCommand, RunContext, Settings,
};
use tracing::{debug, Level};

/// Dependency tree scanned for packages, relative to the working directory
const SCAN_ROOT: &str = "node_modules";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let schema = OptionSchema::blender();
    init_logging(wants_debug(&schema, &args));

    let parsed = tokenize(&schema, &args);

    if parsed.is_set("help") {
        print!("{}", schema.usage());
        return;
    }
    if parsed.is_set("version") {
        println!("blender {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let manifest = load_manifest_config(Path::new(MANIFEST_FILE));
    let settings = Settings::resolve(&parsed, manifest, &schema);

    if let Ok(resolved) = settings.to_json() {
        debug!(settings = %resolved, "resolved settings");
    }

    let check = check_input(&settings, &schema);
    if !check.pass {
        for error in &check.errors {
            eprintln!("Error: {}", error);
        }
        process::exit(ExitCode::Failed.as_i32());
    }

    let context = match RunContext::new(settings, Path::new(SCAN_ROOT)) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(ExitCode::Fatal.as_i32());
        }
    };

    let command = context
        .settings()
        .get_str("renderer")
        .unwrap_or(DEFAULT_RENDERER);
    let renderer = match RendererCommand::parse(command) {
        Ok(command) => ProcessRenderer::new(command),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(ExitCode::Fatal.as_i32());
        }
    };

    match blend(&context, &renderer) {
        Ok(summary) => {
            for error in &summary.errors {
                eprintln!("Error: {}", error);
            }
            println!("{}", summary.human_summary);
            process::exit(summary.code);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(ExitCode::Fatal.as_i32());
        }
    }
}

/// Whether `debug` is on, resolved before any subscriber exists so nothing is logged twice
fn wants_debug(schema: &OptionSchema, args: &[String]) -> bool {
    let parsed = tokenize(schema, args);
    let manifest = load_manifest_config(Path::new(MANIFEST_FILE));
    Settings::resolve(&parsed, manifest, schema).debug()
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
