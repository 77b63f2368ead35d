//! drawddl CLI library
//!
//! This module contains the core CLI logic for the drawddl tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use drawddl::{DdlBuilder, DrawDdlError};

/// Run the drawddl CLI application
///
/// Translates the input diagram and writes the SQL to the output file, or
/// to stdout when no output path is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DrawDdlError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Syntax and structural errors in the diagram
pub fn run(args: &Args) -> Result<(), DrawDdlError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let builder = DdlBuilder::new(app_config);
    let sql = builder.translate_file(&args.input)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{sql}\n"))?;
            info!(output_file = path.as_str(); "SQL exported successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{sql}")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
