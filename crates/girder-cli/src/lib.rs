//! CLI logic for the girder project checker.
//!
//! This module contains the core CLI logic for the girder project checker.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use girder::{GirderError, ProjectChecker};

/// Run the girder CLI application
///
/// This function reads the input project file, validates it against the
/// schema catalog, and reports every defect found.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `GirderError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Markup, expression, and structural defects in the project file
pub fn run(args: &Args) -> Result<(), GirderError> {
    info!(input_path = args.input; "Checking project file");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Validate using the ProjectChecker API
    let checker = ProjectChecker::new(app_config);
    checker.check(&source)?;

    info!(input_path = args.input; "No problems found");

    Ok(())
}
