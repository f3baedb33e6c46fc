pub mod check;
pub mod clean;
pub mod generate;
pub mod list;
pub mod party;
pub mod roll;
mod sheet;

use std::path::Path;

use eg_core::TemplateLibrary;
use eg_mechanics::GenerateConfig;
use tracing::debug;

/// Load a library file, reporting failures as plain messages.
fn load_library(path: &Path) -> Result<TemplateLibrary, String> {
    let library = TemplateLibrary::from_file(path).map_err(|e| e.to_string())?;
    debug!(
        path = %path.display(),
        templates = library.template_count(),
        parties = library.parties().len(),
        "loaded library"
    );
    Ok(library)
}

/// Generator configuration for the given seed.
fn config(seed: Option<u64>) -> GenerateConfig {
    match seed {
        Some(seed) => GenerateConfig::default().with_seed(seed),
        None => GenerateConfig::default(),
    }
}

/// Serialize any generated value as pretty JSON to stdout.
fn print_json(value: &impl serde::Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
