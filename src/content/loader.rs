//! Loader for the locomotion RON file at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::LocomotionConfig;

/// Schema this build understands.
pub const SCHEMA_VERSION: u32 = 1;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse locomotion config text. `file_name` is only used in errors.
pub fn parse_locomotion_config(
    contents: &str,
    file_name: &str,
) -> Result<LocomotionConfig, ContentLoadError> {
    let config: LocomotionConfig =
        ron_options()
            .from_str(contents)
            .map_err(|e| ContentLoadError {
                file: file_name.to_string(),
                message: format!("Parse error: {}", e),
            })?;

    if config.schema_version != SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file_name.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected {})",
                config.schema_version, SCHEMA_VERSION
            ),
        });
    }

    Ok(config)
}

/// Read and parse the locomotion config at `path`.
pub fn load_locomotion_config(path: &Path) -> Result<LocomotionConfig, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_locomotion_config(&contents, &file_name)
}
