pub mod analyze;
pub mod presets;
pub mod rows;
pub mod sweep;

use linea_core::config::builtin;
use linea_core::config::schema::{ClusterConfig, ReferenceMode};
use linea_core::error::LineaError;
use linea_core::extraction::pdftotext::PdftotextExtractor;
use linea_core::extraction::word_set::load_word_set;
use linea_core::extraction::WordExtractor;
use linea_core::model::WordSet;
use std::path::Path;
use tracing::debug;

use crate::ClusterArgs;

const DEFAULT_PRESET: &str = "standard";

/// Load words from a word-set JSON file, or extract them from a PDF.
pub fn load_words(input_file: &Path) -> Result<WordSet, LineaError> {
    let is_json = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        debug!(path = %input_file.display(), "loading word set");
        load_word_set(input_file)
    } else {
        let pdf_bytes = std::fs::read(input_file)?;
        let extractor = PdftotextExtractor::new();
        debug!(path = %input_file.display(), backend = extractor.backend_name(), "extracting words");
        extractor.extract_words(&pdf_bytes)
    }
}

pub fn parse_reference(reference: Option<&str>) -> Result<Option<ReferenceMode>, LineaError> {
    reference
        .map(|r| {
            ReferenceMode::from_str_loose(r).ok_or_else(|| {
                LineaError::InvalidArgument(format!(
                    "unknown row reference '{}' (expected first-word or running-mean)",
                    r
                ))
            })
        })
        .transpose()
}

/// Build the cluster config from --tolerance, --preset or --config.
///
/// The tolerance itself is validated by the engine, so a negative value
/// surfaces as the engine's own error.
pub fn resolve_config(args: &ClusterArgs) -> Result<ClusterConfig, LineaError> {
    let mut config = match (&args.tolerance, &args.preset, &args.config) {
        (Some(t), _, _) => ClusterConfig::new(*t),
        (None, Some(preset), _) => builtin::load_preset(preset)?,
        (None, None, Some(path)) => linea_core::config::load_config(path)?,
        (None, None, None) => builtin::load_preset(DEFAULT_PRESET)?,
    };

    if let Some(mode) = parse_reference(args.reference.as_deref())? {
        config.reference_mode = mode;
    }
    Ok(config)
}
