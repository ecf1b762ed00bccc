use crate::config::schema::ClusterConfig;
use crate::error::LineaError;

/// Available predefined tolerances, from strictest to loosest.
pub const PRESETS: &[&str] = &["exact", "tight", "standard", "loose"];

/// Short description of a preset, for listings.
pub fn describe_preset(name: &str) -> Option<&'static str> {
    match name {
        "exact" => Some("only words with identical vertical positions share a row"),
        "tight" => Some("born-digital PDFs with clean baselines"),
        "standard" => Some("general purpose, absorbs sub/superscript jitter"),
        "loose" => Some("noisy OCR output or slightly skewed scans"),
        _ => None,
    }
}

/// Load a predefined cluster config by name.
pub fn load_preset(name: &str) -> Result<ClusterConfig, LineaError> {
    let tolerance = match name {
        "exact" => 0.0,
        "tight" => 1.0,
        "standard" => 3.0,
        "loose" => 5.0,
        _ => {
            return Err(LineaError::ConfigInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    Ok(ClusterConfig::new(tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_loads() {
        for name in PRESETS {
            let cfg = load_preset(name).unwrap();
            assert!(cfg.tolerance >= 0.0);
            assert!(describe_preset(name).is_some());
        }
    }

    #[test]
    fn test_presets_ordered_by_tolerance() {
        let tolerances: Vec<f64> = PRESETS
            .iter()
            .map(|n| load_preset(n).unwrap().tolerance)
            .collect();
        assert!(tolerances.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_unknown_preset() {
        let err = load_preset("xyz").unwrap_err();
        assert!(err.to_string().contains("exact, tight, standard, loose"));
    }
}
