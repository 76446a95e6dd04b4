//! Runtime configuration loading.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};

use siegeline_sim::engine::SimConfig;

/// Upper bound accepted for `final_wave`.
pub const MAX_FINAL_WAVE: u32 = 1_000;

/// Load a `SimConfig` from a JSON file, or the defaults when no path is given.
/// Missing fields fall back to their defaults.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &SimConfig) -> Result<()> {
    ensure!(
        (1..=MAX_FINAL_WAVE).contains(&config.final_wave),
        "final_wave must be between 1 and {MAX_FINAL_WAVE}"
    );
    ensure!(config.starting_lives >= 1, "starting_lives must be at least 1");
    ensure!(
        config.bounds.width > 0.0 && config.bounds.height > 0.0,
        "bounds must have a positive area"
    );
    ensure!(
        config.max_frame_delta_ms.is_finite() && config.max_frame_delta_ms > 0.0,
        "max_frame_delta_ms must be positive"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use siegeline_core::enums::Difficulty;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "siegeline-config-{}-{}.json",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), SimConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let path = temp_file(
            "partial",
            r#"{ "seed": 7, "difficulty": "Hard", "starting_money": 500 }"#,
        );
        let config = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.seed, 7);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.starting_money, 500);
        assert_eq!(config.final_wave, SimConfig::default().final_wave);
        assert_eq!(config.path, SimConfig::default().path);
    }

    #[test]
    fn test_custom_path_must_be_valid() {
        let path = temp_file(
            "short-path",
            r#"{ "path": [ { "x": 0.0, "y": 0.0, "z": 0.0 } ] }"#,
        );
        let result = load_config(Some(&path));
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_final_wave() {
        let path = temp_file("zero-wave", r#"{ "final_wave": 0 }"#);
        let result = load_config(Some(&path));
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unbounded_final_wave() {
        let path = temp_file("huge-wave", r#"{ "final_wave": 4294967295 }"#);
        let result = load_config(Some(&path));
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("siegeline-definitely-missing.json");
        assert!(load_config(Some(&missing)).is_err());
    }
}
