use log::warn;

pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Startup settings, read from `LAB_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct LabConfig {
    pub window_width: f32,
    pub window_height: f32,
    // experiment id to open first
    pub start_experiment: Option<String>,
    pub celebrate: bool,
}

impl Default for LabConfig {
    fn default() -> Self {
        LabConfig {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            start_experiment: None,
            celebrate: true,
        }
    }
}

impl LabConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // bad values are reported and replaced by the default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = LabConfig::default();
        if let Some(w) = lookup("LAB_WINDOW_WIDTH") {
            config.window_width = parse_extent("LAB_WINDOW_WIDTH", &w, DEFAULT_WINDOW_WIDTH);
        }
        if let Some(h) = lookup("LAB_WINDOW_HEIGHT") {
            config.window_height = parse_extent("LAB_WINDOW_HEIGHT", &h, DEFAULT_WINDOW_HEIGHT);
        }
        config.start_experiment = lookup("LAB_START_EXPERIMENT")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if let Some(c) = lookup("LAB_CELEBRATE") {
            config.celebrate = match c.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "off" | "no" => false,
                "1" | "true" | "on" | "yes" => true,
                other => {
                    warn!("LAB_CELEBRATE: '{}' is not a switch value, keeping it on", other);
                    true
                }
            };
        }
        config
    }
}

fn parse_extent(key: &str, raw: &str, default: f32) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            warn!("{}: '{}' is not a usable size, using {}", key, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> LabConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LabConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(config(&[]), LabConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let c = config(&[
            ("LAB_WINDOW_WIDTH", "1024"),
            ("LAB_WINDOW_HEIGHT", " 600.5 "),
            ("LAB_START_EXPERIMENT", "u3_ex8"),
            ("LAB_CELEBRATE", "Off"),
        ]);
        assert_eq!(c.window_width, 1024.0);
        assert_eq!(c.window_height, 600.5);
        assert_eq!(c.start_experiment.as_deref(), Some("u3_ex8"));
        assert!(!c.celebrate);
    }

    #[test]
    fn bad_values_fall_back() {
        let c = config(&[
            ("LAB_WINDOW_WIDTH", "wide"),
            ("LAB_WINDOW_HEIGHT", "-20"),
            ("LAB_START_EXPERIMENT", "  "),
            ("LAB_CELEBRATE", "maybe"),
        ]);
        assert_eq!(c, LabConfig::default());
    }
}
