use std::str::FromStr;

use anyhow::{Context, Result};

use crate::calculator::types::{CalculatorSettings, GateHardwareConfig};
use crate::catalogue::{DEFAULT_MAX_GAP, DEFAULT_POST_WIDTH};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub post_width_mm: f64,
    pub max_gap_width_mm: f64,
    pub include_posts: bool,
    pub default_post_handle: Option<String>,
    pub gate_panel_handle: Option<String>,
    pub gate_hinge_handle: Option<String>,
    pub gate_latch_handle: Option<String>,
    pub gate_hinge_panel_handle: Option<String>,
    pub gate_requires_hinge_panel: bool,
    /// Browser origins allowed by CORS. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: parse_or("PORT", lookup("PORT"), 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            post_width_mm: parse_or("POST_WIDTH_MM", lookup("POST_WIDTH_MM"), DEFAULT_POST_WIDTH)?,
            max_gap_width_mm: parse_or(
                "MAX_GAP_WIDTH_MM",
                lookup("MAX_GAP_WIDTH_MM"),
                DEFAULT_MAX_GAP,
            )?,
            include_posts: parse_bool_or("INCLUDE_POSTS", lookup("INCLUDE_POSTS"), false)?,
            default_post_handle: non_empty(lookup("DEFAULT_POST_HANDLE")),
            gate_panel_handle: non_empty(lookup("GATE_PANEL_HANDLE")),
            gate_hinge_handle: non_empty(lookup("GATE_HINGE_HANDLE")),
            gate_latch_handle: non_empty(lookup("GATE_LATCH_HANDLE")),
            gate_hinge_panel_handle: non_empty(lookup("GATE_HINGE_PANEL_HANDLE")),
            gate_requires_hinge_panel: parse_bool_or(
                "GATE_REQUIRES_HINGE_PANEL",
                lookup("GATE_REQUIRES_HINGE_PANEL"),
                false,
            )?,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        })
    }

    /// Calculator settings used when a request carries none.
    ///
    /// Gate hardware is only configured when at least one gate variable is set.
    pub fn default_settings(&self) -> CalculatorSettings {
        let hardware = GateHardwareConfig {
            gate_panel_handle: self.gate_panel_handle.clone(),
            hinge_handle: self.gate_hinge_handle.clone(),
            latch_handle: self.gate_latch_handle.clone(),
            requires_hinge_panel: self.gate_requires_hinge_panel,
            hinge_panel_handle: self.gate_hinge_panel_handle.clone(),
        };

        CalculatorSettings {
            post_width: self.post_width_mm,
            max_gap_width: self.max_gap_width_mm,
            include_posts: self.include_posts,
            default_post_handle: self.default_post_handle.clone(),
            gate_hardware_defaults: (hardware != GateHardwareConfig::default()).then_some(hardware),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{v}'")),
        None => Ok(default),
    }
}

fn parse_bool_or(key: &str, raw: Option<String>, default: bool) -> Result<bool> {
    let Some(v) = raw else {
        return Ok(default);
    };
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{key} must be a boolean (true/false), got '{v}'"),
    }
}

/// Comma-separated list, blanks dropped.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.rust_log, "info");
        assert_eq!(cfg.post_width_mm, 60.0);
        assert_eq!(cfg.max_gap_width_mm, 100.0);
        assert!(!cfg.include_posts);
        assert!(cfg.cors_allowed_origins.is_empty());
        assert_eq!(cfg.default_settings(), CalculatorSettings::default());
    }

    #[test]
    fn test_overrides_parsed() {
        let cfg = config(&[
            ("PORT", "3000"),
            ("POST_WIDTH_MM", "50"),
            ("MAX_GAP_WIDTH_MM", " 90.5 "),
            ("INCLUDE_POSTS", "TRUE"),
            ("DEFAULT_POST_HANDLE", "spigot-pro-core-drill-round-clear-coat"),
        ])
        .unwrap();
        let settings = cfg.default_settings();
        assert_eq!(cfg.port, 3000);
        assert_eq!(settings.post_width, 50.0);
        assert_eq!(settings.max_gap_width, 90.5);
        assert!(settings.include_posts);
        assert_eq!(
            settings.default_post_handle.as_deref(),
            Some("spigot-pro-core-drill-round-clear-coat")
        );
        assert!(settings.gate_hardware_defaults.is_none());
    }

    #[test]
    fn test_gate_hardware_from_env() {
        let cfg = config(&[
            ("GATE_HINGE_HANDLE", "spring-hinge-glass-to-glass-black-pair"),
            ("GATE_LATCH_HANDLE", "kit-g2g-std-latch-kit-black"),
            ("GATE_REQUIRES_HINGE_PANEL", "yes"),
            ("GATE_HINGE_PANEL_HANDLE", "gh-12mm-1200mm"),
            ("GATE_PANEL_HANDLE", ""),
        ])
        .unwrap();
        let hw = cfg.default_settings().gate_hardware_defaults.unwrap();
        assert_eq!(hw.gate_panel_handle, None);
        assert_eq!(hw.latch_handle.as_deref(), Some("kit-g2g-std-latch-kit-black"));
        assert!(hw.requires_hinge_panel);
    }

    #[test]
    fn test_cors_origins_list() {
        let cfg = config(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://shop.example.com, ,https://admin.example.com",
        )])
        .unwrap();
        assert_eq!(
            cfg.cors_allowed_origins,
            vec!["https://shop.example.com", "https://admin.example.com"]
        );
    }

    #[test]
    fn test_malformed_values_fail() {
        let err = config(&[("POST_WIDTH_MM", "sixty")]).unwrap_err();
        assert!(err.to_string().contains("POST_WIDTH_MM"));
        assert!(config(&[("PORT", "99999")]).is_err());
        assert!(config(&[("INCLUDE_POSTS", "maybe")]).is_err());
    }
}
