use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIRECTORY: &str = "build/codegen/generated";

/// Switches that shape the generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Back data holder properties with observable state cells
    pub generate_composable_data: bool,
    /// Emit validation constraint markers on the contract interface
    pub generate_constrained_data: bool,
    /// Reserved; no generator reads it yet
    pub generate_json_aware_data: bool,
    /// Only emit the contract interface and data holder
    pub generate_only_data: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            generate_composable_data: false,
            generate_constrained_data: true,
            generate_json_aware_data: false,
            generate_only_data: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub options: GenerationOptions,
    pub output_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options: GenerationOptions::default(),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or unparsable
    /// values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = GenerationOptions::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|value| parse_bool(&value))
                .unwrap_or(default)
        };

        Self {
            options: GenerationOptions {
                generate_composable_data: flag(
                    "CODEGEN_COMPOSABLE_DATA",
                    defaults.generate_composable_data,
                ),
                generate_constrained_data: flag(
                    "CODEGEN_CONSTRAINED_DATA",
                    defaults.generate_constrained_data,
                ),
                generate_json_aware_data: flag(
                    "CODEGEN_JSON_AWARE_DATA",
                    defaults.generate_json_aware_data,
                ),
                generate_only_data: flag("CODEGEN_ONLY_DATA", defaults.generate_only_data),
            },
            output_directory: lookup("CODEGEN_OUTPUT_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
