//! Plot property definitions with defaults from plot_defaults.json
//!
//! plot_defaults.json is embedded at compile time, so every default is
//! defined in one place. User values come from an optional JSON file
//! (`--conf`) holding a flat `{"name": value}` map.

use crate::pbs::error::{LoadMapError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// plot_defaults.json embedded at compile time
const PLOT_DEFAULTS_JSON: &str = include_str!("../plot_defaults.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
    #[serde(rename = "IntegerProperty")]
    Integer,
    #[serde(rename = "DoubleProperty")]
    Double,
    #[serde(rename = "BooleanProperty")]
    Boolean,
}

/// Property definition from plot_defaults.json
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(rename = "defaultValue", default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For EnumeratedProperty, the valid values
    #[serde(rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct DefaultsFile {
    properties: Vec<PropertyDef>,
}

/// Registry of all plot properties with their defaults
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse a defaults document
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DefaultsFile = serde_json::from_str(json)?;
        let properties = file
            .properties
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();
        Ok(Self { properties })
    }

    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

static REGISTRY: std::sync::OnceLock<PropertyRegistry> = std::sync::OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        // Embedded at compile time and covered by tests
        PropertyRegistry::from_json(PLOT_DEFAULTS_JSON).expect("plot_defaults.json is invalid")
    })
}

/// Typed property reader: user value if set and valid, registry default otherwise
#[derive(Debug, Default, Clone)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    pub fn new(user_values: HashMap<String, String>) -> Self {
        let user_values = user_values
            .into_iter()
            .filter(|(_, v)| !v.is_empty()) // Empty = not set
            .collect();
        Self { user_values }
    }

    /// Read user values from a JSON object file
    ///
    /// Strings, numbers and booleans are accepted; other values are skipped.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoadMapError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)?;

        let mut user_values = HashMap::new();
        for (key, value) in map {
            let value_str = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => {
                    warn!("Ignoring non-scalar value for property '{}'", key);
                    continue;
                }
            };
            if registry().get_property(&key).is_none() {
                warn!("Unknown plot property '{}'", key);
            }
            user_values.insert(key, value_str);
        }

        debug!("Loaded {} plot properties from {}", user_values.len(), path.display());
        Ok(Self::new(user_values))
    }

    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Enumerated property; invalid user values fall back to the default
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.to_lowercase();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value, name, valid_values, default
            );
        }

        default.to_string()
    }

    pub fn get_i32_in_range(&self, name: &str, min: i32, max: i32) -> i32 {
        let default = self.default_as::<i32>(name).unwrap_or(min);
        match self.parsed::<i32>(name) {
            Some(v) if (min..=max).contains(&v) => v,
            Some(v) => {
                warn!(
                    "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
                    v, name, min, max, default
                );
                default
            }
            None => default,
        }
    }

    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let default = self.default_as::<f64>(name).unwrap_or(min);
        match self.parsed::<f64>(name) {
            Some(v) if v >= min && v <= max => v,
            Some(v) => {
                warn!(
                    "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
                    v, name, min, max, default
                );
                default
            }
            None => default,
        }
    }

    pub fn get_bool(&self, name: &str) -> bool {
        let default = self.default_as::<bool>(name).unwrap_or(false);
        self.parsed::<bool>(name).unwrap_or(default)
    }

    fn default_as<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        registry().get_default(name)?.parse().ok()
    }

    /// User value parsed as `T`; None (with a warning) when unparsable
    fn parsed<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        let raw = self.user_values.get(name)?;
        match raw.trim().parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Invalid value '{}' for property '{}', using default", raw, name);
                None
            }
        }
    }
}
