//! Compute node model built from pbsnodes output
//!
//! A `Node` holds the attributes pbsnodes reports for one host. CPU and
//! memory load are derived from the `status` attribute and are `None` when
//! the MOM did not report (node down, unreachable) or reported garbage.

use std::collections::BTreeMap;

/// A single compute host as reported by pbsnodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub hostname: String,
    /// Raw state string, e.g. "free", "job-exclusive", "down,offline"
    pub state: String,
    /// Number of processors (slots)
    pub np: Option<u32>,
    /// Node properties; partitions are expressed as properties
    pub properties: Vec<String>,
    /// Unique job identifiers, in order of first appearance
    pub job_ids: Vec<String>,
    /// Key/value pairs from the `status` attribute (empty if not reported)
    pub status: BTreeMap<String, String>,
}

impl Node {
    pub fn new(hostname: impl Into<String>) -> Self {
        Node {
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p == name)
    }

    /// Whether the MOM reported a status line for this node
    pub fn has_status(&self) -> bool {
        !self.status.is_empty()
    }

    /// True for "down..." and "offline..." states
    pub fn is_down(&self) -> bool {
        self.state.starts_with("down") || self.state.starts_with("offline")
    }

    /// Load average divided by the number of processors
    pub fn cpuload(&self) -> Option<f64> {
        let loadave: f64 = self.status.get("loadave")?.parse().ok()?;
        let np = self.np.or_else(|| self.status.get("ncpus")?.parse().ok())?;
        if np == 0 {
            return None;
        }
        Some(loadave / np as f64)
    }

    /// Fraction of total memory in use, `1 - availmem / totmem`
    pub fn memload(&self) -> Option<f64> {
        let total = parse_memory_kb(self.status.get("totmem")?)?;
        let avail = parse_memory_kb(self.status.get("availmem")?)?;
        if total <= 0.0 {
            return None;
        }
        Some(1.0 - avail / total)
    }
}

/// Parse a pbs memory size ("132119836kb", "64gb", "1024") into kilobytes
pub fn parse_memory_kb(value: &str) -> Option<f64> {
    let value = value.trim().to_ascii_lowercase();
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(digits_end);
    let number: f64 = number.parse().ok()?;
    let factor = match unit {
        "" | "b" => 1.0 / 1024.0,
        "kb" => 1.0,
        "mb" => 1024.0,
        "gb" => 1024.0 * 1024.0,
        "tb" => 1024.0 * 1024.0 * 1024.0,
        _ => return None,
    };
    Some(number * factor)
}
