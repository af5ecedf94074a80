//! Node map: hostname -> grid coordinate, plus axis labels
//!
//! Persisted as JSON:
//! `{"x_labels": [...], "y_labels": [...], "nodes": {"r1i0n1": [1, 1], ...}}`

use super::grid::compute_coordinates;
use crate::pbs::error::{LoadMapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Mapping from hostname to 1-based `[x, y]` grid coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMap {
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub nodes: BTreeMap<String, [u32; 2]>,
}

impl NodeMap {
    /// Lay `names` out on the grid, filling enclosure by enclosure
    ///
    /// Names beyond the grid capacity get no cell and are dropped.
    pub fn from_grid<I, S>(x_labels: Vec<String>, y_labels: Vec<String>, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let coords = compute_coordinates(x_labels.len(), y_labels.len())?;
        let mut nodes = BTreeMap::new();
        let mut dropped = 0usize;

        let mut cells = coords.into_iter();
        for name in names {
            match cells.next() {
                Some((x, y)) => {
                    nodes.insert(name.into(), [x, y]);
                }
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(
                "{} node(s) do not fit on the {}x{} grid and are not mapped",
                dropped,
                x_labels.len(),
                y_labels.len()
            );
        }

        Ok(NodeMap {
            x_labels,
            y_labels,
            nodes,
        })
    }

    /// Read and validate a node map file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let map: NodeMap = serde_json::from_reader(reader)?;
        map.validate()?;
        debug!(
            "Loaded node map {} ({} nodes, {}x{} grid)",
            path.display(),
            map.nodes.len(),
            map.x_labels.len(),
            map.y_labels.len()
        );
        Ok(map)
    }

    /// Write the node map as 4-space indented JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Check label lists are non-empty and every coordinate is on the grid
    pub fn validate(&self) -> Result<()> {
        if self.x_labels.is_empty() {
            return Err(LoadMapError::InvalidNodeMap("x_labels is empty".into()));
        }
        if self.y_labels.is_empty() {
            return Err(LoadMapError::InvalidNodeMap("y_labels is empty".into()));
        }

        let nx = u32::try_from(self.x_labels.len()).unwrap_or(u32::MAX);
        let ny = u32::try_from(self.y_labels.len()).unwrap_or(u32::MAX);
        for (name, [x, y]) in &self.nodes {
            if !(1..=nx).contains(x) || !(1..=ny).contains(y) {
                return Err(LoadMapError::InvalidNodeMap(format!(
                    "node '{}' at [{}, {}] is outside the {}x{} grid",
                    name, x, y, nx, ny
                )));
            }
        }
        Ok(())
    }

    /// Grid coordinate of a hostname
    pub fn coordinate(&self, hostname: &str) -> Result<(u32, u32)> {
        self.nodes
            .get(hostname)
            .map(|[x, y]| (*x, *y))
            .ok_or_else(|| LoadMapError::MissingCoordinate(hostname.to_string()))
    }

    /// Mapped hostnames, sorted
    pub fn hostnames(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_grid_fills_row_by_row() {
        let map = NodeMap::from_grid(
            labels(&["n01", "n02"]),
            labels(&["r1i0", "r1i1"]),
            ["a", "b", "c"],
        ).unwrap();
        assert_eq!(map.coordinate("a").unwrap(), (1, 1));
        assert_eq!(map.coordinate("b").unwrap(), (2, 1));
        assert_eq!(map.coordinate("c").unwrap(), (1, 2));
        assert_eq!(map.nodes.len(), 3);
    }

    #[test]
    fn test_from_grid_drops_overflow() {
        let map = NodeMap::from_grid(labels(&["n01"]), labels(&["r1i0"]), ["a", "b"]).unwrap();
        assert_eq!(map.nodes.len(), 1);
        assert!(matches!(
            map.coordinate("b"),
            Err(LoadMapError::MissingCoordinate(name)) if name == "b"
        ));
    }

    #[test]
    fn test_validate_empty_labels() {
        let map = NodeMap::from_grid(Vec::new(), labels(&["r1i0"]), Vec::<String>::new())
            .unwrap();
        assert!(matches!(map.validate(), Err(LoadMapError::InvalidNodeMap(_))));

        let map = NodeMap::from_grid(labels(&["n01"]), Vec::new(), Vec::<String>::new())
            .unwrap();
        assert!(matches!(map.validate(), Err(LoadMapError::InvalidNodeMap(_))));
    }

    #[test]
    fn test_validate_out_of_range() {
        let mut map = NodeMap::from_grid(labels(&["n01"]), labels(&["r1i0"]), ["a"]).unwrap();
        assert!(map.validate().is_ok());
        map.nodes.insert("b".to_string(), [2, 1]);
        assert!(map.validate().is_err());
    }

    #[test]
    fn test_deserialize_format() {
        let json = r#"{"x_labels": ["n01", "n02"], "y_labels": ["r1i0"],
                       "nodes": {"r1i0n2": [2, 1], "r1i0n1": [1, 1]}}"#;
        let map: NodeMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.hostnames().collect::<Vec<_>>(), vec!["r1i0n1", "r1i0n2"]);
        assert_eq!(map.coordinate("r1i0n2").unwrap(), (2, 1));
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodemap.json");
        let map = NodeMap::from_grid(labels(&["n01", "n02"]), labels(&["r1i0"]), ["x", "y"])
            .unwrap();
        map.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"x_labels\""));

        assert_eq!(NodeMap::load(&path).unwrap(), map);
    }
}
