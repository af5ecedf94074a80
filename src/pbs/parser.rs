//! Parser for `pbsnodes` text output
//!
//! pbsnodes prints one block per node, separated by blank lines:
//!
//! ```text
//! r1i0n1
//!      state = job-exclusive
//!      np = 20
//!      properties = thinking,ivybridge
//!      jobs = 0/123.master,1/123.master
//!      status = rectime=1431694567,loadave=15.00,totmem=140508484kb,...
//! ```

use super::error::{LoadMapError, Result};
use super::node::Node;
use std::path::Path;
use tracing::debug;

/// Turns pbsnodes output into `Node` records, preserving output order
#[derive(Debug, Default, Clone, Copy)]
pub struct PbsnodesParser;

impl PbsnodesParser {
    pub fn new() -> Self {
        PbsnodesParser
    }

    /// Parse pbsnodes output held in memory
    pub fn parse(&self, output: &str) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        let mut current: Option<Node> = None;

        for (idx, line) in output.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                nodes.extend(current.take());
                continue;
            }

            if !line.starts_with(char::is_whitespace) {
                nodes.extend(current.take());
                current = Some(Node::new(line.trim()));
                continue;
            }

            let node = current.as_mut().ok_or_else(|| LoadMapError::Parse {
                line: line_no,
                message: "attribute before any hostname".to_string(),
            })?;

            let (key, value) = line.split_once('=').ok_or_else(|| LoadMapError::Parse {
                line: line_no,
                message: format!("expected 'key = value', got '{}'", line.trim()),
            })?;
            apply_attribute(node, key.trim(), value.trim(), line_no)?;
        }
        nodes.extend(current);

        debug!("Parsed {} nodes from pbsnodes output", nodes.len());
        Ok(nodes)
    }

    /// Parse a file holding saved pbsnodes output
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Node>> {
        let output = std::fs::read_to_string(path)?;
        self.parse(&output)
    }
}

fn apply_attribute(node: &mut Node, key: &str, value: &str, line_no: usize) -> Result<()> {
    match key {
        "state" => node.state = value.to_string(),
        "np" => {
            let np = value.parse::<u32>().map_err(|e| LoadMapError::Parse {
                line: line_no,
                message: format!("invalid np '{}': {}", value, e),
            })?;
            node.np = Some(np);
        }
        "properties" => {
            node.properties = split_list(value).map(str::to_string).collect();
        }
        "jobs" => node.job_ids = parse_job_ids(value),
        "status" => {
            node.status = split_list(value)
                .filter_map(|entry| entry.split_once('='))
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .collect();
        }
        _ => {}
    }
    Ok(())
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// "0/123.master, 1/123.master, 2/124.master" -> ["123.master", "124.master"]
fn parse_job_ids(value: &str) -> Vec<String> {
    let mut job_ids: Vec<String> = Vec::new();
    for slot in split_list(value) {
        let job_id = slot.split_once('/').map_or(slot, |(_, id)| id).trim();
        if !job_id.is_empty() && !job_ids.iter().any(|j| j == job_id) {
            job_ids.push(job_id.to_string());
        }
    }
    job_ids
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
r1i0n1
     state = job-exclusive
     np = 20
     properties = thinking,ivybridge
     ntype = cluster
     jobs = 0/123.master,1/123.master,2/124.master
     status = rectime=1431694567,varattr=,jobs=123.master 124.master,state=free,loadave=15.00,ncpus=20,physmem=132119836kb,availmem=70000000kb,totmem=140000000kb
     gpus = 0

r1i0n2
     state = free
     np = 20
     properties = thinking
     ntype = cluster
     status = rectime=1431694567,loadave=0.00,totmem=140000000kb,availmem=140000000kb

r1i0n3
     state = down,offline
     np = 20
     properties = thinking
     ntype = cluster
";

    #[test]
    fn test_parse_sample() {
        let nodes = PbsnodesParser::new().parse(SAMPLE).unwrap();
        assert_eq!(nodes.len(), 3);

        let n1 = &nodes[0];
        assert_eq!(n1.hostname, "r1i0n1");
        assert_eq!(n1.state, "job-exclusive");
        assert_eq!(n1.np, Some(20));
        assert_eq!(n1.properties, vec!["thinking", "ivybridge"]);
        assert_eq!(n1.job_ids, vec!["123.master", "124.master"]);
        assert_eq!(n1.status.get("loadave").map(String::as_str), Some("15.00"));
        assert_eq!(n1.status.get("varattr").map(String::as_str), Some(""));
        assert_eq!(n1.cpuload(), Some(0.75));
        assert!((n1.memload().unwrap() - 0.5).abs() < 1e-9);

        let n2 = &nodes[1];
        assert!(n2.job_ids.is_empty());
        assert_eq!(n2.cpuload(), Some(0.0));

        let n3 = &nodes[2];
        assert!(n3.is_down());
        assert!(!n3.has_status());
        assert_eq!(n3.cpuload(), None);
    }

    #[test]
    fn test_parse_without_trailing_blank_line() {
        let nodes = PbsnodesParser::new()
            .parse("n1\n     state = free\nn2\n     state = down")
            .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].state, "down");
    }

    #[test]
    fn test_parse_attribute_before_hostname() {
        let err = PbsnodesParser::new().parse("   state = free\n").unwrap_err();
        assert!(matches!(err, LoadMapError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_malformed_attribute() {
        let err = PbsnodesParser::new()
            .parse("n1\n     state free\n")
            .unwrap_err();
        assert!(matches!(err, LoadMapError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_invalid_np() {
        let err = PbsnodesParser::new().parse("n1\n     np = many\n").unwrap_err();
        assert!(matches!(err, LoadMapError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_job_ids_range_slots() {
        assert_eq!(
            parse_job_ids("0-19/200.master, 20/201.master"),
            vec!["200.master", "201.master"]
        );
        assert!(parse_job_ids("").is_empty());
    }
}
