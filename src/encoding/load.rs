use super::status::JobStatus;
use crate::pbs::Node;

/// Per-host record used for plotting
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLoad {
    pub hostname: String,
    pub cpu: Option<f64>,
    pub mem: Option<f64>,
    pub status: JobStatus,
    pub jobs: Vec<String>,
    /// 1-based `(x, y)` grid coordinate
    pub coordinate: (u32, u32),
}

impl NodeLoad {
    pub fn from_node(node: &Node, coordinate: (u32, u32)) -> Self {
        let status = JobStatus::of(node);
        NodeLoad {
            hostname: node.hostname.clone(),
            cpu: node.cpuload(),
            mem: node.memload(),
            status,
            jobs: node.job_ids.clone(),
            coordinate,
        }
    }

    /// A mapped host that pbsnodes no longer reports
    pub fn missing(hostname: impl Into<String>, coordinate: (u32, u32)) -> Self {
        NodeLoad {
            hostname: hostname.into(),
            cpu: None,
            mem: None,
            status: JobStatus::Down,
            jobs: Vec::new(),
            coordinate,
        }
    }
}

/// Hover text in plotly's HTML subset
///
/// `<b>host</b>` followed by ` DOWN`, or by CPU and MEM lines and, for busy
/// nodes, the job list.
pub fn hover_text(load: &NodeLoad) -> String {
    let mut text = format!("<b>{}</b>", load.hostname);
    if load.status.is_down() {
        text.push_str(" DOWN");
        return text;
    }

    text.push_str(&format!("<br>CPU: {}", format_load(load.cpu)));
    text.push_str(&format!("<br>MEM: {}", format_load(load.mem)));
    if load.status != JobStatus::Free {
        text.push_str(&format!("<br>JOB: {}", load.jobs.join(",")));
    }
    text
}

fn format_load(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}
