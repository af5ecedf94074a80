use crate::pbs::Node;

/// Job occupancy of a node, as shown by the marker symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Free,
    SingleJob,
    MultiJob,
    Down,
}

impl JobStatus {
    /// Classify a node
    ///
    /// A node without a status report, or in a down/offline state, is
    /// `Down` even when it still lists jobs.
    pub fn of(node: &Node) -> Self {
        if !node.has_status() || node.is_down() {
            JobStatus::Down
        } else {
            match node.job_ids.len() {
                0 => JobStatus::Free,
                1 => JobStatus::SingleJob,
                _ => JobStatus::MultiJob,
            }
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, JobStatus::Down)
    }
}
