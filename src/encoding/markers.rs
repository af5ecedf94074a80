use super::status::JobStatus;
use serde::Serialize;

/// Marker size (diameter in px) of down nodes
pub const DOWN_SIZE: f64 = 10.0;

/// Marker size of an idle node; grows by `MEM_SIZE_SCALE` at full memory use
pub const BASE_SIZE: f64 = 15.0;
pub const MEM_SIZE_SCALE: f64 = 20.0;

/// Marker symbols, named as plotly names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSymbol {
    Circle,
    Cross,
    Square,
    Diamond,
}

impl MarkerSymbol {
    /// Plotly symbol name, also used as the SVG marker class
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerSymbol::Circle => "circle",
            MarkerSymbol::Cross => "cross",
            MarkerSymbol::Square => "square",
            MarkerSymbol::Diamond => "diamond",
        }
    }
}

/// Marker size for a memory load value
pub fn mem_size(mem: Option<f64>, status: JobStatus) -> f64 {
    match mem {
        Some(mem) if !status.is_down() && !mem.is_nan() => BASE_SIZE + MEM_SIZE_SCALE * mem,
        _ => DOWN_SIZE,
    }
}

pub fn status_symbol(status: JobStatus) -> MarkerSymbol {
    match status {
        JobStatus::Free => MarkerSymbol::Circle,
        JobStatus::Down => MarkerSymbol::Cross,
        JobStatus::SingleJob => MarkerSymbol::Square,
        JobStatus::MultiJob => MarkerSymbol::Diamond,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_size() {
        assert_eq!(mem_size(Some(0.0), JobStatus::Free), 15.0);
        assert_eq!(mem_size(Some(0.5), JobStatus::SingleJob), 25.0);
        assert_eq!(mem_size(Some(1.0), JobStatus::MultiJob), 35.0);
    }

    #[test]
    fn test_mem_size_down() {
        assert_eq!(mem_size(None, JobStatus::Free), DOWN_SIZE);
        assert_eq!(mem_size(Some(0.9), JobStatus::Down), DOWN_SIZE);
    }

    #[test]
    fn test_status_symbol() {
        assert_eq!(status_symbol(JobStatus::Free), MarkerSymbol::Circle);
        assert_eq!(status_symbol(JobStatus::Down), MarkerSymbol::Cross);
        assert_eq!(status_symbol(JobStatus::SingleJob), MarkerSymbol::Square);
        assert_eq!(status_symbol(JobStatus::MultiJob), MarkerSymbol::Diamond);
        assert_eq!(
            serde_json::to_string(&MarkerSymbol::Diamond).unwrap(),
            "\"diamond\""
        );
    }
}
