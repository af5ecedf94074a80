//! Physical grid layout: slots along x, enclosures along y

use crate::pbs::error::{LoadMapError, Result};

/// Default enclosure list (rack/IRU names), bottom to top
pub const DEFAULT_ENCLOSURES: &str = "r1i0,r1i1,r1i2,r2i0,r2i1,r2i2,r3i0,r3i1,\
                                      r3i2,r4i0,r4i1,r5i0,r5i1,r4i2,r5i2,r8i0";

/// Default number of nodes per enclosure
pub const DEFAULT_NR_NODES: usize = 16;

/// Default number of the first node slot
pub const DEFAULT_NODE_OFFSET: usize = 1;

/// Axis labels for a grid: `n01..nNN` along x, enclosures along y
///
/// x labels are `n{i:02}` for `i` in `node_offset..node_offset + nr_nodes`.
/// Fails with `Config` when the slot range overflows or the grid is too
/// large for `u32` coordinates.
pub fn compute_xy_labels(
    node_offset: usize,
    nr_nodes: usize,
    enclosures: &str,
) -> Result<(Vec<String>, Vec<String>)> {
    let end = node_offset.checked_add(nr_nodes).ok_or_else(|| {
        LoadMapError::Config(format!(
            "node_offset {} + nr_nodes {} overflows",
            node_offset, nr_nodes
        ))
    })?;
    if u32::try_from(nr_nodes).is_err() {
        return Err(LoadMapError::Config(format!(
            "nr_nodes {} exceeds the grid limit of {}",
            nr_nodes,
            u32::MAX
        )));
    }

    let x_labels = (node_offset..end).map(|i| format!("n{:02}", i)).collect();
    let y_labels = enclosures
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    Ok((x_labels, y_labels))
}

/// All 1-based grid coordinates, row by row
///
/// y is the outer loop and x the inner one, so the first `nx` entries fill
/// the first enclosure. Yields exactly `nx * ny` pairs.
pub fn compute_coordinates(nx: usize, ny: usize) -> Result<Vec<(u32, u32)>> {
    let too_large = || LoadMapError::InvalidNodeMap(format!("{}x{} grid is too large", nx, ny));
    let nx32 = u32::try_from(nx).map_err(|_| too_large())?;
    let ny32 = u32::try_from(ny).map_err(|_| too_large())?;
    nx.checked_mul(ny).ok_or_else(too_large)?;

    Ok((1..=ny32)
        .flat_map(|y| (1..=nx32).map(move |x| (x, y)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_compute_xy_labels_defaults() {
        let (x, y) = compute_xy_labels(DEFAULT_NODE_OFFSET, DEFAULT_NR_NODES, DEFAULT_ENCLOSURES).unwrap();
        assert_eq!(x.len(), 16);
        assert_eq!(x[0], "n01");
        assert_eq!(x[15], "n16");
        assert_eq!(y.len(), 16);
        assert_eq!(y[0], "r1i0");
        assert_eq!(y[15], "r8i0");
    }

    #[test]
    fn test_compute_xy_labels_offset() {
        let (x, y) = compute_xy_labels(0, 3, "a,b").unwrap();
        assert_eq!(x, vec!["n00", "n01", "n02"]);
        assert_eq!(y, vec!["a", "b"]);

        let (x, _) = compute_xy_labels(99, 2, "a").unwrap();
        assert_eq!(x, vec!["n99", "n100"]);
    }

    #[test]
    fn test_compute_coordinates_covers_grid() {
        for (m, n) in [(1, 1), (3, 4), (16, 16), (2, 7)] {
            let coords = compute_coordinates(n, m).unwrap();
            assert_eq!(coords.len(), m * n);

            let unique: HashSet<_> = coords.iter().copied().collect();
            assert_eq!(unique.len(), m * n);
            for y in 1..=m as u32 {
                for x in 1..=n as u32 {
                    assert!(unique.contains(&(x, y)));
                }
            }
        }
    }

    #[test]
    fn test_compute_coordinates_order() {
        let coords = compute_coordinates(2, 2).unwrap();
        assert_eq!(coords, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_compute_coordinates_empty() {
        assert!(compute_coordinates(0, 5).unwrap().is_empty());
        assert!(compute_coordinates(5, 0).unwrap().is_empty());
    }

    #[test]
    fn test_compute_xy_labels_overflow() {
        assert!(matches!(
            compute_xy_labels(usize::MAX, 2, "a"),
            Err(LoadMapError::Config(_))
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_grid_is_rejected() {
        let huge = u32::MAX as usize + 1;
        assert!(matches!(
            compute_xy_labels(0, huge, "a"),
            Err(LoadMapError::Config(_))
        ));
        assert!(matches!(
            compute_coordinates(huge, 1),
            Err(LoadMapError::InvalidNodeMap(_))
        ));
        assert!(matches!(
            compute_coordinates(1, huge),
            Err(LoadMapError::InvalidNodeMap(_))
        ));
    }
}
