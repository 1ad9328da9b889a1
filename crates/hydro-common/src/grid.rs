//! Cell-edge reconstruction for geometrically stretched axes.
//!
//! The hydro solver writes cell centers only. Both codes in the coupling
//! expect edges, so the edges are rebuilt assuming the spacing grows by a
//! constant ratio from cell to cell, with the ratio taken from the first
//! three centers.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{HydroError, HydroResult};

/// Physical limits applied to a reconstructed axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    /// Edges below this value are raised to it
    pub lower: Option<f64>,
    /// Edges above this value are lowered to it, and the last center is
    /// pulled inward so that its cell fits
    pub upper: Option<f64>,
}

impl AxisBounds {
    /// No clamping, used for the radial axis.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Colatitude restricted to one hemisphere: [0, π/2].
    pub fn hemisphere() -> Self {
        Self {
            lower: Some(0.0),
            upper: Some(FRAC_PI_2),
        }
    }

    /// Colatitude with a custom upper limit.
    pub fn colatitude(upper: f64) -> Self {
        Self {
            lower: Some(0.0),
            upper: Some(upper),
        }
    }
}

/// Centers and edges of one axis after reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedAxis {
    /// Cell centers, possibly with the last one corrected
    pub centers: Vec<f64>,
    /// N+1 edges for N centers
    pub edges: Vec<f64>,
    /// Constant spacing ratio inferred from the first three centers
    pub ratio: f64,
}

impl ReconstructedAxis {
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Check if the axis has no cells.
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Lower edge of cell `i`.
    pub fn lower_edge(&self, i: usize) -> Option<f64> {
        if i < self.centers.len() {
            self.edges.get(i).copied()
        } else {
            None
        }
    }

    /// Width of cell `i`.
    pub fn width(&self, i: usize) -> Option<f64> {
        if i < self.centers.len() {
            Some(self.edges[i + 1] - self.edges[i])
        } else {
            None
        }
    }
}

/// Rebuild the edges of an axis from its cell centers.
///
/// With three or more centers the spacing ratio comes from the first three.
/// Two centers are taken as uniform. A single center has no spacing
/// information: its cell reaches down to the lower bound and mirrors it
/// above the center, or collapses onto the center when the axis is
/// unbounded below.
///
/// The caller's slice is never modified; the returned axis carries its own
/// copy of the centers.
///
/// With an upper bound only the last cell may cross it: its center moves
/// inward and its outer edge lands on the bound. Any earlier edge at or past
/// the bound is an `InvalidAxis` error.
pub fn reconstruct_edges(
    axis: &str,
    centers: &[f64],
    bounds: AxisBounds,
) -> HydroResult<ReconstructedAxis> {
    let n = centers.len();
    if n == 0 {
        return Err(HydroError::invalid_axis(axis, "no cell centers"));
    }
    if let Some(k) = centers.windows(2).position(|w| !(w[1] > w[0])) {
        return Err(HydroError::invalid_axis(
            axis,
            format!("centers not strictly increasing at index {}", k + 1),
        ));
    }

    let (ratio, mut spacing) = match n {
        1 => {
            let half = match bounds.lower {
                Some(lower) if centers[0] > lower => centers[0] - lower,
                _ => 0.0,
            };
            (1.0, 2.0 * half)
        }
        2 => (1.0, centers[1] - centers[0]),
        _ => {
            let ratio = (centers[2] - centers[1]) / (centers[1] - centers[0]);
            if !ratio.is_finite() {
                return Err(HydroError::invalid_axis(axis, "spacing ratio is not finite"));
            }
            // c[0] sits halfway across the first cell, whose neighbour is `ratio` times wider
            (ratio, (centers[1] - centers[0]) / (0.5 * (1.0 + ratio)))
        }
    };

    let mut edges = Vec::with_capacity(n + 1);
    edges.push(centers[0] - 0.5 * spacing);
    for _ in 0..n {
        let last = edges[edges.len() - 1];
        edges.push(last + spacing);
        spacing *= ratio;
    }

    let mut centers = centers.to_vec();

    if let Some(lower) = bounds.lower {
        if edges[0] < lower {
            debug!(axis, edge = edges[0], lower, "Clamping first edge to lower bound");
            edges[0] = lower;
        }
    }

    if let Some(upper) = bounds.upper {
        // Only the last cell can be pulled back inside the bound
        if let Some(k) = edges[..n].iter().position(|e| !(*e < upper)) {
            return Err(HydroError::invalid_axis(
                axis,
                format!("edge {} at {} reaches upper bound {}", k, edges[k], upper),
            ));
        }
        let inner = edges[n - 1];
        let center = centers[n - 1];
        if inner + 2.0 * (center - inner) > upper {
            let corrected = 0.5 * (inner + upper);
            warn!(
                axis,
                old_center = center,
                new_center = corrected,
                upper,
                "Last cell crosses upper bound, moving center inward"
            );
            centers[n - 1] = corrected;
            edges[n] = upper;
        } else if edges[n] > upper {
            edges[n] = upper;
        }
    }

    debug!(
        axis,
        cells = n,
        ratio,
        first_edge = edges[0],
        last_edge = edges[n],
        "Reconstructed axis edges"
    );

    Ok(ReconstructedAxis {
        centers,
        edges,
        ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_axis() {
        let centers = [0.5, 1.5, 2.5, 3.5];
        let axis = reconstruct_edges("x", &centers, AxisBounds::unbounded()).unwrap();
        assert_eq!(axis.ratio, 1.0);
        assert_eq!(axis.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(axis.centers, centers.to_vec());
    }

    #[test]
    fn test_empty_axis() {
        let err = reconstruct_edges("r", &[], AxisBounds::unbounded()).unwrap_err();
        assert!(matches!(err, HydroError::InvalidAxis { .. }));
    }

    #[test]
    fn test_two_centers_uniform() {
        let axis = reconstruct_edges("r", &[1.0, 2.0], AxisBounds::unbounded()).unwrap();
        assert_eq!(axis.edges, vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn test_single_center() {
        let axis = reconstruct_edges("r", &[3.0], AxisBounds::unbounded()).unwrap();
        assert_eq!(axis.edges, vec![3.0, 3.0]);

        let axis = reconstruct_edges("theta", &[0.25], AxisBounds::hemisphere()).unwrap();
        assert_eq!(axis.edges, vec![0.0, 0.5]);
    }

    #[test]
    fn test_non_increasing_centers() {
        let err = reconstruct_edges("r", &[1.0, 2.0, 2.0, 3.0], AxisBounds::unbounded()).unwrap_err();
        assert!(err.to_string().contains("index 2"));
    }

    #[test]
    fn test_lower_bound_clamp() {
        // Ratio 3 pushes the extrapolated first edge below zero
        let centers = [0.02, 0.22, 0.82];
        let axis = reconstruct_edges("theta", &centers, AxisBounds::colatitude(10.0)).unwrap();
        assert_eq!(axis.edges[0], 0.0);
        assert!(axis.edges[1] > 0.0);
    }

    #[test]
    fn test_input_slice_untouched() {
        let centers = vec![1.0, 1.2, 1.4];
        let axis = reconstruct_edges("theta", &centers, AxisBounds::colatitude(1.45)).unwrap();
        assert_eq!(centers, vec![1.0, 1.2, 1.4]);
        assert!((axis.centers[2] - 1.375).abs() < 1e-12);
        assert_eq!(axis.edges[3], 1.45);
    }

    #[test]
    fn test_inner_edge_beyond_upper_bound() {
        // Ratio 3: the fourth edge lands past π/2 before the last cell starts
        let centers = [0.1, 0.2, 0.5, 0.6, 1.5];
        let err = reconstruct_edges("theta", &centers, AxisBounds::hemisphere()).unwrap_err();
        match err {
            HydroError::InvalidAxis { axis, message } => {
                assert_eq!(axis, "theta");
                assert!(message.contains("edge 4"), "{}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // Same centers without an upper bound are accepted
        assert!(reconstruct_edges("theta", &centers, AxisBounds::unbounded()).is_ok());
    }

    #[test]
    fn test_lower_edge_and_width() {
        let axis = reconstruct_edges("x", &[0.5, 1.5, 2.5], AxisBounds::unbounded()).unwrap();
        assert_eq!(axis.lower_edge(2), Some(2.0));
        assert_eq!(axis.lower_edge(3), None);
        assert_eq!(axis.width(0), Some(1.0));
        assert_eq!(axis.width(3), None);
    }
}
