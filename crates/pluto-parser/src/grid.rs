//! Parser for `grid.out`.

use std::fs;
use std::path::Path;

use crate::error::{PlutoError, PlutoResult};

/// Cell boundaries along one dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisCells {
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl AxisCells {
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Cell centers, midway between the boundaries.
    pub fn centers(&self) -> Vec<f64> {
        self.left
            .iter()
            .zip(&self.right)
            .map(|(l, r)| 0.5 * (l + r))
            .collect()
    }
}

/// Grid of up to three dimensions. Missing dimensions have one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlutoGrid {
    pub x1: AxisCells,
    pub x2: AxisCells,
    pub x3: AxisCells,
}

impl PlutoGrid {
    pub fn read<P: AsRef<Path>>(path: P) -> PlutoResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse grid file text: `#` comment lines, then for each dimension a
    /// count line followed by that many `index left right` lines.
    pub fn parse(text: &str) -> PlutoResult<Self> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let mut axes: Vec<AxisCells> = Vec::with_capacity(3);
        while axes.len() < 3 {
            let Some(count_line) = lines.next() else {
                break;
            };
            let count: usize = count_line.parse().map_err(|_| {
                PlutoError::invalid_format(format!("expected cell count, found '{}'", count_line))
            })?;

            let mut axis = AxisCells::default();
            for _ in 0..count {
                let line = lines.next().ok_or_else(|| {
                    PlutoError::invalid_format(format!(
                        "dimension {} ends after {} of {} cells",
                        axes.len() + 1,
                        axis.len(),
                        count
                    ))
                })?;
                let (left, right) = parse_cell_line(line)?;
                axis.left.push(left);
                axis.right.push(right);
            }
            axes.push(axis);
        }

        if axes.is_empty() {
            return Err(PlutoError::invalid_format("grid file lists no dimensions"));
        }
        while axes.len() < 3 {
            axes.push(AxisCells {
                left: vec![0.0],
                right: vec![1.0],
            });
        }

        let x3 = axes.pop().unwrap_or_default();
        let x2 = axes.pop().unwrap_or_default();
        let x1 = axes.pop().unwrap_or_default();
        Ok(Self { x1, x2, x3 })
    }

    /// Number of values in one variable block.
    pub fn cell_count(&self) -> usize {
        self.x1.len() * self.x2.len() * self.x3.len()
    }
}

fn parse_cell_line(line: &str) -> PlutoResult<(f64, f64)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(PlutoError::invalid_format(format!(
            "cell line '{}' has fewer than 3 columns",
            line
        )));
    }
    let parse = |token: &str| {
        token
            .parse::<f64>()
            .map_err(|_| PlutoError::invalid_format(format!("bad coordinate '{}'", token)))
    };
    Ok((parse(tokens[1])?, parse(tokens[2])?))
}
