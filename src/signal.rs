// Collapse a raster grid into one height per column.
// A column's height is the mean row index of its lit pixels; empty columns
// borrow from their neighbours so the result has no gaps.

use crate::error::Result;
use crate::scratch;
use crate::types::RasterGrid;

/// One value per column, never a gap.
///
/// 1. mean row of nonzero pixels per column (None if the column is dark)
/// 2. left to right: a dark column takes the last filled value to its left
/// 3. right to left: a leading dark prefix takes the first filled value
/// 4. a completely dark grid becomes the vertical midpoint `height / 2`
pub fn extract(grid: &RasterGrid) -> Result<Vec<f32>> {
    let (width, height) = (grid.width(), grid.height());
    let raw = grid.as_raw();

    let mut columns: Vec<Option<f32>> = scratch::filled(width, None, "column signal")?;
    for (x, column) in columns.iter_mut().enumerate() {
        let mut count = 0usize;
        let mut y_sum = 0.0f64;
        for y in 0..height {
            if raw[y * width + x] != 0 {
                y_sum += y as f64;
                count += 1;
            }
        }
        if count > 0 {
            *column = Some((y_sum / count as f64) as f32);
        }
    }

    let mut last = None;
    for column in columns.iter_mut() {
        if column.is_some() {
            last = *column;
        } else {
            *column = last;
        }
    }

    let mut first = None;
    for column in columns.iter_mut().rev() {
        if column.is_some() {
            first = *column;
        } else {
            *column = first;
        }
    }

    let mid = 0.5 * height as f32;
    let mut signal = scratch::with_capacity(width, "signal")?;
    signal.extend(columns.into_iter().map(|c| c.unwrap_or(mid)));
    Ok(signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_lit_rows_per_column() {
        let mut grid = RasterGrid::new(4, 8).unwrap();
        grid.put(0, 2, 1);
        grid.put(0, 6, 1);
        grid.put(1, 3, 255);
        grid.put(2, 1, 2);
        grid.put(3, 7, 1);
        assert_eq!(extract(&grid).unwrap(), vec![4.0, 3.0, 1.0, 7.0]);
    }

    #[test]
    fn gaps_take_the_value_to_their_left() {
        let mut grid = RasterGrid::new(6, 8).unwrap();
        grid.put(1, 2, 1);
        grid.put(4, 5, 1);
        // leading column copies from the right, the rest carries forward
        assert_eq!(extract(&grid).unwrap(), vec![2.0, 2.0, 2.0, 2.0, 5.0, 5.0]);
    }

    #[test]
    fn empty_grid_is_the_midline() {
        let grid = RasterGrid::new(5, 10).unwrap();
        assert_eq!(extract(&grid).unwrap(), vec![5.0; 5]);
    }

    #[test]
    fn row_zero_is_a_real_value() {
        let mut grid = RasterGrid::new(3, 4).unwrap();
        grid.put(1, 0, 1);
        assert_eq!(extract(&grid).unwrap(), vec![0.0, 0.0, 0.0]);
    }
}
