//! Table element and its column-width arithmetic.
//!
//! Column widths are percentages of the table width. Every operation in
//! this module leaves `column_widths` summing to 100 (within
//! [`WIDTH_TOLERANCE`]) and matching `columns` in length.

use super::style::SerializableColor;
use crate::error::{EditError, EditResult};
use serde::{Deserialize, Serialize};

/// Allowed drift of the width sum away from 100.
pub const WIDTH_TOLERANCE: f64 = 0.01;

/// Upper bound on the number of rows a table may hold.
pub const MAX_ROWS: usize = 100;

/// Bounds applied to a single column width, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLimits {
    pub min: f64,
    pub max: f64,
}

impl ColumnLimits {
    /// Most columns that can coexist while each keeps the minimum width.
    pub fn max_columns(&self) -> usize {
        if self.min <= 0.0 {
            return usize::MAX;
        }
        (100.0 / self.min).floor() as usize
    }
}

impl Default for ColumnLimits {
    fn default() -> Self {
        Self { min: 5.0, max: 95.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableProps {
    pub label: String,
    /// Total row count, header row included.
    pub rows: usize,
    pub columns: usize,
    pub headers: Vec<String>,
    pub column_widths: Vec<f64>,
    /// Cell font size in points.
    pub font_size: f64,
    pub row_height: f64,
    pub show_header: bool,
    pub show_borders: bool,
    pub border_color: SerializableColor,
}

impl Default for TableProps {
    fn default() -> Self {
        Self {
            label: "Table".to_string(),
            rows: 2,
            columns: 3,
            headers: default_headers(3),
            column_widths: vec![33.33, 33.33, 33.34],
            font_size: 12.0,
            row_height: 60.0,
            show_header: true,
            show_borders: true,
            border_color: SerializableColor::new(0x34, 0x49, 0x5e, 255),
        }
    }
}

fn default_header(index: usize) -> String {
    format!("Header {}", index + 1)
}

fn default_headers(count: usize) -> Vec<String> {
    (0..count).map(default_header).collect()
}

/// Equal split of 100 across `count` columns, rounded to hundredths with
/// the last column absorbing the remainder.
pub fn equal_widths(count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let share = (10_000.0 / count as f64).floor() / 100.0;
    let mut widths = vec![share; count];
    let head: f64 = widths[..count - 1].iter().sum();
    widths[count - 1] = 100.0 - head;
    widths
}

/// Scale widths proportionally so they sum to exactly 100.
///
/// Non-finite or non-positive entries make the vector meaningless, in which
/// case it is replaced by an equal split.
pub fn normalize_widths(widths: &mut [f64]) {
    let count = widths.len();
    if count == 0 {
        return;
    }
    let total: f64 = widths.iter().sum();
    if !total.is_finite() || total <= 0.0 || widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
        widths.copy_from_slice(&equal_widths(count));
        return;
    }
    let factor = 100.0 / total;
    for w in widths.iter_mut() {
        *w *= factor;
    }
    let head: f64 = widths[..count - 1].iter().sum();
    widths[count - 1] = 100.0 - head;
}

/// Split a comma separated header line into trimmed header labels.
pub fn headers_from_csv(line: &str) -> Vec<String> {
    line.split(',').map(|h| h.trim().to_string()).collect()
}

impl TableProps {
    /// Height of the table in page units. Never stored independently.
    pub fn derived_height(&self) -> f64 {
        self.rows as f64 * self.row_height
    }

    /// Number of body rows (rows without the header row when it is shown).
    pub fn body_rows(&self) -> usize {
        if self.show_header {
            self.rows.saturating_sub(1)
        } else {
            self.rows
        }
    }

    pub fn width_sum(&self) -> f64 {
        self.column_widths.iter().sum()
    }

    pub fn set_rows(&mut self, rows: usize) -> EditResult<()> {
        if rows == 0 || rows > MAX_ROWS {
            return Err(EditError::InvalidRowCount(rows));
        }
        self.rows = rows;
        Ok(())
    }

    /// Change the column count.
    ///
    /// Growing resets every column to an equal share and pads the headers;
    /// shrinking truncates and rescales the surviving widths.
    pub fn set_columns(&mut self, columns: usize, limits: &ColumnLimits) -> EditResult<()> {
        if columns == 0 || columns > limits.max_columns() {
            return Err(EditError::InvalidColumnCount(columns));
        }
        if columns > self.columns {
            self.column_widths = equal_widths(columns);
            for i in self.headers.len()..columns {
                self.headers.push(default_header(i));
            }
        } else if columns < self.columns {
            self.column_widths.truncate(columns);
            normalize_widths(&mut self.column_widths);
        }
        self.headers.truncate(columns);
        self.columns = columns;
        Ok(())
    }

    /// Set one column's percentage, then rescale every column so the
    /// widths sum to 100 again.
    ///
    /// Rejected without mutation when the value is outside the limits or
    /// when any column would end up below the minimum.
    pub fn set_column_width(
        &mut self,
        index: usize,
        percent: f64,
        limits: &ColumnLimits,
    ) -> EditResult<()> {
        if index >= self.columns {
            return Err(EditError::ColumnIndexOutOfRange {
                index,
                columns: self.columns,
            });
        }
        if !percent.is_finite() || percent < limits.min || percent > limits.max {
            return Err(EditError::ColumnWidthOutOfRange {
                requested: percent,
                min: limits.min,
                max: limits.max,
            });
        }

        let mut widths = self.column_widths.clone();
        widths[index] = percent;
        normalize_widths(&mut widths);

        if let Some((column, _)) = widths
            .iter()
            .enumerate()
            .find(|(_, w)| **w < limits.min - 1e-9)
        {
            return Err(EditError::ColumnWidthBelowMinimum {
                column,
                min: limits.min,
            });
        }

        self.column_widths = widths;
        Ok(())
    }

    /// Move the border between column `boundary` and `boundary + 1` by
    /// `delta_percent`.
    ///
    /// Only the two adjacent columns change. The moving column is clamped
    /// first so that neither neighbor drops below `min`, the neighbor takes
    /// the exact complement, and the whole vector is renormalized last.
    /// Returns false when nothing changed.
    pub fn resize_boundary(&mut self, boundary: usize, delta_percent: f64, min: f64) -> bool {
        if boundary + 1 >= self.column_widths.len() || !delta_percent.is_finite() {
            return false;
        }
        let current = self.column_widths[boundary];
        let next = self.column_widths[boundary + 1];
        let pair = current + next;
        if pair < 2.0 * min {
            return false;
        }
        let resized = (current + delta_percent).clamp(min, pair - min);
        if (resized - current).abs() < f64::EPSILON {
            return false;
        }
        self.column_widths[boundary] = resized;
        self.column_widths[boundary + 1] = pair - resized;
        normalize_widths(&mut self.column_widths);
        true
    }

    pub fn set_header(&mut self, index: usize, text: impl Into<String>) -> EditResult<()> {
        let columns = self.columns;
        let header = self
            .headers
            .get_mut(index)
            .ok_or(EditError::ColumnIndexOutOfRange { index, columns })?;
        *header = text.into();
        Ok(())
    }

    /// Replace all headers, truncating or padding to the column count.
    pub fn set_headers(&mut self, headers: Vec<String>) {
        let mut headers = headers;
        headers.truncate(self.columns);
        for i in headers.len()..self.columns {
            headers.push(default_header(i));
        }
        self.headers = headers;
    }

    /// Structural consistency check used when loading documents.
    pub fn validate(&self) -> Result<(), String> {
        if self.rows == 0 {
            return Err("table must have at least one row".to_string());
        }
        if self.columns == 0 {
            return Err("table must have at least one column".to_string());
        }
        if self.column_widths.len() != self.columns {
            return Err(format!(
                "table has {} columns but {} column widths",
                self.columns,
                self.column_widths.len()
            ));
        }
        if self.headers.len() != self.columns {
            return Err(format!(
                "table has {} columns but {} headers",
                self.columns,
                self.headers.len()
            ));
        }
        if self.column_widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err("column widths must be positive".to_string());
        }
        let sum = self.width_sum();
        if (sum - 100.0).abs() > WIDTH_TOLERANCE {
            return Err(format!("column widths sum to {sum}, expected 100"));
        }
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err("row height must be positive".to_string());
        }
        Ok(())
    }
}
