use std::path::Path;

use crate::error::{CaravanError, Result};

/// Rectangular, row-major, string-valued sheet snapshot. Rows may be ragged;
/// any cell outside a row reads as the empty string.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Test/fixture helper: build a grid from string literals.
    pub fn from_cells(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, r: usize) -> &[String] {
        self.rows.get(r).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn cell(&self, r: usize, c: usize) -> &str {
        self.rows
            .get(r)
            .and_then(|row| row.get(c))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn row_is_blank(&self, r: usize) -> bool {
        self.row(r).iter().all(|c| c.trim().is_empty())
    }

    // -----------------------------------------------------------------------
    // Loading (CLI harness only; the engine itself never touches files)
    // -----------------------------------------------------------------------

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(std::io::BufReader::new(file));
        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }
        Ok(Self { rows })
    }

    #[cfg(feature = "xlsx")]
    pub fn from_xlsx_path(path: &Path, sheet: Option<&str>) -> Result<Self> {
        use calamine::{Data, Reader};

        let mut workbook = calamine::open_workbook_auto(path)
            .map_err(|e| CaravanError::Workbook(format!("failed to open {}: {e}", path.display())))?;
        let name = match sheet {
            Some(s) => s.to_string(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| CaravanError::Workbook("workbook has no sheets".to_string()))?,
        };
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| CaravanError::Workbook(format!("sheet {name:?}: {e}")))?;
        let mut rows = Vec::new();
        for row in range.rows() {
            rows.push(
                row.iter()
                    .map(|cell| match cell {
                        Data::String(s) => s.clone(),
                        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
                        Data::Float(f) => f.to_string(),
                        Data::Int(i) => i.to_string(),
                        Data::Bool(b) => b.to_string(),
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect(),
            );
        }
        Ok(Self { rows })
    }

    /// Load a grid from a file, dispatching on extension.
    pub fn load(path: &Path, sheet: Option<&str>) -> Result<Self> {
        let is_workbook = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xls"))
            .unwrap_or(false);
        if is_workbook {
            #[cfg(feature = "xlsx")]
            return Self::from_xlsx_path(path, sheet);
            #[cfg(not(feature = "xlsx"))]
            return Err(CaravanError::Workbook(
                "built without the xlsx feature".to_string(),
            ));
        }
        let _ = sheet;
        Self::from_csv_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_access_is_total() {
        let grid = Grid::from_cells(&[&["a", "b"], &["c"]]);
        assert_eq!(grid.cell(0, 1), "b");
        assert_eq!(grid.cell(1, 1), "");
        assert_eq!(grid.cell(9, 0), "");
        assert!(grid.row(9).is_empty());
    }

    #[test]
    fn test_row_is_blank() {
        let grid = Grid::from_cells(&[&["", "  "], &["x", ""]]);
        assert!(grid.row_is_blank(0));
        assert!(!grid.row_is_blank(1));
        assert!(grid.row_is_blank(5));
    }

    #[test]
    fn test_from_csv_path_keeps_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        std::fs::write(&path, "Type of room,Last Name,First Name\nDBL,Ivanov\n").unwrap();
        let grid = Grid::from_csv_path(&path).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.cell(1, 0), "DBL");
        assert_eq!(grid.cell(1, 2), "");
    }
}
