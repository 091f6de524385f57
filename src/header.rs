use std::collections::HashMap;

use crate::grid::Grid;
use crate::models::{ColumnMap, ColumnRole};
use crate::text::norm_key;

/// Rows past the window start the widened fallback scan covers when the
/// primary window yields nothing.
pub const FALLBACK_WINDOW: usize = 30;

/// A detected header: its row index and the role→column map accumulated from
/// that row.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub row: usize,
    pub columns: ColumnMap,
}

// Per-role keyword lists. They intentionally overlap across the two
// languages the sheets mix; matching is substring containment on the
// normalized cell.
const ROLE_KEYWORDS: &[(ColumnRole, &[&str])] = &[
    (ColumnRole::Number, &["№", "no", "n°"]),
    (ColumnRole::Visa, &["visa", "виза"]),
    (ColumnRole::Avia, &["avia", "авиа"]),
    (
        ColumnRole::Room,
        &["type of room", "room type", "тип номера", "тип размещения"],
    ),
    (ColumnRole::Meal, &["meal a day", "meal", "питание"]),
    (ColumnRole::LastName, &["last name", "lastname", "surname", "фамилия"]),
    (ColumnRole::FirstName, &["first name", "firstname", "имя"]),
    (ColumnRole::FullName, &["guest name", "guestname", "фио"]),
    (ColumnRole::Gender, &["gender", "sex", "пол", "м/ж", "m/f"]),
    (ColumnRole::BirthDate, &["date of birth", "дата рождения"]),
    (
        ColumnRole::DocumentNumber,
        &["document number", "номер документа", "passport"],
    ),
    (
        ColumnRole::DocumentExpiration,
        &["document expiration", "expiration", "expiry"],
    ),
    (ColumnRole::Price, &["price", "цена", "сумма"]),
    (ColumnRole::Comment, &["comment", "коммент"]),
    (ColumnRole::Manager, &["manager", "менеджер"]),
    (ColumnRole::Train, &["train", "поезд"]),
];

/// Test one row against the role keyword lists. Each role binds at most once,
/// to the leftmost matching cell. The row qualifies as a header only if a
/// last-name or first-name column survived; all other roles are recorded
/// opportunistically in the same pass.
fn detect_row(row: &[String]) -> Option<ColumnMap> {
    let mut map = ColumnMap::new();
    for (i, cell) in row.iter().enumerate() {
        let t = norm_key(cell);
        if t.is_empty() {
            continue;
        }
        for (role, keywords) in ROLE_KEYWORDS {
            if map.contains(*role) {
                continue;
            }
            if keywords.iter().any(|k| t.contains(k)) {
                map.bind(*role, i);
            }
        }
    }

    // Two roles landing on the same column means the header is ambiguous for
    // both; drop them rather than guess.
    let mut hits: HashMap<usize, usize> = HashMap::new();
    let bound: Vec<(ColumnRole, usize)> = map.roles().collect();
    for (_, idx) in &bound {
        *hits.entry(*idx).or_insert(0) += 1;
    }
    for (role, idx) in &bound {
        if hits[idx] > 1 {
            map.unbind(*role);
        }
    }

    if map.contains(ColumnRole::LastName) || map.contains(ColumnRole::FirstName) {
        Some(map)
    } else {
        None
    }
}

/// Scan `[start, end)` for the header row; if nothing qualifies, rescan the
/// widened window of `FALLBACK_WINDOW` rows from the same start. Pure over
/// its inputs: the same grid and window always yield the same result.
pub fn detect_header(grid: &Grid, start: usize, end: usize) -> Option<Header> {
    let primary_end = end.min(grid.len());
    for r in start..primary_end {
        if let Some(columns) = detect_row(grid.row(r)) {
            return Some(Header { row: r, columns });
        }
    }
    let fallback_end = start.saturating_add(FALLBACK_WINDOW).min(grid.len());
    for r in primary_end..fallback_end {
        if let Some(columns) = detect_row(grid.row(r)) {
            return Some(Header { row: r, columns });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_header() -> Vec<&'static str> {
        vec![
            "№",
            "Avia",
            "Visa",
            "Type of room",
            "Meal a day",
            "Last Name",
            "First Name",
            "Gender",
            "Date of Birth",
            "Document Number",
            "Document  Expiration",
            "Comment",
            "Price",
            "Manager",
            "Train",
        ]
    }

    #[test]
    fn test_detects_full_english_header() {
        let header: Vec<&str> = sheet_header();
        let grid = Grid::from_cells(&[&["NIYET 7 DAYS", "12.10-19.10"], &header]);
        let found = detect_header(&grid, 0, 5).unwrap();
        assert_eq!(found.row, 1);
        let cols = &found.columns;
        assert_eq!(cols.get(ColumnRole::Number), Some(0));
        assert_eq!(cols.get(ColumnRole::Avia), Some(1));
        assert_eq!(cols.get(ColumnRole::Visa), Some(2));
        assert_eq!(cols.get(ColumnRole::Room), Some(3));
        assert_eq!(cols.get(ColumnRole::Meal), Some(4));
        assert_eq!(cols.get(ColumnRole::LastName), Some(5));
        assert_eq!(cols.get(ColumnRole::FirstName), Some(6));
        assert_eq!(cols.get(ColumnRole::Gender), Some(7));
        assert_eq!(cols.get(ColumnRole::BirthDate), Some(8));
        assert_eq!(cols.get(ColumnRole::DocumentNumber), Some(9));
        assert_eq!(cols.get(ColumnRole::DocumentExpiration), Some(10));
        assert_eq!(cols.get(ColumnRole::Comment), Some(11));
        assert_eq!(cols.get(ColumnRole::Price), Some(12));
        assert_eq!(cols.get(ColumnRole::Manager), Some(13));
        assert_eq!(cols.get(ColumnRole::Train), Some(14));
    }

    #[test]
    fn test_detects_russian_header() {
        let grid = Grid::from_cells(&[&["Тип номера", "Фамилия", "Имя", "Питание", "Пол"]]);
        let found = detect_header(&grid, 0, 1).unwrap();
        let cols = &found.columns;
        assert_eq!(cols.get(ColumnRole::Room), Some(0));
        assert_eq!(cols.get(ColumnRole::LastName), Some(1));
        assert_eq!(cols.get(ColumnRole::FirstName), Some(2));
        assert_eq!(cols.get(ColumnRole::Meal), Some(3));
        assert_eq!(cols.get(ColumnRole::Gender), Some(4));
    }

    #[test]
    fn test_requires_a_name_column() {
        // room/meal alone never qualify a row as the header
        let grid = Grid::from_cells(&[&["Type of room", "Meal a day", "Price"]]);
        assert!(detect_header(&grid, 0, 1).is_none());
    }

    #[test]
    fn test_first_cell_wins_per_role() {
        let grid = Grid::from_cells(&[&["Last Name", "Last Name (latin)", "First Name"]]);
        let found = detect_header(&grid, 0, 1).unwrap();
        assert_eq!(found.columns.get(ColumnRole::LastName), Some(0));
    }

    #[test]
    fn test_ambiguous_roles_are_dropped_but_header_survives() {
        // one cell matching both comment and manager keywords: both roles
        // dropped, the header itself still found via the name columns
        let grid = Grid::from_cells(&[&["Фамилия", "Имя", "comment manager"]]);
        let found = detect_header(&grid, 0, 1).unwrap();
        assert!(found.columns.get(ColumnRole::Comment).is_none());
        assert!(found.columns.get(ColumnRole::Manager).is_none());
        assert_eq!(found.columns.get(ColumnRole::LastName), Some(0));
    }

    #[test]
    fn test_ambiguous_name_columns_fail_detection() {
        // a combined "ФИО Фамилия Имя" cell binds three roles to one index;
        // all are dropped and the row no longer qualifies
        let grid = Grid::from_cells(&[&["ФИО Фамилия Имя", "Питание"]]);
        assert!(detect_header(&grid, 0, 1).is_none());
    }

    #[test]
    fn test_fallback_window_extends_search() {
        let mut rows: Vec<Vec<String>> = vec![vec!["".to_string()]; 10];
        rows[7] = vec!["Last Name".to_string(), "First Name".to_string()];
        let grid = Grid::new(rows);
        // primary window misses the header, the widened window finds it
        let found = detect_header(&grid, 0, 3).unwrap();
        assert_eq!(found.row, 7);
    }

    #[test]
    fn test_no_header_found() {
        let grid = Grid::from_cells(&[&["BUS", "TRAIN"], &["12.10.2025"]]);
        assert!(detect_header(&grid, 0, 2).is_none());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let header: Vec<&str> = sheet_header();
        let grid = Grid::from_cells(&[&header]);
        let a = detect_header(&grid, 0, 1).unwrap();
        let b = detect_header(&grid, 0, 1).unwrap();
        assert_eq!(a, b);
    }
}
