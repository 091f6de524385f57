use std::collections::HashMap;

use crate::models::{Booking, ColumnMap, ColumnRole};

/// Columns allocation may never overwrite: whatever the sheet already says
/// about the room type and the visa stays.
pub const PROTECTED: [ColumnRole; 2] = [ColumnRole::Room, ColumnRole::Visa];

pub type RowPayload = HashMap<ColumnRole, String>;

/// Merge a normalized booking with the dialog-supplied gender code into the
/// role→value payload the Row Builder consumes. Cleaned values win over raw
/// ones where both exist.
pub fn sheet_payload(booking: &Booking, gender: &str) -> RowPayload {
    let mut payload = RowPayload::new();
    let mut put = |role: ColumnRole, value: &str| {
        payload.insert(role, value.trim().to_string());
    };
    put(ColumnRole::Avia, &booking.avia);
    put(ColumnRole::Visa, &booking.visa);
    let room = if booking.placement_code.is_empty() {
        &booking.placement
    } else {
        &booking.placement_code
    };
    put(ColumnRole::Room, room);
    let meal = if booking.meal_code.is_empty() {
        &booking.meal
    } else {
        &booking.meal_code
    };
    put(ColumnRole::Meal, meal);
    put(ColumnRole::LastName, &booking.last_name);
    put(ColumnRole::FirstName, &booking.first_name);
    put(ColumnRole::Gender, &gender.trim().to_uppercase());
    put(ColumnRole::Comment, &booking.comments);
    let price = if booking.amount_clean.is_empty() {
        &booking.amount
    } else {
        &booking.amount_clean
    };
    put(ColumnRole::Price, price);
    put(ColumnRole::Manager, &booking.manager);
    put(ColumnRole::Train, &booking.train);
    payload
}

/// Build the full row for a single write: start from the base row (or an
/// empty one), widen it to cover every mapped column, then overwrite each
/// mapped, non-protected role with the payload's value. An absent or empty
/// payload value keeps whatever the cell already held; protected columns are
/// preserved wholesale no matter what the payload says.
pub fn build_row_values(
    payload: &RowPayload,
    columns: &ColumnMap,
    base: Option<&[String]>,
) -> Vec<String> {
    let mut row: Vec<String> = base.map(|b| b.to_vec()).unwrap_or_default();
    let width = columns
        .max_index()
        .map(|m| m + 1)
        .unwrap_or(0)
        .max(row.len());
    row.resize(width, String::new());

    for (role, idx) in columns.roles() {
        if PROTECTED.contains(&role) {
            continue;
        }
        if let Some(value) = payload.get(&role) {
            if !value.is_empty() {
                row[idx] = value.clone();
            }
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> ColumnMap {
        let mut map = ColumnMap::new();
        map.bind(ColumnRole::Room, 0);
        map.bind(ColumnRole::Visa, 1);
        map.bind(ColumnRole::LastName, 2);
        map.bind(ColumnRole::FirstName, 3);
        map.bind(ColumnRole::Gender, 4);
        map.bind(ColumnRole::Price, 5);
        map
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_protected_columns_survive_any_payload() {
        let mut payload = RowPayload::new();
        payload.insert(ColumnRole::Room, "TRPL".to_string());
        payload.insert(ColumnRole::Visa, "нет".to_string());
        payload.insert(ColumnRole::LastName, "Ivanov".to_string());
        let base = strings(&["DBL original", "есть", "", "", "", ""]);
        let row = build_row_values(&payload, &columns(), Some(&base));
        assert_eq!(row[0], "DBL original");
        assert_eq!(row[1], "есть");
        assert_eq!(row[2], "Ivanov");
    }

    #[test]
    fn test_payload_without_room_type_leaves_cell_alone() {
        let mut payload = RowPayload::new();
        payload.insert(ColumnRole::LastName, "Ivanov".to_string());
        for pre in ["", "TRPL", "whatever was here"] {
            let base = strings(&[pre, "", "", "", "", ""]);
            let row = build_row_values(&payload, &columns(), Some(&base));
            assert_eq!(row[0], pre);
        }
    }

    #[test]
    fn test_empty_payload_value_keeps_base_cell() {
        let mut payload = RowPayload::new();
        payload.insert(ColumnRole::Price, String::new());
        payload.insert(ColumnRole::LastName, "Ivanov".to_string());
        let base = strings(&["", "", "old name", "", "", "950"]);
        let row = build_row_values(&payload, &columns(), Some(&base));
        assert_eq!(row[5], "950");
        assert_eq!(row[2], "Ivanov");
    }

    #[test]
    fn test_row_extends_to_cover_mapped_columns() {
        let mut payload = RowPayload::new();
        payload.insert(ColumnRole::Price, "1600".to_string());
        let base = strings(&["DBL"]);
        let row = build_row_values(&payload, &columns(), Some(&base));
        assert_eq!(row.len(), 6);
        assert_eq!(row[5], "1600");
        // no base at all works too
        let row = build_row_values(&payload, &columns(), None);
        assert_eq!(row.len(), 6);
        assert_eq!(row[0], "");
    }

    #[test]
    fn test_sheet_payload_prefers_cleaned_values() {
        let booking = Booking {
            placement: "дабл".to_string(),
            placement_code: "DBL".to_string(),
            meal: "полупансион".to_string(),
            meal_code: "HB".to_string(),
            amount: "1 950$".to_string(),
            amount_clean: "1950".to_string(),
            last_name: "Ivanov".to_string(),
            first_name: "Petr".to_string(),
            ..Default::default()
        };
        let payload = sheet_payload(&booking, "m");
        assert_eq!(payload[&ColumnRole::Room], "DBL");
        assert_eq!(payload[&ColumnRole::Meal], "HB");
        assert_eq!(payload[&ColumnRole::Price], "1950");
        assert_eq!(payload[&ColumnRole::Gender], "M");
    }

    #[test]
    fn test_sheet_payload_falls_back_to_raw_values() {
        let booking = Booking {
            placement: "люкс".to_string(),
            meal: "как обычно".to_string(),
            amount: "договорная".to_string(),
            ..Default::default()
        };
        let payload = sheet_payload(&booking, "F");
        assert_eq!(payload[&ColumnRole::Room], "люкс");
        assert_eq!(payload[&ColumnRole::Meal], "как обычно");
        assert_eq!(payload[&ColumnRole::Price], "договорная");
    }
}
