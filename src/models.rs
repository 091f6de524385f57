use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aliases::RoomType;

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// One normalized booking, produced from a single card. Every field except
/// the full name is optional and defaults to empty. `raw` keeps the original
/// text for audit; it is never parsed twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Booking {
    pub full_name: String,
    pub last_name: String,
    pub first_name: String,
    pub departure_date: String,
    pub package_name: String,
    pub amount: String,
    pub amount_clean: String,
    pub paid_amount: String,
    pub paid_amount_clean: String,
    pub placement: String,
    pub placement_code: String,
    pub meal: String,
    pub meal_code: String,
    pub rate: String,
    pub visa: String,
    pub region: String,
    pub departure_city: String,
    pub manager: String,
    pub phone: String,
    pub train: String,
    pub avia: String,
    pub source: String,
    pub contract: String,
    pub contract_date: String,
    pub comments: String,
    pub raw: String,
}

impl Booking {
    /// Column layout of the bookings ledger sheet.
    pub const LEDGER_COLUMNS: [&'static str; 24] = [
        "Timestamp",
        "Full name",
        "Last name",
        "First name",
        "Departure date",
        "Package name",
        "Amount (raw)",
        "Amount (clean)",
        "Paid amount (raw)",
        "Paid amount (clean)",
        "Placement",
        "Placement code",
        "Meal",
        "Meal code",
        "Rate",
        "Visa",
        "Region",
        "Departure city",
        "Manager",
        "Phone",
        "Source",
        "Contract",
        "Contract date",
        "Comments",
    ];

    /// One ledger row in `LEDGER_COLUMNS` order. The timestamp is supplied by
    /// the caller so the row itself stays deterministic.
    pub fn ledger_row(&self, timestamp: &str) -> Vec<String> {
        vec![
            timestamp.to_string(),
            self.full_name.clone(),
            self.last_name.clone(),
            self.first_name.clone(),
            self.departure_date.clone(),
            self.package_name.clone(),
            self.amount.clone(),
            self.amount_clean.clone(),
            self.paid_amount.clone(),
            self.paid_amount_clean.clone(),
            self.placement.clone(),
            self.placement_code.clone(),
            self.meal.clone(),
            self.meal_code.clone(),
            self.rate.clone(),
            self.visa.clone(),
            self.region.clone(),
            self.departure_city.clone(),
            self.manager.clone(),
            self.phone.clone(),
            self.source.clone(),
            self.contract.clone(),
            self.contract_date.clone(),
            self.comments.trim().to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Column map
// ---------------------------------------------------------------------------

/// Logical meaning of a sheet column. Resolved once per header detection;
/// consumers never re-derive column meaning from cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Number,
    Visa,
    Avia,
    Room,
    Meal,
    LastName,
    FirstName,
    FullName,
    Gender,
    BirthDate,
    DocumentNumber,
    DocumentExpiration,
    Price,
    Comment,
    Manager,
    Train,
}

impl ColumnRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Visa => "visa",
            Self::Avia => "avia",
            Self::Room => "room type",
            Self::Meal => "meal",
            Self::LastName => "last name",
            Self::FirstName => "first name",
            Self::FullName => "full name",
            Self::Gender => "gender",
            Self::BirthDate => "date of birth",
            Self::DocumentNumber => "document number",
            Self::DocumentExpiration => "document expiration",
            Self::Price => "price",
            Self::Comment => "comment",
            Self::Manager => "manager",
            Self::Train => "train",
        }
    }
}

/// Role → zero-based column index for one detected header row. Indices are
/// unique across roles: a conflict is resolved during detection by dropping
/// the conflicting roles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    indices: HashMap<ColumnRole, usize>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// First writer wins; later attempts to bind the same role are ignored.
    pub fn bind(&mut self, role: ColumnRole, index: usize) {
        self.indices.entry(role).or_insert(index);
    }

    pub fn unbind(&mut self, role: ColumnRole) {
        self.indices.remove(&role);
    }

    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        self.indices.get(&role).copied()
    }

    pub fn contains(&self, role: ColumnRole) -> bool {
        self.indices.contains_key(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn roles(&self) -> impl Iterator<Item = (ColumnRole, usize)> + '_ {
        self.indices.iter().map(|(r, i)| (*r, *i))
    }

    pub fn max_index(&self) -> Option<usize> {
        self.indices.values().copied().max()
    }

    /// Cell of `row` under `role`, or "" when the role is unmapped or the
    /// (ragged) row is too short.
    pub fn cell<'a>(&self, row: &'a [String], role: ColumnRole) -> &'a str {
        match self.get(role) {
            Some(i) => row.get(i).map(|s| s.as_str()).unwrap_or(""),
            None => "",
        }
    }
}

// ---------------------------------------------------------------------------
// Rooms, slots, write-back
// ---------------------------------------------------------------------------

/// Occupants of one physical room. `adults` drives capacity; children ride
/// along in `guests` without counting.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomGroup {
    pub room_type: RoomType,
    pub guests: Vec<String>,
    pub adults: usize,
}

impl RoomGroup {
    pub fn capacity(&self) -> usize {
        self.room_type.capacity()
    }
}

/// One writable guest position: a row index (0-based into the grid) plus the
/// column map of the header it sits under.
#[derive(Debug, Clone)]
pub struct Slot {
    pub row: usize,
    pub columns: ColumnMap,
}

/// A single row write for the sheet collaborator: 1-based row number, values
/// starting at column A.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteInstruction {
    pub row: usize,
    pub values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_row_matches_columns() {
        let booking = Booking {
            full_name: "Ivanov Petr".to_string(),
            last_name: "Ivanov".to_string(),
            first_name: "Petr".to_string(),
            comments: " note \n".to_string(),
            ..Default::default()
        };
        let row = booking.ledger_row("01.02.2026 10:30");
        assert_eq!(row.len(), Booking::LEDGER_COLUMNS.len());
        assert_eq!(row[0], "01.02.2026 10:30");
        assert_eq!(row[1], "Ivanov Petr");
        assert_eq!(row[23], "note");
    }

    #[test]
    fn test_column_map_first_bind_wins() {
        let mut map = ColumnMap::new();
        map.bind(ColumnRole::LastName, 3);
        map.bind(ColumnRole::LastName, 7);
        assert_eq!(map.get(ColumnRole::LastName), Some(3));
    }

    #[test]
    fn test_column_map_cell_handles_ragged_rows() {
        let mut map = ColumnMap::new();
        map.bind(ColumnRole::LastName, 5);
        let row = vec!["a".to_string(), "b".to_string()];
        assert_eq!(map.cell(&row, ColumnRole::LastName), "");
        assert_eq!(map.cell(&row, ColumnRole::Gender), "");
    }
}
