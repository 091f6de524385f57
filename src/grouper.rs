use crate::aliases::{AliasBook, RoomType};
use crate::grid::Grid;
use crate::header::Header;
use crate::models::{ColumnMap, ColumnRole, RoomGroup};
use crate::text::squash;

/// Result of one grouping pass: room structure plus the flat ordered roster
/// (children included) for callers that only need a list of names.
#[derive(Debug, Clone, Default)]
pub struct GroupedGuests {
    pub rooms: Vec<RoomGroup>,
    pub roster: Vec<String>,
}

// ---------------------------------------------------------------------------
// Guest admission
// ---------------------------------------------------------------------------

/// A cell value counts as a name part only if it has letters and is not a
/// date, a number, a marker word, or service text from the denylist.
fn is_valid_name(s: &str, aliases: &AliasBook) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    if aliases.has_date_token(s) {
        return false;
    }
    if s.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if s.chars().any(|c| "/.-_|–".contains(c)) {
        return false;
    }
    let low = s.to_lowercase();
    if aliases.noise_hit(&low) || aliases.is_reserved_word(&low) {
        return false;
    }
    s.chars().any(|c| c.is_alphabetic())
}

/// Assemble the person name from the row: a combined name column when the
/// header has one, otherwise the valid parts of last + first.
fn person_name(row: &[String], cols: &ColumnMap, aliases: &AliasBook) -> String {
    if cols.contains(ColumnRole::FullName) {
        let name = squash(cols.cell(row, ColumnRole::FullName));
        return if is_valid_name(&name, aliases) {
            name
        } else {
            String::new()
        };
    }
    let last = squash(cols.cell(row, ColumnRole::LastName));
    let first = squash(cols.cell(row, ColumnRole::FirstName));
    let mut parts = Vec::new();
    if is_valid_name(&last, aliases) {
        parts.push(last);
    }
    if is_valid_name(&first, aliases) {
        parts.push(first);
    }
    parts.join(" ")
}

/// Child if the meal cell carries a child marker (INF/CHD/…), falling back
/// to the whole row when the meal column is absent or silent.
fn row_is_child(row: &[String], cols: &ColumnMap, aliases: &AliasBook) -> bool {
    let meal = cols.cell(row, ColumnRole::Meal);
    if !meal.is_empty() && aliases.is_child_marker(meal) {
        return true;
    }
    aliases.is_child_marker(&row.join(" "))
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

struct OpenRoom {
    kind: RoomType,
    guests: Vec<String>,
    adults: usize,
}

/// The grouping state threaded through the row fold: the currently open room
/// and the last explicitly seen type (inherited by rows with an empty type
/// cell). The open/continue/flush transitions live here so they can be
/// exercised without a grid.
#[derive(Default)]
struct Accumulator {
    rooms: Vec<RoomGroup>,
    current: Option<OpenRoom>,
    last_explicit: Option<RoomType>,
}

impl Accumulator {
    fn open(&mut self, kind: RoomType) {
        self.current = Some(OpenRoom {
            kind,
            guests: Vec::new(),
            adults: 0,
        });
    }

    fn flush(&mut self) {
        if let Some(room) = self.current.take() {
            if !room.guests.is_empty() {
                self.rooms.push(RoomGroup {
                    room_type: room.kind,
                    guests: room.guests,
                    adults: room.adults,
                });
            }
        }
    }

    /// Admit one guest into the open room. Capacity is evaluated AFTER the
    /// admission, against adults only, so a child never blocks or fills a
    /// room on its own.
    fn admit(&mut self, name: String, child: bool) {
        let Some(room) = self.current.as_mut() else {
            return;
        };
        room.guests.push(name);
        if !child {
            room.adults += 1;
        }
        if room.adults >= room.kind.capacity() {
            self.flush();
        }
    }
}

/// Walk data rows below the header and partition the guests already listed
/// there into rooms. An explicit non-empty type cell ALWAYS starts a new
/// room — two adjacent "DBL" rows are two doubles, not one quad. An empty
/// type cell continues the open room, inheriting the last explicit type.
pub fn collect_rooms(
    grid: &Grid,
    header: &Header,
    end: usize,
    aliases: &AliasBook,
) -> GroupedGuests {
    let cols = &header.columns;
    let mut acc = Accumulator::default();
    let mut roster = Vec::new();

    let end_cap = end.min(grid.len());
    for r in (header.row + 1)..end_cap {
        if grid.row_is_blank(r) {
            continue;
        }
        let row = grid.row(r);
        let name = person_name(row, cols, aliases);
        if name.chars().count() < 2 {
            continue;
        }

        let raw_type = squash(cols.cell(row, ColumnRole::Room));
        if !raw_type.is_empty() {
            // unrecognized explicit text falls back to the inherited type
            let kind = aliases.room_type(&raw_type).or(acc.last_explicit);
            acc.last_explicit = kind;
            acc.flush();
            match kind {
                Some(k) => acc.open(k),
                None => continue,
            }
        } else if acc.current.is_none() {
            match acc.last_explicit {
                Some(k) => acc.open(k),
                None => continue,
            }
        }

        let child = row_is_child(row, cols, aliases);
        roster.push(name.clone());
        acc.admit(name, child);
    }
    acc.flush();

    GroupedGuests {
        rooms: merge_orphans(acc.rooms),
        roster,
    }
}

// A finalized group with zero adults is children who spilled past their
// parents' room; fold them into the preceding group. With no preceding group
// the orphan is dropped — children cannot hold a room alone.
fn merge_orphans(rooms: Vec<RoomGroup>) -> Vec<RoomGroup> {
    let mut merged: Vec<RoomGroup> = Vec::new();
    for room in rooms {
        if room.adults == 0 {
            if let Some(prev) = merged.last_mut() {
                prev.guests.extend(room.guests);
            }
        } else {
            merged.push(room);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::detect_header;

    const HEADER: &[&str] = &["Type of room", "Meal a day", "Last Name", "First Name"];

    fn grouped(rows: &[&[&str]]) -> GroupedGuests {
        let mut cells: Vec<&[&str]> = vec![HEADER];
        cells.extend_from_slice(rows);
        let grid = Grid::from_cells(&cells);
        let header = detect_header(&grid, 0, grid.len()).unwrap();
        collect_rooms(&grid, &header, grid.len(), &AliasBook::new())
    }

    #[test]
    fn test_inherited_type_fills_one_room_to_capacity() {
        let g = grouped(&[
            &["DBL", "HB", "Ivanov", "Petr"],
            &["", "HB", "Petrov", "Ivan"],
        ]);
        assert_eq!(g.rooms.len(), 1);
        assert_eq!(g.rooms[0].room_type, RoomType::Double);
        assert_eq!(g.rooms[0].adults, 2);
        assert_eq!(g.rooms[0].guests, vec!["Ivanov Petr", "Petrov Ivan"]);
        assert_eq!(g.roster.len(), 2);
    }

    #[test]
    fn test_capacity_closes_group_and_next_row_opens_fresh() {
        let g = grouped(&[
            &["DBL", "HB", "Ivanov", "Petr"],
            &["", "HB", "Petrov", "Ivan"],
            &["", "HB", "Sidorov", "Oleg"],
        ]);
        // the double closed at two adults; the third guest starts a new
        // implicit double from the inherited type
        assert_eq!(g.rooms.len(), 2);
        assert_eq!(g.rooms[0].guests.len(), 2);
        assert_eq!(g.rooms[1].room_type, RoomType::Double);
        assert_eq!(g.rooms[1].guests, vec!["Sidorov Oleg"]);
    }

    #[test]
    fn test_explicit_type_always_starts_a_new_room() {
        let g = grouped(&[
            &["DBL", "HB", "Ivanov", "Petr"],
            &["DBL", "HB", "Petrov", "Ivan"],
        ]);
        assert_eq!(g.rooms.len(), 2);
        assert_eq!(g.rooms[0].adults, 1);
        assert_eq!(g.rooms[1].adults, 1);
    }

    #[test]
    fn test_children_do_not_count_against_capacity() {
        let g = grouped(&[
            &["TRPL", "HB", "Ivanov", "Petr"],
            &["", "INF", "Ivanova", "Alina"],
            &["", "HB", "Ivanova", "Aruzhan"],
            &["", "HB", "Ivanov", "Daniyar"],
        ]);
        assert_eq!(g.rooms.len(), 1);
        assert_eq!(g.rooms[0].guests.len(), 4);
        assert_eq!(g.rooms[0].adults, 3);
    }

    #[test]
    fn test_trailing_children_merge_into_previous_room() {
        let g = grouped(&[
            &["DBL", "HB", "Ivanov", "Petr"],
            &["", "HB", "Ivanova", "Aigul"],
            &["", "CHD", "Ivanova", "Alina"],
        ]);
        // the double closed at capacity; the child reopened it implicitly and
        // was merged back as a zero-adult orphan
        assert_eq!(g.rooms.len(), 1);
        assert_eq!(g.rooms[0].guests.len(), 3);
        assert_eq!(g.rooms[0].adults, 2);
    }

    #[test]
    fn test_leading_children_only_group_is_dropped() {
        let g = grouped(&[
            &["DBL", "INF", "Ivanova", "Alina"],
            &["DBL", "HB", "Petrov", "Ivan"],
        ]);
        assert_eq!(g.rooms.len(), 1);
        assert_eq!(g.rooms[0].guests, vec!["Petrov Ivan"]);
        // the roster still remembers everyone who was admitted
        assert_eq!(g.roster.len(), 2);
    }

    #[test]
    fn test_service_rows_are_skipped() {
        let g = grouped(&[
            &["", "", "MAKKAH", "Swissotel hotel"],
            &["", "", "12.10.2025", ""],
            &["", "", "GUIDE", ""],
            &["DBL", "HB", "Ivanov", "Petr"],
            &["", "", "TRANSFER", ""],
            &["", "HB", "Petrov", "Ivan"],
        ]);
        assert_eq!(g.rooms.len(), 1);
        assert_eq!(g.rooms[0].guests, vec!["Ivanov Petr", "Petrov Ivan"]);
        assert_eq!(g.roster, vec!["Ivanov Petr", "Petrov Ivan"]);
    }

    #[test]
    fn test_rows_before_any_explicit_type_are_skipped() {
        let g = grouped(&[
            &["", "HB", "Ivanov", "Petr"],
            &["DBL", "HB", "Petrov", "Ivan"],
        ]);
        assert_eq!(g.rooms.len(), 1);
        assert_eq!(g.rooms[0].guests, vec!["Petrov Ivan"]);
    }

    #[test]
    fn test_unrecognized_explicit_type_inherits_previous() {
        let g = grouped(&[
            &["DBL", "HB", "Ivanov", "Petr"],
            &["люкс", "HB", "Petrov", "Ivan"],
        ]);
        // "люкс" resolves to nothing; the new room keeps the inherited double
        assert_eq!(g.rooms.len(), 2);
        assert_eq!(g.rooms[1].room_type, RoomType::Double);
        assert_eq!(g.rooms[1].guests, vec!["Petrov Ivan"]);
    }

    #[test]
    fn test_single_name_part_is_enough() {
        let g = grouped(&[&["SGL", "HB", "Ахметова", ""]]);
        assert_eq!(g.rooms.len(), 1);
        assert_eq!(g.rooms[0].guests, vec!["Ахметова"]);
        assert_eq!(g.rooms[0].adults, 1);
    }

    #[test]
    fn test_digit_tier_type_cell() {
        let g = grouped(&[
            &["2-мест", "HB", "Ivanov", "Petr"],
            &["", "HB", "Petrov", "Ivan"],
        ]);
        assert_eq!(g.rooms.len(), 1);
        assert_eq!(g.rooms[0].room_type, RoomType::Double);
    }
}
