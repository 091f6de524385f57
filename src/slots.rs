use std::collections::HashSet;

use crate::aliases::{AliasBook, RoomType};
use crate::error::{CaravanError, Result};
use crate::grid::Grid;
use crate::header::{detect_header, Header};
use crate::models::{ColumnRole, Slot};

fn require_columns(header: &Header) -> Result<(usize, usize, usize)> {
    let mut missing = Vec::new();
    let type_col = header.columns.get(ColumnRole::Room);
    let last_col = header.columns.get(ColumnRole::LastName);
    let gender_col = header.columns.get(ColumnRole::Gender);
    for (idx, role) in [
        (type_col, ColumnRole::Room),
        (last_col, ColumnRole::LastName),
        (gender_col, ColumnRole::Gender),
    ] {
        if idx.is_none() {
            missing.push(role.label());
        }
    }
    if !missing.is_empty() {
        return Err(CaravanError::MissingColumns(missing.join(", ")));
    }
    Ok((type_col.unwrap(), last_col.unwrap(), gender_col.unwrap()))
}

/// Find one writable guest position for the requested room type and gender
/// inside the package rows `[start, end)`.
///
/// The scan advances in room-sized strides: each recognized type cell opens a
/// block of `capacity` rows. Blocks of another type are skipped whole, as are
/// blocks whose occupants are of a different gender than requested. Within an
/// eligible block the first row with an empty last-name cell wins.
///
/// `Ok(None)` means the package is full for that type/gender — an ordinary
/// outcome. An unrecognized layout is an error, reported distinctly.
pub fn find_free_slot(
    grid: &Grid,
    start: usize,
    end: usize,
    want: RoomType,
    gender: &str,
    aliases: &AliasBook,
) -> Result<Option<Slot>> {
    let header = detect_header(grid, start, end)
        .ok_or(CaravanError::HeaderNotFound { start, end })?;
    let (type_col, last_col, gender_col) = require_columns(&header)?;

    let gender = gender.trim().to_uppercase();
    let end_cap = end.min(grid.len());
    let mut r = header.row + 1;

    while r < end_cap {
        let Some(kind) = aliases.room_type(grid.cell(r, type_col)) else {
            r += 1;
            continue;
        };
        let size = kind.capacity();
        if kind != want {
            r += size;
            continue;
        }

        let block = r..(r + size).min(end_cap);

        // genders already present among occupied rows of this block
        let mut present: HashSet<String> = HashSet::new();
        for rr in block.clone() {
            if grid.cell(rr, last_col).trim().is_empty() {
                continue;
            }
            let g = grid.cell(rr, gender_col).trim().to_uppercase();
            if !g.is_empty() {
                present.insert(g);
            }
        }
        let mixed = !present.is_empty()
            && !gender.is_empty()
            && !(present.len() == 1 && present.contains(&gender));
        if mixed {
            r += size;
            continue;
        }

        for rr in block {
            if grid.cell(rr, last_col).trim().is_empty() {
                return Ok(Some(Slot {
                    row: rr,
                    columns: header.columns.clone(),
                }));
            }
        }
        r += size;
    }

    Ok(None)
}
