use crate::aliases::AliasBook;
use crate::error::{CaravanError, Result};
use crate::grid::Grid;
use crate::models::{Booking, WriteInstruction};
use crate::payload::{build_row_values, sheet_payload};
use crate::slots::find_free_slot;

/// Place one booking into the package occupying grid rows `[start, end)`.
///
/// Returns the single write the sheet collaborator should perform: a 1-based
/// row number and the full row values starting at column A. `Ok(None)` means
/// the package has no eligible slot for this room type and gender — the
/// caller offers another room or date. Nothing is ever partially written:
/// either the full row comes back, or no instruction at all.
pub fn place_booking(
    grid: &Grid,
    start: usize,
    end: usize,
    booking: &Booking,
    gender: &str,
    aliases: &AliasBook,
) -> Result<Option<WriteInstruction>> {
    let want_text = if booking.placement_code.is_empty() {
        &booking.placement
    } else {
        &booking.placement_code
    };
    let want = aliases
        .room_type(want_text)
        .ok_or_else(|| CaravanError::UnknownRoomType(want_text.clone()))?;

    let Some(slot) = find_free_slot(grid, start, end, want, gender, aliases)? else {
        return Ok(None);
    };

    let payload = sheet_payload(booking, gender);
    let values = build_row_values(&payload, &slot.columns, Some(grid.row(slot.row)));
    Ok(Some(WriteInstruction {
        row: slot.row + 1,
        values,
    }))
}
