use std::path::Path;

use anyhow::{bail, Result};
use comfy_table::Table;

use caravan::grid::Grid;
use caravan::grouper::collect_rooms;
use caravan::header::detect_header;
use caravan::settings::load_alias_book;

pub fn run(sheet: &str, from: usize, to: Option<usize>, worksheet: Option<&str>) -> Result<()> {
    let grid = Grid::load(Path::new(sheet), worksheet)?;
    let (start, end) = super::row_bounds(from, to, grid.len());
    let aliases = load_alias_book();

    let Some(header) = detect_header(&grid, start, end) else {
        bail!("no header row recognized in rows {from}..{}", to.unwrap_or(grid.len()));
    };
    let grouped = collect_rooms(&grid, &header, end, &aliases);

    let mut table = Table::new();
    table.set_header(vec!["#", "Type", "Beds", "Adults", "Guests"]);
    for (i, room) in grouped.rooms.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            room.room_type.code().to_string(),
            room.capacity().to_string(),
            room.adults.to_string(),
            room.guests.join(", "),
        ]);
    }
    println!("{table}");
    println!(
        "{} rooms, {} guests (header at sheet row {})",
        grouped.rooms.len(),
        grouped.roster.len(),
        header.row + 1
    );
    Ok(())
}
