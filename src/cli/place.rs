use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use caravan::allocator::place_booking;
use caravan::card::CardParser;
use caravan::grid::Grid;
use caravan::settings::load_alias_book;

pub fn run(
    sheet: &str,
    card: &str,
    gender: &str,
    from: usize,
    to: Option<usize>,
    worksheet: Option<&str>,
    json: bool,
) -> Result<()> {
    let gender = gender.trim().to_uppercase();
    if gender != "M" && gender != "F" {
        bail!("gender must be M or F, got {gender:?}");
    }

    let text = std::fs::read_to_string(card).with_context(|| format!("reading {card}"))?;
    let bookings = CardParser::new().parse_all(&text);
    let Some(booking) = bookings.first() else {
        bail!("no booking card found in {card} (a full-name line is required)");
    };
    if bookings.len() > 1 {
        eprintln!(
            "{}",
            format!(
                "{} cards in {card}; placing the first ({}) — writes must go one at a time",
                bookings.len(),
                booking.full_name
            )
            .yellow()
        );
    }

    let grid = Grid::load(Path::new(sheet), worksheet)?;
    let (start, end) = super::row_bounds(from, to, grid.len());
    let aliases = load_alias_book();

    match place_booking(&grid, start, end, booking, &gender, &aliases)? {
        Some(instruction) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&instruction)?);
            } else {
                println!(
                    "{} {} → sheet row {}",
                    "slot found:".green().bold(),
                    booking.full_name,
                    instruction.row
                );
                println!("{}", instruction.values.join(" | "));
            }
        }
        None => {
            // ordinary outcome, not an error: the package is simply full for
            // this room type and gender
            println!(
                "{}",
                format!(
                    "no eligible slot for {} ({}, {gender}) in rows {from}..{}",
                    booking.full_name,
                    booking.placement_code,
                    to.unwrap_or(grid.len())
                )
                .yellow()
            );
        }
    }
    Ok(())
}
