use anyhow::{bail, Context, Result};
use colored::Colorize;
use comfy_table::Table;

use caravan::card::CardParser;
use caravan::models::Booking;

fn summary_table(booking: &Booking) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    let rows: [(&str, &str); 12] = [
        ("Package", &booking.package_name),
        ("Departure date", &booking.departure_date),
        ("Placement", &booking.placement),
        ("Placement code", &booking.placement_code),
        ("Meal", &booking.meal),
        ("Meal code", &booking.meal_code),
        ("Amount", &booking.amount_clean),
        ("Paid", &booking.paid_amount_clean),
        ("Departure city", &booking.departure_city),
        ("Manager", &booking.manager),
        ("Phone", &booking.phone),
        ("Comments", &booking.comments),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            table.add_row(vec![label, value]);
        }
    }
    table
}

pub fn run(file: &str, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file).with_context(|| format!("reading {file}"))?;
    let bookings = CardParser::new().parse_all(&text);
    if bookings.is_empty() {
        bail!("no booking card found in {file} (a full-name line is required)");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&bookings)?);
        return Ok(());
    }

    for booking in &bookings {
        println!(
            "{} {}",
            booking.full_name.bold(),
            format!("({} / {})", booking.last_name, booking.first_name).dimmed()
        );
        println!("{}", summary_table(booking));
    }
    if bookings.len() > 1 {
        println!("{} cards parsed", bookings.len());
    }
    Ok(())
}
