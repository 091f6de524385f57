use anyhow::{bail, Context, Result};

use caravan::card::CardParser;
use caravan::models::Booking;

pub fn run(file: &str, output: Option<&str>) -> Result<()> {
    let text = std::fs::read_to_string(file).with_context(|| format!("reading {file}"))?;
    let bookings = CardParser::new().parse_all(&text);
    if bookings.is_empty() {
        bail!("no booking card found in {file} (a full-name line is required)");
    }

    let timestamp = chrono::Local::now().format("%d.%m.%Y %H:%M").to_string();

    let mut writer: csv::Writer<Box<dyn std::io::Write>> = match output {
        Some(path) => csv::Writer::from_writer(Box::new(
            std::fs::File::create(path).with_context(|| format!("creating {path}"))?,
        )),
        None => csv::Writer::from_writer(Box::new(std::io::stdout())),
    };
    writer.write_record(Booking::LEDGER_COLUMNS)?;
    for booking in &bookings {
        writer.write_record(booking.ledger_row(&timestamp))?;
    }
    writer.flush()?;

    if let Some(path) = output {
        println!("{} bookings written to {path}", bookings.len());
    }
    Ok(())
}
