pub mod init;
pub mod ledger;
pub mod parse;
pub mod place;
pub mod rooms;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "caravan",
    about = "Booking normalization and room allocation for group-tour sheets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a starter alias-override file under the user config dir.
    Init,
    /// Parse one or more booking cards from a text file.
    Parse {
        /// Path to a text file with the pasted card(s)
        file: String,
        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Group the guests already seated in a sheet range into rooms.
    Rooms {
        /// Path to a CSV or XLSX export of the sheet
        sheet: String,
        /// First row of the package range (1-based, inclusive)
        #[arg(long, default_value = "1")]
        from: usize,
        /// Last row of the package range (1-based, inclusive; default: sheet end)
        #[arg(long)]
        to: Option<usize>,
        /// Worksheet name for XLSX files (default: first sheet)
        #[arg(long)]
        worksheet: Option<String>,
    },
    /// Find a free slot for a booking and print the row write instruction.
    Place {
        /// Path to a CSV or XLSX export of the sheet
        sheet: String,
        /// Path to a text file with the booking card
        card: String,
        /// Gender code for the row: M or F
        #[arg(long)]
        gender: String,
        /// First row of the package range (1-based, inclusive)
        #[arg(long, default_value = "1")]
        from: usize,
        /// Last row of the package range (1-based, inclusive; default: sheet end)
        #[arg(long)]
        to: Option<usize>,
        /// Worksheet name for XLSX files (default: first sheet)
        #[arg(long)]
        worksheet: Option<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export parsed cards as bookings-ledger CSV rows.
    Ledger {
        /// Path to a text file with the pasted card(s)
        file: String,
        /// Output CSV path (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
}

/// Convert a 1-based inclusive row range into the engine's half-open
/// 0-based bounds.
pub(crate) fn row_bounds(from: usize, to: Option<usize>, sheet_len: usize) -> (usize, usize) {
    let start = from.saturating_sub(1);
    let end = to.unwrap_or(sheet_len).min(sheet_len);
    (start, end)
}
