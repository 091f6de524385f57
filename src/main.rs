mod cli;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => cli::init::run(),
        Commands::Parse { file, json } => cli::parse::run(&file, json),
        Commands::Rooms {
            sheet,
            from,
            to,
            worksheet,
        } => cli::rooms::run(&sheet, from, to, worksheet.as_deref()),
        Commands::Place {
            sheet,
            card,
            gender,
            from,
            to,
            worksheet,
            json,
        } => cli::place::run(&sheet, &card, &gender, from, to, worksheet.as_deref(), json),
        Commands::Ledger { file, output } => cli::ledger::run(&file, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
