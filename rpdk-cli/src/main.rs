use colored::Colorize;
use rpdk_cli::CliError;
use rpdk_core::ParseError;

fn main() {
    match rpdk_cli::run(std::env::args_os(), std::io::stdout()) {
        Ok(()) => {}
        Err(CliError::Parse(ParseError::Usage(err))) => err.exit(),
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            std::process::exit(e.exit_code());
        }
    }
}
