use crate::cli::run_cli;
use docver_logic::version::get_version;

pub mod cli;

fn main() {
    match run_cli() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("ERROR running docver ({}):\n{}\n", get_version(), e);
            std::process::exit(1);
        }
    }
}
