use std::process;

use graphical_interface::config::{AppConfig, ConfigError};

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{}", ConfigError::HelpRequested);
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    if let Err(e) = graphical_interface::run(config) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
