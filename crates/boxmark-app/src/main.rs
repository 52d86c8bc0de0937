//! Main application entry point.

use clap::Parser;

fn main() {
    env_logger::init();
    log::info!("Starting Boxmark");

    let args = boxmark_app::Args::parse();
    match boxmark_app::run(&args) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
