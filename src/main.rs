//! Binary entry point for pkgstage.

use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match pkgstage::cli::run().await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("pkgstage: {e}");
            process::exit(1);
        }
    }
}
