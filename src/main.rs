//! rfirelog main entrypoint.

use rfirelog::run;

fn main() {
    if let Err(e) = run() {
        rfirelog::ui::messages::error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
