//! rpaylog main entrypoint.

use rpaylog::run;
use rpaylog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
