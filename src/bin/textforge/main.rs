mod app;
mod bootstrap;
mod clap_app;
mod directories;

use app::App;
use std::process::ExitCode;
use textforge::error::*;

/// Exit status for input the selected tool rejected
const INPUT_ERROR: u8 = 2;

fn run() -> Result<bool> {
    App::new()?.start()
}

/// `0` on success, `1` when the run reported problems or failed, `2` when
/// the input was rejected by validation or could not be parsed.
fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            default_error_handler(&error, &mut std::io::stderr().lock());
            if error.is_user_facing() {
                ExitCode::from(INPUT_ERROR)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
