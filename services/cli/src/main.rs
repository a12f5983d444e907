use hiring_state_cli::run;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("application error: {err}");
            ExitCode::FAILURE
        }
    }
}
