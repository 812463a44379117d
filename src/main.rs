use std::process::ExitCode;

fn main() -> ExitCode {
    match apibench::entry::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
