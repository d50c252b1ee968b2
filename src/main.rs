use std::process::ExitCode;

fn main() -> ExitCode {
    match modelprep_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "modelprep exited with an error");
            ExitCode::FAILURE
        }
    }
}
