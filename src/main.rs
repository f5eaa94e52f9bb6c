use std::process::ExitCode;

mod audio;
mod config;
mod cursor;
mod error;
mod event;
mod indicator;
mod library;
mod lock;
mod mpris;
mod player;
mod runtime;
#[cfg(test)]
mod test_support;
mod timer;
mod watch;

fn main() -> ExitCode {
    match runtime::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("anoise: {e}");
            ExitCode::FAILURE
        }
    }
}
