//! Gesture replay entry point (native).

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: precis-replay <file.json>");
        return ExitCode::from(2);
    };
    log::info!("Replaying {}", path);

    let outputs = match precis_app::load_replay(&path).and_then(|replay| precis_app::run_replay(&replay)) {
        Ok(outputs) => outputs,
        Err(e) => {
            log::error!("Replay of {} failed: {}", path, e);
            eprintln!("precis-replay: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for event in outputs {
        match event.to_json() {
            Ok(line) => println!("{}", line),
            Err(e) => log::warn!("Could not encode output for {}: {}", event.id, e),
        }
    }
    ExitCode::SUCCESS
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    eprintln!("Native feature not enabled. Use `cargo run --features native`");
}
