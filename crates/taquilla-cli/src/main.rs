mod cli;

use taquilla_core::api::ApiError;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{e:#}"); // pretty anyhow chain
        if matches!(
            e.downcast_ref::<ApiError>(),
            Some(ApiError::Unauthorized { .. })
        ) {
            eprintln!("Session expired. Run 'taquilla login' to sign in again.");
        }
        std::process::exit(1);
    }
}
