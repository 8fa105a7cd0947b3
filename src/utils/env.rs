// src/utils/env.rs

use log::{debug, info};

/// Loads environment variables from a `.env` file if one is present.
/// Variables already set in the process environment win.
pub fn load_env() {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(_) => debug!("No .env file found; using process environment only"),
    }
}
