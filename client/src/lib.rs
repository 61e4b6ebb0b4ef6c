//! # Prediction Form Client
//!
//! Submits a form to a `/predict` endpoint and renders the answer.
//!
//! ## Payloads
//!
//! Request
//! - `POST /predict`, `Content-Type: application/json`
//! - Flat JSON object, one key per form field, values are the raw strings typed by the user
//! - No coercion or validation on our side, the backend owns that
//!
//! Response
//! - Success: `{ "prediction": <value> }`
//! - Failure: `{ "error": "<message>" }`, usually with a 4xx/5xx status
//! - Anything else (HTML error pages, empty objects, broken JSON) still ends up as one readable line
//!
//! ## Output
//!
//! - One text element, overwritten on every attempt
//! - `Processing...` while a request is in flight (configurable)
//! - `Prediction: <value>` on success
//! - `Error: <message>` on every failure, details only in the logs
//!
//! ## Student Marks Form
//!
//! The form this was built against sends these fields:
//! - `name`
//! - `age`
//! - `year1_marks`
//! - `year2_marks`
//! - `study_time`
//! - `failures`
//!
//! ```sh
//! predict name=Ada age=17 year1_marks=14 year2_marks=15 study_time=2 failures=0
//! ```
//!
//!
//!
//! # Configuration
//!
//! Environment variables, all optional.
//! - `PREDICT_URL`: backend base URL, default `http://127.0.0.1:10000`
//! - `PREDICT_PATH`: endpoint path, default `/predict`
//! - `PREDICT_TIMEOUT_MS`: request timeout, default `15000`
//! - `PREDICT_PROGRESS`: show the in-flight placeholder, default `true`
//!
//! Logs go to stderr and follow `RUST_LOG`.
//! ```sh
//! RUST_LOG=client=debug predict --interactive < forms.txt
//! ```
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod output;
pub mod session;
pub mod utils;

pub use config::Config;
pub use error::{ConfigError, ErrorKind, FieldParseError, SubmitError};
pub use handler::{Outcome, SubmitHandler};
pub use models::{Field, FormFields, PredictionResponse};
pub use output::{MemoryOutput, Output, TerminalOutput};

pub fn init_tracing() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
