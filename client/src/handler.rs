//! # Submit Handler
//!
//! Turns one form submission into one `POST` and one rendered outcome.
//!
//! ## Flow
//!
//! 1. Take the next ticket and, if enabled, render the in-flight placeholder
//! 2. `POST` the fields as a JSON object with `Content-Type: application/json`
//! 3. Non-2xx status: failure, message from the body's `error` or the status code
//! 4. 2xx without a JSON content type: failure, raw body only goes to the logs
//! 5. Parse the body, failure if it is not valid JSON
//! 6. Render `Prediction: <value>` or `Error: <message>`
//!
//! ## Overlapping Submissions
//!
//! The latest issued ticket owns the output. A request that completes after a
//! newer one was started is dropped without rendering, whichever finishes
//! first. Issuing a ticket and rendering both happen under the same lock, so an
//! older result can never land after a newer placeholder.
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use tracing::{debug, error, info};

use crate::{
    config::Config,
    error::{ConfigError, SubmitError},
    models::{FormFields, PredictionResponse},
    output::Output,
    utils::{is_json_content_type, server_error_message},
};

pub const PROCESSING: &str = "Processing...";
pub const SUCCESS_PREFIX: &str = "Prediction: ";

pub struct SubmitHandler {
    client: Client,
    endpoint: Url,
    config: Config,
    output: Arc<dyn Output>,
    latest_ticket: Mutex<u64>,
}

/// What happened to a single submission.
#[derive(Debug)]
pub struct Outcome {
    pub ticket: u64,
    pub result: Result<String, SubmitError>,
    /// Text this submission produced, rendered or not.
    pub text: String,
    /// `false` when a newer submission had started before this one resolved.
    pub rendered: bool,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

impl SubmitHandler {
    pub fn new(config: Config, output: Arc<dyn Output>) -> Result<Arc<Self>, ConfigError> {
        let endpoint = config.endpoint()?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Arc::new(Self {
            client,
            endpoint,
            config,
            output,
            latest_ticket: Mutex::new(0),
        }))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn submit(&self, fields: FormFields) -> Outcome {
        let ticket = self.begin();
        info!(ticket, fields = fields.len(), "Submitting to {}", self.endpoint);

        let result = self.send(&fields).await;

        let text = match &result {
            Ok(prediction) => {
                info!(ticket, "Prediction received: {prediction}");
                format!("{SUCCESS_PREFIX}{prediction}")
            }
            Err(e) => {
                error!(ticket, kind = ?e.kind(), detail = ?e, "Submission failed: {e}");
                e.user_message()
            }
        };

        let rendered = self.finish(ticket, &text);

        Outcome {
            ticket,
            result,
            text,
            rendered,
        }
    }

    fn begin(&self) -> u64 {
        let mut latest = self.latest_ticket.lock();
        *latest += 1;

        if self.config.show_progress {
            self.output.set_text(PROCESSING);
        }

        *latest
    }

    fn finish(&self, ticket: u64, text: &str) -> bool {
        let latest = self.latest_ticket.lock();

        if *latest != ticket {
            debug!(ticket, latest = *latest, "Discarding stale result");
            return false;
        }

        self.output.set_text(text);
        true
    }

    async fn send(&self, fields: &FormFields) -> Result<String, SubmitError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(fields)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(SubmitError::HttpStatus {
                status: status.as_u16(),
                message: server_error_message(&body),
            });
        }

        if !content_type.as_deref().is_some_and(is_json_content_type) {
            return Err(SubmitError::UnexpectedFormat { content_type, body });
        }

        match serde_json::from_str::<PredictionResponse>(&body) {
            Ok(payload) => payload.into_prediction(),
            Err(source) => Err(SubmitError::Parse { source, body }),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> SubmitError {
        if e.is_timeout() {
            SubmitError::Timeout(self.config.timeout)
        } else {
            SubmitError::Network(e)
        }
    }
}
