// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trello sender for the tattle feedback SDK.
//!
//! Implements [`FeedbackSender`] by creating a card on a Trello list with the
//! screenshot attached, uploaded as a hand-framed `multipart/form-data` POST.

pub mod encode;
pub mod endpoint;
pub mod multipart;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tattle_config::model::TrelloConfig;
use tattle_config::ConfigError;
use tattle_core::{
    report_outcome, ClosingFraming, DelegateSlot, FeedbackPayload, FeedbackSender, HealthStatus,
    PluginAdapter, PresentationContext, SendError, SendSuccess, SenderDelegate, StatusPolicy,
    Submission, SubmissionOutcome, TattleError,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::multipart::MultipartBody;

/// Form field carrying the screenshot.
const FILE_FIELD: &str = "file";

/// Form field carrying the payload text, which Trello uses as the card description.
const TEXT_FIELD: &str = "desc";

/// Credentials and destination list. Not validated until used.
#[derive(Clone, PartialEq, Eq)]
pub struct TrelloCredentials {
    pub key: String,
    pub token: String,
    pub list_id: String,
}

impl TrelloCredentials {
    pub fn new(key: impl Into<String>, token: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            token: token.into(),
            list_id: list_id.into(),
        }
    }

    /// Extracts credentials from configuration, reporting every missing key.
    pub fn from_config(config: &TrelloConfig) -> Result<Self, Vec<ConfigError>> {
        let mut missing = Vec::new();
        let mut take = |key: &str, value: &Option<String>| match value {
            Some(v) => v.clone(),
            None => {
                missing.push(ConfigError::missing(key));
                String::new()
            }
        };
        let credentials = Self {
            key: take("trello.api_key", &config.api_key),
            token: take("trello.api_token", &config.api_token),
            list_id: take("trello.list_id", &config.list_id),
        };
        if missing.is_empty() {
            Ok(credentials)
        } else {
            Err(missing)
        }
    }
}

impl fmt::Debug for TrelloCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrelloCredentials")
            .field("key", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .field("list_id", &self.list_id)
            .finish()
    }
}

/// Tunables for request construction and outcome classification.
#[derive(Debug, Clone, PartialEq)]
pub struct TrelloOptions {
    pub api_base_url: String,
    /// `0.0..=1.0`.
    pub jpeg_quality: f32,
    pub file_name: String,
    pub closing_framing: ClosingFraming,
    pub status_policy: StatusPolicy,
    pub timeout: Option<Duration>,
    pub attach_text: bool,
}

impl Default for TrelloOptions {
    fn default() -> Self {
        Self::from(&TrelloConfig::default())
    }
}

impl From<&TrelloConfig> for TrelloOptions {
    fn from(config: &TrelloConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
            jpeg_quality: config.jpeg_quality,
            file_name: config.file_name.clone(),
            closing_framing: config.closing_framing,
            status_policy: config.status_policy,
            timeout: config.timeout_secs.map(Duration::from_secs),
            attach_text: config.attach_text,
        }
    }
}

/// A fully built upload, ready to hand to the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    url: Url,
    body: Vec<u8>,
}

impl UploadRequest {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn content_type(&self) -> String {
        multipart::content_type()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Sends feedback to Trello as a new card with the screenshot attached.
///
/// Cloning is cheap and clones share the delegate and in-flight counter.
#[derive(Clone)]
pub struct TrelloSender {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    credentials: TrelloCredentials,
    options: TrelloOptions,
    delegate: DelegateSlot,
    in_flight: AtomicUsize,
}

impl fmt::Debug for TrelloSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrelloSender")
            .field("credentials", &self.inner.credentials)
            .field("options", &self.inner.options)
            .field("delegate", &self.inner.delegate)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl TrelloSender {
    /// Creates a sender. Credentials are not checked until the first request.
    pub fn new(credentials: TrelloCredentials, options: TrelloOptions) -> Result<Self, TattleError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TattleError::Transport {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                credentials,
                options,
                delegate: DelegateSlot::new(),
                in_flight: AtomicUsize::new(0),
            }),
        })
    }

    /// Creates a sender from the `[trello]` config section.
    ///
    /// Requires `api_key`, `api_token`, and `list_id` to be set.
    pub fn from_config(config: &TrelloConfig) -> Result<Self, TattleError> {
        let credentials = TrelloCredentials::from_config(config).map_err(|errors| {
            let keys: Vec<String> = errors.iter().map(ToString::to_string).collect();
            TattleError::Config(keys.join("; "))
        })?;
        Self::new(credentials, TrelloOptions::from(config))
    }

    pub fn options(&self) -> &TrelloOptions {
        &self.inner.options
    }

    /// Number of uploads scheduled whose outcome has not been reported yet.
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Builds the upload for `feedback` without touching the network.
    pub fn prepare(&self, feedback: &FeedbackPayload) -> Result<UploadRequest, SendError> {
        let options = &self.inner.options;

        let image = encode::encode_jpeg(
            feedback.screenshot.preferred_image(),
            encode::quality_percent(options.jpeg_quality),
        )?;

        let url = endpoint::card_endpoint(&options.api_base_url, &self.inner.credentials)?;

        let mut body = MultipartBody::new(options.closing_framing);
        if options.attach_text
            && let Some(text) = feedback.text.as_deref()
        {
            body = body.text_field(TEXT_FIELD, text)?;
        }
        let body = body
            .file_field(FILE_FIELD, &options.file_name, &image)?
            .finish();

        Ok(UploadRequest { url, body })
    }

    /// Performs one upload and classifies the result. Never retries.
    pub async fn upload(&self, request: UploadRequest) -> SubmissionOutcome {
        let shown = endpoint::redact(&request.url);
        info!(endpoint = %shown, bytes = request.body.len(), "uploading feedback to Trello");

        let content_type = request.content_type();
        let result = self
            .inner
            .client
            .post(request.url)
            .header(CONTENT_TYPE, content_type)
            .body(request.body)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let e = e.without_url();
                warn!(endpoint = %shown, error = %e, "feedback upload failed");
                return SubmissionOutcome::Failed(SendError::UploadFailed {
                    message: e.to_string(),
                    status: e.status().map(|s| s.as_u16()),
                });
            }
        };

        let status = response.status();
        debug!(status = %status, "Trello responded");

        if self.inner.options.status_policy == StatusPolicy::Strict && !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Trello rejected feedback upload");
            return SubmissionOutcome::Failed(SendError::UploadFailed {
                message: format!("Trello returned {status}: {body}"),
                status: Some(status.as_u16()),
            });
        }

        SubmissionOutcome::Succeeded(SendSuccess::Sent)
    }

    /// Prepares and uploads `feedback`, bypassing the delegate and presenter.
    pub async fn submit(&self, feedback: &FeedbackPayload) -> SubmissionOutcome {
        match self.prepare(feedback) {
            Ok(request) => self.upload(request).await,
            Err(e) => SubmissionOutcome::Failed(e),
        }
    }

    fn settle(
        &self,
        delegate: Option<&Weak<dyn SenderDelegate>>,
        feedback: &FeedbackPayload,
        error: SendError,
    ) -> Submission {
        warn!(kind = error.kind(), error = %error, "feedback not sent");
        let outcome = SubmissionOutcome::Failed(error);
        report_outcome(delegate, self, feedback, &outcome);
        Submission::settled(outcome)
    }
}

/// Counts one upload as in flight until dropped, including on unwind.
struct InFlight(Arc<Inner>);

impl InFlight {
    fn enter(inner: &Arc<Inner>) -> Self {
        inner.in_flight.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(inner))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PluginAdapter for TrelloSender {
    fn name(&self) -> &str {
        "trello"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, TattleError> {
        let url = endpoint::list_endpoint(&self.inner.options.api_base_url, &self.inner.credentials)
            .map_err(|e| TattleError::Config(e.to_string()))?;

        match self.inner.client.get(url).send().await {
            Ok(response) if response.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(response) => Ok(HealthStatus::Unhealthy(format!(
                "Trello returned {} for list {}",
                response.status(),
                self.inner.credentials.list_id
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Trello unreachable: {}",
                e.without_url()
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), TattleError> {
        debug!(in_flight = self.in_flight(), "Trello sender shutting down");
        Ok(())
    }
}

impl FeedbackSender for TrelloSender {
    fn set_delegate(&self, delegate: Weak<dyn SenderDelegate>) {
        self.inner.delegate.set(delegate);
    }

    /// Uploads on the current Tokio runtime. Without one, the delegate is
    /// told the upload failed.
    fn send(
        &self,
        feedback: FeedbackPayload,
        presenter: Option<&dyn PresentationContext>,
    ) -> Submission {
        let delegate = self.inner.delegate.current();

        let Some(presenter) = presenter else {
            return self.settle(delegate.as_ref(), &feedback, SendError::NoPresentationContext);
        };

        let request = match self.prepare(&feedback) {
            Ok(request) => request,
            Err(e) => return self.settle(delegate.as_ref(), &feedback, e),
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                let error = SendError::UploadFailed {
                    message: format!("no async runtime to upload on: {e}"),
                    status: None,
                };
                return self.settle(delegate.as_ref(), &feedback, error);
            }
        };

        let sender = self.clone();
        let guard = InFlight::enter(&self.inner);
        let task = runtime.spawn(async move {
            let _guard = guard;
            let outcome = sender.upload(request).await;
            report_outcome(delegate.as_ref(), &sender, &feedback, &outcome);
            outcome
        });

        presenter.dismiss();
        Submission::pending(task)
    }
}
