// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building a payload from image files and driving a sender to completion.

use std::path::Path;
use std::sync::Arc;

use tattle_core::{
    FeedbackPayload, FeedbackSender, PresentationContext, Screenshot, SendError, SendSuccess,
    SenderDelegate, SubmissionOutcome, TattleError,
};
use tracing::{error, info};

/// Stands in for the feedback form; there is nothing on screen to close.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl PresentationContext for TerminalPresenter {
    fn dismiss(&self) {
        eprintln!("tattle: feedback queued for delivery");
    }
}

/// Logs each outcome as it is reported.
#[derive(Debug, Default)]
pub struct OutcomeLogger;

impl SenderDelegate for OutcomeLogger {
    fn did_send(&self, sender: &dyn FeedbackSender, feedback: &FeedbackPayload, success: SendSuccess) {
        info!(
            sender = sender.name(),
            has_text = feedback.text.is_some(),
            outcome = %success,
            "feedback delivered"
        );
    }

    fn did_fail_to_send(&self, sender: &dyn FeedbackSender, _: &FeedbackPayload, error: &SendError) {
        error!(sender = sender.name(), kind = error.kind(), error = %error, "feedback not delivered");
    }
}

/// Reads the screenshot (and optional annotated rendition) from disk.
pub fn load_payload(
    image: &Path,
    annotated: Option<&Path>,
    text: Option<String>,
) -> Result<FeedbackPayload, TattleError> {
    let mut screenshot = Screenshot::new(open_image(image)?);
    if let Some(path) = annotated {
        screenshot = screenshot.with_annotated(open_image(path)?);
    }
    Ok(FeedbackPayload { screenshot, text })
}

fn open_image(path: &Path) -> Result<image::DynamicImage, TattleError> {
    image::open(path).map_err(|e| TattleError::Payload {
        message: format!("failed to read image {}: {e}", path.display()),
        source: Some(Box::new(e)),
    })
}

/// Sends `payload` and waits for its single outcome.
pub async fn deliver(sender: &dyn FeedbackSender, payload: FeedbackPayload) -> SubmissionOutcome {
    let delegate: Arc<dyn SenderDelegate> = Arc::new(OutcomeLogger);
    sender.set_delegate(Arc::downgrade(&delegate));

    let presenter = TerminalPresenter;
    let outcome = sender.send(payload, Some(&presenter)).outcome().await;
    drop(delegate);
    outcome
}
