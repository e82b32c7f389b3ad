// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the Trello sender against a mock HTTP server.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tattle_core::{
    ClosingFraming, FeedbackPayload, FeedbackSender, HealthStatus, PluginAdapter, SendError,
    SendSuccess, SenderDelegate, StatusPolicy, SubmissionOutcome,
};
use tattle_test_utils::{fixtures, MockDelegate, MockPresenter, Notification};
use tattle_trello::encode::{encode_jpeg, quality_percent};
use tattle_trello::multipart::BOUNDARY;
use tattle_trello::{TrelloCredentials, TrelloOptions, TrelloSender};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTENT_TYPE: &str =
    "multipart/form-data; boundary=---------------------------14737809831466499882746641449";
const DISPOSITION: &[u8] = b"Content-Disposition: form-data; name=\"file\"; filename=\"img.jpg\"";
const WAIT: Duration = Duration::from_secs(5);

fn sender_for(base_url: &str, options: TrelloOptions) -> TrelloSender {
    TrelloSender::new(
        TrelloCredentials::new("abc", "xyz", "123"),
        TrelloOptions {
            api_base_url: base_url.to_string(),
            ..options
        },
    )
    .unwrap()
}

fn attach(sender: &TrelloSender) -> Arc<MockDelegate> {
    let delegate = Arc::new(MockDelegate::new());
    sender.set_delegate(Arc::downgrade(&delegate) as Weak<dyn SenderDelegate>);
    delegate
}

async fn mount_cards(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/1/cards"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn red_image_is_posted_as_multipart_card() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/cards"))
        .and(query_param("idList", "123"))
        .and(query_param("due", "null"))
        .and(query_param("key", "abc"))
        .and(query_param("token", "xyz"))
        .and(header("content-type", CONTENT_TYPE))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sender = sender_for(&server.uri(), TrelloOptions::default());
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    let submission = sender.send(fixtures::red_payload(10), Some(&presenter));
    assert_eq!(presenter.dismissals(), 1);

    let outcome = submission.outcome().await;
    assert_eq!(outcome, SubmissionOutcome::Succeeded(SendSuccess::Sent));
    assert!(delegate.wait_for(1, WAIT).await);
    assert_eq!(
        delegate.notifications(),
        vec![Notification::Sent {
            sender: "trello".into(),
            text: None,
            success: SendSuccess::Sent,
        }]
    );
    assert_eq!(sender.in_flight(), 0);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.url.path(), "/1/cards");
    assert_eq!(
        request.url.query(),
        Some("idList=123&due=null&key=abc&token=xyz")
    );

    let jpeg = encode_jpeg(&fixtures::red_image(10), quality_percent(0.8)).unwrap();
    let disposition = fixtures::position(&request.body, DISPOSITION).expect("disposition line");
    let image = fixtures::position(&request.body, &jpeg).expect("jpeg bytes");
    assert!(disposition < image);
    assert!(request.body.ends_with(format!("\r\n--{BOUNDARY}--\r\n").as_bytes()));
}

#[tokio::test]
async fn missing_presenter_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sender = sender_for(&server.uri(), TrelloOptions::default());
    let delegate = attach(&sender);

    let submission = sender.send(fixtures::red_payload(10), None);
    assert!(submission.is_finished());
    assert_eq!(delegate.count(), 1);
    assert_eq!(
        delegate.notifications()[0].error(),
        Some(&SendError::NoPresentationContext)
    );
    assert_eq!(
        submission.outcome().await,
        SubmissionOutcome::Failed(SendError::NoPresentationContext)
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unencodable_image_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sender = sender_for(&server.uri(), TrelloOptions::default());
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    let outcome = sender
        .send(fixtures::empty_payload(), Some(&presenter))
        .outcome()
        .await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed(SendError::ImageEncodingFailed { .. })
    ));
    assert_eq!(delegate.count(), 1);
    assert_eq!(presenter.dismissals(), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_base_url_is_reported() {
    let sender = sender_for("::not a url", TrelloOptions::default());
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    let outcome = sender
        .send(fixtures::red_payload(4), Some(&presenter))
        .outcome()
        .await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed(SendError::InvalidDestinationUrl { .. })
    ));
    assert_eq!(delegate.count(), 1);
}

#[tokio::test]
async fn transport_error_is_upload_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let options = TrelloOptions {
        timeout: Some(Duration::from_millis(200)),
        ..TrelloOptions::default()
    };
    let sender = sender_for(&server.uri(), options);
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    let outcome = sender
        .send(fixtures::red_payload(10), Some(&presenter))
        .outcome()
        .await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed(SendError::UploadFailed { status: None, .. })
    ));
    assert!(delegate.wait_for(1, WAIT).await);
    assert!(matches!(
        delegate.notifications()[0].error(),
        Some(SendError::UploadFailed { .. })
    ));
    assert_eq!(sender.in_flight(), 0);
    assert_eq!(presenter.dismissals(), 1);
}

#[tokio::test]
async fn refused_connection_is_upload_failure() {
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let sender = sender_for(&uri, TrelloOptions::default());
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    let outcome = sender
        .send(fixtures::red_payload(10), Some(&presenter))
        .outcome()
        .await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed(SendError::UploadFailed { .. })
    ));
    assert_eq!(delegate.count(), 1);
}

#[tokio::test]
async fn error_status_counts_as_sent_by_default() {
    let server = MockServer::start().await;
    mount_cards(&server, 500).await;

    let sender = sender_for(&server.uri(), TrelloOptions::default());
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    let outcome = sender
        .send(fixtures::red_payload(10), Some(&presenter))
        .outcome()
        .await;

    assert_eq!(outcome, SubmissionOutcome::Succeeded(SendSuccess::Sent));
    assert!(delegate.wait_for(1, WAIT).await);
}

#[tokio::test]
async fn strict_policy_fails_on_error_status() {
    let server = MockServer::start().await;
    mount_cards(&server, 500).await;

    let options = TrelloOptions {
        status_policy: StatusPolicy::Strict,
        ..TrelloOptions::default()
    };
    let sender = sender_for(&server.uri(), options);
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    let outcome = sender
        .send(fixtures::red_payload(10), Some(&presenter))
        .outcome()
        .await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed(SendError::UploadFailed {
            status: Some(500),
            ..
        })
    ));
    assert!(delegate.wait_for(1, WAIT).await);
}

#[tokio::test]
async fn strict_policy_accepts_success_status() {
    let server = MockServer::start().await;
    mount_cards(&server, 200).await;

    let options = TrelloOptions {
        status_policy: StatusPolicy::Strict,
        ..TrelloOptions::default()
    };
    let sender = sender_for(&server.uri(), options);

    let outcome = sender.submit(&fixtures::red_payload(3)).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn legacy_framing_is_sent_verbatim() {
    let server = MockServer::start().await;
    mount_cards(&server, 200).await;

    let options = TrelloOptions {
        closing_framing: ClosingFraming::Legacy,
        ..TrelloOptions::default()
    };
    let sender = sender_for(&server.uri(), options);
    assert!(sender.submit(&fixtures::red_payload(3)).await.is_success());

    let requests = server.received_requests().await.unwrap();
    let body = &requests[0].body;
    assert!(body.ends_with(format!("\r\n--{BOUNDARY}").as_bytes()));
    assert!(!body.ends_with(b"--\r\n"));
}

#[tokio::test]
async fn dropped_delegate_is_not_notified() {
    let server = MockServer::start().await;
    mount_cards(&server, 200).await;

    let sender = sender_for(&server.uri(), TrelloOptions::default());
    let delegate = attach(&sender);
    let observer = Arc::downgrade(&delegate);
    drop(delegate);

    let presenter = MockPresenter::new();
    let outcome = sender
        .send(fixtures::red_payload(4), Some(&presenter))
        .outcome()
        .await;

    assert!(outcome.is_success());
    assert!(observer.upgrade().is_none());
    assert_eq!(sender.in_flight(), 0);
}

#[tokio::test]
async fn concurrent_sends_keep_their_own_payloads() {
    let server = MockServer::start().await;
    mount_cards(&server, 200).await;

    let sender = sender_for(&server.uri(), TrelloOptions::default());
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    let first = sender.send(fixtures::red_payload(4).with_text("first"), Some(&presenter));
    let second = sender.send(fixtures::red_payload(4).with_text("second"), Some(&presenter));

    assert!(first.outcome().await.is_success());
    assert!(second.outcome().await.is_success());
    assert!(delegate.wait_for(2, WAIT).await);

    let mut texts: Vec<String> = delegate
        .notifications()
        .into_iter()
        .filter_map(|n| match n {
            Notification::Sent { text, .. } => text,
            Notification::Failed { .. } => None,
        })
        .collect();
    texts.sort();
    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(presenter.dismissals(), 2);
    assert_eq!(sender.in_flight(), 0);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .any(|r| fixtures::contains(&r.body, b"name=\"desc\"\r\n\r\nfirst")));
}

#[tokio::test]
async fn exactly_one_notification_per_send() {
    let server = MockServer::start().await;
    mount_cards(&server, 201).await;

    let sender = sender_for(&server.uri(), TrelloOptions::default());
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    sender
        .send(fixtures::red_payload(4), Some(&presenter))
        .outcome()
        .await;
    assert!(delegate.wait_for(1, WAIT).await);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(delegate.count(), 1);
}

#[tokio::test]
async fn health_check_reflects_list_access() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/lists/123"))
        .and(query_param("key", "abc"))
        .and(query_param("token", "xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":\"123\"}"))
        .mount(&server)
        .await;

    let sender = sender_for(&server.uri(), TrelloOptions::default());
    assert_eq!(sender.health_check().await.unwrap(), HealthStatus::Healthy);

    let other = TrelloSender::new(
        TrelloCredentials::new("abc", "xyz", "999"),
        TrelloOptions {
            api_base_url: server.uri(),
            ..TrelloOptions::default()
        },
    )
    .unwrap();
    assert!(matches!(
        other.health_check().await.unwrap(),
        HealthStatus::Unhealthy(_)
    ));
}

struct PanickingDelegate;

impl SenderDelegate for PanickingDelegate {
    fn did_send(&self, _: &dyn FeedbackSender, _: &FeedbackPayload, _: SendSuccess) {
        panic!("delegate failure");
    }

    fn did_fail_to_send(&self, _: &dyn FeedbackSender, _: &FeedbackPayload, _: &SendError) {
        panic!("delegate failure");
    }
}

#[tokio::test]
async fn panicking_delegate_does_not_leak_in_flight_count() {
    let server = MockServer::start().await;
    mount_cards(&server, 200).await;

    let sender = sender_for(&server.uri(), TrelloOptions::default());
    let delegate: Arc<dyn SenderDelegate> = Arc::new(PanickingDelegate);
    sender.set_delegate(Arc::downgrade(&delegate));
    let presenter = MockPresenter::new();

    let outcome = sender
        .send(fixtures::red_payload(4), Some(&presenter))
        .outcome()
        .await;

    assert_eq!(outcome, SubmissionOutcome::Failed(SendError::Unknown));
    assert_eq!(sender.in_flight(), 0);
}

#[test]
fn send_without_runtime_reports_failure() {
    let sender = sender_for("http://127.0.0.1:9", TrelloOptions::default());
    let delegate = attach(&sender);
    let presenter = MockPresenter::new();

    let submission = sender.send(fixtures::red_payload(4), Some(&presenter));

    assert!(submission.is_finished());
    assert_eq!(presenter.dismissals(), 0);
    assert_eq!(sender.in_flight(), 0);
    assert_eq!(delegate.count(), 1);
    assert!(matches!(
        delegate.notifications()[0].error(),
        Some(SendError::UploadFailed { status: None, .. })
    ));
}
