//! End-to-end tests for submit -> transport -> session resolution.

use facemap_shared::session::GENERIC_FAILURE_MESSAGE;
use facemap_shared::upload::MAX_UPLOAD_BYTES;
use facemap_shared::{
    AnalysisResult, AnalysisTransport, ApiConfig, ImageSource, NotificationKind, RequestState,
    TransportError, UploadController, UploadRequest, ValidationError,
};
use futures::channel::oneshot;
use futures::executor::{block_on, LocalPool};
use futures::task::LocalSpawnExt;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

type Reply = Result<AnalysisResult, TransportError>;

#[derive(Debug, Clone)]
struct InMemoryImage {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl InMemoryImage {
    fn png(name: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            mime_type: "image/png".to_string(),
            bytes: bytes.to_vec(),
        }
    }
}

impl ImageSource for InMemoryImage {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SentRequest {
    endpoint: String,
    file_name: String,
    body: Vec<u8>,
}

/// Records every request and answers each one from a per-file channel, so a
/// test decides when (and in which order) responses arrive.
#[derive(Default)]
struct ScriptedTransport {
    sent: Rc<RefCell<Vec<SentRequest>>>,
    replies: RefCell<HashMap<String, oneshot::Receiver<Reply>>>,
}

impl ScriptedTransport {
    fn expect(&self, file_name: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().insert(file_name.to_string(), rx);
        tx
    }
}

impl AnalysisTransport for ScriptedTransport {
    type File = InMemoryImage;

    fn analyze(
        &self,
        endpoint: &str,
        request: UploadRequest<InMemoryImage>,
    ) -> impl Future<Output = Reply> {
        let file = request.into_file();
        let reply = self.replies.borrow_mut().remove(&file.name);
        self.sent.borrow_mut().push(SentRequest {
            endpoint: endpoint.to_string(),
            file_name: file.name,
            body: file.bytes,
        });

        async move {
            match reply {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(TransportError::Network("reply dropped".to_string()))),
                None => Err(TransportError::Network("no scripted reply".to_string())),
            }
        }
    }
}

fn controller() -> (UploadController<ScriptedTransport>, Rc<RefCell<Vec<SentRequest>>>) {
    let transport = ScriptedTransport::default();
    let sent = Rc::clone(&transport.sent);
    let config = ApiConfig::new("http://analysis.test:5000").unwrap();
    (UploadController::new(transport, config), sent)
}

fn result(value: serde_json::Value) -> AnalysisResult {
    serde_json::from_value(value).unwrap()
}

#[test]
fn rejected_files_are_never_sent() {
    let (controller, sent) = controller();

    let gif = InMemoryImage {
        name: "anim.gif".to_string(),
        mime_type: "image/gif".to_string(),
        bytes: vec![1, 2, 3],
    };
    assert!(matches!(
        controller.submit(gif),
        Err(ValidationError::UnsupportedType { .. })
    ));

    let huge = InMemoryImage::png("huge.png", &vec![0u8; MAX_UPLOAD_BYTES as usize + 1]);
    assert!(matches!(
        controller.submit(huge),
        Err(ValidationError::TooLarge { .. })
    ));

    assert!(sent.borrow().is_empty());
    assert_eq!(*controller.state(), RequestState::Idle);
}

#[test]
fn accepted_file_sends_one_request_with_its_bytes() {
    let (controller, sent) = controller();
    let tx = controller_transport_reply(&controller, "face.png");
    tx.send(Ok(result(json!({"expressions": {"happy": 0.8}}))))
        .unwrap();

    let pending = controller
        .submit(InMemoryImage::png("face.png", b"\x89PNG-bytes"))
        .unwrap();
    assert!(controller.state().is_uploading());

    let state = block_on(pending);

    assert!(matches!(state, RequestState::Succeeded(_)));
    assert_eq!(
        *sent.borrow(),
        vec![SentRequest {
            endpoint: "http://analysis.test:5000/analyze-face".to_string(),
            file_name: "face.png".to_string(),
            body: b"\x89PNG-bytes".to_vec(),
        }]
    );
    assert_eq!(
        controller.notification().map(|n| n.kind),
        Some(NotificationKind::Success)
    );
}

#[test]
fn later_submission_wins_even_when_earlier_reply_arrives_last() {
    let (controller, sent) = controller();
    let tx_a = controller_transport_reply(&controller, "a.png");
    let tx_b = controller_transport_reply(&controller, "b.png");

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    let a = controller.submit(InMemoryImage::png("a.png", b"aaaa")).unwrap();
    spawner.spawn_local(async move {
        a.await;
    })
    .unwrap();
    let b = controller.submit(InMemoryImage::png("b.png", b"bbbb")).unwrap();
    spawner.spawn_local(async move {
        b.await;
    })
    .unwrap();

    pool.run_until_stalled();
    assert_eq!(sent.borrow().len(), 2);
    assert!(controller.state().is_uploading());

    let from_b = result(json!({"expressions": {"sad": 0.6}}));
    tx_b.send(Ok(from_b.clone())).unwrap();
    pool.run_until_stalled();
    assert_eq!(*controller.state(), RequestState::Succeeded(from_b.clone()));

    tx_a.send(Ok(result(json!({"expressions": {"happy": 0.9}}))))
        .unwrap();
    pool.run_until_stalled();
    assert_eq!(*controller.state(), RequestState::Succeeded(from_b));
}

#[test]
fn stale_failure_does_not_clobber_newer_upload() {
    let (controller, _sent) = controller();
    let tx_a = controller_transport_reply(&controller, "a.png");
    let _tx_b = controller_transport_reply(&controller, "b.png");

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    let a = controller.submit(InMemoryImage::png("a.png", b"a")).unwrap();
    spawner.spawn_local(async move {
        a.await;
    })
    .unwrap();
    let b = controller.submit(InMemoryImage::png("b.png", b"b")).unwrap();
    spawner.spawn_local(async move {
        b.await;
    })
    .unwrap();

    tx_a.send(Err(TransportError::Status { status: 500, body: "boom".to_string() }))
        .unwrap();
    pool.run_until_stalled();

    assert!(controller.state().is_uploading());
    assert!(controller.notification().is_none());
}

#[test]
fn transport_failure_shows_generic_message() {
    let (controller, _sent) = controller();
    let tx = controller_transport_reply(&controller, "face.jpg");
    tx.send(Err(TransportError::Decode("expected value at line 1 column 1".to_string())))
        .unwrap();

    let image = InMemoryImage {
        name: "face.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        bytes: vec![0xff, 0xd8, 0xff],
    };
    let state = block_on(controller.submit(image).unwrap());

    assert_eq!(state, RequestState::Failed(GENERIC_FAILURE_MESSAGE.to_string()));
    let notification = controller.notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(!notification.message.contains("line 1"));
}

#[test]
fn reset_ignores_reply_still_in_flight() {
    let (controller, _sent) = controller();
    let tx = controller_transport_reply(&controller, "face.png");

    let mut pool = LocalPool::new();
    let pending = controller.submit(InMemoryImage::png("face.png", b"x")).unwrap();
    pool.spawner()
        .spawn_local(async move {
            pending.await;
        })
        .unwrap();
    pool.run_until_stalled();

    controller.reset();
    tx.send(Ok(result(json!({"expressions": {"happy": 1.0}}))))
        .unwrap();
    pool.run_until_stalled();

    assert_eq!(*controller.state(), RequestState::Idle);
    assert!(controller.notification().is_none());
}

#[test]
fn soft_error_payload_is_a_success_without_toast() {
    let (controller, _sent) = controller();
    let tx = controller_transport_reply(&controller, "face.png");
    tx.send(Ok(result(json!({"message": "No face detected"}))))
        .unwrap();

    let state = block_on(controller.submit(InMemoryImage::png("face.png", b"x")).unwrap());

    match state {
        RequestState::Succeeded(body) => assert_eq!(body.error_message(), Some("No face detected")),
        other => panic!("unexpected state {:?}", other),
    }
    assert!(controller.notification().is_none());
}

fn controller_transport_reply(
    controller: &UploadController<ScriptedTransport>,
    file_name: &str,
) -> oneshot::Sender<Reply> {
    controller.transport().expect(file_name)
}
