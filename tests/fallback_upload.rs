//! Fallback-mode integration tests: hidden frame submissions

mod common;

use common::{no_form_data, recorder, MockFile, MockHost};
use serde_json::json;
use upload_widgets::{
    Capabilities, DragEventKind, DropOutcome, StateClass, SubmitOutcome, Submission,
    UploadController, UploadError, UploadMode, UploadOptions, UploadState, FRAME_NAME_PREFIX,
};

fn bind(host: MockHost, options: UploadOptions) -> UploadController<MockHost> {
    UploadController::bind(host, &no_form_data(), options).expect("bind should succeed")
}

fn start(controller: &UploadController<MockHost>) -> String {
    match controller.prepare_submit() {
        Submission::Native { frame_name } => frame_name,
        other => panic!("Expected a native submission, got: {:?}", other),
    }
}

#[test]
fn test_missing_feature_selects_fallback() {
    let controller = bind(MockHost::new(), UploadOptions::new());
    assert_eq!(controller.mode(), UploadMode::Fallback);
    assert!(!controller.host().class(StateClass::Advanced));

    let no_reader = Capabilities {
        file_reader: false,
        ..common::advanced()
    };
    let controller =
        UploadController::bind(MockHost::new(), &no_reader, UploadOptions::new()).unwrap();
    assert_eq!(controller.mode(), UploadMode::Fallback);
}

#[test]
fn test_submission_targets_fresh_frame() {
    let _ = env_logger::try_init();

    let controller = bind(MockHost::new(), UploadOptions::new());
    let frame_name = start(&controller);

    assert!(frame_name.starts_with(FRAME_NAME_PREFIX));
    assert!(frame_name[FRAME_NAME_PREFIX.len()..]
        .chars()
        .all(|c| c.is_ascii_digit()));

    let host = controller.host();
    assert_eq!(*host.frames.borrow(), vec![frame_name.clone()]);
    assert_eq!(host.target.borrow().as_deref(), Some(frame_name.as_str()));
    assert!(host.class(StateClass::Uploading));
    assert_eq!(controller.active_frame(), Some(frame_name));
    assert_eq!(host.sent_count(), 0);
}

#[test]
fn test_native_submission_is_not_prevented() {
    let controller = bind(MockHost::new(), UploadOptions::new());
    assert!(!controller.prepare_submit().prevents_native_submit());
}

#[test]
fn test_successful_frame_marks_success() {
    let (calls, callback) = recorder();
    let controller = bind(MockHost::new(), UploadOptions::new().on_complete(callback));
    let frame_name = start(&controller);

    let outcome = controller
        .on_frame_load(&frame_name, "  {\"success\": true, \"id\": 3}\n")
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.payload, Some(json!({"success": true, "id": 3})));

    let host = controller.host();
    assert!(host.class(StateClass::Success));
    assert!(!host.class(StateClass::Error));
    assert!(!host.class(StateClass::Uploading));
    assert!(host.target.borrow().is_none());
    assert!(host.frames.borrow().is_empty());
    assert_eq!(*host.removed_frames.borrow(), vec![frame_name]);
    assert_eq!(controller.state(), UploadState::Idle);

    // the callback is reserved for the advanced strategy unless opted in
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_failed_frame_marks_error() {
    let controller = bind(MockHost::new(), UploadOptions::new());
    let frame_name = start(&controller);

    let outcome = controller
        .on_frame_load(&frame_name, r#"{"success": "yes"}"#)
        .unwrap();
    assert!(!outcome.success);
    assert!(controller.host().class(StateClass::Error));
    assert!(!controller.host().class(StateClass::Success));
}

#[test]
fn test_notify_in_fallback_invokes_callback() {
    let (calls, callback) = recorder();
    let options = UploadOptions::new()
        .on_complete(callback)
        .notify_in_fallback(true);
    let controller = bind(MockHost::new(), options);
    let frame_name = start(&controller);

    controller
        .on_frame_load(&frame_name, r#"{"success": false}"#)
        .unwrap();
    assert_eq!(*calls.borrow(), vec![json!({"success": false})]);
}

#[test]
fn test_malformed_body_settles_with_error() {
    let _ = env_logger::try_init();

    let (calls, callback) = recorder();
    let options = UploadOptions::new()
        .on_complete(callback)
        .notify_in_fallback(true);
    let controller = bind(MockHost::new(), options);
    let frame_name = start(&controller);

    let result = controller.on_frame_load(&frame_name, "<html>Internal Server Error</html>");
    assert!(matches!(result, Err(UploadError::Json(_))));

    let host = controller.host();
    assert!(host.class(StateClass::Error));
    assert!(!host.class(StateClass::Uploading));
    assert!(host.frames.borrow().is_empty());
    assert!(calls.borrow().is_empty());
    assert_eq!(controller.state(), UploadState::Idle);
}

#[test]
fn test_next_submission_clears_previous_result() {
    let controller = bind(MockHost::new(), UploadOptions::new());
    let frame_name = start(&controller);
    controller
        .on_frame_load(&frame_name, r#"{"success": true}"#)
        .unwrap();
    assert!(controller.host().class(StateClass::Success));

    start(&controller);
    assert!(!controller.host().class(StateClass::Success));
    assert!(!controller.host().class(StateClass::Error));
    assert!(controller.host().class(StateClass::Uploading));
}

#[test]
fn test_single_flight_until_frame_loads() {
    let controller = bind(MockHost::new(), UploadOptions::new());
    let frame_name = start(&controller);

    assert!(matches!(controller.prepare_submit(), Submission::Rejected));
    assert_eq!(controller.host().frames.borrow().len(), 1);

    controller
        .on_frame_load(&frame_name, r#"{"success": true}"#)
        .unwrap();
    start(&controller);
}

#[test]
fn test_timeout_settles_and_late_load_is_unexpected() {
    let _ = env_logger::try_init();

    let controller = bind(MockHost::new(), UploadOptions::new().frame_timeout(Some(30)));
    let frame_name = start(&controller);

    controller.on_frame_timeout(&frame_name).unwrap();
    let host = controller.host();
    assert!(host.class(StateClass::Error));
    assert!(!host.class(StateClass::Uploading));
    assert!(host.target.borrow().is_none());
    assert!(host.frames.borrow().is_empty());
    assert!(controller.active_frame().is_none());

    match controller.on_frame_load(&frame_name, r#"{"success": true}"#) {
        Err(UploadError::UnexpectedFrame { name }) => assert_eq!(name, frame_name),
        other => panic!("Expected an unexpected frame error, got: {:?}", other),
    }
    assert!(!host.class(StateClass::Success));
}

#[test]
fn test_stale_timeout_is_rejected() {
    let controller = bind(MockHost::new(), UploadOptions::new());
    let frame_name = start(&controller);
    controller
        .on_frame_load(&frame_name, r#"{"success": true}"#)
        .unwrap();

    assert!(controller.on_frame_timeout(&frame_name).is_err());
    assert!(controller.host().class(StateClass::Success));
    assert!(!controller.host().class(StateClass::Error));
}

#[test]
fn test_frame_creation_failure_aborts() {
    let host = MockHost::new();
    host.fail_frames.set(true);
    let controller = bind(host, UploadOptions::new());

    match controller.prepare_submit() {
        Submission::Aborted(UploadError::Dom { .. }) => {}
        other => panic!("Expected an aborted submission, got: {:?}", other),
    }
    assert!(!controller.is_uploading());
    assert!(controller.host().target.borrow().is_none());
}

#[test]
fn test_oversized_file_aborts_before_frame() {
    let host = MockHost::new();
    host.select(MockFile::new("archive.zip", 2_000));
    let controller = bind(host, UploadOptions::new().max_size(1_000));

    let submission = controller.prepare_submit();
    assert!(matches!(
        submission,
        Submission::Aborted(UploadError::FileTooLarge { .. })
    ));
    assert!(submission.prevents_native_submit());

    let host = controller.host();
    assert!(host.frames.borrow().is_empty());
    assert_eq!(host.surface.attach_count(), 1);
    assert!(!host.class(StateClass::Uploading));
}

#[tokio::test]
async fn test_submit_reports_pending_frame() {
    let controller = bind(MockHost::new(), UploadOptions::new());
    match controller.submit().await {
        SubmitOutcome::Pending { frame_name } => {
            assert_eq!(controller.active_frame(), Some(frame_name))
        }
        other => panic!("Expected a pending submission, got: {:?}", other),
    }
}

#[test]
fn test_drag_events_are_not_wired() {
    let controller = bind(MockHost::new(), UploadOptions::new());

    controller.on_drag(DragEventKind::DragOver);
    assert!(!controller.host().class(StateClass::Dragover));

    assert!(matches!(
        controller.on_drop(vec![MockFile::new("photo.jpg", 1)]),
        DropOutcome::Ignored
    ));
    assert_eq!(controller.host().submit_requests.get(), 0);
}
