//! # calcline Integration Tests
//!
//! Drive the real `AppController` with mock terminal streams against a
//! wiremock calculation service. No TTY is needed.
//!
//! ```bash
//! cargo test --test integration_tests
//! CALCLINE_LOG_LEVEL=debug cargo test --test integration_tests -- --nocapture
//! ```

use calcline::cmd_args::CommandLineArgs;
use calcline::config::PROFILE_PATH_ENV_VAR;
use calcline::io::{MockEventStream, MockRenderStream, RenderCommand};
use calcline::profile::get_blank_profile;
use calcline::{AppController, BackendStatus};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::Once;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestController = AppController<MockEventStream, MockRenderStream>;

static TRACING: Once = Once::new();

/// Initialize tracing with configurable log level
fn init_tracing() {
    TRACING.call_once(|| {
        let level = match std::env::var("CALCLINE_LOG_LEVEL")
            .unwrap_or_else(|_| "error".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            _ => tracing::Level::ERROR,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn controller_for(server: &MockServer) -> (TestController, MockRenderStream) {
    init_tracing();
    let render_stream = MockRenderStream::new();
    let observer = render_stream.clone();
    let profile = get_blank_profile().with_server(server.uri());
    let controller =
        AppController::with_profile(profile, MockEventStream::empty(), render_stream).unwrap();
    (controller, observer)
}

fn key(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
}

fn ctrl_c() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

async fn type_keys(controller: &mut TestController, keys: &str) {
    for ch in keys.chars() {
        controller.process_event(key(ch)).unwrap();
    }
    controller.wait_for_idle().await.unwrap();
}

fn calculation(a: f64, b: f64, operation: &str, result: f64) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/calculate"))
        .and(body_json(serde_json::json!({"a": a, "b": b, "operation": operation})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": result,
            "operation": operation,
            "a": a,
            "b": b
        })))
}

#[tokio::test]
async fn chained_operations_should_reach_service_in_order() {
    let server = MockServer::start().await;
    calculation(2.0, 3.0, "add", 5.0)
        .expect(1)
        .mount(&server)
        .await;
    calculation(5.0, 4.0, "add", 9.0)
        .expect(1)
        .mount(&server)
        .await;
    let (mut controller, observer) = controller_for(&server);

    // '4' and '=' arrive while 2 + 3 is still in flight
    type_keys(&mut controller, "2+3+4=").await;

    assert_eq!(controller.view_model().display_text(), "9");
    assert!(!controller.view_model().is_calculating());
    assert!(observer.get_buffer_string().contains('9'));

    let requests = server.received_requests().await.unwrap();
    let bodies: Vec<serde_json::Value> = requests
        .iter()
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect();
    assert_eq!(
        bodies,
        vec![
            serde_json::json!({"a": 2.0, "b": 3.0, "operation": "add"}),
            serde_json::json!({"a": 5.0, "b": 4.0, "operation": "add"}),
        ]
    );
}

#[tokio::test]
async fn decimal_operands_should_be_sent_as_numbers() {
    let server = MockServer::start().await;
    calculation(1.5, 2.0, "multiply", 3.0)
        .expect(1)
        .mount(&server)
        .await;
    let (mut controller, _) = controller_for(&server);

    type_keys(&mut controller, "1.5*2").await;
    controller
        .process_event(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
        .unwrap();
    controller.wait_for_idle().await.unwrap();

    assert_eq!(controller.view_model().display_text(), "3");
}

#[tokio::test]
async fn unavailable_backend_should_show_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": "Backend service unavailable",
            "details": "Cannot connect to calculation service"
        })))
        .mount(&server)
        .await;
    let (mut controller, _) = controller_for(&server);

    type_keys(&mut controller, "2+3=").await;

    assert_eq!(controller.view_model().display_text(), "Error");
    assert_eq!(
        controller.view_model().status_line().backend_status(),
        &BackendStatus::Failed("Backend service unavailable".to_string())
    );
}

#[tokio::test]
async fn rejected_calculation_should_recover_on_next_digit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "result": 0,
            "operation": "divide",
            "error": "division by zero"
        })))
        .mount(&server)
        .await;
    let (mut controller, _) = controller_for(&server);

    type_keys(&mut controller, "5/0=").await;
    assert_eq!(controller.view_model().display_text(), "Error");

    type_keys(&mut controller, "7").await;
    assert_eq!(controller.view_model().display_text(), "7");
}

#[tokio::test]
async fn equals_without_pending_operation_should_not_call_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (mut controller, _) = controller_for(&server);

    type_keys(&mut controller, "42==").await;

    assert_eq!(controller.view_model().display_text(), "42");
}

#[tokio::test]
async fn clear_should_reset_display() {
    let server = MockServer::start().await;
    calculation(6.0, 3.0, "divide", 2.0).mount(&server).await;
    let (mut controller, _) = controller_for(&server);

    type_keys(&mut controller, "6/3=").await;
    assert_eq!(controller.view_model().display_text(), "2");

    type_keys(&mut controller, "c").await;

    assert_eq!(controller.view_model().display_text(), "0");
    assert!(controller.view_model().pending_expression().is_none());
}

#[tokio::test]
async fn run_should_restore_terminal_on_quit() {
    init_tracing();
    let server = MockServer::start().await;
    let render_stream = MockRenderStream::new();
    let observer = render_stream.clone();
    let events = MockEventStream::new(vec![key('1'), key('2'), ctrl_c()]);
    let profile = get_blank_profile().with_server(server.uri());
    let mut controller = AppController::with_profile(profile, events, render_stream).unwrap();

    controller.run().await.unwrap();

    assert!(controller.should_quit());
    assert_eq!(controller.view_model().display_text(), "12");
    let commands = observer.get_commands();
    assert_eq!(commands.first(), Some(&RenderCommand::GetSize));
    assert!(observer.has_command(&RenderCommand::EnableMouseCapture));
    assert!(observer.has_command(&RenderCommand::LeaveAlternateScreen));
    assert!(!observer.is_raw_mode());
}

#[tokio::test]
async fn server_flag_should_override_profile() {
    init_tracing();
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let profile_path = dir.path().join("profile");
    std::fs::write(&profile_path, "[default]\nserver = http://wrong.invalid\n").unwrap();
    std::env::set_var(PROFILE_PATH_ENV_VAR, &profile_path);

    let uri = server.uri();
    let cmd_args = CommandLineArgs::parse_from(["calcline", "--server", uri.as_str()]);
    let controller = AppController::with_io_streams(
        cmd_args,
        MockEventStream::empty(),
        MockRenderStream::new(),
    )
    .unwrap();

    std::env::remove_var(PROFILE_PATH_ENV_VAR);
    assert_eq!(controller.view_model().status_line().server(), uri);
}
