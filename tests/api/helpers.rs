//! tests/api/helpers.rs

use newsletter::configuration::{get_configuration, Settings};
use newsletter::form::SubscriptionForm;
use newsletter::notify::{Notification, Toaster};
use newsletter::startup::build;
use newsletter::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // Set TEST_LOG=true to see logs during tests
    // $ TEST_LOG=true cargo test | bunyan
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub const SUBSCRIBE_PATH: &str = "/api/subscribe.json";

pub struct Test {
    pub form: SubscriptionForm<Arc<Toaster>>,
    pub toaster: Arc<Toaster>,
    pub server: MockServer,
}

impl Test {
    pub fn fill(&self, name: &str, email: &str) {
        self.form.set_name(name);
        self.form.set_email(email);
    }

    pub fn toasts(&self) -> Vec<Notification> {
        self.toaster.visible()
    }

    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("Body was not JSON"))
            .collect()
    }
}

/// The shipped configuration, pointed at `base_url`.
pub fn settings(base_url: String) -> Settings {
    let mut config = get_configuration().expect("Failed to read configuration.");
    config.subscribe.base_url = base_url;
    config
}

pub async fn setup() -> Test {
    Lazy::force(&TRACING);

    let server = MockServer::start().await;
    let config = settings(server.uri());
    let toaster = Arc::new(Toaster::new(config.toast));
    let form = build(&config, Arc::clone(&toaster)).expect("Failed to build the form.");

    Test {
        form,
        toaster,
        server,
    }
}

/// A form pointed at a port nobody listens on.
pub fn setup_unreachable() -> (SubscriptionForm<Arc<Toaster>>, Arc<Toaster>) {
    Lazy::force(&TRACING);

    let address = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let config = settings(format!("http://{}", address));
    let toaster = Arc::new(Toaster::new(config.toast));
    let form = build(&config, Arc::clone(&toaster)).expect("Failed to build the form.");

    (form, toaster)
}

/// In-memory log sink. Hand it to `get_subscriber` and read back the
/// bunyan JSON lines.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn events(&self) -> Vec<serde_json::Value> {
        let buffer = self.0.lock().unwrap();
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub fn subscribed(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": message }))
}

pub async fn mount_subscribed(server: &MockServer, message: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(SUBSCRIBE_PATH))
        .respond_with(subscribed(message))
        .expect(times)
        .mount(server)
        .await;
}
