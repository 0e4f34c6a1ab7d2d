use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::http::StatusCode;
use usersearch_rs::User;
use usersearch_server::api::AppState;
use usersearch_server::dataset::{Dataset, UserSource};
use usersearch_server::scenario::{Scenario, ScenarioTable};

pub const ACCESS_TOKEN: &str = "Test";

/// Dataset wrapper counting how many searches reached it
pub struct CountingSource {
    inner: Dataset,
    hits: AtomicUsize,
}

impl CountingSource {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl UserSource for CountingSource {
    fn users(&self) -> &[User] {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.inner.users()
    }
}

pub fn load_users() -> Vec<User> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/users.json");
    Dataset::load(path).unwrap().users().to_vec()
}

pub struct TestServer {
    pub url: String,
    pub source: Arc<CountingSource>,
}

/// Start the reference server on an ephemeral port
pub fn spawn_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind test listener");
    let port = listener.local_addr().unwrap().port();

    let source = Arc::new(CountingSource {
        inner: Dataset::new(load_users()),
        hits: AtomicUsize::new(0),
    });
    let scenarios =
        ScenarioTable::standard().with("redirect", Scenario::Status(StatusCode::FOUND));
    let state = AppState::new(source.clone(), ACCESS_TOKEN).with_scenarios(scenarios);

    let server = usersearch_server::serve(listener, state).expect("failed to start server");
    tokio::spawn(server);

    TestServer {
        url: format!("http://127.0.0.1:{}", port),
        source,
    }
}
