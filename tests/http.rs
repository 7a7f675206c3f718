use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const STATS_FIXTURE: &str = r#"{
  "_adminStats": {
    "totalBookings": 8,
    "bookingsByDay": {"Monday": 3, "Tuesday": 0, "Wednesday": 5},
    "bookingsByCategory": {},
    "bookingsOverTime": {"v1": 1, "v2": 7}
  },
  "_statsData": {
    "categoryBreakdown": {"BJJ": 4, "YOGA": 1}
  }
}"#;

#[derive(Debug, Deserialize)]
struct ContentResponse {
    key: String,
    html: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn write_stats_fixture() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("jarnvilja_http_{}_{}.json", std::process::id(), nanos));
    std::fs::write(&path, STATS_FIXTURE).expect("write stats fixture");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let stats_path = write_stats_fixture();
    let child = Command::new(env!("CARGO_BIN_EXE_jarnvilja_web"))
        .env("PORT", port.to_string())
        .env("APP_STATS_PATH", stats_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_charts_follow_aggregate_order() {
    let server = shared_server().await;
    let charts: Value = Client::new()
        .get(format!("{}/api/charts", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let mounts: Vec<&str> = charts
        .as_array()
        .unwrap()
        .iter()
        .map(|chart| chart["mountId"].as_str().unwrap())
        .collect();
    assert_eq!(mounts, vec!["adminDayChart", "adminTimeChart", "categoryChart"]);

    let day = &charts[0]["config"];
    assert_eq!(day["type"], "bar");
    assert_eq!(day["data"]["labels"], serde_json::json!(["Monday", "Tuesday", "Wednesday"]));
    assert_eq!(day["data"]["datasets"][0]["data"], serde_json::json!([3, 0, 5]));
    assert_eq!(
        day["data"]["datasets"][0]["backgroundColor"],
        serde_json::json!(["#42a5f5", "#66bb6a", "#ffa726"])
    );

    let categories = &charts[2]["config"];
    assert_eq!(categories["type"], "doughnut");
    assert_eq!(
        categories["data"]["datasets"][0]["backgroundColor"],
        serde_json::json!(["#42a5f5", "#90caf9"])
    );
}

#[tokio::test]
async fn http_content_resolves_with_fallback() {
    let server = shared_server().await;
    let client = Client::new();

    let leif: ContentResponse = client
        .get(format!("{}/api/content/trainers/leif", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(leif.key, "leif");
    assert!(leif.html.contains("Leif"));

    let unknown: ContentResponse = client
        .get(format!("{}/api/content/memberships/guldkort", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unknown.html, "<p>Ingen information tillgänglig.</p>");

    let missing = client
        .get(format!("{}/api/content/prices/leif", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_index_mounts_loaded_charts() {
    let server = shared_server().await;
    let page = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(page.contains("<canvas id=\"adminDayChart\">"));
    assert!(page.contains("window._adminStats"));
    assert!(!page.contains("<canvas id=\"adminCatChart\">"));
}
