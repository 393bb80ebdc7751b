// Integration tests for randuser-manager

use randuser_manager::GenerateError;
use randuser_manager::api::RandomUserClient;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(i: usize) -> Value {
    json!({
        "gender": if i % 2 == 0 { "female" } else { "male" },
        "name": { "title": "Mx", "first": format!("first{i}"), "last": format!("last{i}") },
        "location": {
            "street": { "number": 100 + i, "name": "Main Street" },
            "city": "Springfield",
            "state": "Oregon",
            "country": format!("Country{i}"),
            "postcode": 97477,
            "coordinates": { "latitude": "1.0", "longitude": "2.0" },
            "timezone": { "offset": "+1:00", "description": "CET" }
        },
        "email": format!("User{i}@Example.com"),
        "login": { "uuid": "x" },
        "dob": { "date": "1980-05-17T03:04:05.006Z", "age": 44 },
        "registered": { "date": "2010-01-01T00:00:00.000Z", "age": 14 },
        "phone": "(555) 010-0000",
        "cell": "(555) 010-0001",
        "picture": {
            "large": format!("https://randomuser.me/api/portraits/women/{i}.jpg"),
            "medium": "m.jpg",
            "thumbnail": "t.jpg"
        },
        "nat": "US"
    })
}

fn results_body(n: usize) -> Value {
    json!({
        "results": (0..n).map(user_json).collect::<Vec<_>>(),
        "info": { "seed": "abc", "results": n, "page": 1, "version": "1.4" }
    })
}

async fn mock_api(status: u16, body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> RandomUserClient {
    RandomUserClient::with_base_url(format!("{}/api/", server.uri())).expect("client")
}

// 1) Theme config roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    use randuser_manager::app::Theme;
    use std::time::{SystemTime, UNIX_EPOCH};

    let dir = std::env::temp_dir();
    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let path = dir.join(format!("rum_theme_{}_{}.conf", std::process::id(), nonce));

    let t = Theme::mocha();
    t.write_file(&path).expect("write theme");
    let t2 = Theme::from_file(&path).expect("read theme");
    assert_eq!(t.text, t2.text);
    assert_eq!(t.danger, t2.danger);
    assert_eq!(t.header_bg, t2.header_bg);

    let init_path = dir.join(format!("rum_theme_{}_{}_init.conf", std::process::id(), nonce));
    let _ = std::fs::remove_file(&init_path);
    let _created = Theme::load_or_init(&init_path);
    assert!(init_path.exists());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&init_path);
}

// 2) Keybindings written on first start load back identically
#[test]
fn keymap_init_and_reload() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use randuser_manager::app::keymap::{KeyAction, Keymap};
    use std::time::{SystemTime, UNIX_EPOCH};

    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let path = std::env::temp_dir().join(format!("rum_keys_{}_{}.conf", std::process::id(), nonce));
    let _ = std::fs::remove_file(&path);

    let km = Keymap::load_or_init(&path);
    assert!(path.exists());
    let reloaded = Keymap::from_file(&path).expect("read keymap");
    let mut a = km.all_bindings();
    let mut b = reloaded.all_bindings();
    a.sort_by_key(|((m, c), _)| format!("{m:?}{c:?}"));
    b.sort_by_key(|((m, c), _)| format!("{m:?}{c:?}"));
    assert_eq!(a, b);

    std::fs::write(&path, "Quit = Ctrl+x\n").unwrap();
    let custom = Keymap::load_or_init(&path);
    assert_eq!(
        custom.resolve(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
        Some(KeyAction::Quit)
    );

    let _ = std::fs::remove_file(&path);
}

// 3) Data source client against a mock API
#[tokio::test]
async fn fetch_sends_results_param_and_parses_users() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("results", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results_body(5)))
        .expect(1)
        .mount(&server)
        .await;

    let users = client_for(&server).fetch_users(5).await.expect("fetch");
    assert_eq!(users.len(), 5);
    assert_eq!(users[3].name.first, "first3");
    assert_eq!(users[3].location.street.number, "103");
    assert_eq!(users[3].location.postcode, "97477");
    assert_eq!(users[0].picture.large, "https://randomuser.me/api/portraits/women/0.jpg");
}

#[tokio::test]
async fn server_error_maps_to_http_error() {
    let server = mock_api(500, json!({ "error": "Uh oh, something has gone wrong." })).await;
    let err = client_for(&server).fetch_users(3).await.unwrap_err();
    assert_eq!(err, GenerateError::Http { status: 500 });
    assert_eq!(err.to_string(), "Failed to fetch data from API.");
}

#[tokio::test]
async fn missing_results_maps_to_schema_error() {
    let server = mock_api(200, json!({ "info": { "results": 0 } })).await;
    let err = client_for(&server).fetch_users(3).await.unwrap_err();
    assert_eq!(err, GenerateError::Schema);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    let err = client_for(&server).fetch_users(3).await.unwrap_err();
    assert_eq!(err, GenerateError::Schema);
}

#[tokio::test]
async fn connection_refused_maps_to_network_error() {
    // Grab a free port, then close it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = RandomUserClient::with_base_url(format!("http://127.0.0.1:{port}/api/")).unwrap();
    let err = client.fetch_users(2).await.unwrap_err();
    assert_eq!(err, GenerateError::Network);
    assert!(err.to_string().contains("internet connection"));
    assert_ne!(err.to_string(), GenerateError::Http { status: 500 }.to_string());
}

#[tokio::test]
async fn body_cut_off_mid_transfer_maps_to_network_error() {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        // Drain the request head so closing does not reset the connection.
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }
        // Promise 500 bytes, send a few, then hang up.
        let _ = stream.write_all(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\n\r\n{\"results\":[",
        );
        let _ = stream.flush();
    });

    let client = RandomUserClient::with_base_url(format!("http://127.0.0.1:{port}/api/")).unwrap();
    let err = client.fetch_users(2).await.unwrap_err();
    server.join().unwrap();
    assert_eq!(err, GenerateError::Network);
}

// 4) End to end: input "5" in last-name mode renders five rows
#[tokio::test]
async fn generate_five_users_in_last_name_mode() {
    use randuser_manager::app::{AppState, Theme};
    use randuser_manager::app::keymap::Keymap;
    use randuser_manager::format::DisplayMode;
    use std::time::Instant;

    let server = mock_api(200, results_body(5)).await;
    let client = client_for(&server);

    let mut app = AppState::new(Theme::dark(), Keymap::default(), DisplayMode::from_select_value("last_name"));
    app.count_input = "5".into();
    let ticket = app.submit_count(Instant::now()).expect("fetch requested");
    assert_eq!(ticket.count, 5);

    let result = client.fetch_users(ticket.count).await;
    app.apply_fetch(ticket.seq, result, Instant::now());

    assert_eq!(app.rows.len(), 5);
    for (i, row) in app.rows.iter().enumerate() {
        assert_eq!(row.name, format!("last{i}"));
        assert_eq!(row.gender, if i % 2 == 0 { "Female" } else { "Male" });
        assert_eq!(row.email, format!("User{i}@Example.com"));
        assert_eq!(row.country, format!("Country{i}"));
    }
    assert!(app.notifier.current().is_none());
}

#[tokio::test]
async fn connectivity_failure_shows_network_banner() {
    use randuser_manager::app::AppState;
    use randuser_manager::notify::Severity;
    use std::time::Instant;

    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = RandomUserClient::with_base_url(format!("http://127.0.0.1:{port}/")).unwrap();

    let mut app = AppState::default();
    app.count_input = "4".into();
    let ticket = app.submit_count(Instant::now()).unwrap();
    let result = client.fetch_users(ticket.count).await;
    app.apply_fetch(ticket.seq, result, Instant::now());

    let banner = app.notifier.current().expect("banner");
    assert_eq!(banner.severity, Severity::Danger);
    assert_eq!(banner.message, "Network error: Please check your internet connection.");
    assert!(app.rows.is_empty());
}

// 5) Rendering into a test backend
#[test]
fn renders_rows_and_detail_overlay() {
    use randuser_manager::app::AppState;
    use randuser_manager::ui;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    let users: Vec<_> = (0..3)
        .map(|i| serde_json::from_value(user_json(i)).unwrap())
        .collect();
    let mut app = AppState::default();
    app.store.replace_all(users);
    app.render_rows();

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| ui::render(f, &mut app)).unwrap();
    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(screen.contains("first1"));
    assert!(screen.contains("Country2"));
    assert!(screen.contains("Users (3)"));

    app.open_detail(1);
    terminal.draw(|f| ui::render(f, &mut app)).unwrap();
    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(screen.contains("Mx First1 Last1"));
    assert!(screen.contains("5/17/1980"));
    assert!(screen.contains("101 Main Street"));
}
