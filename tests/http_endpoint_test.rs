use anyhow::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wedding_rsvp::adapters::http::serve;
use wedding_rsvp::app::RsvpForm;
use wedding_rsvp::{
    Attendance, DrinkOption, GuestRecord, GuestView, LocalStorage, RsvpClient, RsvpService,
    SpreadsheetStore,
};

struct TestServer {
    url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<wedding_rsvp::Result<()>>,
    dir: TempDir,
}

impl TestServer {
    async fn start() -> Result<Self> {
        let dir = TempDir::new()?;
        let store = Arc::new(SpreadsheetStore::new(LocalStorage::new(dir.path())));
        store
            .write_guests(&[
                GuestRecord {
                    full_name: "Дмитрий Иванов".to_string(),
                    ..GuestRecord::new("ivanovs", "Дмитрий").with_partner("Мария", "Мария Иванова")
                },
                GuestRecord::new("anna", "Анна"),
            ])
            .await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/", listener.local_addr()?);
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, RsvpService::from_store(store), async {
            let _ = rx.await;
        }));

        Ok(Self {
            url,
            shutdown: Some(tx),
            handle,
            dir,
        })
    }

    async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await??;
        Ok(())
    }
}

#[tokio::test]
async fn test_get_guest() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(&server.url)
        .query(&[("guest", "ivanovs")])
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["guest"]["guest_id"], "ivanovs");
    assert_eq!(body["guest"]["invitation_type"], "couple");
    assert_eq!(body["guest"]["partner_full_name"], "Мария Иванова");
    assert_eq!(body["guest"]["show_alcohol"], true);
    assert_eq!(body["guest"]["rsvp_status"], "pending");

    server.stop().await
}

#[tokio::test]
async fn test_get_guest_errors() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let response = client.get(&server.url).send().await?;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "success": false, "error": "No guest ID provided" }));

    let response = client
        .get(&server.url)
        .query(&[("guest", "nobody")])
        .send()
        .await?;
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "success": false, "error": "Guest not found" }));

    server.stop().await
}

#[tokio::test]
async fn test_repeated_guest_parameter_uses_first() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}?guest=anna&guest=x", server.url))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["guest"]["guest_id"], "anna");

    let response = client
        .get(format!("{}?guest=x&guest=anna", server.url))
        .send()
        .await?;
    assert_eq!(response.status(), 404);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "success": false, "error": "Guest not found" }));

    let response = client
        .get(format!("{}?other=1", server.url))
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "success": false, "error": "No guest ID provided" }));

    server.stop().await
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let response = client
        .request(reqwest::Method::OPTIONS, &server.url)
        .header("Origin", "https://invite.example.org")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await?;
    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let methods = response.headers()["access-control-allow-methods"].to_str()?;
    assert!(methods.contains("POST"));

    let response = client
        .get(&server.url)
        .query(&[("guest", "anna")])
        .header("Origin", "https://invite.example.org")
        .send()
        .await?;
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    server.stop().await
}

#[tokio::test]
async fn test_post_response() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(&server.url)
        .json(&json!({
            "guest_id": "anna",
            "name": "Анна",
            "attendance": "Приду",
            "dietary": "без глютена",
            "drinks": { "champagne_brut": true }
        }))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "success": true }));

    let responses = std::fs::read_to_string(server.dir.path().join("Responses.csv"))?;
    assert!(responses.contains("anna,Анна,Приду,без глютена,"));
    let guests = std::fs::read_to_string(server.dir.path().join("Guests.csv"))?;
    assert!(guests.contains("responded"));

    server.stop().await
}

#[tokio::test]
async fn test_post_malformed_body() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(&server.url)
        .header("Content-Type", "application/json")
        .body(r#"{"guest_id": "anna", "attendance": "может быть"}"#)
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
    assert!(!server.dir.path().join("Responses.csv").exists());

    server.stop().await
}

#[tokio::test]
async fn test_client_round_trip_against_server() -> Result<()> {
    let server = TestServer::start().await?;
    let client = RsvpClient::new(server.url.clone())?;

    assert!(client.fetch_guest("nobody").await?.is_none());

    let guest = client.fetch_guest("ivanovs").await?.expect("guest exists");
    let view = GuestView::new(Some(&guest));
    assert_eq!(view.greeting(), "Дмитрий и Мария, привет!");

    let mut form = RsvpForm::new();
    form.on_guest_loaded(&view);
    assert!(form.is_form_visible());
    form.attendance = Some(Attendance::AttendingWithPartner);
    form.drinks.set(DrinkOption::Whiskey, true);
    form.partner_drinks.set(DrinkOption::WineWhiteDry, true);

    let submission = form.build_submission(&view).expect("attendance chosen");
    client.submit(&submission).await?;

    let guest = client.fetch_guest("ivanovs").await?.expect("guest exists");
    let view = GuestView::new(Some(&guest));
    assert!(view.has_responded());

    let mut form = RsvpForm::new();
    form.on_guest_loaded(&view);
    assert!(!form.is_form_visible());

    let responses = std::fs::read_to_string(server.dir.path().join("Responses.csv"))?;
    assert!(responses.contains("ivanovs_partner,Мария Иванова,Приду (партнёр)"));

    server.stop().await
}
