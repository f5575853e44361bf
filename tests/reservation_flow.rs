//! End-to-end reservation flow
//!
//! Real gateway router and real HTTP clients against an in-process stand-in
//! for the reservation, library and rating services.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use library_gateway::config::ServicesConfig;
use library_gateway::gateway;
use library_gateway::library::LibraryCoordinator;
use serde_json::{Value, json};
use tokio::net::TcpListener;

const BOOK_UID: &str = "f7cdc58f-2caf-4b15-9727-f89dcc629b27";
const LIBRARY_UID: &str = "83575e12-7ce0-48ee-9931-51919ff3c9ee";

// ============================================================================
// Backend stand-in
// ============================================================================

#[derive(Default)]
struct Backends {
    reservations: Mutex<Vec<Value>>,
    stars: Mutex<HashMap<String, i64>>,
    available: Mutex<i64>,
    rating_down: Mutex<bool>,
}

type Shared = Arc<Backends>;

fn header_user(headers: &HeaderMap) -> String {
    headers
        .get("x-user-name")
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .unwrap_or_default()
        .to_string()
}

/// Values of a repeated query parameter
fn repeated(query: &Option<String>, name: &str) -> Vec<String> {
    query
        .as_deref()
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
        .collect()
}

async fn by_user(
    State(b): State<Shared>,
    Path(username): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let status = q.get("status").cloned().unwrap_or_default();
    let found: Vec<Value> = b
        .reservations
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r["username"] == username.as_str() && r["status"] == status.as_str())
        .cloned()
        .collect();
    if found.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(found).into_response()
    }
}

async fn get_reservation(State(b): State<Shared>, Path(uid): Path<String>) -> Response {
    match b
        .reservations
        .lock()
        .unwrap()
        .iter()
        .find(|r| r["reservationUid"] == uid.as_str())
    {
        Some(r) => Json(r.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "reservation not found"})),
        )
            .into_response(),
    }
}

async fn create_reservation(
    State(b): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let created = json!({
        "reservationUid": uuid::Uuid::new_v4().to_string(),
        "username": header_user(&headers),
        "bookUid": body["bookUid"],
        "libraryUid": body["libraryUid"],
        "status": "RENTED",
        "startDate": "2026-10-16",
        "tillDate": body["tillDate"],
    });
    b.reservations.lock().unwrap().push(created.clone());
    Json(created)
}

async fn update_status(
    State(b): State<Shared>,
    Path(uid): Path<String>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> StatusCode {
    let user = header_user(&headers);
    let mut reservations = b.reservations.lock().unwrap();
    match reservations
        .iter_mut()
        .find(|r| r["reservationUid"] == uid.as_str() && r["username"] == user.as_str())
    {
        Some(r) => {
            r["status"] = json!(q.get("status").cloned().unwrap_or_default());
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn books(RawQuery(q): RawQuery) -> Json<Value> {
    let data: Vec<Value> = repeated(&q, "bookUids")
        .into_iter()
        .filter(|uid| uid == BOOK_UID)
        .map(|uid| {
            json!({
                "bookUid": uid,
                "name": "Краткий курс C++ в 7 томах",
                "author": "Бьерн Страуструп",
                "genre": "Научная фантастика",
                "condition": "EXCELLENT"
            })
        })
        .collect();
    Json(json!({ "data": data }))
}

async fn libraries(RawQuery(q): RawQuery) -> Json<Value> {
    let data: Vec<Value> = repeated(&q, "libraryUids")
        .into_iter()
        .filter(|uid| uid == LIBRARY_UID)
        .map(|uid| {
            json!({
                "libraryUid": uid,
                "name": "Библиотека имени 7 Непьющих",
                "address": "2-я Бауманская ул., д.5, стр.1",
                "city": "Москва"
            })
        })
        .collect();
    Json(json!({ "data": data }))
}

async fn update_count(
    State(b): State<Shared>,
    Path((_library_uid, _book_uid)): Path<(String, String)>,
    Query(q): Query<HashMap<String, i64>>,
) -> StatusCode {
    *b.available.lock().unwrap() += q.get("countDiff").copied().unwrap_or_default();
    StatusCode::OK
}

async fn list_libraries(Query(q): Query<HashMap<String, String>>) -> Response {
    match q.get("city").map(String::as_str) {
        Some("Москва") => Json(json!({
            "page": 1,
            "pageSize": 1,
            "totalElements": 1,
            "items": [{"libraryUid": LIBRARY_UID, "city": "Москва"}]
        }))
        .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "city is wrong"})),
        )
            .into_response(),
    }
}

async fn get_rating(State(b): State<Shared>, Path(username): Path<String>) -> Response {
    if *b.rating_down.lock().unwrap() {
        // Hang past the gateway's request timeout
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    }
    match b.stars.lock().unwrap().get(&username) {
        Some(stars) => Json(json!({ "stars": stars })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "record not found"})),
        )
            .into_response(),
    }
}

async fn create_rating(State(b): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let username = body["userName"].as_str().unwrap_or_default().to_string();
    b.stars.lock().unwrap().insert(username, 1);
    Json(json!({ "id": 1, "stars": 1 }))
}

async fn update_rating(
    State(b): State<Shared>,
    Path(username): Path<String>,
    Query(q): Query<HashMap<String, i64>>,
) -> StatusCode {
    match b.stars.lock().unwrap().get_mut(&username) {
        Some(stars) => {
            *stars += q.get("starsDiff").copied().unwrap_or_default();
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

fn backend_router(state: Shared) -> Router {
    let reservation = Router::new()
        .route("/reservations/by-user/{username}", get(by_user))
        .route("/reservations/{uid}", get(get_reservation))
        .route("/reservations/", post(create_reservation))
        .route("/reservations/{uid}/status", put(update_status));
    let library = Router::new()
        .route("/books/", get(books))
        .route("/libraries/by-uids", get(libraries))
        .route("/libraries", get(list_libraries))
        .route("/libraries/{library_uid}/books/{book_uid}", put(update_count));
    let rating = Router::new()
        .route("/rating/{username}", get(get_rating).put(update_rating))
        .route("/rating/", post(create_rating));

    Router::new()
        .nest("/reservation/api/v1", reservation)
        .nest("/library/api/v1", library)
        .nest("/rating/api/v1", rating)
        .with_state(state)
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

struct Env {
    gateway: String,
    http: reqwest::Client,
    backends: Shared,
}

impl Env {
    async fn start() -> Self {
        let backends = Shared::default();
        *backends.available.lock().unwrap() = 5;
        let backend_url = serve(backend_router(backends.clone())).await;

        let services = ServicesConfig {
            reservation_url: format!("{}/reservation/api/v1", backend_url),
            library_url: format!("{}/library/api/v1", backend_url),
            rating_url: format!("{}/rating/api/v1", backend_url),
            request_timeout_ms: 500,
            max_conns_per_host: 16,
        };
        let coordinator = LibraryCoordinator::from_config(&services).unwrap();
        let gateway = serve(gateway::router(Arc::new(coordinator))).await;

        Self {
            gateway,
            http: reqwest::Client::new(),
            backends,
        }
    }

    async fn reserve(&self, user: &str) -> reqwest::Response {
        self.http
            .post(format!("{}/api/v1/reservations", self.gateway))
            .header("X-User-Name", user)
            .json(&json!({
                "bookUid": BOOK_UID,
                "libraryUid": LIBRARY_UID,
                "tillDate": "2026-10-30"
            }))
            .send()
            .await
            .unwrap()
    }

    async fn return_book(&self, user: &str, uid: &str, date: &str) -> reqwest::Response {
        self.http
            .post(format!("{}/api/v1/reservations/{}/return", self.gateway, uid))
            .header("X-User-Name", user)
            .json(&json!({ "condition": "EXCELLENT", "date": date }))
            .send()
            .await
            .unwrap()
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_reserve_list_return_round() {
    let env = Env::start().await;
    env.backends.stars.lock().unwrap().insert("Test Max".into(), 2);

    let resp = env.reserve("Test Max").await;
    assert_eq!(resp.status(), 200);
    let receipt: Value = resp.json().await.unwrap();
    assert_eq!(receipt["status"], "RENTED");
    assert_eq!(receipt["book"]["author"], "Бьерн Страуструп");
    assert_eq!(receipt["library"]["city"], "Москва");
    assert_eq!(receipt["rating"]["stars"], 2);
    assert_eq!(*env.backends.available.lock().unwrap(), 4);

    let list: Value = env
        .http
        .get(format!("{}/api/v1/reservations", env.gateway))
        .header("X-User-Name", "Test Max")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["reservationUid"], receipt["reservationUid"]);

    let uid = receipt["reservationUid"].as_str().unwrap();
    let resp = env.return_book("Test Max", uid, "2026-11-02").await;
    assert_eq!(resp.status(), 204);

    assert_eq!(env.backends.stars.lock().unwrap()["Test Max"], -8);
    assert_eq!(*env.backends.available.lock().unwrap(), 5);
    let status = env.backends.reservations.lock().unwrap()[0]["status"].clone();
    assert_eq!(status, "EXPIRED");
}

#[tokio::test]
async fn test_quota_and_provisioning() {
    let env = Env::start().await;

    // No rating record yet: provisioned with one star
    assert_eq!(env.reserve("newcomer").await.status(), 200);
    assert_eq!(env.backends.stars.lock().unwrap()["newcomer"], 1);

    let resp = env.reserve("newcomer").await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "reservations over limit");
    assert_eq!(env.backends.reservations.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rating_timeout_is_bonus_unavailable() {
    let env = Env::start().await;
    *env.backends.rating_down.lock().unwrap() = true;

    let resp = env.reserve("reader").await;
    assert_eq!(resp.status(), 503);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Bonus Service unavailable");
    assert!(env.backends.reservations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_return_unknown_reservation_is_relayed() {
    let env = Env::start().await;

    let resp = env
        .return_book("reader", "00000000-0000-0000-0000-000000000000", "2026-10-30")
        .await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "reservation not found");
}

#[tokio::test]
async fn test_library_listing_passthrough() {
    let env = Env::start().await;

    let ok = env
        .http
        .get(format!("{}/api/v1/libraries", env.gateway))
        .query(&[("city", "Москва"), ("page", "1"), ("size", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), 200);
    let page: Value = ok.json().await.unwrap();
    assert_eq!(page["items"][0]["libraryUid"], LIBRARY_UID);

    let rejected = env
        .http
        .get(format!("{}/api/v1/libraries", env.gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), 400);
}
