#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServerHandle, Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App, HttpServer};
use serde_json::{json, Value};
use uuid::Uuid;

use todo_service::auth::AuthConfig;
use todo_service::routes;
use todo_service::store::{MemoryStore, Store};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Builds `App` around the given app data and initializes it as a test service.
#[allow(unused_macros)]
macro_rules! init_app {
    ($store:expr, $auth:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($store.clone())
                .app_data($auth.clone())
                .wrap(actix_web::middleware::Logger::default())
                .configure(todo_service::routes::config),
        )
    };
}

/// Fresh in-memory store and auth settings with the cheapest bcrypt cost.
pub fn state() -> (web::Data<dyn Store>, web::Data<AuthConfig>) {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    (
        web::Data::from(store),
        web::Data::new(AuthConfig::new(TEST_SECRET, 1, 4)),
    )
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

pub async fn signup_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
    name: &str,
) -> TestUser {
    let req = test::TestRequest::post()
        .uri("/user/signup")
        .set_json(json!({ "email": email, "password": password, "name": name }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "signup failed: {}", resp.status());
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["_id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("signup response carries _id");

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    let token = body["data"]
        .as_str()
        .expect("login response carries a token")
        .to_string();

    TestUser { id, token }
}

/// A real server bound to an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    handle: ServerHandle,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub fn spawn_server() -> TestServer {
    let (store, auth) = state();
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(auth.clone())
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .workers(1)
    .disable_signals()
    .listen(listener)
    .expect("Failed to listen on test port")
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        handle,
    }
}
