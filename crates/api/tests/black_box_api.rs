use std::sync::Arc;

use reqwest::StatusCode;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router and seeded services as prod, bound to an ephemeral port.
        let services = Arc::new(helpdesk_api::app::services::build_services());
        let app = helpdesk_api::app::build_app(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Client with its own cookie jar; redirects are not followed so tests can
/// assert on the navigation outcomes themselves.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn location(res: &reqwest::Response) -> &str {
    res.headers()
        .get("location")
        .expect("expected a redirect location")
        .to_str()
        .unwrap()
}

async fn register(client: &reqwest::Client, base: &str, username: &str, password: &str) {
    let res = client
        .post(format!("{base}/register"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
}

async fn login(client: &reqwest::Client, base: &str, username: &str, password: &str) {
    let res = client
        .post(format!("{base}/login"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
}

async fn list_tickets(client: &reqwest::Client, base: &str) -> serde_json::Value {
    let res = client
        .get(format!("{base}/tickets"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = client()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn unauthenticated_requests_redirect_to_login() {
    let srv = TestServer::spawn().await;
    let c = client();

    for path in ["/", "/tickets", "/tickets/1", "/users", "/logout"] {
        let res = c
            .get(format!("{}{path}", srv.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "path {path}");
        assert_eq!(location(&res), "/login", "path {path}");
    }
}

#[tokio::test]
async fn failed_login_redisplays_with_notice() {
    let srv = TestServer::spawn().await;
    let c = client();

    let res = c
        .post(format!("{}/login", srv.base_url))
        .form(&[("username", "user1"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login?notice=invalid_credentials");
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;
    let c = client();

    register(&c, base, "carol", "pw").await;

    let res = c
        .post(format!("{base}/register"))
        .form(&[("username", "carol"), ("password", "different")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/register?notice=duplicate_username");

    // Original credentials still work.
    login(&c, base, "carol", "pw").await;
}

#[tokio::test]
async fn logout_closes_the_session() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;
    let c = client();

    login(&c, base, "user1", "password1").await;
    assert_eq!(
        c.get(format!("{base}/")).send().await.unwrap().status(),
        StatusCode::OK
    );

    let res = c.get(format!("{base}/logout")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");

    // The session is gone server-side; the next request bounces.
    let res = c.get(format!("{base}/tickets")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
}

#[tokio::test]
async fn denial_is_indistinguishable_from_not_found() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;

    let alice = client();
    register(&alice, base, "alice", "pw1").await;
    login(&alice, base, "alice", "pw1").await;

    let res = alice
        .post(format!("{base}/tickets/create"))
        .form(&[("title", "A1"), ("description", "broken")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let bob = client();
    register(&bob, base, "bob", "pw2").await;
    login(&bob, base, "bob", "pw2").await;

    // Denied (exists, not bob's) and missing both land on the list view.
    let denied = bob.get(format!("{base}/tickets/1")).send().await.unwrap();
    let missing = bob.get(format!("{base}/tickets/999")).send().await.unwrap();

    assert_eq!(denied.status(), StatusCode::SEE_OTHER);
    assert_eq!(missing.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&denied), location(&missing));
    assert_eq!(location(&denied), "/tickets");

    // Edit and delete resolve the same way for bob.
    let edit = bob
        .post(format!("{base}/tickets/1/edit"))
        .form(&[("title", "hijacked")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&edit), "/tickets");

    let delete = bob
        .post(format!("{base}/tickets/1/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&delete), "/tickets");

    // The ticket is untouched.
    let view = alice.get(format!("{base}/tickets/1")).send().await.unwrap();
    assert_eq!(view.status(), StatusCode::OK);
    let body: serde_json::Value = view.json().await.unwrap();
    assert_eq!(body["ticket"]["title"], "A1");
}

#[tokio::test]
async fn promotion_scenario_register_deny_promote_allow() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;

    let alice = client();
    register(&alice, base, "alice", "pw1").await;
    login(&alice, base, "alice", "pw1").await;
    alice
        .post(format!("{base}/tickets/create"))
        .form(&[("title", "A1"), ("description", "first")])
        .send()
        .await
        .unwrap();

    let bob = client();
    register(&bob, base, "bob", "pw2").await;
    login(&bob, base, "bob", "pw2").await;

    // Before promotion: empty list, denied detail.
    let body = list_tickets(&bob, base).await;
    assert_eq!(body["tickets"].as_array().unwrap().len(), 0);
    let res = bob.get(format!("{base}/tickets/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    // Seeded admin promotes bob.
    let admin = client();
    login(&admin, base, "admin", "adminpass").await;

    let users: serde_json::Value = admin
        .get(format!("{base}/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let bob_id = users["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "bob")
        .map(|u| u["id"].as_u64().unwrap())
        .unwrap();

    let res = admin
        .post(format!("{base}/users"))
        .form(&[("user_id", bob_id.to_string()), ("role", "admin".to_string())])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/users");

    // The existing session sees the new role on its next request.
    let body = list_tickets(&bob, base).await;
    let titles: Vec<_> = body["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();
    assert!(titles.contains(&"A1".to_string()));

    let res = bob.get(format!("{base}/tickets/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn user_management_is_admin_only() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;

    let c = client();
    login(&c, base, "user1", "password1").await;

    let res = c.get(format!("{base}/users")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/tickets");

    let res = c
        .post(format!("{base}/users"))
        .form(&[("user_id", "1"), ("role", "admin")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/tickets");
}

#[tokio::test]
async fn unknown_role_is_rejected_without_mutation() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;

    let admin = client();
    login(&admin, base, "admin", "adminpass").await;

    let res = admin
        .post(format!("{base}/users"))
        .form(&[("user_id", "1"), ("role", "superuser")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/users?notice=unknown_role");

    let users: serde_json::Value = admin
        .get(format!("{base}/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let user1 = users["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "user1")
        .unwrap();
    assert_eq!(user1["role"], "user");
}

#[tokio::test]
async fn status_changes_are_admin_only() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;

    let alice = client();
    register(&alice, base, "alice", "pw1").await;
    login(&alice, base, "alice", "pw1").await;
    alice
        .post(format!("{base}/tickets/create"))
        .form(&[("title", "A1"), ("description", "first")])
        .send()
        .await
        .unwrap();

    // Owner edit: title applies, status is dropped.
    let res = alice
        .post(format!("{base}/tickets/1/edit"))
        .form(&[("title", "A1 updated"), ("status", "closed")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/tickets");

    let body: serde_json::Value = alice
        .get(format!("{base}/tickets/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["ticket"]["title"], "A1 updated");
    assert_eq!(body["ticket"]["status"], "open");

    // Admin edit through the update alias: status applies, any string goes.
    let admin = client();
    login(&admin, base, "admin", "adminpass").await;
    let res = admin
        .post(format!("{base}/tickets/1/update"))
        .form(&[("status", "waiting on customer")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let body: serde_json::Value = alice
        .get(format!("{base}/tickets/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["ticket"]["status"], "waiting on customer");
    // Partial update: the title survived the admin's status-only patch.
    assert_eq!(body["ticket"]["title"], "A1 updated");
}

#[tokio::test]
async fn delete_then_view_is_gone_for_everyone() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;

    let alice = client();
    register(&alice, base, "alice", "pw1").await;
    login(&alice, base, "alice", "pw1").await;
    alice
        .post(format!("{base}/tickets/create"))
        .form(&[("title", "A1"), ("description", "")])
        .send()
        .await
        .unwrap();

    let res = alice
        .post(format!("{base}/tickets/1/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/tickets");

    // Gone even for an admin; double delete is the same benign redirect.
    let admin = client();
    login(&admin, base, "admin", "adminpass").await;
    let res = admin.get(format!("{base}/tickets/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/tickets");

    let res = admin
        .post(format!("{base}/tickets/1/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/tickets");

    let body = list_tickets(&admin, base).await;
    assert_eq!(body["tickets"].as_array().unwrap().len(), 0);
}
