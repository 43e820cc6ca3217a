#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use scoreboard_api::{
    ApiClient, Endpoint, Error, GroupId, ScorableId, ScoreId, ScoresQuery, TransportConfig,
    UpsertGroup, UpsertScorable, UpsertScore,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = ApiClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

fn api_path(name: &str) -> String {
    format!("/api/{name}")
}

fn has_no_body(req: &Request) -> bool {
    req.body.is_empty()
}

// ── Method selection ────────────────────────────────────────────────

#[tokio::test]
async fn test_parameterless_call_is_get_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("groups")))
        .and(header("content-type", "application/json"))
        .and(has_no_body)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "g1", "name": "Board games" },
            { "id": "g2", "name": "Darts" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let groups = client.groups().await.unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].id, GroupId::from("g1"));
    assert_eq!(groups[1].name, "Darts");
}

#[tokio::test]
async fn test_call_with_params_is_post_with_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("scorables_in_group")))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "group_id": "g1" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": "s1", "name": "Catan" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let scorables = client
        .scorables_in_group(&GroupId::from("g1"))
        .await
        .unwrap();

    assert_eq!(scorables.len(), 1);
    assert_eq!(scorables[0].id, ScorableId::from("s1"));
}

#[tokio::test]
async fn test_generic_call_follows_parameter_presence() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("current_user")))
        .and(has_no_body)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": null })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(api_path("get_group")))
        .and(body_json(json!({ "id": "g9" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "g9", "name": "x" })))
        .mount(&server)
        .await;

    let user: serde_json::Value = client
        .call::<(), _>(Endpoint::CurrentUser, None)
        .await
        .unwrap();
    assert_eq!(user, json!({ "username": null }));

    let group: serde_json::Value = client
        .call(Endpoint::GetGroup, Some(&json!({ "id": "g9" })))
        .await
        .unwrap();
    assert_eq!(group["name"], "x");
}

// ── Endpoint bodies ─────────────────────────────────────────────────

#[tokio::test]
async fn test_upsert_score_preserves_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("upsert_score")))
        .and(body_json(json!({
            "scorable_id": "s1",
            "username": "alice",
            "value": 120
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"abc"}"#))
        .mount(&server)
        .await;

    let out = client
        .upsert_score(&UpsertScore {
            id: None,
            scorable_id: ScorableId::from("s1"),
            username: Some("alice".into()),
            value: 120,
            date: None,
        })
        .await
        .unwrap();

    assert_eq!(out.id, ScoreId::from("abc"));
    assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"id":"abc"}"#);
}

#[tokio::test]
async fn test_upsert_group_and_scorable_bodies() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("upsert_group")))
        .and(body_json(json!({ "id": "g1", "name": "Renamed" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "g1", "name": "Renamed" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(api_path("upsert_scorable")))
        .and(body_json(json!({ "group_id": "g1", "name": "Chess" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "new", "name": "Chess" })),
        )
        .mount(&server)
        .await;

    let group = client
        .upsert_group(&UpsertGroup {
            id: Some(GroupId::from("g1")),
            name: "Renamed".into(),
        })
        .await
        .unwrap();
    assert_eq!(group.name, "Renamed");

    let scorable = client
        .upsert_scorable(&UpsertScorable {
            id: None,
            group_id: GroupId::from("g1"),
            name: "Chess".into(),
        })
        .await
        .unwrap();
    assert_eq!(scorable.id, ScorableId::from("new"));
}

#[tokio::test]
async fn test_scores_with_limit() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("scores")))
        .and(body_json(json!({ "scorable_id": "s1", "limit": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a", "username": "alice", "value": 30, "date": "2021-01-02T03:04:05Z" },
            { "id": "b", "username": "bob", "value": 20, "date": "2021-01-01T00:00:00Z" }
        ])))
        .mount(&server)
        .await;

    let scores = client
        .scores(&ScoresQuery {
            scorable_id: ScorableId::from("s1"),
            limit: Some(3),
        })
        .await
        .unwrap();

    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].username, "alice");
    assert_eq!(scores[1].value, 20);
}

#[tokio::test]
async fn test_last_changed_returns_marker_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("last_changed")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "date": "2021-05-06T07:08:09.123456789Z" })),
        )
        .mount(&server)
        .await;

    let marker = client.last_changed().await.unwrap();
    assert_eq!(marker.as_str(), "2021-05-06T07:08:09.123456789Z");
}

#[tokio::test]
async fn test_delete_endpoints_send_id() {
    let (server, client) = setup().await;

    for (name, body) in [
        ("delete_group", json!({ "id": "g1" })),
        ("delete_scorable", json!({ "id": "s1" })),
        ("delete_score", json!({ "id": "x1" })),
        ("delete_user", json!({ "username": "bob" })),
    ] {
        Mock::given(method("POST"))
            .and(path(api_path(name)))
            .and(body_json(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }

    client.delete_group(&GroupId::from("g1")).await.unwrap();
    client.delete_scorable(&ScorableId::from("s1")).await.unwrap();
    client.delete_score(&ScoreId::from("x1")).await.unwrap();
    client.delete_user("bob").await.unwrap();
}

// ── Session tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_login_cookie_is_sent_on_later_calls() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("login")))
        .and(body_json(json!({ "username": "alice", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "username=alice; Path=/")
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("current_user")))
        .and(header("cookie", "username=alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "alice" })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "pw".to_string().into();
    client.login("alice", &secret).await.unwrap();

    let user = client.current_user().await.unwrap();
    assert_eq!(user.username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_login_failure_is_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("login")))
        .respond_with(ResponseTemplate::new(401).set_body_string("User not authorized"))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let err = client.login("alice", &secret).await.unwrap_err();

    assert!(err.is_unauthorized(), "expected 401, got: {err:?}");
}

#[tokio::test]
async fn test_logout_is_get() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("logout")))
        .and(has_no_body)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("get_group")))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such group"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("groups")))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    match client.get_group(&GroupId::from("missing")).await {
        Err(Error::Status {
            endpoint,
            status,
            body,
        }) => {
            assert_eq!(endpoint, "get_group");
            assert_eq!(status, 404);
            assert_eq!(body, "no such group");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }

    let err = client.groups().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("database unavailable"));
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("groups")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    match client.groups().await {
        Err(Error::Deserialization { endpoint, body, .. }) => {
            assert_eq!(endpoint, "groups");
            assert_eq!(body, "not json");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
