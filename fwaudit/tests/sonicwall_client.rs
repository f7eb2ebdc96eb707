// Integration tests for `SonicWallClient` against a wiremock SonicOS API.
//
// The client is blocking, so it is built, used and dropped on a blocking
// thread while the mock server runs on the test runtime.

use fwaudit::audit::{collect_scopes, AuditError};
use fwaudit::fetch::{AuthError, ConfigFetcher, FetchError, SonicWallClient, TransportConfig};
use fwaudit_core::{Action, ZonePair};
use serde_json::json;
use wiremock::matchers::{basic_auth, bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "tok-123";

fn client(uri: &str) -> SonicWallClient {
    SonicWallClient::new(uri, "admin", "secret", &TransportConfig::default()).expect("client")
}

async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/sonicos/auth"))
        .and(basic_auth("admin", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN })))
        .mount(server)
        .await;
}

async fn mount_get(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn fetches_rules_nat_and_vpn_with_bearer_token() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_get(
        &server,
        "/api/sonicos/access-rules/ipv4",
        200,
        json!({
            "access_rules": [
                { "ipv4": {
                    "name": "RDP-In", "comment": "", "from": "WAN", "to": "LAN",
                    "action": "allow", "enable": true,
                    "source": { "address": { "any": true } },
                    "service": { "name": "3389" }
                }},
                { "ipv4": {
                    "name": "Block", "comment": "drop rest", "from": "LAN", "to": "WAN",
                    "action": "deny", "enable": false,
                    "source": { "address": { "group": "LAN Subnets" } },
                    "service": { "any": true }
                }}
            ]
        }),
    )
    .await;
    mount_get(
        &server,
        "/api/sonicos/nat-policies/ipv4",
        200,
        json!({ "nat_policies": [ { "ipv4": {
            "name": "web",
            "original_destination": { "name": "WAN IP" },
            "translated_destination": { "name": "Web Server" }
        }}]}),
    )
    .await;
    mount_get(
        &server,
        "/api/sonicos/vpn/policies/ipv4",
        200,
        json!({ "vpn": { "policy": [ { "name": "branch" }, { "name": "dc" } ] } }),
    )
    .await;

    let uri = server.uri();
    let scopes = tokio::task::spawn_blocking(move || {
        let mut client = client(&uri);
        collect_scopes(&mut client).expect("collect")
    })
    .await
    .expect("join");

    assert_eq!(scopes.len(), 1);
    let scope = &scopes[0];
    assert!(scope.zone_aware);
    assert_eq!(scope.rules.len(), 2);

    let rdp = &scope.rules[0];
    assert_eq!(rdp.position, 1);
    assert_eq!(rdp.source, "any");
    assert_eq!(rdp.ports, vec!["3389"]);
    assert_eq!(rdp.zones, Some(ZonePair::new("WAN", "LAN")));
    assert_eq!(rdp.action, Action::Allow);

    let block = &scope.rules[1];
    assert_eq!(block.source, "LAN Subnets");
    assert!(block.ports.is_empty());
    assert!(!block.enabled);
    assert_eq!(block.action, Action::Deny);

    assert_eq!(scope.nat_policies.len(), 1);
    assert_eq!(scope.nat_policies[0].translated_destination, "Web Server");
    assert_eq!(scope.vpn.as_ref().map(|v| v.peers), Some(2));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_credentials_are_auth_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sonicos/auth"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let mut client = client(&uri);
        client.authenticate()
    })
    .await
    .expect("join");

    assert!(
        matches!(result, Err(AuthError::Rejected { .. })),
        "expected Rejected, got: {result:?}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_token_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sonicos/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let mut client = client(&uri);
        collect_scopes(&mut client)
    })
    .await
    .expect("join");

    match result {
        Err(AuditError::Auth(AuthError::Rejected { reason, .. })) => {
            assert!(reason.contains("no session token"), "{reason}");
        }
        other => panic!("expected auth rejection, got: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_host_is_distinct_from_rejection() {
    // Nothing listens on the discard port.
    let result = tokio::task::spawn_blocking(|| {
        let mut client = client("http://127.0.0.1:9");
        client.authenticate()
    })
    .await
    .expect("join");

    assert!(
        matches!(result, Err(AuthError::Unreachable { .. })),
        "expected Unreachable, got: {result:?}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn fetching_before_authentication_fails() {
    let result = tokio::task::spawn_blocking(|| {
        let client = client("http://127.0.0.1:9");
        let scope = client.list_scopes().expect("scopes").remove(0);
        client.fetch_rules(&scope)
    })
    .await
    .expect("join");

    assert!(matches!(result, Err(FetchError::NotAuthenticated)));
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_nat_and_vpn_fetches_degrade_to_empty() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_get(
        &server,
        "/api/sonicos/access-rules/ipv4",
        200,
        json!({ "access_rules": [ { "ipv4": {
            "name": "web", "comment": "web", "service": { "name": "443" }
        }}]}),
    )
    .await;
    mount_get(&server, "/api/sonicos/nat-policies/ipv4", 500, json!({})).await;
    Mock::given(method("GET"))
        .and(path("/api/sonicos/vpn/policies/ipv4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let scopes = tokio::task::spawn_blocking(move || {
        let mut client = client(&uri);
        collect_scopes(&mut client).expect("collect")
    })
    .await
    .expect("join");

    assert_eq!(scopes[0].rules.len(), 1);
    assert!(scopes[0].nat_policies.is_empty());
    assert!(scopes[0].vpn.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_rule_fetch_on_only_scope_is_no_data() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_get(&server, "/api/sonicos/access-rules/ipv4", 503, json!({})).await;
    mount_get(&server, "/api/sonicos/nat-policies/ipv4", 200, json!({})).await;
    mount_get(&server, "/api/sonicos/vpn/policies/ipv4", 200, json!({})).await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let mut client = client(&uri);
        collect_scopes(&mut client)
    })
    .await
    .expect("join");

    assert!(matches!(result, Err(AuditError::NoData { scopes: 1 })));
}
