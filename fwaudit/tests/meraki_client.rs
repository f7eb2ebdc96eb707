// Integration tests for `MerakiClient` against a wiremock Dashboard API.

use fwaudit::audit::{collect_scopes, evaluate};
use fwaudit::fetch::meraki::{NetworkSelection, API_KEY_HEADER};
use fwaudit::fetch::{ConfigFetcher, MerakiClient, TransportConfig};
use fwaudit_core::{AuditPolicy, IssueKind};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "0123456789abcdef";

fn client(uri: &str, selection: NetworkSelection) -> MerakiClient {
    MerakiClient::new(uri, KEY, selection, &TransportConfig::default()).expect("client")
}

async fn mount_get(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header(API_KEY_HEADER, KEY))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_network(server: &MockServer, id: &str, rules: serde_json::Value) {
    mount_get(
        server,
        &format!("/networks/{id}/appliance/firewall/l3FirewallRules"),
        200,
        json!({ "rules": rules }),
    )
    .await;
    mount_get(
        server,
        &format!("/networks/{id}/appliance/firewall/oneToOneNatRules"),
        200,
        json!({ "rules": [] }),
    )
    .await;
    mount_get(
        server,
        &format!("/networks/{id}/appliance/vpn/siteToSiteVpn"),
        200,
        json!({ "mode": "none", "hubs": [], "subnets": [] }),
    )
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn lists_appliance_networks_of_organization() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/organizations/42/networks",
        200,
        json!([
            { "id": "N_1", "name": "HQ", "productTypes": ["appliance", "switch"] },
            { "id": "N_2", "name": "Cameras", "productTypes": ["camera"] },
            { "id": "N_3", "name": "", "productTypes": ["appliance"] }
        ]),
    )
    .await;

    let uri = server.uri();
    let scopes = tokio::task::spawn_blocking(move || {
        client(&uri, NetworkSelection::Organization("42".into())).list_scopes()
    })
    .await
    .expect("join")
    .expect("scopes");

    let names: Vec<(&str, &str)> = scopes
        .iter()
        .map(|s| (s.id.as_str(), s.name.as_str()))
        .collect();
    assert_eq!(names, vec![("N_1", "HQ"), ("N_3", "N_3")]);
}

#[tokio::test(flavor = "multi_thread")]
async fn one_failed_network_does_not_stop_the_others() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/organizations/42/networks",
        200,
        json!([
            { "id": "N_1", "name": "HQ", "productTypes": ["appliance"] },
            { "id": "N_2", "name": "Branch", "productTypes": ["appliance"] }
        ]),
    )
    .await;
    mount_get(
        &server,
        "/networks/N_1/appliance/firewall/l3FirewallRules",
        500,
        json!({ "errors": ["boom"] }),
    )
    .await;
    mount_get(
        &server,
        "/networks/N_1/appliance/firewall/oneToOneNatRules",
        500,
        json!({}),
    )
    .await;
    mount_get(
        &server,
        "/networks/N_1/appliance/vpn/siteToSiteVpn",
        500,
        json!({}),
    )
    .await;
    mount_network(
        &server,
        "N_2",
        json!([
            { "comment": "RDP", "policy": "allow", "protocol": "tcp",
              "srcCidr": "Any", "srcPort": "Any", "destCidr": "10.0.0.5/32", "destPort": "3389" },
            { "comment": "Default rule", "policy": "allow", "protocol": "Any",
              "srcCidr": "Any", "srcPort": "Any", "destCidr": "Any", "destPort": "Any" }
        ]),
    )
    .await;

    let uri = server.uri();
    let scopes = tokio::task::spawn_blocking(move || {
        let mut client = client(&uri, NetworkSelection::Organization("42".into()));
        collect_scopes(&mut client).expect("collect")
    })
    .await
    .expect("join");

    assert_eq!(scopes.len(), 2);
    assert_eq!(scopes[0].name, "HQ");
    assert!(scopes[0].rules.is_empty());
    assert_eq!(scopes[1].name, "Branch");
    assert_eq!(scopes[1].rules.len(), 2);
    assert!(scopes[1].vpn.is_none());

    let outcome = evaluate(&scopes, &AuditPolicy::default());
    assert_eq!(outcome.summary.networks, 2);
    assert_eq!(outcome.summary.rules, 2);
    // Source Any on both rules plus RDP.
    assert_eq!(outcome.summary.high, 3);
    assert!(outcome
        .issues
        .iter()
        .all(|i| i.scope() == Some("Branch")));
    assert!(outcome
        .issues
        .iter()
        .any(|i| i.kind() == IssueKind::SecurityRisk && i.port() == Some("3389")));
}

#[tokio::test(flavor = "multi_thread")]
async fn explicit_networks_skip_organization_listing() {
    let server = MockServer::start().await;
    mount_network(
        &server,
        "L_7",
        json!([{ "comment": "web", "policy": "allow", "srcCidr": "10.0.0.0/8", "destPort": "80,443" }]),
    )
    .await;
    mount_get(
        &server,
        "/networks/L_8/appliance/firewall/l3FirewallRules",
        404,
        json!({}),
    )
    .await;

    let uri = server.uri();
    let scopes = tokio::task::spawn_blocking(move || {
        let mut client = client(
            &uri,
            NetworkSelection::Networks(vec!["L_7".into(), "L_8".into()]),
        );
        collect_scopes(&mut client).expect("collect")
    })
    .await
    .expect("join");

    assert_eq!(scopes.len(), 2);
    assert_eq!(scopes[0].rules[0].ports, vec!["80", "443"]);
    assert!(scopes[1].rules.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn vpn_hub_count_is_reported() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/networks/N_1/appliance/vpn/siteToSiteVpn",
        200,
        json!({ "mode": "spoke", "hubs": [ { "hubId": "N_9", "useDefaultRoute": false } ], "subnets": [] }),
    )
    .await;

    let uri = server.uri();
    let vpn = tokio::task::spawn_blocking(move || {
        let client = client(&uri, NetworkSelection::Networks(vec!["N_1".into()]));
        let scope = client.list_scopes().expect("scopes").remove(0);
        client.fetch_vpn_config(&scope)
    })
    .await
    .expect("join")
    .expect("vpn");

    let vpn = vpn.expect("vpn present");
    assert_eq!(vpn.mode, "spoke");
    assert_eq!(vpn.peers, 1);
}
