use booster_core::{fetch_card, CardFilters, CardQuery, CardSource, LookupError};
use booster_scryfall::{ScryfallClient, SourceConfig};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn client_for(server: &MockServer) -> ScryfallClient {
    let config = SourceConfig::default()
        .with_base_url(server.base_url())
        .with_timeout(Duration::from_secs(5))
        .with_min_interval(Duration::ZERO);
    ScryfallClient::new(config).expect("build client")
}

#[test]
fn decodes_card_and_prices() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/cards/random")
            .query_param("q", "set:woe")
            .header("accept", "application/json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "object": "card",
                "name": "Beseech the Mirror",
                "rarity": "mythic",
                "set": "woe",
                "collector_number": "82",
                "color_identity": ["B"],
                "type_line": "Sorcery",
                "prices": {"usd": "3.10", "usd_foil": null, "eur": "2.95", "eur_foil": "4.00"}
            }));
    });

    let mut client = client_for(&server);
    let card = client.random_card("set:woe").expect("card");
    mock.assert();
    assert_eq!(card.name, "Beseech the Mirror");
    assert_eq!(card.rarity, "mythic");
    assert_eq!(card.color_identity, vec!["B".to_string()]);
    assert_eq!(card.prices.amount(false), 2.95);
    assert_eq!(card.prices.amount(true), 4.0);
    assert!(card.treatment.is_none());
}

#[test]
fn sends_composed_search_with_exclusion() {
    let server = MockServer::start();
    let expected = CardFilters::for_set("tdm").with_rarity("rare").search_expression();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/cards/random")
            .query_param("q", expected.as_str());
        then.status(200)
            .json_body(json!({"name": "Sample", "rarity": "rare", "set": "tdm"}));
    });

    let mut client = client_for(&server);
    let query = CardQuery::from(CardFilters::for_set("tdm").with_rarity("rare"));
    let card = fetch_card(&mut client, &query).expect("card");
    mock.assert();
    assert_eq!(card.set, "tdm");
}

#[test]
fn missing_card_maps_to_status_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/cards/random");
        then.status(404).json_body(json!({
            "object": "error",
            "code": "not_found",
            "status": 404
        }));
    });

    let mut client = client_for(&server);
    let err = client.random_card("set:zzz").unwrap_err();
    assert_eq!(err, LookupError::Status(404));
}

#[test]
fn malformed_body_maps_to_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/cards/random");
        then.status(200).body("not json");
    });

    let mut client = client_for(&server);
    let err = client.random_card("set:woe").unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)), "{err:?}");
}

#[test]
fn fetch_card_downgrades_failures_to_none() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/cards/random");
        then.status(500);
    });

    let mut client = client_for(&server);
    assert!(fetch_card(&mut client, &CardQuery::from("set:woe")).is_none());
}

#[test]
fn unreachable_host_is_a_transport_error() {
    let config = SourceConfig::default()
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let mut client = ScryfallClient::new(config).expect("build client");
    let err = client.random_card("set:woe").unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)), "{err:?}");
}
