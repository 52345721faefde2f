use chrono::{DateTime, TimeZone};
use chrono_tz::Europe::Berlin;
use chrono_tz::Tz;
use selene::config::FeedConfig;
use selene::smard::SmardClient;
use serde_json::json;

// Index entries at 01:00 CEST on 2025-07-26/27/28
const INDEX_TIMESTAMPS: [i64; 3] = [1_753_484_400_000, 1_753_570_800_000, 1_753_657_200_000];

// Samples at 01:00/02:00/03:00 CEST on 2025-07-28
const DAY_SAMPLES: [(i64, f64); 3] = [
    (1_753_657_200_000, 15.0),
    (1_753_660_800_000, 12.0),
    (1_753_664_400_000, 18.0),
];

fn feed_config(base_url: &str) -> FeedConfig {
    FeedConfig {
        base_url: base_url.to_string(),
        ..FeedConfig::default()
    }
}

fn now() -> DateTime<Tz> {
    // 2025-07-28 10:15 CEST; the qualifying index entry is 2025-07-27 01:00
    Berlin.with_ymd_and_hms(2025, 7, 28, 10, 15, 0).unwrap()
}

const INDEX_PATH: &str = "/4169/DE/index_quarterhour.json";
const SERIES_PATH: &str = "/4169/DE/4169_DE_quarterhour_1753570800000.json";

#[tokio::test]
async fn fetch_day_prices_happy_path() {
    let mut server = mockito::Server::new_async().await;
    let index_mock = server
        .mock("GET", INDEX_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "timestamps": INDEX_TIMESTAMPS }).to_string())
        .create_async()
        .await;
    let series_mock = server
        .mock("GET", SERIES_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "series": DAY_SAMPLES }).to_string())
        .create_async()
        .await;

    let client = SmardClient::new(&feed_config(&server.url()), Berlin);
    let series = client.fetch_day_prices_at("4169", now()).await;

    assert_eq!(series.len(), 3);
    assert_eq!(series[0].price, 15.0);
    assert_eq!(series[1].price, 12.0);
    assert_eq!(series[2].price, 18.0);
    assert_eq!(series[0].starts_at.to_rfc3339(), "2025-07-28T01:00:00+02:00");
    assert_eq!(series[1].starts_at.to_rfc3339(), "2025-07-28T02:00:00+02:00");
    assert_eq!(series[2].starts_at.to_rfc3339(), "2025-07-28T03:00:00+02:00");

    index_mock.assert_async().await;
    series_mock.assert_async().await;
}

#[tokio::test]
async fn fetch_day_prices_drops_null_and_foreign_day_entries() {
    let mut server = mockito::Server::new_async().await;
    let _index = server
        .mock("GET", INDEX_PATH)
        .with_status(200)
        .with_body(json!({ "timestamps": INDEX_TIMESTAMPS }).to_string())
        .create_async()
        .await;
    let _series = server
        .mock("GET", SERIES_PATH)
        .with_status(200)
        .with_body(
            json!({
                "series": [
                    [1_753_570_800_000_i64, 9.0],   // previous day
                    [1_753_657_200_000_i64, 15.0],
                    [1_753_660_800_000_i64, null],  // missing price
                    [1_753_664_400_000_i64, 18.0],
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = SmardClient::new(&feed_config(&server.url()), Berlin);
    let series = client.fetch_day_prices_at("4169", now()).await;

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].price, 15.0);
    assert_eq!(series[1].price, 18.0);
}

#[tokio::test]
async fn fetch_day_prices_unsupported_zone() {
    // An unsupported zone must fail closed before any request is made
    let client = SmardClient::new(&feed_config("http://127.0.0.1:9"), Berlin);

    assert!(
        client
            .fetch_day_prices_at("InvalidCountry", now())
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn fetch_day_prices_empty_index() {
    let mut server = mockito::Server::new_async().await;
    let _index = server
        .mock("GET", INDEX_PATH)
        .with_status(200)
        .with_body(json!({ "timestamps": [] }).to_string())
        .create_async()
        .await;

    let client = SmardClient::new(&feed_config(&server.url()), Berlin);
    assert!(client.fetch_day_prices_at("4169", now()).await.is_empty());
}

#[tokio::test]
async fn fetch_day_prices_index_entirely_in_future() {
    let mut server = mockito::Server::new_async().await;
    let _index = server
        .mock("GET", INDEX_PATH)
        .with_status(200)
        // 2025-07-29 01:00 CEST, after the reference day's midnight
        .with_body(json!({ "timestamps": [1_753_743_600_000_i64] }).to_string())
        .create_async()
        .await;

    let client = SmardClient::new(&feed_config(&server.url()), Berlin);
    assert!(client.fetch_day_prices_at("4169", now()).await.is_empty());
}

#[tokio::test]
async fn fetch_day_prices_empty_series_payload() {
    let mut server = mockito::Server::new_async().await;
    let _index = server
        .mock("GET", INDEX_PATH)
        .with_status(200)
        .with_body(json!({ "timestamps": INDEX_TIMESTAMPS }).to_string())
        .create_async()
        .await;
    let _series = server
        .mock("GET", SERIES_PATH)
        .with_status(200)
        .with_body(json!({ "series": [] }).to_string())
        .create_async()
        .await;

    let client = SmardClient::new(&feed_config(&server.url()), Berlin);
    assert!(client.fetch_day_prices_at("4169", now()).await.is_empty());
}

#[tokio::test]
async fn fetch_day_prices_index_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _index = server
        .mock("GET", INDEX_PATH)
        .with_status(500)
        .create_async()
        .await;

    let client = SmardClient::new(&feed_config(&server.url()), Berlin);
    assert!(client.fetch_day_prices_at("4169", now()).await.is_empty());
}

#[tokio::test]
async fn fetch_day_prices_series_request_fails() {
    let mut server = mockito::Server::new_async().await;
    let _index = server
        .mock("GET", INDEX_PATH)
        .with_status(200)
        .with_body(json!({ "timestamps": INDEX_TIMESTAMPS }).to_string())
        .create_async()
        .await;
    let _series = server
        .mock("GET", SERIES_PATH)
        .with_status(404)
        .create_async()
        .await;

    let client = SmardClient::new(&feed_config(&server.url()), Berlin);
    assert!(client.fetch_day_prices_at("4169", now()).await.is_empty());
}

#[tokio::test]
async fn fetch_day_prices_invalid_json() {
    let mut server = mockito::Server::new_async().await;
    let _index = server
        .mock("GET", INDEX_PATH)
        .with_status(200)
        .with_body("Invalid JSON")
        .create_async()
        .await;

    let client = SmardClient::new(&feed_config(&server.url()), Berlin);
    assert!(client.fetch_day_prices_at("4169", now()).await.is_empty());
}

#[tokio::test]
async fn fetch_day_prices_connection_refused() {
    // Discard port: the connection itself fails
    let client = SmardClient::new(&feed_config("http://127.0.0.1:9"), Berlin);
    assert!(client.fetch_day_prices_at("4169", now()).await.is_empty());
}
