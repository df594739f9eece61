use std::time::Duration;

use booli_lib::output::{open_raw_output, OutputFormat, RawPageWriter};
use booli_lib::types::SoldResponse;
use booli_lib::{fetch_page, harvest, BooliError, Client, Credentials, RetryPolicy, SoldQuery};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer) -> Client {
    Client::with_base_url(&server.uri(), Credentials::new("secret-key", "my-app")).unwrap()
}

fn fast_retry(max_retries: usize) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

fn page_body(offset: u64, count: u64, total: u64) -> serde_json::Value {
    let sold: Vec<serde_json::Value> = (0..count)
        .map(|i| json!({ "booliId": offset + i, "soldPrice": 1_000_000 + i }))
        .collect();
    json!({
        "totalCount": total,
        "count": count,
        "offset": offset,
        "sold": sold
    })
}

fn param(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

#[tokio::test]
async fn walks_250_records_in_three_pages() {
    let server = MockServer::start().await;
    for offset in [0u64, 100, 200] {
        Mock::given(method("GET"))
            .and(path("/sold"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(offset, 100, 250)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut pages: Vec<SoldResponse> = Vec::new();
    let summary = harvest(
        &client(&server),
        &SoldQuery::new("uddevalla"),
        &fast_retry(3),
        &mut pages,
    )
    .await
    .unwrap();

    assert_eq!(summary.pages, 3);
    assert_eq!(summary.records, 300);
    assert_eq!(summary.total_count, 250);
    assert_eq!(summary.final_offset, 300);
    assert_eq!(summary.retries, 0);
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[2].body()["sold"][0]["booliId"], 200);

    let requests = server.received_requests().await.unwrap();
    let offsets: Vec<Option<String>> = requests.iter().map(|r| param(r, "offset")).collect();
    assert_eq!(
        offsets,
        vec![Some("0".into()), Some("100".into()), Some("200".into())]
    );
    // Unset limit: first request has none, later ones use the server total.
    assert_eq!(param(&requests[0], "limit"), None);
    assert_eq!(param(&requests[1], "limit").as_deref(), Some("250"));
    assert_eq!(param(&requests[2], "limit").as_deref(), Some("250"));
}

#[tokio::test]
async fn server_error_is_retried_at_the_same_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sold"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sold"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 40, 40)))
        .mount(&server)
        .await;

    let mut pages: Vec<SoldResponse> = Vec::new();
    let summary = harvest(
        &client(&server),
        &SoldQuery::new("x"),
        &fast_retry(3),
        &mut pages,
    )
    .await
    .unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(summary.retries, 1);
    assert_eq!(summary.final_offset, 40);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(param(&requests[0], "offset").as_deref(), Some("0"));
    assert_eq!(param(&requests[1], "offset").as_deref(), Some("0"));
    assert_ne!(param(&requests[0], "unique"), param(&requests[1], "unique"));
}

#[tokio::test]
async fn gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sold"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let mut pages: Vec<SoldResponse> = Vec::new();
    let result = harvest(
        &client(&server),
        &SoldQuery::new("x"),
        &fast_retry(2),
        &mut pages,
    )
    .await;

    match result {
        Err(BooliError::Api(booli_api::Error::HttpStatus { status, .. })) => assert_eq!(status, 503),
        other => panic!("expected 503 error, got {:?}", other.map(|s| s.pages)),
    }
    assert!(pages.is_empty());
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sold"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad hash"))
        .expect(1)
        .mount(&server)
        .await;

    let mut pages: Vec<SoldResponse> = Vec::new();
    let result = harvest(
        &client(&server),
        &SoldQuery::new("x"),
        &fast_retry(5),
        &mut pages,
    )
    .await;
    assert!(matches!(
        result,
        Err(BooliError::Api(booli_api::Error::HttpStatus { status: 401, .. }))
    ));
}

#[tokio::test]
async fn starts_at_user_offset_with_user_limit() {
    let server = MockServer::start().await;
    for offset in [100u64, 150] {
        Mock::given(method("GET"))
            .and(path("/sold"))
            .and(query_param("offset", offset.to_string()))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(offset, 50, 200)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let query = SoldQuery::new("x")
        .with_offset(100)
        .with_limit(50)
        .with_min_sold_date("20230101")
        .with_max_sold_date("20230201");
    let mut pages: Vec<SoldResponse> = Vec::new();
    let summary = harvest(&client(&server), &query, &RetryPolicy::none(), &mut pages)
        .await
        .unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(summary.final_offset, 200);

    for request in server.received_requests().await.unwrap() {
        assert_eq!(param(&request, "minSoldDate").as_deref(), Some("20230101"));
        assert_eq!(param(&request, "maxSoldDate").as_deref(), Some("20230201"));
        assert_eq!(param(&request, "q").as_deref(), Some("x"));
    }
}

#[tokio::test]
async fn empty_page_stops_short_of_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sold"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 0, 300)))
        .expect(1)
        .mount(&server)
        .await;

    let mut pages: Vec<SoldResponse> = Vec::new();
    let summary = harvest(
        &client(&server),
        &SoldQuery::new("x"),
        &RetryPolicy::none(),
        &mut pages,
    )
    .await
    .unwrap();
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.final_offset, 0);
    assert_eq!(summary.total_count, 300);
}

#[tokio::test]
async fn harvest_into_raw_file() {
    let server = MockServer::start().await;
    for offset in [0u64, 2] {
        Mock::given(method("GET"))
            .and(path("/sold"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(offset, 2, 4)))
            .mount(&server)
            .await;
    }

    let tmp = tempfile::tempdir().unwrap();
    let (file, file_path) = open_raw_output(tmp.path(), "20230101-20240101_x.json").unwrap();
    let mut writer = RawPageWriter::new(file, OutputFormat::Concatenated);
    let summary = harvest(
        &client(&server),
        &SoldQuery::new("x"),
        &RetryPolicy::none(),
        &mut writer,
    )
    .await
    .unwrap();
    assert_eq!(summary.pages, 2);
    assert_eq!(writer.pages_written(), 2);
    drop(writer);

    let text = std::fs::read_to_string(file_path).unwrap();
    let pages: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&text)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1]["sold"][1]["booliId"], 3);
}

#[tokio::test]
async fn raw_file_matches_server_body() {
    let server = MockServer::start().await;
    let body = r#"{"totalCount":2,"count":2,"sold":[{"soldPrice":1,"listPrice":null},{"url":"u","booliId":7,"location":{"namedAreas":[],"position":{"longitude":11.9}}}]}"#;
    Mock::given(method("GET"))
        .and(path("/sold"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let mut writer = RawPageWriter::new(Vec::new(), OutputFormat::Concatenated);
    let summary = harvest(
        &client(&server),
        &SoldQuery::new("x"),
        &RetryPolicy::none(),
        &mut writer,
    )
    .await
    .unwrap();
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.final_offset, 2);
    assert_eq!(String::from_utf8(writer.into_inner()).unwrap(), body);
}

#[tokio::test]
async fn fetch_page_returns_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sold"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 3, 900)))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetch_page(
        &client(&server),
        &SoldQuery::new("x").with_limit(100),
        &RetryPolicy::none(),
    )
    .await
    .unwrap();
    assert_eq!(page.count(), 3);
    assert_eq!(page.total_count(), 900);
}
