use fakenews_detector::headlines::{fetch_headlines, write_csv, HeadlineQuery, HeadlineRecord};
use mockito::Matcher;

fn query_for(server: &mockito::Server) -> HeadlineQuery {
    let mut query = HeadlineQuery::new("test-key");
    query.endpoint = format!("{}/v2/top-headlines", server.url());
    query
}

#[test]
fn test_fetch_and_write_csv() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sources".into(), "bbc-news,cnn,reuters".into()),
            Matcher::UrlEncoded("pageSize".into(), "50".into()),
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "status": "ok",
                "totalResults": 2,
                "articles": [
                    {"source": {"id": "bbc-news"}, "title": "Parliament passes budget", "content": "The budget passed by 40 votes."},
                    {"source": {"id": "cnn"}, "title": "Storm hits coast", "content": null}
                ]
            }"#,
        )
        .create();

    let records = fetch_headlines(&query_for(&server)).unwrap();
    mock.assert();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.label == 1));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("additional_real_news.csv");
    write_csv(&records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<HeadlineRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows[0].title, "Parliament passes budget");
    assert_eq!(rows[0].text, "The budget passed by 40 votes.");
    assert_eq!(rows[1].text, "");
}

#[test]
fn test_fetch_reports_api_error() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#)
        .create();

    let err = fetch_headlines(&query_for(&server)).unwrap_err();
    mock.assert();

    let message = err.to_string();
    assert!(message.contains("401"));
    assert!(message.contains("Your API key is invalid."));
}

#[test]
fn test_fetch_rejects_malformed_body() {
    let mut server = mockito::Server::new();

    let _mock = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create();

    assert!(fetch_headlines(&query_for(&server)).is_err());
}
