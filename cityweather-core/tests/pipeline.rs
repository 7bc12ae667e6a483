//! Integration tests for the lookup pipeline against a mock Open-Meteo server.

use cityweather_core::{
    HourlyPoint, OpenMeteoClient, Pipeline, ServiceStage, WeatherError, WeatherResult,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/v1/search";
const FORECAST_PATH: &str = "/v1/forecast";

fn pipeline_for(server: &MockServer) -> Pipeline {
    let client = OpenMeteoClient::with_endpoints(
        format!("{}{SEARCH_PATH}", server.uri()),
        format!("{}{FORECAST_PATH}", server.uri()),
    );
    Pipeline::new(Box::new(client.clone()), Box::new(client))
}

fn mumbai_geocoding() -> serde_json::Value {
    serde_json::json!({
        "results": [
            { "name": "Mumbai", "latitude": 19.07, "longitude": 72.88, "country": "India" }
        ]
    })
}

fn mumbai_forecast() -> serde_json::Value {
    serde_json::json!({
        "current": { "temperature_2m": 31.4, "weather_code": 1 },
        "hourly": {
            "time": [
                "2024-01-01T14:00",
                "2024-01-01T15:00",
                "2024-01-01T16:00",
                "2024-01-01T17:00",
                "2024-01-01T18:00"
            ],
            "temperature_2m": [31.4, 30.9, 30.1, 29.5, 28.8],
            "weather_code": [1, 2, 2, 3, 3]
        }
    })
}

fn point(time: &str, temperature: i32, weather_code: i32) -> HourlyPoint {
    HourlyPoint { time: time.to_string(), temperature, weather_code }
}

#[tokio::test]
async fn mumbai_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("name", "Mumbai"))
        .and(query_param("count", "5"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mumbai_geocoding()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("latitude", "19.07"))
        .and(query_param("longitude", "72.88"))
        .and(query_param("current", "temperature_2m,weather_code"))
        .and(query_param("hourly", "temperature_2m,weather_code"))
        .and(query_param("temperature_unit", "celsius"))
        .and(query_param("forecast_days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mumbai_forecast()))
        .expect(1)
        .mount(&server)
        .await;

    let result = pipeline_for(&server).run("  Mumbai ").await.unwrap();

    assert_eq!(
        result,
        WeatherResult {
            city: "Mumbai, India".to_string(),
            temperature: 31,
            condition: "Mainly Clear".to_string(),
            description: "Mainly clear".to_string(),
            hourly_forecast: vec![
                point("02:00 PM", 31, 1),
                point("03:00 PM", 31, 2),
                point("04:00 PM", 30, 2),
                point("05:00 PM", 30, 3),
            ],
        }
    );
}

#[tokio::test]
async fn query_is_url_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("name", "São Paulo & Co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let err = pipeline_for(&server).run("São Paulo & Co").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound));
}

#[tokio::test]
async fn empty_results_is_not_found_with_guidance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(mumbai_forecast()))
        .expect(0)
        .mount(&server)
        .await;

    let err = pipeline_for(&server).run("Xyzzyville").await.unwrap_err();

    assert!(matches!(err, WeatherError::NotFound));
    let msg = err.to_string();
    assert!(msg.contains("Check spelling"));
    assert!(msg.contains('\n'));
}

#[tokio::test]
async fn missing_results_key_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generationtime_ms": 0.5 })),
        )
        .mount(&server)
        .await;

    let err = pipeline_for(&server).run("Nowhere").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound));
}

#[tokio::test]
async fn geocoding_error_status_stops_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(mumbai_forecast()))
        .expect(0)
        .mount(&server)
        .await;

    let err = pipeline_for(&server).run("Mumbai").await.unwrap_err();

    assert!(matches!(
        err,
        WeatherError::Service { stage: ServiceStage::Geocoding, status: 500 }
    ));
    assert_eq!(err.to_string(), "Failed to search for location");
}

#[tokio::test]
async fn forecast_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(mumbai_geocoding()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = pipeline_for(&server).run("Mumbai").await.unwrap_err();

    assert!(matches!(
        err,
        WeatherError::Service { stage: ServiceStage::Forecast, status: 429 }
    ));
    assert_eq!(err.to_string(), "Failed to fetch weather data");
}

#[tokio::test]
async fn malformed_forecast_body_is_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(mumbai_geocoding()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = pipeline_for(&server).run("Mumbai").await.unwrap_err();

    assert!(matches!(err, WeatherError::Unknown { .. }));
    assert_eq!(err.to_string(), "An unexpected error occurred. Please try again.");
}

#[tokio::test]
async fn unreachable_service_is_unknown() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = OpenMeteoClient::with_endpoints(
        format!("{uri}{SEARCH_PATH}"),
        format!("{uri}{FORECAST_PATH}"),
    );
    let pipeline = Pipeline::new(Box::new(client.clone()), Box::new(client));

    let err = pipeline.run("Mumbai").await.unwrap_err();

    assert!(matches!(err, WeatherError::Unknown { .. }));
    assert!(!err.to_string().contains("127.0.0.1"));
}

#[tokio::test]
async fn error_status_with_cut_off_body_is_service_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());

    // Announces a longer body than it sends, then hangs up.
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 1000\r\n\r\npartial")
            .await
            .unwrap();
    });

    let client = OpenMeteoClient::with_endpoints(
        format!("{uri}{SEARCH_PATH}"),
        format!("{uri}{FORECAST_PATH}"),
    );
    let pipeline = Pipeline::new(Box::new(client.clone()), Box::new(client));

    let err = pipeline.run("Mumbai").await.unwrap_err();

    assert!(matches!(
        err,
        WeatherError::Service { stage: ServiceStage::Geocoding, status: 503 }
    ));
}

#[tokio::test]
async fn blank_query_issues_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mumbai_geocoding()))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);
    for query in ["", "   "] {
        let err = pipeline.run(query).await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidInput));
    }
}

#[tokio::test]
async fn absent_hourly_block_yields_empty_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "name": "Springfield",
                "latitude": 39.8,
                "longitude": -89.64,
                "country": "United States",
                "admin1": "Illinois",
                "admin2": "Sangamon"
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": { "temperature_2m": -2.5, "weather_code": 96 }
        })))
        .mount(&server)
        .await;

    let result = pipeline_for(&server).run("Springfield").await.unwrap();

    assert_eq!(result.city, "Springfield, Illinois, United States");
    assert_eq!(result.temperature, -3);
    assert_eq!(result.description, "Thunderstorm with slight hail");
    assert!(result.hourly_forecast.is_empty());
}
