mod common;

use ambient_sky::{
    app::{
        events::AppEvent,
        state::{AppMode, AppState},
    },
    data::forecast::{FetchError, ForecastClient},
    domain::weather::{Location, SkyCategory},
};
use common::{mock_forecast_payload, quiet_cli};
use tokio::sync::mpsc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, query_param},
};

async fn server_with(status: u16, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn fetch_decodes_current_and_daily_blocks() {
    let server = server_with(200, mock_forecast_payload(61)).await;
    let client = ForecastClient::with_base_url(server.uri()).unwrap();

    let bundle = client.fetch(Location::christchurch()).await.unwrap();

    assert_eq!(bundle.current_weather_code(), 61);
    assert!(bundle.current.is_day);
    assert!((bundle.current.precipitation_mm - 0.4).abs() < f32::EPSILON);
    assert_eq!(bundle.daily.len(), 3);
    assert_eq!(bundle.daily[2].weather_code, None);
    assert_eq!(bundle.high_low_today(), Some((21, 10)));
    assert!(bundle.sunrise_next().is_some());
}

#[tokio::test]
async fn fetch_sends_the_open_meteo_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("latitude", "-43.5321"))
        .and(query_param("longitude", "172.6362"))
        .and(query_param("timezone", "auto"))
        .and(query_param("forecast_days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_forecast_payload(0)))
        .expect(1)
        .mount(&server)
        .await;

    let client = ForecastClient::with_base_url(server.uri()).unwrap();
    client.fetch(Location::christchurch()).await.unwrap();
}

#[tokio::test]
async fn server_errors_surface_as_status() {
    let server = server_with(503, serde_json::json!({"reason": "down"})).await;
    let client = ForecastClient::with_base_url(server.uri()).unwrap();

    let err = client.fetch(Location::christchurch()).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(status) if status.as_u16() == 503));
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let server = server_with(200, serde_json::json!({"current": {"weather_code": "x"}})).await;
    let client = ForecastClient::with_base_url(server.uri()).unwrap();

    let err = client.fetch(Location::christchurch()).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "{err}");
}

#[tokio::test]
async fn refresh_through_the_app_reaches_the_sky() {
    let server = server_with(200, mock_forecast_payload(73)).await;
    let mut cli = quiet_cli();
    cli.forecast_url = Some(server.uri());
    let mut state = AppState::new(&cli);
    let (tx, mut rx) = mpsc::channel(16);

    state.handle_event(AppEvent::TickRefresh, &tx, &cli).await.unwrap();
    loop {
        let event = rx.recv().await.expect("channel open");
        let done = matches!(
            event,
            AppEvent::FetchSucceeded(_) | AppEvent::FetchFailed(_)
        );
        state.handle_event(event, &tx, &cli).await.unwrap();
        if done {
            break;
        }
    }

    assert_eq!(state.mode, AppMode::Ready);
    assert_eq!(state.sky_category(), Some(SkyCategory::Snow));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
