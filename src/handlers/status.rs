// src/handlers/status.rs
use actix_web::{web, HttpRequest, HttpResponse};
use governor::{RateLimiter, clock::DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use log::{debug, error};
use std::net::IpAddr;
use crate::poller::StatusPoller;
use crate::status_api::StatusSource;
use crate::render::html::render_page;
use crate::utils::{current_year, peer_ip, RequestError};

pub type RefreshLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

pub async fn page<S: StatusSource + 'static>(poller: web::Data<StatusPoller<S>>) -> HttpResponse {
    let snapshot = poller.snapshot();
    let body = render_page(&snapshot, &poller.config().server_address, current_year());
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub async fn get_status<S: StatusSource + 'static>(poller: web::Data<StatusPoller<S>>) -> HttpResponse {
    HttpResponse::Ok().json(poller.snapshot())
}

pub async fn refresh<S: StatusSource + 'static>(
    req: HttpRequest,
    poller: web::Data<StatusPoller<S>>,
    rate_limiter: web::Data<RefreshLimiter>,
) -> Result<HttpResponse, RequestError> {
    let ip = peer_ip(&req)?;

    if rate_limiter.check_key(&ip).is_err() {
        error!("Rate limit exceeded for manual refresh for ip: {}", ip);
        return Err(RequestError::RateLimitExceeded);
    }

    debug!("Manual refresh requested by {}", ip);
    poller.refresh_status().await;
    Ok(HttpResponse::Ok().json(poller.snapshot()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use std::net::SocketAddr;
    use std::num::NonZeroU32;
    use governor::Quota;
    use crate::config::Config;
    use crate::status_api::scripted::ScriptedSource;

    type TestPoller = StatusPoller<ScriptedSource>;

    fn poller(replies: Vec<Result<&str, ()>>) -> web::Data<TestPoller> {
        web::Data::new(StatusPoller::new(Config::default(), ScriptedSource::immediate(replies)))
    }

    fn limiter(burst: u32) -> web::Data<RefreshLimiter> {
        let quota = Quota::per_hour(NonZeroU32::new(burst).unwrap());
        web::Data::new(RateLimiter::keyed(quota))
    }

    fn peer() -> SocketAddr {
        "10.0.0.7:41000".parse().unwrap()
    }

    #[actix_web::test]
    async fn serves_page_and_snapshot() {
        let app = test::init_service(
            App::new()
                .app_data(poller(vec![]))
                .route("/", web::get().to(page::<ScriptedSource>))
                .route("/api/status", web::get().to(get_status::<ScriptedSource>)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(r#"<span id="ip-text">play.toxicraft.fun:25569</span>"#));

        let req = test::TestRequest::get().uri("/api/status").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["address"], "play.toxicraft.fun:25569");
        assert_eq!(json["roster"]["kind"], "loading");
    }

    #[actix_web::test]
    async fn refresh_renders_fetched_status() {
        let app = test::init_service(
            App::new()
                .app_data(poller(vec![Ok(
                    r#"{"online":true,"version":"1.20.1","players":{"online":2,"max":20,"list":["Alice","Bob"]}}"#,
                )]))
                .app_data(limiter(5))
                .route("/api/refresh", web::post().to(refresh::<ScriptedSource>)),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/refresh").peer_addr(peer()).to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["player_count"], "2 / 20 players");
        assert_eq!(json["version"], "Version 1.20.1");
        assert_eq!(json["roster"]["kind"], "players");
        assert_eq!(json["roster"]["cards"][1]["name"], "Bob");
    }

    #[actix_web::test]
    async fn refresh_reports_failure_then_rate_limits() {
        let app = test::init_service(
            App::new()
                .app_data(poller(vec![Err(())]))
                .app_data(limiter(1))
                .route("/api/refresh", web::post().to(refresh::<ScriptedSource>)),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/refresh").peer_addr(peer()).to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["roster"]["kind"], "failed");
        assert_eq!(json["hero"], "Failed to fetch status.");
        assert_eq!(json["refresh"]["enabled"], true);

        let req = test::TestRequest::post().uri("/api/refresh").peer_addr(peer()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_web::test]
    async fn refresh_without_peer_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(poller(vec![]))
                .app_data(limiter(5))
                .route("/api/refresh", web::post().to(refresh::<ScriptedSource>)),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/refresh").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let app = test::init_service(
            App::new().route("/health", web::get().to(crate::handlers::index::health)),
        )
        .await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json["status"], "ok");
    }
}
