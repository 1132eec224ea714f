//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the JSON and static-file handlers
//! - Wire up middleware (tracing, request timeout, access logging)
//! - Dev mode: plain HTTP; prod mode: TLS plus an HTTP→HTTPS redirect
//!   listener

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderValue, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use chrono::Utc;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::http::envelope::LogDetail;
use crate::http::mint::mint_handler;
use crate::mint::Minter;
use crate::observability::logging::{AccessRecord, RequestLogger};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub minter: Arc<Minter>,
    pub logger: RequestLogger,
}

/// HTTP server for the mint service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, minter: Arc<Minter>, logger: RequestLogger) -> Self {
        let state = AppState { minter, logger };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Exposed so tests can drive the exact production routing.
    pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let web_root = PathBuf::from(&config.web.web_root);

        // Regular content may change with some regularity; content under
        // static/ need not expire often.
        let default_files = ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CACHE_CONTROL,
                cache_header(config.web.default_max_age_secs),
            ))
            .service(ServeDir::new(&web_root));
        let static_files = ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CACHE_CONTROL,
                cache_header(config.web.static_max_age_secs),
            ))
            .service(ServeDir::new(web_root.join("static")));

        Router::new()
            .route("/json/mint", post(mint_handler))
            .nest_service("/static", static_files)
            .fallback_service(default_files)
            .layer(middleware::from_fn_with_state(
                state.logger.clone(),
                access_log,
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the server until shutdown.
    pub async fn run(self) -> Result<(), std::io::Error> {
        if self.config.listener.dev {
            // Dev serves plain HTTP so there is no TLS cert management.
            tracing::warn!("Starting dev mode server");
            let listener = TcpListener::bind(&self.config.listener.bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");
            axum::serve(
                listener,
                self.router
                    .into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown_signal())
            .await?;
            return Ok(());
        }

        // In prod any plain-HTTP request is redirected to its HTTPS
        // equivalent on the public hostname.
        let redirect = redirect_router(self.config.listener.site_hostname.clone());
        let redirect_listener =
            TcpListener::bind(&self.config.listener.redirect_bind_address).await?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(redirect_listener, redirect.into_make_service()).await {
                tracing::error!(error = %e, "redirect listener failed");
            }
        });

        let tls = self.config.listener.tls.as_ref().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "TLS configuration required outside dev mode",
            )
        })?;
        let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;
        let addr: SocketAddr = self
            .config
            .listener
            .bind_address
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        tracing::info!(address = %addr, "Listening for TLS connections");
        axum_server::bind_rustls(addr, rustls)
            .serve(
                self.router
                    .into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await?;
        Ok(())
    }
}

/// Log every request as one CSV access-log line, picking up any detail a
/// handler left in the response extensions.
async fn access_log(
    State(logger): State<RequestLogger>,
    request: Request,
    next: Next,
) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.to_string())
        .unwrap_or_default();
    let host = header_string(&request, header::HOST);
    let referer = header_string(&request, header::REFERER);
    let uri = request.uri().to_string();

    let request_id = Uuid::new_v4();
    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        uri = %uri,
        "Dispatching request"
    );

    let response = next.run(request).await;

    let detail = response
        .extensions()
        .get::<LogDetail>()
        .map(|detail| detail.0.clone());
    logger.record(AccessRecord {
        timestamp: Utc::now(),
        status: response.status().as_u16(),
        remote_addr,
        host,
        uri,
        referer,
        detail,
        username: None,
    });

    response
}

fn header_string(request: &Request, name: header::HeaderName) -> String {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn cache_header(max_age_secs: u64) -> HeaderValue {
    HeaderValue::try_from(format!("max-age={max_age_secs}, public"))
        .unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn redirect_router(hostname: String) -> Router {
    Router::new().fallback(move |uri: Uri| {
        let target = format!("https://{hostname}{uri}");
        async move { (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response() }
    })
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
