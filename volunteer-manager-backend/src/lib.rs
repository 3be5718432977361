pub mod components;
pub mod error;
pub mod routes;
pub mod tables;

use core::convert::Infallible;
use core::future::Future;
use core::pin::pin;
use std::sync::Arc;

use bytes::Bytes;
use error::AppError;
use http::{Method, Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use routes::Route;
use tokio::net::TcpListener;
use tokio::select;
use tokio::sync::watch;
use tracing::{error, info, info_span, warn, Instrument as _};
use volunteer_manager_config::Config;
use volunteer_manager_database::{get_database_connection, Pool};

/// Shared by all connections, read only.
pub struct AppState {
    pub pool: Pool,
    pub config: Config,
}

pub async fn handle(
    state: Arc<AppState>,
    request: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let span = info_span!("request", %method, path = %path);
    let result = route_request(&state, &method, &path)
        .instrument(span.clone())
        .await;
    let response = span.in_scope(|| match result {
        Ok(response) => {
            info!(status = %response.status(), "request handled");
            response
        }
        Err(app_error) => app_error.into_response(),
    });
    Ok(response)
}

async fn route_request(
    state: &AppState,
    method: &Method,
    path: &str,
) -> Result<Response<Full<Bytes>>, AppError> {
    let route = Route::parse(method, path)?;
    routes::dispatch(state, route).await
}

pub async fn setup_server(config: Config) -> Result<(TcpListener, Arc<AppState>), AppError> {
    info!("starting up server...");

    let pool = get_database_connection(&config.database_url)?;
    let listener = TcpListener::bind(config.listen_address).await?;
    info!(address = %config.listen_address, url = %config.url, "listening");

    Ok((listener, Arc::new(AppState { pool, config })))
}

#[allow(clippy::cognitive_complexity, clippy::redundant_pub_crate)]
pub async fn run_server(
    config: Config,
) -> Result<impl Future<Output = Result<(), AppError>>, AppError> {
    let (listener, state) = setup_server(config).await?;

    // tell the connections to shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let shutdown_tx = Arc::new(shutdown_tx);

    // wait for the connections to finish shutdown
    let (closed_tx, closed_rx) = watch::channel(());

    info!("started up server...");

    Ok(async move {
        let mut shutdown = pin!(shutdown_signal());
        loop {
            select! {
                accept = listener.accept() => {
                    let (socket, remote_address) = match accept {
                        Ok(accepted) => accepted,
                        Err(err) => {
                            error!("failed to accept connection: {err}");
                            continue;
                        }
                    };

                    let state = Arc::clone(&state);
                    let shutdown_tx = Arc::clone(&shutdown_tx);
                    let closed_rx = closed_rx.clone();

                    let fut = async move {
                        let socket = TokioIo::new(socket);
                        let hyper_service = hyper::service::service_fn(move |request| {
                            handle(Arc::clone(&state), request)
                        });

                        let builder = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new());
                        let mut connection = pin!(builder.serve_connection(socket, hyper_service));
                        let mut closed = pin!(shutdown_tx.closed());
                        let mut shutting_down = false;

                        loop {
                            select! {
                                connection_result = connection.as_mut() => {
                                    if let Err(err) = connection_result {
                                        error!("failed to serve connection: {err:#}");
                                    }
                                    break; // (gracefully) finished connection
                                }
                                () = closed.as_mut(), if !shutting_down => {
                                    shutting_down = true;
                                    connection.as_mut().graceful_shutdown();
                                }
                            }
                        }

                        drop(closed_rx);
                    };

                    tokio::spawn(fut.instrument(info_span!("connection", %remote_address)));
                }
                () = shutdown.as_mut() => {
                    warn!("shutting down, waiting for open connections");
                    drop(shutdown_rx); // initiate shutdown
                    drop(closed_rx);
                    closed_tx.closed().await;
                    break;
                }
            }
        }

        info!("server stopped");
        Ok(())
    })
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to install Ctrl+C handler: {err}");
        core::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(mut signal) => {
            signal.recv().await;
        }
        Err(err) => {
            error!("failed to install signal handler: {err}");
            core::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    core::future::pending::<()>().await;
}

#[allow(clippy::redundant_pub_crate)]
async fn shutdown_signal() {
    select! {
        () = ctrl_c() => {},
        () = terminate() => {},
    }
}
