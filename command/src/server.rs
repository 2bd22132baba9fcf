use crate::dispatch::Bot;
use crate::Reply;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::body::HttpBody;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use utility::{Error, Result};

/// largest request body accepted, slash command forms are a few hundred bytes
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// serves slash commands on `addr` until ctrl-c or SIGTERM.
/// Every method and path is handed to the bot.
pub async fn serve(bot: Arc<Bot>, addr: SocketAddr) -> Result<()> {
    let make_service = make_service_fn(move |_conn| {
        let bot = bot.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
                let bot = bot.clone();
                async move { Ok::<_, Infallible>(handle_request(bot, req).await) }
            }))
        }
    });

    let server = Server::try_bind(&addr)
        .map_err(|e| Error::Custom(format!("can't listen on {}: {}", addr, e)))?
        .serve(make_service);
    info!(%addr, "listening for slash commands");

    server
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Custom(format!("server error: {}", e)))
}

/// reads the whole request body and answers it, oversized bodies get a 400
pub async fn handle_request(bot: Arc<Bot>, req: Request<Body>) -> Response<Body> {
    let reply = match read_body(req.into_body(), MAX_BODY_SIZE).await {
        Ok(body) => bot.handle(&body).await,
        Err(e) => {
            warn!("can't read request body: {}", e);
            Reply::error(StatusCode::BAD_REQUEST, e)
        }
    };
    into_response(reply)
}

/// collects `body` but stops as soon as more than `limit` bytes arrive
pub async fn read_body(mut body: Body, limit: usize) -> Result<Vec<u8>> {
    let too_large = || Error::Custom(format!("request body exceeds {} bytes", limit));
    if body.size_hint().lower() > limit as u64 {
        return Err(too_large());
    }

    let mut buf = Vec::new();
    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(|e| Error::Custom(e.to_string()))?;
        if buf.len() + chunk.len() > limit {
            return Err(too_large());
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn into_response(reply: Reply) -> Response<Body> {
    let mut res = Response::new(Body::from(reply.body));
    *res.status_mut() = reply.status;
    res.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    res
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                warn!("can't listen for SIGTERM: {}", e);
                let _ = ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }

    info!("shutting down");
}
