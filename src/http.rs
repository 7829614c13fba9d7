use crate::dns::log_viewer::LogViewer;
use axum::body::{Bytes, StreamBody};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures::stream::{self, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;

/// One router, mounted on every `http.listen_on` address, sharing the
/// same `LogViewer`.
pub fn router(log_viewer: Arc<LogViewer>) -> Router {
    Router::new()
        .route("/last", get(last))
        .route("/log", get(log))
        .fallback(fallback)
        .with_state(log_viewer)
}

async fn last(State(log_viewer): State<Arc<LogViewer>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        log_viewer.snapshot(),
    )
}

fn receiver_stream(receiver: mpsc::Receiver<String>) -> impl futures::Stream<Item = String> {
    stream::unfold(receiver, |mut receiver| async move {
        receiver.recv().await.map(|line| (line, receiver))
    })
}

async fn log(State(log_viewer): State<Arc<LogViewer>>) -> impl IntoResponse {
    let (snapshot, receiver) = log_viewer.subscribe();

    let initial = stream::once(async move { format!("{snapshot}\n") });
    let tail = receiver_stream(receiver).map(|line| format!("{line}\n"));
    let body = initial
        .chain(tail)
        .map(|chunk| Ok::<_, Infallible>(Bytes::from(chunk.into_bytes())));

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        StreamBody::new(body),
    )
}

/// The real documentation site is an external collaborator; this is a
/// placeholder for every other path.
async fn fallback() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "synthdns: an authoritative DNS server whose answers are encoded in the query name.\nSee /last and /log.\n",
    )
}
