//! Test-only stand-in for an OpenSprinkler controller.
//!
//! A small axum app on a loopback port. Implements `/jn`, `/js`, `/cm` and
//! `/cv`; anything else gets the device's "page not found" code.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{OriginalUri, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;

use super::auth::AuthToken;
use super::config::Config;

pub(crate) const PASSWORD: &str = "opendoor";

#[derive(Debug, Default)]
pub(crate) struct DeviceState {
    pub password_hash: String,
    pub names: Vec<String>,
    pub sn: Vec<u8>,
    /// Seconds requested by the last `/cm ... en=1`.
    pub last_duration: Option<u32>,
    /// Paths seen, in order.
    pub requests: Vec<String>,
    /// When set, every request gets this (status, body) instead.
    pub reply: Option<(u16, String)>,
}

type Shared = Arc<Mutex<DeviceState>>;
type Params = Query<HashMap<String, String>>;

pub(crate) struct FakeDevice {
    addr: SocketAddr,
    state: Shared,
}

impl FakeDevice {
    pub async fn start(names: &[&str]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(Mutex::new(DeviceState {
            password_hash: AuthToken::from_password(PASSWORD).as_str().to_string(),
            names: names.iter().map(|s| s.to_string()).collect(),
            sn: vec![0; names.len()],
            ..DeviceState::default()
        }));

        let app = Router::new()
            .route("/jn", get(names_handler))
            .route("/js", get(status_handler))
            .route("/cm", get(manual_handler))
            .route("/cv", get(variables_handler))
            .fallback(unknown_handler)
            .with_state(Arc::clone(&state));

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn config(&self) -> Config {
        Config {
            host: self.addr.ip().to_string(),
            port: self.addr.port(),
            password: PASSWORD.to_string(),
            request_timeout: 2,
            ..Config::default()
        }
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut DeviceState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }
}

async fn names_handler(State(state): State<Shared>, Query(params): Params) -> Response {
    answer(&state, "/jn", &params, |s, _| {
        json!({ "snames": s.names, "maxlen": 32 })
    })
}

async fn status_handler(State(state): State<Shared>, Query(params): Params) -> Response {
    answer(&state, "/js", &params, |s, _| {
        json!({ "sn": s.sn, "nstations": s.sn.len() })
    })
}

/// `/cm?sid=&en=&t=`: run or stop one station.
async fn manual_handler(State(state): State<Shared>, Query(params): Params) -> Response {
    answer(&state, "/cm", &params, |s, params| {
        let number = |key: &str| params.get(key).and_then(|v| v.parse::<usize>().ok());

        let (Some(sid), Some(en)) = (number("sid"), number("en")) else {
            return result(16);
        };
        if sid >= s.sn.len() {
            return result(17);
        }
        if en == 1 {
            match number("t") {
                Some(t) if t > 0 => s.last_duration = Some(t as u32),
                _ => return result(17),
            }
        }
        s.sn[sid] = u8::from(en == 1);
        result(1)
    })
}

/// `/cv?rsn=1`: reset all stations.
async fn variables_handler(State(state): State<Shared>, Query(params): Params) -> Response {
    answer(&state, "/cv", &params, |s, params| {
        if params.get("rsn").map(String::as_str) == Some("1") {
            s.sn.iter_mut().for_each(|bit| *bit = 0);
        }
        result(1)
    })
}

async fn unknown_handler(
    State(state): State<Shared>,
    OriginalUri(uri): OriginalUri,
    Query(params): Params,
) -> Response {
    answer(&state, uri.path(), &params, |_, _| result(32))
}

fn result(code: i64) -> serde_json::Value {
    json!({ "result": code })
}

/// Records the request, then applies the reply override and the password
/// check before handing off to `body`.
fn answer(
    state: &Shared,
    path: &str,
    params: &HashMap<String, String>,
    body: impl FnOnce(&mut DeviceState, &HashMap<String, String>) -> serde_json::Value,
) -> Response {
    let mut s = state.lock().unwrap();
    s.requests.push(path.to_string());

    let (status, text) = match s.reply.clone() {
        Some((code, text)) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            text,
        ),
        None if params.get("pw") != Some(&s.password_hash) => {
            (StatusCode::OK, result(2).to_string())
        }
        None => (StatusCode::OK, body(&mut *s, params).to_string()),
    };

    (status, [(header::CONTENT_TYPE, "application/json")], text).into_response()
}
