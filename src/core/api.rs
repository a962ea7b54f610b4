//! OpenSprinkler HTTP API client.
//!
//! Every call is a GET with `pw=<md5>` plus endpoint parameters:
//! - `/jn` station names
//! - `/js` station status bits
//! - `/cm` manual station on/off
//! - `/cv` controller variables (`rsn=1` stops every station)
//!
//! The device reports most failures in-band as `{"result": n}` with HTTP 200,
//! so responses are decoded to JSON first and checked before typed parsing.

use futures::future::try_join;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::auth::AuthToken;
use super::config::{Config, MAX_DURATION_SECS};
use super::error::ApiError;
use super::types::Zone;
use super::zones_from_names;

const RESULT_OK: i64 = 1;
const RESULT_UNAUTHORIZED: i64 = 2;
const RESULT_OUT_OF_RANGE: i64 = 17;

#[derive(Debug, Deserialize)]
struct NamesReply {
    snames: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StatusReply {
    sn: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct OpenSprinkler {
    http: reqwest::Client,
    base_url: String,
    token: AuthToken,
}

impl OpenSprinkler {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            token: AuthToken::from_password(&config.password),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn station_names(&self) -> Result<Vec<String>, ApiError> {
        let reply: NamesReply = self.fetch("jn", &[]).await?;
        Ok(reply.snames)
    }

    /// One bool per device station, in station order.
    pub async fn station_status(&self) -> Result<Vec<bool>, ApiError> {
        let reply: StatusReply = self.fetch("js", &[]).await?;
        Ok(reply.sn.into_iter().map(|bit| bit != 0).collect())
    }

    /// Named stations with their current status. Names and status are
    /// requested concurrently.
    pub async fn zones(&self) -> Result<Vec<Zone>, ApiError> {
        let (names, status) = try_join(self.station_names(), self.station_status()).await?;

        let mut zones = zones_from_names(&names);
        super::apply_status(&mut zones, &status);
        Ok(zones)
    }

    pub async fn activate(&self, station: usize, duration_secs: u32) -> Result<(), ApiError> {
        if !(1..=MAX_DURATION_SECS).contains(&duration_secs) {
            warn!(station, duration_secs, "refusing out-of-range duration");
            return Err(ApiError::Rejected {
                code: RESULT_OUT_OF_RANGE,
            });
        }

        self.command(
            "cm",
            &[
                ("sid", station.to_string()),
                ("en", "1".to_string()),
                ("t", duration_secs.to_string()),
            ],
        )
        .await
    }

    pub async fn deactivate(&self, station: usize) -> Result<(), ApiError> {
        self.command("cm", &[("sid", station.to_string()), ("en", "0".to_string())])
            .await
    }

    /// Reset all stations, including ones started by programs.
    pub async fn stop_all(&self) -> Result<(), ApiError> {
        self.command("cv", &[("rsn", "1".to_string())]).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let value = self.get(endpoint, params).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Commands answer with `{"result": 1}` on success and nothing else.
    async fn command(&self, endpoint: &str, params: &[(&str, String)]) -> Result<(), ApiError> {
        let value = self.get(endpoint, params).await?;
        match value.get("result").and_then(Value::as_i64) {
            Some(RESULT_OK) => Ok(()),
            _ => Err(ApiError::Parse(format!(
                "/{endpoint} reply has no result code: {value}"
            ))),
        }
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(endpoint, ?params, "device request");

        let response = self
            .http
            .get(&url)
            .query(&[("pw", self.token.as_str())])
            .query(params)
            .send()
            .await
            .inspect_err(|e| warn!(endpoint, error = %e, "device request failed"))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Auth);
        }
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "device answered with an error status");
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body).inspect_err(|e| {
            warn!(endpoint, error = %e, "device sent malformed JSON");
        })?;

        check_result(&value)?;
        Ok(value)
    }
}

/// Map the device's in-band `result` code, if any, to an error.
fn check_result(value: &Value) -> Result<(), ApiError> {
    match value.get("result").and_then(Value::as_i64) {
        None | Some(RESULT_OK) => Ok(()),
        Some(RESULT_UNAUTHORIZED) => Err(ApiError::Auth),
        Some(code) => Err(ApiError::Rejected { code }),
    }
}
