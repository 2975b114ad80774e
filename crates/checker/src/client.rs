//! Blocking checker transport.
//!
//! One spawned thread per request; the result comes back through a shared
//! callback, so several containers' checks can be in flight at once and
//! finish in any order. Every path ends in exactly one callback invocation;
//! transport errors are carried as data, not surfaced as panics or dropped
//! requests.

use crate::wire::{self, CheckMatch};
use core_types::RequestId;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const MAX_RESPONSE_BYTES: u64 = 256 * 1024;

#[derive(Clone, Debug)]
pub struct CheckerConfig {
    /// Base URL of the checking service, without the path.
    pub base_url: String,
    /// Language code appended to the check path.
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            language: "fr".to_string(),
            timeout_secs: 10,
        }
    }
}

impl CheckerConfig {
    pub fn check_url(&self) -> String {
        format!(
            "{}/gc_text/{}",
            self.base_url.trim_end_matches('/'),
            self.language
        )
    }
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub request_id: RequestId,
    pub matches: Vec<CheckMatch>,
    pub status: Option<u16>,
    pub duration_ms: u128,
    pub error: Option<String>,
}

pub type CheckCallback = Arc<dyn Fn(CheckOutcome) + Send + Sync>;

/// Submit `text` for checking; `cb` fires exactly once with the outcome.
/// Empty input short-circuits without touching the network.
pub fn check_text(config: &CheckerConfig, request_id: RequestId, text: String, cb: CheckCallback) {
    if text.trim().is_empty() {
        log::debug!(target: "proof.checker", "empty text for request {request_id}, skipping");
        cb(CheckOutcome {
            request_id,
            matches: Vec::new(),
            status: None,
            duration_ms: 0,
            error: None,
        });
        return;
    }

    let url = config.check_url();
    let timeout = Duration::from_secs(config.timeout_secs);

    thread::spawn(move || {
        let start = std::time::Instant::now();

        let client = match reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent("Proofmark/0.1")
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                cb(CheckOutcome {
                    request_id,
                    matches: Vec::new(),
                    status: None,
                    duration_ms: 0,
                    error: Some(format!("client build error: {e}")),
                });
                return;
            }
        };

        let result = (|| -> Result<(Option<u16>, Vec<CheckMatch>), String> {
            let resp = client
                .post(&url)
                .form(&[("text", text.as_str())])
                .send()
                .map_err(|e| e.to_string())?;
            let status = resp.status().as_u16();
            if !resp.status().is_success() {
                return Err(format!("http status {status}"));
            }

            use std::io::Read;
            let mut body = String::new();
            resp.take(MAX_RESPONSE_BYTES)
                .read_to_string(&mut body)
                .map_err(|e| e.to_string())?;

            let matches = wire::parse_response(&body).map_err(|e| format!("decode error: {e}"))?;
            Ok((Some(status), matches))
        })();

        match result {
            Ok((status, matches)) => {
                log::debug!(
                    target: "proof.checker",
                    "request {request_id}: {} match(es) in {}ms",
                    matches.len(),
                    start.elapsed().as_millis()
                );
                cb(CheckOutcome {
                    request_id,
                    matches,
                    status,
                    duration_ms: start.elapsed().as_millis(),
                    error: None,
                });
            }
            Err(err) => {
                log::warn!(target: "proof.checker", "request {request_id} failed: {err}");
                cb(CheckOutcome {
                    request_id,
                    matches: Vec::new(),
                    status: None,
                    duration_ms: start.elapsed().as_millis(),
                    error: Some(err),
                });
            }
        }
    });
}
