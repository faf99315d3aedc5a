//! HTTP plumbing between the client and the parking backend.
//!
//! `Transport` is the seam the API wrappers talk through: `HttpTransport` sends real
//! requests with `reqwest`, tests substitute canned replies.
use std::time::Duration;

use log::debug;
use parking_common::net;
use parking_common::{ParkingError, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// Raw answer of the backend: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    /// `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the backend.
///
/// An `Err` means no HTTP response arrived at all; any response, whatever its
/// status, is returned as `Ok(HttpReply)`.
pub trait Transport {
    fn get(&self, path: &str) -> Result<HttpReply>;
    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, path: &str) -> Result<HttpReply> {
        (**self).get(path)
    }

    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply> {
        (**self).post_json(path, body)
    }
}

/// Blocking `reqwest` transport rooted at the backend base URL.
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(1)
            .default_headers(headers)
            .build()
            .map_err(|e| ParkingError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim().to_string(),
            client,
        })
    }

    fn read(response: reqwest::blocking::Response) -> Result<HttpReply> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ParkingError::Transport(e.to_string()))?;
        debug!("<- {} {}", status, body);
        Ok(HttpReply { status, body })
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<HttpReply> {
        let url = net::url(&self.base_url, path);
        debug!("-> GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ParkingError::Transport(e.to_string()))?;
        Self::read(response)
    }

    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply> {
        let url = net::url(&self.base_url, path);
        debug!("-> POST {} {}", url, body);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| ParkingError::Transport(e.to_string()))?;
        Self::read(response)
    }
}

#[cfg(test)]
pub mod fake {
    //! Canned-reply transport for tests.
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// One request the fake received.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Call {
        pub method: &'static str,
        pub path: String,
        pub body: Option<serde_json::Value>,
    }

    /// Answers requests from a queue of replies and records every call.
    #[derive(Default)]
    pub struct FakeTransport {
        replies: Mutex<VecDeque<Result<HttpReply>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, status: u16, body: &str) -> Self {
            self.replies.lock().unwrap().push_back(Ok(HttpReply {
                status,
                body: body.to_string(),
            }));
            self
        }

        pub fn unreachable(self) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(ParkingError::Transport("connection refused".into())));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn next(&self, call: Call) -> Result<HttpReply> {
            self.calls.lock().unwrap().push(call);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ParkingError::Transport("no reply queued".into())))
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, path: &str) -> Result<HttpReply> {
            self.next(Call {
                method: "GET",
                path: path.to_string(),
                body: None,
            })
        }

        fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply> {
            self.next(Call {
                method: "POST",
                path: path.to_string(),
                body: Some(body.clone()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_2xx_only() {
        let reply = |status| HttpReply { status, body: String::new() };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(302).is_success());
        assert!(!reply(400).is_success());
        assert!(!reply(500).is_success());
    }

    #[test]
    fn builds_client_for_base_url() {
        let transport = HttpTransport::new(" http://127.0.0.1:5000/ ", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.base_url, "http://127.0.0.1:5000/");
    }
}
