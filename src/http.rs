// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;

/// A request header as name/value pair
pub type Header<'a> = (&'a str, &'a str);

/// HTTP response with status and the fully buffered body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction for testability
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET request and buffer the response body
    async fn get(&self, url: &str, headers: &[Header<'_>]) -> Result<HttpResponse, reqwest::Error>;

    /// Issue a POST request with a JSON body and buffer the response body
    async fn post_json(
        &self,
        url: &str,
        headers: &[Header<'_>],
        body: &serde_json::Value,
    ) -> Result<HttpResponse, reqwest::Error>;
}

/// Default HTTP client implementation using reqwest
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new ReqwestClient with default settings
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a new ReqwestClient with a custom reqwest::Client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(
        request: reqwest::RequestBuilder,
        headers: &[Header<'_>],
    ) -> Result<HttpResponse, reqwest::Error> {
        let request = headers
            .iter()
            .fold(request, |request, (name, value)| request.header(*name, *value));

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse { status, body })
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, headers: &[Header<'_>]) -> Result<HttpResponse, reqwest::Error> {
        Self::send(self.client.get(url), headers).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[Header<'_>],
        body: &serde_json::Value,
    ) -> Result<HttpResponse, reqwest::Error> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());

        Self::send(request, headers).await
    }
}

/// Canned-response client shared by the unit tests
#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::*;

    /// A request as seen by the mock client
    #[derive(Debug, Clone)]
    pub(crate) struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub headers: Vec<(String, String)>,
        pub body: Option<serde_json::Value>,
    }

    struct Route {
        method: &'static str,
        url_fragment: String,
        status: u16,
        body: String,
    }

    /// Serves the first route whose method matches and whose fragment is
    /// contained in the requested URL; anything else answers 404.
    #[derive(Default)]
    pub(crate) struct MockHttpClient {
        routes: Vec<Route>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockHttpClient {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn on_get(self, url_fragment: &str, status: u16, body: &str) -> Self {
            self.route("GET", url_fragment, status, body)
        }

        pub(crate) fn on_post(self, url_fragment: &str, status: u16, body: &str) -> Self {
            self.route("POST", url_fragment, status, body)
        }

        fn route(mut self, method: &'static str, url_fragment: &str, status: u16, body: &str) -> Self {
            self.routes.push(Route {
                method,
                url_fragment: url_fragment.to_string(),
                status,
                body: body.to_string(),
            });
            self
        }

        pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn posts(&self) -> Vec<RecordedRequest> {
            self.requests()
                .into_iter()
                .filter(|request| request.method == "POST")
                .collect()
        }

        fn respond(
            &self,
            method: &'static str,
            url: &str,
            headers: &[Header<'_>],
            body: Option<serde_json::Value>,
        ) -> HttpResponse {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                body,
            });

            self.routes
                .iter()
                .find(|route| route.method == method && url.contains(&route.url_fragment))
                .map(|route| HttpResponse {
                    status: route.status,
                    body: Bytes::from(route.body.clone()),
                })
                .unwrap_or(HttpResponse {
                    status: 404,
                    body: Bytes::new(),
                })
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(&self, url: &str, headers: &[Header<'_>]) -> Result<HttpResponse, reqwest::Error> {
            Ok(self.respond("GET", url, headers, None))
        }

        async fn post_json(
            &self,
            url: &str,
            headers: &[Header<'_>],
            body: &serde_json::Value,
        ) -> Result<HttpResponse, reqwest::Error> {
            Ok(self.respond("POST", url, headers, Some(body.clone())))
        }
    }
}
