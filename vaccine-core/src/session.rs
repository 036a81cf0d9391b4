use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use std::fmt::Debug;

use crate::{
    config::SessionConfig,
    error::{Result, VaccineError},
    model::VaccineInfoResponse,
    state::UsState,
};

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The one HTTP operation a [`Session`] needs.
///
/// Implementations must keep cookies between calls: the data endpoint only
/// answers once the warm-up request has set them.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &str, referer: Option<&str>) -> Result<HttpResponse>;
}

/// `reqwest` client with a cookie store.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|source| VaccineError::Transport { url: config.base_url.clone(), source })?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, referer: Option<&str>) -> Result<HttpResponse> {
        let mut request = self.http.get(url);
        if let Some(referer) = referer {
            request = request.header(header::REFERER, referer);
        }

        let transport_err = |source: reqwest::Error| VaccineError::Transport { url: url.to_string(), source };

        let res = request.send().await.map_err(transport_err)?;
        let status = res.status().as_u16();
        let body = res.text().await.map_err(transport_err)?;

        Ok(HttpResponse { status, body })
    }
}

/// Process-scoped HTTP session.
///
/// The first use issues one GET to the base URL so the server can set its
/// cookies; later uses go straight to the state endpoints.
#[derive(Debug)]
pub struct Session<T: HttpTransport = ReqwestTransport> {
    config: SessionConfig,
    transport: T,
    initialized: bool,
    warm_up_response: Option<HttpResponse>,
}

impl Session<ReqwestTransport> {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> Session<T> {
    pub fn with_transport(config: SessionConfig, transport: T) -> Self {
        Self { config, transport, initialized: false, warm_up_response: None }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Response of the warm-up request, once it has happened.
    pub fn warm_up_response(&self) -> Option<&HttpResponse> {
        self.warm_up_response.as_ref()
    }

    /// Issue the warm-up GET if it has not happened yet.
    ///
    /// Returns the fresh response on the call that performed it and `None`
    /// on every call after. A failed warm-up leaves the session
    /// uninitialized.
    pub async fn ensure_warm_up(&mut self) -> Result<Option<&HttpResponse>> {
        if self.initialized {
            return Ok(None);
        }

        let url = self.config.base_url.as_str();
        tracing::debug!(url, "warming up session");

        let res = self.transport.get(url, None).await?;
        check_status(url, &res)?;

        self.initialized = true;
        let res = self.warm_up_response.insert(res);
        Ok(Some(&*res))
    }

    /// Warm the session up and lend out the transport.
    ///
    /// Releasing the borrow is the end of the scope; nothing is torn down.
    pub async fn enter(&mut self) -> Result<&T> {
        self.ensure_warm_up().await?;
        Ok(&self.transport)
    }

    /// Fetch the raw status JSON for `state`.
    pub async fn fetch(&mut self, state: UsState) -> Result<Value> {
        let url = self.config.endpoint_url(state);
        let referer = self.config.base_url.clone();

        let transport = self.enter().await?;

        tracing::debug!(url = %url, %state, "fetching vaccine status");
        let res = transport.get(&url, Some(&referer)).await?;
        check_status(&url, &res)?;

        Ok(serde_json::from_str(&res.body)?)
    }

    /// Fetch and parse the vaccine status for `state`.
    pub async fn get_info(&mut self, state: UsState) -> Result<VaccineInfoResponse> {
        let body = self.fetch(state).await?;
        VaccineInfoResponse::from_json(&body)
    }
}

fn check_status(url: &str, res: &HttpResponse) -> Result<()> {
    if res.is_success() {
        return Ok(());
    }

    Err(VaccineError::Status {
        url: url.to_string(),
        status: res.status,
        body: truncate_body(&res.body),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
