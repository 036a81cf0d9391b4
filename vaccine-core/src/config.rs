use crate::state::UsState;

/// Landing page for CVS vaccine scheduling. The warm-up request goes here and
/// every state endpoint hangs off it.
pub const BASE_URL: &str = "https://www.cvs.com/immunizations/covid-19-vaccine";

/// Settings for a [`Session`](crate::Session).
///
/// Nothing is read from disk or the environment; the defaults point at the
/// live CVS site and tests swap in their own base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Warm-up URL, also sent as `Referer` and used to build state endpoints.
    pub base_url: String,

    /// Value of the `User-Agent` header on every request.
    pub user_agent: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SessionConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Status endpoint for `state` under the configured base URL.
    pub fn endpoint_url(&self, state: UsState) -> String {
        endpoint_url_for(&self.base_url, state)
    }
}

pub(crate) fn endpoint_url_for(base_url: &str, state: UsState) -> String {
    format!("{base_url}.vaccine-status.{}.json?vaccineinfo", state.abbr().to_lowercase())
}
