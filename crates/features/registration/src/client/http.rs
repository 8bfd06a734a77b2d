use super::{ApiError, ApiErrorExt, ApiResult, RegistrationApi};
use hustler_domain::api::{
    ApiMessage, CheckUserResponse, RegisterRequest, SendOtpRequest, VerifyOtpRequest,
};
use hustler_domain::config::BackendConfig;
use hustler_domain::constants::{
    CHECK_USER_PATH, OPTIONS_PATH, REGISTER_PATH, SEND_OTP_PATH, VERIFY_OTP_PATH,
};
use hustler_domain::hierarchy::AcademicOptions;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// [`RegistrationApi`] over HTTP.
///
/// The client keeps a cookie store: the backend remembers the pending e-mail in its session
/// between `send_otp` and `register`, so one instance must serve the whole flow.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// # Errors
    /// [`ApiError::InvalidUrl`] when `config.url` is not an absolute http(s) URL, and
    /// [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> ApiResult<Self> {
        let base = Url::parse(config.url.trim()).map_err(|e| ApiError::InvalidUrl {
            message: format!("'{}': {e}", config.url).into(),
            context: None,
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                message: format!("'{}' is not an http(s) base URL", config.url).into(),
                context: None,
            });
        }

        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Building HTTP client")?;

        Ok(Self { client, base })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Joins `path` (and an optional escaped trailing segment) onto the base URL, keeping any
    /// path prefix the base already has.
    fn endpoint(&self, path: &str, tail: Option<&str>) -> ApiResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| ApiError::InvalidUrl {
                message: format!("'{}' cannot carry a path", self.base).into(),
                context: None,
            })?;
            segments.pop_if_empty().extend(path.trim_matches('/').split('/'));
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await.context("Sending request")?;
        decode(response).await
    }

    async fn post<B>(&self, path: &str, body: &B) -> ApiResult<ApiMessage>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(path, None)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await.context("Sending request")?;
        decode(response).await
    }
}

/// Success bodies must decode into `T`. Failure bodies are read leniently for their
/// `message`, since the backend does not always send JSON with an error status.
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let url = response.url().clone();

    if status.is_success() {
        return response.json::<T>().await.context("Decoding reply body");
    }

    let message = response.json::<ApiMessage>().await.ok().and_then(|reply| reply.message);
    warn!(%url, status = status.as_u16(), message = message.as_deref(), "Backend rejected request");
    Err(ApiError::Rejected { status: status.as_u16(), message, context: None })
}

impl RegistrationApi for HttpBackend {
    async fn fetch_options(&self) -> ApiResult<AcademicOptions> {
        let url = self.endpoint(OPTIONS_PATH, None)?;
        self.get(url).await.context("Loading academic options")
    }

    async fn send_otp(&self, request: &SendOtpRequest) -> ApiResult<ApiMessage> {
        self.post(SEND_OTP_PATH, request).await.context("Sending OTP")
    }

    async fn verify_otp(&self, request: &VerifyOtpRequest) -> ApiResult<ApiMessage> {
        self.post(VERIFY_OTP_PATH, request).await.context("Verifying OTP")
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<ApiMessage> {
        self.post(REGISTER_PATH, request).await.context("Registering")
    }

    async fn check_user(&self, tg_id: &str) -> ApiResult<CheckUserResponse> {
        let url = self.endpoint(CHECK_USER_PATH, Some(tg_id))?;
        self.get(url).await.context("Checking existing registration")
    }
}
