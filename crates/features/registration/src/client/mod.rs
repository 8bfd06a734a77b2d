//! Backend seam of the registration flow.

mod error;
mod http;

pub use error::{ApiError, ApiErrorExt, ApiResult};
pub use http::HttpBackend;

use hustler_domain::api::{
    ApiMessage, CheckUserResponse, RegisterRequest, SendOtpRequest, VerifyOtpRequest,
};
use hustler_domain::hierarchy::AcademicOptions;
use std::future::Future;

/// The five calls the registration flow makes against the backend.
///
/// A non-2xx reply surfaces as [`ApiError::Rejected`] carrying the backend's `message`;
/// every other failure (connect, timeout, undecodable body) is a transport-level error.
pub trait RegistrationApi {
    /// `GET /api/options`: the whole academic hierarchy.
    fn fetch_options(&self) -> impl Future<Output = ApiResult<AcademicOptions>> + Send;

    /// `POST /api/send_otp`: used for the first send and for every resend.
    fn send_otp(
        &self,
        request: &SendOtpRequest,
    ) -> impl Future<Output = ApiResult<ApiMessage>> + Send;

    /// `POST /api/verify_otp`
    fn verify_otp(
        &self,
        request: &VerifyOtpRequest,
    ) -> impl Future<Output = ApiResult<ApiMessage>> + Send;

    /// `POST /api/register`
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = ApiResult<ApiMessage>> + Send;

    /// `GET /api/check_user/{tg_id}`: whether a Telegram account already has a profile.
    fn check_user(&self, tg_id: &str) -> impl Future<Output = ApiResult<CheckUserResponse>> + Send;
}
