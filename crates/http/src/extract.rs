//! Request extractors that report failures in the standard error format.

use anyhow::anyhow;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use courselib_kernel::Validate;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body whose rejection renders as a `bad_request` [`AppError`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "rejected request body");
                Err(AppError::bad_request(rejection.body_text()))
            }
        }
    }
}

/// Path parameters whose rejection renders as an [`AppError`].
///
/// Unparseable segments are a `bad_request`; a handler asking for captures
/// its route does not have is an internal error.
#[derive(Debug, Clone)]
pub struct PathParams<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) if rejection.status().is_server_error() => {
                Err(AppError::Internal(anyhow!(rejection.body_text())))
            }
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "rejected path parameters");
                Err(AppError::bad_request(rejection.body_text()))
            }
        }
    }
}

/// JSON body that must pass [`Validate`] before the handler runs.
///
/// Validation failures render as `422` with one detail per violated rule.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
