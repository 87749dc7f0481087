//! Extractors whose rejections render as [`ApiError`].

use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use axum_extra::extract::Query;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use service::pagination::PageRequest;

use crate::errors::ApiError;

/// Typed path parameters.
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(IdPath(value))
    }
}

/// JSON request body.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 0-based page index, default 0
    pub page: Option<u64>,
    /// items per page, 1..=100, default 3
    pub size: Option<u64>,
    /// `property(,asc|desc)`; repeat for further keys
    #[serde(default)]
    pub sort: Vec<String>,
}

/// Validated paging options from `?page&size&sort`.
pub struct Paging(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for Paging
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state).await?;
        let page = PageRequest::from_params(params.page, params.size, &params.sort)?;
        Ok(Paging(page))
    }
}
