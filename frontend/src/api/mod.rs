//! HTTP layer. The only place `Query` and `Mutation` values become requests.
//!
//! Every request carries the bearer token when one is stored. Non-2xx
//! responses are turned into `ApiError` from their body; a 401 additionally
//! expires the session. Nothing is retried.

use gloo_console::error;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use web_sys::FormData;

use common::api::{decode, Endpoint, Method, Mutation, Query, CSV_PREVIEW_PATH, LOGIN_PATH};
use common::error::ApiError;
use common::model::import::CsvPreview;
use common::requests::{LoginRequest, LoginResponse};

use crate::auth;
use crate::config::API_BASE;

fn builder(endpoint: &Endpoint) -> RequestBuilder {
    let url = endpoint.url(API_BASE);
    let builder = match endpoint.method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Put => Request::put(&url),
        Method::Patch => Request::patch(&url),
        Method::Delete => Request::delete(&url),
    };
    match auth::token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn send(request: Request) -> Result<String, ApiError> {
    let response = request.send().await.map_err(network)?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::from_response(status, &body))
    }
}

async fn dispatch(request: Request) -> Result<String, ApiError> {
    send(request).await.inspect_err(|err| {
        if *err == ApiError::Unauthorized {
            auth::expire_session();
        }
    })
}

pub async fn fetch<T: DeserializeOwned>(query: &Query) -> Result<T, ApiError> {
    let endpoint = query.endpoint();
    let request = builder(&endpoint).build().map_err(network)?;
    let body = dispatch(request).await.inspect_err(|err| {
        error!(format!("GET {} failed: {err}", endpoint.path));
    })?;
    decode(&body)
}

/// Issues a mutation and returns the raw response body.
pub async fn execute(mutation: &Mutation) -> Result<String, ApiError> {
    let endpoint = mutation.endpoint();
    let request = match mutation.body()? {
        Some(body) => builder(&endpoint).json(&body).map_err(network)?,
        None => builder(&endpoint).build().map_err(network)?,
    };
    dispatch(request).await.inspect_err(|err| {
        error!(format!("{} failed: {err}", mutation.describe()));
    })
}

pub async fn execute_json<T: DeserializeOwned>(mutation: &Mutation) -> Result<T, ApiError> {
    let body = execute(mutation).await?;
    decode(&body)
}

/// Uploads a CSV file for server-side preview/validation.
pub async fn preview_csv(file: web_sys::File) -> Result<CsvPreview, ApiError> {
    let form = FormData::new().map_err(|_| ApiError::Network("FormData unavailable".into()))?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|_| ApiError::Network("could not attach file".into()))?;

    let endpoint = Endpoint { method: Method::Post, path: CSV_PREVIEW_PATH.to_string() };
    let request = builder(&endpoint).body(form).map_err(network)?;
    let body = dispatch(request).await.inspect_err(|err| {
        error!(format!("CSV preview failed: {err}"));
    })?;
    decode(&body)
}

pub async fn login(credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
    let endpoint = Endpoint { method: Method::Post, path: LOGIN_PATH.to_string() };
    let request = builder(&endpoint).json(credentials).map_err(network)?;
    // Bad credentials are a 401 too; they must not bounce the login screen.
    let body = send(request).await?;
    decode(&body)
}
