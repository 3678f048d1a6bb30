/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Request routing for the text store REST API.
//!
//! Four routes front the store operations, plus a health endpoint for
//! orchestration probes. Not-found errors map to 404; every other store
//! failure maps to 500 with the full error context as the body.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;

use aws_smithy_types::error::display::DisplayErrorContext;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use s3_text_store::error::Error;
use tracing::warn;

/// Separator appended after each key in the `get-keys` response body.
const KEY_SEPARATOR: &str = "::";

/// Path prefix for the read route; the remainder of the path is the key.
const READ_FILE_PREFIX: &str = "/api/s3/read-file/";

/// HTTP service exposing the text store REST API.
#[derive(Debug, Clone)]
pub struct ApiService {
    client: s3_text_store::Client,
}

impl ApiService {
    /// Create a new service backed by the given store client.
    pub fn new(client: s3_text_store::Client) -> Self {
        Self { client }
    }
}

impl Service<Request<Incoming>> for ApiService {
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let client = self.client.clone();
        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(err) => {
                    warn!(error = %err, "failed to read request body");
                    return Ok(text_response(
                        StatusCode::BAD_REQUEST,
                        "failed to read request body",
                    ));
                }
            };
            Ok(route(&client, &parts.method, parts.uri.path(), body).await)
        })
    }
}

/// Dispatch a request to the matching handler.
pub(crate) async fn route(
    client: &s3_text_store::Client,
    method: &Method,
    path: &str,
    body: Bytes,
) -> Response<Full<Bytes>> {
    if *method == Method::POST && path == "/api/s3/upload-text" {
        upload_text(client, body).await
    } else if *method == Method::GET && path == "/api/s3/get-keys" {
        get_keys(client).await
    } else if *method == Method::GET && path.starts_with(READ_FILE_PREFIX) {
        read_file(client, &path[READ_FILE_PREFIX.len()..]).await
    } else if *method == Method::DELETE && path == "/api/s3/delete-file" {
        delete_file(client, body).await
    } else if *method == Method::GET && path == "/health" {
        text_response(StatusCode::OK, "ok")
    } else {
        text_response(StatusCode::NOT_FOUND, "not found")
    }
}

async fn upload_text(client: &s3_text_store::Client, body: Bytes) -> Response<Full<Bytes>> {
    match client.upload_text(body).await {
        Ok(uploaded) => text_response(
            StatusCode::OK,
            format!("File uploaded: {}", uploaded.key()),
        ),
        Err(err) => error_response(&err),
    }
}

async fn get_keys(client: &s3_text_store::Client) -> Response<Full<Bytes>> {
    let mut keys = client.list_keys();
    let mut listing = String::new();
    while let Some(key) = keys.next_key().await {
        match key {
            Ok(key) => {
                listing.push_str(&key);
                listing.push_str(KEY_SEPARATOR);
            }
            Err(err) => return error_response(&err),
        }
    }
    text_response(StatusCode::OK, listing)
}

async fn read_file(client: &s3_text_store::Client, key: &str) -> Response<Full<Bytes>> {
    match client.read_text(key).await {
        Ok(content) => text_response(StatusCode::OK, content),
        Err(err) => error_response(&err),
    }
}

async fn delete_file(client: &s3_text_store::Client, body: Bytes) -> Response<Full<Bytes>> {
    let key = String::from_utf8_lossy(&body).into_owned();
    match client.delete_object(&key).await {
        Ok(()) => text_response(StatusCode::OK, format!("File deleted: {key}")),
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &Error) -> Response<Full<Bytes>> {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let message = format!("{}", DisplayErrorContext(err));
    warn!(%status, error = %message, "request failed");
    text_response(status, message)
}

fn text_response(status: StatusCode, body: impl Into<String>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body.into())))
        .expect("valid response")
}
