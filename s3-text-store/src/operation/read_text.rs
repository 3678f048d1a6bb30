/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::client::Handle;
use crate::error::{self, Error, ErrorKind};

/// Operation struct for reading a text object
#[derive(Clone, Default, Debug)]
pub(crate) struct ReadText;

impl ReadText {
    /// Execute a single `ReadText` operation
    pub(crate) async fn orchestrate(handle: Arc<Handle>, key: String) -> Result<String, Error> {
        let resp = handle
            .client()
            .get_object()
            .bucket(handle.bucket())
            .key(&key)
            .send()
            .instrument(tracing::info_span!(
                "send-get-object",
                bucket = handle.bucket(),
                key = %key
            ))
            .await
            .map_err(|err| error::from_sdk(ErrorKind::Read, err))?;

        // Collecting consumes the streaming body; its buffers are dropped with
        // it whether or not decoding succeeds.
        let data = resp
            .body
            .collect()
            .await
            .map_err(error::from_kind(ErrorKind::Read))?;
        let raw = String::from_utf8(data.to_vec()).map_err(error::from_kind(ErrorKind::Read))?;

        tracing::debug!(%key, "read text object");

        Ok(reassemble_lines(&raw))
    }
}

/// Reassemble the object line by line, joined with `"\n"` regardless of the
/// separators used when the content was stored.
fn reassemble_lines(raw: &str) -> String {
    raw.lines().collect::<Vec<_>>().join("\n")
}
