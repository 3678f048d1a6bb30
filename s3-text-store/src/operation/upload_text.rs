/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::Instrument;

use crate::client::Handle;
use crate::error::{self, Error, ErrorKind};

/// Prefix used for scratch files staged during upload.
const SCRATCH_PREFIX: &str = "s3-text-upload-";

/// Operation struct for staged text uploads
#[derive(Clone, Default, Debug)]
pub(crate) struct UploadText;

impl UploadText {
    /// Execute a single `UploadText` operation
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        content: Bytes,
    ) -> Result<UploadTextOutput, Error> {
        let key = crate::key::generate();

        // The scratch file is deleted on drop, so it cannot outlive this call
        // regardless of which exit path is taken.
        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(".tmp")
            .tempfile()
            .map_err(error::from_kind(ErrorKind::Write))?;

        tokio::fs::write(scratch.path(), &content)
            .await
            .map_err(error::from_kind(ErrorKind::Write))?;

        let body = ByteStream::from_path(scratch.path())
            .await
            .map_err(error::from_kind(ErrorKind::Write))?;

        let resp = handle
            .client()
            .put_object()
            .bucket(handle.bucket())
            .key(&key)
            .body(body)
            .send()
            .instrument(tracing::info_span!(
                "send-put-object",
                bucket = handle.bucket(),
                key = %key
            ))
            .await
            .map_err(error::from_kind(ErrorKind::Write))?;

        tracing::debug!(e_tag = ?resp.e_tag(), %key, "uploaded text object");

        Ok(UploadTextOutput {
            key,
            e_tag: resp.e_tag().map(str::to_owned),
        })
    }
}

/// Response type for text uploads
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct UploadTextOutput {
    key: String,
    e_tag: Option<String>,
}

impl UploadTextOutput {
    /// The generated key the content was stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Entity tag reported by the backend for the stored object, if any.
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    /// Consume the output, returning the generated key.
    pub fn into_key(self) -> String {
        self.key
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::time::Duration;

    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::put_object::{PutObjectError, PutObjectOutput};
    use aws_smithy_mocks::{mock, mock_client, RuleMode};

    use super::SCRATCH_PREFIX;
    use crate::error::ErrorKind;

    fn test_client(s3_client: aws_sdk_s3::Client) -> crate::Client {
        let config = crate::Config::builder()
            .bucket("test-bucket")
            .client(s3_client)
            .build();
        crate::Client::new(config)
    }

    fn scratch_files() -> HashSet<PathBuf> {
        std::fs::read_dir(std::env::temp_dir())
            .expect("temp dir readable")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(SCRATCH_PREFIX))
            })
            .collect()
    }

    /// Assert no scratch file beyond `before` remains, tolerating scratch
    /// files other concurrently running tests are mid-way through using.
    async fn assert_no_new_scratch(before: &HashSet<PathBuf>) {
        for _ in 0..20 {
            if scratch_files().is_subset(before) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("scratch file leaked: {:?}", scratch_files());
    }

    #[tokio::test]
    async fn test_basic_upload() {
        let put_object = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|r| {
                r.bucket() == Some("test-bucket")
                    && r.key()
                        .is_some_and(|k| k.starts_with("textfile_") && k.ends_with(".txt"))
            })
            .then_output(|| PutObjectOutput::builder().e_tag("test-etag").build());

        let s3_client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_object]);
        let client = test_client(s3_client);

        let out = client.upload_text("hello world").await.unwrap();
        assert!(out.key().starts_with("textfile_"));
        assert!(out.key().ends_with(".txt"));
        assert_eq!(out.e_tag(), Some("test-etag"));
    }

    #[tokio::test]
    async fn test_scratch_file_removed_on_all_exit_paths() {
        let before = scratch_files();

        let put_ok = mock!(aws_sdk_s3::Client::put_object)
            .then_output(|| PutObjectOutput::builder().build());
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_ok]);
        let client = test_client(s3_client);
        client.upload_text("staged content").await.unwrap();
        assert_no_new_scratch(&before).await;

        let put_err = mock!(aws_sdk_s3::Client::put_object).then_error(|| {
            PutObjectError::generic(
                ErrorMetadata::builder()
                    .code("InternalError")
                    .message("we encountered an internal error")
                    .build(),
            )
        });
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_err]);
        let client = test_client(s3_client);
        let err = client.upload_text("staged content").await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Write);
        assert_no_new_scratch(&before).await;
    }
}
