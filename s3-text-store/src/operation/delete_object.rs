/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tracing::Instrument;

use crate::client::Handle;
use crate::error::{self, Error, ErrorKind};

/// Operation struct for deleting an object
#[derive(Clone, Default, Debug)]
pub(crate) struct DeleteObject;

impl DeleteObject {
    /// Execute a single `DeleteObject` operation
    pub(crate) async fn orchestrate(handle: Arc<Handle>, key: String) -> Result<(), Error> {
        handle
            .client()
            .delete_object()
            .bucket(handle.bucket())
            .key(&key)
            .send()
            .instrument(tracing::info_span!(
                "send-delete-object",
                bucket = handle.bucket(),
                key = %key
            ))
            .await
            .map_err(|err| error::from_sdk(ErrorKind::Delete, err))?;

        tracing::debug!(%key, "deleted object");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::delete_object::{DeleteObjectError, DeleteObjectOutput};
    use aws_smithy_mocks::{mock, mock_client, RuleMode};

    use crate::error::ErrorKind;

    fn test_client(s3_client: aws_sdk_s3::Client) -> crate::Client {
        let config = crate::Config::builder()
            .bucket("test-bucket")
            .client(s3_client)
            .build();
        crate::Client::new(config)
    }

    #[tokio::test]
    async fn test_basic_delete() {
        let delete_object = mock!(aws_sdk_s3::Client::delete_object)
            .match_requests(|r| {
                r.bucket() == Some("test-bucket") && r.key() == Some("textfile_test.txt")
            })
            .then_output(|| DeleteObjectOutput::builder().build());
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&delete_object]);

        test_client(s3_client)
            .delete_object("textfile_test.txt")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_backend_failure_is_a_delete_error() {
        let delete_object = mock!(aws_sdk_s3::Client::delete_object).then_error(|| {
            DeleteObjectError::generic(
                ErrorMetadata::builder()
                    .code("AccessDenied")
                    .message("access denied")
                    .build(),
            )
        });
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&delete_object]);

        let err = test_client(s3_client)
            .delete_object("textfile_test.txt")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Delete);
    }
}
