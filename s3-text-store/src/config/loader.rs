/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::config::Builder;
use crate::Config;

/// Environment variable consulted for the target bucket when none is set
/// explicitly on the loader.
const BUCKET_ENV_VAR: &str = "S3_BUCKET_NAME";

/// Load text store [`Config`] from the environment.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    bucket: Option<String>,
}

impl ConfigLoader {
    /// Set the bucket every store operation targets.
    ///
    /// Overrides the `S3_BUCKET_NAME` environment variable.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Load the default configuration
    ///
    /// Region and credentials are resolved through the default provider chain
    /// (environment variables, shared config files, IMDS). The bucket comes
    /// from the loader if set, otherwise from `S3_BUCKET_NAME`.
    pub async fn load(self) -> Config {
        let bucket = self
            .bucket
            .or_else(|| std::env::var(BUCKET_ENV_VAR).ok())
            .expect("bucket set");

        let shared_config = aws_config::from_env().load().await;
        let client = aws_sdk_s3::Client::new(&shared_config);

        Builder::default().bucket(bucket).client(client).build()
    }
}
