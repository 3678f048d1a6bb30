/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use bytes::Bytes;

use crate::error::Error;
use crate::operation;
use crate::operation::list_keys::KeyStream;
use crate::operation::upload_text::UploadTextOutput;
use crate::Config;

/// Text store client for Amazon Simple Storage Service.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations, e.g. config, env details, etc
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: Config,
}

impl Handle {
    /// The bucket every operation targets.
    pub(crate) fn bucket(&self) -> &str {
        self.config.bucket()
    }

    /// The underlying SDK client.
    pub(crate) fn client(&self) -> &aws_sdk_s3::Client {
        self.config.client()
    }
}

impl Client {
    /// Creates a new client from a text store config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Upload text content to the bucket under a freshly generated key.
    ///
    /// The content is staged to a local scratch file and transferred as a
    /// single `PutObject` request; the scratch file is removed whether or not
    /// the transfer succeeds. Success means the backend accepted the write;
    /// no read-back verification is performed, so visibility to a subsequent
    /// list or read is whatever the backend guarantees.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &s3_text_store::Client) -> Result<(), s3_text_store::error::Error> {
    /// let uploaded = client.upload_text("hello world").await?;
    /// println!("stored as {}", uploaded.key());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_text(
        &self,
        content: impl Into<Bytes>,
    ) -> Result<UploadTextOutput, Error> {
        operation::upload_text::UploadText::orchestrate(self.handle.clone(), content.into()).await
    }

    /// Lazily list every object key in the bucket.
    ///
    /// Returns a [`KeyStream`] that fetches one `ListObjectsV2` page at a
    /// time as the consumer demands more keys. Each call starts a fresh
    /// backend-side pagination cursor; keys are yielded in backend order with
    /// no caching, deduplication, or sorting.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &s3_text_store::Client) -> Result<(), s3_text_store::error::Error> {
    /// let mut keys = client.list_keys();
    /// while let Some(key) = keys.next_key().await {
    ///     println!("{}", key?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn list_keys(&self) -> KeyStream {
        operation::list_keys::ListKeys::orchestrate(self.handle.clone())
    }

    /// Read an object by key and decode it as text.
    ///
    /// The object body is decoded as UTF-8 and reassembled line by line,
    /// joined with `"\n"` regardless of the separators used when the content
    /// was stored. Fails with [`ErrorKind::NotFound`] when the key does not
    /// exist.
    ///
    /// [`ErrorKind::NotFound`]: crate::error::ErrorKind::NotFound
    pub async fn read_text(&self, key: impl Into<String>) -> Result<String, Error> {
        operation::read_text::ReadText::orchestrate(self.handle.clone(), key.into()).await
    }

    /// Delete an object by key.
    ///
    /// Deleting a key that does not exist succeeds; the backend's
    /// `DeleteObject` is idempotent and this client adds no existence check.
    pub async fn delete_object(&self, key: impl Into<String>) -> Result<(), Error> {
        operation::delete_object::DeleteObject::orchestrate(self.handle.clone(), key.into()).await
    }
}
