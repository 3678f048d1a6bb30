/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! An Amazon S3 backed store for text objects.
//!
//! The store exposes four operations against a single configured bucket:
//! staged uploads under generated keys, lazy paginated key listing, reads,
//! and deletes. Uploads are staged through a local scratch file that is
//! removed on every exit path; listings walk the `ListObjectsV2` pagination
//! protocol one page at a time so unbounded buckets never require the full
//! key set in memory.
//!
//! # Examples
//!
//! Load the default configuration and upload some text:
//!
//! ```no_run
//! # async fn example() -> Result<(), s3_text_store::error::Error> {
//! let config = s3_text_store::from_env().bucket("my-bucket").load().await;
//! let client = s3_text_store::Client::new(config);
//!
//! let uploaded = client.upload_text("hello world").await?;
//! let content = client.read_text(uploaded.key()).await?;
//! assert_eq!(content, "hello world");
//! # Ok(())
//! # }
//! ```
//!
//! Walk every key in the bucket:
//!
//! ```no_run
//! # async fn example(client: &s3_text_store::Client) -> Result<(), s3_text_store::error::Error> {
//! let mut keys = client.list_keys();
//! while let Some(key) = keys.next_key().await {
//!     println!("{}", key?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! See the documentation for each client operation for more information:
//!
//! * [`upload_text`](crate::Client::upload_text) - stage and upload text under a generated key
//! * [`list_keys`](crate::Client::list_keys) - lazily list every object key in the bucket
//! * [`read_text`](crate::Client::read_text) - read and decode an object by key
//! * [`delete_object`](crate::Client::delete_object) - delete an object by key

/// Error types emitted by `s3-text-store`
pub mod error;

/// Object key generation
pub mod key;

/// Text store client
pub mod client;

/// Text store configuration
pub mod config;

/// Text store operations
pub mod operation;

pub use self::client::Client;
pub use self::config::Config;
use self::config::ConfigLoader;

/// Create a config loader
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
