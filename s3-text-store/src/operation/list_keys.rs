/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::VecDeque;
use std::sync::Arc;

use aws_sdk_s3::{
    error::SdkError,
    operation::list_objects_v2::{ListObjectsV2Error, ListObjectsV2Input, ListObjectsV2Output},
};
use aws_smithy_runtime_api::http::Response;
use futures_util::Stream;

use crate::client::Handle;
use crate::error::{self, Error, ErrorKind};

/// Operation struct for lazy key listing
#[derive(Clone, Default, Debug)]
pub(crate) struct ListKeys;

impl ListKeys {
    /// Start a fresh `ListKeys` operation
    pub(crate) fn orchestrate(handle: Arc<Handle>) -> KeyStream {
        KeyStream {
            paginator: ListObjectsPaginator::new(handle),
            buffer: VecDeque::new(),
        }
    }
}

/// A lazy stream of every object key in the bucket.
///
/// Keys are yielded in the order the backend returns them; the next
/// `ListObjectsV2` page is fetched only when the buffered page is drained, so
/// memory use stays bounded no matter how many objects the bucket holds.
///
/// The stream is finite and not restartable; each call to
/// [`Client::list_keys`](crate::Client::list_keys) starts a fresh backend-side
/// pagination cursor. A page-fetch failure ends the stream after yielding the
/// error; keys observed before the failure remain valid.
#[derive(Debug)]
pub struct KeyStream {
    paginator: ListObjectsPaginator,
    buffer: VecDeque<String>,
}

impl KeyStream {
    /// Pull the next key, fetching the next page from the backend if the
    /// current one is exhausted. Returns `None` once the listing is complete.
    pub async fn next_key(&mut self) -> Option<Result<String, Error>> {
        loop {
            if let Some(key) = self.buffer.pop_front() {
                return Some(Ok(key));
            }

            match self.paginator.next_page().await? {
                Ok(page) => {
                    self.buffer.extend(
                        page.contents()
                            .iter()
                            .filter_map(|obj| obj.key().map(str::to_owned)),
                    );
                }
                Err(err) => {
                    self.paginator.abort();
                    return Some(Err(error::from_kind(ErrorKind::List)(err)));
                }
            }
        }
    }

    /// Drive the stream to completion, collecting every key.
    ///
    /// Prefer [`next_key`](Self::next_key) when the full key set is not
    /// needed at once.
    pub async fn try_collect(mut self) -> Result<Vec<String>, Error> {
        let mut keys = Vec::new();
        while let Some(key) = self.next_key().await {
            keys.push(key?);
        }
        Ok(keys)
    }

    /// Adapt this into a [`futures_util::Stream`] of keys.
    pub fn into_stream(self) -> impl Stream<Item = Result<String, Error>> {
        futures_util::stream::unfold(self, |mut keys| async move {
            keys.next_key().await.map(|item| (item, keys))
        })
    }
}

/// Paginator for the `ListObjectsV2` operation over the configured bucket.
#[derive(Debug)]
struct ListObjectsPaginator {
    handle: Arc<Handle>,
    state: Option<State>,
}

#[derive(Debug, PartialEq)]
enum State {
    Paginating { next_token: Option<String> },
    Done,
}

impl State {
    fn next_state(self, output: &ListObjectsV2Output) -> State {
        let is_truncated =
            output.is_truncated().unwrap_or(false) && output.next_continuation_token().is_some();

        match self {
            State::Paginating { next_token: _ } if is_truncated => State::Paginating {
                next_token: output.next_continuation_token.to_owned(),
            },
            _ => State::Done,
        }
    }
}

impl ListObjectsPaginator {
    fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            state: Some(State::Paginating { next_token: None }),
        }
    }

    fn state(&self) -> &State {
        self.state.as_ref().expect("valid state")
    }

    /// End the pagination early; a failed page fetch terminates the stream.
    fn abort(&mut self) {
        self.state.replace(State::Done);
    }

    async fn next_page(
        &mut self,
    ) -> Option<Result<ListObjectsV2Output, SdkError<ListObjectsV2Error, Response>>> {
        let request = match self.state() {
            State::Done => return None,
            State::Paginating { next_token } => ListObjectsV2Input::builder()
                .set_bucket(Some(self.handle.bucket().to_owned()))
                .set_continuation_token(next_token.clone()),
        };

        let list_result = request.send_with(self.handle.client()).await;
        match list_result {
            Ok(output) => {
                let prev_state = self.state.take().expect("state set");
                let next_state = prev_state.next_state(&output);
                self.state.replace(next_state);
                Some(Ok(output))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
