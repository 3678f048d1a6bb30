/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::error::SdkError;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of store errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Staging content to the scratch file or transferring it to the backend failed
    Write,

    /// Fetching a page of object keys failed
    List,

    /// Reading or decoding an object failed
    Read,

    /// Deleting an object failed
    Delete,

    /// The requested object does not exist
    NotFound,
}

impl Error {
    /// Creates a new store [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns true if the error indicates the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Write => write!(f, "failed to upload object"),
            ErrorKind::List => write!(f, "failed to list object keys"),
            ErrorKind::Read => write!(f, "failed to read object"),
            ErrorKind::Delete => write!(f, "failed to delete object"),
            ErrorKind::NotFound => write!(f, "object not found"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

pub(crate) fn from_kind<E>(kind: ErrorKind) -> impl FnOnce(E) -> Error
where
    E: Into<BoxError>,
{
    |err| Error::new(kind, err)
}

/// Wrap an SDK error, promoting explicit not-found reports from the backend
/// to [`ErrorKind::NotFound`] and classifying everything else as `kind`.
pub(crate) fn from_sdk<E, R>(kind: ErrorKind, value: SdkError<E, R>) -> Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    let kind = match value.code() {
        Some("NotFound" | "NoSuchKey" | "NoSuchBucket") => ErrorKind::NotFound,
        _ => kind,
    };

    Error::new(kind, value)
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::get_object::GetObjectError;
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;

    use super::{from_sdk, ErrorKind};

    fn service_error(err: GetObjectError) -> aws_sdk_s3::error::SdkError<GetObjectError> {
        let raw = HttpResponse::new(
            StatusCode::try_from(404u16).unwrap(),
            SdkBody::from("not found"),
        );
        aws_sdk_s3::error::SdkError::service_error(err, raw)
    }

    #[test]
    fn test_no_such_key_maps_to_not_found() {
        let err = service_error(GetObjectError::NoSuchKey(NoSuchKey::builder().build()));
        let err = from_sdk(ErrorKind::Read, err);
        assert_eq!(err.kind(), &ErrorKind::NotFound);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_other_codes_keep_the_operation_kind() {
        let err = service_error(GetObjectError::generic(
            ErrorMetadata::builder()
                .code("InternalError")
                .message("we encountered an internal error")
                .build(),
        ));
        let err = from_sdk(ErrorKind::Read, err);
        assert_eq!(err.kind(), &ErrorKind::Read);
        assert!(!err.is_not_found());
    }
}
