/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation for staged text uploads
pub mod upload_text;

/// Operation for lazy paginated key listing
pub mod list_keys;

/// Operation for reading text objects
pub mod read_text;

/// Operation for deleting objects
pub mod delete_object;
