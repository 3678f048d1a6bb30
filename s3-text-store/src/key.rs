/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use uuid::Uuid;

/// Prefix applied to every generated text object key.
pub(crate) const TEXT_KEY_PREFIX: &str = "textfile_";

/// Suffix applied to every generated text object key.
pub(crate) const TEXT_KEY_SUFFIX: &str = ".txt";

/// Generate a new object key for uploaded text content.
///
/// Keys take the form `textfile_<uuid>.txt`. The embedded UUID v4 carries 122
/// random bits, so keys are unique for the practical lifetime of a bucket
/// without any coordination between process instances.
pub fn generate() -> String {
    format!("{TEXT_KEY_PREFIX}{}{TEXT_KEY_SUFFIX}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{generate, TEXT_KEY_PREFIX, TEXT_KEY_SUFFIX};

    #[test]
    fn test_generated_key_shape() {
        let key = generate();
        let token = key
            .strip_prefix(TEXT_KEY_PREFIX)
            .and_then(|k| k.strip_suffix(TEXT_KEY_SUFFIX))
            .expect("generated key carries the textfile prefix and .txt suffix");

        // hyphenated UUID
        assert_eq!(token.len(), 36);
        assert_eq!(token.chars().filter(|c| *c == '-').count(), 4);
    }

    #[test]
    fn test_generated_keys_are_distinct() {
        let keys: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(keys.len(), 1000);
    }
}
