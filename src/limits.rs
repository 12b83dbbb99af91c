#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default maximum nesting depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default maximum container length limit for arrays/maps used by [`DecodeLimits::for_bytes`].
///
/// This is a safety limit; adjust explicitly for your deployment.
pub const DEFAULT_MAX_CONTAINER_LEN: usize = 1 << 16;

/// Decode-time resource limits.
///
/// Length claims are always checked against the remaining input regardless of these limits;
/// the limits tighten that bound further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeLimits {
    /// Maximum total input length in bytes.
    pub max_input_bytes: usize,
    /// Maximum nesting depth. Every array, map, and tag counts as one level.
    pub max_depth: usize,
    /// Maximum total count of container items:
    /// `sum(array_len) + sum(2 * map_pairs)` across the entire decoded item.
    ///
    /// The decoder never allows more than the input length, whatever this is set to.
    pub max_total_items: usize,
    /// Maximum array length.
    pub max_array_len: usize,
    /// Maximum map length (pairs).
    pub max_map_len: usize,
    /// Maximum byte-string length (after joining indefinite-length chunks).
    pub max_bytes_len: usize,
    /// Maximum text-string length in UTF-8 bytes (after joining indefinite-length chunks).
    pub max_text_len: usize,
}

impl DecodeLimits {
    /// Limits bounded only by the input itself and the default depth cap.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_input_bytes: usize::MAX,
            max_depth: DEFAULT_MAX_DEPTH,
            max_total_items: usize::MAX,
            max_array_len: usize::MAX,
            max_map_len: usize::MAX,
            max_bytes_len: usize::MAX,
            max_text_len: usize::MAX,
        }
    }

    /// Construct conservative limits derived from a maximum message size.
    ///
    /// The defaults are:
    /// - `max_input_bytes = max_message_bytes`
    /// - `max_total_items = max_message_bytes`
    /// - `max_bytes_len = max_message_bytes`
    /// - `max_text_len = max_message_bytes`
    /// - `max_array_len` and `max_map_len` are capped by `DEFAULT_MAX_CONTAINER_LEN`
    #[must_use]
    pub fn for_bytes(max_message_bytes: usize) -> Self {
        let max_container_len = max_message_bytes.min(DEFAULT_MAX_CONTAINER_LEN);
        Self {
            max_input_bytes: max_message_bytes,
            max_depth: DEFAULT_MAX_DEPTH,
            max_total_items: max_message_bytes,
            max_array_len: max_container_len,
            max_map_len: max_container_len,
            max_bytes_len: max_message_bytes,
            max_text_len: max_message_bytes,
        }
    }

    /// Replace the depth cap.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// How the decoder treats CBOR tags (major type 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TagPolicy {
    /// Fail with `UnsupportedTag`.
    #[default]
    Reject,
    /// Decode as [`crate::Value::Tag`], wrapping the tagged item.
    Passthrough,
}

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeOptions {
    /// Resource limits.
    pub limits: DecodeLimits,
    /// Tag handling.
    pub tags: TagPolicy,
}

impl DecodeOptions {
    /// Default options: no size limits beyond the input, depth 256, tags rejected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            limits: DecodeLimits::unlimited(),
            tags: TagPolicy::Reject,
        }
    }

    /// Replace the resource limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the tag policy.
    #[must_use]
    pub const fn with_tags(mut self, tags: TagPolicy) -> Self {
        self.tags = tags;
        self
    }
}
