//! Resource limits for parsing.
//!
//! Recursive descent uses one stack frame per nesting level, so the depth of
//! objects and arrays is always bounded. The input size limit is optional.

use crate::error::{ErrorKind, Result};

/// Default maximum nesting depth of objects and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Deepest nesting the parser is known to handle on a default 2 MiB thread
/// stack in an unoptimized build.
pub const LENIENT_MAX_DEPTH: usize = 512;

/// Limits applied by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth of objects and arrays. A depth of 0 admits only
    /// scalar documents.
    pub max_depth: usize,
    /// Maximum input size in bytes, if any.
    pub max_input_size: Option<usize>,
    /// Maximum length of one number literal, if any. Converting an integer
    /// literal to a big integer is super-linear in its digit count, so a
    /// single huge literal can take seconds even when `max_input_size` allows
    /// it.
    pub max_number_length: Option<usize>,
}

impl Limits {
    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_depth: 32,
            max_input_size: Some(1024 * 1024), // 1 MiB
            max_number_length: Some(4300),
        }
    }

    /// Loose limits for trusted, machine-generated documents.
    pub const fn lenient() -> Self {
        Self {
            max_depth: LENIENT_MAX_DEPTH,
            max_input_size: None,
            max_number_length: None,
        }
    }

    /// Replace the maximum nesting depth.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the maximum input size.
    pub const fn with_max_input_size(mut self, max_input_size: Option<usize>) -> Self {
        self.max_input_size = max_input_size;
        self
    }

    /// Replace the maximum number literal length.
    pub const fn with_max_number_length(mut self, max_number_length: Option<usize>) -> Self {
        self.max_number_length = max_number_length;
        self
    }

    /// Reject input larger than `max_input_size`, reported at 1:1.
    pub fn check_input_size(&self, input: &str) -> Result<()> {
        match self.max_input_size {
            Some(max) if input.len() > max => Err(ErrorKind::InputTooLarge {
                size: input.len(),
                max,
            }
            .at(1, 1)),
            _ => Ok(()),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_size: None,
            max_number_length: None,
        }
    }
}
