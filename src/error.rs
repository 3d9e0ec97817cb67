use thiserror::Error;

/// Errors returned while compiling a pattern.
///
/// Offsets are byte offsets into the pattern. Matching never fails, so these
/// are produced only by [`crate::compile`] and the constructors built on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `(` was never closed.
    #[error("unclosed group, '(' at offset {offset} has no matching ')'")]
    UnclosedGroup { offset: usize },

    /// A `)` appeared without a preceding `(`.
    #[error("unmatched ')' at offset {offset}")]
    UnmatchedParen { offset: usize },

    /// A `[` was never closed.
    #[error("unclosed character class, '[' at offset {offset} has no matching ']'")]
    UnclosedClass { offset: usize },

    #[error("invalid character range [{}-{}]", .start.escape_ascii(), .end.escape_ascii())]
    InvalidRange { start: u8, end: u8 },

    /// A `{` was never closed.
    #[error("unclosed repetition, '{{' at offset {offset} has no matching '}}'")]
    UnclosedRepeat { offset: usize },

    #[error("unexpected '{}' in repetition at offset {offset}", .byte.escape_ascii())]
    InvalidRepeat { offset: usize, byte: u8 },

    #[error("out of repeat order {{{min},{max}}}")]
    RepeatOutOfOrder { min: u32, max: u32 },

    /// The repetition count overflows or exceeds the configured limit.
    #[error("repetition count too large (max: {limit})")]
    RepeatTooLarge { limit: u32 },

    /// Unrolling the repetitions would build more NFA nodes than allowed.
    #[error("pattern too large, it needs more than {limit} NFA nodes")]
    PatternTooLarge { limit: usize },
}
