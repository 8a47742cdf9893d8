// crates/unifi-network-filter/src/wildcard.rs
// ============================================================================
// Module: Wildcard Pattern Matcher
// Description: Anchored wildcard matching for `like`-style patterns.
// Purpose: Evaluate search patterns client-side without a regex dependency.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Patterns use `*` for any run of characters (including empty), `.` for
//! exactly one character, and `\` to make the following character literal.
//! Matching is anchored at both ends and ASCII case-insensitive, so
//! `guest*` matches `guest1` and `guest100`, while `type.` matches `type1`
//! but not `type100`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while compiling a wildcard pattern.
///
/// # Invariants
/// - `position` fields are byte offsets into the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern ends with a bare escape character.
    #[error("dangling escape at end of pattern (offset {position})")]
    DanglingEscape {
        /// Byte offset of the trailing backslash.
        position: usize,
    },
}

// ============================================================================
// SECTION: Pattern Tokens
// ============================================================================

/// A compiled pattern element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternToken {
    /// `*`: any run of characters, including empty.
    AnyRun,
    /// `.`: exactly one character.
    AnyOne,
    /// A literal character, compared case-insensitively.
    Literal(char),
}

/// Compiles a pattern string into tokens, resolving escapes.
fn compile(pattern: &str) -> Result<Vec<PatternToken>, PatternError> {
    let mut tokens = Vec::new();
    let mut chars = pattern.char_indices();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '*' => tokens.push(PatternToken::AnyRun),
            '.' => tokens.push(PatternToken::AnyOne),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    return Err(PatternError::DanglingEscape {
                        position,
                    });
                };
                tokens.push(PatternToken::Literal(escaped.to_ascii_lowercase()));
            }
            _ => tokens.push(PatternToken::Literal(ch.to_ascii_lowercase())),
        }
    }
    Ok(tokens)
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Matches a wildcard pattern against a candidate string.
///
/// # Errors
///
/// Returns [`PatternError`] when the pattern itself is malformed.
pub fn wildcard_match(pattern: &str, candidate: &str) -> Result<bool, PatternError> {
    let tokens = compile(pattern)?;
    let chars: Vec<char> = candidate.chars().map(|ch| ch.to_ascii_lowercase()).collect();
    Ok(matches_from(&tokens, &chars))
}

/// Iterative matcher with single-star backtracking.
fn matches_from(tokens: &[PatternToken], chars: &[char]) -> bool {
    let mut token_index = 0;
    let mut char_index = 0;
    // Backtrack target: the most recent `*` and the candidate position it
    // has consumed up to.
    let mut star_token: Option<usize> = None;
    let mut star_char = 0;

    while char_index < chars.len() {
        match tokens.get(token_index) {
            Some(PatternToken::AnyRun) => {
                star_token = Some(token_index);
                star_char = char_index;
                token_index += 1;
            }
            Some(PatternToken::AnyOne) => {
                token_index += 1;
                char_index += 1;
            }
            Some(PatternToken::Literal(expected)) if *expected == chars[char_index] => {
                token_index += 1;
                char_index += 1;
            }
            _ => {
                // Mismatch: widen the last `*` by one character, or fail.
                let Some(star) = star_token else {
                    return false;
                };
                token_index = star + 1;
                star_char += 1;
                char_index = star_char;
            }
        }
    }

    // Remaining pattern must be all `*` for the match to close.
    tokens[token_index ..].iter().all(|token| matches!(token, PatternToken::AnyRun))
}
