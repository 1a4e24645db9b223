//! Input validation gating submission.
//!
//! [`validate`] is a pure function from the raw editor text to a
//! [`ValidationVerdict`]. Rules are evaluated in order and the first match
//! wins, so a blank field short-circuits before any word or length check and
//! never shows a rejection message.

/// Maximum number of characters accepted, counted on the untrimmed input.
pub const MAX_INPUT_CHARS: usize = 256;

/// Minimum number of characters required after trimming.
pub const MIN_INPUT_CHARS: usize = 10;

/// Minimum number of whitespace-separated words required.
pub const MIN_WORDS: usize = 2;

const MSG_TOO_FEW_WORDS: &str = "Input must contain at least 2 words";
const MSG_TOO_SHORT: &str = "Input text is too short";
const MSG_VALID: &str = "Input is valid and ready to simplify";

/// How a validation message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Untouched field, nothing to show.
    None,
    /// Input rejected.
    Error,
    /// Input accepted.
    Success,
}

/// Validity, message and severity for one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub message: String,
    pub severity: Severity,
}

impl ValidationVerdict {
    fn rejected(message: String) -> Self {
        Self {
            is_valid: false,
            message,
            severity: Severity::Error,
        }
    }
}

impl Default for ValidationVerdict {
    /// The verdict for an untouched field.
    fn default() -> Self {
        Self {
            is_valid: false,
            message: String::new(),
            severity: Severity::None,
        }
    }
}

/// Validates editor text.
///
/// 1. Blank after trimming → invalid, empty message, [`Severity::None`]
/// 2. Fewer than [`MIN_WORDS`] words → invalid
/// 3. Fewer than [`MIN_INPUT_CHARS`] trimmed characters → invalid
/// 4. More than [`MAX_INPUT_CHARS`] raw characters → invalid, with live count
/// 5. Otherwise valid
///
/// Lengths are counted in Unicode scalar values. The too-long check uses the
/// untrimmed text, so surrounding whitespace counts toward the limit.
///
/// # Example
///
/// ```
/// use medsimplifier::validation::{validate, Severity};
///
/// let verdict = validate("Pasien mengalami demam tinggi");
/// assert!(verdict.is_valid);
/// assert_eq!(verdict.severity, Severity::Success);
/// ```
#[must_use]
pub fn validate(text: &str) -> ValidationVerdict {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return ValidationVerdict::default();
    }

    if trimmed.split_whitespace().count() < MIN_WORDS {
        return ValidationVerdict::rejected(MSG_TOO_FEW_WORDS.to_string());
    }

    if trimmed.chars().count() < MIN_INPUT_CHARS {
        return ValidationVerdict::rejected(MSG_TOO_SHORT.to_string());
    }

    let raw_len = text.chars().count();
    if raw_len > MAX_INPUT_CHARS {
        return ValidationVerdict::rejected(format!(
            "Input too long. Maximum {MAX_INPUT_CHARS} characters. ({raw_len}/{MAX_INPUT_CHARS})"
        ));
    }

    ValidationVerdict {
        is_valid: true,
        message: MSG_VALID.to_string(),
        severity: Severity::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_untouched_not_rejected() {
        for text in ["", "   ", "\n\t "] {
            let verdict = validate(text);
            assert!(!verdict.is_valid);
            assert!(verdict.message.is_empty());
            assert_eq!(verdict.severity, Severity::None);
        }
    }

    #[test]
    fn single_word_is_rejected_for_word_count() {
        let verdict = validate("hi");
        assert!(!verdict.is_valid);
        assert_eq!(verdict.message, MSG_TOO_FEW_WORDS);
        assert_eq!(verdict.severity, Severity::Error);

        // Long single words still fail on word count first.
        assert_eq!(validate("hipertensiparah").message, MSG_TOO_FEW_WORDS);
    }

    #[test]
    fn short_two_word_input_is_too_short() {
        let verdict = validate("a b");
        assert!(!verdict.is_valid);
        assert_eq!(verdict.message, MSG_TOO_SHORT);
        assert_eq!(verdict.severity, Severity::Error);
    }

    #[test]
    fn too_long_message_carries_live_count() {
        let text = format!("{} {}", "a".repeat(130), "b".repeat(129));
        assert_eq!(text.chars().count(), 260);

        let verdict = validate(&text);
        assert!(!verdict.is_valid);
        assert!(verdict.message.contains("260/256"));
        assert_eq!(verdict.severity, Severity::Error);
    }

    #[test]
    fn surrounding_whitespace_counts_toward_the_limit() {
        let body = format!("{} {}", "a".repeat(120), "b".repeat(130));
        assert_eq!(body.chars().count(), 251);
        assert!(validate(&body).is_valid);

        let padded = format!("   {body}   ");
        let verdict = validate(&padded);
        assert!(!verdict.is_valid);
        assert!(verdict.message.contains("257/256"));
    }

    #[test]
    fn exactly_at_the_limit_is_valid() {
        let text = format!("{} {}", "a".repeat(127), "b".repeat(128));
        assert_eq!(text.chars().count(), MAX_INPUT_CHARS);
        assert!(validate(&text).is_valid);
    }

    #[test]
    fn indonesian_sentence_is_valid() {
        let verdict = validate("Pasien mengalami demam tinggi");
        assert!(verdict.is_valid);
        assert_eq!(verdict.message, MSG_VALID);
        assert_eq!(verdict.severity, Severity::Success);
    }

    #[test]
    fn validity_matches_the_three_conditions() {
        let samples = [
            "", "x", "a b", "ab cd", "abcd efghij", "  ab  cd  ef  ", "satu",
            "Tekanan darah tinggi", "é è", "демам тинггі високий",
        ];
        for text in samples {
            let trimmed = text.trim();
            let expected = trimmed.split_whitespace().count() >= MIN_WORDS
                && trimmed.chars().count() >= MIN_INPUT_CHARS
                && text.chars().count() <= MAX_INPUT_CHARS;
            assert_eq!(validate(text).is_valid, expected, "input {text:?}");
        }
    }
}
