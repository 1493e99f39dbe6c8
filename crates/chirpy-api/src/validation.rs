use thiserror::Error;

pub const MAX_CHIRP_LENGTH: usize = 140;

const MASK: &str = "****";

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Chirp is too long")]
    TooLong,
}

/// Enforce the length limit and mask denylisted words.
///
/// Length is counted in bytes of UTF-8. Masking is per space-separated token and
/// case-insensitive; a word with trailing punctuation is a different token
/// and is left alone.
pub fn validate_chirp(body: &str) -> Result<String, ValidationError> {
    if body.len() > MAX_CHIRP_LENGTH {
        return Err(ValidationError::TooLong);
    }

    let cleaned = body
        .split(' ')
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_body_unchanged() {
        let body = "I had something interesting for breakfast";
        assert_eq!(validate_chirp(body).unwrap(), body);
    }

    #[test]
    fn masks_example_chirp() {
        assert_eq!(
            validate_chirp("This is a kerfuffle opinion I need to share with the world").unwrap(),
            "This is a **** opinion I need to share with the world"
        );
    }

    #[test]
    fn masking_is_case_insensitive() {
        assert_eq!(validate_chirp("Kerfuffle").unwrap(), "****");
        assert_eq!(
            validate_chirp("I hear Mastodon is better than Chirpy. sharbert I need to migrate").unwrap(),
            "I hear Mastodon is better than Chirpy. **** I need to migrate"
        );
        assert_eq!(validate_chirp("FORNAX and Sharbert").unwrap(), "**** and ****");
    }

    #[test]
    fn masking_is_whole_token_only() {
        assert_eq!(validate_chirp("kerfuffled").unwrap(), "kerfuffled");
        assert_eq!(validate_chirp("Sharbert!").unwrap(), "Sharbert!");
        assert_eq!(validate_chirp("unfornax").unwrap(), "unfornax");
    }

    #[test]
    fn spacing_preserved() {
        assert_eq!(validate_chirp("  fornax  ").unwrap(), "  ****  ");
        assert_eq!(validate_chirp("").unwrap(), "");
    }

    #[test]
    fn length_limit() {
        let max = "a".repeat(MAX_CHIRP_LENGTH);
        assert_eq!(validate_chirp(&max).unwrap(), max);

        let over = "a".repeat(MAX_CHIRP_LENGTH + 1);
        assert_eq!(validate_chirp(&over), Err(ValidationError::TooLong));

        // Denylisted content does not rescue an overlong body
        let over_masked = format!("kerfuffle {}", "b".repeat(MAX_CHIRP_LENGTH));
        assert_eq!(validate_chirp(&over_masked), Err(ValidationError::TooLong));
    }

    #[test]
    fn length_counts_bytes() {
        // 71 two-byte characters is 142 bytes
        let body = "é".repeat(71);
        assert_eq!(validate_chirp(&body), Err(ValidationError::TooLong));

        let body = "é".repeat(70);
        assert_eq!(validate_chirp(&body).unwrap(), body);
    }
}
