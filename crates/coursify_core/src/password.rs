//! crates/coursify_core/src/password.rs
//!
//! Client-side password policy, checked on sign-up before any request is
//! made. Advisory only; the API performs its own validation.

/// Characters accepted by the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const MIN_LENGTH: usize = 8;

/// The first rule a candidate password broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordViolation {
    #[error("Password must be at least 8 characters long.")]
    TooShort,
    #[error("Password must contain at least one uppercase letter.")]
    MissingUppercase,
    #[error("Password must contain at least one lowercase letter.")]
    MissingLowercase,
    #[error("Password must contain at least one number.")]
    MissingDigit,
    #[error("Password must contain at least one special character.")]
    MissingSpecial,
}

/// Checks the rules in order: length, uppercase, lowercase, digit, special.
/// Stops at the first violation. Length is measured in UTF-16 code units, the
/// way the browser form counts it.
pub fn validate_password(password: &str) -> Result<(), PasswordViolation> {
    if password.encode_utf16().count() < MIN_LENGTH {
        return Err(PasswordViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordViolation::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordViolation::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(PasswordViolation::MissingSpecial);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_password_meeting_every_rule() {
        assert_eq!(validate_password("Abcdef1!"), Ok(()));
        assert_eq!(validate_password("zz{Q9zzzz"), Ok(()));
    }

    #[test]
    fn lowercase_and_digits_fail_on_uppercase() {
        let err = validate_password("abc12345").unwrap_err();
        assert_eq!(err, PasswordViolation::MissingUppercase);
        assert_eq!(
            err.to_string(),
            "Password must contain at least one uppercase letter."
        );
    }

    #[test]
    fn reports_only_the_first_violation() {
        // Short and missing everything else: length wins.
        assert_eq!(validate_password("a"), Err(PasswordViolation::TooShort));
        assert_eq!(validate_password(""), Err(PasswordViolation::TooShort));
        assert_eq!(
            validate_password("ABCDEFGH"),
            Err(PasswordViolation::MissingLowercase)
        );
        assert_eq!(
            validate_password("ABCDefgh"),
            Err(PasswordViolation::MissingDigit)
        );
        assert_eq!(
            validate_password("ABCDefg1"),
            Err(PasswordViolation::MissingSpecial)
        );
    }

    #[test]
    fn every_listed_special_character_counts() {
        for c in SPECIAL_CHARACTERS.chars() {
            let candidate = format!("Abcdef1{c}");
            assert_eq!(validate_password(&candidate), Ok(()), "rejected {c:?}");
        }
        // Characters outside the set do not satisfy the rule.
        for c in ['-', '_', '+', '=', '~', '/', '[', ' '] {
            let candidate = format!("Abcdef1{c}");
            assert_eq!(
                validate_password(&candidate),
                Err(PasswordViolation::MissingSpecial)
            );
        }
    }

    #[test]
    fn non_ascii_letters_do_not_satisfy_case_rules() {
        assert_eq!(
            validate_password("ÄÖÜabc1!x"),
            Err(PasswordViolation::MissingUppercase)
        );
    }

    #[test]
    fn length_is_counted_in_utf16_units() {
        assert_eq!(validate_password("Aé1!éé"), Err(PasswordViolation::TooShort));
        assert_eq!(validate_password("Aé1!éééa"), Ok(()));
        // Seven characters, but each emoji is a surrogate pair.
        assert_eq!(validate_password("Ab1!😀😀😀"), Ok(()));
        assert_eq!(validate_password("Ab1!😀"), Err(PasswordViolation::TooShort));
    }
}
