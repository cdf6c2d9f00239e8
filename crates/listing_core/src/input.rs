use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid input '{input}': the number of pages must be a positive whole number.")]
    InvalidUserInput { input: String },
    #[error("A skill is required.")]
    EmptySkill,
}

/// Parses a page count typed by the user. Zero, negatives and anything
/// that is not a whole number are rejected.
pub fn parse_page_count(raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(pages) if pages > 0 => Ok(pages),
        _ => Err(InputError::InvalidUserInput {
            input: trimmed.to_string(),
        }),
    }
}

pub fn parse_skill(raw: &str) -> Result<String, InputError> {
    let skill = raw.trim();
    if skill.is_empty() {
        return Err(InputError::EmptySkill);
    }
    Ok(skill.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_accepts_padded_numbers() {
        assert_eq!(parse_page_count(" 3\n"), Ok(3));
        assert_eq!(parse_page_count("1"), Ok(1));
    }

    #[test]
    fn page_count_rejects_non_positive_and_garbage() {
        for raw in ["abc", "0", "-2", "", "1.5", "two"] {
            assert!(
                matches!(parse_page_count(raw), Err(InputError::InvalidUserInput { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn skill_is_trimmed_and_required() {
        assert_eq!(parse_skill("  Python \n"), Ok("Python".to_string()));
        assert_eq!(parse_skill("   "), Err(InputError::EmptySkill));
    }
}
