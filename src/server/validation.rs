use crate::server::response::ApiError;

const MAX_TEXT_LEN: usize = 255;

/// Required text fields must be non-empty after trimming and within the
/// column length cap.
pub fn validate_required_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    if value.len() > MAX_TEXT_LEN {
        return Err(ApiError::bad_request(format!(
            "{field} cannot exceed {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), ApiError> {
    validate_required_text("email", value)?;
    if !value.contains('@') {
        return Err(ApiError::bad_request("email is not valid"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("title", "Warehouse").is_ok());
        assert!(validate_required_text("title", "").is_err());
        assert!(validate_required_text("title", "   ").is_err());
        assert!(validate_required_text("title", &"x".repeat(300)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("info@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }
}
