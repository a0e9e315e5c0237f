use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 必填文本字段不能为空白
pub fn validate_required_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

/// 学分必须为正整数
pub fn validate_credits(credits: i32) -> Result<(), &'static str> {
    if credits <= 0 {
        return Err("Credits must be a positive integer");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@school.edu").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@x").is_err());
        assert!(validate_email("a b@x.com").is_err());
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("rollNo", "R1").is_ok());
        assert_eq!(
            validate_required_text("rollNo", "   ").unwrap_err(),
            "rollNo is required"
        );
    }

    #[test]
    fn test_credits() {
        assert!(validate_credits(3).is_ok());
        assert!(validate_credits(0).is_err());
        assert!(validate_credits(-1).is_err());
    }
}
