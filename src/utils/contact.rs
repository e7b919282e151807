use regex::Regex;

/// 宽松的邮箱格式校验：local@host.tld，不含空白
pub fn is_valid_email(value: &str) -> bool {
    let email_regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").unwrap();
    email_regex.is_match(value)
}

/// 电话号码校验：可带 + 前缀与常见分隔符，7-15 位数字
pub fn is_valid_phone(value: &str) -> bool {
    let phone_regex = Regex::new(r"^\+?[0-9 ()\-]+$").unwrap();
    if !phone_regex.is_match(value) {
        return false;
    }
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    (7..=15).contains(&digits)
}

/// 报名联系方式须为邮箱或电话
pub fn is_valid_contact(value: &str) -> bool {
    is_valid_email(value) || is_valid_phone(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("janeexample.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("jane@exam@ple.com"));
    }

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("555-CALL-NOW"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_contact_accepts_either_form() {
        assert!(is_valid_contact("jane@example.com"));
        assert!(is_valid_contact("+8613800138000"));
        assert!(!is_valid_contact("not a contact"));
    }
}
