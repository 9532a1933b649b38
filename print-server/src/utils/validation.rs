//! Input validation and sanitization
//!
//! Centralized text limits and sanitization for student-supplied fields.
//! Sanitized values are what the Order record stores; raw form input never
//! reaches the queue.

// ── Text length limits ──────────────────────────────────────────────

/// Student names (2-100 chars)
pub const MAX_NAME_LEN: usize = 100;

/// Student / enrollment ids (8-20 alphanumeric)
pub const MAX_STUDENT_ID_LEN: usize = 20;
pub const MIN_STUDENT_ID_LEN: usize = 8;

/// Free-form print instructions
pub const MAX_INSTRUCTIONS_LEN: usize = 500;

/// Transaction references extracted from payment screenshots
pub const MAX_TRANSACTION_ID_LEN: usize = 50;

/// Sanitize string input before storing it.
///
/// - Removes NUL bytes
/// - Trims surrounding whitespace
/// - Caps length
/// - Folds newlines into spaces unless allowed
/// - Escapes HTML special characters
pub fn sanitize_text(value: &str, max_len: usize, allow_newlines: bool) -> String {
    let mut value: String = value.chars().filter(|c| *c != '\0').collect();
    value = value.trim().chars().take(max_len).collect();

    if !allow_newlines {
        value = value.replace(['\n', '\r'], " ");
    }

    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Validate a student name: 2-100 chars of letters, spaces, hyphens,
/// apostrophes and dots. Returns the sanitized name.
pub fn validate_student_name(name: &str) -> Result<String, String> {
    let name = name.trim();

    if name.chars().count() < 2 {
        return Err("Name must be at least 2 characters".to_string());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name must be less than {MAX_NAME_LEN} characters"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.'))
    {
        return Err("Name contains invalid characters".to_string());
    }

    Ok(sanitize_text(name, MAX_NAME_LEN, false))
}

/// Validate a student id: 8-20 alphanumeric characters.
pub fn validate_student_id(student_id: &str) -> Result<String, String> {
    let student_id = student_id.trim();

    let len = student_id.chars().count();
    if len < MIN_STUDENT_ID_LEN
        || len > MAX_STUDENT_ID_LEN
        || !student_id.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(format!(
            "Student ID must be {MIN_STUDENT_ID_LEN}-{MAX_STUDENT_ID_LEN} alphanumeric characters"
        ));
    }

    Ok(student_id.to_string())
}

/// Sanitize free-form instructions (newlines allowed).
pub fn sanitize_instructions(instructions: &str) -> String {
    sanitize_text(instructions, MAX_INSTRUCTIONS_LEN, true)
}

/// Sanitize a transaction reference supplied with an order.
pub fn sanitize_transaction_id(txn_id: &str) -> String {
    txn_id
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_TRANSACTION_ID_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_nul_and_escapes_html() {
        let out = sanitize_text("  <b>hi\0</b>  ", 100, false);
        assert_eq!(out, "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn sanitize_folds_newlines() {
        assert_eq!(sanitize_text("a\nb\rc", 100, false), "a b c");
        assert_eq!(sanitize_text("a\nb", 100, true), "a\nb");
    }

    #[test]
    fn student_name_rules() {
        assert!(validate_student_name("John Doe").is_ok());
        assert!(validate_student_name("O'Brien-Smith Jr.").is_ok());
        assert!(validate_student_name("J").is_err());
        assert!(validate_student_name("Robert; DROP TABLE").is_err());
    }

    #[test]
    fn student_id_rules() {
        assert_eq!(
            validate_student_id(" 12023052016044 ").unwrap(),
            "12023052016044"
        );
        assert!(validate_student_id("short").is_err());
        assert!(validate_student_id("has spaces here").is_err());
    }

    #[test]
    fn transaction_id_keeps_alphanumerics_only() {
        assert_eq!(sanitize_transaction_id(" TXN-1234 5678 "), "TXN12345678");
    }
}
