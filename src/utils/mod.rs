//! Utility functions.
//!
//! Collection of helper functions used across the bot.

/// Escape text for Telegram HTML parse mode.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Full name of a user: first name plus last name when present.
pub fn full_name(first_name: &str, last_name: Option<&str>) -> String {
    match last_name {
        Some(last) if !last.is_empty() => format!("{} {}", first_name, last),
        _ => first_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name("Ivan", Some("Petrov")), "Ivan Petrov");
        assert_eq!(full_name("Ivan", None), "Ivan");
        assert_eq!(full_name("Ivan", Some("")), "Ivan");
    }
}
