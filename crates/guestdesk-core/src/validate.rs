//! Synchronous field validation shared by the modal forms.
//!
//! Validation never touches the network: it runs on submit, and a failed
//! pass blocks the mutation entirely.

use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Field → error-message map, in field order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(IndexMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Clear the error for one field (typing into it dismisses the message).
    pub fn dismiss(&mut self, field: &str) {
        self.0.shift_remove(field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Non-blank after trimming.
pub fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Minimal e-mail shape check: `local@domain.tld`, no whitespace.
/// Real validation belongs to the backend; this only catches typos early.
pub fn valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Parse a strictly positive decimal (prices, costs).
pub fn positive_decimal(raw: &str) -> Option<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .ok()
        .filter(|d| *d > Decimal::ZERO)
}

/// Parse a non-negative integer (stock quantities).
pub fn non_negative_int(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Parse an integer of at least one (room capacity).
pub fn positive_int(raw: &str) -> Option<u32> {
    non_negative_int(raw).filter(|n| *n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(valid_email("ada@example.com"));
        assert!(valid_email(" desk@hotel.co "));
        assert!(!valid_email("ada"));
        assert!(!valid_email("ada@"));
        assert!(!valid_email("ada@nodot"));
        assert!(!valid_email("ada lovelace@example.com"));
        assert!(!valid_email("ada@.com"));
    }

    #[test]
    fn positive_decimal_rejects_zero_and_negative() {
        assert_eq!(positive_decimal("12.50"), Some("12.50".parse().expect("decimal")));
        assert!(positive_decimal("0").is_none());
        assert!(positive_decimal("-5").is_none());
        assert!(positive_decimal("abc").is_none());
    }

    #[test]
    fn quantity_allows_zero_but_not_negative() {
        assert_eq!(non_negative_int("0"), Some(0));
        assert_eq!(non_negative_int("17"), Some(17));
        assert!(non_negative_int("-1").is_none());
        assert!(non_negative_int("2.5").is_none());
    }

    #[test]
    fn errors_keep_insertion_order_and_dismiss() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required");
        errors.insert("email", "Please enter a valid email");
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["name", "email"]);

        errors.dismiss("name");
        assert!(errors.get("name").is_none());
        assert_eq!(errors.len(), 1);
    }
}
