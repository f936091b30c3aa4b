//! Typed property values.
//!
//! The catalog assigns every recognized property name exactly one value
//! kind; coercion from the recording's text is a closed match over that
//! kind rather than a runtime lookup of parser functions.

use std::fmt;

/// The closed set of value kinds a property can coerce to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Floating-point numeric value.
    Float,
    /// Whole-number value.
    Integer,
    /// Free text, stored as-is.
    Text,
}

impl ValueKind {
    /// Coerce raw recording text into a typed value.
    ///
    /// Returns `None` when the text does not parse as this kind; the
    /// caller turns that into a decode error carrying the property name.
    pub fn coerce(self, raw: &str) -> Option<PropertyValue> {
        match self {
            ValueKind::Float => raw.trim().parse().ok().map(PropertyValue::Float),
            ValueKind::Integer => raw.trim().parse().ok().map(PropertyValue::Integer),
            ValueKind::Text => Some(PropertyValue::Text(raw.to_owned())),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Float => write!(f, "float"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Text => write!(f, "text"),
        }
    }
}

/// A decoded property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Float(f64),
    Integer(i64),
    Text(String),
}

impl PropertyValue {
    /// The value as text, when it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a float, when it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Integer(v) => Some(*v as f64),
            PropertyValue::Text(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Float(v) => write!(f, "{v}"),
            PropertyValue::Integer(v) => write!(f, "{v}"),
            PropertyValue::Text(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_coercion() {
        assert_eq!(
            ValueKind::Float.coerce("10.5"),
            Some(PropertyValue::Float(10.5))
        );
        assert_eq!(ValueKind::Float.coerce(" 3 "), Some(PropertyValue::Float(3.0)));
        assert_eq!(ValueKind::Float.coerce("not-a-number"), None);
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(
            ValueKind::Integer.coerce("42"),
            Some(PropertyValue::Integer(42))
        );
        assert_eq!(ValueKind::Integer.coerce("4.2"), None);
    }

    #[test]
    fn test_text_coercion_never_fails() {
        assert_eq!(
            ValueKind::Text.coerce("F-16C Viper"),
            Some(PropertyValue::Text("F-16C Viper".to_owned()))
        );
    }

    #[test]
    fn test_as_float_covers_both_numeric_kinds() {
        assert_eq!(PropertyValue::Float(1.5).as_float(), Some(1.5));
        assert_eq!(PropertyValue::Integer(2).as_float(), Some(2.0));
        assert_eq!(PropertyValue::Text("x".into()).as_float(), None);
    }
}
