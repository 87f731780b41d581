//! Conversion of textual parameters into typed values.
//!
//! Parameters arrive as strings alongside a parallel list of type tags.
//! Pairs are taken positionally; when the lists differ in length the extra
//! elements of the longer one are ignored.

use std::fmt;
use std::str::FromStr;

use crate::rpc::error::CoercionError;

/// A declared parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// Base-10 signed integer.
    Int,
    /// Floating-point number.
    Float,
    /// Text, passed through unchanged.
    Str,
    /// JSON array of strings, e.g. `["b","a"]`.
    List,
}

impl TypeTag {
    /// Returns the wire name of this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
        }
    }

    /// Converts `raw` into a value of this type.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError::InvalidValue`] if the text does not parse.
    pub fn coerce(self, raw: &str) -> Result<Value, CoercionError> {
        let invalid = || CoercionError::invalid_value(raw, self.as_str());

        match self {
            Self::Int => raw.trim().parse().map(Value::Int).map_err(|_| invalid()),
            Self::Float => raw.trim().parse().map(Value::Float).map_err(|_| invalid()),
            Self::Str => Ok(Value::Str(raw.to_string())),
            Self::List => serde_json::from_str(raw)
                .map(Value::List)
                .map_err(|_| invalid()),
        }
    }
}

impl FromStr for TypeTag {
    type Err = CoercionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "str" => Ok(Self::Str),
            "list" => Ok(Self::List),
            other => Err(CoercionError::UnsupportedType {
                tag: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Str(String),
    /// List of strings.
    List(Vec<String>),
}

impl Value {
    /// Returns the type tag this value was coerced to.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        match self {
            Self::Int(_) => TypeTag::Int,
            Self::Float(_) => TypeTag::Float,
            Self::Str(_) => TypeTag::Str,
            Self::List(_) => TypeTag::List,
        }
    }

    /// Returns the value as a float if it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Str(_) | Self::List(_) => None,
        }
    }
}

/// Coerces `params` according to the parallel list of `param_types`.
///
/// Only the first `min(params.len(), param_types.len())` pairs are used.
///
/// # Errors
///
/// Returns the first failure; no partial result is produced.
pub fn coerce_params(
    params: &[String],
    param_types: &[String],
) -> Result<Vec<Value>, CoercionError> {
    params
        .iter()
        .zip(param_types)
        .map(|(raw, tag)| tag.parse::<TypeTag>()?.coerce(raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn coerce_each_tag() {
        let values = coerce_params(
            &strings(&["42", "2.5", "hello", r#"["b","a"]"#]),
            &strings(&["int", "float", "str", "list"]),
        )
        .unwrap();

        assert_eq!(
            values,
            vec![
                Value::Int(42),
                Value::Float(2.5),
                Value::Str("hello".to_string()),
                Value::List(strings(&["b", "a"])),
            ]
        );
    }

    #[test]
    fn int_accepts_sign_and_surrounding_whitespace() {
        assert_eq!(TypeTag::Int.coerce(" -7 ").unwrap(), Value::Int(-7));
        assert_eq!(TypeTag::Int.coerce("+3").unwrap(), Value::Int(3));
    }

    #[test]
    fn float_accepts_integer_text() {
        assert_eq!(TypeTag::Float.coerce("9").unwrap(), Value::Float(9.0));
    }

    #[test]
    fn str_is_identity() {
        assert_eq!(
            TypeTag::Str.coerce("  spaced ").unwrap(),
            Value::Str("  spaced ".to_string())
        );
    }

    #[test]
    fn invalid_int_names_value_and_type() {
        let err = coerce_params(&strings(&["abc"]), &strings(&["int"])).unwrap_err();
        assert_eq!(err, CoercionError::invalid_value("abc", "int"));
    }

    #[test]
    fn float_text_is_not_an_int() {
        assert!(TypeTag::Int.coerce("3.7").is_err());
    }

    #[test]
    fn invalid_float() {
        let err = TypeTag::Float.coerce("three").unwrap_err();
        assert_eq!(err.to_string(), "Invalid value 'three' for type float");
    }

    #[test]
    fn list_requires_json_array_of_strings() {
        assert!(TypeTag::List.coerce("a b c").is_err());
        assert!(TypeTag::List.coerce("[1, 2]").is_err());
        assert_eq!(TypeTag::List.coerce("[]").unwrap(), Value::List(vec![]));
    }

    #[test]
    fn unsupported_tag_is_named() {
        let err = coerce_params(&strings(&["1"]), &strings(&["complex"])).unwrap_err();
        assert_eq!(
            err,
            CoercionError::UnsupportedType {
                tag: "complex".to_string()
            }
        );
    }

    #[test]
    fn failure_aborts_whole_coercion() {
        let result = coerce_params(&strings(&["1", "x", "3"]), &strings(&["int", "int", "int"]));
        assert!(result.is_err());
    }

    #[test]
    fn unequal_lengths_truncate_to_shorter() {
        let values = coerce_params(&strings(&["1", "2", "3"]), &strings(&["int"])).unwrap();
        assert_eq!(values, vec![Value::Int(1)]);

        let values = coerce_params(&strings(&["1"]), &strings(&["int", "bogus"])).unwrap();
        assert_eq!(values, vec![Value::Int(1)]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(coerce_params(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn numeric_view() {
        assert_eq!(Value::Int(2).as_number(), Some(2.0));
        assert_eq!(Value::Float(0.5).as_number(), Some(0.5));
        assert_eq!(Value::Str("2".to_string()).as_number(), None);
    }
}
