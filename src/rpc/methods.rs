//! The fixed set of procedures the server exposes.
//!
//! Each procedure is a variant of [`Method`] with a declared arity and an
//! explicitly tagged [`ReturnValue`]. The [`MethodRegistry`] resolves wire
//! names to variants by a static match and holds no state.

use serde::Serialize;

use crate::rpc::coerce::Value;
use crate::rpc::error::ProcedureError;

/// A registered procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `floor(x: number) -> int`
    Floor,
    /// `nroot(n: number, x: number) -> float`
    Nroot,
    /// `reverse(s: str) -> str`
    Reverse,
    /// `valid_anagram(s1: str, s2: str) -> bool`
    ValidAnagram,
    /// `sort(items: list) -> list`
    Sort,
}

impl Method {
    /// All procedures, in registration order.
    pub const ALL: [Self; 5] = [
        Self::Floor,
        Self::Nroot,
        Self::Reverse,
        Self::ValidAnagram,
        Self::Sort,
    ];

    /// Returns the wire name of this procedure.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Nroot => "nroot",
            Self::Reverse => "reverse",
            Self::ValidAnagram => "valid_anagram",
            Self::Sort => "sort",
        }
    }

    /// Maps a wire name to its procedure. Matching is case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "floor" => Some(Self::Floor),
            "nroot" => Some(Self::Nroot),
            "reverse" => Some(Self::Reverse),
            "valid_anagram" => Some(Self::ValidAnagram),
            "sort" => Some(Self::Sort),
            _ => None,
        }
    }

    /// Returns the number of arguments this procedure takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Floor | Self::Reverse | Self::Sort => 1,
            Self::Nroot | Self::ValidAnagram => 2,
        }
    }

    /// Runs the procedure with already-coerced arguments.
    ///
    /// The caller is expected to have checked the arity; a wrong argument
    /// count still fails cleanly with a type mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`ProcedureError::InvalidArgument`] for value-domain errors and
    /// the other variants for internal faults.
    pub fn invoke(self, args: &[Value]) -> Result<ReturnValue, ProcedureError> {
        let args = Args { method: self, args };

        match self {
            Self::Floor => floor(args.number(0)?),
            Self::Nroot => nroot(args.number(0)?, args.number(1)?),
            Self::Reverse => Ok(ReturnValue::Str(reverse(args.text(0)?))),
            Self::ValidAnagram => Ok(ReturnValue::Bool(valid_anagram(
                args.text(0)?,
                args.text(1)?,
            ))),
            Self::Sort => Ok(ReturnValue::List(sort(args.list(0)?))),
        }
    }
}

/// Typed accessors over a procedure's argument list.
struct Args<'a> {
    method: Method,
    args: &'a [Value],
}

impl<'a> Args<'a> {
    fn get(&self, index: usize, expected: &'static str) -> Result<&'a Value, ProcedureError> {
        self.args
            .get(index)
            .ok_or_else(|| self.mismatch(index, expected, "nothing"))
    }

    fn mismatch(&self, index: usize, expected: &'static str, actual: &'static str) -> ProcedureError {
        ProcedureError::TypeMismatch {
            method: self.method.name(),
            index,
            expected,
            actual,
        }
    }

    fn number(&self, index: usize) -> Result<f64, ProcedureError> {
        let value = self.get(index, "number")?;
        value
            .as_number()
            .ok_or_else(|| self.mismatch(index, "number", value.tag().as_str()))
    }

    fn text(&self, index: usize) -> Result<&'a str, ProcedureError> {
        match self.get(index, "str")? {
            Value::Str(s) => Ok(s),
            other => Err(self.mismatch(index, "str", other.tag().as_str())),
        }
    }

    fn list(&self, index: usize) -> Result<&'a [String], ProcedureError> {
        match self.get(index, "list")? {
            Value::List(items) => Ok(items),
            other => Err(self.mismatch(index, "list", other.tag().as_str())),
        }
    }
}

/// A procedure's result, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReturnValue {
    /// Integer result.
    Int(i64),
    /// Floating-point result.
    Float(f64),
    /// Text result.
    Str(String),
    /// Boolean result.
    Bool(bool),
    /// List of strings.
    List(Vec<String>),
}

impl ReturnValue {
    /// Returns the name reported as `result_type`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bool(_) => "bool",
            Self::List(_) => "list",
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn floor(x: f64) -> Result<ReturnValue, ProcedureError> {
    if x.is_nan() {
        return Err(ProcedureError::InvalidArgument(
            "cannot convert float NaN to integer".to_string(),
        ));
    }

    let floored = x.floor();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if !floored.is_finite() || floored < i64::MIN as f64 || floored >= i64::MAX as f64 {
        return Err(ProcedureError::Arithmetic {
            method: Method::Floor.name(),
            message: format!("{x} does not fit in an integer"),
        });
    }

    Ok(ReturnValue::Int(floored as i64))
}

fn nroot(n: f64, x: f64) -> Result<ReturnValue, ProcedureError> {
    if n == 0.0 {
        return Err(ProcedureError::Arithmetic {
            method: Method::Nroot.name(),
            message: "division by zero".to_string(),
        });
    }

    let root = x.powf(n.recip());
    if root.is_nan() {
        return Err(ProcedureError::Arithmetic {
            method: Method::Nroot.name(),
            message: format!("{x} ** (1/{n}) has no real value"),
        });
    }
    // Division by zero for zero bases with negative n, overflow otherwise.
    if root.is_infinite() {
        return Err(ProcedureError::Arithmetic {
            method: Method::Nroot.name(),
            message: format!("{x} ** (1/{n}) is not finite"),
        });
    }

    Ok(ReturnValue::Float(root))
}

fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

fn valid_anagram(s1: &str, s2: &str) -> bool {
    let sorted = |s: &str| {
        let mut chars: Vec<char> = s.chars().collect();
        chars.sort_unstable();
        chars
    };
    sorted(s1) == sorted(s2)
}

fn sort(items: &[String]) -> Vec<String> {
    let mut sorted = items.to_vec();
    sorted.sort();
    sorted
}

/// Name-to-procedure lookup table.
///
/// The procedure set is fixed at compile time, so the registry carries no
/// state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodRegistry;

#[allow(clippy::unused_self)]
impl MethodRegistry {
    /// Creates a registry holding every built-in procedure.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Looks up a procedure by its wire name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Method> {
        Method::from_name(name)
    }

    /// Returns the wire names of all registered procedures.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        Method::ALL.into_iter().map(Method::name)
    }
}
