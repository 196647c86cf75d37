//! JSON value representation.

use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::map::Map;

/// The generic JSON tree handed to callers of [`loads`](crate::loads).
///
/// Objects keep input order and integers keep every digit.
pub type NativeValue = serde_json::Value;

/// A parsed JSON value.
///
/// Numbers keep the integer/float distinction of the source text: a literal
/// with a fraction or exponent is a `Float`, any other is an `Integer`.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Arbitrary-precision integer.
    Integer(BigInt),
    /// 64-bit floating-point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Array of values.
    Array(Vec<Value>),
    /// Object with unique keys in input order.
    Object(Map),
}

impl Value {
    /// The integer, if this is an `Integer`.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// The integer as `i64`, if it is one and fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(ToPrimitive::to_i64)
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Member lookup; `None` for missing keys and for non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    /// Convert to the generic [`NativeValue`] tree.
    ///
    /// Non-finite floats (from literals beyond `f64` range) become `null`, as
    /// `serde_json` does for any non-finite `f64`.
    pub fn to_native(&self) -> NativeValue {
        match self {
            Value::Null => NativeValue::Null,
            Value::Bool(b) => NativeValue::Bool(*b),
            Value::Integer(n) => integer_to_native(n),
            Value::Float(f) => NativeValue::from(*f),
            Value::String(s) => NativeValue::String(s.clone()),
            Value::Array(arr) => NativeValue::Array(arr.iter().map(Value::to_native).collect()),
            Value::Object(obj) => NativeValue::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), v.to_native()))
                    .collect(),
            ),
        }
    }
}

fn integer_to_native(n: &BigInt) -> NativeValue {
    if let Some(small) = n.to_i64() {
        return NativeValue::from(small);
    }
    if let Some(small) = n.to_u64() {
        return NativeValue::from(small);
    }
    // arbitrary_precision keeps the digits as written
    match n.to_string().parse::<serde_json::Number>() {
        Ok(number) => NativeValue::Number(number),
        Err(_) => n.to_f64().map_or(NativeValue::Null, NativeValue::from),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => {
                if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    // Keep floats recognizable: 1.0, not 1
                    write!(f, "{:?}", n)
                }
            }
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(arr) => f.debug_list().entries(arr).finish(),
            Value::Object(obj) => fmt::Debug::fmt(obj, f),
        }
    }
}

impl From<&Value> for NativeValue {
    fn from(value: &Value) -> Self {
        value.to_native()
    }
}

macro_rules! value_from {
    ($($source:ty => |$v:ident| $build:expr;)*) => {
        $(
            impl From<$source> for Value {
                fn from($v: $source) -> Self {
                    $build
                }
            }
        )*
    };
}

value_from! {
    bool => |b| Value::Bool(b);
    i32 => |n| Value::Integer(n.into());
    i64 => |n| Value::Integer(n.into());
    BigInt => |n| Value::Integer(n);
    f64 => |f| Value::Float(f);
    &str => |s| Value::String(s.to_owned());
    Vec<Value> => |items| Value::Array(items);
    Map => |map| Value::Object(map);
}
