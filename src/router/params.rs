//! Declared query parameters and their binding to handler arguments.

use std::fmt;

use crate::router::context::RequestContext;

/// The type a query parameter is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Int,
    UInt,
    Float,
    Bool,
    Str,
}

impl ParamType {
    /// The value an optional parameter takes when neither the request nor
    /// the declaration provides one.
    pub fn zero_value(&self) -> ParamValue {
        match self {
            ParamType::Int => ParamValue::Int(0),
            ParamType::UInt => ParamValue::UInt(0),
            ParamType::Float => ParamValue::Float(0.0),
            ParamType::Bool => ParamValue::Bool(false),
            ParamType::Str => ParamValue::Str(String::new()),
        }
    }

    /// Convert a raw query value to this type.
    pub fn convert(&self, raw: &str) -> Option<ParamValue> {
        match self {
            ParamType::Int => raw.trim().parse().ok().map(ParamValue::Int),
            ParamType::UInt => raw.trim().parse().ok().map(ParamValue::UInt),
            ParamType::Float => raw.trim().parse().ok().map(ParamValue::Float),
            ParamType::Bool => {
                let raw = raw.trim();
                if raw.eq_ignore_ascii_case("true") {
                    Some(ParamValue::Bool(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Some(ParamValue::Bool(false))
                } else {
                    None
                }
            }
            ParamType::Str => Some(ParamValue::Str(raw.to_string())),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Int => "int",
            ParamType::UInt => "uint",
            ParamType::Float => "float",
            ParamType::Bool => "bool",
            ParamType::Str => "string",
        };
        f.write_str(name)
    }
}

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl ParamValue {
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Int(_) => ParamType::Int,
            ParamValue::UInt(_) => ParamType::UInt,
            ParamValue::Float(_) => ParamType::Float,
            ParamValue::Bool(_) => ParamType::Bool,
            ParamValue::Str(_) => ParamType::Str,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::UInt(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

/// Typed extraction from a [`ParamValue`].
pub trait FromParamValue: Sized {
    fn from_param_value(value: &ParamValue) -> Option<Self>;
}

impl FromParamValue for i64 {
    fn from_param_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromParamValue for u64 {
    fn from_param_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::UInt(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromParamValue for f64 {
    fn from_param_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromParamValue for bool {
    fn from_param_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromParamValue for String {
    fn from_param_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// A parameter declared by an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Lower-cased name
    pub name: String,
    pub param_type: ParamType,
    pub optional: bool,
    /// Used when an optional parameter is absent
    pub default: ParamValue,
}

impl ParamSpec {
    /// A parameter the request must provide.
    pub fn required(name: &str, param_type: ParamType) -> Self {
        Self {
            name: name.to_lowercase(),
            param_type,
            optional: false,
            default: param_type.zero_value(),
        }
    }

    /// A parameter that falls back to the type's zero value when absent.
    pub fn optional(name: &str, param_type: ParamType) -> Self {
        Self {
            optional: true,
            ..Self::required(name, param_type)
        }
    }

    /// Replace the fallback value of an optional parameter.
    pub fn with_default(mut self, default: impl Into<ParamValue>) -> Self {
        self.default = default.into();
        self
    }
}

/// Parameter values in declaration order, handed to the handler after the context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    values: Vec<(String, ParamValue)>,
}

impl BoundParams {
    /// Get a bound value by name, converted to `T`.
    ///
    /// Returns `None` if the parameter is not declared or `T` does not
    /// match its declared type.
    pub fn get<T: FromParamValue>(&self, name: &str) -> Option<T> {
        self.value(name).and_then(T::from_param_value)
    }

    /// Get a bound value by name.
    pub fn value(&self, name: &str) -> Option<&ParamValue> {
        let name = name.to_lowercase();
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &ParamValue> {
        self.values.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Why parameter binding stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    /// A required parameter was absent.
    MissingRequired { declared: usize, required: usize },
    /// A present value did not convert to the declared type.
    TypeConversion { name: String, expected: ParamType },
}

/// Bind declared parameters against the request's query parameters.
///
/// Specs are processed in order and the first failure ends binding.
pub fn bind(specs: &[ParamSpec], ctx: &RequestContext) -> Result<BoundParams, BindError> {
    let mut values = Vec::with_capacity(specs.len());

    for spec in specs {
        let value = match ctx.param(&spec.name) {
            None if spec.optional => spec.default.clone(),
            None => {
                return Err(BindError::MissingRequired {
                    declared: specs.len(),
                    required: specs.iter().filter(|s| !s.optional).count(),
                });
            }
            Some(raw) => spec.param_type.convert(raw).ok_or_else(|| BindError::TypeConversion {
                name: spec.name.clone(),
                expected: spec.param_type,
            })?,
        };
        values.push((spec.name.clone(), value));
    }

    Ok(BoundParams { values })
}
