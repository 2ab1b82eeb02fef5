// License: MIT

use crate::PropsError;
use crate::ast::{PathValue, Scalar, Value};

fn type_error(message: String, hint: &str, code: u32) -> PropsError {
    PropsError::TypeError {
        message,
        line: 0,
        column: 0,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<Value> for String {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(Scalar::Str(lit)) => Ok(lit.text),
            Value::Scalar(Scalar::Word(w)) => Ok(w),
            _ => Err(type_error(
                format!("Expected string, got {:?}", value),
                "The key holds no string or bare word",
                401,
            )),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(Scalar::Double(lit)) => Ok(lit.value),
            Value::Scalar(Scalar::Int(lit)) => Ok(lit.value as f64),
            _ => Err(type_error(
                format!("Expected number, got {:?}", value),
                "The key holds no numeric value",
                402,
            )),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|n| n as f32)
    }
}

impl TryFrom<Value> for i64 {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(Scalar::Int(lit)) => Ok(lit.value),
            _ => Err(type_error(
                format!("Expected integer, got {:?}", value),
                "The key holds no integer value",
                402,
            )),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = i64::try_from(value)?;
        i32::try_from(n).map_err(|_| {
            type_error(
                format!("Number {} out of range for i32", n),
                "Use a 32-bit integer",
                407,
            )
        })
    }
}

impl TryFrom<Value> for u32 {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = i64::try_from(value)?;
        u32::try_from(n).map_err(|_| {
            type_error(
                format!("Number {} out of range for u32", n),
                "Use a non-negative 32-bit integer",
                407,
            )
        })
    }
}

impl TryFrom<Value> for bool {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(Scalar::Bool(b)) => Ok(b),
            _ => Err(type_error(
                format!("Expected bool, got {:?}", value),
                "The key holds no boolean value",
                403,
            )),
        }
    }
}

impl TryFrom<Value> for PathValue {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Path(p) => Ok(p),
            _ => Err(type_error(
                format!("Expected path reference, got {:?}", value),
                "The key holds no Class'...' reference",
                404,
            )),
        }
    }
}

// An empty-but-present array converts to an empty Vec; the tri-state
// distinction stays observable through ArrayState.

impl TryFrom<Value> for Vec<String> {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::EmptyList => Ok(Vec::new()),
            Value::List(items) => items
                .into_iter()
                .map(|s| match s {
                    Scalar::Str(lit) => Ok(lit.text),
                    Scalar::Word(w) => Ok(w),
                    other => Err(type_error(
                        format!("Expected string list element, got {:?}", other),
                        "Every element must be a string or bare word",
                        405,
                    )),
                })
                .collect(),
            _ => Err(type_error(
                format!("Expected list, got {:?}", value),
                "The key holds no list",
                405,
            )),
        }
    }
}

impl TryFrom<Value> for Vec<f64> {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::EmptyList => Ok(Vec::new()),
            Value::List(items) => items
                .into_iter()
                .map(|s| {
                    s.as_f64().ok_or_else(|| {
                        type_error(
                            format!("Expected numeric list element, got {:?}", s),
                            "Every element must be a number",
                            405,
                        )
                    })
                })
                .collect(),
            _ => Err(type_error(
                format!("Expected list, got {:?}", value),
                "The key holds no list",
                405,
            )),
        }
    }
}
