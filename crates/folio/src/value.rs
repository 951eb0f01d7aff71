//! Scalar values carried by partial records.

use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use tokio_postgres::types::{IsNull, ToSql, Type, WrongType, to_sql_checked};

/// A non-null scalar bound as a statement parameter.
///
/// JSON scalars deserialize into the matching variant; `null`, arrays and
/// objects are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// The text payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for an empty string; other variants are never blank.
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
        }
    }
}

fn ensure_accepts<T: ToSql + 'static>(ty: &Type) -> Result<(), WrongType> {
    if T::accepts(ty) {
        Ok(())
    } else {
        Err(WrongType::new::<T>(ty.clone()))
    }
}

fn narrow<T: TryFrom<i64>>(v: i64, ty: &Type) -> Result<T, WrongType> {
    T::try_from(v).map_err(|_| WrongType::new::<i64>(ty.clone()))
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Bool(v) => {
                ensure_accepts::<bool>(ty)?;
                v.to_sql(ty, out)
            }
            // The server picks the parameter type from the column; narrow to fit it.
            Value::Int(v) => {
                if *ty == Type::INT2 {
                    narrow::<i16>(*v, ty)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    narrow::<i32>(*v, ty)?.to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    (*v as f64).to_sql(ty, out)
                } else {
                    ensure_accepts::<i64>(ty)?;
                    v.to_sql(ty, out)
                }
            }
            Value::Float(v) => {
                if *ty == Type::FLOAT4 {
                    (*v as f32).to_sql(ty, out)
                } else {
                    ensure_accepts::<f64>(ty)?;
                    v.to_sql(ty, out)
                }
            }
            Value::Text(v) => {
                ensure_accepts::<String>(ty)?;
                v.to_sql(ty, out)
            }
        }
    }

    fn accepts(ty: &Type) -> bool {
        <bool as ToSql>::accepts(ty)
            || <i16 as ToSql>::accepts(ty)
            || <i32 as ToSql>::accepts(ty)
            || <i64 as ToSql>::accepts(ty)
            || <f32 as ToSql>::accepts(ty)
            || <f64 as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
    }

    to_sql_checked!();
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_json_scalars() {
        let values: Vec<Value> = serde_json::from_str(r#"["a", 3, 1.5, true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::from("a"),
                Value::Int(3),
                Value::Float(1.5),
                Value::Bool(true)
            ]
        );
    }

    #[test]
    fn rejects_null_and_compound_json() {
        assert!(serde_json::from_str::<Value>("null").is_err());
        assert!(serde_json::from_str::<Value>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<Value>(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn binds_integers_to_narrow_columns() {
        let mut buf = BytesMut::new();
        Value::Int(99).to_sql(&Type::INT4, &mut buf).unwrap();
        assert_eq!(buf.as_ref(), &99_i32.to_be_bytes());
    }

    #[test]
    fn rejects_out_of_range_integer() {
        let mut buf = BytesMut::new();
        assert!(Value::Int(i64::MAX).to_sql(&Type::INT4, &mut buf).is_err());
    }

    #[test]
    fn rejects_mismatched_column_type() {
        let mut buf = BytesMut::new();
        assert!(Value::from("x").to_sql(&Type::INT4, &mut buf).is_err());
        let err = Value::Bool(true).to_sql(&Type::TEXT, &mut buf).err().expect("expected WrongType error");
        assert!(err.downcast_ref::<WrongType>().is_some());
    }

    #[test]
    fn blank_only_for_empty_text() {
        assert!(Value::from("").is_blank());
        assert!(!Value::from(" ").is_blank());
        assert!(!Value::Int(0).is_blank());
    }
}
