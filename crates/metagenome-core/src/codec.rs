//! Extensible record codec.
//!
//! One generic decoder and encoder shared by every record type. A record's
//! [`Schema`] decides which keys are declared fields; everything else lands
//! in the record's extras bag and is written back untouched.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{CodecError, InvalidInputError};
use crate::schema::{Schema, ValueKind};

/// Keys not declared by a record's schema, in first-seen order.
pub type Extras = Map<String, Value>;

/// A typed record backed by a static schema.
///
/// Implementations are generated by the `open_record!` macro; callers use
/// [`decode`], [`encode`] and the extras accessors.
pub trait Record: Sized {
    /// The schema describing this record type.
    fn schema() -> &'static Schema;

    /// Build the record from validated slots and the extras bag.
    fn from_parts(slots: Slots, extras: Extras) -> Result<Self, CodecError>;

    /// Encoded values of the declared fields, in schema order.
    fn field_values(&self) -> Vec<Option<Value>>;

    /// The extras bag.
    fn extras(&self) -> &Extras;

    /// Mutable access to the extras bag.
    ///
    /// Prefer [`Record::set_extra`], which refuses declared keys.
    fn extras_mut(&mut self) -> &mut Extras;

    /// Get an extra value by key.
    fn extra(&self, key: &str) -> Option<&Value> {
        self.extras().get(key)
    }

    /// Set an extra value, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::ExtraCollides`] if `key` is a declared
    /// field of this record's schema.
    fn set_extra(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, InvalidInputError> {
        let key = key.into();
        if Self::schema().declares(&key) {
            return Err(InvalidInputError::ExtraCollides {
                key,
                record: Self::schema().name(),
            });
        }
        Ok(self.extras_mut().insert(key, value))
    }

    /// Remove an extra value by key, keeping the order of the others.
    fn remove_extra(&mut self, key: &str) -> Option<Value> {
        self.extras_mut().shift_remove(key)
    }
}

/// Conversion between a declared field's Rust type and its JSON value.
pub trait FieldType: Sized {
    /// Convert an already validated value. `path` names the field in errors.
    fn from_json(value: Value, path: &str) -> Result<Self, CodecError>;

    /// Convert to the wire representation.
    fn to_json(&self) -> Value;
}

/// Validated declared-field values, one slot per schema field.
///
/// Slots are consumed in schema order by [`Record::from_parts`].
#[derive(Debug)]
pub struct Slots {
    schema: &'static Schema,
    values: std::vec::IntoIter<Option<Value>>,
    index: usize,
    path: String,
}

impl Slots {
    fn new(schema: &'static Schema, values: Vec<Option<Value>>, path: &str) -> Self {
        Self {
            schema,
            values: values.into_iter(),
            index: 0,
            path: path.to_string(),
        }
    }

    /// Take the next declared field, converting it to `T`.
    pub fn next_slot<T: FieldType>(&mut self) -> Result<Option<T>, CodecError> {
        let key = self
            .schema
            .fields()
            .get(self.index)
            .map(|f| f.key())
            .unwrap_or_default();
        self.index += 1;

        match self.values.next().flatten() {
            Some(value) => T::from_json(value, &join_path(&self.path, key)).map(Some),
            None => Ok(None),
        }
    }
}

/// Decode a raw JSON value into a record.
///
/// # Errors
///
/// Returns [`CodecError::NotAnObject`] if `raw` is not an object and
/// [`CodecError::TypeMismatch`] for the first declared field whose value
/// does not match its kind.
pub fn decode<R: Record>(raw: Value) -> Result<R, CodecError> {
    decode_at(raw, "")
}

/// Parse JSON text and decode it into a record.
pub fn decode_str<R: Record>(text: &str) -> Result<R, CodecError> {
    let raw: Value = serde_json::from_str(text)?;
    decode(raw)
}

/// Decode a record nested at `path` inside a larger document.
pub fn decode_at<R: Record>(raw: Value, path: &str) -> Result<R, CodecError> {
    let schema = R::schema();
    let object = match raw {
        Value::Object(object) => object,
        other => {
            return Err(CodecError::NotAnObject {
                record: schema.name(),
                found: json_type(&other),
            });
        }
    };

    let mut values: Vec<Option<Value>> = vec![None; schema.fields().len()];
    let mut extras = Extras::new();

    for (key, value) in object {
        match schema.position(&key) {
            Some(index) => {
                let field = &schema.fields()[index];
                let field_path = join_path(path, &key);
                if value.is_null() {
                    if !field.is_nullable() {
                        return Err(mismatch(field_path, field.kind(), &value));
                    }
                    continue;
                }
                check_kind(field.kind(), &value, &field_path)?;
                values[index] = Some(value);
            }
            None => {
                extras.insert(key, value);
            }
        }
    }

    trace!(
        record = schema.name(),
        extras = extras.len(),
        "decoded record"
    );

    R::from_parts(Slots::new(schema, values, path), extras)
}

/// Encode a record into a JSON object.
///
/// Declared fields come first in schema order; absent fields are omitted.
/// Extras follow in their recorded order.
pub fn encode<R: Record>(record: &R) -> Value {
    let schema = R::schema();
    let mut object = Map::new();

    for (field, value) in schema.fields().iter().zip(record.field_values()) {
        if let Some(value) = value.filter(|v| !v.is_null()) {
            object.insert(field.key().to_string(), value);
        }
    }

    for (key, value) in record.extras() {
        if schema.declares(key) {
            continue;
        }
        object.insert(key.clone(), value.clone());
    }

    Value::Object(object)
}

/// Encode a record as compact JSON text.
pub fn encode_string<R: Record>(record: &R) -> String {
    encode(record).to_string()
}

/// Check a raw object against a schema without building a record.
///
/// Extras are not inspected.
pub fn validate(raw: &Value, schema: &'static Schema) -> Result<(), CodecError> {
    match raw {
        Value::Object(_) => check_kind(ValueKind::Nested(schema), raw, ""),
        other => Err(CodecError::NotAnObject {
            record: schema.name(),
            found: json_type(other),
        }),
    }
}

fn check_kind(kind: ValueKind, value: &Value, path: &str) -> Result<(), CodecError> {
    let ok = match kind {
        ValueKind::String => value.is_string(),
        ValueKind::Integer => as_integer(value).is_some(),
        ValueKind::Float => value.is_number(),
        ValueKind::Flag => as_flag(value).is_some(),
        ValueKind::Opaque => true,
        ValueKind::List(element) => {
            let Some(items) = value.as_array() else {
                return Err(mismatch(path.to_string(), kind, value));
            };
            for (i, item) in items.iter().enumerate() {
                check_kind(*element, item, &format!("{}[{}]", path, i))?;
            }
            true
        }
        ValueKind::Tuple(kinds) => {
            let Some(items) = value.as_array().filter(|items| items.len() == kinds.len())
            else {
                return Err(mismatch(path.to_string(), kind, value));
            };
            for (i, (item, element)) in items.iter().zip(kinds.iter()).enumerate() {
                check_kind(*element, item, &format!("{}[{}]", path, i))?;
            }
            true
        }
        ValueKind::Nested(schema) => {
            let Some(object) = value.as_object() else {
                return Err(mismatch(path.to_string(), kind, value));
            };
            for (key, value) in object {
                let Some(field) = schema.field(key) else {
                    continue;
                };
                let field_path = join_path(path, key);
                if value.is_null() {
                    if field.is_nullable() {
                        continue;
                    }
                    return Err(mismatch(field_path, field.kind(), value));
                }
                check_kind(field.kind(), value, &field_path)?;
            }
            true
        }
    };

    if ok {
        Ok(())
    } else {
        Err(mismatch(path.to_string(), kind, value))
    }
}

/// Read a whole number, accepting whole-valued floats.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64().filter(|_| !value.is_u64())?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Read a boolean flag, accepting `0` and `1`.
pub(crate) fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn mismatch(field: String, expected: ValueKind, value: &Value) -> CodecError {
    CodecError::TypeMismatch {
        field,
        expected,
        found: json_type(value),
    }
}

pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl FieldType for String {
    fn from_json(value: Value, path: &str) -> Result<Self, CodecError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch(path.to_string(), ValueKind::String, &other)),
        }
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldType for i64 {
    fn from_json(value: Value, path: &str) -> Result<Self, CodecError> {
        as_integer(&value).ok_or_else(|| mismatch(path.to_string(), ValueKind::Integer, &value))
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldType for f64 {
    fn from_json(value: Value, path: &str) -> Result<Self, CodecError> {
        value
            .as_f64()
            .ok_or_else(|| mismatch(path.to_string(), ValueKind::Float, &value))
    }

    fn to_json(&self) -> Value {
        // Non-finite floats have no JSON form.
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl FieldType for bool {
    fn from_json(value: Value, path: &str) -> Result<Self, CodecError> {
        as_flag(&value).ok_or_else(|| mismatch(path.to_string(), ValueKind::Flag, &value))
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldType for Value {
    fn from_json(value: Value, _path: &str) -> Result<Self, CodecError> {
        Ok(value)
    }

    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn from_json(value: Value, path: &str) -> Result<Self, CodecError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_json(item, &format!("{}[{}]", path, i)))
                .collect(),
            other => Err(mismatch(
                path.to_string(),
                ValueKind::List(&ValueKind::Opaque),
                &other,
            )),
        }
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(FieldType::to_json).collect())
    }
}
