//! Static schema descriptors.
//!
//! Every record type declares one [`Schema`]: an ordered table of
//! [`FieldDescriptor`]s built at compile time. The codec reads it in both
//! directions; nothing mutates it at runtime.

use std::fmt;

/// The kind of value a declared field holds on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    /// A JSON string.
    String,
    /// A whole number. Whole-valued floats such as `3.0` are accepted.
    Integer,
    /// Any JSON number; integers widen to floating point.
    Float,
    /// A JSON boolean, or the integers `0` and `1`.
    Flag,
    /// Any JSON value, carried without interpretation.
    Opaque,
    /// A JSON array whose elements all have the given kind.
    List(&'static ValueKind),
    /// A fixed-length JSON array with one kind per position.
    Tuple(&'static [ValueKind]),
    /// A JSON object decoded against another schema.
    Nested(&'static Schema),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => f.write_str("string"),
            ValueKind::Integer => f.write_str("integer"),
            ValueKind::Float => f.write_str("float"),
            ValueKind::Flag => f.write_str("boolean"),
            ValueKind::Opaque => f.write_str("any value"),
            ValueKind::List(element) => write!(f, "list of {}", element),
            ValueKind::Tuple(kinds) => {
                f.write_str("tuple (")?;
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                f.write_str(")")
            }
            ValueKind::Nested(schema) => write!(f, "{} object", schema.name()),
        }
    }
}

/// One declared field: its JSON key, value kind and nullability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    key: &'static str,
    kind: ValueKind,
    nullable: bool,
}

impl FieldDescriptor {
    /// Declare a field that must not be `null` when present.
    pub const fn new(key: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            kind,
            nullable: false,
        }
    }

    /// Mark this field as accepting an explicit `null`.
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The JSON key of this field.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The declared value kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether an explicit `null` is accepted on input.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// The ordered field table of one record type.
#[derive(Debug, PartialEq)]
pub struct Schema {
    name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl Schema {
    /// Create a schema. Field order is the wire output order.
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, fields }
    }

    /// The record type name, used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields in output order.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Position of the field with the given key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    /// Look up a declared field by key.
    pub fn field(&self, key: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Returns true if `key` is a declared field of this schema.
    pub fn declares(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Declared JSON keys in output order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static POINT: Schema = Schema::new(
        "Point",
        &[
            FieldDescriptor::new("x", ValueKind::Integer),
            FieldDescriptor::new("y", ValueKind::Float).nullable(),
        ],
    );

    static TRACK: Schema = Schema::new(
        "Track",
        &[FieldDescriptor::new("points", ValueKind::List(&ValueKind::Nested(&POINT)))],
    );

    #[test]
    fn lookup_by_key() {
        assert_eq!(POINT.position("y"), Some(1));
        assert!(POINT.declares("x"));
        assert!(!POINT.declares("z"));
        assert!(POINT.field("y").unwrap().is_nullable());
        assert!(!POINT.field("x").unwrap().is_nullable());
    }

    #[test]
    fn keys_keep_declaration_order() {
        assert_eq!(POINT.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ValueKind::Integer.to_string(), "integer");
        assert_eq!(
            TRACK.field("points").unwrap().kind().to_string(),
            "list of Point object"
        );
        assert_eq!(
            ValueKind::Tuple(&[ValueKind::String, ValueKind::Flag]).to_string(),
            "tuple (string, boolean)"
        );
    }
}
