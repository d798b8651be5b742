//! Record type generation.
//!
//! [`open_record!`] expands one declaration into the static schema, the
//! record struct with its extras bag, typed accessors, the [`Record`]
//! implementation and serde glue.
//!
//! [`Record`]: crate::codec::Record

/// Declare an open-schema record type.
///
/// ```ignore
/// open_record! {
///     /// A sample.
///     pub struct Sample in SAMPLE_SCHEMA as "Sample" {
///         /// Sample id.
///         id / set_id / with_id: String => FieldDescriptor::new("id", ValueKind::String),
///     }
/// }
/// ```
///
/// Field order in the declaration is the wire output order. Each field
/// names its getter, setter and builder explicitly.
macro_rules! open_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident in $schema:ident as $wire:literal {
            $(
                $(#[$fmeta:meta])*
                $field:ident / $setter:ident / $builder:ident : $ty:ty => $desc:expr
            ),* $(,)?
        }
    ) => {
        #[doc = concat!("Schema descriptor for [`", stringify!($name), "`].")]
        pub static $schema: $crate::schema::Schema =
            $crate::schema::Schema::new($wire, &[$($desc),*]);

        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $($field: Option<$ty>,)*
            extras: $crate::codec::Extras,
        }

        impl $name {
            #[doc = concat!("Create an empty `", stringify!($name), "`.")]
            pub fn new() -> Self {
                Self::default()
            }

            $(
                $(#[$fmeta])*
                pub fn $field(&self) -> Option<&$ty> {
                    self.$field.as_ref()
                }

                #[doc = concat!("Set or clear `", stringify!($field), "`.")]
                pub fn $setter(&mut self, value: impl Into<Option<$ty>>) {
                    self.$field = value.into();
                }

                #[doc = concat!("Builder form of [`Self::", stringify!($setter), "`].")]
                pub fn $builder(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*

            /// Builder form of [`Record::set_extra`](crate::codec::Record::set_extra).
            pub fn with_extra(
                mut self,
                key: impl Into<String>,
                value: serde_json::Value,
            ) -> Result<Self, $crate::error::InvalidInputError> {
                $crate::codec::Record::set_extra(&mut self, key, value)?;
                Ok(self)
            }
        }

        impl $crate::codec::Record for $name {
            fn schema() -> &'static $crate::schema::Schema {
                &$schema
            }

            fn from_parts(
                #[allow(unused_mut)] mut slots: $crate::codec::Slots,
                extras: $crate::codec::Extras,
            ) -> Result<Self, $crate::error::CodecError> {
                Ok(Self {
                    $($field: slots.next_slot()?,)*
                    extras,
                })
            }

            fn field_values(&self) -> Vec<Option<serde_json::Value>> {
                vec![$(self.$field.as_ref().map($crate::codec::FieldType::to_json)),*]
            }

            fn extras(&self) -> &$crate::codec::Extras {
                &self.extras
            }

            fn extras_mut(&mut self) -> &mut $crate::codec::Extras {
                &mut self.extras
            }
        }

        impl $crate::codec::FieldType for $name {
            fn from_json(
                value: serde_json::Value,
                path: &str,
            ) -> Result<Self, $crate::error::CodecError> {
                $crate::codec::decode_at(value, path)
            }

            fn to_json(&self) -> serde_json::Value {
                $crate::codec::encode(self)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&$crate::codec::encode(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                $crate::codec::decode(value).map_err(serde::de::Error::custom)
            }
        }
    };
}
