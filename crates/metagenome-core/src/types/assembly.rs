//! Annotated metagenome assembly fetch records.

use serde_json::Value;

use crate::schema::{FieldDescriptor, ValueKind};

open_record! {
    /// Parameters for fetching an annotated metagenome assembly.
    pub struct AssemblyFetchParams in ASSEMBLY_FETCH_PARAMS as "AssemblyFetchParams" {
        /// Reference to the assembly object, e.g. `"1234/5/6"`.
        reference / set_reference / with_reference: String
            => FieldDescriptor::new("ref", ValueKind::String),
        /// Fields of the object's data to include. Absent means all.
        included_fields / set_included_fields / with_included_fields: Vec<String>
            => FieldDescriptor::new("included_fields", ValueKind::List(&ValueKind::String)),
    }
}

open_record! {
    /// Result of an assembly fetch.
    ///
    /// Each genome is a typed workspace object carried as raw JSON.
    pub struct AssemblyFetchResult in ASSEMBLY_FETCH_RESULT as "AssemblyFetchResult" {
        genomes / set_genomes / with_genomes: Vec<Value>
            => FieldDescriptor::new("genomes", ValueKind::List(&ValueKind::Opaque)),
    }
}

impl AssemblyFetchParams {
    /// Parameters fetching every field of `reference`.
    pub fn for_ref(reference: impl Into<String>) -> Self {
        Self::new().with_reference(reference)
    }

    /// Append one field name to `included_fields`.
    pub fn include(mut self, field: impl Into<String>) -> Self {
        self.included_fields
            .get_or_insert_with(Vec::new)
            .push(field.into());
        self
    }
}
