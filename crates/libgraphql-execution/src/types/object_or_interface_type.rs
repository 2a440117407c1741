use crate::types::FieldDefinition;
use indexmap::IndexMap;

/// Shared accessors for the two kinds of types that declare fields.
pub trait ObjectOrInterfaceType {
    fn field(&self, field_name: &str) -> Option<&FieldDefinition>;
    fn fields(&self) -> &IndexMap<String, FieldDefinition>;
    fn interface_names(&self) -> &[String];
    fn name(&self) -> &str;
}
