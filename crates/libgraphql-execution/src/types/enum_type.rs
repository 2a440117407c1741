use crate::directives::DirectiveChain;
use crate::loc;
use crate::types::DirectiveAnnotation;
use crate::value::JsonValue;
use indexmap::IndexMap;

/// Represents an
/// [enum type](https://spec.graphql.org/October2021/#sec-Enums) defined in
/// the schema.
#[derive(Clone, Debug)]
pub struct EnumType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) name: String,
    pub(crate) values: IndexMap<String, EnumValue>,
}
impl EnumType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        self.directives.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Maps a resolved value onto the name of the enum value it represents.
    ///
    /// Values are matched against each enum value's internal representation
    /// first and against the value names second.
    pub(crate) fn serialize(&self, raw_value: &JsonValue) -> Option<&str> {
        self.values.values()
            .find(|enum_value| &enum_value.value == raw_value)
            .or_else(|| raw_value.as_str().and_then(|name| self.values.get(name)))
            .map(|enum_value| enum_value.name.as_str())
    }

    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.get(name)
    }

    pub fn values(&self) -> &IndexMap<String, EnumValue> {
        &self.values
    }
}

#[derive(Clone, Debug)]
pub struct EnumValue {
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) input_directives: DirectiveChain,
    pub(crate) name: String,
    pub(crate) value: JsonValue,
}
impl EnumValue {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        self.directives.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The internal representation of this value. Unless one was registered
    /// with [SchemaBuilder::enum_value](crate::schema::SchemaBuilder::enum_value),
    /// this is the value's name as a string.
    pub fn value(&self) -> &JsonValue {
        &self.value
    }
}
