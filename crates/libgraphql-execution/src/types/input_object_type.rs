use crate::loc;
use crate::types::DirectiveAnnotation;
use crate::types::InputValueDefinition;
use indexmap::IndexMap;

/// Represents an
/// [input object type](https://spec.graphql.org/October2021/#sec-Input-Objects)
/// defined in the schema.
#[derive(Clone, Debug)]
pub struct InputObjectType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) fields: IndexMap<String, InputValueDefinition>,
    pub(crate) name: String,
}
impl InputObjectType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        self.directives.as_slice()
    }

    pub fn field(&self, name: &str) -> Option<&InputValueDefinition> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.fields
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
