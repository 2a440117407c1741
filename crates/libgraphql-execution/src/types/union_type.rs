use crate::loc;
use crate::resolver::TypeResolver;
use crate::types::DirectiveAnnotation;

/// Represents a
/// [union type](https://spec.graphql.org/October2021/#sec-Unions) defined in
/// the schema.
#[derive(Clone, Debug)]
pub struct UnionType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) members: Vec<String>,
    pub(crate) name: String,
    pub(crate) type_resolver: Option<TypeResolver>,
}
impl UnionType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        self.directives.as_slice()
    }

    pub fn member_names(&self) -> &[String] {
        self.members.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_resolver(&self) -> Option<&TypeResolver> {
        self.type_resolver.as_ref()
    }
}
