use crate::directives::DirectiveChain;
use crate::loc;
use crate::resolver::Resolver;
use crate::resolver::SubscribeResolver;
use crate::types::DirectiveAnnotation;
use crate::types::InputValueDefinition;
use crate::types::ObjectOrInterfaceType;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;

/// Represents an
/// [object type](https://spec.graphql.org/October2021/#sec-Objects) defined
/// in the schema.
#[derive(Clone, Debug)]
pub struct ObjectType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) fields: IndexMap<String, FieldDefinition>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}
impl ObjectType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        self.directives.as_slice()
    }
}

#[inherent::inherent]
impl ObjectOrInterfaceType for ObjectType {
    pub fn field(&self, field_name: &str) -> Option<&FieldDefinition> {
        self.fields.get(field_name)
    }

    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.fields
    }

    pub fn interface_names(&self) -> &[String] {
        self.interfaces.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// A field declared on an object or interface type, together with the
/// runtime behavior attached to it when the schema was built.
#[derive(Clone, Debug)]
pub struct FieldDefinition {
    pub(crate) arguments: IndexMap<String, InputValueDefinition>,
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    /// `on_field_execution` hooks of the field's own directives.
    pub(crate) execution_directives: DirectiveChain,
    pub(crate) name: String,
    /// `on_pre_output_coercion` hooks of the field's directives followed by
    /// those of its named output type.
    pub(crate) output_directives: DirectiveChain,
    pub(crate) output_type: TypeAnnotation,
    pub(crate) parent_type_name: String,
    pub(crate) resolver: Option<Resolver>,
    pub(crate) subscribe: Option<SubscribeResolver>,
}
impl FieldDefinition {
    pub fn argument(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments.get(name)
    }

    pub fn arguments(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.arguments
    }

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

    pub fn output_type(&self) -> &TypeAnnotation {
        &self.output_type
    }

    /// Name of the object or interface type that declares this field.
    pub fn parent_type_name(&self) -> &str {
        self.parent_type_name.as_str()
    }

    /// The resolver registered for this field, if any. Fields without one
    /// use the schema's default resolver.
    pub fn resolver(&self) -> Option<&Resolver> {
        self.resolver.as_ref()
    }

    pub fn subscribe_resolver(&self) -> Option<&SubscribeResolver> {
        self.subscribe.as_ref()
    }
}
