use crate::ast;
use crate::coercion::InputCoercer;
use crate::directives::DirectiveChain;
use crate::loc;
use crate::types::DirectiveAnnotation;
use crate::types::TypeAnnotation;
use crate::value::JsonValue;

/// An argument of a field or directive, or a field of an input object type.
///
/// See: https://spec.graphql.org/October2021/#InputValueDefinition
#[derive(Clone, Debug)]
pub struct InputValueDefinition {
    pub(crate) argument_directives: DirectiveChain,
    pub(crate) coercer: InputCoercer,
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) default_literal: Option<ast::query::Value>,
    pub(crate) default_value: Option<JsonValue>,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) name: String,
    pub(crate) value_type: TypeAnnotation,
}
impl InputValueDefinition {
    pub fn coercer(&self) -> &InputCoercer {
        &self.coercer
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    /// The default value as written in SDL.
    pub fn default_literal(&self) -> Option<&ast::query::Value> {
        self.default_literal.as_ref()
    }

    /// The default value, coerced against the declared type when the schema
    /// was built.
    pub fn default_value(&self) -> Option<&JsonValue> {
        self.default_value.as_ref()
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

    pub fn value_type(&self) -> &TypeAnnotation {
        &self.value_type
    }
}
