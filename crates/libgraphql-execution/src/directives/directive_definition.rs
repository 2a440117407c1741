use crate::directives::Directive;
use crate::loc;
use crate::types::InputValueDefinition;
use indexmap::IndexMap;
use std::sync::Arc;

/// A directive declared in the schema (or one of the built-in directives),
/// together with its runtime implementation if one was registered.
///
/// See: https://spec.graphql.org/October2021/#sec-Type-System.Directives
#[derive(Clone, Debug)]
pub struct DirectiveDefinition {
    pub(crate) arguments: IndexMap<String, InputValueDefinition>,
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) implementation: Option<Arc<dyn Directive>>,
    pub(crate) locations: Vec<String>,
    pub(crate) name: String,
    pub(crate) repeatable: bool,
}
impl DirectiveDefinition {
    pub fn arguments(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.arguments
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn implementation(&self) -> Option<&Arc<dyn Directive>> {
        self.implementation.as_ref()
    }

    pub fn is_builtin(&self) -> bool {
        self.def_location == loc::SchemaDefLocation::GraphQLBuiltIn
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// The directive locations (e.g. `FIELD`, `ARGUMENT_DEFINITION`) this
    /// directive may be applied to.
    pub fn locations(&self) -> &[String] {
        self.locations.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
