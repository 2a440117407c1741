use crate::directives::DirectiveDefinition;
use crate::execution::OperationKind;
use crate::resolver::Resolver;
use crate::resolver::TypeResolver;
use crate::schema::SchemaBuilder;
use crate::types::FieldDefinition;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A built, immutable GraphQL schema: the type system plus the runtime
/// behavior (resolvers, scalar and directive implementations) attached to
/// it. A [Schema] is safe to share across concurrently executing requests.
#[derive(Debug)]
pub struct Schema {
    pub(crate) default_resolver: Resolver,
    pub(crate) default_type_resolver: TypeResolver,
    pub(crate) directive_defs: IndexMap<String, DirectiveDefinition>,
    pub(crate) mutation_type: Option<String>,
    pub(crate) possible_types: HashMap<String, Vec<String>>,
    pub(crate) query_type: String,
    pub(crate) subscription_type: Option<String>,
    pub(crate) typename_field: FieldDefinition,
    pub(crate) types: IndexMap<String, GraphQLType>,
}
impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Every directive defined by the schema, including the built-in ones.
    pub fn defined_directives(&self) -> &IndexMap<String, DirectiveDefinition> {
        &self.directive_defs
    }

    /// Every named type defined by the schema, including the built-in
    /// scalars.
    pub fn defined_types(&self) -> &IndexMap<String, GraphQLType> {
        &self.types
    }

    /// Looks up a field selectable on `object_type`, including the
    /// `__typename` meta-field.
    pub fn find_field<'a>(
        &'a self,
        object_type: &'a ObjectType,
        field_name: &str,
    ) -> Option<&'a FieldDefinition> {
        if field_name == "__typename" {
            return Some(&self.typename_field);
        }
        object_type.field(field_name)
    }

    pub fn find_directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directive_defs.get(name)
    }

    pub fn find_object_type(&self, name: &str) -> Option<&ObjectType> {
        self.find_type(name).and_then(GraphQLType::as_object)
    }

    pub fn find_type(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    /// Whether `object_type_name` is one of the concrete types of the
    /// abstract (interface or union) type named `abstract_type_name`.
    ///
    /// See: https://spec.graphql.org/October2021/#GetPossibleTypes()
    pub fn is_possible_type(&self, abstract_type_name: &str, object_type_name: &str) -> bool {
        self.possible_types
            .get(abstract_type_name)
            .is_some_and(|names| names.iter().any(|name| name == object_type_name))
    }

    /// The root object type for operations of the given kind, if the schema
    /// defines one.
    pub fn operation_type(&self, kind: OperationKind) -> Option<&ObjectType> {
        let type_name = match kind {
            OperationKind::Mutation => self.mutation_type.as_deref()?,
            OperationKind::Query => self.query_type.as_str(),
            OperationKind::Subscription => self.subscription_type.as_deref()?,
        };
        self.find_object_type(type_name)
    }

    /// The concrete object types of an abstract type.
    pub fn possible_types(&self, abstract_type_name: &str) -> Vec<&ObjectType> {
        self.possible_types
            .get(abstract_type_name)
            .map(|names| {
                names.iter()
                    .filter_map(|name| self.find_object_type(name))
                    .collect()
            })
            .unwrap_or_default()
    }
}
