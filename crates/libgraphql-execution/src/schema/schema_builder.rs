use crate::ast;
use crate::coercion::InputCoercer;
use crate::directives::Directive;
use crate::directives::DirectiveChain;
use crate::directives::DirectiveDefinition;
use crate::directives::IncludeDirective;
use crate::directives::SkipDirective;
use crate::execution::OperationKind;
use crate::file_reader;
use crate::loc;
use crate::resolver;
use crate::resolver::Resolver;
use crate::resolver::SubscribeResolver;
use crate::resolver::TypeResolver;
use crate::schema::default_values;
use crate::schema::Schema;
use crate::schema::TypeValidationError;
use crate::types;
use crate::types::DirectiveAnnotation;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::FieldDefinition;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::InputValueDefinition;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarImplementation;
use crate::types::ScalarType;
use crate::types::TypeAnnotation;
use crate::types::UnionType;
use crate::value::JsonValue;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_DIRECTIVES_SDL: &str = concat!(
    "directive @skip(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT\n",
    "directive @include(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT\n",
    "directive @deprecated(\n",
    "  reason: String = \"No longer supported\"\n",
    ") on FIELD_DEFINITION | ARGUMENT_DEFINITION | INPUT_FIELD_DEFINITION | ENUM_VALUE\n",
    "directive @specifiedBy(url: String!) on SCALAR\n",
);

/// Utility for building a [Schema].
///
/// SDL is loaded with [SchemaBuilder::load_str] / [SchemaBuilder::load_files]
/// and runtime behavior is attached by schema coordinate (e.g.
/// `"Query.hello"`). Registrations are checked against the loaded type
/// system when [SchemaBuilder::build] is called.
///
/// ```ignore
/// let schema = SchemaBuilder::new()
///     .load_str(None, "type Query { hello: String }")?
///     .resolver("Query.hello", Resolver::value(json!("world")))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    default_resolver: Option<Resolver>,
    directive_defs: IndexMap<String, DirectiveDefinition>,
    directive_impls: Vec<(String, Arc<dyn Directive>)>,
    enum_values: Vec<(String, JsonValue)>,
    extensions: Vec<(PathBuf, ast::schema::TypeExtension)>,
    mutation_type: Option<NamedTypeDefLocation>,
    query_type: Option<NamedTypeDefLocation>,
    resolvers: Vec<(String, Resolver)>,
    scalar_impls: Vec<(String, Arc<dyn ScalarImplementation>)>,
    str_load_counter: u16,
    subscribe_resolvers: Vec<(String, SubscribeResolver)>,
    subscription_type: Option<NamedTypeDefLocation>,
    type_resolvers: Vec<(String, TypeResolver)>,
    types: IndexMap<String, GraphQLType>,
}
impl SchemaBuilder {
    pub fn build(mut self) -> Result<Schema> {
        for (file_path, ext) in std::mem::take(&mut self.extensions) {
            self.apply_type_extension(file_path.as_path(), ext)?;
        }
        self.inject_builtin_directives()?;
        self.attach_implementations()?;

        let query_type = self.resolve_root_type(OperationKind::Query)?
            .ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;
        let mutation_type = self.resolve_root_type(OperationKind::Mutation)?;
        let subscription_type = self.resolve_root_type(OperationKind::Subscription)?;

        let errors = self.validate_type_references();
        if !errors.is_empty() {
            return Err(SchemaBuildError::TypeValidationErrors { errors });
        }
        default_values::coerce_default_values(&mut self.types, &mut self.directive_defs)?;

        self.compose_directive_chains();
        let possible_types = self.compute_possible_types();

        let schema = Schema {
            default_resolver: self.default_resolver
                .unwrap_or_else(resolver::default_resolver),
            default_type_resolver: resolver::default_type_resolver(),
            directive_defs: self.directive_defs,
            mutation_type,
            possible_types,
            query_type,
            subscription_type,
            typename_field: typename_field_definition(),
            types: self.types,
        };

        for directive_def in schema.directive_defs.values() {
            if let Some(implementation) = &directive_def.implementation {
                implementation.on_build(&schema).map_err(|err| {
                    SchemaBuildError::DirectiveBuildHookFailed {
                        directive_name: directive_def.name.to_string(),
                        message: err.to_string(),
                    }
                })?;
            }
        }

        Ok(schema)
    }

    /// Registers the resolver used by fields that have none of their own.
    /// Defaults to reading `parent[fieldName]` from a JSON object parent.
    pub fn default_resolver(mut self, resolver: Resolver) -> Self {
        self.default_resolver = Some(resolver);
        self
    }

    /// Registers the implementation of the directive named `name`.
    pub fn directive(
        mut self,
        name: impl Into<String>,
        implementation: impl Directive + 'static,
    ) -> Self {
        self.directive_impls.push((name.into(), Arc::new(implementation)));
        self
    }

    /// Sets the internal representation of the enum value at `coordinate`
    /// (e.g. `"Color.RED"`).
    pub fn enum_value(mut self, coordinate: impl Into<String>, value: JsonValue) -> Self {
        self.enum_values.push((coordinate.into(), value));
        self
    }

    pub fn from_files(file_paths: &[impl AsRef<Path>]) -> Result<Self> {
        Self::new().load_files(file_paths)
    }

    pub fn from_str(file_path: Option<PathBuf>, content: &str) -> Result<Self> {
        Self::new().load_str(file_path, content)
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        self.load_files(&[file_path])
    }

    pub fn load_files(mut self, file_paths: &[impl AsRef<Path>]) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let file_content = file_reader::read_content(file_path)
                .map_err(|err| SchemaBuildError::SchemaFileReadError(Box::new(err)))?;
            self = self.load_str(Some(file_path.to_path_buf()), file_content.as_str())?;
        }
        Ok(self)
    }

    pub fn load_str(mut self, file_path: Option<PathBuf>, content: &str) -> Result<Self> {
        let file_path =
            if let Some(file_path) = file_path {
                file_path
            } else {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            };

        let ast_doc = ast::schema::parse(content)
            .map_err(|err| SchemaBuildError::ParseError {
                file: file_path.to_owned(),
                err: err.to_string(),
            })?;

        for def in ast_doc.definitions {
            self.visit_ast_def(file_path.as_path(), def)?;
        }

        Ok(self)
    }

    pub fn new() -> Self {
        let types = types::builtin_scalars()
            .into_iter()
            .map(|(name, implementation)| (
                name.to_string(),
                GraphQLType::Scalar(ScalarType {
                    def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
                    description: None,
                    directives: vec![],
                    implementation: Some(implementation),
                    name: name.to_string(),
                }),
            ))
            .collect();

        Self {
            default_resolver: None,
            directive_defs: IndexMap::new(),
            directive_impls: vec![],
            enum_values: vec![],
            extensions: vec![],
            mutation_type: None,
            query_type: None,
            resolvers: vec![],
            scalar_impls: vec![],
            str_load_counter: 0,
            subscribe_resolvers: vec![],
            subscription_type: None,
            type_resolvers: vec![],
            types,
        }
    }

    /// Registers the resolver of the field at `coordinate` (e.g.
    /// `"Query.hello"`).
    pub fn resolver(mut self, coordinate: impl Into<String>, resolver: Resolver) -> Self {
        self.resolvers.push((coordinate.into(), resolver));
        self
    }

    /// Registers the implementation of the custom scalar named `name`.
    pub fn scalar(
        mut self,
        name: impl Into<String>,
        implementation: impl ScalarImplementation + 'static,
    ) -> Self {
        self.scalar_impls.push((name.into(), Arc::new(implementation)));
        self
    }

    /// Registers the source event stream of the subscription field at
    /// `coordinate` (e.g. `"Subscription.countdown"`).
    pub fn subscription(
        mut self,
        coordinate: impl Into<String>,
        subscribe_resolver: SubscribeResolver,
    ) -> Self {
        self.subscribe_resolvers.push((coordinate.into(), subscribe_resolver));
        self
    }

    /// Registers how the interface or union named `type_name` resolves the
    /// concrete type of its values. Defaults to reading `__typename`.
    pub fn type_resolver(mut self, type_name: impl Into<String>, type_resolver: TypeResolver) -> Self {
        self.type_resolvers.push((type_name.into(), type_resolver));
        self
    }

    // =========================================================================
    // SDL visitors
    // =========================================================================

    fn visit_ast_def(&mut self, file_path: &Path, def: ast::schema::Definition) -> Result<()> {
        use ast::schema::Definition;
        match def {
            Definition::SchemaDefinition(schema_def) =>
                self.visit_ast_schemablock_def(file_path, schema_def),
            Definition::TypeDefinition(type_def) =>
                self.visit_ast_type_def(file_path, type_def),
            Definition::TypeExtension(type_ext) => {
                self.extensions.push((file_path.to_path_buf(), type_ext));
                Ok(())
            },
            Definition::DirectiveDefinition(directive_def) =>
                self.visit_ast_directive_def(file_path, directive_def),
        }
    }

    fn visit_ast_directive_def(
        &mut self,
        file_path: &Path,
        def: ast::schema::DirectiveDefinition,
    ) -> Result<()> {
        let def_location: loc::SchemaDefLocation =
            loc::FilePosition::from_pos(file_path, def.position).into();

        if ["skip", "include", "deprecated", "specifiedBy"].contains(&def.name.as_str()) {
            return Err(SchemaBuildError::RedefinitionOfBuiltinDirective {
                directive_name: def.name,
                location: def_location,
            });
        }

        if let Some(existing_def) = self.directive_defs.get(def.name.as_str()) {
            return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: def.name.to_string(),
                location1: existing_def.def_location.clone(),
                location2: def_location,
            });
        }

        self.directive_defs.insert(def.name.to_string(), DirectiveDefinition {
            arguments: input_values_from_ast(file_path, &def.arguments),
            def_location,
            description: def.description.to_owned(),
            implementation: None,
            locations: def.locations.iter().map(|location| location.as_str().to_string()).collect(),
            name: def.name.to_string(),
            repeatable: def.repeatable,
        });

        Ok(())
    }

    fn visit_ast_schemablock_def(
        &mut self,
        file_path: &Path,
        schema_def: ast::schema::SchemaDefinition,
    ) -> Result<()> {
        let root_types = [
            (OperationKind::Query, schema_def.query),
            (OperationKind::Mutation, schema_def.mutation),
            (OperationKind::Subscription, schema_def.subscription),
        ];
        for (operation, type_name) in root_types {
            let Some(type_name) = type_name else {
                continue;
            };
            let typedef_loc = NamedTypeDefLocation::from_pos(
                type_name,
                file_path,
                schema_def.position,
            );
            let slot = match operation {
                OperationKind::Mutation => &mut self.mutation_type,
                OperationKind::Query => &mut self.query_type,
                OperationKind::Subscription => &mut self.subscription_type,
            };
            if let Some(existing_typedef_loc) = slot {
                return Err(SchemaBuildError::DuplicateOperationDefinition {
                    operation,
                    location1: existing_typedef_loc.clone(),
                    location2: typedef_loc,
                });
            }
            *slot = Some(typedef_loc);
        }
        Ok(())
    }

    fn visit_ast_type_def(
        &mut self,
        file_path: &Path,
        type_def: ast::schema::TypeDefinition,
    ) -> Result<()> {
        use ast::schema::TypeDefinition;
        let graphql_type = match type_def {
            TypeDefinition::Enum(enum_def) => {
                let mut values = IndexMap::new();
                for value_def in &enum_def.values {
                    insert_enum_value(&mut values, file_path, &enum_def.name, value_def)?;
                }
                GraphQLType::Enum(EnumType {
                    def_location: loc::FilePosition::from_pos(file_path, enum_def.position).into(),
                    description: enum_def.description,
                    directives: DirectiveAnnotation::from_ast_list(&enum_def.directives),
                    name: enum_def.name,
                    values,
                })
            },

            TypeDefinition::InputObject(input_def) => {
                let mut fields = IndexMap::new();
                for field_def in &input_def.fields {
                    if fields.contains_key(field_def.name.as_str()) {
                        return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                            type_name: input_def.name.to_string(),
                            field_name: field_def.name.to_string(),
                            location: loc::FilePosition::from_pos(file_path, field_def.position),
                        });
                    }
                    fields.insert(
                        field_def.name.to_string(),
                        input_value_from_ast(file_path, field_def),
                    );
                }
                GraphQLType::InputObject(InputObjectType {
                    def_location: loc::FilePosition::from_pos(file_path, input_def.position).into(),
                    description: input_def.description,
                    directives: DirectiveAnnotation::from_ast_list(&input_def.directives),
                    fields,
                    name: input_def.name,
                })
            },

            TypeDefinition::Interface(iface_def) => {
                let mut fields = IndexMap::new();
                for field_def in &iface_def.fields {
                    insert_field(&mut fields, file_path, &iface_def.name, field_def)?;
                }
                GraphQLType::Interface(InterfaceType {
                    def_location: loc::FilePosition::from_pos(file_path, iface_def.position).into(),
                    description: iface_def.description,
                    directives: DirectiveAnnotation::from_ast_list(&iface_def.directives),
                    fields,
                    interfaces: iface_def.implements_interfaces,
                    name: iface_def.name,
                    type_resolver: None,
                })
            },

            TypeDefinition::Object(obj_def) => {
                let mut fields = IndexMap::new();
                for field_def in &obj_def.fields {
                    insert_field(&mut fields, file_path, &obj_def.name, field_def)?;
                }
                GraphQLType::Object(ObjectType {
                    def_location: loc::FilePosition::from_pos(file_path, obj_def.position).into(),
                    description: obj_def.description,
                    directives: DirectiveAnnotation::from_ast_list(&obj_def.directives),
                    fields,
                    interfaces: obj_def.implements_interfaces,
                    name: obj_def.name,
                })
            },

            TypeDefinition::Scalar(scalar_def) => GraphQLType::Scalar(ScalarType {
                def_location: loc::FilePosition::from_pos(file_path, scalar_def.position).into(),
                description: scalar_def.description,
                directives: DirectiveAnnotation::from_ast_list(&scalar_def.directives),
                implementation: None,
                name: scalar_def.name,
            }),

            TypeDefinition::Union(union_def) => GraphQLType::Union(UnionType {
                def_location: loc::FilePosition::from_pos(file_path, union_def.position).into(),
                description: union_def.description,
                directives: DirectiveAnnotation::from_ast_list(&union_def.directives),
                members: union_def.types,
                name: union_def.name,
                type_resolver: None,
            }),
        };

        if let Some(existing_type) = self.types.get(graphql_type.name()) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: graphql_type.name().to_string(),
                def1: existing_type.def_location().clone(),
                def2: graphql_type.def_location().clone(),
            });
        }
        self.types.insert(graphql_type.name().to_string(), graphql_type);
        Ok(())
    }

    fn apply_type_extension(
        &mut self,
        file_path: &Path,
        ext: ast::schema::TypeExtension,
    ) -> Result<()> {
        use ast::schema::TypeExtension;
        let (type_name, position) = match &ext {
            TypeExtension::Enum(ext) => (ext.name.as_str(), ext.position),
            TypeExtension::InputObject(ext) => (ext.name.as_str(), ext.position),
            TypeExtension::Interface(ext) => (ext.name.as_str(), ext.position),
            TypeExtension::Object(ext) => (ext.name.as_str(), ext.position),
            TypeExtension::Scalar(ext) => (ext.name.as_str(), ext.position),
            TypeExtension::Union(ext) => (ext.name.as_str(), ext.position),
        };
        let extension_loc: loc::SchemaDefLocation =
            loc::FilePosition::from_pos(file_path, position).into();
        let Some(graphql_type) = self.types.get_mut(type_name) else {
            return Err(SchemaBuildError::ExtensionOfUndefinedType {
                type_name: type_name.to_string(),
                extension_type_loc: extension_loc,
            });
        };

        match (graphql_type, &ext) {
            (GraphQLType::Enum(enum_type), TypeExtension::Enum(ext)) => {
                enum_type.directives.extend(DirectiveAnnotation::from_ast_list(&ext.directives));
                for value_def in &ext.values {
                    insert_enum_value(&mut enum_type.values, file_path, &ext.name, value_def)?;
                }
            },

            (GraphQLType::InputObject(input_type), TypeExtension::InputObject(ext)) => {
                input_type.directives.extend(DirectiveAnnotation::from_ast_list(&ext.directives));
                for field_def in &ext.fields {
                    if input_type.fields.contains_key(field_def.name.as_str()) {
                        return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                            type_name: ext.name.to_string(),
                            field_name: field_def.name.to_string(),
                            location: loc::FilePosition::from_pos(file_path, field_def.position),
                        });
                    }
                    input_type.fields.insert(
                        field_def.name.to_string(),
                        input_value_from_ast(file_path, field_def),
                    );
                }
            },

            (GraphQLType::Interface(iface_type), TypeExtension::Interface(ext)) => {
                iface_type.directives.extend(DirectiveAnnotation::from_ast_list(&ext.directives));
                for field_def in &ext.fields {
                    insert_field(&mut iface_type.fields, file_path, &ext.name, field_def)?;
                }
            },

            (GraphQLType::Object(obj_type), TypeExtension::Object(ext)) => {
                obj_type.directives.extend(DirectiveAnnotation::from_ast_list(&ext.directives));
                obj_type.interfaces.extend(ext.implements_interfaces.iter().cloned());
                for field_def in &ext.fields {
                    insert_field(&mut obj_type.fields, file_path, &ext.name, field_def)?;
                }
            },

            (GraphQLType::Scalar(scalar_type), TypeExtension::Scalar(ext)) =>
                scalar_type.directives.extend(DirectiveAnnotation::from_ast_list(&ext.directives)),

            (GraphQLType::Union(union_type), TypeExtension::Union(ext)) => {
                union_type.directives.extend(DirectiveAnnotation::from_ast_list(&ext.directives));
                union_type.members.extend(ext.types.iter().cloned());
            },

            (graphql_type, _) => return Err(SchemaBuildError::InvalidExtensionType {
                type_name: graphql_type.name().to_string(),
                extension_loc,
            }),
        }

        Ok(())
    }

    // =========================================================================
    // Build steps
    // =========================================================================

    fn inject_builtin_directives(&mut self) -> Result<()> {
        let builtin_file = PathBuf::from("builtin://directives");
        let ast_doc = ast::schema::parse(BUILTIN_DIRECTIVES_SDL)
            .map_err(|err| SchemaBuildError::ParseError {
                file: builtin_file.to_owned(),
                err: err.to_string(),
            })?;

        for def in ast_doc.definitions {
            let ast::schema::Definition::DirectiveDefinition(def) = def else {
                continue;
            };
            let implementation: Option<Arc<dyn Directive>> = match def.name.as_str() {
                "include" => Some(Arc::new(IncludeDirective)),
                "skip" => Some(Arc::new(SkipDirective)),
                _ => None,
            };
            self.directive_defs.insert(def.name.to_string(), DirectiveDefinition {
                arguments: input_values_from_ast(builtin_file.as_path(), &def.arguments),
                def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
                description: def.description.to_owned(),
                implementation,
                locations: def.locations.iter().map(|location| location.as_str().to_string()).collect(),
                name: def.name.to_string(),
                repeatable: def.repeatable,
            });
        }

        Ok(())
    }

    fn attach_implementations(&mut self) -> Result<()> {
        for (directive_name, implementation) in self.directive_impls.drain(..) {
            let Some(directive_def) = self.directive_defs.get_mut(directive_name.as_str()) else {
                return Err(SchemaBuildError::UnknownDirectiveImplementationTarget {
                    directive_name,
                });
            };
            directive_def.implementation = Some(implementation);
        }

        for (scalar_name, implementation) in self.scalar_impls.drain(..) {
            let Some(GraphQLType::Scalar(scalar_type)) = self.types.get_mut(scalar_name.as_str()) else {
                return Err(SchemaBuildError::UnknownScalarImplementationTarget { scalar_name });
            };
            scalar_type.implementation = Some(implementation);
        }

        for (coordinate, internal_value) in self.enum_values.drain(..) {
            let Some(enum_value) = find_enum_value_mut(&mut self.types, coordinate.as_str()) else {
                return Err(SchemaBuildError::UnknownEnumValueTarget { coordinate });
            };
            enum_value.value = internal_value;
        }

        for (coordinate, resolver) in self.resolvers.drain(..) {
            let Some(field_def) = find_field_mut(&mut self.types, coordinate.as_str()) else {
                return Err(SchemaBuildError::UnknownResolverTarget { coordinate });
            };
            field_def.resolver = Some(resolver);
        }

        for (coordinate, subscribe_resolver) in self.subscribe_resolvers.drain(..) {
            let Some(field_def) = find_field_mut(&mut self.types, coordinate.as_str()) else {
                return Err(SchemaBuildError::UnknownResolverTarget { coordinate });
            };
            field_def.subscribe = Some(subscribe_resolver);
        }

        for (type_name, type_resolver) in self.type_resolvers.drain(..) {
            match self.types.get_mut(type_name.as_str()) {
                Some(GraphQLType::Interface(iface_type)) =>
                    iface_type.type_resolver = Some(type_resolver),
                Some(GraphQLType::Union(union_type)) =>
                    union_type.type_resolver = Some(type_resolver),
                _ => return Err(SchemaBuildError::UnknownTypeResolverTarget { type_name }),
            }
        }

        Ok(())
    }

    fn resolve_root_type(&mut self, operation: OperationKind) -> Result<Option<String>> {
        let explicit_def = match operation {
            OperationKind::Mutation => self.mutation_type.take(),
            OperationKind::Query => self.query_type.take(),
            OperationKind::Subscription => self.subscription_type.take(),
        };

        match explicit_def {
            Some(typedef_loc) => match self.types.get(typedef_loc.type_name.as_str()) {
                Some(GraphQLType::Object(_)) => Ok(Some(typedef_loc.type_name)),
                _ => Err(SchemaBuildError::InvalidRootOperationType {
                    operation,
                    location: typedef_loc,
                }),
            },

            None => {
                let default_name = match operation {
                    OperationKind::Mutation => "Mutation",
                    OperationKind::Query => "Query",
                    OperationKind::Subscription => "Subscription",
                };
                Ok(match self.types.get(default_name) {
                    Some(GraphQLType::Object(_)) => Some(default_name.to_string()),
                    _ => None,
                })
            },
        }
    }

    fn validate_type_references(&self) -> Vec<TypeValidationError> {
        let mut errors = vec![];

        let check_input = |errors: &mut Vec<TypeValidationError>,
                           coordinate: String,
                           input_value: &InputValueDefinition| {
            let type_name = input_value.value_type.innermost_type_name();
            match self.types.get(type_name) {
                Some(referenced) if referenced.is_input_type() => (),
                Some(_) => errors.push(TypeValidationError::InvalidInputPositionType {
                    coordinate,
                    def_location: input_value.def_location.clone(),
                    type_name: type_name.to_string(),
                }),
                None => errors.push(TypeValidationError::UndefinedTypeName {
                    coordinate,
                    def_location: input_value.def_location.clone(),
                    type_name: type_name.to_string(),
                }),
            }
        };

        let check_fields = |errors: &mut Vec<TypeValidationError>,
                            type_name: &str,
                            fields: &IndexMap<String, FieldDefinition>| {
            for (field_name, field_def) in fields {
                let coordinate = format!("{type_name}.{field_name}");
                let output_type_name = field_def.output_type.innermost_type_name();
                match self.types.get(output_type_name) {
                    Some(referenced) if referenced.is_output_type() => (),
                    Some(_) => errors.push(TypeValidationError::InvalidOutputPositionType {
                        coordinate: coordinate.to_string(),
                        def_location: field_def.def_location.clone(),
                        type_name: output_type_name.to_string(),
                    }),
                    None => errors.push(TypeValidationError::UndefinedTypeName {
                        coordinate: coordinate.to_string(),
                        def_location: field_def.def_location.clone(),
                        type_name: output_type_name.to_string(),
                    }),
                }
                for (arg_name, arg_def) in &field_def.arguments {
                    check_input(errors, format!("{coordinate}({arg_name}:)"), arg_def);
                }
            }
        };

        let check_interfaces = |errors: &mut Vec<TypeValidationError>,
                                graphql_type: &GraphQLType,
                                interface_names: &[String]| {
            for interface_name in interface_names {
                if !matches!(self.types.get(interface_name), Some(GraphQLType::Interface(_))) {
                    errors.push(TypeValidationError::ImplementsNonInterfaceType {
                        def_location: graphql_type.def_location().clone(),
                        interface_name: interface_name.to_string(),
                        type_name: graphql_type.name().to_string(),
                    });
                }
            }
        };

        for graphql_type in self.types.values() {
            match graphql_type {
                GraphQLType::Enum(_) | GraphQLType::Scalar(_) => (),

                GraphQLType::InputObject(input_type) => {
                    for (field_name, field_def) in &input_type.fields {
                        check_input(
                            &mut errors,
                            format!("{}.{field_name}", input_type.name),
                            field_def,
                        );
                    }
                },

                GraphQLType::Interface(iface_type) => {
                    check_fields(&mut errors, iface_type.name.as_str(), &iface_type.fields);
                    check_interfaces(&mut errors, graphql_type, &iface_type.interfaces);
                },

                GraphQLType::Object(obj_type) => {
                    check_fields(&mut errors, obj_type.name.as_str(), &obj_type.fields);
                    check_interfaces(&mut errors, graphql_type, &obj_type.interfaces);
                },

                GraphQLType::Union(union_type) => {
                    for member_name in &union_type.members {
                        if !matches!(self.types.get(member_name), Some(GraphQLType::Object(_))) {
                            errors.push(TypeValidationError::InvalidUnionMember {
                                def_location: union_type.def_location.clone(),
                                member_name: member_name.to_string(),
                                union_name: union_type.name.to_string(),
                            });
                        }
                    }
                },
            }
        }

        for directive_def in self.directive_defs.values() {
            for (arg_name, arg_def) in &directive_def.arguments {
                check_input(
                    &mut errors,
                    format!("@{}({arg_name}:)", directive_def.name),
                    arg_def,
                );
            }
        }

        errors
    }

    /// Composes, once, the directive chains every coercible or executable
    /// position runs at request time.
    fn compose_directive_chains(&mut self) {
        let type_directives: HashMap<String, Vec<DirectiveAnnotation>> =
            self.types.iter()
                .map(|(name, graphql_type)| (name.to_string(), graphql_type.directives().to_vec()))
                .collect();
        let directive_defs = &self.directive_defs;

        let compose_input_value = |input_value: &mut InputValueDefinition| {
            let named_type_directives = type_directives
                .get(input_value.value_type.innermost_type_name())
                .map(Vec::as_slice)
                .unwrap_or_default();
            input_value.coercer = InputCoercer::new(
                &input_value.value_type,
                DirectiveChain::from_annotations(
                    input_value.directives.iter().chain(named_type_directives),
                    directive_defs,
                ),
            );
            input_value.argument_directives =
                DirectiveChain::from_annotations(&input_value.directives, directive_defs);
        };

        let compose_field = |field_def: &mut FieldDefinition| {
            let named_type_directives = type_directives
                .get(field_def.output_type.innermost_type_name())
                .map(Vec::as_slice)
                .unwrap_or_default();
            field_def.execution_directives =
                DirectiveChain::from_annotations(&field_def.directives, directive_defs);
            field_def.output_directives = DirectiveChain::from_annotations(
                field_def.directives.iter().chain(named_type_directives),
                directive_defs,
            );
            for arg_def in field_def.arguments.values_mut() {
                compose_input_value(arg_def);
            }
        };

        for graphql_type in self.types.values_mut() {
            match graphql_type {
                GraphQLType::Enum(enum_type) => {
                    for enum_value in enum_type.values.values_mut() {
                        enum_value.input_directives =
                            DirectiveChain::from_annotations(&enum_value.directives, directive_defs);
                    }
                },
                GraphQLType::InputObject(input_type) =>
                    input_type.fields.values_mut().for_each(&compose_input_value),
                GraphQLType::Interface(iface_type) =>
                    iface_type.fields.values_mut().for_each(&compose_field),
                GraphQLType::Object(obj_type) =>
                    obj_type.fields.values_mut().for_each(&compose_field),
                GraphQLType::Scalar(_) | GraphQLType::Union(_) => (),
            }
        }
    }

    fn compute_possible_types(&self) -> HashMap<String, Vec<String>> {
        let mut possible_types: HashMap<String, Vec<String>> = HashMap::new();
        for graphql_type in self.types.values() {
            match graphql_type {
                GraphQLType::Object(obj_type) => {
                    for interface_name in &obj_type.interfaces {
                        possible_types
                            .entry(interface_name.to_string())
                            .or_default()
                            .push(obj_type.name.to_string());
                    }
                },
                GraphQLType::Union(union_type) => {
                    possible_types
                        .entry(union_type.name.to_string())
                        .or_default()
                        .extend(union_type.members.iter().cloned());
                },
                _ => (),
            }
        }
        possible_types
    }
}
impl std::default::Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn find_field_mut<'a>(
    types: &'a mut IndexMap<String, GraphQLType>,
    coordinate: &str,
) -> Option<&'a mut FieldDefinition> {
    let (type_name, field_name) = split_coordinate(coordinate)?;
    match types.get_mut(type_name)? {
        GraphQLType::Interface(iface_type) => iface_type.fields.get_mut(field_name),
        GraphQLType::Object(obj_type) => obj_type.fields.get_mut(field_name),
        _ => None,
    }
}

fn find_enum_value_mut<'a>(
    types: &'a mut IndexMap<String, GraphQLType>,
    coordinate: &str,
) -> Option<&'a mut EnumValue> {
    let (type_name, value_name) = split_coordinate(coordinate)?;
    match types.get_mut(type_name)? {
        GraphQLType::Enum(enum_type) => enum_type.values.get_mut(value_name),
        _ => None,
    }
}

fn split_coordinate(coordinate: &str) -> Option<(&str, &str)> {
    coordinate.split_once('.')
}

fn input_value_from_ast(
    file_path: &Path,
    input_value: &ast::schema::InputValue,
) -> InputValueDefinition {
    let value_type = TypeAnnotation::from_ast_type(&input_value.value_type);
    InputValueDefinition {
        argument_directives: DirectiveChain::empty(),
        coercer: InputCoercer::new(&value_type, DirectiveChain::empty()),
        def_location: loc::FilePosition::from_pos(file_path, input_value.position).into(),
        default_literal: input_value.default_value.clone(),
        default_value: None,
        description: input_value.description.to_owned(),
        directives: DirectiveAnnotation::from_ast_list(&input_value.directives),
        name: input_value.name.to_string(),
        value_type,
    }
}

fn input_values_from_ast(
    file_path: &Path,
    input_values: &[ast::schema::InputValue],
) -> IndexMap<String, InputValueDefinition> {
    input_values.iter()
        .map(|input_value| (
            input_value.name.to_string(),
            input_value_from_ast(file_path, input_value),
        ))
        .collect()
}

fn insert_enum_value(
    values: &mut IndexMap<String, EnumValue>,
    file_path: &Path,
    enum_name: &str,
    value_def: &ast::schema::EnumValue,
) -> Result<()> {
    if values.contains_key(value_def.name.as_str()) {
        return Err(SchemaBuildError::DuplicateEnumValueDefinition {
            enum_name: enum_name.to_string(),
            value_name: value_def.name.to_string(),
            location: loc::FilePosition::from_pos(file_path, value_def.position),
        });
    }
    values.insert(value_def.name.to_string(), EnumValue {
        description: value_def.description.to_owned(),
        directives: DirectiveAnnotation::from_ast_list(&value_def.directives),
        input_directives: DirectiveChain::empty(),
        name: value_def.name.to_string(),
        value: JsonValue::String(value_def.name.to_string()),
    });
    Ok(())
}

fn insert_field(
    fields: &mut IndexMap<String, FieldDefinition>,
    file_path: &Path,
    type_name: &str,
    field_def: &ast::schema::Field,
) -> Result<()> {
    if fields.contains_key(field_def.name.as_str()) {
        return Err(SchemaBuildError::DuplicateFieldNameDefinition {
            type_name: type_name.to_string(),
            field_name: field_def.name.to_string(),
            location: loc::FilePosition::from_pos(file_path, field_def.position),
        });
    }
    fields.insert(field_def.name.to_string(), FieldDefinition {
        arguments: input_values_from_ast(file_path, &field_def.arguments),
        def_location: loc::FilePosition::from_pos(file_path, field_def.position).into(),
        description: field_def.description.to_owned(),
        directives: DirectiveAnnotation::from_ast_list(&field_def.directives),
        execution_directives: DirectiveChain::empty(),
        name: field_def.name.to_string(),
        output_directives: DirectiveChain::empty(),
        output_type: TypeAnnotation::from_ast_type(&field_def.field_type),
        parent_type_name: type_name.to_string(),
        resolver: None,
        subscribe: None,
    });
    Ok(())
}

/// The `__typename` meta-field every object type exposes.
fn typename_field_definition() -> FieldDefinition {
    FieldDefinition {
        arguments: IndexMap::new(),
        def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
        description: None,
        directives: vec![],
        execution_directives: DirectiveChain::empty(),
        name: "__typename".to_string(),
        output_directives: DirectiveChain::empty(),
        output_type: TypeAnnotation::named("String", false),
        parent_type_name: String::new(),
        resolver: None,
        subscribe: None,
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("The `@{directive_name}` directive's `on_build` hook failed: {message}")]
    DirectiveBuildHookFailed {
        directive_name: String,
        message: String,
    },

    #[error("Multiple directives were defined with the same name")]
    DuplicateDirectiveDefinition {
        directive_name: String,
        location1: loc::SchemaDefLocation,
        location2: loc::SchemaDefLocation,
    },

    #[error("Multiple enum values named `{value_name}` were defined on the `{enum_name}` enum")]
    DuplicateEnumValueDefinition {
        enum_name: String,
        value_name: String,
        location: loc::FilePosition,
    },

    #[error("Multiple fields named `{field_name}` were defined on the `{type_name}` type")]
    DuplicateFieldNameDefinition {
        type_name: String,
        field_name: String,
        location: loc::FilePosition,
    },

    #[error("Multiple definitions of the {operation} root operation type were defined")]
    DuplicateOperationDefinition {
        operation: OperationKind,
        location1: NamedTypeDefLocation,
        location2: NamedTypeDefLocation,
    },

    #[error("Multiple GraphQL types named `{type_name}` were defined")]
    DuplicateTypeDefinition {
        type_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("Attempted to extend the `{type_name}` type, which is not defined elsewhere")]
    ExtensionOfUndefinedType {
        type_name: String,
        extension_type_loc: loc::SchemaDefLocation,
    },

    #[error("Invalid default value for `{coordinate}`: {message}")]
    InvalidDefaultValue {
        coordinate: String,
        def_location: loc::SchemaDefLocation,
        message: String,
    },

    #[error(
        "Attempted to extend the `{type_name}` type using an extension for a \
        different kind of type"
    )]
    InvalidExtensionType {
        type_name: String,
        extension_loc: loc::SchemaDefLocation,
    },

    #[error("The {operation} root operation type must be a defined object type")]
    InvalidRootOperationType {
        operation: OperationKind,
        location: NamedTypeDefLocation,
    },

    #[error("Attempted to build a schema that has no Query operation type defined")]
    NoQueryOperationTypeDefined,

    #[error("Error parsing schema string")]
    ParseError {
        file: PathBuf,
        err: String,
    },

    #[error("Attempted to redefine a builtin directive")]
    RedefinitionOfBuiltinDirective {
        directive_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("Failure while trying to read a schema file from disk")]
    SchemaFileReadError(Box<file_reader::ReadContentError>),

    #[error(
        "Encountered the following type-validation errors while building the \
        schema:\n\n{}",
        errors.iter()
            .map(|s| format!("  * {s}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )]
    TypeValidationErrors {
        errors: Vec<TypeValidationError>,
    },

    #[error("An implementation was registered for the undefined directive `@{directive_name}`")]
    UnknownDirectiveImplementationTarget {
        directive_name: String,
    },

    #[error("An internal value was registered for the undefined enum value `{coordinate}`")]
    UnknownEnumValueTarget {
        coordinate: String,
    },

    #[error("A resolver was registered for the undefined field `{coordinate}`")]
    UnknownResolverTarget {
        coordinate: String,
    },

    #[error("An implementation was registered for the undefined scalar `{scalar_name}`")]
    UnknownScalarImplementationTarget {
        scalar_name: String,
    },

    #[error(
        "A type resolver was registered for `{type_name}`, which is not an \
        interface or union type"
    )]
    UnknownTypeResolverTarget {
        type_name: String,
    },
}

/// Represents the file location of a given type's definition in the schema.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeDefLocation {
    pub def_location: loc::SchemaDefLocation,
    pub type_name: String,
}
impl NamedTypeDefLocation {
    pub(crate) fn from_pos(
        type_name: String,
        file: &Path,
        pos: graphql_parser::Pos,
    ) -> Self {
        Self {
            def_location: loc::FilePosition::from_pos(file, pos).into(),
            type_name,
        }
    }
}
