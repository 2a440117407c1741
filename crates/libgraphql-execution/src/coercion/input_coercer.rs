use crate::ast;
use crate::coercion::coercion_error;
use crate::coercion::CoercionResult;
use crate::coercion::Path;
use crate::directives::DirectiveChain;
use crate::directives::DirectiveError;
use crate::loc::SourceLocation;
use crate::schema::Schema;
use crate::types::EnumType;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::ScalarType;
use crate::types::TypeAnnotation;
use crate::value::JsonMap;
use crate::value::JsonValue;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Coerces input values (variable values, argument literals, default values)
/// against one input type annotation.
///
/// The coercer mirrors the annotation's wrapping structure (outermost
/// wrapper first) and carries the `on_post_input_coercion` directive chain of
/// the position it was built for. Named types are looked up in the schema at
/// coercion time, which is what lets input object types refer to themselves.
#[derive(Clone, Debug)]
pub struct InputCoercer {
    directives: DirectiveChain,
    node: CoercerNode,
}
impl InputCoercer {
    /// Coerces the raw JSON `value`, reporting errors at `location` and under
    /// `path`.
    pub fn coerce<'a>(
        &'a self,
        schema: &'a Schema,
        value: &'a JsonValue,
        location: Option<SourceLocation>,
        path: Option<Arc<Path>>,
    ) -> BoxFuture<'a, CoercionResult> {
        self.coerce_input(schema, Input::Raw(value), location, path)
    }

    /// Coerces a literal written in a document.
    ///
    /// Literals are checked by kind (an enum position only accepts enum
    /// literals, a scalar position hands the literal to the scalar). Variable
    /// references, at any depth, resolve to their entry in the already
    /// coerced `variables` and are not coerced again.
    pub fn coerce_literal<'a>(
        &'a self,
        schema: &'a Schema,
        value: &'a ast::query::Value,
        variables: &'a JsonMap,
        location: Option<SourceLocation>,
        path: Option<Arc<Path>>,
    ) -> BoxFuture<'a, CoercionResult> {
        self.coerce_input(schema, Input::Literal { value, variables }, location, path)
    }

    fn coerce_input<'a>(
        &'a self,
        schema: &'a Schema,
        input: Input<'a>,
        location: Option<SourceLocation>,
        path: Option<Arc<Path>>,
    ) -> BoxFuture<'a, CoercionResult> {
        Box::pin(async move {
            let result = coerce_node(
                &self.node,
                schema,
                input,
                location,
                path.clone(),
            ).await;
            if self.directives.is_empty() || input.variable_value().is_some() {
                return result;
            }
            match result.into_result() {
                Ok(coerced) => match self.directives.run_post_input_coercion(coerced).await {
                    Ok(value) => CoercionResult::ok(value),
                    Err(err) => directive_failure(err, location, path.as_deref()),
                },
                Err(errors) => CoercionResult::failed(errors),
            }
        })
    }

    pub fn directives(&self) -> &DirectiveChain {
        &self.directives
    }

    pub fn new(type_annotation: &TypeAnnotation, directives: DirectiveChain) -> Self {
        Self {
            directives,
            node: CoercerNode::from_type_annotation(type_annotation),
        }
    }
}

/// What is being coerced: a raw JSON value, or a document literal along with
/// the request's coerced variable values.
#[derive(Clone, Copy, Debug)]
enum Input<'a> {
    Literal {
        value: &'a ast::query::Value,
        variables: &'a JsonMap,
    },
    Raw(&'a JsonValue),
}
impl<'a> Input<'a> {
    /// The entries of an object input, or `None` when this is not an object.
    fn fields(self) -> Option<Vec<(&'a str, Input<'a>)>> {
        match self {
            Self::Literal { value: ast::query::Value::Object(fields), variables } => Some(
                fields.iter()
                    .map(|(name, value)| (name.as_str(), Self::Literal { value, variables }))
                    .collect(),
            ),
            Self::Raw(JsonValue::Object(fields)) => Some(
                fields.iter()
                    .map(|(name, value)| (name.as_str(), Self::Raw(value)))
                    .collect(),
            ),
            _ => None,
        }
    }

    fn is_missing_variable(self) -> bool {
        matches!(self.variable_value(), Some(None))
    }

    /// Literal `null`, raw `null` and references to null or missing variables.
    fn is_null(self) -> bool {
        match self {
            Self::Literal { value: ast::query::Value::Null, .. } => true,
            Self::Literal { .. } => self.variable_value().is_some_and(|value| {
                value.is_none_or(JsonValue::is_null)
            }),
            Self::Raw(value) => value.is_null(),
        }
    }

    /// The items of a list input, or `None` when this is not a list.
    fn items(self) -> Option<Vec<Input<'a>>> {
        match self {
            Self::Literal { value: ast::query::Value::List(items), variables } => Some(
                items.iter().map(|value| Self::Literal { value, variables }).collect(),
            ),
            Self::Raw(JsonValue::Array(items)) => Some(items.iter().map(Self::Raw).collect()),
            _ => None,
        }
    }

    /// For a variable reference, the variable's runtime value (if any).
    fn variable_value(self) -> Option<Option<&'a JsonValue>> {
        match self {
            Self::Literal { value: ast::query::Value::Variable(var_name), variables } =>
                Some(variables.get(var_name.as_str())),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
enum CoercerNode {
    List(Box<CoercerNode>),
    Named(String),
    NonNull {
        inner: Box<CoercerNode>,
        type_display: String,
    },
}
impl CoercerNode {
    fn from_type_annotation(type_annotation: &TypeAnnotation) -> Self {
        let nullable_node = match type_annotation {
            TypeAnnotation::List(list_annot) => Self::List(Box::new(
                Self::from_type_annotation(list_annot.inner_type()),
            )),
            TypeAnnotation::Named(named_annot) =>
                Self::Named(named_annot.type_name().to_string()),
        };

        if type_annotation.nullable() {
            nullable_node
        } else {
            Self::NonNull {
                inner: Box::new(nullable_node),
                type_display: type_annotation.to_string(),
            }
        }
    }
}

fn directive_failure(
    err: DirectiveError,
    location: Option<SourceLocation>,
    path: Option<&Path>,
) -> CoercionResult {
    CoercionResult::failed(
        err.messages()
            .into_iter()
            .map(|message| coercion_error(message, location, path, None))
            .collect(),
    )
}

fn coerce_node<'a>(
    node: &'a CoercerNode,
    schema: &'a Schema,
    input: Input<'a>,
    location: Option<SourceLocation>,
    path: Option<Arc<Path>>,
) -> BoxFuture<'a, CoercionResult> {
    Box::pin(async move {
        if let Some(variable_value) = input.variable_value()
            && !matches!(node, CoercerNode::NonNull { .. }) {
            return CoercionResult::ok(variable_value.cloned().unwrap_or(JsonValue::Null));
        }

        match node {
            CoercerNode::NonNull { inner, type_display } => {
                if input.is_null() {
                    return CoercionResult::failed(vec![coercion_error(
                        format!("Expected non-nullable type < {type_display} > not to be null"),
                        location,
                        path.as_deref(),
                        None,
                    )]);
                }
                coerce_node(inner, schema, input, location, path).await
            },

            CoercerNode::List(inner) => {
                if input.is_null() {
                    return CoercionResult::ok(JsonValue::Null);
                }
                let Some(items) = input.items() else {
                    // A single value is coerced as a list of one item.
                    let result = coerce_node(inner, schema, input, location, path).await;
                    return match result.into_result() {
                        Ok(coerced) => CoercionResult::ok(JsonValue::Array(vec![coerced])),
                        Err(errors) => CoercionResult::failed(errors),
                    };
                };

                let mut coerced_items = vec![];
                let mut errors = vec![];
                for (index, item) in items.into_iter().enumerate() {
                    let item_path = Path::extend(path.as_ref(), index);
                    let result =
                        coerce_node(inner, schema, item, location, Some(item_path)).await;
                    match result.into_result() {
                        Ok(coerced) if errors.is_empty() => coerced_items.push(coerced),
                        Ok(_) => (),
                        Err(item_errors) => errors.extend(item_errors),
                    }
                }
                CoercionResult::new(JsonValue::Array(coerced_items), errors)
            },

            CoercerNode::Named(type_name) => match schema.find_type(type_name) {
                Some(GraphQLType::Enum(enum_type)) =>
                    coerce_enum(enum_type, input, location, path.as_deref()).await,

                Some(GraphQLType::InputObject(input_object_type)) =>
                    coerce_input_object(input_object_type, schema, input, location, path).await,

                Some(GraphQLType::Scalar(scalar_type)) =>
                    coerce_scalar(scalar_type, input, location, path.as_deref()),

                Some(
                    GraphQLType::Interface(_)
                    | GraphQLType::Object(_)
                    | GraphQLType::Union(_)
                ) => CoercionResult::failed(vec![coercion_error(
                    format!("Expected type < {type_name} > to be an input type"),
                    location,
                    path.as_deref(),
                    None,
                )]),

                None => CoercionResult::failed(vec![coercion_error(
                    format!("Unknown type < {type_name} >"),
                    location,
                    path.as_deref(),
                    None,
                )]),
            },
        }
    })
}

fn coerce_scalar(
    scalar_type: &ScalarType,
    input: Input<'_>,
    location: Option<SourceLocation>,
    path: Option<&Path>,
) -> CoercionResult {
    if input.is_null() {
        return CoercionResult::ok(JsonValue::Null);
    }

    let expected_type_msg = format!("Expected type < {} >", scalar_type.name());
    let Some(implementation) = scalar_type.implementation() else {
        return CoercionResult::failed(vec![coercion_error(
            expected_type_msg,
            location,
            path,
            Some(format!("Scalar < {} > is missing a parse method.", scalar_type.name()).as_str()),
        )]);
    };

    let coerced = match input {
        Input::Literal { value, variables } =>
            implementation.coerce_literal(value, Some(variables)),
        Input::Raw(value) => implementation.coerce_input(value),
    };
    match coerced {
        Ok(coerced) => CoercionResult::ok(coerced),
        Err(err) => CoercionResult::failed(vec![coercion_error(
            expected_type_msg,
            location,
            path,
            err.sub_message(),
        )]),
    }
}

async fn coerce_enum(
    enum_type: &EnumType,
    input: Input<'_>,
    location: Option<SourceLocation>,
    path: Option<&Path>,
) -> CoercionResult {
    if input.is_null() {
        return CoercionResult::ok(JsonValue::Null);
    }

    let value_name = match input {
        Input::Literal { value: ast::query::Value::Enum(name), .. } => Some(name.as_str()),
        Input::Literal { .. } => None,
        Input::Raw(value) => value.as_str(),
    };
    let Some(enum_value) = value_name.and_then(|name| enum_type.value(name)) else {
        return CoercionResult::failed(vec![coercion_error(
            format!("Expected type < {} >", enum_type.name()),
            location,
            path,
            None,
        )]);
    };

    if enum_value.input_directives.is_empty() {
        return CoercionResult::ok(enum_value.value.clone());
    }
    match enum_value.input_directives.run_post_input_coercion(enum_value.value.clone()).await {
        Ok(coerced) => CoercionResult::ok(coerced),
        Err(err) => directive_failure(err, location, path),
    }
}

async fn coerce_input_object(
    input_object_type: &InputObjectType,
    schema: &Schema,
    input: Input<'_>,
    location: Option<SourceLocation>,
    path: Option<Arc<Path>>,
) -> CoercionResult {
    if input.is_null() {
        return CoercionResult::ok(JsonValue::Null);
    }
    let Some(provided_fields) = input.fields() else {
        return CoercionResult::failed(vec![coercion_error(
            format!("Expected type < {} > to be an object", input_object_type.name()),
            location,
            path.as_deref(),
            None,
        )]);
    };

    let mut coerced_fields = JsonMap::new();
    let mut errors = vec![];
    for (field_name, field_def) in input_object_type.fields() {
        let provided = provided_fields.iter()
            .find(|(name, _)| *name == field_name.as_str())
            .map(|(_, field_input)| *field_input)
            .filter(|field_input| !field_input.is_missing_variable());
        match provided {
            Some(field_input) => {
                let field_path = Path::extend(path.as_ref(), field_name.as_str());
                let result = field_def.coercer
                    .coerce_input(schema, field_input, location, Some(field_path))
                    .await;
                match result.into_result() {
                    Ok(coerced) => {
                        coerced_fields.insert(field_name.to_string(), coerced);
                    },
                    Err(field_errors) => errors.extend(field_errors),
                }
            },

            None => {
                if let Some(default_value) = field_def.default_value() {
                    coerced_fields.insert(field_name.to_string(), default_value.clone());
                } else if !field_def.value_type().nullable() {
                    errors.push(coercion_error(
                        format!(
                            "Field < {} > of required type < {} > was not provided",
                            Path::extend(path.as_ref(), field_name.as_str()),
                            field_def.value_type(),
                        ),
                        location,
                        None,
                        None,
                    ));
                }
            },
        }
    }

    for (provided_name, _) in &provided_fields {
        if input_object_type.field(provided_name).is_none() {
            errors.push(coercion_error(
                format!(
                    "Field < {provided_name} > is not defined by type < {} >",
                    input_object_type.name(),
                ),
                location,
                path.as_deref(),
                None,
            ));
        }
    }

    CoercionResult::new(JsonValue::Object(coerced_fields), errors)
}
