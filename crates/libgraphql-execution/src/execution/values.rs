use crate::ast;
use crate::coercion::InputCoercer;
use crate::directives::DirectiveChain;
use crate::error::GraphQLError;
use crate::loc::SourceLocation;
use crate::schema::Schema;
use crate::types::InputValueDefinition;
use crate::types::TypeAnnotation;
use crate::value::JsonMap;
use crate::value::JsonValue;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, Vec<GraphQLError>>;

/// Computes the argument values of a field or directive selection, given its
/// argument definitions, the literal arguments of the AST node and the
/// (already coerced) variable values of the request.
///
/// See: https://spec.graphql.org/October2021/#CoerceArgumentValues()
pub(crate) async fn get_argument_values(
    argument_defs: &IndexMap<String, InputValueDefinition>,
    arguments: &[(String, ast::query::Value)],
    location: SourceLocation,
    schema: &Schema,
    variable_values: &JsonMap,
) -> Result<JsonMap> {
    let mut coerced_values = JsonMap::new();
    let mut errors = vec![];

    for (arg_name, arg_def) in argument_defs {
        let provided = arguments.iter()
            .find(|(name, _)| name == arg_name)
            .map(|(_, value)| value);

        let variable_name = match provided {
            Some(ast::query::Value::Variable(var_name)) => Some(var_name.as_str()),
            _ => None,
        };
        let has_value = match (provided, variable_name) {
            (None, _) => false,
            (Some(_), Some(var_name)) => variable_values.contains_key(var_name),
            (Some(_), None) => true,
        };
        let is_null = match (provided, variable_name) {
            (Some(ast::query::Value::Null), _) => true,
            (_, Some(var_name)) =>
                variable_values.get(var_name).is_some_and(JsonValue::is_null),
            _ => false,
        };

        if !has_value && let Some(default_value) = arg_def.default_value() {
            coerced_values.insert(arg_name.to_string(), default_value.clone());
            continue;
        }

        let arg_type = arg_def.value_type();
        if (!has_value || is_null) && !arg_type.nullable() {
            let message =
                if is_null {
                    format!(
                        "Argument < {arg_name} > of non-null type < {arg_type} > must not be null.",
                    )
                } else if let Some(var_name) = variable_name {
                    format!(
                        "Argument < {arg_name} > of required type < {arg_type} > was provided \
                        the variable < ${var_name} > which was not provided a runtime value.",
                    )
                } else {
                    format!(
                        "Argument < {arg_name} > of required type < {arg_type} > was not \
                        provided.",
                    )
                };
            errors.push(GraphQLError::new(message).with_locations([location]));
            continue;
        }

        let Some(provided) = provided.filter(|_| has_value) else {
            continue;
        };

        if let Some(var_name) = variable_name {
            if let Some(var_value) = variable_values.get(var_name) {
                coerced_values.insert(arg_name.to_string(), var_value.clone());
            }
            continue;
        }

        if is_null {
            coerced_values.insert(arg_name.to_string(), JsonValue::Null);
            continue;
        }

        let result = arg_def.coercer()
            .coerce_literal(schema, provided, variable_values, Some(location), None)
            .await;
        match result.into_result() {
            Ok(coerced) => {
                coerced_values.insert(arg_name.to_string(), coerced);
            },
            Err(arg_errors) => errors.extend(arg_errors.into_iter().map(|err| {
                GraphQLError::new(format!(
                    "Argument < {arg_name} > has invalid value < {provided} >; {}",
                    err.message,
                )).with_locations(err.locations)
            })),
        }
    }

    if errors.is_empty() {
        Ok(coerced_values)
    } else {
        Err(errors)
    }
}

/// Coerces the raw variable values provided with a request against the
/// variable definitions of the operation.
///
/// Every definition is coerced concurrently and every failure is reported:
/// one invalid variable does not hide the problems of another.
///
/// See: https://spec.graphql.org/October2021/#CoerceVariableValues()
pub(crate) async fn coerce_variable_values(
    schema: &Schema,
    variable_definitions: &[ast::query::VariableDefinition],
    raw_values: &JsonMap,
) -> Result<JsonMap> {
    let outcomes = futures::future::join_all(
        variable_definitions.iter()
            .map(|var_def| coerce_variable_value(schema, var_def, raw_values)),
    ).await;

    let mut coerced_values = JsonMap::new();
    let mut errors = vec![];
    for outcome in outcomes {
        match outcome {
            Ok(Some((var_name, value))) => {
                coerced_values.insert(var_name, value);
            },
            Ok(None) => (),
            Err(var_errors) => errors.extend(var_errors),
        }
    }

    if errors.is_empty() {
        Ok(coerced_values)
    } else {
        log::debug!("Variable coercion failed with {} error(s)", errors.len());
        Err(errors)
    }
}

async fn coerce_variable_value(
    schema: &Schema,
    var_def: &ast::query::VariableDefinition,
    raw_values: &JsonMap,
) -> Result<Option<(String, JsonValue)>> {
    let var_name = var_def.name.as_str();
    let location = SourceLocation::from(var_def.position);
    let var_type = TypeAnnotation::from_ast_type(&var_def.var_type);
    let located_error = |message: String| {
        vec![GraphQLError::new(message).with_locations([location])]
    };

    let Some(named_type) = var_type.innermost_type(schema).filter(|t| t.is_input_type()) else {
        return Err(located_error(format!(
            "Variable < ${var_name} > expected value of type < {var_type} > which \
            cannot be used as an input type.",
        )));
    };

    let coercer = InputCoercer::new(
        &var_type,
        DirectiveChain::from_annotations(named_type.directives(), &schema.directive_defs),
    );

    let no_variables = JsonMap::new();
    let provided = raw_values.get(var_name);
    let (result, invalid_value) = match (provided, &var_def.default_value) {
        (None, Some(default_value)) => (
            coercer.coerce_literal(schema, default_value, &no_variables, Some(location), None)
                .await,
            default_value.to_string(),
        ),

        (None, None) | (Some(JsonValue::Null), _) if !var_type.nullable() => {
            return Err(located_error(
                if provided.is_some() {
                    format!(
                        "Variable < ${var_name} > of non-null type < {var_type} > must not \
                        be null.",
                    )
                } else {
                    format!(
                        "Variable < ${var_name} > of required type < {var_type} > was not \
                        provided.",
                    )
                },
            ));
        },

        (None, None) => return Ok(None),

        (Some(JsonValue::Null), _) => return Ok(Some((var_name.to_string(), JsonValue::Null))),

        (Some(provided), _) => (
            coercer.coerce(schema, provided, Some(location), None).await,
            provided.to_string(),
        ),
    };

    match result.into_result() {
        Ok(coerced) => Ok(Some((var_name.to_string(), coerced))),
        Err(errors) => Err(errors.into_iter()
            .map(|err| {
                GraphQLError::new(format!(
                    "Variable < ${var_name} > got invalid value < {invalid_value} >; {}",
                    err.message,
                )).with_locations([location])
            })
            .collect()),
    }
}
