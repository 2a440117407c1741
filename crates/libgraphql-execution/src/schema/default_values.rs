use crate::ast;
use crate::directives::DirectiveDefinition;
use crate::schema::SchemaBuildError;
use crate::types::GraphQLType;
use crate::types::InputValueDefinition;
use crate::types::TypeAnnotation;
use crate::value;
use crate::value::JsonMap;
use crate::value::JsonValue;
use indexmap::IndexMap;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, String>;

/// Replaces the SDL default literal of every argument, input field and
/// directive argument with its value coerced against the declared type.
pub(super) fn coerce_default_values(
    types: &mut IndexMap<String, GraphQLType>,
    directive_defs: &mut IndexMap<String, DirectiveDefinition>,
) -> std::result::Result<(), SchemaBuildError> {
    let type_snapshot = types.clone();
    let mut coercer = DefaultValueCoercer::new(&type_snapshot);
    for (coordinate, input_value) in input_values_mut(types, directive_defs) {
        let Some(literal) = &input_value.default_literal else {
            continue;
        };
        let coerced = coercer.convert(literal, &input_value.value_type)
            .map_err(|message| SchemaBuildError::InvalidDefaultValue {
                coordinate: coordinate.to_string(),
                def_location: input_value.def_location.clone(),
                message,
            })?;
        input_value.default_value = Some(coerced);
    }
    Ok(())
}

/// Every input value definition of the schema along with its coordinate
/// (`Type.field`, `Type.field(arg:)` or `@directive(arg:)`).
fn input_values_mut<'a>(
    types: &'a mut IndexMap<String, GraphQLType>,
    directive_defs: &'a mut IndexMap<String, DirectiveDefinition>,
) -> Vec<(String, &'a mut InputValueDefinition)> {
    let mut input_values = vec![];
    for graphql_type in types.values_mut() {
        let (type_name, fields) = match graphql_type {
            GraphQLType::InputObject(input_type) => {
                let type_name = input_type.name.as_str();
                input_values.extend(input_type.fields.iter_mut().map(|(field_name, field_def)| {
                    (format!("{type_name}.{field_name}"), field_def)
                }));
                continue;
            },
            GraphQLType::Interface(iface_type) => (iface_type.name.as_str(), &mut iface_type.fields),
            GraphQLType::Object(obj_type) => (obj_type.name.as_str(), &mut obj_type.fields),
            GraphQLType::Enum(_) | GraphQLType::Scalar(_) | GraphQLType::Union(_) => continue,
        };
        for (field_name, field_def) in fields.iter_mut() {
            input_values.extend(field_def.arguments.iter_mut().map(|(arg_name, arg_def)| {
                (format!("{type_name}.{field_name}({arg_name}:)"), arg_def)
            }));
        }
    }
    for directive_def in directive_defs.values_mut() {
        let directive_name = directive_def.name.as_str();
        input_values.extend(directive_def.arguments.iter_mut().map(|(arg_name, arg_def)| {
            (format!("@{directive_name}({arg_name}:)"), arg_def)
        }));
    }
    input_values
}

/// Converts SDL default literals into values, type-directed and without
/// running any directives.
///
/// An input field left out of an input object literal takes that field's
/// own default, converted on demand. A default that (transitively) needs
/// itself is an error.
struct DefaultValueCoercer<'a> {
    converted_fields: HashMap<String, Option<JsonValue>>,
    in_progress: Vec<String>,
    types: &'a IndexMap<String, GraphQLType>,
}
impl<'a> DefaultValueCoercer<'a> {
    fn new(types: &'a IndexMap<String, GraphQLType>) -> Self {
        Self {
            converted_fields: HashMap::new(),
            in_progress: vec![],
            types,
        }
    }

    fn convert(
        &mut self,
        literal: &ast::query::Value,
        value_type: &TypeAnnotation,
    ) -> Result<JsonValue> {
        match (literal, value_type) {
            (ast::query::Value::Variable(var_name), _) =>
                Err(format!("Variable < ${var_name} > cannot be used in a default value")),

            (ast::query::Value::Null, _) if value_type.nullable() => Ok(JsonValue::Null),

            (ast::query::Value::Null, _) =>
                Err(format!("Expected non-nullable type < {value_type} > not to be null")),

            (ast::query::Value::List(items), TypeAnnotation::List(list_annot)) => items.iter()
                .map(|item| self.convert(item, list_annot.inner_type()))
                .collect::<Result<Vec<_>>>()
                .map(JsonValue::Array),

            // A single value is coerced as a list of one item.
            (single_value, TypeAnnotation::List(list_annot)) => Ok(JsonValue::Array(vec![
                self.convert(single_value, list_annot.inner_type())?,
            ])),

            (_, TypeAnnotation::Named(named_annot)) =>
                self.convert_named(literal, named_annot.type_name()),
        }
    }

    fn convert_named(&mut self, literal: &ast::query::Value, type_name: &str) -> Result<JsonValue> {
        let types = self.types;
        match types.get(type_name) {
            Some(GraphQLType::Enum(enum_type)) => match literal {
                ast::query::Value::Enum(name) => enum_type.value(name)
                    .map(|enum_value| enum_value.value.clone())
                    .ok_or_else(|| format!("Expected type < {type_name} >")),
                _ => Err(format!("Expected type < {type_name} >")),
            },

            Some(GraphQLType::InputObject(input_type)) => {
                let ast::query::Value::Object(provided_fields) = literal else {
                    return Err(format!("Expected type < {type_name} > to be an object"));
                };
                if let Some(undeclared) = provided_fields.keys()
                    .find(|name| input_type.field(name).is_none()) {
                    return Err(format!(
                        "Field < {undeclared} > is not defined by type < {type_name} >",
                    ));
                }

                let mut converted = JsonMap::new();
                for (field_name, field_def) in input_type.fields() {
                    let field_value = match provided_fields.get(field_name) {
                        Some(field_literal) =>
                            Some(self.convert(field_literal, &field_def.value_type)?),
                        None => self.field_default(type_name, field_def)?,
                    };
                    match field_value {
                        Some(field_value) => {
                            converted.insert(field_name.to_string(), field_value);
                        },
                        None if !field_def.value_type.nullable() => return Err(format!(
                            "Field < {field_name} > of required type < {} > was not provided",
                            field_def.value_type,
                        )),
                        None => (),
                    }
                }
                Ok(JsonValue::Object(converted))
            },

            Some(GraphQLType::Scalar(scalar_type)) => match scalar_type.implementation() {
                Some(implementation) => implementation.coerce_literal(literal, None)
                    .map_err(|err| match err.sub_message() {
                        Some(sub_message) => format!("Expected type < {type_name} >; {sub_message}"),
                        None => format!("Expected type < {type_name} >"),
                    }),
                // Scalars without an implementation keep the raw literal.
                None => Ok(value::value_from_ast(literal, None).unwrap_or(JsonValue::Null)),
            },

            _ => Err(format!("Expected type < {type_name} > to be an input type")),
        }
    }

    /// The converted default of an input object field, `None` when it has
    /// none.
    fn field_default(
        &mut self,
        type_name: &str,
        field_def: &InputValueDefinition,
    ) -> Result<Option<JsonValue>> {
        let Some(literal) = &field_def.default_literal else {
            return Ok(None);
        };
        let coordinate = format!("{type_name}.{}", field_def.name);
        if let Some(converted) = self.converted_fields.get(&coordinate) {
            return Ok(converted.clone());
        }
        if self.in_progress.contains(&coordinate) {
            return Err(format!("Default value of < {coordinate} > depends on itself"));
        }

        self.in_progress.push(coordinate.to_string());
        let converted = self.convert(literal, &field_def.value_type);
        self.in_progress.pop();

        let converted = Some(converted?);
        self.converted_fields.insert(coordinate, converted.clone());
        Ok(converted)
    }
}
