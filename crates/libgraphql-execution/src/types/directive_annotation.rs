use crate::ast;
use crate::value;
use crate::value::JsonMap;

/// A directive applied to a schema element in SDL, e.g. the
/// `@lowercase` in `name: String @lowercase`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub(crate) arguments: JsonMap,
    pub(crate) name: String,
}
impl DirectiveAnnotation {
    pub fn arguments(&self) -> &JsonMap {
        &self.arguments
    }

    pub(crate) fn from_ast(ast_directive: &ast::schema::Directive) -> Self {
        Self {
            arguments: ast_directive.arguments.iter()
                .filter_map(|(arg_name, arg_value)| {
                    value::value_from_ast(arg_value, None)
                        .map(|value| (arg_name.to_string(), value))
                })
                .collect(),
            name: ast_directive.name.to_string(),
        }
    }

    pub(crate) fn from_ast_list(ast_directives: &[ast::schema::Directive]) -> Vec<Self> {
        ast_directives.iter().map(Self::from_ast).collect()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
