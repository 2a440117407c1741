use crate::ast;
use crate::error::ResponsePath;
use crate::loc::SourceLocation;
use crate::types::FieldDefinition;
use crate::types::ObjectType;

/// One response key's worth of field selections, ready to be executed
/// against a parent value.
///
/// Selections sharing a response key (e.g. the same field selected directly
/// and through a fragment) are merged into a single [ExecutableField] whose
/// `nodes` lists every contributing AST field in document order, starting
/// with `first_node`: the one whose arguments and position are used.
#[derive(Clone, Debug)]
pub struct ExecutableField<'a> {
    pub(crate) definition: &'a FieldDefinition,
    pub(crate) field_name: &'a str,
    pub(crate) first_node: &'a ast::query::Field,
    pub(crate) nodes: Vec<&'a ast::query::Field>,
    pub(crate) parent_type: &'a ObjectType,
    pub(crate) path: ResponsePath,
    pub(crate) response_key: &'a str,
    pub(crate) type_condition: &'a str,
}
impl<'a> ExecutableField<'a> {
    pub(crate) fn arguments(&self) -> &'a [(String, ast::query::Value)] {
        self.first_node.arguments.as_slice()
    }

    /// `Parent.field`, as used in completion error messages.
    pub(crate) fn coordinate(&self) -> String {
        format!("{}.{}", self.parent_type.name(), self.field_name)
    }

    pub fn definition(&self) -> &'a FieldDefinition {
        self.definition
    }

    pub(crate) fn location(&self) -> SourceLocation {
        SourceLocation::from(self.first_node.position)
    }

    pub(crate) fn locations(&self) -> Vec<SourceLocation> {
        self.nodes.iter().map(|node| node.position.into()).collect()
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    pub fn response_key(&self) -> &'a str {
        self.response_key
    }

    pub(crate) fn selection_sets(&self) -> impl Iterator<Item = &'a ast::query::SelectionSet> + '_ {
        self.nodes.iter().copied().map(|node| &node.selection_set)
    }
}
