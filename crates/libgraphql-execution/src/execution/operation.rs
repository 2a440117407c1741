use crate::ast;
use crate::loc::SourceLocation;

/// The kind of an operation, which also names its root type in the schema.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    Mutation,
    Query,
    Subscription,
}
impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mutation => "mutation",
            Self::Query => "query",
            Self::Subscription => "subscription",
        }
    }
}
impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A uniform view over the four shapes of
/// [OperationDefinition](ast::query::OperationDefinition) (including the
/// `{ ... }` query shorthand).
#[derive(Clone, Copy, Debug)]
pub struct ExecutableOperation<'a> {
    pub(crate) directives: &'a [ast::query::Directive],
    pub(crate) kind: OperationKind,
    pub(crate) name: Option<&'a str>,
    pub(crate) position: SourceLocation,
    pub(crate) selection_set: &'a ast::query::SelectionSet,
    pub(crate) variable_definitions: &'a [ast::query::VariableDefinition],
}
impl<'a> ExecutableOperation<'a> {
    /// Only mutations are required to execute their root fields one at a
    /// time.
    pub fn allow_parallelization(&self) -> bool {
        self.kind != OperationKind::Mutation
    }

    pub fn directives(&self) -> &'a [ast::query::Directive] {
        self.directives
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    pub fn position(&self) -> SourceLocation {
        self.position
    }

    pub fn selection_set(&self) -> &'a ast::query::SelectionSet {
        self.selection_set
    }

    pub fn variable_definitions(&self) -> &'a [ast::query::VariableDefinition] {
        self.variable_definitions
    }
}
impl<'a> From<&'a ast::query::OperationDefinition> for ExecutableOperation<'a> {
    fn from(operation: &'a ast::query::OperationDefinition) -> Self {
        use ast::query::OperationDefinition;
        match operation {
            OperationDefinition::SelectionSet(selection_set) => Self {
                directives: &[],
                kind: OperationKind::Query,
                name: None,
                position: selection_set.span.0.into(),
                selection_set,
                variable_definitions: &[],
            },

            OperationDefinition::Query(query) => Self {
                directives: query.directives.as_slice(),
                kind: OperationKind::Query,
                name: query.name.as_deref(),
                position: query.position.into(),
                selection_set: &query.selection_set,
                variable_definitions: query.variable_definitions.as_slice(),
            },

            OperationDefinition::Mutation(mutation) => Self {
                directives: mutation.directives.as_slice(),
                kind: OperationKind::Mutation,
                name: mutation.name.as_deref(),
                position: mutation.position.into(),
                selection_set: &mutation.selection_set,
                variable_definitions: mutation.variable_definitions.as_slice(),
            },

            OperationDefinition::Subscription(subscription) => Self {
                directives: subscription.directives.as_slice(),
                kind: OperationKind::Subscription,
                name: subscription.name.as_deref(),
                position: subscription.position.into(),
                selection_set: &subscription.selection_set,
                variable_definitions: subscription.variable_definitions.as_slice(),
            },
        }
    }
}
