mod builtin_directives;
mod chain;
#[allow(clippy::module_inception)]
mod directive;
mod directive_definition;

pub use builtin_directives::IncludeDirective;
pub use builtin_directives::SkipDirective;
pub use chain::AppliedDirective;
pub use chain::DirectiveChain;
pub use chain::NextCollection;
pub use chain::NextResolve;
pub use chain::NextValue;
pub use chain::SelectionNode;
pub use directive::Directive;
pub use directive::DirectiveError;
pub use directive_definition::DirectiveDefinition;
