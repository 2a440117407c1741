mod builtin_scalars;
mod directive_annotation;
mod enum_type;
mod graphql_type;
mod input_object_type;
mod input_value;
mod interface_type;
mod object_or_interface_type;
mod object_type;
mod scalar_type;
mod type_annotation;
mod union_type;

pub(crate) use builtin_scalars::builtin_scalars;
pub use builtin_scalars::BooleanScalar;
pub use builtin_scalars::FloatScalar;
pub use builtin_scalars::IdScalar;
pub use builtin_scalars::IntScalar;
pub use builtin_scalars::StringScalar;
pub use directive_annotation::DirectiveAnnotation;
pub use enum_type::EnumType;
pub use enum_type::EnumValue;
pub use graphql_type::GraphQLType;
pub use input_object_type::InputObjectType;
pub use input_value::InputValueDefinition;
pub use interface_type::InterfaceType;
pub use object_or_interface_type::ObjectOrInterfaceType;
pub use object_type::FieldDefinition;
pub use object_type::ObjectType;
pub use scalar_type::ScalarCoercionError;
pub use scalar_type::ScalarImplementation;
pub use scalar_type::ScalarType;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::TypeAnnotation;
pub use union_type::UnionType;
