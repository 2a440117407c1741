use crate::loc;
use thiserror::Error;

/// A problem with how a type definition refers to other types.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeValidationError {
    #[error(
        "`{type_name}` declares that it implements `{interface_name}`, which \
        is not an interface type"
    )]
    ImplementsNonInterfaceType {
        def_location: loc::SchemaDefLocation,
        interface_name: String,
        type_name: String,
    },

    #[error(
        "`{coordinate}` is an input position but refers to `{type_name}`, \
        which is not an input type"
    )]
    InvalidInputPositionType {
        coordinate: String,
        def_location: loc::SchemaDefLocation,
        type_name: String,
    },

    #[error(
        "`{coordinate}` is an output position but refers to `{type_name}`, \
        which is an input object type"
    )]
    InvalidOutputPositionType {
        coordinate: String,
        def_location: loc::SchemaDefLocation,
        type_name: String,
    },

    #[error("The union `{union_name}` includes `{member_name}`, which is not an object type")]
    InvalidUnionMember {
        def_location: loc::SchemaDefLocation,
        member_name: String,
        union_name: String,
    },

    #[error("`{coordinate}` refers to the undefined type `{type_name}`")]
    UndefinedTypeName {
        coordinate: String,
        def_location: loc::SchemaDefLocation,
        type_name: String,
    },
}
