pub mod ast;
pub mod coercion;
pub mod directives;
mod engine;
mod error;
pub mod execution;
mod file_reader;
pub mod loc;
mod query_cache;
pub mod resolver;
mod response;
pub mod schema;
pub mod types;
pub mod value;

pub use engine::Engine;
pub use engine::Request;
pub use error::default_error_coercer;
pub use error::ErrorCoercer;
pub use error::GraphQLError;
pub use error::PathSegment;
pub use error::ResponsePath;
pub use file_reader::read_content;
pub use file_reader::ReadContentError;
pub use response::Response;
pub use value::JsonMap;
pub use value::JsonValue;
