//! # spec-parser
//!
//! Compiles Swagger 2.0 and OpenAPI 3.x documents into callable tool
//! definitions: one tool per HTTP operation, with `$ref`s resolved in every
//! parameter, request-body and response schema.
//!
//! The crate does no I/O. Callers hand in a decoded document (or text via
//! [`document::decode`]) and get an [`ApiSpecification`] back.

mod base_url;
pub mod document;
mod error;
mod extract;
mod filter;
pub mod naming;
mod operations;
mod parser;
mod registry;
mod resolver;
mod types;
mod version;

pub use base_url::extract_base_url;
pub use error::{ParseError, ParseResult, SkipReason};
pub use extract::{ParameterExtractor, RequestBodyExtractor, ResponseExtractor};
pub use filter::filter_by_resources;
pub use operations::{MappedOperations, OperationMapper};
pub use parser::OpenApiParser;
pub use registry::{ParserRegistry, SpecFormat};
pub use resolver::ResolutionContext;
pub use types::*;
pub use version::SpecVersion;
