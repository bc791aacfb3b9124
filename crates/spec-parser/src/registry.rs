//! Registry of spec-format parsers
//!
//! Handlers are tried in registration order, so register more specific
//! formats before more general ones.

use crate::error::{ParseError, ParseResult};
use crate::parser::OpenApiParser;
use crate::types::{ApiSpecification, ParseOptions, SpecDocument};
use tracing::debug;

/// A spec format the registry can dispatch to
pub trait SpecFormat: Send + Sync {
    /// Whether this handler understands the document
    fn can_parse(&self, document: &SpecDocument) -> bool;

    /// Human-readable format name, e.g. `OpenAPI`
    fn format_name(&self) -> &str;

    /// Compile the document into tools
    fn parse(&self, document: &SpecDocument, options: &ParseOptions)
        -> ParseResult<ApiSpecification>;
}

/// Ordered set of format handlers
pub struct ParserRegistry {
    parsers: Vec<Box<dyn SpecFormat>>,
}

impl ParserRegistry {
    /// A registry with no handlers
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// A registry with the built-in OpenAPI/Swagger handler registered first
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(OpenApiParser);
        registry
    }

    /// Append a handler; it is tried after every earlier registration
    pub fn register(&mut self, parser: impl SpecFormat + 'static) -> &mut Self {
        debug!("Registering spec format: {}", parser.format_name());
        self.parsers.push(Box::new(parser));
        self
    }

    /// First handler whose `can_parse` accepts the document
    pub fn find_parser(&self, document: &SpecDocument) -> Option<&dyn SpecFormat> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(document))
            .map(|p| p.as_ref())
    }

    /// Names of the registered formats, in matching order
    pub fn formats(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.format_name()).collect()
    }

    /// Dispatch to the first matching handler
    pub fn parse(
        &self,
        document: &SpecDocument,
        options: &ParseOptions,
    ) -> ParseResult<ApiSpecification> {
        let parser = self
            .find_parser(document)
            .ok_or(ParseError::UnrecognizedFormat)?;
        debug!("Parsing document as {}", parser.format_name());
        parser.parse(document, options)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
