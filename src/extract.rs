//! The extraction pipeline: parse, collect, resolve, render.
//!
//! ```no_run
//! use undocx::{DirectoryUploader, Extractor, FnConverter, ObjectPayload};
//!
//! fn main() -> undocx::Result<()> {
//!     let extractor = Extractor::new()
//!         .with_converter(FnConverter(|_: &ObjectPayload<'_>| -> undocx::Result<String> {
//!             Ok("$$x$$".to_string())
//!         }))
//!         .with_uploader(DirectoryUploader::new("out/images")?.with_url_prefix("/images/"));
//!
//!     let doc = extractor.extract_file("report.docx")?;
//!     for table in &doc.tables {
//!         println!("{}", table.plain_text());
//!     }
//!     Ok(())
//! }
//! ```

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::collect::collect_references;
use crate::error::Result;
use crate::model::Document;
use crate::parser::{DocxParser, ParseOptions};
use crate::render::{render_tables, ExtractedDocument, RenderOptions};
use crate::resolve::{
    resolve_all, EquationConverter, ImageUploader, ResolutionPolicy, ResolveOptions, Resolvers,
    UploadKeyStrategy,
};

/// Options for a whole extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Package parsing options
    pub parse: ParseOptions,

    /// Resolution phase options
    pub resolve: ResolveOptions,

    /// Cell rendering options
    pub render: RenderOptions,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the failure policy.
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.resolve.policy = policy;
        self
    }

    /// Set the upload key strategy.
    pub fn with_key_strategy(mut self, strategy: UploadKeyStrategy) -> Self {
        self.resolve.key_strategy = strategy;
        self
    }

    /// Set the placeholder for unresolved objects.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.render.placeholder = placeholder.into();
        self
    }

    /// Disable the rayon pool for both resolution and rendering.
    pub fn sequential(mut self) -> Self {
        self.resolve.sequential = true;
        self.render.parallel = false;
        self
    }
}

/// Extracts tables from DOCX packages with resolved equations and images.
///
/// Collaborators are optional. Without a converter, equations render as
/// the placeholder; without an uploader, images do.
#[derive(Clone, Default)]
pub struct Extractor {
    converter: Option<Arc<dyn EquationConverter>>,
    uploader: Option<Arc<dyn ImageUploader>>,
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor without collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the equation converter.
    pub fn with_converter<C: EquationConverter + 'static>(mut self, converter: C) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Set a shared equation converter.
    pub fn with_shared_converter(mut self, converter: Arc<dyn EquationConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Set the image uploader.
    pub fn with_uploader<U: ImageUploader + 'static>(mut self, uploader: U) -> Self {
        self.uploader = Some(Arc::new(uploader));
        self
    }

    /// Set a shared image uploader.
    pub fn with_shared_uploader(mut self, uploader: Arc<dyn ImageUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Replace all options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Fail the extraction when any object cannot be resolved.
    pub fn fail_fast(mut self) -> Self {
        self.options.resolve.policy = ResolutionPolicy::FailFast;
        self
    }

    /// Run without the rayon pool.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Current options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract a DOCX file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<ExtractedDocument> {
        let parser = DocxParser::open_with_options(path, self.options.parse.clone())?;
        self.extract_document(&parser.parse()?)
    }

    /// Extract a DOCX package held in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<ExtractedDocument> {
        let parser = DocxParser::from_bytes_with_options(data, self.options.parse.clone())?;
        self.extract_document(&parser.parse()?)
    }

    /// Extract a DOCX package from a reader.
    pub fn extract_reader<R: Read>(&self, reader: R) -> Result<ExtractedDocument> {
        let parser = DocxParser::from_reader_with_options(reader, self.options.parse.clone())?;
        self.extract_document(&parser.parse()?)
    }

    /// Resolve and render an already parsed document.
    ///
    /// Every referenced equation and image is resolved (or recorded as
    /// failed) before the first cell is rendered.
    pub fn extract_document(&self, doc: &Document) -> Result<ExtractedDocument> {
        let refs = collect_references(doc);

        let resolvers = Resolvers {
            converter: self.converter.as_deref(),
            uploader: self.uploader.as_deref(),
        };
        let resolutions = resolve_all(doc, &refs, resolvers, &self.options.resolve)?;

        let tables = render_tables(
            &doc.tables,
            &resolutions.equations,
            &resolutions.images,
            &self.options.render,
        );
        log::debug!("Rendered {} tables", tables.len());

        Ok(ExtractedDocument {
            metadata: doc.metadata.clone(),
            tables,
            equations: resolutions.equations,
            images: resolutions.images,
            report: resolutions.report,
        })
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("converter", &self.converter.is_some())
            .field("uploader", &self.uploader.is_some())
            .field("options", &self.options)
            .finish()
    }
}
