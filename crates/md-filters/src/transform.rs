/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * AST transformation pipeline infrastructure.
 */

//! AST transformation pipeline infrastructure.
//!
//! - [`AstTransform`] - The trait implemented by every filter
//! - [`TransformPipeline`] - Ordered collection of transforms to execute
//!
//! Each transform is a full pass over the document; transforms run in
//! insertion order, so a later filter sees the output of an earlier one.

use crate::errors::{FilterError, Result};
use crate::filter_context::FilterContext;
use crate::transforms;
use md_pandoc_types::Pandoc;

/// Trait for AST transformations.
pub trait AstTransform: Send + Sync {
    /// Filter name, as used in configuration and logging.
    fn name(&self) -> &str;

    /// Apply the transformation to the AST.
    ///
    /// Problems with individual nodes are recorded as diagnostics on `ctx`;
    /// the pipeline turns recorded errors into a failure once the pass is
    /// complete.
    fn transform(&self, ast: &mut Pandoc, ctx: &mut FilterContext) -> Result<()>;
}

/// A pipeline of AST transforms to execute in order.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn AstTransform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Build a pipeline from filter names.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownFilter`] for a name that is not one of
    /// [`transforms::AVAILABLE_FILTERS`].
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut pipeline = Self::new();
        for name in names {
            let name = name.as_ref();
            let transform =
                transforms::transform_by_name(name).ok_or_else(|| FilterError::UnknownFilter {
                    name: name.to_string(),
                    available: transforms::AVAILABLE_FILTERS.join(", "),
                })?;
            pipeline.push(transform);
        }
        Ok(pipeline)
    }

    /// Transforms run in the order they are added.
    pub fn push(&mut self, transform: Box<dyn AstTransform>) {
        self.transforms.push(transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Execute all transforms in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered, either returned by a transform
    /// or recorded on the context during its pass. Execution stops on error.
    pub fn execute(&self, ast: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "Running transform");
            transform.transform(ast, ctx)?;

            let errors = ctx.diagnostics.take_errors();
            if !errors.is_empty() {
                let messages: Vec<String> = errors.into_iter().map(|d| d.message).collect();
                return Err(FilterError::Transform {
                    transform: transform.name().to_string(),
                    message: messages.join("; "),
                });
            }
        }

        Ok(())
    }

    /// List the names of all transforms in execution order.
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    /// A test transform that records when it ran.
    struct RecordingTransform {
        name: &'static str,
        order_tracker: Arc<Mutex<Vec<&'static str>>>,
    }

    impl AstTransform for RecordingTransform {
        fn name(&self) -> &str {
            self.name
        }

        fn transform(&self, _ast: &mut Pandoc, _ctx: &mut FilterContext) -> Result<()> {
            self.order_tracker.lock().unwrap().push(self.name);
            Ok(())
        }
    }

    /// A transform that records an error diagnostic.
    struct DiagnosingTransform;

    impl AstTransform for DiagnosingTransform {
        fn name(&self) -> &str {
            "diagnosing"
        }

        fn transform(&self, _ast: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
            ctx.warn("just a warning");
            ctx.error("first problem");
            ctx.error("second problem");
            Ok(())
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = TransformPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.len(), 0);
    }

    #[test]
    fn test_execution_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = TransformPipeline::new();
        for name in ["first", "second", "third"] {
            pipeline.push(Box::new(RecordingTransform {
                name,
                order_tracker: order.clone(),
            }));
        }

        let mut ast = Pandoc::default();
        let mut ctx = FilterContext::new("html");
        pipeline.execute(&mut ast, &mut ctx).unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
        assert_eq!(pipeline.transform_names(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_recorded_errors_stop_the_pipeline() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = TransformPipeline::new();
        pipeline.push(Box::new(DiagnosingTransform));
        pipeline.push(Box::new(RecordingTransform {
            name: "after",
            order_tracker: order.clone(),
        }));

        let mut ast = Pandoc::default();
        let mut ctx = FilterContext::new("html");
        let err = pipeline.execute(&mut ast, &mut ctx).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Transform error in 'diagnosing': first problem; second problem"
        );
        assert!(order.lock().unwrap().is_empty());
        // Warnings survive for reporting.
        assert_eq!(ctx.diagnostics().len(), 1);
    }

    #[test]
    fn test_from_names() {
        let pipeline = TransformPipeline::from_names(&["h1hr", "bq", "mermaid", "op"]).unwrap();
        assert_eq!(pipeline.transform_names(), vec!["h1hr", "bq", "mermaid", "op"]);
    }

    #[test]
    fn test_from_names_unknown() {
        match TransformPipeline::from_names(&["h1hr", "plantuml"]) {
            Err(FilterError::UnknownFilter { name, available }) => {
                assert_eq!(name, "plantuml");
                assert_eq!(available, "h1hr, bq, graphviz, mermaid, op");
            }
            Err(other) => panic!("Expected UnknownFilter, got {:?}", other),
            Ok(_) => panic!("Expected an error"),
        }
    }
}
