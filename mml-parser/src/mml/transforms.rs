//! Transform pipeline infrastructure
//!
//! Parsing is a composition of typed stages. Any stage can be chained with
//! another if their types line up, so tests and tools can stop the pipeline at
//! any point (tokens, IR, document).
//!
//! ## 1. The `Runnable` Trait
//!
//! The interface for all stages. Any type implementing `Runnable<I, O>` turns
//! an `I` into an `O`:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> MmlResult<O>;
//! }
//! ```
//!
//! ## 2. The `Transform<I, O>` Type
//!
//! A boxed composition of stages with `.then()` for type-safe chaining:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Tokenization)      // String -> TokenStream
//!     .then(StructuralPass)    // TokenStream -> Vec<ParseNode>
//!     .then(Autofix::new());   // Vec<ParseNode> -> Document
//! ```
//!
//! ## 3. Static Lazy Transforms
//!
//! The common pipelines are pre-built as `once_cell::sync::Lazy` statics in
//! [`standard`]: `TOKENIZATION`, `TO_IR` and `STRING_TO_DOCUMENT`.
//!
//! # Module Organization
//!
//! - [`stages`]: Individual stages (tokenization, structural pass)
//! - [`standard`]: Pre-built pipelines

pub mod stages;
pub mod standard;

use crate::mml::error::MmlResult;

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> MmlResult<O>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> MmlResult<O> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> MmlResult<O> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a pre-built static pipeline after this transform
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    pub fn run(&self, input: I) -> MmlResult<O> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> MmlResult<O> {
        Transform::run(self, input)
    }
}
