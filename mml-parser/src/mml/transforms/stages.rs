//! Individual transformation stages
//!
//! Each stage implements [`Runnable`]. The assembling stage,
//! [`Autofix`](crate::mml::assembling::Autofix), lives with the assembling module.

use crate::mml::error::MmlResult;
use crate::mml::lexing::tokenize;
use crate::mml::parsing::{build_ir, ParseNode};
use crate::mml::token::TokenStream;
use crate::mml::transforms::Runnable;

/// Source text to marker stream
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenization;

impl Runnable<String, TokenStream> for Tokenization {
    fn run(&self, source: String) -> MmlResult<TokenStream> {
        Ok(tokenize(&source))
    }
}

/// Marker stream to raw nesting
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralPass;

impl Runnable<TokenStream, Vec<ParseNode>> for StructuralPass {
    fn run(&self, stream: TokenStream) -> MmlResult<Vec<ParseNode>> {
        Ok(build_ir(&stream))
    }
}
