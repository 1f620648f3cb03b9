//! Main module for mml library functionality

pub mod assembling;
pub mod ast;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod query;
pub mod testing;
pub mod token;
pub mod transforms;
