#![doc = include_str!("../README.md")]

pub mod codegen;
mod compiler;
pub mod reactive;

pub use codegen::{generate, CompiledOutput};
pub use compiler::*;
