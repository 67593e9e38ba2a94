//! Core data model for the glot analysis pipeline.
//!
//! This crate defines the two value types every later stage consumes:
//! lexical tokens (produced by `glot_lexer`) and linear IR instructions
//! (produced by `glot_lower`, rewritten by `glot_opt`). It depends on no
//! other glot crate.
//!
//! # Pipeline position
//!
//! ```text
//! source ──► Vec<Token> ──► Vec<Instruction> ──► Vec<Instruction> (optimized)
//! ```
//!
//! Both types are plain values: created once by their producing stage and
//! read-only downstream. Program order for instructions is list order —
//! there is no explicit addressing.

mod instruction;
mod token;

pub use instruction::{is_temp_name, render_listing, Instruction, OpCode, Operand, Operands};
pub use token::{Token, TokenKind};
