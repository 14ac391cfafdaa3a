//! A small stack language with user-defined verbs.
//!
//! Source text is split into whitespace separated tokens, loaded in a single pass into two
//! instruction streams, one for top-level code and one for verb bodies, and run by an engine with
//! explicit data, return, loop and aux stacks.  Native verbs are added by registering a `Module`.

/// Tunable limits of an interpreter context.
pub mod config;

/// Module for the managing source code and the generation of byte code.
#[macro_use]
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;
