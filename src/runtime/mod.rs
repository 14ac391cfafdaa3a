/// All of the core data structures used by the interpreter.
pub mod data_structures;

/// Module for defining the core verbs and the native verbs provided by modules.
pub mod built_ins;

/// Module for defining the error reporting of the interpreter.
pub mod error;

/// Module for defining the execution engine, the stacks it manages and the traits verbs use to
/// reach them.
pub mod interpreter;
