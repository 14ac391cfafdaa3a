/// Module for managing the source code being loaded.
pub mod source_buffer;

/// Module for managing the turning of the source code into a list of tokens for further processing.
pub mod tokenizing;

/// Module for defining the instructions and instruction streams of the virtual machine.
pub mod code;

/// Module for loading that list of tokens into the instruction streams.  Verb definitions are
/// tracked by a small state machine so that bodies land in their own stream.
pub mod compilation;
