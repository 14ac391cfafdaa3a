/// The tagged Value held by the data and aux stacks.
pub mod value;

/// Capacity-checked stacks used for the data, return, loop, and aux stacks.
pub mod bounded_stack;

/// The core verb table and the table of user-defined verbs.
pub mod dictionary;
