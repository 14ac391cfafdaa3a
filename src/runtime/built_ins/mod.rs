/// The core verbs of the language.
pub mod base_words;

/// Registration of native verbs supplied by modules.
pub mod module_words;

/// The mesh module.
pub mod mesh_words;
