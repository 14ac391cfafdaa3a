use crate::{
    lang::code::ModuleVerbId,
    runtime::{
        error::{self, ErrorKind, script_error},
        interpreter::InterpreterStack,
    },
};
use indexmap::IndexMap;
use std::rc::Rc;
use tracing::debug;

/// A native verb handler.  Any state the handler needs is captured by the closure.
pub type ModuleVerbHandler = dyn Fn(&mut dyn InterpreterStack) -> error::Result<()>;

/// A native verb registered by a module.  Once created it's fields are read-only.
#[derive(Clone)]
pub struct ModuleVerb {
    name: String,
    description: String,
    signature: String,
    handler: Rc<ModuleVerbHandler>,
}

impl ModuleVerb {
    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn description(&self) -> &String {
        &self.description
    }

    /// Stack signature of the verb, as in `x y z -- `.
    pub fn signature(&self) -> &String {
        &self.signature
    }

    pub fn handler(&self) -> Rc<ModuleVerbHandler> {
        self.handler.clone()
    }
}

/// A provider of native verbs.
pub trait Module {
    /// Name used when logging the registration.
    fn name(&self) -> &str;

    /// Add the module's verbs to the table, returning how many were added.
    fn register(&self, verbs: &mut ModuleTable) -> error::Result<usize>;
}

/// Every native verb known to an interpreter.  A verb's id is its registration order, which is
/// what the loader writes into the instruction stream.
#[derive(Clone, Default)]
pub struct ModuleTable {
    verbs: IndexMap<String, ModuleVerb>,
}

impl ModuleTable {
    pub fn new() -> ModuleTable {
        ModuleTable::default()
    }

    /// Add a native verb.  Names must be unique across all modules.
    pub fn add_verb(
        &mut self,
        name: String,
        handler: Rc<ModuleVerbHandler>,
        description: String,
        signature: String,
    ) -> error::Result<ModuleVerbId> {
        if self.verbs.contains_key(&name) {
            return script_error(ErrorKind::DuplicateModuleVerb(name));
        }

        debug!("Module verb {} registered as {}.", name, self.verbs.len());

        let (id, _) = self.verbs.insert_full(
            name.clone(),
            ModuleVerb {
                name,
                description,
                signature,
                handler,
            },
        );

        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<ModuleVerbId> {
        self.verbs.get_index_of(name)
    }

    pub fn get(&self, id: ModuleVerbId) -> Option<&ModuleVerb> {
        self.verbs.get_index(id).map(|(_, verb)| verb)
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleVerb> {
        self.verbs.values()
    }
}

/// Simplify registering a native verb with a module table.
///
/// Required parameters are, the table to register with.  The name of the verb.  The handler to
/// execute for the verb.  A simple description of the verb.  As well as the verb's stack
/// signature.  Evaluates to the registration's `Result`.
#[macro_export]
macro_rules! add_module_verb {
    (
        $table:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        $table.add_verb(
            $name.to_string(),
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
        )
    }};
}
