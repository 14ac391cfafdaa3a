use crate::{
    add_module_verb,
    runtime::{
        built_ins::module_words::{Module, ModuleTable},
        error,
        interpreter::InterpreterStack,
    },
};
use tracing::info;

/// Set the position of the mesh.  There's no scene to move yet so the position is only logged.
///
/// Signature: `x y z -- `
fn verb_mesh_position(stack: &mut dyn InterpreterStack) -> error::Result<()> {
    stack.require(3)?;

    let z = stack.pop_as_float()?;
    let y = stack.pop_as_float()?;
    let x = stack.pop_as_float()?;

    info!("Mesh position: {} {} {}", x, y, z);

    Ok(())
}

/// Verbs for placing a mesh in a scene.
pub struct MeshModule;

impl Module for MeshModule {
    fn name(&self) -> &str {
        "mesh"
    }

    fn register(&self, verbs: &mut ModuleTable) -> error::Result<usize> {
        add_module_verb!(
            verbs,
            "mesh-pos",
            verb_mesh_position,
            "Set the position of the mesh.",
            "x y z -- "
        )?;

        Ok(1)
    }
}
