use std::cell::RefCell;
use std::rc::Rc;
use verbforth::add_module_verb;
use verbforth::runtime::built_ins::mesh_words::MeshModule;
use verbforth::runtime::built_ins::module_words::{Module, ModuleTable};
use verbforth::runtime::data_structures::bounded_stack::StackKind;
use verbforth::runtime::data_structures::value::Value;
use verbforth::runtime::error::{ErrorKind, Result};
use verbforth::runtime::interpreter::InterpreterStack;
use verbforth::runtime::interpreter::forth_interpreter::ForthInterpreter;

/// A module whose only verb pops an integer into a shared log.
struct Recorder {
    calls: Rc<RefCell<Vec<i32>>>,
}

impl Module for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn register(&self, verbs: &mut ModuleTable) -> Result<usize> {
        let calls = self.calls.clone();

        add_module_verb!(
            verbs,
            "record",
            move |stack: &mut dyn InterpreterStack| -> Result<()> {
                let value = stack.pop_as_int()?;
                calls.borrow_mut().push(value);
                Ok(())
            },
            "Record the top of the stack.",
            "value -- "
        )?;

        Ok(1)
    }
}

fn with_recorder() -> (ForthInterpreter, Rc<RefCell<Vec<i32>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut interp = ForthInterpreter::default();

    let count = interp
        .register_module(&Recorder { calls: calls.clone() })
        .unwrap();
    assert_eq!(count, 1);

    (interp, calls)
}

#[test]
fn module_verb_is_called_once() {
    let (mut interp, calls) = with_recorder();

    interp.process_source("<test>", "7 record").unwrap();

    assert_eq!(*calls.borrow(), vec![7]);
    assert!(interp.stack().is_empty());
}

#[test]
fn module_verb_inside_user_verb() {
    let (mut interp, calls) = with_recorder();

    interp
        .process_source("<test>", ": twice record record ; 1 2 twice")
        .unwrap();

    assert_eq!(*calls.borrow(), vec![2, 1]);
}

#[test]
fn user_verb_takes_priority_over_module_verb() {
    let (mut interp, calls) = with_recorder();

    interp.process_source("<test>", ": record 99 ; record").unwrap();

    assert_eq!(interp.stack(), &[Value::Integer(99)]);
    assert!(calls.borrow().is_empty());
}

#[test]
fn module_verb_errors_carry_position() {
    let (mut interp, _) = with_recorder();

    let error = interp.process_source("<test>", "record").unwrap_err();

    assert_eq!(*error.kind(), ErrorKind::StackUnderflow(StackKind::Data));
    assert!(error.address().is_some());
    assert_eq!(error.location().as_ref().map(|l| l.column()), Some(1));
}

#[test]
fn duplicate_module_verb_is_rejected() {
    let mut interp = ForthInterpreter::default();

    interp.register_module(&MeshModule).unwrap();
    let error = interp.register_module(&MeshModule).unwrap_err();

    assert_eq!(*error.kind(), ErrorKind::DuplicateModuleVerb("mesh-pos".into()));

    let names: Vec<&str> = interp.modules().iter().map(|verb| verb.name().as_str()).collect();
    assert_eq!(names, vec!["mesh-pos"]);
}

#[test]
fn module_verbs_are_resolved_at_load_time() {
    let mut interp = ForthInterpreter::default();

    assert_eq!(
        *interp.load("<test>", "1.0 2.0 3.0 mesh-pos").unwrap_err().kind(),
        ErrorKind::UnresolvedVerb("mesh-pos".into())
    );
}

#[test]
fn mesh_position_consumes_three_floats() {
    let mut interp = ForthInterpreter::default();

    interp.register_module(&MeshModule).unwrap();
    interp
        .process_source("<test>", "9 1.0 2.0 3.0 mesh-pos")
        .unwrap();

    assert_eq!(interp.stack(), &[Value::Integer(9)]);

    let verb = interp.modules().get(0).unwrap();
    assert_eq!(verb.name(), "mesh-pos");
    assert_eq!(verb.description(), "Set the position of the mesh.");
    assert_eq!(verb.signature(), "x y z -- ");
}

#[test]
fn mesh_position_underflows() {
    let mut interp = ForthInterpreter::default();

    interp.register_module(&MeshModule).unwrap();

    assert_eq!(
        *interp
            .process_source("<test>", "1.0 2.0 mesh-pos")
            .unwrap_err()
            .kind(),
        ErrorKind::StackUnderflow(StackKind::Data)
    );
}
