use test_case::test_case;
use verbforth::lang::code::{Op, Program, TypeTag};
use verbforth::lang::compilation::{DefinitionState, Loader};
use verbforth::lang::source_buffer::SourceLocation;
use verbforth::runtime::built_ins::module_words::ModuleTable;
use verbforth::runtime::data_structures::dictionary::CoreVerb;
use verbforth::runtime::data_structures::value::Value;
use verbforth::runtime::error::ErrorKind;
use verbforth::runtime::interpreter::InterpreterStack;
use verbforth::runtime::interpreter::forth_interpreter::ForthInterpreter;

fn load_error(source: &str) -> ErrorKind {
    let mut interp = ForthInterpreter::default();

    interp.load("<test>", source).unwrap_err().kind().clone()
}

fn ops(program: &Program) -> (Vec<Op>, Vec<Op>) {
    (
        program.main().iter().map(|i| i.op).collect(),
        program.verbs().iter().map(|i| i.op).collect(),
    )
}

#[test_case(";", ErrorKind::UnmatchedEnd; "end outside definition")]
#[test_case(": a : b ;", ErrorKind::NestedDefinition; "nested definition")]
#[test_case(": : b ;", ErrorKind::NestedDefinition; "start as name")]
#[test_case(": ;", ErrorKind::EmptyName; "empty name")]
#[test_case(":", ErrorKind::EmptyName; "name missing at end")]
#[test_case("foo", ErrorKind::UnresolvedVerb("foo".into()); "unknown verb")]
#[test_case(": foo 1 2", ErrorKind::UnterminatedDefinition("foo".into()); "unterminated definition")]
#[test_case("12abc", ErrorKind::MalformedNumber("12abc".into()); "malformed integer")]
#[test_case("1.2.3", ErrorKind::MalformedNumber("1.2.3".into()); "malformed float")]
#[test_case("then", ErrorKind::UnmatchedConditional("then".into()); "then without if")]
#[test_case("1 else", ErrorKind::UnmatchedConditional("else".into()); "else without if")]
#[test_case("1 if 2 else 3 else 4 then", ErrorKind::UnmatchedConditional("else".into()); "double else")]
#[test_case("1 if 2", ErrorKind::UnbalancedConditional; "if open at end")]
#[test_case(": f 1 if ;", ErrorKind::UnbalancedConditional; "if open at end of body")]
#[test_case("1 if : f ;", ErrorKind::UnbalancedConditional; "definition inside if")]
fn load_errors(source: &str, expected: ErrorKind) {
    assert_eq!(load_error(source), expected);
}

#[test]
fn unmatched_end_emits_nothing() {
    let mut interp = ForthInterpreter::default();
    let error = interp.load("<test>", ";").unwrap_err();

    assert!(interp.program().main().is_empty());

    let location = error.location().as_ref().unwrap();
    assert_eq!(location.line(), 1);
    assert_eq!(location.column(), 1);
}

#[test]
fn error_location_points_at_token() {
    let error = {
        let mut interp = ForthInterpreter::default();
        interp.load("script.f", "1 2 +\n  nope").unwrap_err()
    };

    assert_eq!(
        error.location().as_ref(),
        Some(&SourceLocation::new_from_info("script.f", 2, 3, 8))
    );
}

#[test]
fn failed_load_leaves_the_program_unchanged() {
    let mut interp = ForthInterpreter::default();

    interp.process_source("<test>", ": sq dup * ; 100").unwrap();
    let before = ops(interp.program());

    assert!(interp.load("<test>", "1 2 ; 3").is_err());
    assert_eq!(ops(interp.program()), before);

    interp.execute().unwrap();
    assert_eq!(interp.stack(), &[Value::Integer(100)]);
}

#[test_case("7 0 if 1", ErrorKind::UnbalancedConditional; "if open at end")]
#[test_case("0 if foo", ErrorKind::UnresolvedVerb("foo".into()); "fault inside if")]
#[test_case("1 if 2 else 3", ErrorKind::UnbalancedConditional; "else open at end")]
fn open_branch_of_a_failed_load_never_runs(source: &str, expected: ErrorKind) {
    let mut interp = ForthInterpreter::default();

    interp.process_source("<test>", "100").unwrap();

    assert_eq!(*interp.load("<test>", source).unwrap_err().kind(), expected);
    interp.execute().unwrap();

    assert_eq!(interp.stack(), &[Value::Integer(100)]);
    assert_eq!(interp.program().main().len(), 1);
}

#[test]
fn verbs_from_a_failed_load_are_dropped() {
    let mut interp = ForthInterpreter::default();

    interp.process_source("<test>", ": v 1 ;").unwrap();
    assert!(interp.load("<test>", ": v 2 ; : w 3 ; foo").is_err());

    assert_eq!(interp.verbs().len(), 1);
    assert_eq!(interp.verbs().lookup("w"), None);
    assert_eq!(interp.program().verbs().len(), 1);

    interp.process_source("<test>", "v").unwrap();
    assert_eq!(interp.stack(), &[Value::Integer(1)]);
}

#[test]
fn definition_routes_body_to_verb_stream() {
    let mut interp = ForthInterpreter::default();

    interp.load("<test>", ": sq dup * ; 3 sq").unwrap();

    let (main, verbs) = ops(interp.program());
    assert_eq!(
        main,
        vec![
            Op::DefinitionEntry(0),
            Op::DefinitionBody(0),
            Op::PushInteger(3),
            Op::UserVerb(0),
        ]
    );
    assert_eq!(verbs, vec![Op::CoreVerb(CoreVerb::Dup), Op::CoreVerb(CoreVerb::IMul)]);

    let entry = interp.verbs().get(0).unwrap();
    assert_eq!(entry.name, "sq");
    assert_eq!((entry.body_start, entry.body_end), (0, 2));
}

#[test]
fn conditionals_patch_absolute_targets() {
    let mut interp = ForthInterpreter::default();

    interp.load("<test>", "1 if 10 else 20 then 30").unwrap();

    let (main, _) = ops(interp.program());
    assert_eq!(
        main,
        vec![
            Op::PushInteger(1),
            Op::JumpIfZero(4),
            Op::PushInteger(10),
            Op::Jump(5),
            Op::PushInteger(20),
            Op::PushInteger(30),
        ]
    );
}

#[test]
fn loading_is_deterministic() {
    let source = ": sq dup * ; : f 0 if 1 else 2 then ; 5 0 do I sq f loop 2.5 1.5 .+";

    let mut first = ForthInterpreter::default();
    let mut second = ForthInterpreter::default();

    first.load("<test>", source).unwrap();
    second.load("<test>", source).unwrap();

    assert_eq!(first.program().encoded(), second.program().encoded());
    assert_eq!(
        first.verbs().iter().collect::<Vec<_>>(),
        second.verbs().iter().collect::<Vec<_>>()
    );
    assert_eq!(first.verbs().len(), 2);
}

#[test]
fn redefinition_only_affects_later_code() {
    let mut interp = ForthInterpreter::default();

    interp
        .process_source("<test>", ": v 1 ; : w v ; : v 2 ; w v")
        .unwrap();

    assert_eq!(interp.stack(), &[Value::Integer(1), Value::Integer(2)]);
    assert_eq!(interp.verbs().len(), 3);
    assert_eq!(interp.verbs().lookup("v"), Some(2));
}

#[test]
fn failed_definition_restores_previous_meaning() {
    let mut interp = ForthInterpreter::default();

    interp.process_source("<test>", ": v 1 ;").unwrap();
    assert!(interp.load("<test>", ": v 2").is_err());
    assert!(interp.load("<test>", ": u 3").is_err());

    interp.process_source("<test>", "v").unwrap();

    assert_eq!(interp.stack(), &[Value::Integer(1)]);
    assert_eq!(interp.verbs().lookup("u"), None);
}

#[test]
fn numeric_verb_name_is_shadowed_by_literal() {
    let mut interp = ForthInterpreter::default();

    interp.process_source("<test>", ": 5 10 ; 5").unwrap();

    assert_eq!(interp.stack(), &[Value::Integer(5)]);
}

#[test]
fn loader_tracks_definition_state() {
    let mut program = Program::new();
    let modules = ModuleTable::new();
    let mut loader = Loader::new(&mut program, &modules);

    assert_eq!(loader.state(), DefinitionState::Normal);
    loader.load("<test>", ": f 1 ; 2 f").unwrap();
    assert_eq!(loader.state(), DefinitionState::Normal);

    assert!(loader.load("<test>", ": g 1").is_err());
    assert_eq!(loader.state(), DefinitionState::Normal);
}

#[test]
fn loads_accumulate_across_calls() {
    let mut interp = ForthInterpreter::default();

    interp.load("a", ": sq dup * ;").unwrap();
    interp.load("b", "4 sq").unwrap();
    interp.execute().unwrap();

    assert_eq!(interp.stack(), &[Value::Integer(16)]);
}

#[test]
fn encoded_streams_decode_back() {
    let mut interp = ForthInterpreter::default();

    interp.load("<test>", ": f 2.5 if 1 else -3 then ; f").unwrap();

    let (main, verbs) = interp.program().encoded();
    let decode = |raw: &[(TypeTag, u32)]| -> Vec<Op> {
        raw.iter()
            .map(|&(tag, payload)| Op::from_raw(tag, payload).unwrap())
            .collect()
    };

    assert_eq!((decode(&main), decode(&verbs)), ops(interp.program()));
}

#[test]
fn raw_slots_without_an_operation_are_rejected() {
    assert!(matches!(
        Op::from_raw(TypeTag::None, 0).unwrap_err().kind(),
        ErrorKind::UnknownOpcode(_)
    ));
    assert!(matches!(
        Op::from_raw(TypeTag::CoreVerb, 999).unwrap_err().kind(),
        ErrorKind::UnknownOpcode(_)
    ));
}
