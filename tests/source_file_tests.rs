use std::fs;
use std::path::PathBuf;
use verbforth::config::InterpreterConfig;
use verbforth::lang::tokenizing::tokenize_from_source;
use verbforth::runtime::data_structures::value::Value;
use verbforth::runtime::error::ErrorKind;
use verbforth::runtime::interpreter::InterpreterStack;
use verbforth::runtime::interpreter::forth_interpreter::ForthInterpreter;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("verbforth-{}-{}", std::process::id(), name));

    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn runs_a_source_file() {
    let path = write_temp("sum.f", ": sq dup * ;\n3 sq 4 sq +\n");
    let mut interp = ForthInterpreter::default();

    interp.load_file(path.to_str().unwrap()).unwrap();
    interp.execute().unwrap();

    assert_eq!(interp.stack(), &[Value::Integer(25)]);
    let _ = fs::remove_file(path);
}

#[test]
fn source_at_the_size_limit_is_rejected() {
    let path = write_temp("big.f", &"1 drop ".repeat(10));
    let mut interp = ForthInterpreter::new(InterpreterConfig {
        max_source_bytes: 70,
        ..InterpreterConfig::default()
    });

    let error = interp.load_file(path.to_str().unwrap()).unwrap_err();

    assert_eq!(*error.kind(), ErrorKind::SourceTooLarge { size: 70, limit: 70 });
    assert!(interp.program().main().is_empty());
    let _ = fs::remove_file(path);
}

#[test]
fn missing_file_is_an_io_error() {
    let mut interp = ForthInterpreter::default();

    let error = interp.load_file("/nonexistent/verbforth/missing.f").unwrap_err();

    assert!(matches!(error.kind(), ErrorKind::Io(_)));
}

#[test]
fn tokenizing_is_deterministic() {
    let source = ": sq dup * ;\n\t3 sq\r\n";

    assert_eq!(
        tokenize_from_source("<test>", source).unwrap(),
        tokenize_from_source("<test>", source).unwrap()
    );
}
