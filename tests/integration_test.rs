// End-to-end tests for the lexer, parser and driver

use std::fs;
use std::path::{Path, PathBuf};

use tinypas::config::Settings;
use tinypas::diagnostics::{DiagnosticKind, DiagnosticLog};
use tinypas::driver::{self, DriverError, Mode};
use tinypas::parser::catalog::{Catalog, LoadError};
use tinypas::parser::lexer::Scanner;
use tinypas::parser::parse::Parser;
use tinypas::report::{Console, Palette};

const DEFAULT_CATALOG: &str = include_str!("../token_definition.txt");

fn default_catalog() -> Catalog {
    Catalog::parse(DEFAULT_CATALOG).expect("bundled catalog must load")
}

fn parse_with(settings: &Settings, source: &str) -> (bool, DiagnosticLog) {
    let catalog = default_catalog();
    let mut log = DiagnosticLog::new();
    let scanner = Scanner::new(&catalog, source.as_bytes(), settings);
    let accepted = Parser::new(scanner, &mut log).parse_program();
    (accepted, log)
}

fn parse(source: &str) -> (bool, DiagnosticLog) {
    parse_with(&Settings::plain(), source)
}

fn messages(log: &DiagnosticLog) -> Vec<String> {
    log.iter().map(|d| d.to_string()).collect()
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

#[test]
fn test_valid_program_is_accepted() {
    let (accepted, log) = parse("program p begin x := 1; write(x) end");
    assert!(accepted);
    assert!(log.is_empty(), "unexpected diagnostics: {:?}", messages(&log));
}

#[test]
fn test_full_program_with_comments() {
    let source = r#"
program sum {adds numbers until zero is read}
begin
    total_ := 0;
    read(n_);
    while n_ <> 0 do
    begin
        total_ := total_ + n_;   { running sum }
        read(n_)
    end;
    if total_ >= 100 then write(total_, 1) else write((total_ - 1) * 2 / 3)
end
"#;
    let (accepted, log) = parse(source);
    assert!(accepted, "unexpected diagnostics: {:?}", messages(&log));
}

#[test]
fn test_lookup_prefers_catalog_order() {
    let catalog = Catalog::from_pairs([("SHORT", "[a-z]"), ("LONG", "[a-z]+")]).unwrap();
    let (definition, end) = catalog.lookup("abc").unwrap();
    assert_eq!((definition.name.as_str(), end), ("SHORT", 1));

    let reordered = Catalog::from_pairs([("LONG", "[a-z]+"), ("SHORT", "[a-z]")]).unwrap();
    let (definition, end) = reordered.lookup("abc").unwrap();
    assert_eq!((definition.name.as_str(), end), ("LONG", 3));
}

#[test]
fn test_lookup_disjoint_patterns_ignore_order() {
    let forward = Catalog::from_pairs([("NUM", "[0-9]+"), ("WORD", "[a-z]+")]).unwrap();
    let backward = Catalog::from_pairs([("WORD", "[a-z]+"), ("NUM", "[0-9]+")]).unwrap();
    for text in ["42abc", "abc42", "+1"] {
        let a = forward.lookup(text).map(|(d, end)| (d.name.clone(), end));
        let b = backward.lookup(text).map(|(d, end)| (d.name.clone(), end));
        assert_eq!(a, b, "lookup of {:?}", text);
    }
}

#[test]
fn test_keywords_need_word_boundary() {
    let catalog = default_catalog();
    let (definition, end) = catalog.lookup("beginning := 1").unwrap();
    assert_eq!(definition.name, "PROGNAME_VARIABLE");
    assert_eq!(end, 9);
}

#[test]
fn test_scanning_twice_is_identical() {
    let catalog = default_catalog();
    let source = "program p\n\tbegin x := (a_1 + 2) * 3 ? end\n";
    let render = || {
        let mut log = DiagnosticLog::new();
        let lexemes: Vec<String> = Scanner::new(&catalog, source.as_bytes(), &Settings::plain())
            .tokenize(&mut log)
            .iter()
            .map(|l| l.to_string())
            .collect();
        (lexemes, messages(&log))
    };
    assert_eq!(render(), render());
}

#[test]
fn test_tab_column_and_flag() {
    let catalog = default_catalog();
    let mut log = DiagnosticLog::new();
    let mut scanner = Scanner::new(&catalog, "\tx".as_bytes(), &Settings::plain());
    let lexeme = scanner.next(&mut log).unwrap();
    assert_eq!(lexeme.to_string(), "PROGNAME_VARIABLE 'x' [1:9-10]");
    assert!(scanner.saw_tab());
}

#[test]
fn test_long_lexeme_boundary() {
    let settings = Settings {
        max_lexeme_length: 5,
        ..Settings::plain()
    };
    let catalog = default_catalog();

    let mut log = DiagnosticLog::new();
    let lexemes = Scanner::new(&catalog, "abcde abcdef x".as_bytes(), &settings).tokenize(&mut log);
    let texts: Vec<&str> = lexemes.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["abcde", "x"]);
    assert_eq!(messages(&log), vec!["lexeme is too long [1:7-13]"]);
}

#[test]
fn test_unexpected_end_of_input_is_last_and_only() {
    let (accepted, log) = parse("program p begin x := 1");
    assert!(!accepted);
    assert_eq!(messages(&log), vec!["unexpected end of input [1:23]"]);
    assert!(log.saw_unexpected_end_of_input());
}

#[test]
fn test_end_of_input_after_errors_stays_last() {
    let (_, log) = parse("program p begin x := ? 1 +");
    let kinds: Vec<DiagnosticKind> = log.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::UnidentifiedToken, DiagnosticKind::UnexpectedEndOfInput]
    );
}

#[test]
fn test_trailing_junk() {
    let (accepted, log) = parse("program p begin write(1) end extra");
    assert!(!accepted);
    assert_eq!(messages(&log), vec!["non-empty content after end of program [1:30]"]);
    assert_eq!(log.diagnostics()[0].end_col, None);
}

#[test]
fn test_lexical_errors_do_not_stop_parsing() {
    let (_, log) = parse("program p begin x := 1 # ; y_ := @2 end");
    assert_eq!(
        messages(&log),
        vec!["cannot identify token [1:24-25]", "cannot identify token [1:34-35]"]
    );
}

#[test]
fn test_overlong_line_is_truncated() {
    let settings = Settings {
        max_line_length: 23,
        ..Settings::plain()
    };
    // Only the first 22 characters of a line are read, so the junk is never seen
    let (accepted, log) = parse_with(&settings, "program p begin x := 1 ????\nend");
    assert!(accepted, "unexpected diagnostics: {:?}", messages(&log));

    let (accepted, _) = parse("program p begin x := 1 ????\nend");
    assert!(!accepted);
}

#[test]
fn test_driver_report() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_file(dir.path(), "tokens.txt", DEFAULT_CATALOG);
    let input = write_file(dir.path(), "bad.txt", "program p\nbegin x := 1 end end\n");
    let settings = Settings {
        token_definitions: catalog,
        ..Settings::plain()
    };

    let console = Console::new(Vec::new(), Palette::plain());
    let outcome = driver::run(&settings, &input, Mode::Parse, &console).unwrap();
    assert!(!outcome.accepted());

    let expected = format!(
        "non-empty content after end of program [2:18]\n{}\nprogram p\nbegin x := 1 end end\n\n",
        input.display()
    );
    assert_eq!(console.contents(), expected);
}

#[test]
fn test_driver_without_source_display() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_file(dir.path(), "tokens.txt", DEFAULT_CATALOG);
    let input = write_file(dir.path(), "bad.txt", "program p begin x := 1");
    let settings = Settings {
        token_definitions: catalog,
        show_source: false,
        ..Settings::plain()
    };

    let console = Console::new(Vec::new(), Palette::plain());
    driver::run(&settings, &input, Mode::Parse, &console).unwrap();
    assert_eq!(console.contents(), "unexpected end of input [1:23]\n");
}

#[test]
fn test_surplus_definitions_warn() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog_text = DEFAULT_CATALOG.replacen("22", "21", 1);
    catalog_text.push_str("\nEXTRA x\n");
    let catalog = write_file(dir.path(), "tokens.txt", &catalog_text);
    let input = write_file(dir.path(), "ok.txt", "program p begin x := 1 end");
    let settings = Settings {
        token_definitions: catalog,
        ..Settings::plain()
    };

    let console = Console::new(Vec::new(), Palette::plain());
    driver::run(&settings, &input, Mode::Parse, &console).unwrap();
    let output = console.contents();
    assert!(output.starts_with("WARNING - detect more than 21 token definition(s)"));
}

#[test]
fn test_invalid_pattern_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_file(dir.path(), "tokens.txt", "2\n16\n16\nGOOD a\nBAD (b\n");
    let input = write_file(dir.path(), "in.txt", "a");
    let settings = Settings {
        token_definitions: catalog,
        ..Settings::plain()
    };

    let console = Console::new(Vec::new(), Palette::plain());
    let err = driver::run(&settings, &input, Mode::Parse, &console).unwrap_err();
    match &err {
        DriverError::Catalog(LoadError::InvalidPattern { name, .. }) => assert_eq!(name, "BAD"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_lex_only_collects_lexical_errors() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_file(dir.path(), "tokens.txt", DEFAULT_CATALOG);
    let input = write_file(dir.path(), "in.txt", "end ? begin");
    let settings = Settings {
        token_definitions: catalog,
        show_source: false,
        ..Settings::plain()
    };

    let console = Console::new(Vec::new(), Palette::plain());
    let outcome = driver::run(&settings, &input, Mode::LexOnly, &console).unwrap();
    assert_eq!(outcome.lexemes, 2);
    assert_eq!(
        console.contents(),
        "END 'end' [1:1-4]\ncannot identify token [1:5-6]\nBEGIN 'begin' [1:7-12]\n"
    );
}
