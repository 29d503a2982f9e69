use regex as rust_regex;
use thompson_re::Regex;

/// Compile a pattern with our engine and, anchored on both ends, with
/// rust-regex. Panics if only one of them accepts the pattern.
pub fn compile_both(pattern: &str) -> Option<(Regex, rust_regex::Regex)> {
    let ours = Regex::new(pattern);
    let rust = rust_regex::Regex::new(&format!("^(?:{pattern})$"));

    match (ours, rust) {
        (Ok(ours), Ok(rust)) => Some((ours, rust)),
        (Err(_), Err(_)) => None,
        (Ok(_), Err(e)) => panic!("rust-regex failed to compile {pattern:?} but we succeeded: {e}"),
        (Err(e), Ok(_)) => panic!("we failed to compile {pattern:?} but rust-regex succeeded: {e}"),
    }
}

/// Match a pattern against a given input with both engines and compare the
/// results.
pub fn check_against_rust(pattern: &str, input: &str) {
    let Some((ours, rust)) = compile_both(pattern) else {
        return;
    };
    assert_eq!(
        ours.is_match(input),
        rust.is_match(input),
        "Mismatch for pattern {:?} input {:?}",
        pattern,
        input
    );
}
