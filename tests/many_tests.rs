mod utils;

const PATTERNS: &[&str] = &[
    "a",
    "ab",
    "a*",
    "a|b",
    "(a|b)*abb",
    "a(bb)*a",
    "(a*)*",
    "(a|b)*(c|d)*",
    "((ab)*|c)*d",
    "x(y|z*)*x",
    "héllo|wörld",
    "",
];

const INPUTS: &[&str] = &[
    "", "a", "b", "aa", "ab", "abb", "aabb", "babb", "abba", "abbbba", "aaaa", "abcd", "cddd",
    "ababcd", "d", "abcd", "xx", "xyzzyx", "xyx", "b", "héllo", "wörld", "hello",
];

#[test]
fn test_many() {
    for pattern in PATTERNS {
        for input in INPUTS {
            utils::check_against_rust(pattern, input);
        }
    }
}

#[test]
fn test_invalid_patterns() {
    for pattern in ["(a", "a)", "(a|b", "((a)"] {
        assert!(utils::compile_both(pattern).is_none(), "{pattern:?}");
    }
}
