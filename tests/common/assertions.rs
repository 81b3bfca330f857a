use stackc::parser::{parse, ParseError};

/// Assert that parsing fails, returning the error
pub fn assert_parse_fails(source: &str) -> ParseError {
    match parse(source) {
        Ok(program) => panic!("Expected source to fail parsing, got {:?}", program),
        Err(e) => e,
    }
}

/// Every `sym(%rip)` operand must have a matching `.lcomm sym` declaration
pub fn assert_data_symbols_declared(asm: &str) {
    for operand in asm.split_whitespace() {
        if let Some(name) = operand.trim_end_matches(',').strip_suffix("(%rip)") {
            assert!(
                asm.contains(&format!(".lcomm {}, 8", name)),
                "data symbol {} is referenced but never declared",
                name
            );
        }
    }
}

/// Every `call f` must target a label defined in the artifact or the runtime
pub fn assert_calls_resolve(asm: &str, runtime_routines: &[&str]) {
    for line in asm.lines().map(str::trim) {
        if let Some(target) = line.strip_prefix("call ") {
            let defined = asm.lines().any(|l| l == format!("{}:", target));
            assert!(
                defined || runtime_routines.contains(&target),
                "call to undefined label {}",
                target
            );
        }
    }
}
