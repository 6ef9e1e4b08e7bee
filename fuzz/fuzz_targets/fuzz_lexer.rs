#![no_main]

use corvid_core::lexer::Lexer;
use corvid_core::token::TokenKind;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Lossy decoding marks malformed bytes with U+FFFD, which the lexer must
    // classify as an illegal run rather than crash on.
    let source = String::from_utf8_lossy(data);

    let tokens = Lexer::tokenize_all(&source);

    // A token stream always ends with exactly one terminal token.
    let last = tokens.last().expect("token stream must not be empty");
    assert!(
        matches!(last.kind, TokenKind::Eof | TokenKind::Illegal),
        "stream must end with a terminal token, got {last}"
    );
    let terminals = tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Eof | TokenKind::Illegal))
        .count();
    assert_eq!(terminals, 1, "exactly one terminal token per stream");

    // Non-terminal tokens carry 1-based positions that never move backwards.
    let mut prev = (1u32, 0u32);
    for tok in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
        assert!(tok.line >= 1 && tok.column >= 1, "positions are 1-based");
        let pos = (tok.line, tok.column);
        assert!(
            tok.line > prev.0 || pos > prev,
            "token positions must advance: {prev:?} then {pos:?}"
        );
        prev = pos;
    }

    // The lexer is fused: after the terminal token it only reports Eof.
    let mut lexer = Lexer::new(&source);
    for _ in &tokens {
        lexer.next_token();
    }
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
});
