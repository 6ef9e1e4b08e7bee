//! Character-level lexer for the ECMAScript subset.
//!
//! See [`Lexer`] for the main entry point. The lexer is a pull-based state
//! machine: the parser calls [`Lexer::next_token`] and never receives more
//! input than it asked for. A token stream always ends with exactly one
//! terminal token ([`TokenKind::Eof`] on success, [`TokenKind::Illegal`] on
//! a lexical error), and the lexer is fused after producing it.

use crate::token::{Token, TokenKind, keyword_kind};

// ─────────────────────────────────────────────────────────────────────────────
// Character classification
// ─────────────────────────────────────────────────────────────────────────────

/// Returns `true` for ES5 *LineTerminator* code points.
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Returns `true` for the recognized *WhiteSpace* set: tab, vertical tab,
/// form feed, space, no-break space, and the byte-order mark.
fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{000B}' | '\u{000C}' | ' ' | '\u{00A0}' | '\u{FEFF}'
    )
}

/// Returns `true` for characters that may start an identifier.
fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

/// Returns `true` for characters that may continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

/// Returns `true` at the characters that close a numeric literal: whitespace,
/// line terminators, `)`, `,`, and `;`. End of input closes a literal too and
/// is handled separately.
fn is_token_end(c: char) -> bool {
    is_whitespace(c) || is_line_terminator(c) || matches!(c, ')' | ',' | ';')
}

/// Returns `true` for characters that can begin a punctuator.
fn is_punctuator_start(c: char) -> bool {
    matches!(
        c,
        ',' | ';'
            | ':'
            | '?'
            | '~'
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '*'
            | '/'
            | '%'
            | '<'
            | '>'
            | '&'
            | '|'
            | '^'
            | '!'
            | '='
            | '-'
            | '+'
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Lexer
// ─────────────────────────────────────────────────────────────────────────────

/// What the next call to [`Lexer::next_token`] must produce.
///
/// Member access is the one place the machine needs memory across tokens: an
/// identifier that stops at `.` is followed by a `Dot` token, which in turn
/// must be followed by an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Dispatch on the next significant character.
    Default,
    /// An identifier just ended at `.`; emit the `Dot` token.
    MemberDot,
    /// A member-access `Dot` was just emitted; an identifier must follow.
    MemberName,
}

/// Pull-based lexer over a decoded source string.
///
/// ```
/// use corvid_core::lexer::Lexer;
/// use corvid_core::token::TokenKind;
///
/// let mut lx = Lexer::new("console.log(2.0);");
/// loop {
///     let tok = lx.next_token();
///     if tok.kind == TokenKind::Eof {
///         break;
///     }
///     println!("{tok}");
/// }
/// ```
pub struct Lexer {
    /// Decoded code points of the source.
    code: Vec<char>,
    /// Cursor into `code`.
    pos: usize,
    /// Index where the current token began.
    start: usize,
    /// 1-based line of the cursor.
    line: u32,
    /// 1-based column of the cursor.
    column: u32,
    /// Line of the current token's first character.
    start_line: u32,
    /// Column of the current token's first character.
    start_column: u32,
    mode: Mode,
    /// Set after the terminal token (`Eof` / `Illegal`) has been produced.
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source text.
    pub fn new(source: &str) -> Self {
        Self {
            code: source.chars().collect(),
            pos: 0,
            start: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
            mode: Mode::Default,
            finished: false,
        }
    }

    /// Tokenize the whole source, collecting every token up to and including
    /// the terminal `Eof` or `Illegal`.
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    // ── Low-level cursor helpers ────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.code.get(self.pos).copied()
    }

    /// Advance past one non-line-terminator character.
    fn advance(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    /// Mark the start of a new token at the cursor.
    fn begin_token(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    /// The source text consumed for the current token so far.
    fn lexeme(&self) -> String {
        self.code[self.start..self.pos].iter().collect()
    }

    /// Build a token of `kind` from the current lexeme.
    fn token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            text: self.lexeme(),
            line: self.start_line,
            column: self.start_column,
        }
    }

    /// Terminal `Illegal` token: its text is the entire remaining input from
    /// the start of the offending token.
    fn illegal(&mut self) -> Token {
        self.finished = true;
        Token {
            kind: TokenKind::Illegal,
            text: self.code[self.start..].iter().collect(),
            line: self.start_line,
            column: self.start_column,
        }
    }

    fn eof(&mut self) -> Token {
        self.finished = true;
        Token {
            kind: TokenKind::Eof,
            text: "EOF".into(),
            line: self.line,
            column: self.column,
        }
    }

    // ── Whitespace ──────────────────────────────────────────────────────────

    /// Consume whitespace and line terminators, updating line/column. A run
    /// of these never produces a token. `\r\n` counts as one terminator.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if is_line_terminator(c) {
                self.pos += 1;
                if c == '\r' && self.peek() == Some('\n') {
                    self.pos += 1;
                }
                self.line += 1;
                self.column = 1;
            } else if is_whitespace(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    // ── Main public API ─────────────────────────────────────────────────────

    /// Scan and return the next [`Token`].
    ///
    /// Once a terminal `Eof` or `Illegal` token has been returned the stream
    /// is exhausted; further calls return `Eof`.
    pub fn next_token(&mut self) -> Token {
        if self.finished {
            return self.eof();
        }

        match self.mode {
            Mode::MemberDot => {
                self.begin_token();
                self.advance(); // the `.`
                self.mode = Mode::MemberName;
                return self.token(TokenKind::Dot);
            }
            Mode::MemberName => {
                self.mode = Mode::Default;
                return self.member_name();
            }
            Mode::Default => {}
        }

        self.skip_whitespace();
        self.begin_token();

        let Some(c) = self.peek() else {
            return self.eof();
        };

        // A replacement character marks input that failed to decode.
        if c == char::REPLACEMENT_CHARACTER {
            return self.illegal();
        }

        if c.is_ascii_digit() {
            self.advance();
            return self.scan_number(c);
        }
        if c == '.' {
            self.advance();
            return self.scan_leading_dot();
        }
        if c == '"' {
            self.advance();
            return self.scan_string();
        }
        if is_punctuator_start(c) {
            return self.scan_punctuator(c);
        }
        if is_ident_start(c) {
            return self.scan_identifier();
        }

        self.illegal()
    }

    // ── Member access ───────────────────────────────────────────────────────

    /// Scan the token after a member-access `Dot`: an identifier is required.
    /// A digit, another dot, or any other non-identifier character makes the
    /// rest of the input an `Illegal` run; end of input is a plain `Eof`.
    fn member_name(&mut self) -> Token {
        self.begin_token();
        match self.peek() {
            None => self.eof(),
            Some(c) if is_ident_start(c) => self.scan_identifier(),
            Some(_) => self.illegal(),
        }
    }

    // ── Identifiers / keywords ──────────────────────────────────────────────

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        // An immediately following `.` starts a member access: the next two
        // tokens must be `Dot` and an identifier.
        if self.peek() == Some('.') {
            self.mode = Mode::MemberDot;
        }
        let text = self.lexeme();
        let kind = keyword_kind(&text).unwrap_or(TokenKind::Ident);
        Token {
            kind,
            text,
            line: self.start_line,
            column: self.start_column,
        }
    }

    // ── Punctuators ─────────────────────────────────────────────────────────

    /// Longest-match punctuator disambiguation: candidate spellings for the
    /// current start character are tried longest-first and the first exact
    /// prefix match wins.
    fn scan_punctuator(&mut self, c: char) -> Token {
        let candidates: &[(&str, TokenKind)] = match c {
            ',' => &[(",", TokenKind::Comma)],
            ';' => &[(";", TokenKind::Semicolon)],
            ':' => &[(":", TokenKind::Colon)],
            '?' => &[("?", TokenKind::Question)],
            '~' => &[("~", TokenKind::Tilde)],
            '(' => &[("(", TokenKind::LeftParen)],
            ')' => &[(")", TokenKind::RightParen)],
            '[' => &[("[", TokenKind::LeftBracket)],
            ']' => &[("]", TokenKind::RightBracket)],
            '{' => &[("{", TokenKind::LeftBrace)],
            '}' => &[("}", TokenKind::RightBrace)],
            '*' => &[("*=", TokenKind::StarEqual), ("*", TokenKind::Star)],
            '/' => &[("/=", TokenKind::SlashEqual), ("/", TokenKind::Slash)],
            '%' => &[("%=", TokenKind::PercentEqual), ("%", TokenKind::Percent)],
            '<' => &[
                ("<<=", TokenKind::LessLessEqual),
                ("<<", TokenKind::LessLess),
                ("<=", TokenKind::LessEqual),
                ("<", TokenKind::Less),
            ],
            '>' => &[
                (">>>=", TokenKind::GreaterGreaterGreaterEqual),
                (">>>", TokenKind::GreaterGreaterGreater),
                (">>=", TokenKind::GreaterGreaterEqual),
                (">>", TokenKind::GreaterGreater),
                (">=", TokenKind::GreaterEqual),
                (">", TokenKind::Greater),
            ],
            '&' => &[
                ("&&", TokenKind::AmpersandAmpersand),
                ("&=", TokenKind::AmpersandEqual),
                ("&", TokenKind::Ampersand),
            ],
            '|' => &[
                ("||", TokenKind::PipePipe),
                ("|=", TokenKind::PipeEqual),
                ("|", TokenKind::Pipe),
            ],
            '^' => &[("^=", TokenKind::CaretEqual), ("^", TokenKind::Caret)],
            '!' => &[
                ("!==", TokenKind::BangEqualEqual),
                ("!=", TokenKind::BangEqual),
                ("!", TokenKind::Bang),
            ],
            '=' => &[
                ("===", TokenKind::EqualEqualEqual),
                ("==", TokenKind::EqualEqual),
                ("=", TokenKind::Equal),
            ],
            '-' => &[
                ("--", TokenKind::MinusMinus),
                ("-=", TokenKind::MinusEqual),
                ("-", TokenKind::Minus),
            ],
            '+' => &[
                ("++", TokenKind::PlusPlus),
                ("+=", TokenKind::PlusEqual),
                ("+", TokenKind::Plus),
            ],
            _ => return self.illegal(),
        };

        for (spelling, kind) in candidates {
            if self.accept(spelling) {
                return self.token(*kind);
            }
        }
        self.illegal()
    }

    /// Consume `spelling` if the remaining input starts with it.
    fn accept(&mut self, spelling: &str) -> bool {
        let mut it = self.code[self.pos..].iter();
        for want in spelling.chars() {
            if it.next() != Some(&want) {
                return false;
            }
        }
        for _ in spelling.chars() {
            self.advance();
        }
        true
    }

    // ── Strings ─────────────────────────────────────────────────────────────

    /// Scan a string literal after the opening `"`. `\` escapes the next
    /// character, which is kept verbatim in the token text. A line terminator
    /// or end of input before the closing quote makes the run `Illegal`.
    fn scan_string(&mut self) -> Token {
        loop {
            match self.peek() {
                None => return self.illegal(),
                Some(c) if is_line_terminator(c) => return self.illegal(),
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        None => return self.illegal(),
                        Some(c) if is_line_terminator(c) => return self.illegal(),
                        Some(_) => self.advance(),
                    }
                }
                Some('"') => {
                    self.advance();
                    // The quotes are stripped from the token text.
                    let text: String =
                        self.code[self.start + 1..self.pos - 1].iter().collect();
                    return Token {
                        kind: TokenKind::String,
                        text,
                        line: self.start_line,
                        column: self.start_column,
                    };
                }
                Some(_) => self.advance(),
            }
        }
    }

    // ── Numbers ─────────────────────────────────────────────────────────────

    /// Scan a numeric literal whose first digit has been consumed.
    fn scan_number(&mut self, first: char) -> Token {
        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.advance();
            return self.scan_hexadecimal();
        }
        self.scan_decimal(true, true)
    }

    /// Hexadecimal digits after `0x`/`0X`: at least one digit is required,
    /// and the literal must run up to a token boundary.
    fn scan_hexadecimal(&mut self) -> Token {
        if !matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
            return self.illegal();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
            self.advance();
        }
        match self.peek() {
            None => self.token(TokenKind::Hexadecimal),
            Some(c) if is_token_end(c) => self.token(TokenKind::Hexadecimal),
            Some(_) => self.illegal(),
        }
    }

    /// Decimal state. `allow_exponent` is cleared once an exponent part has
    /// been read; `allow_dot` is cleared after the first dot.
    fn scan_decimal(&mut self, allow_exponent: bool, allow_dot: bool) -> Token {
        let mut allow_dot = allow_dot;
        loop {
            match self.peek() {
                None => return self.token(TokenKind::Decimal),
                Some('e' | 'E') => {
                    if !allow_exponent {
                        return self.illegal();
                    }
                    self.advance();
                    return self.scan_exponent();
                }
                Some('.') => {
                    if !allow_dot {
                        return self.illegal();
                    }
                    self.advance();
                    allow_dot = false;
                }
                Some(c) if is_token_end(c) => return self.token(TokenKind::Decimal),
                Some(c) if c.is_ascii_digit() => self.advance(),
                Some(_) => return self.illegal(),
            }
        }
    }

    /// Exponent part after `e`/`E`: an optional single sign, then at least
    /// one digit; no further dot or exponent marker may follow.
    fn scan_exponent(&mut self) -> Token {
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            return self.illegal();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        match self.peek() {
            None => self.token(TokenKind::Decimal),
            Some(c) if is_token_end(c) => self.token(TokenKind::Decimal),
            Some(_) => self.illegal(),
        }
    }

    /// A real literal opened by `.`: a digit must follow the dot.
    fn scan_leading_dot(&mut self) -> Token {
        if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            return self.illegal();
        }
        self.scan_decimal(true, false)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token including the terminal `Eof`/`Illegal`, then
    /// `None`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
