use logos::{Lexer, Logos};

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // Keywords
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("chan")]
    Chan,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("else")]
    Else,
    #[token("fallthrough")]
    Fallthrough,
    #[token("for")]
    For,
    #[token("func")]
    Func,
    #[token("go")]
    Go,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("package")]
    Package,
    #[token("range")]
    Range,
    #[token("return")]
    Return,
    #[token("select")]
    Select,
    #[token("struct")]
    Struct,
    #[token("switch")]
    Switch,
    #[token("type")]
    Type,
    #[token("var")]
    Var,

    // Identifiers and literals
    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")]
    Ident,
    #[regex(r"0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|[0-9][0-9_]*")]
    Int,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?[pP][+-]?[0-9_]+")]
    Float,
    #[regex(r"([0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?|\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?)i")]
    Imag,
    #[regex(r"'([^'\\\n]|\\[^\n][^'\n]*)'")]
    Rune,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,
    #[regex(r"`[^`]*`")]
    RawStr,

    // Comments are kept so doc groups can be attached to declarations
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,
    #[regex(r"\r?\n")]
    Newline,

    // Operators and punctuation
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":=")]
    Define,
    #[token(":")]
    Colon,
    #[token("=")]
    Assign,
    #[regex(r"(\+|-|\*|/|%|&|\||\^|<<|>>|&\^)=")]
    OpAssign,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<-")]
    Arrow,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Not,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("&^")]
    AndNot,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("~")]
    Tilde,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    Error,
}

impl Token {
    /// Whether a line break directly after this token terminates the statement.
    pub fn ends_statement(&self) -> bool {
        matches!(
            self,
            Token::Ident
                | Token::Int
                | Token::Float
                | Token::Imag
                | Token::Rune
                | Token::Str
                | Token::RawStr
                | Token::Break
                | Token::Continue
                | Token::Fallthrough
                | Token::Return
                | Token::Inc
                | Token::Dec
                | Token::RParen
                | Token::RBracket
                | Token::RBrace
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Token::LineComment | Token::BlockComment)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub lexeme: String,
    pub start: usize,
    pub end: usize,
}

impl SpannedToken {
    /// True for a semicolon produced from a line break rather than written out.
    pub fn is_implicit_semicolon(&self) -> bool {
        self.token == Token::Semicolon && self.lexeme != ";"
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    tokenize_detailed(input)
        .into_iter()
        .map(|t| t.token)
        .collect()
}

/// Tokenizes Go source, keeping comments and turning line breaks into
/// semicolons wherever the language inserts them. Plain newlines are dropped.
pub fn tokenize_detailed(input: &str) -> Vec<SpannedToken> {
    let mut lex = Token::lexer(input);
    let mut out: Vec<SpannedToken> = Vec::new();
    let mut last_significant: Option<Token> = None;

    while let Some(res) = lex.next() {
        let span = lex.span();
        let lexeme = lex.slice();
        let token = match res {
            Ok(tok) => tok,
            Err(_) => {
                out.push(SpannedToken {
                    token: Token::Error,
                    lexeme: lexeme.to_string(),
                    start: span.start,
                    end: span.end,
                });
                last_significant = Some(Token::Error);
                continue;
            }
        };

        match token {
            Token::Newline => {
                if take_pending_semicolon(&mut last_significant) {
                    out.push(implicit_semicolon(span.start, span.end));
                }
            }
            Token::BlockComment if lexeme.contains('\n') => {
                // A general comment spanning lines acts like a newline.
                let insert = take_pending_semicolon(&mut last_significant);
                out.push(SpannedToken {
                    token,
                    lexeme: lexeme.to_string(),
                    start: span.start,
                    end: span.end,
                });
                if insert {
                    out.push(implicit_semicolon(span.end, span.end));
                }
            }
            Token::LineComment | Token::BlockComment => {
                out.push(SpannedToken {
                    token,
                    lexeme: lexeme.to_string(),
                    start: span.start,
                    end: span.end,
                });
            }
            _ => {
                last_significant = Some(token);
                out.push(SpannedToken {
                    token,
                    lexeme: lexeme.to_string(),
                    start: span.start,
                    end: span.end,
                });
            }
        }
    }

    if take_pending_semicolon(&mut last_significant) {
        out.push(implicit_semicolon(input.len(), input.len()));
    }
    out
}

// Consumes through the closing `*/`; an unterminated comment swallows the
// rest of the input and is reported as an error.
fn block_comment(lex: &mut Lexer<Token>) -> bool {
    match lex.remainder().find("*/") {
        Some(idx) => {
            lex.bump(idx + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

fn take_pending_semicolon(last: &mut Option<Token>) -> bool {
    let insert = last.map(|t| t.ends_statement()).unwrap_or(false);
    if insert {
        *last = Some(Token::Semicolon);
    }
    insert
}

fn implicit_semicolon(start: usize, end: usize) -> SpannedToken {
    SpannedToken {
        token: Token::Semicolon,
        lexeme: "\n".to_string(),
        start,
        end,
    }
}
