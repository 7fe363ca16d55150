use std::fmt;

use gomathgen_lexer::Token;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum TypeExpr {
    Named(String),
    Qualified {
        package: String,
        name: String,
    },
    // Generic instantiation: List[int]
    Instance {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array {
        len: String,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func(Signature),
    // Struct and interface bodies are kept as written
    Struct(String),
    Interface(String),
    Variadic(Box<TypeExpr>),
    Paren(Box<TypeExpr>),
    // Constraint-only forms, valid inside type parameter lists
    Tilde(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

impl TypeExpr {
    /// Textual match against a bare predeclared identifier such as `float64`.
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, TypeExpr::Named(n) if n == name)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => write!(f, "{name}"),
            TypeExpr::Qualified { package, name } => write!(f, "{package}.{name}"),
            TypeExpr::Instance { base, args } => {
                write!(f, "{base}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
            TypeExpr::Pointer(elem) => write!(f, "*{elem}"),
            TypeExpr::Slice(elem) => write!(f, "[]{elem}"),
            TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            TypeExpr::Func(sig) => write!(f, "{sig}"),
            TypeExpr::Struct(text) | TypeExpr::Interface(text) => write!(f, "{text}"),
            TypeExpr::Variadic(elem) => write!(f, "...{elem}"),
            TypeExpr::Paren(inner) => write!(f, "({inner})"),
            TypeExpr::Tilde(inner) => write!(f, "~{inner}"),
            TypeExpr::Union(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{term}")?;
                }
                Ok(())
            }
        }
    }
}

/// One entry of a parameter, result or type parameter list. Several names may
/// share a single type node; anonymous entries have no names.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.names.join(", "), self.ty)
        }
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func(")?;
        write_fields(f, &self.params)?;
        write!(f, ")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() => write!(f, " {}", single.ty),
            results => {
                write!(f, " (")?;
                write_fields(f, results)?;
                write!(f, ")")
            }
        }
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[Field]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{field}")?;
    }
    Ok(())
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CommentGroup {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FuncDecl {
    pub doc: Option<CommentGroup>,
    pub recv: Option<Vec<Field>>,
    pub name: String,
    pub type_params: Vec<Field>,
    pub signature: Signature,
    pub has_body: bool,
    pub span: Span,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum DeclKeyword {
    Import,
    Const,
    Var,
    Type,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ImportSpec {
    pub name: Option<String>,
    pub path: String,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<TypeExpr>,
    /// Initializer expressions exactly as written in the source.
    pub values: Vec<String>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    pub type_params: Vec<Field>,
    pub alias: bool,
    pub ty: TypeExpr,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GenDecl {
    pub doc: Option<CommentGroup>,
    pub keyword: DeclKeyword,
    pub grouped: bool,
    pub specs: Vec<Spec>,
    /// Verbatim source of the declaration, doc comment included.
    pub text: String,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub package: String,
    pub decls: Vec<Decl>,
    pub comments: Vec<CommentGroup>,
}

/// Go's export rule: the first character is an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().map(char::is_uppercase).unwrap_or(false)
}

#[derive(Clone)]
struct TokenInfo {
    token: Token,
    lexeme: String,
    position: usize,
    end: usize,
}

#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
    pub found_token: Option<String>,
    pub expected: Option<String>,
}

pub fn parse(input: &str) -> Result<SourceFile, ParseError> {
    use gomathgen_lexer::tokenize_detailed;

    let toks = tokenize_detailed(input);
    let mut tokens = Vec::new();
    let mut comments = Vec::new();

    for t in toks {
        if matches!(t.token, Token::Error) {
            return Err(ParseError {
                message: format!("Invalid token: '{}'", t.lexeme),
                position: t.start,
                found_token: Some(t.lexeme),
                expected: None,
            });
        }
        if t.token.is_comment() {
            comments.push(CommentGroup {
                text: t.lexeme,
                span: Span {
                    start: t.start,
                    end: t.end,
                },
            });
            continue;
        }
        tokens.push(TokenInfo {
            token: t.token,
            lexeme: t.lexeme,
            position: t.start,
            end: t.end,
        });
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        input: input.to_string(),
        comments,
    };
    parser.parse_file()
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at position {}: {}",
            self.position, self.message
        )?;
        if let Some(found) = &self.found_token {
            write!(f, " (found: '{}')", found.escape_debug())?;
        }
        if let Some(expected) = &self.expected {
            write!(f, " (expected: {expected})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

struct Parser {
    tokens: Vec<TokenInfo>,
    pos: usize,
    input: String,
    comments: Vec<CommentGroup>,
}

enum ParamEntry {
    Bare(String),
    Named(String, TypeExpr),
    Type(TypeExpr),
}

impl Parser {
    fn parse_file(&mut self) -> Result<SourceFile, ParseError> {
        self.skip_semicolons();
        if !self.consume(&Token::Package) {
            return Err(self.error_with_expected("missing package clause", "'package'"));
        }
        let package = self.expect_ident()?;
        self.expect_terminator()?;

        let mut decls = Vec::new();
        loop {
            self.skip_semicolons();
            let Some(tok) = self.peek_token().copied() else {
                break;
            };
            let decl = match tok {
                Token::Func => Decl::Func(self.parse_func_decl()?),
                Token::Import | Token::Const | Token::Var | Token::Type => {
                    Decl::Gen(self.parse_gen_decl()?)
                }
                _ => return Err(self.error("expected top-level declaration")),
            };
            decls.push(decl);
            self.expect_terminator()?;
        }

        Ok(SourceFile {
            package,
            decls,
            comments: std::mem::take(&mut self.comments),
        })
    }

    fn error(&self, message: &str) -> ParseError {
        let (position, found_token) = if let Some(token_info) = self.tokens.get(self.pos) {
            (token_info.position, Some(token_info.lexeme.clone()))
        } else {
            (self.input.len(), None)
        };

        ParseError {
            message: message.to_string(),
            position,
            found_token,
            expected: None,
        }
    }

    fn error_with_expected(&self, message: &str, expected: &str) -> ParseError {
        ParseError {
            expected: Some(expected.to_string()),
            ..self.error(message)
        }
    }

    fn parse_func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        let keyword_start = self.current_position();
        self.consume(&Token::Func);
        let recv = if self.peek_token() == Some(&Token::LParen) {
            Some(self.parse_parameters()?)
        } else {
            None
        };
        let name = self.expect_ident()?;
        let type_params = if self.peek_token() == Some(&Token::LBracket) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        let signature = self.parse_signature_rest()?;
        let has_body = if self.peek_token() == Some(&Token::LBrace) {
            self.skip_balanced(Token::LBrace, Token::RBrace)?;
            true
        } else {
            false
        };

        let doc = self.doc_before(keyword_start);
        let start = doc.as_ref().map(|d| d.span.start).unwrap_or(keyword_start);
        Ok(FuncDecl {
            doc,
            recv,
            name,
            type_params,
            signature,
            has_body,
            span: Span {
                start,
                end: self.previous_end(),
            },
        })
    }

    fn parse_gen_decl(&mut self) -> Result<GenDecl, ParseError> {
        let keyword_start = self.current_position();
        let keyword = match self.next().map(|t| t.token) {
            Some(Token::Import) => DeclKeyword::Import,
            Some(Token::Const) => DeclKeyword::Const,
            Some(Token::Var) => DeclKeyword::Var,
            Some(Token::Type) => DeclKeyword::Type,
            _ => return Err(self.error("expected declaration keyword")),
        };

        let mut specs = Vec::new();
        let grouped = self.consume(&Token::LParen);
        if grouped {
            loop {
                self.skip_semicolons();
                if self.consume(&Token::RParen) {
                    break;
                }
                if self.peek_token().is_none() {
                    return Err(self.error_with_expected("unterminated declaration group", "')'"));
                }
                specs.push(self.parse_spec(keyword)?);
                if !self.consume(&Token::Semicolon) && self.peek_token() != Some(&Token::RParen) {
                    return Err(self.error_with_expected("unexpected token in declaration group", "';' or ')'"));
                }
            }
        } else {
            specs.push(self.parse_spec(keyword)?);
        }

        let doc = self.doc_before(keyword_start);
        let start = doc.as_ref().map(|d| d.span.start).unwrap_or(keyword_start);
        let end = self.previous_end();
        Ok(GenDecl {
            doc,
            keyword,
            grouped,
            specs,
            text: self.input[start..end].to_string(),
            span: Span { start, end },
        })
    }

    fn parse_spec(&mut self, keyword: DeclKeyword) -> Result<Spec, ParseError> {
        match keyword {
            DeclKeyword::Import => {
                let name = match self.peek_token().copied() {
                    Some(Token::Ident) | Some(Token::Dot) => self.next().map(|t| t.lexeme),
                    _ => None,
                };
                match self.peek_token().copied() {
                    Some(Token::Str | Token::RawStr) => {
                        let lexeme = self.next().map(|t| t.lexeme).unwrap_or_default();
                        Ok(Spec::Import(ImportSpec {
                            name,
                            path: lexeme.trim_matches(|c| c == '"' || c == '`').to_string(),
                        }))
                    }
                    _ => Err(self.error_with_expected("malformed import", "import path")),
                }
            }
            DeclKeyword::Const | DeclKeyword::Var => {
                let mut names = vec![self.expect_ident()?];
                while self.consume(&Token::Comma) {
                    names.push(self.expect_ident()?);
                }
                let mut ty = None;
                let mut values = Vec::new();
                if self.consume(&Token::Assign) {
                    values = self.parse_expr_list()?;
                } else if !matches!(
                    self.peek_token(),
                    None | Some(Token::Semicolon) | Some(Token::RParen)
                ) {
                    ty = Some(self.parse_type()?);
                    if self.consume(&Token::Assign) {
                        values = self.parse_expr_list()?;
                    }
                }
                Ok(Spec::Value(ValueSpec { names, ty, values }))
            }
            DeclKeyword::Type => {
                let name = self.expect_ident()?;
                let type_params = if self.looks_like_type_params() {
                    self.parse_type_params()?
                } else {
                    Vec::new()
                };
                let alias = self.consume(&Token::Assign);
                let ty = self.parse_type()?;
                Ok(Spec::Type(TypeSpec {
                    name,
                    type_params,
                    alias,
                    ty,
                }))
            }
        }
    }

    // `type A [N]int` is an array; `type A[T any] ...` declares type parameters.
    fn looks_like_type_params(&self) -> bool {
        self.peek_token() == Some(&Token::LBracket)
            && self.peek_token_at(1) == Some(&Token::Ident)
            && matches!(
                self.peek_token_at(2),
                Some(
                    Token::Ident
                        | Token::Comma
                        | Token::Tilde
                        | Token::Interface
                        | Token::LBracket
                        | Token::Func
                        | Token::Map
                        | Token::Chan
                        | Token::Struct
                )
            )
    }

    /// Collects comma separated initializer expressions as verbatim source text.
    fn parse_expr_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut exprs = Vec::new();
        let mut depth = 0usize;
        let mut current: Option<(usize, usize)> = None;

        loop {
            let Some(tok) = self.peek_token().copied() else {
                break;
            };
            if depth == 0 && matches!(tok, Token::Semicolon | Token::RParen | Token::Comma) {
                let Some((start, end)) = current.take() else {
                    return Err(self.error("expected expression"));
                };
                exprs.push(self.input[start..end].to_string());
                if self.consume(&Token::Comma) {
                    continue;
                }
                return Ok(exprs);
            }
            match tok {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    if depth == 0 {
                        return Err(self.error("unbalanced closing delimiter in expression"));
                    }
                    depth -= 1;
                }
                _ => {}
            }
            let Some(info) = self.next() else {
                break;
            };
            current = Some(match current {
                Some((start, _)) => (start, info.end),
                None => (info.position, info.end),
            });
        }

        if depth != 0 {
            return Err(self.error("unterminated expression"));
        }
        match current {
            Some((start, end)) => exprs.push(self.input[start..end].to_string()),
            None => return Err(self.error("expected expression")),
        }
        Ok(exprs)
    }

    fn parse_signature_rest(&mut self) -> Result<Signature, ParseError> {
        let params = self.parse_parameters()?;
        let results = self.parse_results()?;
        Ok(Signature { params, results })
    }

    fn parse_results(&mut self) -> Result<Vec<Field>, ParseError> {
        match self.peek_token().copied() {
            Some(Token::LParen) => self.parse_parameters(),
            Some(tok) if starts_type(&tok) => Ok(vec![Field {
                names: Vec::new(),
                ty: self.parse_type()?,
            }]),
            _ => Ok(Vec::new()),
        }
    }

    fn parse_parameters(&mut self) -> Result<Vec<Field>, ParseError> {
        if !self.consume(&Token::LParen) {
            return Err(self.error_with_expected("expected parameter list", "'('"));
        }
        let mut entries = Vec::new();
        while !self.consume(&Token::RParen) {
            entries.push(self.parse_param_entry()?);
            if !self.consume(&Token::Comma) && self.peek_token() != Some(&Token::RParen) {
                return Err(self.error_with_expected("unexpected token in parameter list", "',' or ')'"));
            }
        }
        self.group_params(entries)
    }

    fn parse_param_entry(&mut self) -> Result<ParamEntry, ParseError> {
        if self.peek_token() != Some(&Token::Ident) {
            return Ok(ParamEntry::Type(self.parse_type()?));
        }
        match self.peek_token_at(1).copied() {
            Some(Token::Comma) | Some(Token::RParen) => {
                let name = self.expect_ident()?;
                Ok(ParamEntry::Bare(name))
            }
            Some(Token::Dot) => Ok(ParamEntry::Type(self.parse_type()?)),
            Some(Token::LBracket) => {
                // `x []T` or `x [N]T` names a parameter; `List[T]` is an instantiated type.
                if self.array_param_ahead() {
                    let name = self.expect_ident()?;
                    Ok(ParamEntry::Named(name, self.parse_type()?))
                } else {
                    Ok(ParamEntry::Type(self.parse_type()?))
                }
            }
            Some(Token::Ellipsis) => {
                let name = self.expect_ident()?;
                Ok(ParamEntry::Named(name, self.parse_type()?))
            }
            Some(tok) if starts_type(&tok) => {
                let name = self.expect_ident()?;
                Ok(ParamEntry::Named(name, self.parse_type()?))
            }
            _ => Ok(ParamEntry::Type(self.parse_type()?)),
        }
    }

    // With the cursor on `name [`, decides whether the brackets open an array
    // type: they do when a type follows the matching `]`.
    fn array_param_ahead(&self) -> bool {
        if matches!(
            self.peek_token_at(2),
            Some(Token::RBracket | Token::Int | Token::Ellipsis)
        ) {
            return true;
        }
        let mut depth = 0usize;
        let mut offset = 1;
        while let Some(tok) = self.peek_token_at(offset) {
            match tok {
                Token::LBracket | Token::LParen | Token::LBrace => depth += 1,
                Token::RParen | Token::RBrace => depth = depth.saturating_sub(1),
                Token::RBracket => {
                    depth -= 1;
                    if depth == 0 {
                        return self.peek_token_at(offset + 1).is_some_and(starts_type);
                    }
                }
                Token::Semicolon => return false,
                _ => {}
            }
            offset += 1;
        }
        false
    }

    // Either every entry is named (bare names share the next entry's type) or
    // every entry is a type on its own.
    fn group_params(&self, entries: Vec<ParamEntry>) -> Result<Vec<Field>, ParseError> {
        let any_named = entries.iter().any(|e| matches!(e, ParamEntry::Named(..)));
        if !any_named {
            return Ok(entries
                .into_iter()
                .map(|entry| Field {
                    names: Vec::new(),
                    ty: match entry {
                        ParamEntry::Bare(name) => TypeExpr::Named(name),
                        ParamEntry::Type(ty) | ParamEntry::Named(_, ty) => ty,
                    },
                })
                .collect());
        }

        let mut fields = Vec::new();
        let mut pending = Vec::new();
        for entry in entries {
            match entry {
                ParamEntry::Bare(name) => pending.push(name),
                ParamEntry::Named(name, ty) => {
                    pending.push(name);
                    fields.push(Field {
                        names: std::mem::take(&mut pending),
                        ty,
                    });
                }
                ParamEntry::Type(_) => {
                    return Err(self.error("mixed named and unnamed parameters"));
                }
            }
        }
        if !pending.is_empty() {
            return Err(self.error("mixed named and unnamed parameters"));
        }
        Ok(fields)
    }

    fn parse_type_params(&mut self) -> Result<Vec<Field>, ParseError> {
        if !self.consume(&Token::LBracket) {
            return Err(self.error_with_expected("expected type parameter list", "'['"));
        }
        let mut fields = Vec::new();
        let mut names = Vec::new();
        loop {
            names.push(self.expect_ident()?);
            if self.consume(&Token::Comma) {
                continue;
            }
            let ty = self.parse_constraint()?;
            fields.push(Field {
                names: std::mem::take(&mut names),
                ty,
            });
            if self.consume(&Token::Comma) {
                if self.consume(&Token::RBracket) {
                    break;
                }
                continue;
            }
            if self.consume(&Token::RBracket) {
                break;
            }
            return Err(self.error_with_expected("unexpected token in type parameters", "',' or ']'"));
        }
        Ok(fields)
    }

    fn parse_constraint(&mut self) -> Result<TypeExpr, ParseError> {
        let mut terms = vec![self.parse_constraint_term()?];
        while self.consume(&Token::Pipe) {
            terms.push(self.parse_constraint_term()?);
        }
        if terms.len() == 1 {
            Ok(terms.remove(0))
        } else {
            Ok(TypeExpr::Union(terms))
        }
    }

    fn parse_constraint_term(&mut self) -> Result<TypeExpr, ParseError> {
        if self.consume(&Token::Tilde) {
            Ok(TypeExpr::Tilde(Box::new(self.parse_type()?)))
        } else {
            self.parse_type()
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let Some(tok) = self.peek_token().copied() else {
            return Err(self.error_with_expected("unexpected end of input", "type"));
        };
        match tok {
            Token::Ident => {
                let name = self.expect_ident()?;
                let base = if self.consume(&Token::Dot) {
                    TypeExpr::Qualified {
                        package: name,
                        name: self.expect_ident()?,
                    }
                } else {
                    TypeExpr::Named(name)
                };
                if self.consume(&Token::LBracket) {
                    let mut args = vec![self.parse_type()?];
                    while self.consume(&Token::Comma) {
                        if self.peek_token() == Some(&Token::RBracket) {
                            break;
                        }
                        args.push(self.parse_type()?);
                    }
                    self.expect(&Token::RBracket, "']'")?;
                    return Ok(TypeExpr::Instance {
                        base: Box::new(base),
                        args,
                    });
                }
                Ok(base)
            }
            Token::Star => {
                self.pos += 1;
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            Token::LBracket => {
                self.pos += 1;
                if self.consume(&Token::RBracket) {
                    return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
                }
                let len = self.capture_until(Token::LBracket, Token::RBracket)?;
                Ok(TypeExpr::Array {
                    len,
                    elem: Box::new(self.parse_type()?),
                })
            }
            Token::Map => {
                self.pos += 1;
                self.expect(&Token::LBracket, "'['")?;
                let key = self.parse_type()?;
                self.expect(&Token::RBracket, "']'")?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(self.parse_type()?),
                })
            }
            Token::Chan => {
                self.pos += 1;
                let dir = if self.consume(&Token::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                })
            }
            Token::Arrow => {
                self.pos += 1;
                self.expect(&Token::Chan, "'chan'")?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()?),
                })
            }
            Token::Func => {
                self.pos += 1;
                Ok(TypeExpr::Func(self.parse_signature_rest()?))
            }
            Token::Struct | Token::Interface => {
                let start = self.current_position();
                self.pos += 1;
                if self.peek_token() != Some(&Token::LBrace) {
                    return Err(self.error_with_expected("expected type body", "'{'"));
                }
                self.skip_balanced(Token::LBrace, Token::RBrace)?;
                let text = self.input[start..self.previous_end()].to_string();
                Ok(if tok == Token::Struct {
                    TypeExpr::Struct(text)
                } else {
                    TypeExpr::Interface(text)
                })
            }
            Token::Ellipsis => {
                self.pos += 1;
                Ok(TypeExpr::Variadic(Box::new(self.parse_type()?)))
            }
            Token::LParen => {
                self.pos += 1;
                let inner = self.parse_type()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(TypeExpr::Paren(Box::new(inner)))
            }
            _ => Err(self.error_with_expected("unexpected token", "type")),
        }
    }

    /// Returns the verbatim text up to the matching `close`, consuming it.
    fn capture_until(&mut self, open: Token, close: Token) -> Result<String, ParseError> {
        let start = self.current_position();
        let mut depth = 0usize;
        while let Some(info) = self.next() {
            if info.token == open {
                depth += 1;
            } else if info.token == close {
                if depth == 0 {
                    return Ok(self.input[start..info.position].trim().to_string());
                }
                depth -= 1;
            }
        }
        Err(self.error("unterminated bracket"))
    }

    fn skip_balanced(&mut self, open: Token, close: Token) -> Result<(), ParseError> {
        self.expect(&open, "opening delimiter")?;
        let mut depth = 1usize;
        while let Some(info) = self.next() {
            if info.token == open {
                depth += 1;
            } else if info.token == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
        Err(self.error("unterminated block"))
    }

    /// Finds the comment group ending on the line directly above `start`.
    fn doc_before(&self, start: usize) -> Option<CommentGroup> {
        let last = self.comments.iter().rposition(|c| c.span.end <= start)?;
        let gap = &self.input[self.comments[last].span.end..start];
        if !gap.trim().is_empty() || gap.matches('\n').count() != 1 {
            return None;
        }
        if !self.starts_line(self.comments[last].span.start) {
            return None;
        }

        let mut first = last;
        while first > 0 {
            let prev = &self.comments[first - 1];
            let gap = &self.input[prev.span.end..self.comments[first].span.start];
            if !gap.trim().is_empty() || gap.matches('\n').count() > 1 {
                break;
            }
            if !self.starts_line(prev.span.start) {
                break;
            }
            first -= 1;
        }

        let span = Span {
            start: self.comments[first].span.start,
            end: self.comments[last].span.end,
        };
        Some(CommentGroup {
            text: self.input[span.start..span.end].to_string(),
            span,
        })
    }

    fn starts_line(&self, offset: usize) -> bool {
        self.input[..offset]
            .rsplit('\n')
            .next()
            .map(|prefix| prefix.trim().is_empty())
            .unwrap_or(true)
    }

    fn skip_semicolons(&mut self) {
        while self.consume(&Token::Semicolon) {}
    }

    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        if self.peek_token().is_none() || self.consume(&Token::Semicolon) {
            Ok(())
        } else {
            Err(self.error_with_expected("unexpected token after declaration", "';' or newline"))
        }
    }

    fn expect(&mut self, t: &Token, expected: &str) -> Result<(), ParseError> {
        if self.consume(t) {
            Ok(())
        } else {
            Err(self.error_with_expected("unexpected token", expected))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.peek_token() {
            Some(Token::Ident) => Ok(self.next().map(|t| t.lexeme).unwrap_or_default()),
            _ => Err(self.error_with_expected("expected identifier", "identifier")),
        }
    }

    fn current_position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.position)
            .unwrap_or(self.input.len())
    }

    fn previous_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.end)
            .unwrap_or(0)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn peek_token_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|t| &t.token)
    }

    fn next(&mut self) -> Option<TokenInfo> {
        if self.pos < self.tokens.len() {
            let info = self.tokens[self.pos].clone();
            self.pos += 1;
            Some(info)
        } else {
            None
        }
    }

    fn consume(&mut self, t: &Token) -> bool {
        if self.peek_token() == Some(t) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

fn starts_type(tok: &Token) -> bool {
    matches!(
        tok,
        Token::Ident
            | Token::Star
            | Token::LBracket
            | Token::LParen
            | Token::Func
            | Token::Map
            | Token::Chan
            | Token::Arrow
            | Token::Struct
            | Token::Interface
    )
}
