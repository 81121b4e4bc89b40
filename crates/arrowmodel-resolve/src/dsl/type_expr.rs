//! Parser for field type expressions written in annotation syntax.
//!
//! Examples:
//! ```text
//! int
//! Optional[List[str]]
//! Dict[str, float | None]
//! Literal['a', 'b']
//! Annotated[Decimal, max_digits=10, decimal_places=2]
//! ```
//!
//! Names that are neither builtins nor known enums are taken as record
//! references and checked when the schema is built. Generic forms without a
//! mapping (`Deque[int]`, `Tuple[int, str]`, ...) parse to `Opaque` so the
//! resolver can report them with the field path.

use std::collections::BTreeMap;

use thiserror::Error;

use arrowmodel_core::model::{EnumDef, LiteralValue};
use arrowmodel_core::{Constraints, DeclaredType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset} in `{source_text}`")]
pub struct TypeExprError {
    pub offset: usize,
    pub message: String,
    pub source_text: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
    LBracket,
    RBracket,
    Comma,
    Pipe,
    Eq,
}

#[derive(Debug, Clone)]
struct Spanned {
    tok: Tok,
    start: usize,
    end: usize,
}

fn tokenize(src: &str) -> Result<Vec<Spanned>, (usize, String)> {
    let bytes = src.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        let start = i;
        let simple = match c {
            '[' => Some(Tok::LBracket),
            ']' => Some(Tok::RBracket),
            ',' => Some(Tok::Comma),
            '|' => Some(Tok::Pipe),
            '=' => Some(Tok::Eq),
            _ => None,
        };
        if let Some(tok) = simple {
            i += 1;
            out.push(Spanned { tok, start, end: i });
            continue;
        }
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if c == 'b' && matches!(bytes.get(i + 1), Some(b'\'') | Some(b'"')) {
            let (text, next) = quoted(src, i + 1)?;
            i = next;
            out.push(Spanned {
                tok: Tok::Bytes(text.into_bytes()),
                start,
                end: i,
            });
            continue;
        }
        if c == '\'' || c == '"' {
            let (text, next) = quoted(src, i)?;
            i = next;
            out.push(Spanned {
                tok: Tok::Str(text),
                start,
                end: i,
            });
            continue;
        }
        if c.is_ascii_digit() || c == '-' {
            i += 1;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            let text = &src[start..i];
            let tok = if text.contains('.') {
                Tok::Float(text.parse().map_err(|_| (start, format!("bad number '{}'", text)))?)
            } else {
                Tok::Int(text.parse().map_err(|_| (start, format!("bad integer '{}'", text)))?)
            };
            out.push(Spanned { tok, start, end: i });
            continue;
        }
        if c.is_ascii_alphabetic() || c == '_' {
            while i < bytes.len() {
                let ch = bytes[i] as char;
                if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                    i += 1;
                } else {
                    break;
                }
            }
            out.push(Spanned {
                tok: Tok::Ident(src[start..i].to_string()),
                start,
                end: i,
            });
            continue;
        }
        let ch = src[start..].chars().next().unwrap_or(c);
        return Err((start, format!("unexpected character '{}'", ch)));
    }
    Ok(out)
}

/// Read a quoted string starting at the quote character at `open`.
fn quoted(src: &str, open: usize) -> Result<(String, usize), (usize, String)> {
    let quote = src.as_bytes()[open];
    match src[open + 1..].bytes().position(|b| b == quote) {
        Some(len) => Ok((src[open + 1..open + 1 + len].to_string(), open + len + 2)),
        None => Err((open, "unterminated string".to_string())),
    }
}

struct Parser<'s> {
    src: &'s str,
    toks: Vec<Spanned>,
    pos: usize,
    enums: &'s BTreeMap<String, EnumDef>,
    /// Open `[` brackets around the current position.
    depth: usize,
}

/// Deepest bracket nesting a type expression may use.
pub const MAX_NESTING: usize = 64;

/// Parse `src` into a declared type, resolving enum names against `enums`.
pub fn parse_type_expr(
    src: &str,
    enums: &BTreeMap<String, EnumDef>,
) -> Result<DeclaredType, TypeExprError> {
    let wrap = |(offset, message): (usize, String)| TypeExprError {
        offset,
        message,
        source_text: src.to_string(),
    };
    let toks = tokenize(src).map_err(wrap)?;
    let mut p = Parser {
        src,
        toks,
        pos: 0,
        enums,
        depth: 0,
    };
    let ty = p.union().map_err(wrap)?;
    if let Some(extra) = p.toks.get(p.pos) {
        return Err(wrap((extra.start, "unexpected trailing input".to_string())));
    }
    Ok(ty)
}

type PResult<T> = Result<T, (usize, String)>;

/// A union member; `None` only has meaning inside a union.
enum Member {
    None,
    Type(DeclaredType),
}

impl<'s> Parser<'s> {
    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos).map(|s| &s.tok)
    }

    fn offset(&self) -> usize {
        self.toks.get(self.pos).map(|s| s.start).unwrap_or(self.src.len())
    }

    fn last_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.toks.get(i))
            .map(|s| s.end)
            .unwrap_or(0)
    }

    fn eat(&mut self, tok: &Tok) -> bool {
        if self.peek() == Some(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: &Tok, what: &str) -> PResult<()> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err((self.offset(), format!("expected {}", what)))
        }
    }

    fn ident(&mut self) -> PResult<(String, usize)> {
        match self.toks.get(self.pos) {
            Some(Spanned {
                tok: Tok::Ident(name),
                start,
                ..
            }) => {
                let out = (name.clone(), *start);
                self.pos += 1;
                Ok(out)
            }
            _ => Err((self.offset(), "expected a type name".to_string())),
        }
    }

    fn union(&mut self) -> PResult<DeclaredType> {
        let start = self.offset();
        let mut members = vec![self.member()?];
        while self.eat(&Tok::Pipe) {
            members.push(self.member()?);
        }
        let text = self.src[start..self.last_end()].trim().to_string();
        Ok(fold_union(members, text))
    }

    fn member(&mut self) -> PResult<Member> {
        let (name, start) = self.ident()?;
        if name == "None" {
            return Ok(Member::None);
        }
        let bracket = self.offset();
        if !self.eat(&Tok::LBracket) {
            return Ok(Member::Type(self.named(&name)));
        }
        if self.depth >= MAX_NESTING {
            return Err((bracket, "type expression nested too deeply".to_string()));
        }
        self.depth += 1;
        let member = self.generic(&name, start);
        self.depth -= 1;
        member
    }

    /// Arguments of `name[...]`, from just after the opening bracket.
    fn generic(&mut self, name: &str, start: usize) -> PResult<Member> {
        let ty = match name {
            "Optional" => {
                let inner = self.union()?;
                DeclaredType::optional(inner)
            }
            "Union" => {
                let mut members = vec![self.member()?];
                while self.eat(&Tok::Comma) {
                    members.push(self.member()?);
                }
                let text = self.src[start..self.offset()].to_string() + "]";
                fold_union(members, text)
            }
            "List" | "list" => DeclaredType::list(self.union()?),
            "Dict" | "dict" => {
                let key = self.union()?;
                self.expect(&Tok::Comma, "',' between key and value types")?;
                let value = self.union()?;
                DeclaredType::map(key, value)
            }
            "Literal" => {
                let mut values = vec![self.literal()?];
                while self.eat(&Tok::Comma) {
                    values.push(self.literal()?);
                }
                DeclaredType::Literal(values)
            }
            "Annotated" => {
                let inner = self.union()?;
                let mut constraints = Constraints::default();
                while self.eat(&Tok::Comma) {
                    self.annotation(&mut constraints)?;
                }
                DeclaredType::constrained(inner, constraints)
            }
            _ => {
                self.skip_args()?;
                self.expect(&Tok::RBracket, "']'")?;
                let text = self.src[start..self.last_end()].to_string();
                return Ok(Member::Type(DeclaredType::Opaque(text)));
            }
        };
        self.expect(&Tok::RBracket, "']'")?;
        Ok(Member::Type(ty))
    }

    fn named(&self, name: &str) -> DeclaredType {
        match name {
            "str" => DeclaredType::Str,
            "bool" => DeclaredType::Bool,
            "int" => DeclaredType::Int,
            "float" => DeclaredType::Float,
            "bytes" => DeclaredType::Bytes,
            "Decimal" | "decimal" => DeclaredType::Decimal,
            "date" => DeclaredType::Date,
            "time" => DeclaredType::Time,
            "datetime" => DeclaredType::Datetime,
            "NaiveDatetime" => DeclaredType::NaiveDatetime,
            "AwareDatetime" => DeclaredType::AwareDatetime,
            "UUID" | "uuid" => DeclaredType::Uuid,
            other => match self.enums.get(other) {
                Some(def) => DeclaredType::Enum(def.clone()),
                None => DeclaredType::record(other),
            },
        }
    }

    fn literal(&mut self) -> PResult<LiteralValue> {
        let at = self.offset();
        let value = match self.peek() {
            Some(Tok::Str(s)) => LiteralValue::Str(s.clone()),
            Some(Tok::Bytes(b)) => LiteralValue::Bytes(b.clone()),
            Some(Tok::Int(i)) => LiteralValue::Int(*i),
            Some(Tok::Float(x)) => LiteralValue::Float(*x),
            Some(Tok::Ident(b)) if b == "True" || b == "False" => LiteralValue::Bool(b == "True"),
            _ => return Err((at, "expected a literal value".to_string())),
        };
        self.pos += 1;
        Ok(value)
    }

    fn annotation(&mut self, constraints: &mut Constraints) -> PResult<()> {
        let (key, at) = self.ident()?;
        self.expect(&Tok::Eq, "'=' after annotation name")?;
        let value = match self.literal()? {
            LiteralValue::Int(i) => i,
            other => return Err((at, format!("annotation {} must be an integer, got {}", key, other))),
        };
        let narrow = |what: &str| (at, format!("annotation {} out of range: {}", what, value));
        match key.as_str() {
            "ge" => constraints.ge = Some(value),
            "gt" => constraints.gt = Some(value),
            "le" => constraints.le = Some(value),
            "lt" => constraints.lt = Some(value),
            "max_digits" => {
                constraints.max_digits = Some(u8::try_from(value).map_err(|_| narrow("max_digits"))?)
            }
            "decimal_places" => {
                constraints.decimal_places =
                    Some(i8::try_from(value).map_err(|_| narrow("decimal_places"))?)
            }
            other => return Err((at, format!("unknown annotation '{}'", other))),
        }
        Ok(())
    }

    /// Consume the arguments of a generic with no mapping rule.
    fn skip_args(&mut self) -> PResult<()> {
        let mut depth = 0usize;
        while let Some(tok) = self.peek() {
            match tok {
                Tok::LBracket => depth += 1,
                Tok::RBracket if depth == 0 => return Ok(()),
                Tok::RBracket => depth -= 1,
                _ => {}
            }
            self.pos += 1;
        }
        Err((self.offset(), "expected ']'".to_string()))
    }
}

fn fold_union(members: Vec<Member>, text: String) -> DeclaredType {
    let mut has_none = false;
    let mut types = Vec::new();
    for m in members {
        match m {
            Member::None => has_none = true,
            Member::Type(t) => types.push(t),
        }
    }
    match (types.len(), has_none) {
        (1, false) => types.remove(0),
        (1, true) => DeclaredType::optional(types.remove(0)),
        _ => DeclaredType::Opaque(text),
    }
}
