//! Textual form of union types.
//!
//! Grammar:
//!
//! ```text
//! union  := atomic ('|' atomic)*
//! atomic := keyword | '$' ident | name ('<' union (',' union)* '>')?
//! ```
//!
//! Display and parsing agree, so `int|array<string, Foo>|null` prints back
//! exactly as written.

use std::fmt;
use std::str::FromStr;

use crate::types::{AtomicType, GenericType, ScalarKind, UnionType};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    #[error("unexpected end of type `{input}`")]
    UnexpectedEnd { input: String },
    #[error("unexpected `{found}` at offset {offset} in type `{input}`")]
    UnexpectedChar {
        input: String,
        offset: usize,
        found: char,
    },
    #[error("generic `{base}` has no type parameters")]
    EmptyGeneric { base: String },
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for AtomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomicType::Mixed => f.write_str("mixed"),
            AtomicType::Null => f.write_str("null"),
            AtomicType::Void => f.write_str("void"),
            AtomicType::Scalar(kind) => write!(f, "{kind}"),
            AtomicType::ArrayLike => f.write_str("array"),
            AtomicType::Object(name) => f.write_str(name),
            AtomicType::Generic(generic) => write!(f, "{generic}"),
            AtomicType::SelfPlaceholder => f.write_str("self"),
            AtomicType::StaticPlaceholder => f.write_str("static"),
            AtomicType::ParentPlaceholder => f.write_str("parent"),
            AtomicType::TypeVariable(name) => write!(f, "${name}"),
        }
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<", self.base)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(">")
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, atomic) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{atomic}")?;
        }
        Ok(())
    }
}

impl FromStr for UnionType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeParser { input: s, pos: 0 };
        parser.skip_whitespace();
        if parser.at_end() {
            return Ok(UnionType::empty());
        }
        let union = parser.parse_union()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(union),
            Some(found) => Err(parser.unexpected(found)),
        }
    }
}

impl UnionType {
    /// Parse the textual form.
    pub fn parse(source: &str) -> Result<Self, TypeParseError> {
        source.parse()
    }
}

struct TypeParser<'s> {
    input: &'s str,
    pos: usize,
}

impl TypeParser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump(c);
        }
    }

    fn unexpected(&self, found: char) -> TypeParseError {
        TypeParseError::UnexpectedChar {
            input: self.input.to_string(),
            offset: self.pos,
            found,
        }
    }

    fn unexpected_end(&self) -> TypeParseError {
        TypeParseError::UnexpectedEnd {
            input: self.input.to_string(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump(c);
                Ok(())
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.unexpected_end()),
        }
    }

    fn parse_union(&mut self) -> Result<UnionType, TypeParseError> {
        let mut union = UnionType::empty();
        loop {
            union.insert(self.parse_atomic()?);
            self.skip_whitespace();
            match self.peek() {
                Some('|') => self.bump('|'),
                _ => return Ok(union),
            }
        }
    }

    fn parse_name(&mut self) -> &str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_' || c == '\\') {
                break;
            }
            self.bump(c);
        }
        &self.input[start..self.pos]
    }

    fn parse_atomic(&mut self) -> Result<AtomicType, TypeParseError> {
        self.skip_whitespace();
        let variable = match self.peek() {
            Some('$') => {
                self.bump('$');
                true
            }
            Some(_) => false,
            None => return Err(self.unexpected_end()),
        };
        let name = self.parse_name().to_string();
        if name.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => self.unexpected_end(),
            });
        }
        if variable {
            return Ok(if name == "this" {
                AtomicType::StaticPlaceholder
            } else {
                AtomicType::TypeVariable(name)
            });
        }

        self.skip_whitespace();
        if self.peek() == Some('<') {
            self.bump('<');
            let mut params = Vec::new();
            loop {
                self.skip_whitespace();
                if self.peek() == Some('>') && params.is_empty() {
                    return Err(TypeParseError::EmptyGeneric { base: name });
                }
                params.push(self.parse_union()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => self.bump(','),
                    _ => break,
                }
            }
            self.expect('>')?;
            let base = if name.eq_ignore_ascii_case("array") {
                "array".to_string()
            } else {
                name
            };
            return Ok(AtomicType::Generic(GenericType::new(base, params)));
        }

        Ok(keyword_type(&name).unwrap_or(AtomicType::Object(name)))
    }
}

fn keyword_type(name: &str) -> Option<AtomicType> {
    let atomic = match name.to_ascii_lowercase().as_str() {
        "mixed" => AtomicType::Mixed,
        "null" => AtomicType::Null,
        "void" => AtomicType::Void,
        "int" | "integer" => AtomicType::Scalar(ScalarKind::Int),
        "float" | "double" => AtomicType::Scalar(ScalarKind::Float),
        "string" => AtomicType::Scalar(ScalarKind::String),
        "bool" | "boolean" | "true" | "false" => AtomicType::Scalar(ScalarKind::Bool),
        "array" => AtomicType::ArrayLike,
        "self" => AtomicType::SelfPlaceholder,
        "static" => AtomicType::StaticPlaceholder,
        "parent" => AtomicType::ParentPlaceholder,
        _ => return None,
    };
    Some(atomic)
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod format_tests;
