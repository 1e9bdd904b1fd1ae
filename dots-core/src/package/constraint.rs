//! Build constraint evaluation
//!
//! Decides whether a package file belongs to the build, based on its
//! `_GOOS`/`_GOARCH` file name suffix and its `//go:build` expression.

use crate::config::{BuildContext, KNOWN_GOARCH, KNOWN_GOOS, UNIX_GOOS};
use std::fmt;

/// Parsed `//go:build` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single build tag
    Tag(String),
    /// Negation
    Not(Box<Expr>),
    /// Conjunction
    And(Box<Expr>, Box<Expr>),
    /// Disjunction
    Or(Box<Expr>, Box<Expr>),
}

/// Malformed constraint expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Byte offset into the expression
    pub position: usize,
    /// What was expected there
    pub message: &'static str,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.position)
    }
}

impl std::error::Error for SyntaxError {}

impl Expr {
    /// Parse the text following `//go:build`
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        let mut parser = Parser { text, pos: 0 };
        let expr = parser.or()?;
        parser.skip_space();
        if parser.pos != text.len() {
            return Err(parser.error("unexpected token"));
        }
        Ok(expr)
    }

    /// Evaluate against a tag predicate
    pub fn eval(&self, has_tag: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Expr::Tag(tag) => has_tag(tag),
            Expr::Not(inner) => !inner.eval(has_tag),
            Expr::And(left, right) => left.eval(has_tag) && right.eval(has_tag),
            Expr::Or(left, right) => left.eval(has_tag) || right.eval(has_tag),
        }
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn skip_space(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_space();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn error(&self, message: &'static str) -> SyntaxError {
        SyntaxError {
            position: self.pos,
            message,
        }
    }

    fn or(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.and()?;
        while self.eat("||") {
            let right = self.and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.not()?;
        while self.eat("&&") {
            let right = self.not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn not(&mut self) -> Result<Expr, SyntaxError> {
        if self.eat("!") {
            return Ok(Expr::Not(Box::new(self.not()?)));
        }
        if self.eat("(") {
            let inner = self.or()?;
            if !self.eat(")") {
                return Err(self.error("missing )"));
            }
            return Ok(inner);
        }
        self.tag()
    }

    fn tag(&mut self) -> Result<Expr, SyntaxError> {
        self.skip_space();
        let len = self
            .rest()
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(self.error("expected build tag"));
        }
        let tag = self.rest()[..len].to_string();
        self.pos += len;
        Ok(Expr::Tag(tag))
    }
}

impl BuildContext {
    /// Whether a single build tag is satisfied
    pub fn has_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch {
            return true;
        }
        match tag {
            "gc" => true,
            "cgo" => self.cgo_enabled,
            "unix" => UNIX_GOOS.contains(&self.goos.as_str()),
            "linux" => self.goos == "android",
            "darwin" => self.goos == "ios",
            "solaris" => self.goos == "illumos",
            _ => is_release_tag(tag) || self.tags.iter().any(|t| t == tag),
        }
    }

    /// Whether a `//go:build` expression holds; malformed expressions never hold
    pub fn matches_expr(&self, text: &str) -> bool {
        match Expr::parse(text) {
            Ok(expr) => expr.eval(&|tag| self.has_tag(tag)),
            Err(err) => {
                log::debug!("ignoring malformed build constraint {text:?}: {err}");
                false
            }
        }
    }

    /// Whether a file name's `_GOOS`, `_GOARCH` or `_GOOS_GOARCH` suffix matches
    ///
    /// The part before the first underscore is never a constraint, so
    /// `linux.go` builds everywhere while `x_linux.go` only builds on Linux.
    pub fn matches_file_name(&self, name: &str) -> bool {
        let stem = name.strip_suffix(".go").unwrap_or(name);
        let stem = stem.strip_suffix("_test").unwrap_or(stem);
        let Some(first) = stem.find('_') else {
            return true;
        };
        let parts: Vec<&str> = stem[first..].split('_').collect();
        let n = parts.len();
        if n >= 2 && KNOWN_GOOS.contains(&parts[n - 2]) && KNOWN_GOARCH.contains(&parts[n - 1]) {
            return self.has_tag(parts[n - 2]) && self.has_tag(parts[n - 1]);
        }
        let last = parts[n - 1];
        if KNOWN_GOOS.contains(&last) || KNOWN_GOARCH.contains(&last) {
            return self.has_tag(last);
        }
        true
    }
}

/// Every `go1.N` release tag is treated as satisfied
fn is_release_tag(tag: &str) -> bool {
    tag.strip_prefix("go1.")
        .is_some_and(|minor| !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()))
}
