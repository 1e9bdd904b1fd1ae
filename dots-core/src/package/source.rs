//! Source file prologue scanning
//!
//! Only the part of a file before its first declaration is read: leading
//! comments (for `//go:build` lines), the package clause and the import
//! declarations.

/// What the prologue of a source file declares
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// Name in the package clause
    pub package: String,
    /// Imported package identifiers, in declaration order
    pub imports: Vec<String>,
    /// Expression of the `//go:build` line, if any
    pub build_constraint: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Str(&'a str),
    Punct(char),
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    seen_code: bool,
    build_constraint: Option<String>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            seen_code: false,
            build_constraint: None,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_trivia(&mut self) {
        loop {
            let trimmed = self.rest().trim_start();
            self.pos = self.src.len() - trimmed.len();
            if let Some(comment) = trimmed.strip_prefix("//") {
                let line = comment.split('\n').next().unwrap_or("");
                if !self.seen_code {
                    if let Some(expr) = line.strip_prefix("go:build") {
                        if expr.starts_with([' ', '\t']) && self.build_constraint.is_none() {
                            self.build_constraint = Some(expr.trim().to_string());
                        }
                    }
                }
                self.pos += 2 + line.len();
            } else if let Some(comment) = trimmed.strip_prefix("/*") {
                self.pos += 2 + comment.find("*/").map_or(comment.len(), |end| end + 2);
            } else {
                return;
            }
        }
    }

    fn next(&mut self) -> Option<Token<'a>> {
        self.skip_trivia();
        let rest = self.rest();
        let first = rest.chars().next()?;
        self.seen_code = true;

        if first == '"' || first == '`' {
            let body = &rest[1..];
            let end = if first == '"' {
                find_quote_end(body)
            } else {
                body.find('`')
            };
            let closed = end.is_some();
            let end = end.unwrap_or(body.len());
            self.pos += 1 + end + usize::from(closed);
            return Some(Token::Str(&body[..end]));
        }

        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(rest.len());
        if len > 0 {
            self.pos += len;
            return Some(Token::Word(&rest[..len]));
        }

        self.pos += first.len_utf8();
        Some(Token::Punct(first))
    }
}

fn find_quote_end(body: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Some(i),
            '\n' => return None,
            _ => escaped = false,
        }
    }
    None
}

/// Scan the prologue of a source file
pub fn scan_header(src: &str) -> FileHeader {
    let mut lexer = Lexer::new(src);
    let mut header = FileHeader::default();

    if lexer.next() == Some(Token::Word("package")) {
        if let Some(Token::Word(name)) = lexer.next() {
            header.package = name.to_string();
        }
    }

    while let Some(token) = lexer.next() {
        match token {
            Token::Punct(';') => continue,
            Token::Word("import") => {}
            _ => break,
        }
        match lexer.next() {
            Some(Token::Punct('(')) => loop {
                match lexer.next() {
                    Some(Token::Str(path)) => header.imports.push(path.to_string()),
                    Some(Token::Word(_)) | Some(Token::Punct(';')) => {}
                    _ => break,
                }
            },
            Some(Token::Str(path)) => header.imports.push(path.to_string()),
            Some(Token::Word(_)) => {
                if let Some(Token::Str(path)) = lexer.next() {
                    header.imports.push(path.to_string());
                }
            }
            _ => break,
        }
    }

    header.build_constraint = lexer.build_constraint;
    header
}
