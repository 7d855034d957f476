//! Code fragments with typed placeholders.
//!
//! A [`CodeBlock`] holds a format string scanned for `$`-placeholders plus
//! the arguments bound to them:
//!
//! - `$L` emits a literal: a plain value or another [`CodeBlock`], inlined
//!   recursively with import propagation.
//! - `$S` emits the value as a double-quoted string literal.
//! - `$T` emits a type reference by simple name and records the qualified
//!   name as a required import.
//! - `$]` ends a statement with the formatting policy's separator.
//! - `$$` emits a dollar sign.
//!
//! Blocks are not validated against any grammar; they are written verbatim
//! through an [`IndentingWriter`](crate::io::IndentingWriter).

use miette::Diagnostic;
use thiserror::Error;

use crate::{ClassName, io::IndentingWriter, unqualified};

/// Per-language formatting policy applied when writing a [`CodeBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingOptions {
    statement_separator: &'static str,
}

impl FormattingOptions {
    /// Java ends statements with a semicolon.
    pub const JAVA: Self = Self {
        statement_separator: ";",
    };
    /// Kotlin statements end at the line break.
    pub const KOTLIN: Self = Self {
        statement_separator: "",
    };
    /// Groovy statements end at the line break.
    pub const GROOVY: Self = Self {
        statement_separator: "",
    };

    pub fn statement_separator(&self) -> &'static str {
        self.statement_separator
    }
}

/// An argument bound to a `$L`, `$S`, or `$T` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeArg {
    /// A plain textual value.
    Value(String),
    /// A structured type reference.
    Type(ClassName),
    /// A nested code block.
    Block(CodeBlock),
}

impl From<&str> for CodeArg {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for CodeArg {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<ClassName> for CodeArg {
    fn from(class_name: ClassName) -> Self {
        Self::Type(class_name)
    }
}

impl From<CodeBlock> for CodeArg {
    fn from(block: CodeBlock) -> Self {
        Self::Block(block)
    }
}

/// Raised while assembling a [`CodeBlock`]; always fatal to the caller.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum CodeBlockError {
    #[error("format string must not end with '$': '{format}'")]
    #[diagnostic(code(sprout::malformed_code_block))]
    TrailingDollar { format: String },

    #[error("unsupported placeholder '${placeholder}' in '{format}'")]
    #[diagnostic(
        code(sprout::unsupported_placeholder),
        help("supported placeholders are $L, $S, $T, $] and $$")
    )]
    UnsupportedPlaceholder { placeholder: char, format: String },

    #[error("argument mismatch for '{format}': expected {expected} argument(s), got {got}")]
    #[diagnostic(code(sprout::argument_mismatch))]
    ArgumentMismatch {
        format: String,
        expected: usize,
        got: usize,
    },

    #[error("a nested code block cannot be bound to placeholder '${placeholder}' in '{format}'")]
    #[diagnostic(code(sprout::invalid_block_argument))]
    InvalidBlockArgument { placeholder: char, format: String },
}

#[derive(Debug, Clone, PartialEq)]
enum CodePart {
    Text(String),
    Literal(String),
    Nested(Box<CodeBlock>),
    StringLiteral(String),
    TypeReference(String),
    StatementSeparator,
}

/// A fragment of code: declarations, statements, or bare expressions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeBlock {
    parts: Vec<CodePart>,
    imports: Vec<String>,
}

impl CodeBlock {
    /// Create a block from a format string and its arguments.
    pub fn of(format: &str, args: &[CodeArg]) -> Result<Self, CodeBlockError> {
        Ok(Self::builder().add(format, args)?.build())
    }

    /// Create a single-statement block: the format string followed by `$]`.
    pub fn of_statement(format: &str, args: &[CodeArg]) -> Result<Self, CodeBlockError> {
        Ok(Self::builder().add_statement(format, args)?.build())
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Qualified names required by `$T` references, in first-use order,
    /// including those of nested blocks.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Write this block with the given formatting policy.
    pub fn write(&self, writer: &mut IndentingWriter, options: FormattingOptions) {
        for part in &self.parts {
            match part {
                CodePart::Text(text) => writer.print(text),
                CodePart::Literal(value) => writer.print(value),
                CodePart::Nested(block) => block.write(writer, options),
                CodePart::StringLiteral(value) => writer.print(&quote(value)),
                CodePart::TypeReference(name) => writer.print(name),
                CodePart::StatementSeparator => writer.println(options.statement_separator()),
            }
        }
    }
}

/// Assembles a [`CodeBlock`] out of several format strings and blocks.
#[derive(Debug, Default)]
pub struct Builder {
    parts: Vec<CodePart>,
    imports: Vec<String>,
}

enum Token {
    Text(String),
    Placeholder(char),
}

impl Builder {
    /// Append code given as a format string with arguments.
    pub fn add(mut self, format: &str, args: &[CodeArg]) -> Result<Self, CodeBlockError> {
        let tokens = scan(format)?;
        let expected = tokens
            .iter()
            .filter(|token| matches!(token, Token::Placeholder('L' | 'S' | 'T')))
            .count();
        if expected != args.len() {
            return Err(CodeBlockError::ArgumentMismatch {
                format: format.to_string(),
                expected,
                got: args.len(),
            });
        }
        let mut args = args.iter();
        for token in tokens {
            match token {
                Token::Text(text) => self.parts.push(CodePart::Text(text)),
                Token::Placeholder('$') => self.parts.push(CodePart::Text("$".to_string())),
                Token::Placeholder(']') => self.parts.push(CodePart::StatementSeparator),
                Token::Placeholder(placeholder) => {
                    // Counted above, so the next argument always exists.
                    let arg = args.next().expect("argument count already checked");
                    self.bind(format, placeholder, arg)?;
                }
            }
        }
        Ok(self)
    }

    /// Append an already-built block, without any separator.
    pub fn add_block(mut self, block: CodeBlock) -> Self {
        self.imports.extend(block.imports.iter().cloned());
        self.parts.extend(block.parts);
        self
    }

    /// Append code and close it as a statement.
    pub fn add_statement(self, format: &str, args: &[CodeArg]) -> Result<Self, CodeBlockError> {
        let mut builder = self.add(format, args)?;
        builder.parts.push(CodePart::StatementSeparator);
        Ok(builder)
    }

    pub fn build(self) -> CodeBlock {
        CodeBlock {
            parts: self.parts,
            imports: self.imports,
        }
    }

    fn bind(
        &mut self,
        format: &str,
        placeholder: char,
        arg: &CodeArg,
    ) -> Result<(), CodeBlockError> {
        match (placeholder, arg) {
            ('L', CodeArg::Value(value)) => self.parts.push(CodePart::Literal(value.clone())),
            ('L', CodeArg::Type(class_name)) => {
                self.parts.push(CodePart::Literal(class_name.canonical_name()));
            }
            ('L', CodeArg::Block(block)) => {
                self.imports.extend(block.imports.iter().cloned());
                self.parts.push(CodePart::Nested(Box::new(block.clone())));
            }
            ('S', CodeArg::Value(value)) => {
                self.parts.push(CodePart::StringLiteral(value.clone()));
            }
            ('S', CodeArg::Type(class_name)) => {
                self.parts
                    .push(CodePart::StringLiteral(class_name.canonical_name()));
            }
            ('T', CodeArg::Type(class_name)) => {
                self.imports.push(class_name.canonical_name());
                self.parts
                    .push(CodePart::TypeReference(class_name.simple_name().to_string()));
            }
            ('T', CodeArg::Value(name)) => {
                self.imports.push(name.clone());
                self.parts
                    .push(CodePart::TypeReference(unqualified(name).to_string()));
            }
            ('S' | 'T', CodeArg::Block(_)) => {
                return Err(CodeBlockError::InvalidBlockArgument {
                    placeholder,
                    format: format.to_string(),
                });
            }
            _ => unreachable!("scan only yields L, S and T argument placeholders"),
        }
        Ok(())
    }
}

fn scan(format: &str) -> Result<Vec<Token>, CodeBlockError> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '$' {
            text.push(c);
            continue;
        }
        let Some(placeholder) = chars.next() else {
            return Err(CodeBlockError::TrailingDollar {
                format: format.to_string(),
            });
        };
        match placeholder {
            '$' | ']' | 'L' | 'S' | 'T' => {
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(Token::Placeholder(placeholder));
            }
            other => {
                return Err(CodeBlockError::UnsupportedPlaceholder {
                    placeholder: other,
                    format: format.to_string(),
                });
            }
        }
    }
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    Ok(tokens)
}

/// Wrap in double quotes, escaping embedded double quotes; an escaped single
/// quote is normalized to a bare one.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'\'') => {}
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
