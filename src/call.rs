//! Parsing of table-function invocations such as `long_sequence(10)`.
//!
//! Only constant arguments are supported: every argument must already be a
//! literal, which is exactly what table-function factories consume.
//!
//! ```text
//! call    := ident '(' [literal (',' literal)*] ')' [';']
//! literal := ['+'|'-'] digits ['.' digits]
//!          | '\'' chars '\''            ('' escapes a quote)
//!          | true | false | null
//! ```
//!
//! `null` is typed as a `LONG` so it can reach integer parameters.
//!
//! Positions are byte offsets into the input and are carried into the
//! resulting [`Constant`]s so factories can report where an argument was.

use cursor_core::{ColumnType, Constant, Function, Value};

/// Error type for call parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// Nothing to parse
    #[error("Empty query")]
    Empty,

    /// A function name was expected
    #[error("Expected function name at position {position}")]
    ExpectedIdentifier { position: usize },

    /// A specific character was expected
    #[error("Expected '{expected}' at position {position}")]
    ExpectedChar { expected: char, position: usize },

    /// An argument was expected
    #[error("Expected a literal argument at position {position}")]
    ExpectedLiteral { position: usize },

    /// String literal without a closing quote
    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    /// Numeric literal that does not fit
    #[error("Invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },

    /// Input continues after the call
    #[error("Unexpected input at position {position}")]
    TrailingInput { position: usize },
}

/// A parsed invocation with constant arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Function name as written
    pub name: String,
    /// Byte offset of the function name
    pub position: usize,
    /// Constant arguments
    pub args: Vec<Constant>,
}

impl FunctionCall {
    /// Parse `name(arg, ...)`.
    pub fn parse(input: &str) -> Result<Self, CallError> {
        if input.trim().is_empty() {
            return Err(CallError::Empty);
        }

        let mut parser = Parser { input, pos: 0 };
        let call = parser.call()?;

        parser.skip_whitespace();
        if parser.peek() == Some(';') {
            parser.pos += 1;
            parser.skip_whitespace();
        }
        if parser.pos < input.len() {
            return Err(CallError::TrailingInput {
                position: parser.pos,
            });
        }
        Ok(call)
    }

    /// Argument types, in order.
    pub fn arg_types(&self) -> Vec<ColumnType> {
        self.args.iter().map(Function::return_type).collect()
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), CallError> {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(CallError::ExpectedChar {
                expected,
                position: self.pos,
            })
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.input[start..self.pos]
    }

    fn call(&mut self) -> Result<FunctionCall, CallError> {
        self.skip_whitespace();
        let position = self.pos;
        let name = self
            .take_while(|c| c.is_ascii_alphanumeric() || c == '_')
            .to_string();
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(CallError::ExpectedIdentifier { position });
        }

        self.expect('(')?;
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.pos += 1;
        } else {
            loop {
                args.push(self.literal()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some(')') => {
                        self.pos += 1;
                        break;
                    }
                    _ => {
                        return Err(CallError::ExpectedChar {
                            expected: ')',
                            position: self.pos,
                        })
                    }
                }
            }
        }

        Ok(FunctionCall {
            name,
            position,
            args,
        })
    }

    fn literal(&mut self) -> Result<Constant, CallError> {
        self.skip_whitespace();
        let position = self.pos;
        match self.peek() {
            Some('\'') => self.string(position),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.number(position)
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                match word.to_ascii_lowercase().as_str() {
                    "true" => Ok(Constant::boolean(true, position)),
                    "false" => Ok(Constant::boolean(false, position)),
                    "null" => Ok(Constant::typed(ColumnType::Long, Value::Null, position)),
                    _ => Err(CallError::ExpectedLiteral { position }),
                }
            }
            _ => Err(CallError::ExpectedLiteral { position }),
        }
    }

    fn string(&mut self, position: usize) -> Result<Constant, CallError> {
        // Opening quote
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(CallError::UnterminatedString { position }),
                Some('\'') => {
                    self.pos += 1;
                    if self.peek() == Some('\'') {
                        value.push('\'');
                        self.pos += 1;
                    } else {
                        return Ok(Constant::string(value, position));
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    fn number(&mut self, position: usize) -> Result<Constant, CallError> {
        let sign_len = match self.peek() {
            Some('-') | Some('+') => 1,
            _ => 0,
        };
        self.pos += sign_len;
        self.take_while(|c| c.is_ascii_digit() || c == '.');
        let text = &self.input[position..self.pos];

        let invalid = || CallError::InvalidNumber {
            text: text.to_string(),
            position,
        };

        if text.contains('.') {
            let value: f64 = text.parse().map_err(|_| invalid())?;
            return Ok(Constant::double(value, position));
        }

        let value: i64 = text.parse().map_err(|_| invalid())?;
        Ok(match i32::try_from(value) {
            Ok(small) => Constant::int(small, position),
            Err(_) => Constant::long(value, position),
        })
    }
}
