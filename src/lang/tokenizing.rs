use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error::{self, ErrorKind, ScriptError},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs::{metadata, read_to_string},
};

/// A numeric literal is either a 32-bit integer or a 32-bit floating point value.
#[derive(Clone, Copy, PartialEq)]
pub enum NumberType {
    /// We're holding an integer value.
    Int(i32),

    /// We're holding a floating point value.
    Float(f32),
}

/// Print the value of the held number.
impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NumberType::Int(num) => write!(f, "{}", num),
            NumberType::Float(num) => write!(f, "{}", num),
        }
    }
}

/// Print the value of the held number as well as an indicator of which variant we're holding for
/// debugging purposes.
impl Debug for NumberType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NumberType::Int(num) => write!(f, "{} i", num),
            NumberType::Float(num) => write!(f, "{} f", num),
        }
    }
}

/// A token is a maximal run of non-whitespace characters.  It doesn't own its text, it records
/// where in the source the text starts and how many bytes long it is.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    location: SourceLocation,
    length: usize,
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}+{}", self.location, self.length)
    }
}

impl Token {
    pub fn new(location: SourceLocation, length: usize) -> Token {
        Token { location, length }
    }

    /// Get the token's location in the source text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Byte offset of the first character of the token.
    pub fn offset(&self) -> usize {
        self.location.offset()
    }

    /// Length of the token in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Slice the token's text out of the source it was produced from.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.offset()..self.offset() + self.length]
    }
}

/// Check if the given character is considered whitespace.
fn is_whitespace(next: &char) -> bool {
    *next == ' ' || *next == '\t' || *next == '\r' || *next == '\n'
}

/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Consume characters until we hit whitespace or the end of the buffer.  Returns where the run
/// started and its length in bytes.
fn process_until_whitespace(buffer: &mut SourceBuffer) -> (SourceLocation, usize) {
    let location = buffer.location().clone();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
    }

    let length = buffer.location().offset() - location.offset();

    (location, length)
}

/// Does it look like we're dealing with a numeric literal?  Either the first character is a digit
/// or it's a minus sign directly followed by a digit.
pub fn is_number(text: &str) -> bool {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) if first.is_ascii_digit() => true,
        Some('-') => matches!(chars.next(), Some(second) if second.is_ascii_digit()),
        _ => false,
    }
}

/// Convert text that passed `is_number` into a literal.  A `.` anywhere after the first character
/// makes it a float, otherwise it's a signed decimal integer.  Returns None if the text doesn't
/// fit the chosen representation.
pub fn to_numeric(text: &str) -> Option<NumberType> {
    if text[1..].contains('.') {
        text.parse::<f32>().ok().map(NumberType::Float)
    } else {
        text.parse::<i32>().ok().map(NumberType::Int)
    }
}

/// Tokenize the source code from a string.  Lexing itself can't fail, but the signature matches the
/// rest of the pipeline.
pub fn tokenize_from_source(path: &str, source: &str) -> error::Result<TokenList> {
    let mut buffer = SourceBuffer::new(path, source);
    let mut token_list = TokenList::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            skip_whitespace(&mut buffer);
            continue;
        }

        let (location, length) = process_until_whitespace(&mut buffer);
        token_list.push(Token::new(location, length));
    }

    Ok(token_list)
}

/// Load the code from a file and then tokenize it.  The file must be strictly smaller than
/// `max_bytes`.  The source text is returned along with the tokens because tokens only hold spans.
pub fn tokenize_from_file(path: &str, max_bytes: usize) -> error::Result<(String, TokenList)> {
    let size = metadata(path)
        .map_err(|err| {
            ScriptError::new(ErrorKind::Io(format!("Could not open {}: {}", path, err)), None)
        })?
        .len() as usize;

    if size >= max_bytes {
        return ScriptError::new_as_result(
            ErrorKind::SourceTooLarge { size, limit: max_bytes },
            Some(SourceLocation::new_from_path(path)),
        );
    }

    let source = read_to_string(path).map_err(|err| {
        ScriptError::new(ErrorKind::Io(format!("Could not read {}: {}", path, err)), None)
    })?;

    let tokens = tokenize_from_source(path, &source)?;

    Ok((source, tokens))
}
