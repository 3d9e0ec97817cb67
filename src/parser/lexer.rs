use super::token::Token;

/// Splits a pattern into tokens, one per call to [`Lexer::advance`].
///
/// Only the current token is kept, there is no lookahead.
pub(crate) struct Lexer<'a> {
    pattern: &'a [u8],
    index: usize,
    offset: usize,
    token: Token,
    current: u8,
}

impl<'a> Lexer<'a> {
    pub fn new(pattern: &'a [u8]) -> Self {
        Lexer {
            pattern,
            index: 0,
            offset: 0,
            token: Token::Eof,
            current: b'\0',
        }
    }

    pub fn advance(&mut self) {
        self.offset = self.index;

        let Some(&byte) = self.pattern.get(self.index) else {
            self.token = Token::Eof;
            self.current = b'\0';
            return;
        };
        self.index += 1;

        if byte == b'\\' {
            self.escape();
        } else {
            self.current = byte;
            self.token = Token::from_byte(byte);
        }
    }

    fn escape(&mut self) {
        match self.pattern.get(self.index) {
            Some(&byte) => {
                self.index += 1;
                self.current = byte;
                self.token = match Token::is_escape_class(byte) {
                    true => Token::EscapeChar,
                    false => Token::SingleChar,
                };
            }
            None => {
                // trailing backslash
                self.current = b'\\';
                self.token = Token::SingleChar;
            }
        }
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    /// Offset in the pattern where the current token begins.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is(&self, token: Token) -> bool {
        self.token == token
    }
}
