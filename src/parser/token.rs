#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Token {
    Eof,
    AnyChar,      // '.'
    Positive,     // '+'
    Kleene,       // '*'
    Or,           // '|'
    Question,     // '?'
    LeftParen,    // '('
    RightParen,   // ')'
    LeftBracket,  // '['
    RightBracket, // ']'
    LeftBrace,    // '{'
    RightBrace,   // '}'
    Caret,        // '^'
    Dollar,       // '$'
    Dash,         // '-'
    SingleChar,
    EscapeChar, // \d \D \w \W
}

static SYMBOLS: [Token; 256] = symbol_table();

const fn symbol_table() -> [Token; 256] {
    let mut table = [Token::SingleChar; 256];
    table[b'.' as usize] = Token::AnyChar;
    table[b'^' as usize] = Token::Caret;
    table[b'$' as usize] = Token::Dollar;
    table[b'(' as usize] = Token::LeftParen;
    table[b')' as usize] = Token::RightParen;
    table[b'[' as usize] = Token::LeftBracket;
    table[b']' as usize] = Token::RightBracket;
    table[b'{' as usize] = Token::LeftBrace;
    table[b'}' as usize] = Token::RightBrace;
    table[b'-' as usize] = Token::Dash;
    table[b'+' as usize] = Token::Positive;
    table[b'*' as usize] = Token::Kleene;
    table[b'|' as usize] = Token::Or;
    table[b'?' as usize] = Token::Question;
    table
}

impl Token {
    /// Classifies an unescaped pattern byte.
    pub fn from_byte(byte: u8) -> Token {
        SYMBOLS[byte as usize]
    }

    pub fn is_escape_class(byte: u8) -> bool {
        matches!(byte, b'd' | b'D' | b'w' | b'W')
    }

    /// Tokens that begin a term. `]`, `}`, `-` and a `{` that does not follow
    /// a factor are taken literally.
    pub fn can_start_term(self) -> bool {
        matches!(
            self,
            Token::SingleChar
                | Token::AnyChar
                | Token::LeftBracket
                | Token::EscapeChar
                | Token::Dash
                | Token::LeftBrace
                | Token::RightBrace
                | Token::RightBracket
        )
    }

    pub fn can_start_factor(self) -> bool {
        self.can_start_term()
            || matches!(self, Token::LeftParen | Token::Caret | Token::Dollar)
    }
}
