// syntax (like BNF)
//
// regex       = group-expr *
// group-expr  = expr ( '*' | '+' | '?' ) ?
// expr        = concat ( '|' concat ) *
// concat      = factor +
// factor      = '^' ? ( '(' group-expr * ')' | term ) quantifier * '$' ?
// quantifier  = '*' | '+' | '?' | '{' number ? ( ',' number ? ) ? '}'
// term        = char | '.' | '[' '^' ? set-items ']' | escape-class
// set-items   = ( char ( '-' char ) ? | escape-class ) *
//
// The lexer lives here, the productions are implemented by the NFA builder,
// which turns them into Thompson fragments as it goes.

mod lexer;
mod token;

pub(crate) use lexer::Lexer;
pub(crate) use token::Token;
