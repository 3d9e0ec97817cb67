use std::ops::Range;

use super::{ByteSet, Edge, Node, NodeId, NODE_LIMIT};
use crate::parser::{Lexer, Token};
use crate::Error;

/// A piece of NFA under construction.
///
/// `end` is always an unlinked `Eof` node, so it can be turned into an
/// epsilon node and wired to whatever follows the fragment.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: NodeId,
    end: NodeId,
}

/// Recursive-descent parser that emits Thompson fragments while it reads
/// the pattern.
pub(crate) struct Builder<'a> {
    lexer: Lexer<'a>,
    nodes: Vec<Node>,
    repeat_limit: u32,
}

impl<'a> Builder<'a> {
    pub fn build(pattern: &'a [u8], repeat_limit: u32) -> Result<(Vec<Node>, NodeId), Error> {
        let mut builder = Builder {
            lexer: Lexer::new(pattern),
            nodes: vec![],
            repeat_limit,
        };

        builder.lexer.advance();
        let fragment = builder.regex_expression()?;

        Ok((builder.nodes, fragment.start))
    }

    fn regex_expression(&mut self) -> Result<Fragment, Error> {
        let fragment = self.group_sequence()?;

        match self.lexer.token() {
            Token::RightParen => Err(Error::UnmatchedParen {
                offset: self.lexer.offset(),
            }),
            _ => Ok(fragment),
        }
    }

    fn group_sequence(&mut self) -> Result<Fragment, Error> {
        let mut fragment = None;
        while !matches!(self.lexer.token(), Token::Eof | Token::RightParen) {
            let next = self.group_expression()?;
            fragment = Some(self.append(fragment, next));
        }
        Ok(self.or_empty(fragment))
    }

    fn group_expression(&mut self) -> Result<Fragment, Error> {
        let fragment = self.expression()?;

        // a quantifier left over here applies to the whole expression
        let fragment = match self.lexer.token() {
            Token::Kleene => {
                self.lexer.advance();
                self.kleene_closure(fragment)
            }
            Token::Positive => {
                self.lexer.advance();
                self.positive_closure(fragment)
            }
            Token::Question => {
                self.lexer.advance();
                self.question_closure(fragment)
            }
            _ => fragment,
        };

        Ok(fragment)
    }

    fn expression(&mut self) -> Result<Fragment, Error> {
        let mut fragment = self.factor_connect()?;

        while self.lexer.is(Token::Or) {
            self.lexer.advance();
            let rhs = self.factor_connect()?;
            fragment = self.alternate(fragment, rhs);
        }

        Ok(fragment)
    }

    fn factor_connect(&mut self) -> Result<Fragment, Error> {
        let mut fragment = None;
        while self.lexer.token().can_start_factor() {
            let next = self.factor()?;
            fragment = Some(self.append(fragment, next));
        }
        Ok(self.or_empty(fragment))
    }

    fn factor(&mut self) -> Result<Fragment, Error> {
        // anchors are accepted but not enforced
        if self.lexer.is(Token::Caret) {
            self.lexer.advance();
        }

        let first = self.nodes.len();
        let mut fragment = match self.lexer.token() {
            Token::LeftParen => self.group()?,
            token if token.can_start_term() => self.term()?,
            _ => self.empty(),
        };

        loop {
            fragment = match self.lexer.token() {
                Token::Kleene => {
                    self.lexer.advance();
                    self.kleene_closure(fragment)
                }
                Token::Positive => {
                    self.lexer.advance();
                    self.positive_closure(fragment)
                }
                Token::Question => {
                    self.lexer.advance();
                    self.question_closure(fragment)
                }
                Token::LeftBrace => self.repeat_closure(fragment, first)?,
                _ => break,
            };
        }

        if self.lexer.is(Token::Dollar) {
            self.lexer.advance();
        }

        Ok(fragment)
    }

    fn group(&mut self) -> Result<Fragment, Error> {
        let offset = self.lexer.offset();
        self.lexer.advance(); // consume '('

        let fragment = self.group_sequence()?;

        match self.lexer.token() {
            Token::RightParen => {
                self.lexer.advance();
                Ok(fragment)
            }
            _ => Err(Error::UnclosedGroup { offset }),
        }
    }

    fn term(&mut self) -> Result<Fragment, Error> {
        let byte = self.lexer.current();
        let edge = match self.lexer.token() {
            Token::LeftBracket => return self.char_class(),
            Token::AnyChar => Edge::Any,
            Token::EscapeChar => match ByteSet::escape_class(byte) {
                Some(set) => Edge::Class(set),
                None => Edge::Char(byte),
            },
            _ => Edge::Char(byte),
        };
        self.lexer.advance();

        Ok(self.single(edge))
    }

    fn char_class(&mut self) -> Result<Fragment, Error> {
        let offset = self.lexer.offset();
        self.lexer.advance(); // consume '['

        let negated = self.lexer.is(Token::Caret);
        if negated {
            self.lexer.advance();
        }

        let mut set = ByteSet::empty();
        // a '-' right after a single byte opens a range
        let mut range_start = None;

        loop {
            let byte = self.lexer.current();
            match self.lexer.token() {
                Token::Eof => return Err(Error::UnclosedClass { offset }),
                Token::RightBracket => break,
                Token::EscapeChar => {
                    if let Some(class) = ByteSet::escape_class(byte) {
                        set.union(&class);
                    }
                    range_start = None;
                }
                Token::Dash => match range_start.take() {
                    Some(start) => {
                        self.lexer.advance();
                        match self.lexer.token() {
                            Token::Eof => return Err(Error::UnclosedClass { offset }),
                            Token::RightBracket => {
                                set.insert(b'-');
                                continue;
                            }
                            _ => {
                                let end = self.lexer.current();
                                if start > end {
                                    return Err(Error::InvalidRange { start, end });
                                }
                                set.insert_range(start, end);
                            }
                        }
                    }
                    None => {
                        set.insert(b'-');
                        range_start = Some(b'-');
                    }
                },
                _ => {
                    set.insert(byte);
                    range_start = Some(byte);
                }
            }
            self.lexer.advance();
        }
        self.lexer.advance(); // consume ']'

        if negated {
            set.negate();
        }

        Ok(self.single(Edge::Class(set)))
    }

    fn repeat_closure(&mut self, fragment: Fragment, first: NodeId) -> Result<Fragment, Error> {
        let offset = self.lexer.offset();
        self.lexer.advance(); // consume '{'

        let min = self.repeat_count()?.unwrap_or(0);
        let max = match (self.lexer.token(), self.lexer.current()) {
            (Token::SingleChar, b',') => {
                self.lexer.advance();
                self.repeat_count()?
            }
            _ => Some(min),
        };

        match self.lexer.token() {
            Token::RightBrace => self.lexer.advance(),
            Token::Eof => return Err(Error::UnclosedRepeat { offset }),
            _ => {
                return Err(Error::InvalidRepeat {
                    offset: self.lexer.offset(),
                    byte: self.lexer.current(),
                })
            }
        }

        if let Some(max) = max {
            if min > max {
                return Err(Error::RepeatOutOfOrder { min, max });
            }
        }
        if max.unwrap_or(min) > self.repeat_limit {
            return Err(Error::RepeatTooLarge {
                limit: self.repeat_limit,
            });
        }

        self.repeat(fragment, first, min, max)
    }

    fn repeat_count(&mut self) -> Result<Option<u32>, Error> {
        let mut count: Option<u32> = None;

        while self.lexer.is(Token::SingleChar) && self.lexer.current().is_ascii_digit() {
            let digit = u32::from(self.lexer.current() - b'0');
            let value = count
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .ok_or(Error::RepeatTooLarge {
                    limit: self.repeat_limit,
                })?;
            count = Some(value);
            self.lexer.advance();
        }

        Ok(count)
    }

    /// Unrolls `{min,max}`; `max == None` means no upper bound.
    ///
    /// The nodes of `fragment` occupy `first..self.nodes.len()`, that range
    /// is the template every extra copy is cloned from.
    fn repeat(
        &mut self,
        fragment: Fragment,
        first: NodeId,
        min: u32,
        max: Option<u32>,
    ) -> Result<Fragment, Error> {
        match (min, max) {
            (0, Some(0)) => return Ok(self.empty()),
            (0, Some(1)) => return Ok(self.question_closure(fragment)),
            (0, None) => return Ok(self.kleene_closure(fragment)),
            (1, None) => return Ok(self.positive_closure(fragment)),
            _ => {}
        }

        let template = first..self.nodes.len();
        let count = max.unwrap_or(min);

        // every copy brings at most two wiring nodes along
        let needed = (template.len() + 2)
            .checked_mul(count as usize)
            .and_then(|n| n.checked_add(self.nodes.len()));
        if !matches!(needed, Some(n) if n <= NODE_LIMIT) {
            return Err(Error::PatternTooLarge { limit: NODE_LIMIT });
        }

        // copy the template before any of it gets wired
        let mut copies = vec![fragment];
        for _ in 1..count {
            let copy = self.duplicate(template.clone(), fragment);
            copies.push(copy);
        }

        let (forced, optional) = copies.split_at(min as usize);

        let mut result = None;
        for copy in forced {
            result = Some(self.append(result, *copy));
        }

        if max.is_none() {
            if let (Some(whole), Some(last)) = (result, forced.last()) {
                let tail = self.push(Edge::Eof);
                self.close_loop(*last, tail);
                result = Some(Fragment {
                    start: whole.start,
                    end: tail,
                });
            }
        }

        for copy in optional {
            let guarded = self.question_closure(*copy);
            result = Some(self.append(result, guarded));
        }

        Ok(self.or_empty(result))
    }

    fn duplicate(&mut self, template: Range<NodeId>, fragment: Fragment) -> Fragment {
        let origin = template.start;
        let base = self.nodes.len();
        let shift = move |id: NodeId| id - origin + base;

        for id in template {
            let mut node = self.nodes[id].clone();
            node.next1 = node.next1.map(shift);
            node.next2 = node.next2.map(shift);
            node.back = node.back.map(shift);
            self.nodes.push(node);
        }

        Fragment {
            start: shift(fragment.start),
            end: shift(fragment.end),
        }
    }

    fn kleene_closure(&mut self, fragment: Fragment) -> Fragment {
        let start = self.push(Edge::Epsilon);
        let end = self.push(Edge::Eof);

        self.nodes[start].next1 = Some(fragment.start);
        self.nodes[start].next2 = Some(end);
        self.close_loop(fragment, end);

        Fragment { start, end }
    }

    fn positive_closure(&mut self, fragment: Fragment) -> Fragment {
        let start = self.push(Edge::Epsilon);
        let end = self.push(Edge::Eof);

        self.nodes[start].next1 = Some(fragment.start);
        self.close_loop(fragment, end);

        Fragment { start, end }
    }

    fn question_closure(&mut self, fragment: Fragment) -> Fragment {
        let start = self.push(Edge::Epsilon);
        let end = self.push(Edge::Eof);

        self.nodes[start].next1 = Some(fragment.start);
        self.nodes[start].next2 = Some(end);
        self.link(fragment.end, end);

        Fragment { start, end }
    }

    fn alternate(&mut self, lhs: Fragment, rhs: Fragment) -> Fragment {
        let start = self.push(Edge::Epsilon);
        let end = self.push(Edge::Eof);

        self.nodes[start].next1 = Some(lhs.start);
        self.nodes[start].next2 = Some(rhs.start);
        self.link(lhs.end, end);
        self.link(rhs.end, end);

        Fragment { start, end }
    }

    /// Turns the end of `fragment` into the loop node: it may go back to the
    /// fragment start or leave to `exit`.
    fn close_loop(&mut self, fragment: Fragment, exit: NodeId) {
        let node = &mut self.nodes[fragment.end];
        node.edge = Edge::Epsilon;
        node.back = Some(fragment.start);
        node.next1 = Some(exit);
    }

    fn append(&mut self, lhs: Option<Fragment>, rhs: Fragment) -> Fragment {
        match lhs {
            Some(lhs) => {
                self.link(lhs.end, rhs.start);
                Fragment {
                    start: lhs.start,
                    end: rhs.end,
                }
            }
            None => rhs,
        }
    }

    fn link(&mut self, from: NodeId, to: NodeId) {
        let node = &mut self.nodes[from];
        node.edge = Edge::Epsilon;
        node.next1 = Some(to);
    }

    fn single(&mut self, edge: Edge) -> Fragment {
        let start = self.push(edge);
        let end = self.push(Edge::Eof);
        self.nodes[start].next1 = Some(end);

        Fragment { start, end }
    }

    fn empty(&mut self) -> Fragment {
        let node = self.push(Edge::Eof);
        Fragment {
            start: node,
            end: node,
        }
    }

    fn or_empty(&mut self, fragment: Option<Fragment>) -> Fragment {
        match fragment {
            Some(fragment) => fragment,
            None => self.empty(),
        }
    }

    fn push(&mut self, edge: Edge) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(edge));
        id
    }
}
