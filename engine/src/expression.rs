//! Restricted arithmetic expression evaluator.
//!
//! Grammar, after normalization:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' expr ')'
//! ```
//!
//! Only digits, `.`, `+ - * / ( )` are accepted. The result must be finite.
//! Nesting of signs and parentheses is capped at [`MAX_DEPTH`].

use crate::error::ExpressionError;

/// Deepest chain of unary signs and open parentheses the parser descends into.
pub const MAX_DEPTH: usize = 256;

/// Constructs that are refused outright, matched case-insensitively.
const FORBIDDEN_KEYWORDS: &[&str] = &[
    "eval", "function", "=>", "new", "this", "class", "window", "document", "global",
];

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(value) => value.to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Strips whitespace and maps `,` `×` `÷` to `.` `*` `/`.
pub fn normalize_expression(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            ',' => '.',
            '×' => '*',
            '÷' => '/',
            other => other,
        })
        .collect()
}

pub fn evaluate_expression(text: &str) -> Result<f64, ExpressionError> {
    let normalized = normalize_expression(text);
    if normalized.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let lowered = normalized.to_lowercase();
    if let Some(keyword) = FORBIDDEN_KEYWORDS.iter().find(|k| lowered.contains(*k)) {
        return Err(ExpressionError::ForbiddenKeyword(keyword.to_string()));
    }
    if let Some(bad) = normalized.chars().find(|c| !is_allowed(*c)) {
        return Err(ExpressionError::InvalidCharacter(bad));
    }

    let tokens = tokenize(&normalized)?;
    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let value = parser.expr()?;
    if let Some((token, position)) = parser.tokens.get(parser.pos) {
        return Err(ExpressionError::UnexpectedToken {
            found: token.describe(),
            position: *position,
        });
    }

    if !value.is_finite() {
        return Err(ExpressionError::NonFinite);
    }
    Ok(value)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ExpressionError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let lexeme: String = chars[start..i].iter().collect();
                let value = lexeme
                    .parse::<f64>()
                    .map_err(|_| ExpressionError::MalformedNumber(lexeme.clone()))?;
                tokens.push((Token::Number(value), start));
                continue;
            }
        };
        tokens.push((token, i));
        i += 1;
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn descend(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    value /= self.unary()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, ExpressionError> {
        let negate = match self.peek() {
            Some(Token::Minus) => true,
            Some(Token::Plus) => false,
            _ => return self.primary(),
        };
        self.pos += 1;
        self.descend()?;
        let value = self.unary()?;
        self.depth -= 1;
        Ok(if negate { -value } else { value })
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        match self.next() {
            Some((Token::Number(value), _)) => Ok(value),
            Some((Token::LParen, _)) => {
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((token, position)) => Err(ExpressionError::UnexpectedToken {
                        found: token.describe(),
                        position,
                    }),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some((token, position)) => Err(ExpressionError::UnexpectedToken {
                found: token.describe(),
                position,
            }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}
