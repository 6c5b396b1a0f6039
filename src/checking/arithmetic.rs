// Arithmetic evaluator for the body of $math[] after variable references
// have been replaced by placeholders.
// Supports: numbers, + - * / % and ** (right associative), unary + and -,
// and parentheses. Nothing else is accepted, and nothing is executed.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArithmeticError {
    Empty,
    InvalidNumber(usize),
    InvalidCharacter(usize, char),
    IncrementOperator(usize),
    UnexpectedToken(usize),
    UnexpectedEndOfInput,
    UnclosedParenthesis(usize),
    AmbiguousExponent(usize),
    TooDeep(usize),
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::Empty => write!(f, "empty expression"),
            ArithmeticError::InvalidNumber(offset) => write!(f, "invalid number at {}", offset),
            ArithmeticError::InvalidCharacter(offset, c) => {
                write!(f, "invalid character '{}' at {}", c, offset)
            }
            ArithmeticError::IncrementOperator(offset) => {
                write!(f, "increment or decrement operator at {}", offset)
            }
            ArithmeticError::UnexpectedToken(offset) => write!(f, "unexpected token at {}", offset),
            ArithmeticError::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            ArithmeticError::UnclosedParenthesis(offset) => {
                write!(f, "parenthesis opened at {} is never closed", offset)
            }
            ArithmeticError::AmbiguousExponent(offset) => {
                write!(f, "unary operator before '**' at {} needs parenthesis", offset)
            }
            ArithmeticError::TooDeep(offset) => {
                write!(f, "expression nested too deeply at {}", offset)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, ArithmeticError> {
    let mut tokens = Vec::new();
    let mut chars = input
        .char_indices()
        .peekable();

    while let Some(&(i, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' => {
                chars.next();
                if let Some(&(_, next)) = chars.peek() {
                    if next == c {
                        return Err(ArithmeticError::IncrementOperator(i));
                    }
                }
                tokens.push((i, if c == '+' { Token::Plus } else { Token::Minus }));
            }
            '*' => {
                chars.next();
                if let Some(&(_, '*')) = chars.peek() {
                    chars.next();
                    tokens.push((i, Token::StarStar));
                } else {
                    tokens.push((i, Token::Star));
                }
            }
            '/' => {
                chars.next();
                tokens.push((i, Token::Slash));
            }
            '%' => {
                chars.next();
                tokens.push((i, Token::Percent));
            }
            '(' => {
                chars.next();
                tokens.push((i, Token::LParen));
            }
            ')' => {
                chars.next();
                tokens.push((i, Token::RParen));
            }
            '0'..='9' | '.' => {
                let mut end = i;
                while let Some(&(j, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = j + 1;
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[i..end];
                let dots = literal
                    .matches('.')
                    .count();
                if dots > 1 || literal == "." {
                    return Err(ArithmeticError::InvalidNumber(i));
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ArithmeticError::InvalidNumber(i))?;
                tokens.push((i, Token::Number(value)));
            }
            _ => return Err(ArithmeticError::InvalidCharacter(i, c)),
        }
    }

    Ok(tokens)
}

/// Limit on nested parentheses, unary signs, and exponent chains. Each level
/// is a recursive call, so the bound keeps hostile input off the stack.
const MAXIMUM_DEPTH: usize = 256;

struct Evaluator {
    tokens: Vec<(usize, Token)>,
    position: usize,
    depth: usize,
}

impl Evaluator {
    fn peek(&self) -> Option<Token> {
        self.tokens
            .get(self.position)
            .map(|(_, token)| *token)
    }

    fn offset(&self) -> Option<usize> {
        self.tokens
            .get(self.position)
            .map(|(offset, _)| *offset)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn descend(&mut self) -> Result<(), ArithmeticError> {
        self.depth += 1;
        if self.depth > MAXIMUM_DEPTH {
            return Err(ArithmeticError::TooDeep(
                self.offset()
                    .unwrap_or(0),
            ));
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn expression(&mut self) -> Result<f64, ArithmeticError> {
        let mut value = self.term()?;

        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ArithmeticError> {
        let mut value = self.exponent()?;

        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.exponent()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    value /= self.exponent()?;
                }
                Some(Token::Percent) => {
                    self.advance();
                    value %= self.exponent()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn exponent(&mut self) -> Result<f64, ArithmeticError> {
        match self.peek() {
            Some(Token::Plus) | Some(Token::Minus) => {
                let value = self.unary()?;
                if let Some(Token::StarStar) = self.peek() {
                    return Err(ArithmeticError::AmbiguousExponent(
                        self.offset()
                            .unwrap_or(0),
                    ));
                }
                Ok(value)
            }
            _ => {
                let base = self.primary()?;
                if let Some(Token::StarStar) = self.peek() {
                    self.advance();
                    self.descend()?;
                    let power = self.exponent()?;
                    self.ascend();
                    Ok(base.powf(power))
                } else {
                    Ok(base)
                }
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ArithmeticError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.advance();
                self.descend()?;
                let value = self.unary()?;
                self.ascend();
                Ok(value)
            }
            Some(Token::Minus) => {
                self.advance();
                self.descend()?;
                let value = self.unary()?;
                self.ascend();
                Ok(-value)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, ArithmeticError> {
        let offset = self.offset();

        match self.peek() {
            Some(Token::Number(value)) => {
                self.advance();
                Ok(value)
            }
            Some(Token::LParen) => {
                self.advance();
                self.descend()?;
                let value = self.expression()?;
                self.ascend();
                match self.peek() {
                    Some(Token::RParen) => {
                        self.advance();
                        Ok(value)
                    }
                    Some(_) => Err(ArithmeticError::UnexpectedToken(
                        self.offset()
                            .unwrap_or(0),
                    )),
                    None => Err(ArithmeticError::UnclosedParenthesis(offset.unwrap_or(0))),
                }
            }
            Some(_) => Err(ArithmeticError::UnexpectedToken(offset.unwrap_or(0))),
            None => Err(ArithmeticError::UnexpectedEndOfInput),
        }
    }
}

/// Evaluate a purely arithmetic expression. Division by zero is not an
/// error; it yields an infinite or NaN result.
pub(crate) fn evaluate(input: &str) -> Result<f64, ArithmeticError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ArithmeticError::Empty);
    }

    let mut evaluator = Evaluator {
        tokens,
        position: 0,
        depth: 0,
    };

    let value = evaluator.expression()?;

    match evaluator.offset() {
        Some(offset) => Err(ArithmeticError::UnexpectedToken(offset)),
        None => Ok(value),
    }
}
