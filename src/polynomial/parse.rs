// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Text input for [`Polynomial2D`].
//!
//! ```text
//! polynomial := term (separator term)*
//! separator  := ws? ('+' | '-') ws? | ws
//! term       := number (ws? '*' ws? factors)? | factors
//! factors    := factor (ws? '*' ws? factor)*
//! factor     := ('x' | 'y') ('^' digits)?
//! ```
//!
//! The first term may be preceded by a sign. Terms separated only by
//! whitespace are added, so `-9 1*x^2 1*y^2` is `x^2 + y^2 - 9`. Repeated
//! monomials are summed. Each variable appears at most once per term, in
//! either order.

use crate::polynomial::{Polynomial2D, MAX_DEGREE};
use crate::util::Sign;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    ExpectedTerm,
    InvalidNumber,
    InvalidExponent,
    UnexpectedCharacter(char),
    DuplicateVariable(char),
    DegreeOutOfRange,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParsePolynomialError {
    kind: ParseErrorKind,
    position: usize,
}

impl ParsePolynomialError {
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
    /// byte offset into the input
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParsePolynomialError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::ExpectedTerm => write!(f, "expected a term")?,
            ParseErrorKind::InvalidNumber => write!(f, "invalid coefficient")?,
            ParseErrorKind::InvalidExponent => write!(f, "invalid exponent")?,
            ParseErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {:?}", c)?,
            ParseErrorKind::DuplicateVariable(c) => {
                write!(f, "variable {:?} appears twice in one term", c)?
            }
            ParseErrorKind::DegreeOutOfRange => {
                write!(f, "exponent must be less than {}", MAX_DEGREE)?
            }
        }
        write!(f, " at position {}", self.position)
    }
}

impl Error for ParsePolynomialError {}

impl From<ParsePolynomialError> for std::io::Error {
    fn from(err: ParsePolynomialError) -> Self {
        Self::new(std::io::ErrorKind::InvalidData, err)
    }
}

struct Parser<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Parser { text, position: 0 }
    }
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.position).copied()
    }
    fn peek_char(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }
    fn error(&self, kind: ParseErrorKind) -> ParsePolynomialError {
        self.error_at(kind, self.position)
    }
    fn error_at(&self, kind: ParseErrorKind, position: usize) -> ParsePolynomialError {
        ParsePolynomialError { kind, position }
    }
    /// returns true if any whitespace was skipped
    fn skip_whitespace(&mut self) -> bool {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            self.position += c.len_utf8();
        }
        self.position != start
    }
    fn skip_digits(&mut self) -> usize {
        let start = self.position;
        while let Some(b'0'..=b'9') = self.peek() {
            self.position += 1;
        }
        self.position - start
    }
    fn parse_sign(&mut self) -> Sign {
        match self.peek() {
            Some(b'-') => {
                self.position += 1;
                Sign::Negative
            }
            Some(b'+') => {
                self.position += 1;
                Sign::Positive
            }
            _ => Sign::Positive,
        }
    }
    /// consumes `ws? '*' ws?` if present
    fn eat_star(&mut self) -> bool {
        let saved = self.position;
        self.skip_whitespace();
        if self.peek() == Some(b'*') {
            self.position += 1;
            self.skip_whitespace();
            true
        } else {
            self.position = saved;
            false
        }
    }
    fn parse_number(&mut self) -> Result<f64, ParsePolynomialError> {
        let start = self.position;
        self.skip_digits();
        if self.peek() == Some(b'.') {
            self.position += 1;
            self.skip_digits();
        }
        if let Some(b'e') | Some(b'E') = self.peek() {
            let mantissa_end = self.position;
            self.position += 1;
            if let Some(b'+') | Some(b'-') = self.peek() {
                self.position += 1;
            }
            if self.skip_digits() == 0 {
                self.position = mantissa_end;
            }
        }
        self.text[start..self.position]
            .parse()
            .map_err(|_| self.error_at(ParseErrorKind::InvalidNumber, start))
    }
    fn parse_exponent(&mut self) -> Result<usize, ParsePolynomialError> {
        let start = self.position;
        if self.skip_digits() == 0 {
            return Err(self.error(ParseErrorKind::InvalidExponent));
        }
        let exponent: usize = self.text[start..self.position]
            .parse()
            .map_err(|_| self.error_at(ParseErrorKind::InvalidExponent, start))?;
        if exponent >= MAX_DEGREE {
            return Err(self.error_at(ParseErrorKind::DegreeOutOfRange, start));
        }
        Ok(exponent)
    }
    /// returns `((exp_x, exp_y), coefficient)`
    fn parse_term(&mut self) -> Result<((usize, usize), f64), ParsePolynomialError> {
        let mut coefficient = 1.0;
        if let Some(b'0'..=b'9') | Some(b'.') = self.peek() {
            coefficient = self.parse_number()?;
            if !self.eat_star() {
                return Ok(((0, 0), coefficient));
            }
        }
        let mut exponents = [None, None];
        loop {
            let variable_position = self.position;
            let (slot, variable) = match self.peek() {
                Some(b'x') => (0, 'x'),
                Some(b'y') => (1, 'y'),
                _ => return Err(self.error(ParseErrorKind::ExpectedTerm)),
            };
            self.position += 1;
            let exponent = if self.peek() == Some(b'^') {
                self.position += 1;
                self.parse_exponent()?
            } else {
                1
            };
            if exponents[slot].is_some() {
                return Err(self.error_at(
                    ParseErrorKind::DuplicateVariable(variable),
                    variable_position,
                ));
            }
            exponents[slot] = Some(exponent);
            if !self.eat_star() {
                break;
            }
        }
        Ok((
            (exponents[0].unwrap_or(0), exponents[1].unwrap_or(0)),
            coefficient,
        ))
    }
    fn parse_polynomial(mut self) -> Result<Polynomial2D, ParsePolynomialError> {
        let mut retval = Polynomial2D::new();
        self.skip_whitespace();
        let mut sign = self.parse_sign();
        loop {
            self.skip_whitespace();
            let start = self.position;
            let ((exp_x, exp_y), coefficient) = self.parse_term()?;
            let out_of_range =
                move |_| ParsePolynomialError {
                    kind: ParseErrorKind::DegreeOutOfRange,
                    position: start,
                };
            let value = retval.get(exp_x, exp_y).map_err(out_of_range)? + sign * coefficient;
            retval.set(exp_x, exp_y, value).map_err(out_of_range)?;
            let had_whitespace = self.skip_whitespace();
            match self.peek_char() {
                None => break,
                Some('+') | Some('-') => sign = self.parse_sign(),
                Some(_) if had_whitespace => sign = Sign::Positive,
                Some(c) => return Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
            }
        }
        Ok(retval)
    }
}

impl FromStr for Polynomial2D {
    type Err = ParsePolynomialError;
    fn from_str(text: &str) -> Result<Self, ParsePolynomialError> {
        Parser::new(text).parse_polynomial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::tests::{circle, hyperbola};
    use num_traits::Zero;

    fn parse(text: &str) -> Polynomial2D {
        text.parse().unwrap()
    }

    fn parse_err(text: &str) -> (ParseErrorKind, usize) {
        let err = text.parse::<Polynomial2D>().unwrap_err();
        (err.kind().clone(), err.position())
    }

    #[test]
    fn test_parse_display_format() {
        assert_eq!(parse("x^2 + y^2 - 9"), circle());
        assert_eq!(parse("x^2 - 3*x*y + y^2 - 9"), hyperbola());
        assert_eq!(parse("x^2+y^2-9"), circle());
        assert_eq!(parse("  -9 + x^2 + y^2  "), circle());
        assert_eq!(parse(&hyperbola().to_string()), hyperbola());
        assert_eq!(parse("0"), Polynomial2D::zero());
        assert_eq!(parse("-0.5*x - y + 1").to_string(), "-0.5*x - y + 1");
    }

    #[test]
    fn test_parse_space_separated() {
        assert_eq!(parse("-9 1*x^2 1*y^2"), circle());
        assert_eq!(parse("-9 1*x^2 -3*x^1*y^1 1*y^2"), hyperbola());
    }

    #[test]
    fn test_parse_terms() {
        assert_eq!(parse("x"), Polynomial2D::monomial(1.0, 1, 0).unwrap());
        assert_eq!(parse("-y"), Polynomial2D::monomial(-1.0, 0, 1).unwrap());
        assert_eq!(parse("+2.5"), Polynomial2D::monomial(2.5, 0, 0).unwrap());
        assert_eq!(parse("y^3*x^2"), Polynomial2D::monomial(1.0, 2, 3).unwrap());
        assert_eq!(parse("3 * x * y"), Polynomial2D::monomial(3.0, 1, 1).unwrap());
        assert_eq!(parse("1.5e-3*y"), Polynomial2D::monomial(1.5e-3, 0, 1).unwrap());
        assert_eq!(parse("2E2"), Polynomial2D::monomial(200.0, 0, 0).unwrap());
        assert_eq!(parse(".5*x^0"), Polynomial2D::monomial(0.5, 0, 0).unwrap());
        assert_eq!(parse("x + x + 2*x"), Polynomial2D::monomial(4.0, 1, 0).unwrap());
        assert_eq!(parse("x*y - y*x"), Polynomial2D::zero());
        assert_eq!(
            parse("x^255*y^255"),
            Polynomial2D::monomial(1.0, MAX_DEGREE - 1, MAX_DEGREE - 1).unwrap()
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_err(""), (ParseErrorKind::ExpectedTerm, 0));
        assert_eq!(parse_err("   "), (ParseErrorKind::ExpectedTerm, 3));
        assert_eq!(parse_err("x +"), (ParseErrorKind::ExpectedTerm, 3));
        assert_eq!(parse_err("2*"), (ParseErrorKind::ExpectedTerm, 2));
        assert_eq!(parse_err("x + - y"), (ParseErrorKind::ExpectedTerm, 4));
        assert_eq!(parse_err("z"), (ParseErrorKind::ExpectedTerm, 0));
        assert_eq!(parse_err("x^"), (ParseErrorKind::InvalidExponent, 2));
        assert_eq!(parse_err("x^-1"), (ParseErrorKind::InvalidExponent, 2));
        assert_eq!(parse_err("x^256"), (ParseErrorKind::DegreeOutOfRange, 2));
        assert_eq!(
            parse_err("y^99999999999999999999999"),
            (ParseErrorKind::InvalidExponent, 2)
        );
        assert_eq!(parse_err("x*x"), (ParseErrorKind::DuplicateVariable('x'), 2));
        assert_eq!(parse_err("2x"), (ParseErrorKind::UnexpectedCharacter('x'), 1));
        assert_eq!(parse_err("x^2y"), (ParseErrorKind::UnexpectedCharacter('y'), 3));
        assert_eq!(parse_err("."), (ParseErrorKind::InvalidNumber, 0));
        assert_eq!(parse_err("x ²"), (ParseErrorKind::ExpectedTerm, 2));
    }

    #[test]
    fn test_error_display() {
        let err = "x^256".parse::<Polynomial2D>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "exponent must be less than 256 at position 2"
        );
        let err = "2x".parse::<Polynomial2D>().unwrap_err();
        assert_eq!(err.to_string(), "unexpected character 'x' at position 1");
    }
}
