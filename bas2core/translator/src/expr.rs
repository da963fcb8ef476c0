//! Recursive-descent expression parser.
//!
//! Each level reduces to a Token whose payload is the C rendering of the
//! subtree and whose kind is its computed type. `Ok(None)` means "no
//! expression starts here" with every peeked token pushed back, so callers
//! can treat expressions as optional.

use bas2c_common::Result;
use bas2c_keyword as keyword;
use bas2c_lexer::Token;

use crate::{expect, expr_type_of, Bas2C};

impl<'a> Bas2C<'a> {
    pub fn expr(&mut self) -> Result<Option<Token>> {
        self.op_xor()
    }

    fn op_xor(&mut self) -> Result<Option<Token>> {
        let Some(mut r) = self.op_or()? else { return Ok(None) };
        while self.check_keyword(keyword::XOR) {
            let a = expect(self.op_or()?)?;
            expect(r.result_type(Some(&a)))?;
            r = if self.bc() {
                Token::Int(format!("{} ^ {}", r.value(), a.value()))
            } else {
                Token::Int(format!("((int){} ^ (int){})", r.value(), a.value()))
            };
        }
        Ok(Some(r))
    }

    fn op_or(&mut self) -> Result<Option<Token>> {
        let Some(mut r) = self.op_and()? else { return Ok(None) };
        while self.check_keyword(keyword::OR) {
            let a = expect(self.op_and()?)?;
            expect(r.result_type(Some(&a)))?;
            r = if self.bc() {
                Token::Int(format!("{} | {}", r.value(), a.value()))
            } else {
                Token::Int(format!("((int){} | (int){})", r.value(), a.value()))
            };
        }
        Ok(Some(r))
    }

    fn op_and(&mut self) -> Result<Option<Token>> {
        let Some(mut r) = self.op_not()? else { return Ok(None) };
        while self.check_keyword(keyword::AND) {
            let a = expect(self.op_not()?)?;
            expect(r.result_type(Some(&a)))?;
            r = if self.bc() {
                Token::Int(format!("{} & {}", r.value(), a.value()))
            } else {
                Token::Int(format!("((int){} & (int){})", r.value(), a.value()))
            };
        }
        Ok(Some(r))
    }

    fn op_not(&mut self) -> Result<Option<Token>> {
        if self.check_keyword(keyword::NOT) {
            let r = expect(self.op_not()?)?;
            expect(r.result_type(None))?;
            // BASIC not is bitwise; BC mode keeps the logical form
            Ok(Some(if self.bc() {
                Token::Int(format!("!{}", r.value()))
            } else {
                Token::Int(format!("(~((int){}))", r.value()))
            }))
        } else {
            self.cmp()
        }
    }

    fn cmp(&mut self) -> Result<Option<Token>> {
        let Some(mut r) = self.shrshl()? else { return Ok(None) };
        loop {
            let m = self.t.fetch();
            // the two-byte form encodes the operator for b_strcmp
            let (ms, mt) = match &m {
                t if t.is_keyword(keyword::EQ) => ("==", "0x3d20"),
                t if t.is_keyword(keyword::NE) => ("!=", "0x3c3e"),
                t if t.is_keyword(keyword::GT) => (">", "0x3e20"),
                t if t.is_keyword(keyword::LT) => ("<", "0x3c20"),
                t if t.is_keyword(keyword::GE) => (">=", "0x3e3d"),
                t if t.is_keyword(keyword::LE) => ("<=", "0x3c3d"),
                _ => {
                    self.t.unfetch(m);
                    break;
                }
            };
            let a = expect(self.shrshl()?)?;
            let v = if r.is_str() {
                expect(a.is_str().then_some(()))?;
                let v = format!("b_strcmp({}, {}, {})", r.value(), mt, a.value());
                if self.bc() {
                    v
                } else {
                    format!("(({})?-1:0)", v)
                }
            } else {
                // BASIC true is -1
                let v = format!("{} {} {}", r.value(), ms, a.value());
                if self.bc() {
                    v
                } else {
                    format!("-({})", v)
                }
            };
            r = Token::Int(v);
        }
        Ok(Some(r))
    }

    fn shrshl(&mut self) -> Result<Option<Token>> {
        let Some(mut r) = self.addsub()? else { return Ok(None) };
        loop {
            let m = self.t.fetch();
            let ms = if m.is_keyword(keyword::SHR) {
                ">>"
            } else if m.is_keyword(keyword::SHL) {
                "<<"
            } else {
                self.t.unfetch(m);
                break;
            };
            let a = expect(self.addsub()?)?;
            expect(r.result_type(None))?;
            r = if self.bc() {
                Token::Int(format!("{} {} {}", r.value(), ms, a.value()))
            } else {
                Token::Int(format!("((int){} {} (int){})", r.value(), ms, a.value()))
            };
        }
        Ok(Some(r))
    }

    fn addsub(&mut self) -> Result<Option<Token>> {
        let Some(mut r) = self.op_mod()? else { return Ok(None) };
        if r.is_str() {
            // `+` on a string starts concatenation
            if !self.check_keyword(keyword::PLUS) {
                return Ok(Some(r));
            }
            let mut v = format!("b_stradd(strtmp{}, {}, ", self.strtmp, r.value());
            self.strtmp += 1;
            loop {
                let a = expect(self.op_mod()?)?;
                expect(a.is_str().then_some(()))?;
                v.push_str(a.value());
                v.push_str(", ");
                if !self.check_keyword(keyword::PLUS) {
                    break;
                }
            }
            v.push_str("-1)");
            return Ok(Some(Token::Str(v)));
        }
        loop {
            let m = self.t.fetch();
            let ms = if m.is_keyword(keyword::PLUS) {
                "+"
            } else if m.is_keyword(keyword::MINUS) {
                "-"
            } else {
                self.t.unfetch(m);
                break;
            };
            let a = expect(self.op_mod()?)?;
            let rty = expect(r.result_type(Some(&a)))?;
            let mut v = format!("{} {} {}", r.value(), ms, a.value());
            if !self.bc() {
                v = format!("({})", v);
            }
            r = Token::with_type(rty, v);
        }
        Ok(Some(r))
    }

    fn op_mod(&mut self) -> Result<Option<Token>> {
        let Some(mut r) = self.yen()? else { return Ok(None) };
        while self.check_keyword(keyword::MOD) {
            let a = expect(self.yen()?)?;
            expect(r.result_type(None))?;
            r = if self.bc() {
                Token::Int(format!("{} % {}", r.value(), a.value()))
            } else {
                Token::Int(format!("((int){} % (int){})", r.value(), a.value()))
            };
        }
        Ok(Some(r))
    }

    // '\' is integer division
    fn yen(&mut self) -> Result<Option<Token>> {
        let Some(mut r) = self.muldiv()? else { return Ok(None) };
        while self.check_keyword(keyword::YEN) {
            let a = expect(self.muldiv()?)?;
            expect(r.result_type(None))?;
            r = if self.bc() {
                Token::Int(format!("{} / {}", r.value(), a.value()))
            } else {
                Token::Int(format!("((int){} / (int){})", r.value(), a.value()))
            };
        }
        Ok(Some(r))
    }

    fn muldiv(&mut self) -> Result<Option<Token>> {
        let Some(mut r) = self.posneg()? else { return Ok(None) };
        loop {
            let m = self.t.fetch();
            let ms = if m.is_keyword(keyword::MUL) {
                "*"
            } else if m.is_keyword(keyword::DIV) {
                "/"
            } else {
                self.t.unfetch(m);
                break;
            };
            let a = expect(self.posneg()?)?;
            let rty = expect(r.result_type(Some(&a)))?;
            let mut v = format!("{} {} {}", r.value(), ms, a.value());
            if !self.bc() {
                v = format!("({})", v);
            }
            r = Token::with_type(rty, v);
        }
        Ok(Some(r))
    }

    fn posneg(&mut self) -> Result<Option<Token>> {
        let m = self.t.fetch();
        let ms = if m.is_keyword(keyword::PLUS) {
            "+"
        } else if m.is_keyword(keyword::MINUS) {
            "-"
        } else {
            self.t.unfetch(m);
            return self.paren();
        };
        let r = expect(self.posneg()?)?;
        let rty = expect(r.result_type(None))?;
        Ok(Some(Token::with_type(rty, format!("{}{}", ms, r.value()))))
    }

    fn paren(&mut self) -> Result<Option<Token>> {
        if self.check_symbol('(') {
            let r = expect(self.expr()?)?;
            self.next_symbol(')')?;
            return Ok(Some(r.with_value(format!("({})", r.value()))));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Option<Token>> {
        let r = self.t.fetch();

        if r.is_const() {
            return Ok(Some(r));
        }
        if let Token::Keyword(k) = &r {
            let k = *k;
            if let Some(v) = self.exfncall(k, true)? {
                return Ok(Some(v));
            }
            self.t.unfetch(r);
            return Ok(None);
        }
        if let Some(v) = self.lvalue(Some(r), false, false)? {
            return Ok(Some(Token::with_type(expr_type_of(v.ty.base), v.name)));
        }
        if let Some(v) = self.fncall(None)? {
            return Ok(Some(v));
        }
        Ok(None)
    }
}
