//! Statement dispatcher and code emitter.
//!
//! `statement` consumes exactly one statement and returns its C rendering;
//! the driver prefixes each emitted line with the current indentation.
//! L-value parsing, variable definition and the user/library call expanders
//! live here too.

use bas2c_common::{Bas2cError, Result};
use bas2c_keyword::{self as keyword};
use bas2c_lexer::{ExprType, Token};
use bas2c_namespace::{BaseType, VarType, Variable};

use crate::{expect, expect_msg, expr_type_of, Bas2C};

// value used by the runtime for omitted optional arguments ("NASI")
const NASI: &str = "0x4e415349";

impl<'a> Bas2C<'a> {
    /// Translate one statement. `Ok(None)` only at end of input.
    pub(crate) fn statement(&mut self) -> Result<Option<String>> {
        let mut out = String::new();

        while self.check_symbol(':') {}

        if self.check_keyword(keyword::EOF_KW) {
            return Ok(None);
        }

        self.update_strtmp();

        if let Some(tycode) = self.check_vartype() {
            self.defvar(VarType::new(BaseType::from_code(tycode).unwrap()))?;
        } else if let Some(kwv) = self.check_keyword_any() {
            match kwv {
                keyword::EOL => {
                    // a one-statement then/else arm ends with the line
                    if matches!(self.nest.last(), Some(&('i' | 'e'))) {
                        let top = *self.nest.last().unwrap();
                        self.nestout(top)?;
                        out = "}\n".to_string();
                    }
                }

                keyword::DIM => {
                    let ty = match self.check_vartype() {
                        Some(c) => BaseType::from_code(c).unwrap(),
                        None => BaseType::Int,
                    };
                    self.defvar(VarType::new(ty))?;
                }

                keyword::PRINT | keyword::LPRINT => {
                    let lp = if kwv == keyword::PRINT { "" } else { "l" };
                    let mut crlf = true;
                    if self.check_keyword(keyword::USING) {
                        let fmt = expect_msg(self.expr()?, "missing format string for using")?;
                        expect_msg(fmt.is_str().then_some(()), "missing format string for using")?;
                        self.next_symbol(';')?;
                        out.push_str(&format!("b_s{}print(using(strtmp{},{}", lp, self.strtmp, fmt.value()));
                        self.strtmp += 1;
                        loop {
                            if let Some(x) = self.expr()? {
                                if x.is_str() {
                                    out.push_str(&format!(",{}", x.value()));
                                } else {
                                    out.push_str(&format!(",(double)({})", x.value()));
                                }
                            }
                            if !self.check_symbol(',') {
                                break;
                            }
                        }
                        out.push_str("));\n");
                        crlf = !self.check_symbol(';');
                    } else {
                        loop {
                            if let Some(x) = self.expr()? {
                                if x.is_str() {
                                    out.push_str(&format!("b_s{}print({});\n", lp, x.value()));
                                } else if matches!(x, Token::Float(_)) {
                                    out.push_str(&format!("b_f{}print({});\n", lp, x.value()));
                                } else {
                                    out.push_str(&format!("b_i{}print({});\n", lp, x.value()));
                                }
                                crlf = true;
                            } else if self.check_keyword(keyword::TAB) {
                                self.next_symbol('(')?;
                                let x = expect(self.expr()?)?;
                                self.next_symbol(')')?;
                                out.push_str(&format!("b_t{}print({});\n", lp, x.value()));
                                crlf = true;
                            }

                            if self.check_symbol(';') {
                                crlf = false;
                            } else if self.check_symbol(',') {
                                out.push_str(&format!("b_s{}print(STRTAB);\n", lp));
                                crlf = false;
                            } else {
                                break;
                            }
                        }
                    }
                    if crlf {
                        out.push_str(&format!("b_s{}print(STRCRLF);\n", lp));
                    }
                }

                keyword::INPUT => {
                    let mut pstr = "\"? \"".to_string();
                    if let Some(p) = self.check_str() {
                        pstr = p;
                        if self.check_symbol(';') {
                            // adjacent literals concatenate in C
                            pstr.push_str(" \"? \"");
                        } else {
                            self.next_symbol(',')?;
                        }
                    }
                    out.push_str(&format!("b_input({}", pstr));
                    loop {
                        let a = expect(self.lvalue(None, false, false)?)?;
                        if a.ty.is_str() {
                            out.push_str(&format!(", sizeof({}), {}", a.name, a.name));
                        } else {
                            let at = match a.ty.base {
                                BaseType::Int => "0x204",
                                BaseType::Char => "0x201",
                                BaseType::Float => "0x208",
                                BaseType::Str => return Err(Bas2cError::Syntax("syntax error".to_string())),
                            };
                            out.push_str(&format!(", {}, &{}", at, a.name));
                        }
                        if !self.check_symbol(',') {
                            break;
                        }
                    }
                    out.push_str(", -1);\n");
                }

                keyword::LINPUT => {
                    if let Some(p) = self.check_str() {
                        self.next_symbol(';')?;
                        out.push_str(&format!("b_sprint({});\n", p));
                    }
                    let a = expect(self.lvalue(None, false, false)?)?;
                    expect(a.ty.is_str().then_some(()))?;
                    out.push_str(&format!("b_linput({}, sizeof({}));\n", a.name, a.name));
                }

                keyword::IF => {
                    let x = expect(self.expr()?)?;
                    self.next_keyword(keyword::THEN)?;
                    let nestin_ch = if self.check_symbol('{') { 'I' } else { 'i' };
                    self.nestin(nestin_ch);
                    out = format!("if ({}) {{\n", x.value());
                }

                keyword::ELSE => {
                    if self.nest.last() == Some(&'e') {
                        // the inner single-line else arm ends here
                        self.nestout('e')?;
                        out.push_str("}\n");
                    }
                    self.nestout('i')?;
                    if self.check_keyword(keyword::IF) {
                        let x = expect(self.expr()?)?;
                        self.next_keyword(keyword::THEN)?;
                        let nestin_ch = if self.check_symbol('{') { 'I' } else { 'i' };
                        self.nestin(nestin_ch);
                        out.push_str(&format!("}} else if ({}) {{\n", x.value()));
                    } else {
                        let nestin_ch = if self.check_symbol('{') { 'E' } else { 'e' };
                        self.nestin(nestin_ch);
                        out.push_str("} else {\n");
                    }
                }

                keyword::FOR => {
                    let v = expect(self.lvalue(None, false, true)?)?;
                    self.next_keyword(keyword::EQ)?;
                    let f = expect(self.expr()?)?;
                    self.next_keyword(keyword::TO)?;
                    let to = expect(self.expr()?)?;
                    self.nestin('f');
                    out = format!(
                        "for ({} = {}; {} <= {}; {}++) {{\n",
                        v.name,
                        f.value(),
                        v.name,
                        to.value(),
                        v.name
                    );
                }

                keyword::NEXT => {
                    self.nestout('f')?;
                    out = "}\n".to_string();
                }

                keyword::WHILE => {
                    let x = expect(self.expr()?)?;
                    self.nestin('w');
                    out = format!("while ({}) {{\n", x.value());
                }

                keyword::ENDWHILE => {
                    self.nestout('w')?;
                    out = "}\n".to_string();
                }

                keyword::REPEAT => {
                    self.nestin('r');
                    out = "do {\n".to_string();
                }

                keyword::UNTIL => {
                    let x = expect(self.expr()?)?;
                    self.nestout('r')?;
                    out = format!("}} while (!({}));\n", x.value());
                }

                keyword::SWITCH => {
                    let x = expect(self.expr()?)?;
                    self.nestin('s');
                    out = format!("switch ({}) {{\n", x.value());
                }

                keyword::CASE => {
                    let x = expect(self.expr()?)?;
                    self.indentcnt -= 1;
                    out = format!("case {}:\n", x.value());
                }

                keyword::DEFAULT => {
                    self.indentcnt -= 1;
                    out = "default:\n".to_string();
                }

                keyword::ENDSWITCH => {
                    self.nestout('s')?;
                    out = "}\n".to_string();
                }

                keyword::GOTO => {
                    let l: i32 = self
                        .next_int()?
                        .parse()
                        .map_err(|_| Bas2cError::Syntax("bad line number".to_string()))?;
                    if self.bpass == 1 {
                        self.label.insert(l);
                    }
                    out = format!("goto L{:06};\n", l);
                }

                keyword::GOSUB => {
                    let l: i32 = self
                        .next_int()?
                        .parse()
                        .map_err(|_| Bas2cError::Syntax("bad line number".to_string()))?;
                    if self.bpass == 1 {
                        self.subr.insert(l);
                    }
                    out = format!("S{:06}();\n", l);
                }

                keyword::FUNC => {
                    self.t.nocomment = false;
                    let fty = match self.check_vartype() {
                        Some(c) => BaseType::from_code(c).unwrap(),
                        None => BaseType::Int,
                    };
                    let func = self.next_variable()?;
                    self.nsp.set_local(&func);

                    let mut arg = String::new();
                    self.next_symbol('(')?;
                    if self.check_symbol(')') {
                        arg.push_str("void");
                    } else {
                        loop {
                            let var = self.next_variable()?;
                            // parameter type defaults to int
                            let mut vty = BaseType::Int;
                            if self.check_symbol(';') {
                                vty = BaseType::from_code(expect(self.check_vartype())?).unwrap();
                            }
                            let va = if VarType::new(vty).is_str() { "[32+1]" } else { "" };
                            let v = self.nsp.new_variable(&var, VarType::new(vty), va, "", false, true, false)?;
                            arg.push_str(&format!("{} {}{}", v.ty.type_name(false), var, va));
                            if !self.check_symbol(',') {
                                break;
                            }
                            arg.push_str(", ");
                        }
                        self.next_symbol(')')?;
                    }

                    // the function itself is a global name
                    let fv = self.nsp.new_variable(&func, VarType::new(fty), &arg, "", true, false, true)?;
                    let ftyname = fv.ty.type_name(true);

                    out = self.nestclose()?;
                    self.nestin('F');
                    out.push_str("\n/***************************/\n");
                    out.push_str(&format!("{} {}({})\n{{\n", ftyname, func, arg));
                    if self.bpass != 1 {
                        out.push_str(&self.nsp.definition(&func));
                    }
                }

                keyword::ENDFUNC => {
                    self.nsp.set_local("");
                    self.nestout('F')?;
                    self.t.nocomment = true;
                    out = "}\n".to_string();
                }

                keyword::RETURN => {
                    if self.check_symbol('(') {
                        let x = self.expr()?;
                        self.next_symbol(')')?;
                        out = match x {
                            Some(x) => format!("return {};\n", x.value()),
                            None => "return 0;\n".to_string(),
                        };
                    } else if self.nest.last() == Some(&'S') && self.nest.len() == 1 {
                        // return at subroutine depth closes it
                        self.nestout('S')?;
                        self.t.nocomment = true;
                        out = "return;\n}\n".to_string();
                    } else {
                        out = "return;\n".to_string();
                    }
                }

                keyword::BREAK => {
                    self.check_symbol(';');
                    out = "break;\n".to_string();
                }

                keyword::CONTINUE => {
                    out = "continue;\n".to_string();
                }

                keyword::LOCATE => {
                    if let Some(x) = self.expr()? {
                        self.next_symbol(',')?;
                        let y = expect(self.expr()?)?;
                        out = format!("locate({}, {});\n", x.value(), y.value());
                    } else {
                        self.next_symbol(',')?;
                    }
                    if self.check_symbol(',') {
                        let c = expect(self.expr()?)?;
                        out.push_str(&format!("b_csw({});\n", c.value()));
                    }
                }

                keyword::ERROR => {
                    // accepted and dropped, for source compatibility
                    let tok = self.t.fetch();
                    out = format!("/* error {} */\n", tok.text());
                }

                keyword::END => {
                    out = format!("{}(0);\n", self.b_exit);
                    if self.nest.last() == Some(&'M') && self.nest.len() == 1 {
                        self.nestout('M')?;
                        self.t.nocomment = true;
                        out.push_str("}\n");
                    }
                }

                _ => {
                    if let Some(r) = self.exfncall(kwv, false)? {
                        out = format!("{};\n", r.value());
                    } else {
                        return Err(Bas2cError::Syntax("syntax error".to_string()));
                    }
                }
            }
        } else if let Some(c) = self.check_any_symbol() {
            // a `}` closes the innermost braced then/else arm
            expect((c == '}').then_some(()))?;
            if matches!(self.nest.last(), Some(&('i' | 'e'))) {
                let top = *self.nest.last().unwrap();
                self.nestout(top)?;
                out = "}\n".to_string();
            }
            if self.nest.last() == Some(&'E') {
                self.nestout('E')?;
                out.push_str("}\n");
            } else {
                self.nestout('I')?;
                if !self.check_keyword(keyword::ELSE) {
                    out.push_str("}\n");
                } else if self.check_keyword(keyword::IF) {
                    let x = expect(self.expr()?)?;
                    self.next_keyword(keyword::THEN)?;
                    let nestin_ch = if self.check_symbol('{') { 'I' } else { 'i' };
                    self.nestin(nestin_ch);
                    out.push_str(&format!("}} else if ({}) {{\n", x.value()));
                } else {
                    let nestin_ch = if self.check_symbol('{') { 'E' } else { 'e' };
                    self.nestin(nestin_ch);
                    out.push_str("} else {\n");
                }
            }
        } else if let Some(cm) = self.check_comment() {
            out = cm;
        } else {
            let r = self.t.fetch();
            if let Some(s) = self.lvalue(Some(r), true, false)? {
                self.next_keyword(keyword::EQ)?;
                let x = self.initvar(s.ty)?;
                if s.ty.is_array() {
                    // whole-array assignment copies from a static const temporary
                    let v = expect(self.nsp.find(&s.name, false).cloned())?;
                    let tmp = format!("_initmp{:04}", self.initmp);
                    self.initmp += 1;
                    self.nsp.new_variable(&tmp, s.ty.to_const(), &v.arg, &x, false, false, false)?;
                    out = format!("memcpy({}, {}, sizeof({}));\n", s.name, tmp, s.name);
                } else if s.ty.is_str() {
                    out = format!("b_strncpy(sizeof({}), {}, {});\n", s.name, s.name, x);
                } else {
                    out = format!("{} = {};\n", s.name, x);
                }
            } else {
                let r = self.t.fetch();
                let f = expect(self.fncall(Some(r))?)?;
                out = format!("{};\n", f.value());
            }
        }

        Ok(Some(out))
    }

    /// Parse an assignable target: scalar, array element, whole array
    /// (assignment only) or string subscript. `Ok(None)` leaves the input
    /// untouched so the caller can try a function call.
    pub(crate) fn lvalue(&mut self, var: Option<Token>, islet: bool, isfor: bool) -> Result<Option<Variable>> {
        let unfetch = var.is_some();
        let var = match var {
            Some(v) => v,
            None => self.t.fetch(),
        };
        let name = match &var {
            Token::Variable(n) => n.clone(),
            _ => {
                if unfetch {
                    self.t.unfetch(var);
                }
                return Ok(None);
            }
        };
        let mut v = self.nsp.find(&name, false).cloned();
        let x = self.t.fetch();
        if x.is_symbol('(') {
            self.t.unfetch(x);
            if v.as_ref().map_or(true, |v| !v.ty.is_array()) {
                // not an array: this is a function call
                self.t.unfetch(var);
                return Ok(None);
            }
        } else {
            self.t.unfetch(x);
            if v.is_none() {
                if islet || isfor {
                    // assignment to an unknown name declares a global int
                    self.nsp.new_variable(&name, VarType::new(BaseType::Int), "", "", false, false, true)?;
                    v = self.nsp.find(&name, false).cloned();
                } else {
                    if unfetch {
                        self.t.unfetch(var);
                    }
                    return Ok(None);
                }
            }
        }
        let v = v.unwrap();
        let mut ty = v.ty;
        let mut sub = String::new();
        if v.ty.is_array() {
            if self.check_symbol('(') {
                sub.push('[');
                loop {
                    if let Some(a) = self.expr()? {
                        sub.push_str(a.value());
                    }
                    if !self.check_symbol(',') {
                        break;
                    }
                    sub.push_str("][");
                }
                self.next_symbol(')')?;
                sub.push(']');
                ty = ty.base();
            } else if !islet {
                // a whole array is assignable only
                if unfetch {
                    self.t.unfetch(var);
                }
                return Ok(None);
            }
        }
        if ty.is_str() && self.check_symbol('[') {
            let a = expect(self.expr()?)?;
            self.next_symbol(']')?;
            sub.push_str(&format!("[{}]", a.value()));
            ty = VarType::new(BaseType::Char);
        }
        Ok(Some(Variable::new(format!("{}{}", v.name, sub), ty)))
    }

    /// `[dim] T v[(d1, …)][=init], …` — define one or more variables.
    pub(crate) fn defvar(&mut self, ty: VarType) -> Result<()> {
        loop {
            let var = self.next_variable()?;
            let mut s = String::new();
            let mut rty = ty;
            if self.check_symbol('(') {
                // parenthesized dimensions make it an array, dim or not
                rty = ty.to_array();
                loop {
                    let a = expect(self.expr()?)?;
                    s.push_str(&format!("[({})+1]", a.value()));
                    if !self.check_symbol(',') {
                        break;
                    }
                }
                self.next_symbol(')')?;
            }
            if ty.is_str() {
                if self.check_symbol('[') {
                    let a = expect(self.expr()?)?;
                    s.push_str(&format!("[{}+1]", a.value()));
                    self.next_symbol(']')?;
                } else {
                    s.push_str("[32+1]");
                }
            }
            let mut x = String::new();
            if self.check_keyword(keyword::EQ) {
                x = self.initvar(rty)?;
            }
            self.nsp.new_variable(&var, rty, &s, &x, false, false, false)?;
            if !self.check_symbol(',') {
                break;
            }
        }
        Ok(())
    }

    /// Initializer: a brace-delimited literal for arrays, an expression
    /// otherwise.
    pub(crate) fn initvar(&mut self, ty: VarType) -> Result<String> {
        if ty.is_array() {
            self.next_symbol('{')?;
            let mut n = String::from("{");
            let mut depth = 1;
            while depth > 0 {
                if self.check_symbol('{') {
                    n.push('{');
                    depth += 1;
                } else if self.check_symbol('}') {
                    n.push('}');
                    depth -= 1;
                } else if let Some(c) = self.check_any_symbol() {
                    n.push(c);
                } else if self.check_keyword(keyword::EOL) {
                    n.push('\n');
                } else if let Some(cm) = self.check_comment() {
                    n.push_str(&cm);
                } else {
                    n.push_str(expect(self.expr()?)?.value());
                }
            }
            Ok(n)
        } else {
            Ok(expect(self.expr()?)?.value().to_string())
        }
    }

    /// Call of a user-defined (or, unless `-u`, undeclared) function.
    pub(crate) fn fncall(&mut self, var: Option<Token>) -> Result<Option<Token>> {
        let unfetch = var.is_none();
        let var = match var {
            Some(v) => v,
            None => self.t.fetch(),
        };
        let name = match &var {
            Token::Variable(n) => n.clone(),
            _ => {
                if unfetch {
                    self.t.unfetch(var);
                }
                return Ok(None);
            }
        };
        let v = self.nsp.find(&name, false).cloned();
        if self.flag & crate::F_UNDEFERR != 0 {
            expect_msg((v.is_some() || self.bpass == 1).then_some(()), &format!("undefined function {}", name))?;
        }
        let mut arg = String::new();
        self.next_symbol('(')?;
        loop {
            if let Some(a) = self.expr()? {
                arg.push_str(a.value());
            }
            if !self.check_symbol(',') {
                break;
            }
            arg.push_str(", ");
        }
        self.next_symbol(')')?;
        let call = format!("{}({})", name, arg);
        Ok(Some(match v {
            Some(v) => Token::with_type(expr_type_of(v.ty.base), call),
            None => Token::Function(call),
        }))
    }

    /// Expand a library-function call from its descriptor: walk the X-BASIC
    /// signature consuming arguments, then render the C call from the
    /// template.
    pub(crate) fn exfncall(&mut self, kw: i32, isexpr: bool) -> Result<Option<Token>> {
        let nt = self.t.fetch();

        // int is also a type keyword; parenthesized it is the function
        let mut kw = kw;
        if kw == keyword::INT && nt.is_symbol('(') {
            kw = self.kw.find("int$$").unwrap_or(keyword::NONE);
        }

        let Some(ex) = self.kw.exfn(kw) else {
            self.t.unfetch(nt);
            return Ok(None);
        };
        let mut ex = ex.clone();

        // assignable / bracketed spellings route to their twin entries
        if ex.name == "date$" && nt.is_keyword(keyword::EQ) {
            ex = expect(self.kw.find("date$$").and_then(|k| self.kw.exfn(k)))?.clone();
        } else if ex.name == "time$" && nt.is_keyword(keyword::EQ) {
            ex = expect(self.kw.find("time$$").and_then(|k| self.kw.exfn(k)))?.clone();
        } else {
            if ex.name == "inkey$" && nt.is_symbol('(') {
                ex = expect(self.kw.find("inkey$$").and_then(|k| self.kw.exfn(k)))?.clone();
            } else if ex.name == "color" && nt.is_symbol('[') {
                ex = expect(self.kw.find("color$$").and_then(|k| self.kw.exfn(k)))?.clone();
            }
            self.t.unfetch(nt);
        }

        // remember the group for the #include lines
        if !ex.group.is_empty() {
            self.exfngroup.insert(ex.group.clone());
        }

        let mut rty = ExprType::Int;
        match ex.rtype.chars().next() {
            Some('I') => rty = ExprType::Int,
            Some('C') => rty = ExprType::Char,
            Some('F') => rty = ExprType::Float,
            Some('S') => rty = ExprType::Str,
            _ => {
                // void: usable as a statement only
                expect((!isexpr).then_some(()))?;
            }
        }

        let mut fn_name = if ex.cfunc.is_empty() { ex.name.clone() } else { ex.cfunc.clone() };
        let mut av: Vec<String> = Vec::new();

        let sig = ex.arg.clone().into_bytes();
        let mut s: &[u8] = &sig;
        while !s.is_empty() {
            let c = s[0] as char;
            if matches!(c, '(' | '[' | ']' | ')') {
                self.next_symbol(c)?;
            } else if c == ',' {
                if !self.check_symbol(',') {
                    // every remaining argument was omitted
                    s = &s[1..];
                    while !s.is_empty() {
                        let c = s[0] as char;
                        if matches!(c, 'I' | 'S' | 'C' | 'F') && s.get(1) == Some(&b'-') {
                            av.push(NASI.to_string());
                            s = &s[2..];
                        } else if c == ',' {
                            s = &s[1..];
                        } else if matches!(c, '(' | '[' | ']' | ')') {
                            self.next_symbol(c)?;
                            s = &s[1..];
                        } else {
                            return Err(Bas2cError::Syntax("syntax error".to_string()));
                        }
                    }
                    break;
                }
            } else if matches!(c, 'I' | 'S' | 'C' | 'F' | 'N') {
                if s.get(1) == Some(&b'A') {
                    // array passed by name; must be declared
                    s = &s[1..];
                    let vn = self.next_variable()?;
                    let va = expect(self.nsp.find(&vn, false).cloned())?;
                    expect(va.ty.is_array().then_some(()))?;
                    av.push(vn);
                } else {
                    match self.expr()? {
                        None => {
                            expect((s.get(1) == Some(&b'-')).then_some(()))?;
                            if ex.name == "exit" {
                                av.push("0".to_string());
                            } else if ex.name == "pi" {
                                fn_name = "pi".to_string();
                                av.push(String::new());
                            } else {
                                av.push(NASI.to_string());
                            }
                            s = &s[1..];
                        }
                        Some(x) => {
                            if ex.name == "str$" && matches!(x, Token::Float(_)) {
                                fn_name = "b_strfS".to_string();
                            } else if ex.name == "abs" && matches!(x, Token::Float(_)) {
                                fn_name = "fabs".to_string();
                                rty = ExprType::Float;
                            }
                            av.push(x.value().to_string());
                        }
                    }
                }
            }
            s = &s[1..];
        }

        let mut arg = String::new();
        let mut i = 0usize;
        for &b in ex.carg.as_bytes() {
            match b {
                b',' => arg.push(','),
                b'#' => {
                    let prev = expect(i.checked_sub(1).and_then(|j| av.get(j)))?;
                    arg.push_str(&format!("sizeof({})", prev));
                }
                b'@' => {
                    let prev = expect(i.checked_sub(1).and_then(|j| av.get(j)))?;
                    arg.push_str(&format!("sizeof({}[0])", prev));
                }
                b'&' => {
                    let a = expect(av.get(i))?;
                    arg.push_str(&format!("&{}", a));
                    i += 1;
                }
                b'%' => {
                    if let Some(a) = av.get(i) {
                        arg.push_str(a);
                    }
                    i += 1;
                }
                b'$' => {
                    arg.push_str(&format!("strtmp{}", self.strtmp));
                    self.strtmp += 1;
                }
                _ => {}
            }
        }
        Ok(Some(Token::with_type(rty, format!("{}({})", fn_name, arg))))
    }
}
