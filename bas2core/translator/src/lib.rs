/*

 ▄▄▄▄    ██▓    ▄▄▄       ▄████▄   ██ ▄█▀ ██▀███   █    ██   ██████  ██░ ██
▓█████▄ ▓██▒   ▒████▄    ▒██▀ ▀█   ██▄█▒ ▓██ ▒ ██▒ ██  ▓██▒▒██    ▒ ▓██░ ██▒
▒██▒ ▄██▒██░   ▒██  ▀█▄  ▒▓█    ▄ ▓███▄░ ▓██ ░▄█ ▒▓██  ▒██░░ ▓██▄   ▒██▀▀██░
▒██░█▀  ▒██░   ░██▄▄▄▄██ ▒▓▓▄ ▄██▒▓██ █▄ ▒██▀▀█▄  ▓▓█  ░██░  ▒   ██▒░▓█ ░██
░▓█  ▀█▓░██████▒▓█   ▓██▒▒ ▓███▀ ░▒██▒ █▄░██▓ ▒██▒▒▒█████▓ ▒██████▒▒░▓█▒░██▓
░▒▓███▀▒░ ▒░▓  ░▒▒   ▓▒█░░ ░▒ ▒  ░▒ ▒▒ ▓▒░ ▒▓ ░▒▓░░▒▓▒ ▒ ▒ ▒ ▒▓▒ ▒ ░ ▒ ░░▒░▒
▒░▒   ░ ░ ░ ▒  ░ ▒   ▒▒ ░  ░  ▒   ░ ░▒ ▒░  ░▒ ░ ▒░░░▒░ ░ ░ ░ ░▒  ░ ░ ▒ ░▒░ ░
 ░    ░   ░ ░    ░   ▒   ░        ░ ░░ ░   ░░   ░  ░░░ ░ ░ ░  ░  ░   ░  ░░ ░
 ░          ░  ░     ░  ░░ ░      ░  ░      ░        ░           ░   ░  ░  ░
      ░                  ░
Copyright (C) 2026, Blackrush LLC
Created by Erik Olson, Tarpon Springs, Florida
For more information, visit BlackrushDrive.com

MIT License

Copyright (c) 2026 Erik Lee Olson for Blackrush, LLC

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.

*/

//! Two-pass X-BASIC → C translation driver.
//!
//! Pass 1 walks every statement discovering labels, subroutine targets,
//! variable and function definitions and the string-temporary high-water
//! mark; pass 2 rewinds and emits the C program. Both passes consume the
//! same token sequence.

use std::collections::BTreeSet;
use std::io::{self, Write};

use bas2c_common::{Bas2cError, Result};
use bas2c_keyword::{self as keyword, KeywordTable};
use bas2c_lexer::{ExprType, Token, TokenGen};
use bas2c_namespace::{BaseType, NameSpace};

mod expr;
pub mod service;
mod stmt;

pub const F_DEBUG: u32 = 1 << 0;
pub const F_UNDEFERR: u32 = 1 << 1;
pub const F_NOBINIT: u32 = 1 << 2;
pub const F_BASCOMMENT: u32 = 1 << 3;
pub const F_VERBOSE: u32 = 1 << 4;
pub const F_BCCOMPAT: u32 = 1 << 5;

/// One reported diagnostic, with enough context to reprint the offending
/// line and a caret under the failing token.
#[derive(Debug, Clone)]
pub struct Diag {
    pub lineno: i32,
    pub baslineno: i32,
    pub column: usize,
    pub message: String,
    pub srcline: String,
}

impl Diag {
    pub fn print(&self, finame: &str) {
        eprintln!("{}:{} ({}): error: {}", finame, self.lineno, self.baslineno, self.message);
        if !self.srcline.is_empty() {
            eprint!("{}", self.srcline);
            eprintln!("{}^", " ".repeat(self.column));
        }
    }
}

pub struct Bas2C<'a> {
    kw: &'a KeywordTable,
    flag: u32,
    bpass: i32,

    t: TokenGen<'a>,
    label: BTreeSet<i32>,
    subr: BTreeSet<i32>,
    nsp: NameSpace,

    strtmp: i32,
    strtmp_max: i32,
    initmp: i32,
    exfngroup: BTreeSet<String>,
    b_exit: &'static str,

    nest: Vec<char>,
    indentcnt: i32,

    exitstatus: i32,
    finame: String,
    quiet: bool,
    diags: Vec<Diag>,
}

fn nest_err_msg(ty: char) -> &'static str {
    match ty {
        'f' => "mismatched for - next",
        'w' => "mismatched while - endwhile",
        'r' => "mismatched repeat - until",
        's' => "mismatched switch - endswitch",
        'F' => "mismatched func - endfunc",
        'i' | 'I' | 'e' | 'E' => "mismatched if - then - else",
        _ => "mismatched nesting",
    }
}

pub(crate) fn expect<T>(v: Option<T>) -> Result<T> {
    v.ok_or_else(|| Bas2cError::Syntax("syntax error".to_string()))
}

pub(crate) fn expect_msg<T>(v: Option<T>, msg: &str) -> Result<T> {
    v.ok_or_else(|| Bas2cError::Syntax(msg.to_string()))
}

pub(crate) fn expr_type_of(ty: BaseType) -> ExprType {
    match ty {
        BaseType::Int => ExprType::Int,
        BaseType::Char => ExprType::Char,
        BaseType::Float => ExprType::Float,
        BaseType::Str => ExprType::Str,
    }
}

impl<'a> Bas2C<'a> {
    pub fn new(kw: &'a KeywordTable, src: String, flag: u32, cindent: i32) -> Self {
        let t = TokenGen::new(
            src,
            kw,
            if flag & F_BASCOMMENT != 0 { cindent } else { -1 },
            flag & F_VERBOSE != 0,
        );
        let mut b = Self {
            kw,
            flag,
            bpass: 0,
            t,
            label: BTreeSet::new(),
            subr: BTreeSet::new(),
            nsp: NameSpace::new(),
            strtmp: 0,
            strtmp_max: 0,
            initmp: 0,
            exfngroup: BTreeSet::new(),
            b_exit: if flag & F_NOBINIT != 0 { "exit" } else { "b_exit" },
            nest: vec!['M'],
            indentcnt: 0,
            exitstatus: 0,
            finame: String::from("<stdin>"),
            quiet: false,
            diags: Vec::new(),
        };
        b.set_pass(0);
        b
    }

    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn diags(&self) -> &[Diag] {
        &self.diags
    }

    pub fn namespace(&self) -> &NameSpace {
        &self.nsp
    }

    pub fn labels(&self) -> &BTreeSet<i32> {
        &self.label
    }

    pub fn subroutines(&self) -> &BTreeSet<i32> {
        &self.subr
    }

    fn set_pass(&mut self, bpass: i32) {
        self.bpass = bpass;
        self.update_strtmp();
        self.nsp.set_pass(bpass);
        self.nsp.set_local("");
        self.initmp = 0;
        self.nest.clear();
        self.nest.push('M');
        self.indentcnt = 0;
        self.t.set_pass(bpass);
        self.t.rewind();
    }

    // strtmp snapshots are taken at statement boundaries
    fn update_strtmp(&mut self) {
        self.strtmp_max = self.strtmp_max.max(self.strtmp);
        self.strtmp = 0;
    }

    fn bc(&self) -> bool {
        self.flag & F_BCCOMPAT != 0
    }

    fn nestin(&mut self, ty: char) {
        self.nest.push(ty);
    }

    fn nestout(&mut self, ty: char) -> Result<()> {
        if self.nest.last() != Some(&ty) {
            return Err(Bas2cError::Syntax(nest_err_msg(ty).to_string()));
        }
        self.nest.pop();
        self.indentcnt -= 1;
        Ok(())
    }

    fn indent_init(&mut self) {
        self.indentcnt = self.nest.len() as i32;
    }

    fn indentout(&self) -> String {
        "\t".repeat(self.indentcnt.max(0) as usize)
    }

    /// Close the open main body or subroutine; anything else still open is
    /// a structural error.
    fn nestclose(&mut self) -> Result<String> {
        if self.nest.len() == 1 && self.nest.last() == Some(&'M') {
            // main fell off the end without an explicit `end`
            let r = format!("{}{}(0);\n}}\n", self.indentout(), self.b_exit);
            self.nestout('M')?;
            Ok(r)
        } else if self.nest.len() == 1 && self.nest.last() == Some(&'S') {
            self.nestout('S')?;
            Ok("}\n".to_string())
        } else if let Some(&top) = self.nest.last() {
            Err(Bas2cError::Syntax(nest_err_msg(top).to_string()))
        } else {
            Ok(String::new())
        }
    }

    /// Global definitions followed by the subroutine prototypes.
    fn gendefine(&self) -> String {
        let mut r = self.nsp.definition("");
        for l in &self.subr {
            r.push_str(&format!("void S{:06}(void);\n", l));
        }
        r
    }

    /// Label or subroutine opening for the current line, if its BASIC line
    /// number was discovered as a jump target on pass 1.
    fn genlabel(&mut self) -> Result<String> {
        let l = self.t.get_goto_lineno();
        if l != 0 {
            if self.label.contains(&l) {
                return Ok(format!("L{:06}:\n", l));
            } else if self.subr.contains(&l) {
                self.t.nocomment = false;
                let mut r = self.nestclose()?;
                self.nestin('S');
                r.push_str("\n/***************************/\n");
                self.indentcnt += 1;
                r.push_str(&format!("void S{:06}(void)\n{{\n", l));
                return Ok(r);
            }
        }
        Ok(String::new())
    }

    fn error(&mut self, msg: &str) {
        self.exitstatus = 1;
        let d = Diag {
            lineno: self.t.lineno,
            baslineno: self.t.baslineno,
            column: self.t.curline.len().saturating_sub(self.t.prelen),
            message: msg.to_string(),
            srcline: self.t.curline.clone(),
        };
        if !self.quiet {
            d.print(&self.finame);
        }
        self.diags.push(d);
        self.t.skip();
    }

    /// Discovery pass. Namespace errors are reported; syntax errors skip to
    /// the next statement separator so that as many definitions as possible
    /// are found before emission.
    pub fn run_pass1(&mut self) {
        self.set_pass(1);
        loop {
            match self.statement() {
                Ok(None) => break,
                Ok(Some(_)) => {}
                Err(Bas2cError::Namespace(m)) => self.error(&m),
                Err(Bas2cError::Syntax(_)) => self.t.skip(),
            }
        }
    }

    /// Run both passes, writing the C program to `fo`. Returns the exit
    /// status: 0 on success, 1 if any diagnostic was reported.
    pub fn start(&mut self, fo: &mut dyn Write, finame: &str) -> io::Result<i32> {
        self.finame = finame.to_string();
        self.run_pass1();

        self.set_pass(2);
        write!(fo, "#include <basic0.h>\n")?;
        write!(fo, "#include <string.h>\n")?;
        if self.flag & F_NOBINIT != 0 {
            write!(fo, "#include <stdlib.h>\n")?;
        }
        for g in &self.exfngroup {
            write!(fo, "#include <{}.h>\n", g.to_ascii_lowercase())?;
        }
        write!(fo, "\n{}", self.gendefine())?;
        for i in 0..self.strtmp_max {
            write!(fo, "static unsigned char strtmp{}[258];\n", i)?;
        }
        write!(fo, "\n/******** program start ********/\n")?;
        write!(fo, "void main(int b_argc, char *b_argv[])\n{{\n")?;
        if self.flag & F_NOBINIT == 0 {
            write!(fo, "\tb_init();\n")?;
        }
        loop {
            self.indent_init();
            match self.statement() {
                Ok(s) => {
                    write!(fo, "{}", self.t.get_ccode())?;
                    match self.genlabel() {
                        Ok(l) => write!(fo, "{}", l)?,
                        Err(e) => {
                            self.error(&e.to_string());
                            continue;
                        }
                    }
                    let Some(body) = s else { break };
                    let indent = self.indentout();
                    let mut rest = body.as_str();
                    while let Some(nl) = rest.find('\n') {
                        writeln!(fo, "{}{}", indent, &rest[..nl])?;
                        rest = &rest[nl + 1..];
                    }
                }
                Err(e) => self.error(&e.to_string()),
            }
        }
        match self.nestclose() {
            Ok(s) => write!(fo, "{}", s)?,
            Err(e) => self.error(&e.to_string()),
        }

        Ok(self.exitstatus)
    }

    fn check_symbol(&mut self, c: char) -> bool {
        let t = self.t.fetch();
        if t.is_symbol(c) {
            true
        } else {
            self.t.unfetch(t);
            false
        }
    }

    fn check_keyword(&mut self, k: i32) -> bool {
        let t = self.t.fetch();
        if t.is_keyword(k) {
            true
        } else {
            self.t.unfetch(t);
            false
        }
    }

    fn check_keyword_any(&mut self) -> Option<i32> {
        match self.t.fetch() {
            Token::Keyword(k) => Some(k),
            other => {
                self.t.unfetch(other);
                None
            }
        }
    }

    fn check_any_symbol(&mut self) -> Option<char> {
        match self.t.fetch() {
            Token::Symbol(c) => Some(c),
            other => {
                self.t.unfetch(other);
                None
            }
        }
    }

    fn check_str(&mut self) -> Option<String> {
        match self.t.fetch() {
            Token::Str(v) => Some(v),
            other => {
                self.t.unfetch(other);
                None
            }
        }
    }

    fn check_comment(&mut self) -> Option<String> {
        match self.t.fetch() {
            Token::Comment(v) => Some(v),
            other => {
                self.t.unfetch(other);
                None
            }
        }
    }

    /// Type-keyword code (`int`/`char`/`float`/`str`) if one is next.
    fn check_vartype(&mut self) -> Option<i32> {
        let t = self.t.fetch();
        if t.is_vartype() {
            match t {
                Token::Keyword(k) => Some(k),
                _ => unreachable!(),
            }
        } else {
            self.t.unfetch(t);
            None
        }
    }

    fn next_symbol(&mut self, c: char) -> Result<()> {
        if self.t.fetch().is_symbol(c) {
            Ok(())
        } else {
            Err(Bas2cError::Syntax(format!("missing {}", c)))
        }
    }

    fn next_keyword(&mut self, k: i32) -> Result<()> {
        if self.t.fetch().is_keyword(k) {
            Ok(())
        } else {
            Err(Bas2cError::Syntax(format!("missing {}", keyword::keyword_name(k).unwrap_or("keyword"))))
        }
    }

    fn next_variable(&mut self) -> Result<String> {
        match self.t.fetch() {
            Token::Variable(n) => Ok(n),
            _ => Err(Bas2cError::Syntax("syntax error".to_string())),
        }
    }

    fn next_int(&mut self) -> Result<String> {
        match self.t.fetch() {
            Token::Int(v) => Ok(v),
            _ => Err(Bas2cError::Syntax("syntax error".to_string())),
        }
    }
}
