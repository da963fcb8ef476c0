//! Line-oriented token generator for X-BASIC source.
//!
//! The whole input is slurped at construction so that both translation
//! passes can rewind it, even when it arrived on standard input. Tokens can
//! be pushed back to any depth; `get_goto_lineno` surfaces a line's BASIC
//! line number exactly once so the driver can emit labels and subroutine
//! openings.

use bas2c_keyword::{self as keyword, KeywordTable};

mod token;

pub use token::{ExprType, Token};

pub struct TokenGen<'a> {
    kw: &'a KeywordTable,
    filebuf: String,
    fp: usize,

    line: String,
    pub curline: String,
    pub lineno: i32,
    pub baslineno: i32,
    golineno: i32,
    firsttoken: bool,

    cached: Vec<Token>,
    ccode: String,
    pub nocomment: bool,

    bpass: i32,
    cindent: i32,
    verbose: bool,

    pub prelen: usize,
    curlen: usize,
}

impl<'a> TokenGen<'a> {
    /// `cindent < 0` disables the BASIC-line-as-comment capture; otherwise
    /// it is the number of tabs prepended to each captured comment line.
    pub fn new(src: String, kw: &'a KeywordTable, cindent: i32, verbose: bool) -> Self {
        let mut t = Self {
            kw,
            filebuf: src,
            fp: 0,
            line: String::new(),
            curline: String::new(),
            lineno: 0,
            baslineno: 0,
            golineno: 0,
            firsttoken: true,
            cached: Vec::new(),
            ccode: String::new(),
            nocomment: false,
            bpass: 0,
            cindent,
            verbose,
            prelen: 0,
            curlen: 0,
        };
        t.rewind();
        t
    }

    pub fn set_pass(&mut self, bpass: i32) {
        self.bpass = bpass;
    }

    /// Back to the start of the input, dropping all per-pass state.
    pub fn rewind(&mut self) {
        self.fp = 0;
        self.line.clear();
        self.curline.clear();
        self.lineno = 0;
        self.baslineno = 0;
        self.golineno = 0;
        self.firsttoken = true;
        self.cached.clear();
        self.nocomment = false;
        self.ccode.clear();
        self.prelen = 0;
        self.curlen = 0;
    }

    /// BASIC line number of the current line, consumable exactly once.
    pub fn get_goto_lineno(&mut self) -> i32 {
        let r = self.golineno;
        self.golineno = 0;
        r
    }

    /// `"<lineno> (<basic-lineno>)"` for diagnostics.
    pub fn lineno_display(&self) -> String {
        format!("{} ({})", self.lineno, self.baslineno)
    }

    /// Accumulated `#c`…`#endc` content (and `-c` comment lines) since the
    /// last call.
    pub fn get_ccode(&mut self) -> String {
        std::mem::take(&mut self.ccode)
    }

    /// Source line with comment markers and line endings removed, for
    /// embedding in a C comment.
    pub fn bas_comment_line(line: &str) -> String {
        line.replace("/*", "").replace("*/", "").replace('\r', "").replace('\n', "")
    }

    fn readline(&mut self) -> bool {
        let mut buf = String::new();
        let mut res = true;
        loop {
            if self.fp >= self.filebuf.len() {
                res = false;
                break;
            }
            let c = self.filebuf[self.fp..].chars().next().unwrap();
            self.fp += c.len_utf8();
            buf.push(c);
            if c == '\n' {
                break;
            }
        }
        // ASCII SUB terminates the input
        if buf.starts_with('\x1a') {
            buf.clear();
        }

        self.line = buf;
        self.curline = self.line.clone();
        self.golineno = 0;
        self.firsttoken = true;
        if !res {
            return false;
        }

        self.lineno += 1;
        self.baslineno += 1;
        if self.cindent >= 0 && !self.line.is_empty() {
            for _ in 0..self.cindent {
                self.ccode.push('\t');
            }
            self.ccode.push_str("/*===");
            self.ccode.push_str(&Self::bas_comment_line(&self.line));
            self.ccode.push_str("===*/\n");
        }
        if self.verbose && self.bpass == 2 {
            eprint!("{}", self.line);
        }

        // a leading decimal integer is the BASIC line number; strip it
        let b = self.line.as_bytes();
        let mut p = 0usize;
        while p < b.len() && (b[p] == b' ' || b[p] == b'\t') {
            p += 1;
        }
        let digits = p;
        while p < b.len() && b[p].is_ascii_digit() {
            p += 1;
        }
        if p > digits {
            let num: i32 = self.line[digits..p].parse().unwrap_or(0);
            self.golineno = num;
            self.baslineno = num;
            while p < b.len() && (b[p] == b' ' || b[p] == b'\t') {
                p += 1;
            }
            self.line = self.line[p..].to_string();
        }

        true
    }

    fn getline(&mut self) {
        if self.line.is_empty() {
            self.readline();
            // capture #c ... #endc verbatim
            if self.line.starts_with("#c") {
                loop {
                    if !self.readline() {
                        break;
                    }
                    if self.line.starts_with("#endc") {
                        break;
                    }
                    let l = self.line.clone();
                    self.ccode.push_str(&l);
                }
                self.readline();
            }
        }
        let trimmed = self.line.trim_start_matches([' ', '\t', '\r']);
        if trimmed.len() != self.line.len() {
            self.line = trimmed.to_string();
        }
        self.prelen = self.line.len();
        self.curlen = self.prelen;
    }

    fn get(&mut self) -> Token {
        self.getline();
        if self.line.is_empty() {
            return Token::Keyword(keyword::EOF_KW);
        }
        if self.line.starts_with('\r') {
            self.line.remove(0);
            if self.line.is_empty() {
                return Token::Keyword(keyword::EOL);
            }
        }
        if self.line == "\n" {
            self.line.clear();
            return Token::Keyword(keyword::EOL);
        }
        if self.line.starts_with("/*") {
            // a whole-line comment passes through; mid-line ones collapse
            if self.firsttoken && !self.nocomment {
                let comment = format!("/*{}*/\n", Self::bas_comment_line(&self.line));
                self.line = "\n".to_string();
                return Token::Comment(comment);
            } else {
                self.line.clear();
                return Token::Keyword(keyword::EOL);
            }
        }

        self.firsttoken = false;

        let s: Vec<char> = self.line.chars().collect();
        let c = s[0];
        match c {
            '"' => {
                // string literal; an unclosed quote is closed at end of line
                let mut v = String::from('"');
                let mut i = 1usize;
                loop {
                    if i >= s.len() || s[i] == '\n' {
                        v.push('"');
                        break;
                    }
                    let c2 = s[i];
                    i += 1;
                    v.push(c2);
                    if c2 == '"' {
                        break;
                    }
                }
                self.line = s[i..].iter().collect();
                return Token::Str(v);
            }
            '\'' => {
                // character literal 'x'
                if s.len() >= 3 && s[1] != '\0' && s[1] != '\n' && s[1] != '\'' && s[2] == '\'' {
                    let v: String = s[..3].iter().collect();
                    self.line = s[3..].iter().collect();
                    return Token::Int(v);
                }
            }
            '&' => {
                if s.len() >= 2 {
                    match s[1].to_ascii_lowercase() {
                        'h' => {
                            let mut v = String::from("0x");
                            let mut i = 2usize;
                            while i < s.len() && s[i].is_ascii_hexdigit() {
                                v.push(s[i]);
                                i += 1;
                            }
                            self.line = s[i..].iter().collect();
                            return Token::Int(v);
                        }
                        'o' => {
                            let mut v = String::from("0");
                            let mut i = 2usize;
                            while i < s.len() && ('0'..='7').contains(&s[i]) {
                                v.push(s[i]);
                                i += 1;
                            }
                            self.line = s[i..].iter().collect();
                            return Token::Int(v);
                        }
                        'b' => {
                            let mut v = String::from("0b");
                            let mut i = 2usize;
                            while i < s.len() && (s[i] == '0' || s[i] == '1') {
                                v.push(s[i]);
                                i += 1;
                            }
                            self.line = s[i..].iter().collect();
                            return Token::Int(v);
                        }
                        _ => {}
                    }
                }
            }
            '0'..='9' | '.' => {
                let mut v = String::from(c);
                let mut i = 1usize;
                while i < s.len() && s[i].is_ascii_digit() {
                    v.push(s[i]);
                    i += 1;
                }
                let mut next = if i < s.len() { s[i] } else { '\0' };
                if next == '.' || next == 'e' || next == 'E' || next == '#' {
                    if next == '.' {
                        v.push('.');
                        i += 1;
                        while i < s.len() && s[i].is_ascii_digit() {
                            v.push(s[i]);
                            i += 1;
                        }
                        next = if i < s.len() { s[i] } else { '\0' };
                    }
                    if next == 'e' || next == 'E' {
                        v.push(next);
                        i += 1;
                        if i < s.len() && (s[i] == '-' || s[i] == '+') {
                            v.push(s[i]);
                            i += 1;
                        }
                        while i < s.len() && s[i].is_ascii_digit() {
                            v.push(s[i]);
                            i += 1;
                        }
                        next = if i < s.len() { s[i] } else { '\0' };
                    }
                    if next == '#' {
                        // type suffix; accepted but not part of the C literal
                        i += 1;
                    }
                    self.line = s[i..].iter().collect();
                    return Token::Float(v);
                } else {
                    // leading zeros would read as octal in C
                    while v.len() > 1 && v.starts_with('0') {
                        v.remove(0);
                    }
                    self.line = s[i..].iter().collect();
                    return Token::Int(v);
                }
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let mut v = String::from(c);
                let mut i = 1usize;
                while i < s.len() && (s[i].is_ascii_alphanumeric() || s[i] == '_' || s[i] == '$') {
                    v.push(s[i]);
                    i += 1;
                }
                self.line = s[i..].iter().collect();
                if let Some(k) = self.kw.find(&v) {
                    return Token::Keyword(k);
                }
                // '$' is not a C identifier character
                return Token::Variable(v.replace('$', "S"));
            }
            _ => {
                if let Some((w, l)) = keyword::find_op(&self.line) {
                    self.line = self.line[l..].to_string();
                    return Token::Keyword(w);
                }
            }
        }
        self.line = s[1..].iter().collect();
        Token::Symbol(c)
    }

    /// Next token, honoring pushed-back ones first.
    pub fn fetch(&mut self) -> Token {
        self.prelen = self.curlen;
        self.curlen = self.line.len();
        match self.cached.pop() {
            Some(t) => t,
            None => self.get(),
        }
    }

    /// Push one token back; any depth is allowed.
    pub fn unfetch(&mut self, t: Token) {
        self.cached.push(t);
        self.curlen = self.prelen;
    }

    /// Advance to the next `:`, end of line or end of input.
    pub fn skip(&mut self) {
        loop {
            let t = self.fetch();
            if t.is_symbol(':') || t.is_keyword(keyword::EOL) || t.is_keyword(keyword::EOF_KW) {
                return;
            }
        }
    }
}
