//! X-BASIC reserved words, operators and the library-function registry.
//!
//! Codes live in disjoint ranges so the consumer can switch on them:
//! type keywords 1..=5, operators 1001..=1018, statements 2001..=2030,
//! EOL 9999, EOF 0. Library functions loaded from `bas2c.def` are assigned
//! synthetic codes starting at 5000.

use std::collections::{BTreeMap, HashMap};

pub const EOF_KW: i32 = 0;

pub const INT: i32 = 1;
pub const CHAR: i32 = 2;
pub const FLOAT: i32 = 3;
pub const STR: i32 = 4;
pub const DIM: i32 = 5;

pub const PLUS: i32 = 1001;
pub const MINUS: i32 = 1002;
pub const MUL: i32 = 1003;
pub const DIV: i32 = 1004;
pub const YEN: i32 = 1005;
pub const MOD: i32 = 1006;
pub const SHR: i32 = 1007;
pub const SHL: i32 = 1008;
pub const EQ: i32 = 1009;
pub const NE: i32 = 1010;
pub const GT: i32 = 1011;
pub const LT: i32 = 1012;
pub const GE: i32 = 1013;
pub const LE: i32 = 1014;
pub const NOT: i32 = 1015;
pub const AND: i32 = 1016;
pub const OR: i32 = 1017;
pub const XOR: i32 = 1018;

pub const PRINT: i32 = 2001;
pub const FOR: i32 = 2002;
pub const TO: i32 = 2003;
pub const NEXT: i32 = 2004;
pub const GOTO: i32 = 2005;
pub const GOSUB: i32 = 2006;
pub const IF: i32 = 2007;
pub const THEN: i32 = 2008;
pub const ELSE: i32 = 2009;
pub const END: i32 = 2010;
pub const RETURN: i32 = 2011;
pub const FUNC: i32 = 2012;
pub const ENDFUNC: i32 = 2013;
pub const WHILE: i32 = 2014;
pub const ENDWHILE: i32 = 2015;
pub const REPEAT: i32 = 2016;
pub const UNTIL: i32 = 2017;
pub const BREAK: i32 = 2018;
pub const CONTINUE: i32 = 2019;
pub const SWITCH: i32 = 2020;
pub const CASE: i32 = 2021;
pub const DEFAULT: i32 = 2022;
pub const ENDSWITCH: i32 = 2023;
pub const INPUT: i32 = 2024;
pub const LINPUT: i32 = 2025;
pub const LPRINT: i32 = 2026;
pub const USING: i32 = 2027;
pub const TAB: i32 = 2028;
pub const LOCATE: i32 = 2029;
pub const ERROR: i32 = 2030;

pub const EOL: i32 = 9999;

pub const NONE: i32 = -1;

pub const EXFN_BASE: i32 = 5000;

const WORDS: &[(&str, i32)] = &[
    ("print", PRINT),
    ("for", FOR),
    ("to", TO),
    ("next", NEXT),
    ("goto", GOTO),
    ("gosub", GOSUB),
    ("if", IF),
    ("then", THEN),
    ("else", ELSE),
    ("end", END),
    ("return", RETURN),
    ("func", FUNC),
    ("endfunc", ENDFUNC),
    ("while", WHILE),
    ("endwhile", ENDWHILE),
    ("repeat", REPEAT),
    ("until", UNTIL),
    ("break", BREAK),
    ("continue", CONTINUE),
    ("switch", SWITCH),
    ("case", CASE),
    ("default", DEFAULT),
    ("endswitch", ENDSWITCH),
    ("input", INPUT),
    ("linput", LINPUT),
    ("lprint", LPRINT),
    ("using", USING),
    ("tab", TAB),
    ("locate", LOCATE),
    ("error", ERROR),
    ("int", INT),
    ("char", CHAR),
    ("float", FLOAT),
    ("str", STR),
    ("dim", DIM),
    ("mod", MOD),
    ("shr", SHR),
    ("shl", SHL),
    ("not", NOT),
    ("and", AND),
    ("or", OR),
    ("xor", XOR),
];

const OPS: &[(&str, i32)] = &[
    ("?", PRINT),
    ("+", PLUS),
    ("-", MINUS),
    ("*", MUL),
    ("/", DIV),
    ("\\", YEN),
    ("=", EQ),
    ("<>", NE),
    (">=", GE),
    ("<=", LE),
    (">", GT),
    ("<", LT),
];

/// Operator at the start of `s`: its code and how many characters it spans.
/// Two-character operators are tried before one-character ones.
pub fn find_op(s: &str) -> Option<(i32, usize)> {
    let b = s.as_bytes();
    if b.len() >= 2 {
        if let Some(&(_, k)) = OPS.iter().find(|(op, _)| op.as_bytes() == &b[..2]) {
            return Some((k, 2));
        }
    }
    if b.is_empty() {
        return None;
    }
    OPS.iter().find(|(op, _)| op.as_bytes() == &b[..1]).map(|&(_, k)| (k, 1))
}

/// Spelling of a reserved word or operator code, for diagnostics.
pub fn keyword_name(kw: i32) -> Option<&'static str> {
    WORDS
        .iter()
        .find(|(_, k)| *k == kw)
        .or_else(|| OPS.iter().find(|(_, k)| *k == kw))
        .map(|&(w, _)| w)
}

/// One library-function descriptor from the definition file.
///
/// `rtype` is the X-BASIC return type letter (`I`/`S`/`C`/`F`, empty = void),
/// `arg` the X-BASIC signature, `cfunc` the C name when it differs, `carg`
/// the C-side argument template and `group` the header group.
#[derive(Debug, Clone, PartialEq)]
pub struct ExFn {
    pub rtype: String,
    pub name: String,
    pub arg: String,
    pub cfunc: String,
    pub carg: String,
    pub group: String,
}

/// Reserved words plus the dynamically registered library functions.
pub struct KeywordTable {
    words: HashMap<String, i32>,
    exfns: BTreeMap<i32, ExFn>,
    next_code: i32,
}

impl KeywordTable {
    pub fn new() -> Self {
        let mut words = HashMap::new();
        for &(w, k) in WORDS {
            words.insert(w.to_string(), k);
        }
        Self { words, exfns: BTreeMap::new(), next_code: EXFN_BASE }
    }

    /// Code for `word` if it is reserved or a registered library function.
    /// Lookup is case-insensitive.
    pub fn find(&self, word: &str) -> Option<i32> {
        self.words.get(&word.to_ascii_lowercase()).copied()
    }

    pub fn exfn(&self, kw: i32) -> Option<&ExFn> {
        self.exfns.get(&kw)
    }

    /// Parse a definition file. Section headers `[GROUP]` switch the group;
    /// each function line reads `T name arg : [cfunc]carg`. Lines that do not
    /// match the grammar are skipped.
    pub fn load_defs(&mut self, text: &str) {
        let mut group = String::new();
        for line in text.lines() {
            if let Some(rest) = line.strip_prefix('[') {
                if let Some(end) = rest.find(']') {
                    group = rest[..end].to_string();
                }
                continue;
            }
            if let Some(ex) = parse_def_line(line, &group) {
                let code = self.next_code;
                self.next_code += 1;
                self.words.insert(ex.name.clone(), code);
                self.exfns.insert(code, ex);
            }
        }
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_def_line(line: &str, group: &str) -> Option<ExFn> {
    let b = line.as_bytes();
    let mut p = 0usize;

    // return type letter, if present
    let mut rtype = String::new();
    if p < b.len() && b[p].is_ascii_alphabetic() {
        rtype.push(b[p] as char);
        p += 1;
    }
    while p < b.len() && b[p].is_ascii_whitespace() {
        p += 1;
    }

    // X-BASIC function name
    if !(p < b.len() && (b[p].is_ascii_alphabetic() || b[p] == b'_')) {
        return None;
    }
    let start = p;
    while p < b.len() && (b[p].is_ascii_alphanumeric() || b[p] == b'_' || b[p] == b'$') {
        p += 1;
    }
    let name = line[start..p].to_string();
    while p < b.len() && b[p].is_ascii_whitespace() {
        p += 1;
    }

    // X-BASIC signature
    let start = p;
    if p < b.len() && (b[p] == b'(' || b[p] == b'[') {
        p += 1;
    }
    while p < b.len() && (b[p].is_ascii_alphanumeric() || b[p] == b',' || b[p] == b'-') {
        p += 1;
    }
    if p < b.len() && (b[p] == b')' || b[p] == b']') {
        p += 1;
    }
    let arg = line[start..p].to_string();
    while p < b.len() && b[p].is_ascii_whitespace() {
        p += 1;
    }

    if !(p < b.len() && b[p] == b':') {
        return None;
    }
    p += 1;
    while p < b.len() && b[p].is_ascii_whitespace() {
        p += 1;
    }

    // C function name when it differs from the X-BASIC one
    let start = p;
    if p < b.len() && (b[p].is_ascii_alphabetic() || b[p] == b'_') {
        while p < b.len() && (b[p].is_ascii_alphanumeric() || b[p] == b'_') {
            p += 1;
        }
    }
    let cfunc = line[start..p].to_string();

    // C argument template
    if !(p < b.len() && b[p] == b'(') {
        return None;
    }
    p += 1;
    let start = p;
    while p < b.len() && matches!(b[p], b'#' | b'@' | b'&' | b'$' | b'%' | b',') {
        p += 1;
    }
    let carg = line[start..p].to_string();
    if !(p < b.len() && b[p] == b')') {
        return None;
    }

    Some(ExFn {
        rtype,
        name,
        arg,
        cfunc,
        carg,
        group: group.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_resolve_case_insensitively() {
        let t = KeywordTable::new();
        assert_eq!(t.find("print"), Some(PRINT));
        assert_eq!(t.find("PRINT"), Some(PRINT));
        assert_eq!(t.find("EndWhile"), Some(ENDWHILE));
        assert_eq!(t.find("frobnicate"), None);
    }

    #[test]
    fn operators_prefer_two_characters() {
        assert_eq!(find_op("<>1"), Some((NE, 2)));
        assert_eq!(find_op("<1"), Some((LT, 1)));
        assert_eq!(find_op(">="), Some((GE, 2)));
        assert_eq!(find_op("\\"), Some((YEN, 1)));
        assert_eq!(find_op("!"), None);
    }

    #[test]
    fn def_lines_register_functions_in_order() {
        let mut t = KeywordTable::new();
        t.load_defs("[BASIC]\nI abs (F-) : (%)\nS mid$ (S,I,I-) : b_midS($,%,%,%)\njunk line\n[MOUSE]\nI msstat : ms_stat()\n");
        let abs = t.find("abs").unwrap();
        assert_eq!(abs, EXFN_BASE);
        let ex = t.exfn(abs).unwrap();
        assert_eq!(ex.rtype, "I");
        assert_eq!(ex.arg, "(F-)");
        assert_eq!(ex.cfunc, "");
        assert_eq!(ex.carg, "%");
        assert_eq!(ex.group, "BASIC");

        let mid = t.exfn(t.find("mid$").unwrap()).unwrap();
        assert_eq!(mid.name, "mid$");
        assert_eq!(mid.cfunc, "b_midS");
        assert_eq!(mid.carg, "$,%,%,%");

        let ms = t.exfn(t.find("msstat").unwrap()).unwrap();
        assert_eq!(ms.group, "MOUSE");
        assert_eq!(ms.arg, "");
    }

    #[test]
    fn malformed_def_lines_are_skipped() {
        let mut t = KeywordTable::new();
        t.load_defs("no colon here\nI orphan (I)\n: ()\n");
        assert_eq!(t.find("orphan"), None);
    }
}
