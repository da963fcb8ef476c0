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

//! Variable descriptors and the global/local namespaces.

use std::collections::BTreeMap;

use bas2c_common::{Bas2cError, Result};
use bas2c_keyword as keyword;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Char,
    Float,
    Str,
}

impl BaseType {
    /// Base type for a type-keyword code (`int`/`char`/`float`/`str`).
    pub fn from_code(kw: i32) -> Option<BaseType> {
        match kw {
            keyword::INT => Some(BaseType::Int),
            keyword::CHAR => Some(BaseType::Char),
            keyword::FLOAT => Some(BaseType::Float),
            keyword::STR => Some(BaseType::Str),
            _ => None,
        }
    }
}

/// A variable's type: base type plus array and static-const markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarType {
    pub base: BaseType,
    pub array: bool,
    pub sconst: bool,
}

impl VarType {
    pub fn new(base: BaseType) -> VarType {
        VarType { base, array: false, sconst: false }
    }

    pub fn to_array(self) -> VarType {
        VarType { array: true, ..self }
    }

    pub fn to_const(self) -> VarType {
        VarType { sconst: true, ..self }
    }

    /// Element type of an array, plain scalar otherwise.
    pub fn base(self) -> VarType {
        VarType::new(self.base)
    }

    /// True only for a plain (non-array) string.
    pub fn is_str(self) -> bool {
        self.base == BaseType::Str && !self.array
    }

    pub fn is_array(self) -> bool {
        self.array
    }

    /// C spelling of the type. A function returning a string has the
    /// pointer spelling.
    pub fn type_name(self, fnres: bool) -> &'static str {
        if fnres && self.is_str() && !self.sconst {
            return "unsigned char *";
        }
        match self.base {
            BaseType::Int => "int",
            BaseType::Char => "unsigned char",
            BaseType::Float => "double",
            BaseType::Str => "unsigned char",
        }
    }

    pub fn type_qual(self, globl: bool) -> &'static str {
        if self.sconst {
            "static const "
        } else if globl {
            "static "
        } else {
            ""
        }
    }
}

/// A declared name: variable, array, or function.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub ty: VarType,
    /// Arrays: bracketed dimensions. Functions: the C parameter list.
    /// Strings: the buffer-size suffix.
    pub arg: String,
    pub init: String,
    pub func: bool,
    pub funcarg: bool,
}

impl Variable {
    pub fn new(name: String, ty: VarType) -> Variable {
        Variable { name, ty, arg: String::new(), init: String::new(), func: false, funcarg: false }
    }

    /// C definition (or function prototype). Formal parameters produce
    /// nothing; they are emitted in the parameter list instead.
    pub fn definition(&self, globl: bool) -> String {
        if self.funcarg {
            return String::new();
        }
        if self.func {
            return format!("{} {}({});\n", self.ty.type_name(true), self.name, self.arg);
        }
        let mut r = format!("{}{} {}{}", self.ty.type_qual(globl), self.ty.type_name(false), self.name, self.arg);
        if !self.init.is_empty() {
            r.push_str(" = ");
            r.push_str(&self.init);
        }
        r.push_str(";\n");
        r
    }
}

/// One global namespace plus a local namespace per user function.
/// Definitions are inserted on pass 1 only; pass 2 resolves them.
pub struct NameSpace {
    glist: BTreeMap<String, Variable>,
    llist: BTreeMap<String, BTreeMap<String, Variable>>,
    curlocal: Option<String>,
    bpass: i32,
}

impl NameSpace {
    pub fn new() -> NameSpace {
        NameSpace { glist: BTreeMap::new(), llist: BTreeMap::new(), curlocal: None, bpass: 0 }
    }

    pub fn set_pass(&mut self, bpass: i32) {
        self.bpass = bpass;
        self.curlocal = None;
    }

    /// Select the local namespace for function `name`; empty selects none
    /// (main body / subroutines). A new local namespace is created on
    /// pass 1 only.
    pub fn set_local(&mut self, name: &str) {
        if name.is_empty() {
            self.curlocal = None;
        } else {
            if self.bpass == 1 {
                self.llist.insert(name.to_string(), BTreeMap::new());
            } else {
                self.llist.entry(name.to_string()).or_default();
            }
            self.curlocal = Some(name.to_string());
        }
    }

    /// Look `name` up in the current local namespace, then globally unless
    /// `localonly` is set.
    pub fn find(&self, name: &str, localonly: bool) -> Option<&Variable> {
        if let Some(cur) = &self.curlocal {
            if let Some(v) = self.llist.get(cur).and_then(|m| m.get(name)) {
                return Some(v);
            }
        }
        if localonly {
            return None;
        }
        self.glist.get(name)
    }

    /// Define `name` in the active namespace (pass 1) or resolve the
    /// definition made there (pass 2). Redefinition is an error.
    #[allow(clippy::too_many_arguments)]
    pub fn new_variable(
        &mut self,
        name: &str,
        ty: VarType,
        arg: &str,
        init: &str,
        func: bool,
        funcarg: bool,
        forceglobl: bool,
    ) -> Result<&Variable> {
        let local = if forceglobl { None } else { self.curlocal.clone() };
        if self.bpass == 1 {
            let map = match &local {
                Some(cur) => self.llist.entry(cur.clone()).or_default(),
                None => &mut self.glist,
            };
            if map.contains_key(name) {
                return Err(Bas2cError::Namespace(format!("variable {} is already defined", name)));
            }
            map.insert(
                name.to_string(),
                Variable { name: name.to_string(), ty, arg: arg.to_string(), init: init.to_string(), func, funcarg },
            );
        }
        let map = match &local {
            Some(cur) => self.llist.get(cur),
            None => Some(&self.glist),
        };
        map.and_then(|m| m.get(name))
            .ok_or_else(|| Bas2cError::Namespace(format!("variable {} is not defined", name)))
    }

    /// Definition list for the global namespace (empty `name`) or a
    /// function's local namespace, in sorted order.
    pub fn definition(&self, name: &str) -> String {
        let (map, globl, tab) = if name.is_empty() {
            (Some(&self.glist), true, "")
        } else {
            (self.llist.get(name), false, "\t")
        };
        let mut r = String::new();
        if let Some(map) = map {
            for v in map.values() {
                let a = v.definition(globl);
                if !a.is_empty() {
                    r.push_str(tab);
                    r.push_str(&a);
                }
            }
        }
        r
    }

    /// Every declared name with its scope (empty = global), for tooling.
    pub fn symbols(&self) -> Vec<(&str, &Variable)> {
        let mut out: Vec<(&str, &Variable)> = self.glist.values().map(|v| ("", v)).collect();
        for (scope, map) in &self.llist {
            out.extend(map.values().map(|v| (scope.as_str(), v)));
        }
        out
    }
}

impl Default for NameSpace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_render_like_c() {
        let v = Variable::new("a1".into(), VarType::new(BaseType::Int));
        assert_eq!(v.definition(false), "int a1;\n");
        assert_eq!(v.definition(true), "static int a1;\n");

        let mut v = Variable::new("a2".into(), VarType::new(BaseType::Float));
        v.init = "1234".into();
        assert_eq!(v.definition(false), "double a2 = 1234;\n");

        let mut v = Variable::new("a3".into(), VarType::new(BaseType::Char).to_array());
        v.arg = "[10]".into();
        assert_eq!(v.definition(false), "unsigned char a3[10];\n");

        let mut v = Variable::new("tmp".into(), VarType::new(BaseType::Int).to_array().to_const());
        v.arg = "[(3)+1]".into();
        v.init = "{1, 2, 3}".into();
        assert_eq!(v.definition(true), "static const int tmp[(3)+1] = {1, 2, 3};\n");

        let mut f = Variable::new("fn".into(), VarType::new(BaseType::Str));
        f.func = true;
        f.arg = "int a, int b".into();
        assert_eq!(f.definition(true), "unsigned char * fn(int a, int b);\n");
    }

    #[test]
    fn formal_parameters_emit_nothing() {
        let mut v = Variable::new("p".into(), VarType::new(BaseType::Int));
        v.funcarg = true;
        assert_eq!(v.definition(false), "");
    }

    #[test]
    fn scopes_resolve_local_first() {
        let mut ns = NameSpace::new();
        ns.set_pass(1);
        ns.new_variable("a", VarType::new(BaseType::Int), "", "", false, false, false).unwrap();
        ns.set_local("f");
        ns.new_variable("a", VarType::new(BaseType::Float), "", "", false, false, false).unwrap();
        assert_eq!(ns.find("a", false).unwrap().ty.base, BaseType::Float);
        assert!(ns.find("a", true).is_some());
        ns.set_local("");
        assert_eq!(ns.find("a", false).unwrap().ty.base, BaseType::Int);
        assert!(ns.find("missing", false).is_none());
    }

    #[test]
    fn redefinition_is_an_error() {
        let mut ns = NameSpace::new();
        ns.set_pass(1);
        ns.new_variable("a", VarType::new(BaseType::Int), "", "", false, false, false).unwrap();
        let err = ns.new_variable("a", VarType::new(BaseType::Int), "", "", false, false, false);
        assert!(matches!(err, Err(Bas2cError::Namespace(_))));
    }

    #[test]
    fn pass2_resolves_without_inserting() {
        let mut ns = NameSpace::new();
        ns.set_pass(1);
        ns.new_variable("a", VarType::new(BaseType::Int), "", "", false, false, false).unwrap();
        ns.set_pass(2);
        // same call sequence resolves the pass-1 entry
        let v = ns.new_variable("a", VarType::new(BaseType::Int), "", "", false, false, false).unwrap();
        assert_eq!(v.name, "a");
        assert!(ns.new_variable("b", VarType::new(BaseType::Int), "", "", false, false, false).is_err());
    }

    #[test]
    fn definition_lists_are_sorted_and_scoped() {
        let mut ns = NameSpace::new();
        ns.set_pass(1);
        ns.new_variable("b", VarType::new(BaseType::Int), "", "", false, false, false).unwrap();
        ns.new_variable("a", VarType::new(BaseType::Str), "[32+1]", "\"hi\"", false, false, false).unwrap();
        ns.set_local("f");
        ns.new_variable("x", VarType::new(BaseType::Int), "", "", false, false, false).unwrap();
        assert_eq!(ns.definition(""), "static unsigned char a[32+1] = \"hi\";\nstatic int b;\n");
        assert_eq!(ns.definition("f"), "\tint x;\n");
    }
}
