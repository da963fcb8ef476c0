//! Analysis entry point for tooling: run the discovery pass over a source
//! and return diagnostics and declared symbols in serializable form.

use serde::{Deserialize, Serialize};

use bas2c_keyword::KeywordTable;

use crate::Bas2C;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub line: i32,
    pub basic_line: i32,
    pub column: usize,
    pub severity: DiagnosticSeverity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SymbolKind {
    Function,
    Variable,
    Label,
    Subroutine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    pub kind: SymbolKind,
    /// Enclosing function, empty for globals.
    pub scope: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TranslatorDiagnostics {
    pub errors: Vec<Diagnostic>,
    pub symbols: Vec<SymbolInfo>,
}

/// Run pass 1 only, collecting every error (translation proper keeps
/// pass-1 syntax errors silent because pass 2 reports them again).
pub fn analyze_source(source: &str, table: &KeywordTable) -> TranslatorDiagnostics {
    let mut out = TranslatorDiagnostics::default();

    let mut b = Bas2C::new(table, source.to_string(), 0, 0);
    b.set_quiet(true);
    b.set_pass(1);
    loop {
        match b.statement() {
            Ok(None) => break,
            Ok(Some(_)) => {}
            Err(e) => b.error(&e.to_string()),
        }
    }

    for d in b.diags() {
        out.errors.push(Diagnostic {
            message: d.message.clone(),
            line: d.lineno,
            basic_line: d.baslineno,
            column: d.column,
            severity: DiagnosticSeverity::Error,
        });
    }
    for (scope, v) in b.namespace().symbols() {
        out.symbols.push(SymbolInfo {
            name: v.name.clone(),
            kind: if v.func { SymbolKind::Function } else { SymbolKind::Variable },
            scope: scope.to_string(),
        });
    }
    for l in b.labels() {
        out.symbols.push(SymbolInfo { name: format!("L{:06}", l), kind: SymbolKind::Label, scope: String::new() });
    }
    for s in b.subroutines() {
        out.symbols.push(SymbolInfo { name: format!("S{:06}", s), kind: SymbolKind::Subroutine, scope: String::new() });
    }
    out
}
