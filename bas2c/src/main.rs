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

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use bas2c_keyword::{self as keyword, KeywordTable};
use bas2c_lexer::TokenGen;
use bas2c_translator::service;
use bas2c_translator::{Bas2C, F_BASCOMMENT, F_BCCOMPAT, F_DEBUG, F_NOBINIT, F_UNDEFERR, F_VERBOSE};

fn usage(cmd: &str) -> ! {
    eprintln!("usage: {} [-Dunbv][-c[tabs]][-o output.c] input.bas [output.c]", cmd);
    std::process::exit(1);
}

// bas2c.def in the working directory, the legacy BC.DEF spelling, then next
// to the executable
fn read_defs(table: &mut KeywordTable, cmd: &str) {
    let mut candidates = vec![PathBuf::from("bas2c.def"), PathBuf::from("BC.DEF")];
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join("bas2c.def"));
        }
    }
    for cand in candidates {
        if let Ok(bytes) = fs::read(&cand) {
            table.load_defs(&String::from_utf8_lossy(&bytes));
            return;
        }
    }
    eprintln!("{}: cannot load bas2c.def", cmd);
}

fn read_source(finame: &str, cmd: &str) -> String {
    if finame == "-" {
        let mut buf = Vec::new();
        if io::stdin().read_to_end(&mut buf).is_err() {
            eprintln!("{}: cannot read standard input", cmd);
            std::process::exit(1);
        }
        String::from_utf8_lossy(&buf).into_owned()
    } else {
        match fs::read(finame) {
            Ok(b) => String::from_utf8_lossy(&b).into_owned(),
            Err(_) => {
                eprintln!("{}: {} file not found", cmd, finame);
                std::process::exit(1);
            }
        }
    }
}

// -D: token stream to stderr before translating
fn dump_tokens(src: &str, table: &KeywordTable) {
    let mut t = TokenGen::new(src.to_string(), table, -1, false);
    t.set_pass(1);
    loop {
        let tok = t.fetch();
        if tok.is_keyword(keyword::EOF_KW) {
            break;
        }
        let l = t.get_goto_lineno();
        if l != 0 {
            eprint!("{}", l);
        }
        eprintln!("{}", tok);
    }
}

fn cmd_analyze(path: &str, json: bool, cmd: &str) {
    let src = read_source(path, cmd);
    let mut table = KeywordTable::new();
    read_defs(&mut table, cmd);
    let diags = service::analyze_source(&src, &table);
    if json {
        match serde_json::to_string_pretty(&diags) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("json: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }
    if diags.errors.is_empty() {
        println!("No errors.");
    } else {
        println!("Errors:");
        for e in &diags.errors {
            println!("- {} ({}) col {}: {}", e.line, e.basic_line, e.column, e.message);
        }
    }
    if !diags.symbols.is_empty() {
        println!("Symbols:");
        for s in &diags.symbols {
            if s.scope.is_empty() {
                println!("- {:?} {}", s.kind, s.name);
            } else {
                println!("- {:?} {} in {}", s.kind, s.name, s.scope);
            }
        }
    }
}

fn main() {
    let argv: Vec<String> = env::args().collect();
    let cmd = argv.first().map(String::as_str).unwrap_or("bas2c").to_string();
    let args = &argv[1..];

    if args.first().map(String::as_str) == Some("--analyze") {
        if args.len() < 2 {
            eprintln!("usage: {} --analyze <input.bas> [--json]", cmd);
            std::process::exit(2);
        }
        let json = args.iter().any(|a| a == "--json");
        cmd_analyze(&args[1], json, &cmd);
        return;
    }

    let mut flag = 0u32;
    let mut cindent = 0i32;
    let mut finame: Option<String> = None;
    let mut foname: Option<String> = None;

    let mut i = 0usize;
    while i < args.len() {
        let a = &args[i];
        let b = a.as_bytes();
        if b.len() > 1 && b[0] == b'-' {
            match b[1] {
                b'D' => flag |= F_DEBUG,
                b'u' => flag |= F_UNDEFERR,
                b'n' => flag |= F_NOBINIT,
                b'v' => flag |= F_VERBOSE,
                b'b' => flag |= F_BCCOMPAT,
                b'c' => {
                    flag |= F_BASCOMMENT;
                    // leading decimal prefix of the suffix; 7 when absent
                    let digits: String = a[2..].chars().take_while(|c| c.is_ascii_digit()).collect();
                    cindent = digits.parse().unwrap_or(7);
                }
                b'o' => {
                    i += 1;
                    foname = args.get(i).cloned();
                }
                b'h' => usage(&cmd),
                _ => usage(&cmd),
            }
        } else if finame.is_none() {
            finame = Some(a.clone());
        } else if foname.is_none() {
            foname = Some(a.clone());
        }
        i += 1;
    }

    let Some(finame) = finame else { usage(&cmd) };
    if finame != "-" && foname.is_none() {
        foname = Some(PathBuf::from(&finame).with_extension("c").to_string_lossy().into_owned());
    }

    let src = read_source(&finame, &cmd);

    let mut table = KeywordTable::new();
    read_defs(&mut table, &cmd);

    if flag & F_DEBUG != 0 {
        dump_tokens(&src, &table);
    }

    let display = if finame == "-" { "<stdin>" } else { finame.as_str() };
    let mut b = Bas2C::new(&table, src, flag, cindent);
    let status = match foname.as_deref() {
        Some(f) if f != "-" => {
            let mut fo = match fs::File::create(f) {
                Ok(fh) => fh,
                Err(_) => {
                    eprintln!("{}: cannot create output file {}", cmd, f);
                    std::process::exit(1);
                }
            };
            b.start(&mut fo, display)
        }
        _ => b.start(&mut io::stdout().lock(), display),
    };

    match status {
        Ok(s) => std::process::exit(s),
        Err(e) => {
            eprintln!("{}: write error: {}", cmd, e);
            std::process::exit(1);
        }
    }
}
