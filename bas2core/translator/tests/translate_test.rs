use bas2c_keyword::KeywordTable;
use bas2c_translator::{service, Bas2C, F_BASCOMMENT, F_BCCOMPAT, F_NOBINIT, F_UNDEFERR};

const DEFS: &str = "[BASIC]\n\
I abs (I) : (%)\n\
S str$ (I) : b_striS($,%)\n\
S mid$ (S,I,I-) : b_midS($,%,%,%)\n\
 exit (I-) : (%)\n\
 date$$ S : b_sdate(%)\n\
S date$ : b_dateS($)\n\
[MOUSE]\n\
 msinit : ms_init()\n";

fn translate_flags(src: &str, flag: u32, cindent: i32) -> (String, i32) {
    let mut table = KeywordTable::new();
    table.load_defs(DEFS);
    let mut b = Bas2C::new(&table, src.to_string(), flag, cindent);
    let mut out = Vec::new();
    let status = b.start(&mut out, "test.bas").expect("write");
    (String::from_utf8(out).expect("utf8"), status)
}

fn translate(src: &str) -> String {
    let (out, status) = translate_flags(src, 0, 0);
    assert_eq!(status, 0, "translation reported errors:\n{}", out);
    out
}

#[test]
fn hello_world_translates_exactly() {
    let out = translate("print \"hello\"\n");
    assert_eq!(
        out,
        "#include <basic0.h>\n\
         #include <string.h>\n\
         \n\
         \n\
         /******** program start ********/\n\
         void main(int b_argc, char *b_argv[])\n\
         {\n\
         \tb_init();\n\
         \tb_sprint(\"hello\");\n\
         \tb_sprint(STRCRLF);\n\
         \tb_exit(0);\n\
         }\n"
    );
}

#[test]
fn for_loop_declares_its_variable_globally() {
    let out = translate("for i=1 to 3\nprint i\nnext\n");
    assert!(out.contains("static int i;\n"), "missing declaration:\n{}", out);
    assert!(out.contains("\tfor (i = 1; i <= 3; i++) {\n"), "{}", out);
    assert!(out.contains("\t\tb_iprint(i);\n"), "{}", out);
    assert!(out.contains("\t\tb_sprint(STRCRLF);\n"), "{}", out);
    assert!(out.contains("\t}\n"), "{}", out);
}

#[test]
fn assignments_autodeclare_global_ints() {
    let out = translate("a=10 : b=a+2 : print b\n");
    assert!(out.contains("static int a;\n"), "{}", out);
    assert!(out.contains("static int b;\n"), "{}", out);
    assert!(out.contains("\ta = 10;\n"), "{}", out);
    assert!(out.contains("\tb = (a + 2);\n"), "{}", out);
    assert!(out.contains("\tb_iprint(b);\n"), "{}", out);
}

#[test]
fn braced_if_else_closes_with_symbols() {
    let src = "int x\nif x=1 then { print \"y\" } else { print \"n\" }\n";
    let out = translate(src);
    assert!(out.contains("\tif (-(x == 1)) {\n"), "{}", out);
    assert!(out.contains("\t\tb_sprint(\"y\");\n"), "{}", out);
    assert!(out.contains("\t} else {\n"), "{}", out);
    assert!(out.contains("\t\tb_sprint(\"n\");\n"), "{}", out);

    let (bc, status) = translate_flags(src, F_BCCOMPAT, 0);
    assert_eq!(status, 0);
    assert!(bc.contains("\tif (x == 1) {\n"), "{}", bc);
}

#[test]
fn gosub_becomes_a_subroutine_function() {
    let out = translate("gosub 100\nend\n100 print \"x\"\nreturn\n");
    assert!(out.contains("void S000100(void);\n"), "missing prototype:\n{}", out);
    assert!(out.contains("\tS000100();\n"), "{}", out);
    assert!(out.contains("void S000100(void)\n{\n"), "{}", out);
    assert!(out.contains("\tb_sprint(\"x\");\n"), "{}", out);
    assert!(out.contains("return;\n}\n"), "{}", out);
}

#[test]
fn goto_emits_label_and_jump() {
    let out = translate("goto 10\n10 print \"x\"\n");
    assert!(out.contains("\tgoto L000010;\n"), "{}", out);
    assert!(out.contains("L000010:\n"), "{}", out);
}

#[test]
fn string_declaration_and_concatenation() {
    let out = translate("str a = \"hi\"\na = a + \" there\"\n");
    assert!(out.contains("static unsigned char a[32+1] = \"hi\";\n"), "{}", out);
    assert!(out.contains("static unsigned char strtmp0[258];\n"), "{}", out);
    assert!(
        out.contains("\tb_strncpy(sizeof(a), a, b_stradd(strtmp0, a, \" there\", -1));\n"),
        "{}",
        out
    );
}

#[test]
fn while_repeat_and_switch_render_as_c() {
    let src = "int x\nwhile x < 10\nx = x + 1\nendwhile\nrepeat\nx = x - 1\nuntil x = 0\nswitch x\ncase 1\nprint \"one\"\nbreak\ndefault\nbreak\nendswitch\n";
    let out = translate(src);
    assert!(out.contains("\twhile (-(x < 10)) {\n"), "{}", out);
    assert!(out.contains("\t\tx = (x + 1);\n"), "{}", out);
    assert!(out.contains("\tdo {\n"), "{}", out);
    assert!(out.contains("\t} while (!(-(x == 0)));\n"), "{}", out);
    assert!(out.contains("\tswitch (x) {\n"), "{}", out);
    assert!(out.contains("\tcase 1:\n"), "{}", out);
    assert!(out.contains("\t\tb_sprint(\"one\");\n"), "{}", out);
    assert!(out.contains("\t\tbreak;\n"), "{}", out);
    assert!(out.contains("\tdefault:\n"), "{}", out);
}

#[test]
fn print_separators_control_the_newline() {
    let out = translate("print 1;2\n");
    assert!(out.contains("\tb_iprint(1);\n\tb_iprint(2);\n\tb_sprint(STRCRLF);\n"), "{}", out);

    let out = translate("print \"a\",\n");
    assert!(out.contains("\tb_sprint(\"a\");\n\tb_sprint(STRTAB);\n"), "{}", out);
    assert!(!out.contains("\tb_sprint(\"a\");\n\tb_sprint(STRTAB);\n\tb_sprint(STRCRLF);"), "{}", out);

    let out = translate("print tab(5);\"x\"\n");
    assert!(out.contains("\tb_tprint(5);\n\tb_sprint(\"x\");\n"), "{}", out);
}

#[test]
fn lprint_uses_the_l_variants() {
    let out = translate("lprint \"x\"\n");
    assert!(out.contains("\tb_slprint(\"x\");\n\tb_slprint(STRCRLF);\n"), "{}", out);
}

#[test]
fn print_using_renders_through_using() {
    let out = translate("print using \"##.#\";1.5\n");
    assert!(
        out.contains("\tb_sprint(using(strtmp0,\"##.#\",(double)(1.5)));\n\tb_sprint(STRCRLF);\n"),
        "{}",
        out
    );
    assert!(out.contains("static unsigned char strtmp0[258];\n"), "{}", out);
}

#[test]
fn input_renders_type_descriptors() {
    let out = translate("int a\nfloat f\nstr s\ninput a, f\ninput \"name\";s\n");
    assert!(out.contains("\tb_input(\"? \", 0x204, &a, 0x208, &f, -1);\n"), "{}", out);
    assert!(out.contains("\tb_input(\"name\" \"? \", sizeof(s), s, -1);\n"), "{}", out);
}

#[test]
fn linput_takes_a_buffer_and_size() {
    let out = translate("str s\nlinput \"p\";s\n");
    assert!(out.contains("\tb_sprint(\"p\");\n"), "{}", out);
    assert!(out.contains("\tb_linput(s, sizeof(s));\n"), "{}", out);
}

#[test]
fn user_functions_close_main_and_declare_parameters() {
    let src = "print add(1,2)\nfunc add(a;int,b)\nreturn (a+b)\nendfunc\n";
    let out = translate(src);
    assert!(out.contains("int add(int a, int b);\n"), "missing prototype:\n{}", out);
    assert!(out.contains("\tb_iprint(add(1, 2));\n"), "{}", out);
    assert!(out.contains("int add(int a, int b)\n{\n"), "{}", out);
    assert!(out.contains("\treturn (a + b);\n"), "{}", out);
    // main is closed before the function body opens
    let main_close = out.find("b_exit(0);").unwrap();
    let func_open = out.find("int add(int a, int b)\n{").unwrap();
    assert!(main_close < func_open, "{}", out);
}

#[test]
fn string_function_returns_a_pointer() {
    let src = "print greet(\"bob\")\nfunc str greet(n;str)\nreturn (n)\nendfunc\n";
    let out = translate(src);
    assert!(out.contains("unsigned char * greet(unsigned char n[32+1]);\n"), "{}", out);
    assert!(out.contains("\tb_sprint(greet(\"bob\"));\n"), "{}", out);
}

#[test]
fn arrays_assign_via_memcpy_from_a_const_temporary() {
    let src = "dim int a(2)\na = {1,2,3}\na(1) = 5\nprint a(1)\n";
    let out = translate(src);
    assert!(out.contains("static int a[(2)+1];\n"), "{}", out);
    assert!(out.contains("static const int _initmp0000[(2)+1] = {1,2,3};\n"), "{}", out);
    assert!(out.contains("\tmemcpy(a, _initmp0000, sizeof(a));\n"), "{}", out);
    assert!(out.contains("\ta[1] = 5;\n"), "{}", out);
    assert!(out.contains("\tb_iprint(a[1]);\n"), "{}", out);
}

#[test]
fn string_arrays_get_both_suffixes() {
    let out = translate("str a(5)\n");
    assert!(out.contains("static unsigned char a[(5)+1][32+1];\n"), "{}", out);
}

#[test]
fn library_calls_expand_from_the_definition_file() {
    let out = translate("print str$(5)\nprint abs(1.5)\nprint mid$(\"abc\",2)\nexit()\n");
    assert!(out.contains("\tb_sprint(b_striS(strtmp0,5));\n"), "{}", out);
    assert!(out.contains("\tb_fprint(fabs(1.5));\n"), "{}", out);
    assert!(out.contains("\tb_sprint(b_midS(strtmp0,\"abc\",2,0x4e415349));\n"), "{}", out);
    assert!(out.contains("\texit(0);\n"), "{}", out);
}

#[test]
fn assignable_date_routes_to_the_setter() {
    let out = translate("date$ = \"2024-01-01\"\n");
    assert!(out.contains("\tb_sdate(\"2024-01-01\");\n"), "{}", out);
}

#[test]
fn used_groups_emit_include_lines() {
    let out = translate("msinit\n");
    assert!(out.contains("#include <mouse.h>\n"), "{}", out);
    assert!(out.contains("\tms_init();\n"), "{}", out);
}

#[test]
fn unused_groups_emit_no_include_lines() {
    let out = translate("print \"x\"\n");
    assert!(!out.contains("mouse.h"), "{}", out);
    assert!(!out.contains("basic.h"), "{}", out);
}

#[test]
fn locate_emits_locate_and_csw() {
    let out = translate("locate 1, 2\nlocate 3,4,5\n");
    assert!(out.contains("\tlocate(1, 2);\n"), "{}", out);
    assert!(out.contains("\tlocate(3, 4);\n\tb_csw(5);\n"), "{}", out);
}

#[test]
fn error_statement_becomes_a_comment() {
    let out = translate("error 255\n");
    assert!(out.contains("\t/* error 255 */\n"), "{}", out);
}

#[test]
fn comments_pass_through() {
    let out = translate("/* note */\nprint 1\n");
    assert!(out.contains("\t/* note */\n"), "{}", out);
}

#[test]
fn c_passthrough_blocks_are_copied() {
    let out = translate("#c\nint custom = 5;\n#endc\nprint 1\n");
    assert!(out.contains("int custom = 5;\n"), "{}", out);
}

#[test]
fn basic_lines_can_be_inserted_as_comments() {
    let (out, status) = translate_flags("print 1\n", F_BASCOMMENT, 1);
    assert_eq!(status, 0);
    assert!(out.contains("\t/*===print 1===*/\n"), "{}", out);
}

#[test]
fn nobinit_substitutes_exit() {
    let (out, status) = translate_flags("end\n", F_NOBINIT, 0);
    assert_eq!(status, 0);
    assert!(out.contains("#include <stdlib.h>\n"), "{}", out);
    assert!(!out.contains("b_init();"), "{}", out);
    assert!(out.contains("exit(0);\n"), "{}", out);
    assert!(!out.contains("b_exit"), "{}", out);
}

#[test]
fn undefined_calls_error_under_u_flag() {
    let (_, status) = translate_flags("foo(1)\n", F_UNDEFERR, 0);
    assert_eq!(status, 1);
    let (out, status) = translate_flags("foo(1)\n", 0, 0);
    assert_eq!(status, 0);
    assert!(out.contains("\tfoo(1);\n"), "{}", out);
}

#[test]
fn structural_errors_latch_a_nonzero_status() {
    let (_, status) = translate_flags("next\n", 0, 0);
    assert_eq!(status, 1);
}

#[test]
fn translation_is_deterministic() {
    let src = "str a = \"hi\"\nfor i=1 to 3\nprint a;i\nnext\ngosub 100\nend\n100 print \"s\"\nreturn\n";
    assert_eq!(translate(src), translate(src));
}

#[test]
fn analyze_reports_symbols_and_errors() {
    let mut table = KeywordTable::new();
    table.load_defs(DEFS);
    let diags = service::analyze_source("int x\nprint add(1,2)\nfunc add(a;int,b)\nendfunc\ngoto 10\n10 print\n", &table);
    assert!(diags.errors.is_empty(), "{:?}", diags.errors);
    assert!(diags.symbols.iter().any(|s| s.name == "x"), "{:?}", diags.symbols);
    assert!(diags.symbols.iter().any(|s| s.name == "add"), "{:?}", diags.symbols);
    assert!(diags.symbols.iter().any(|s| s.name == "L000010"), "{:?}", diags.symbols);

    let diags = service::analyze_source("next\n", &table);
    assert_eq!(diags.errors.len(), 1, "{:?}", diags.errors);
}
