use bas2c_keyword::KeywordTable;
use bas2c_translator::{Bas2C, F_BCCOMPAT};

const DEFS: &str = "[BASIC]\n\
I abs (I) : (%)\n\
F pi (F-) : (%)\n\
S str$ (I) : b_striS($,%)\n\
S inkey$ : b_inkeyS($)\n\
S inkey$$ (I) : b_inkey0S($,%)\n\
I int$$ (F) : b_int(%)\n";

// the leading `0` soaks up the BASIC line-number strip so expressions may
// start with a digit
fn render_with(src: &str, flag: u32) -> String {
    let mut table = KeywordTable::new();
    table.load_defs(DEFS);
    let mut b = Bas2C::new(&table, format!("0 {}\n", src), flag, 0);
    b.expr().expect("expr").expect("some").value().to_string()
}

fn render(src: &str) -> String {
    render_with(src, 0)
}

fn render_bc(src: &str) -> String {
    render_with(src, F_BCCOMPAT)
}

#[test]
fn arithmetic_wraps_in_parentheses() {
    assert_eq!(render("1 + 2"), "(1 + 2)");
    assert_eq!(render("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(render("-5"), "-5");
    assert_eq!(render("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn bc_mode_drops_the_parentheses() {
    assert_eq!(render_bc("1 + 2"), "1 + 2");
    assert_eq!(render_bc("1 + 2 * 3"), "1 + 2 * 3");
}

#[test]
fn integer_operators_cast_to_int() {
    assert_eq!(render("7 mod 3"), "((int)7 % (int)3)");
    assert_eq!(render("7 \\ 2"), "((int)7 / (int)2)");
    assert_eq!(render("1 shl 2"), "((int)1 << (int)2)");
    assert_eq!(render("8 shr 1"), "((int)8 >> (int)1)");
    assert_eq!(render("1 and 3"), "((int)1 & (int)3)");
    assert_eq!(render("1 or 2"), "((int)1 | (int)2)");
    assert_eq!(render("1 xor 2"), "((int)1 ^ (int)2)");
}

#[test]
fn bc_mode_emits_bare_operators() {
    assert_eq!(render_bc("7 mod 3"), "7 % 3");
    assert_eq!(render_bc("1 and 3"), "1 & 3");
    assert_eq!(render_bc("not 1"), "!1");
}

#[test]
fn not_is_bitwise_by_default() {
    assert_eq!(render("not 1"), "(~((int)1))");
    assert_eq!(render("not not 1"), "(~((int)(~((int)1))))");
}

#[test]
fn comparisons_negate_for_basic_truth() {
    assert_eq!(render("1 = 2"), "-(1 == 2)");
    assert_eq!(render("1 <> 2"), "-(1 != 2)");
    assert_eq!(render("1 >= 2"), "-(1 >= 2)");
    assert_eq!(render_bc("1 = 2"), "1 == 2");
}

#[test]
fn string_comparison_uses_b_strcmp() {
    assert_eq!(render("\"a\" = \"b\""), "((b_strcmp(\"a\", 0x3d20, \"b\"))?-1:0)");
    assert_eq!(render("\"a\" <= \"b\""), "((b_strcmp(\"a\", 0x3c3d, \"b\"))?-1:0)");
    assert_eq!(render_bc("\"a\" <> \"b\""), "b_strcmp(\"a\", 0x3c3e, \"b\")");
}

#[test]
fn string_concatenation_allocates_a_temporary() {
    assert_eq!(render("\"a\" + \"b\""), "b_stradd(strtmp0, \"a\", \"b\", -1)");
    assert_eq!(render("\"a\" + \"b\" + \"c\""), "b_stradd(strtmp0, \"a\", \"b\", \"c\", -1)");
}

#[test]
fn library_calls_reduce_to_their_c_form() {
    assert_eq!(render("abs(5)"), "abs(5)");
    assert_eq!(render("abs(1.5)"), "fabs(1.5)");
    assert_eq!(render("str$(5)"), "b_striS(strtmp0,5)");
    assert_eq!(render("str$(1.5)"), "b_strfS(strtmp0,1.5)");
    assert_eq!(render("pi()"), "pi()");
    assert_eq!(render("int(1.5)"), "b_int(1.5)");
    assert_eq!(render("inkey$"), "b_inkeyS(strtmp0)");
    assert_eq!(render("inkey$(0)"), "b_inkey0S(strtmp0,0)");
}

#[test]
fn str_in_arithmetic_is_rejected() {
    let mut table = KeywordTable::new();
    table.load_defs(DEFS);
    let mut b = Bas2C::new(&table, "0 1 * \"a\"\n".to_string(), 0, 0);
    assert!(b.expr().is_err());
}
