use num_bigint::BigInt;

use super::*;
use crate::error::ScanError;

fn int(n: i64) -> Value {
    Value::from(n)
}

fn float(x: f64) -> Value {
    Value::Float(x)
}

fn text(s: &str) -> Value {
    Value::from(s)
}

fn ints(ns: &[i64]) -> Value {
    Value::from(ns.to_vec())
}

fn scan(format: &str, line: &str) -> Option<Vec<Value>> {
    scanf(format, line).unwrap()
}

/// Scan `line`, and also check that the suppressed form of `format` matches
/// with no values and that appending `%r` to either form yields the same
/// remainder.
fn scan_checked(format: &str, line: &str) -> Option<Vec<Value>> {
    let result = scan(format, line)?;
    let suppressed = format.replace('%', "%*");
    assert_eq!(scan(&suppressed, line), Some(vec![]), "suppressed {suppressed:?}");
    if !format.contains("%r") {
        let with_rest = scan(&format!("{format}%r"), line).unwrap();
        let rest_only = scan(&format!("{suppressed}%r"), line).unwrap();
        assert_eq!(with_rest.len(), result.len() + 1);
        assert_eq!(rest_only.len(), 1);
        assert_eq!(with_rest.last(), rest_only.first());
    }
    Some(result)
}

// --- Scenarios ---

#[test]
fn test_error_summary() {
    assert_eq!(
        scan_checked(
            "%s - %d errors, %d warnings",
            "/usr/sbin/sendmail - 0 errors, 4 warnings"
        ),
        Some(vec![text("/usr/sbin/sendmail"), int(0), int(4)])
    );
}

#[test]
fn test_octal_hex_decimal() {
    assert_eq!(
        scan_checked("%o %x %d", "0123 0x123 123"),
        Some(vec![int(83), int(291), int(123)])
    );
}

#[test]
fn test_mac_address() {
    assert_eq!(
        scan_checked("%X:%X:%X:%X:%X:%X", "04:23:AB:03:ef:01"),
        Some(vec![int(0x4), int(0x23), int(0xab), int(0x3), int(0xef), int(0x1)])
    );
}

#[test]
fn test_rest_of_line() {
    assert_eq!(
        scan("%d %r", "99 bottles of beer on the wall"),
        Some(vec![int(99), text("bottles of beer on the wall")])
    );
    assert_eq!(scan("%d %r string", "42 the rest of the string"), None);
}

// --- Floats ---

#[test]
fn test_float() {
    assert_eq!(scan_checked("%f", "32.1"), Some(vec![float(32.1)]));
    assert_eq!(scan_checked("%f", "+32.1"), Some(vec![float(32.1)]));
    assert_eq!(scan_checked("%f", "+032.1"), Some(vec![float(32.1)]));
    assert_eq!(scan_checked("%f", "+32.10"), Some(vec![float(32.1)]));
    assert_eq!(scan_checked("%e", "32.2abc"), Some(vec![float(32.2)]));
    assert_eq!(scan_checked("%e", "-32.2"), Some(vec![float(-32.2)]));
    assert_eq!(scan_checked("%g", "32"), Some(vec![float(32.0)]));
    assert_eq!(scan_checked("%E", "3.2e-1"), Some(vec![float(0.32)]));
    assert_eq!(scan_checked("%f", ".3"), Some(vec![float(0.3)]));
    assert_eq!(scan_checked("%f", "3."), Some(vec![float(3.0)]));
}

#[test]
fn test_match_may_start_anywhere() {
    assert_eq!(scan_checked("%e", "abc 321e-1"), Some(vec![float(32.1)]));
}

// --- Literals ---

#[test]
fn test_literals() {
    assert_eq!(
        scan_checked("The number is:  %d", "The number is: 52"),
        Some(vec![int(52)])
    );
    assert_eq!(scan_checked("is: %d", "The number   is 52"), None);
    assert_eq!(
        scan_checked("is: %d", "The number is: \n 52"),
        Some(vec![int(52)])
    );
    assert_eq!(scan("^%s", "^caret"), Some(vec![text("caret")]));
}

#[test]
fn test_percent() {
    assert_eq!(scan("%d%%", "80%"), Some(vec![int(80)]));
    assert_eq!(scan("%d%% / %d", "80% / 20%"), Some(vec![int(80), int(20)]));
    assert_eq!(scan("%d%%s / %d", "80%s / 20%"), Some(vec![int(80), int(20)]));
    assert_eq!(scan("%d%%", "80"), None);
}

#[test]
fn test_unknown_directive_matches_literally() {
    assert_eq!(scan("%z%d", "%z7"), Some(vec![int(7)]));
    assert_eq!(scan("%z%d", "7"), None);
}

#[test]
fn test_metacharacter_delimiters() {
    assert_eq!(scan("(%d) [%d]", "(1) [2]"), Some(vec![int(1), int(2)]));
    assert_eq!(scan("%d.%d", "1x2"), None);
}

// --- Characters and strings ---

#[test]
fn test_char() {
    assert_eq!(scan_checked("%c", "abc"), Some(vec![Value::Char('a')]));
    assert_eq!(scan_checked("%3c", "abc"), Some(vec![text("abc")]));
    assert_eq!(scan_checked("%5c", "abc"), None);
    assert_eq!(
        scan_checked("%12c has %d", "dodecahedron has 12 letters"),
        Some(vec![text("dodecahedron"), int(12)])
    );
    assert_eq!(scan_checked("%s", "The first word"), Some(vec![text("The")]));
    assert_eq!(
        scan_checked("%s", "Including: punctuation"),
        Some(vec![text("Including:")])
    );
}

#[test]
fn test_char_counts_characters_not_bytes() {
    assert_eq!(scan("%c", "é!"), Some(vec![Value::Char('é')]));
    assert_eq!(scan("%3c", "日本語x"), Some(vec![text("日本語")]));
}

// --- Integers ---

#[test]
fn test_decimal() {
    assert_eq!(scan_checked("%d", "50"), Some(vec![int(50)]));
    assert_eq!(scan_checked("%d", "050"), Some(vec![int(50)]));
    assert_eq!(scan_checked("%d", "0x50"), Some(vec![int(0)]));
    assert_eq!(scan_checked("%3d", "12345"), Some(vec![int(123)]));
}

#[test]
fn test_unsigned() {
    assert_eq!(scan_checked("%u", "-50"), None);
    assert_eq!(scan_checked("%u", "+50"), None);
    assert_eq!(scan_checked("%u", "50"), Some(vec![int(50)]));
    assert_eq!(scan_checked("%u", "050"), Some(vec![int(50)]));
    assert_eq!(scan_checked("%u", "x150"), Some(vec![int(150)]));
    assert_eq!(scan_checked("%u", "12 -50"), Some(vec![int(12)]));
}

#[test]
fn test_signed() {
    assert_eq!(scan_checked("%d", "-42"), Some(vec![int(-42)]));
    assert_eq!(scan_checked("%d", "+42"), Some(vec![int(42)]));
    assert_eq!(scan_checked("%d %d", "-0 +42"), Some(vec![int(0), int(42)]));
}

#[test]
fn test_hex() {
    assert_eq!(scan_checked("%x", "0x50"), Some(vec![int(0x50)]));
    assert_eq!(scan_checked("%x", "0X50"), Some(vec![int(0x50)]));
    assert_eq!(scan_checked("%X", "0x50"), Some(vec![int(0x50)]));
    assert_eq!(scan_checked("%X", "0X50"), Some(vec![int(0x50)]));
    assert_eq!(scan_checked("%x", "50"), Some(vec![int(0x50)]));
}

#[test]
fn test_octal() {
    assert_eq!(scan_checked("%o", "050"), Some(vec![int(0o50)]));
    assert_eq!(scan_checked("%o", "777"), Some(vec![int(0o777)]));
    assert_eq!(scan_checked("%o", "0o50"), Some(vec![int(0o50)]));
    assert_eq!(scan_checked("%o", "0O50"), Some(vec![int(0o50)]));
}

#[test]
fn test_binary() {
    assert_eq!(scan_checked("%b", "1100"), Some(vec![int(12)]));
    assert_eq!(scan_checked("%b", "0b1100"), Some(vec![int(12)]));
}

#[test]
fn test_integer() {
    assert_eq!(scan_checked("%i", "50"), Some(vec![int(50)]));
    assert_eq!(scan_checked("%i", "0x50"), Some(vec![int(0x50)]));
    assert_eq!(scan_checked("%i", "0o50"), Some(vec![int(0o50)]));
    assert_eq!(scan_checked("%i", "0b1100"), Some(vec![int(12)]));
}

#[test]
fn test_multiple() {
    assert_eq!(
        scan_checked("%s %s", "hello, world"),
        Some(vec![text("hello,"), text("world")])
    );
    assert_eq!(
        scan_checked("%s, %s", "hello, world"),
        Some(vec![text("hello"), text("world")])
    );
    assert_eq!(scan_checked("%d - %d", "52 - 11"), Some(vec![int(52), int(11)]));
}

// --- Lists ---

#[test]
fn test_list() {
    assert_eq!(scan_checked("%[d]", "4 2 2"), Some(vec![ints(&[4, 2, 2])]));
    assert_eq!(
        scan_checked("%[i]", "42 0x42 0xfE"),
        Some(vec![ints(&[42, 0x42, 0xfe])])
    );
    assert_eq!(
        scan_checked("%[s]", "A bunch of words"),
        Some(vec![Value::from(vec!["A", "bunch", "of", "words"])])
    );
    assert_eq!(
        scan_checked("%[f]", "1.5 -2 .25"),
        Some(vec![Value::from(vec![1.5, -2.0, 0.25])])
    );
}

#[test]
fn test_single_element_list() {
    assert_eq!(scan_checked("%[d]", "7"), Some(vec![ints(&[7])]));
    assert_eq!(scan_checked("%[d,]", "7"), Some(vec![ints(&[7])]));
}

#[test]
fn test_separators() {
    assert_eq!(scan_checked("%[d,]", "4, 2, 2"), Some(vec![ints(&[4, 2, 2])]));
    assert_eq!(scan_checked("%[d,]", "4,2,2"), Some(vec![ints(&[4, 2, 2])]));
    assert_eq!(
        scan_checked("%[x,]", "0x32,0x12, 0x1. This is the end"),
        Some(vec![ints(&[0x32, 0x12, 0x1])])
    );
    assert_eq!(
        scan_checked("%[i,]", "0x32,0o10, 0B110, 53, 21"),
        Some(vec![ints(&[0x32, 0o10, 0b110, 53, 21])])
    );
    assert_eq!(
        scan_checked("%[d.]", "192.168.1.1"),
        Some(vec![ints(&[192, 168, 1, 1])])
    );
    assert_eq!(
        scan_checked("%[d.]", "192.168.  1.  1"),
        Some(vec![ints(&[192, 168, 1, 1])])
    );
    assert_eq!(
        scan_checked("%[x:]", "04:42:ab:C0:DF:4A"),
        Some(vec![ints(&[0x04, 0x42, 0xAB, 0xC0, 0xDF, 0x4A])])
    );
    assert_eq!(
        scan_checked("%[s,]", "comma, separated, values"),
        Some(vec![Value::from(vec!["comma", "separated", "values"])])
    );
}

#[test]
fn test_octal_and_binary_lists() {
    assert_eq!(scan_checked("%[o]", "10 0o17 7"), Some(vec![ints(&[8, 15, 7])]));
    assert_eq!(scan_checked("%[o,]", "10, 0o17"), Some(vec![ints(&[8, 15])]));
    assert_eq!(scan_checked("%[b;]", "0b1;10; 11"), Some(vec![ints(&[1, 2, 3])]));
}

#[test]
fn test_metacharacter_list_delimiter() {
    assert_eq!(scan_checked("%[d|]", "1|2|3"), Some(vec![ints(&[1, 2, 3])]));
    assert_eq!(scan_checked("%[d+]", "1+ 2"), Some(vec![ints(&[1, 2])]));
}

// --- Whitespace ---

#[test]
fn test_exact_whitespace() {
    assert_eq!(scanf_with("a  %d", "a 5", false).unwrap(), None);
    assert_eq!(scanf_with("a  %d", "a  5", false).unwrap(), Some(vec![int(5)]));
    assert_eq!(scanf_with("a  %d", "a 5", true).unwrap(), Some(vec![int(5)]));
}

#[test]
fn test_trailing_line_terminator_is_ignored() {
    assert_eq!(
        scan("%d %r", "99 bottles\n"),
        Some(vec![int(99), text("bottles")])
    );
    assert_eq!(
        scan("%d %r", "99 bottles\r\n"),
        Some(vec![int(99), text("bottles")])
    );
}

// --- Errors ---

#[test]
fn test_conversion_error_is_not_no_match() {
    let err = scanf("%i", "12ab").unwrap_err();
    assert!(matches!(err, ScanError::Conversion { ref text, .. } if text == "12ab"));
}

#[test]
fn test_integers_past_64_bits() {
    let max = Value::from(BigInt::from(u64::MAX));
    assert_eq!(scan_checked("%x", "ffffffffffffffff"), Some(vec![max.clone()]));
    assert_eq!(scan_checked("%d", "18446744073709551615"), Some(vec![max]));
    assert_eq!(
        scan("%d", "-99999999999999999999").unwrap()[0].to_string(),
        "-99999999999999999999"
    );
}

#[test]
fn test_compile_error_propagates() {
    assert!(matches!(
        scanf("%99999999c", "abc"),
        Err(ScanError::Compile { .. })
    ));
}

// --- Entry points ---

#[test]
fn test_apply_accepts_compiled_or_string() {
    let compiled = CompiledFormat::new("%d apples", true).unwrap();
    let cached = compile("%d apples", true).unwrap();
    let expected = Some(vec![int(3)]);
    assert_eq!(apply(&compiled, "3 apples").unwrap(), expected);
    assert_eq!(apply(&cached, "3 apples").unwrap(), expected);
    assert_eq!(apply("%d apples", "3 apples").unwrap(), expected);
    assert_eq!(apply(&"%d apples".to_string(), "3 apples").unwrap(), expected);
    assert_eq!(apply("%d apples", "no apples").unwrap(), None);
}

#[test]
fn test_compiling_twice_is_idempotent() {
    let first = CompiledFormat::new("%s=%[d,]", true).unwrap();
    let second = CompiledFormat::new("%s=%[d,]", true).unwrap();
    assert_eq!(first.pattern().as_str(), second.pattern().as_str());
    assert_eq!(first.conversions(), second.conversions());

    let line = "xs=1, 2, 3";
    let once = first.apply(line).unwrap();
    assert_eq!(once, first.apply(line).unwrap());
    assert_eq!(once, second.apply(line).unwrap());
}

#[test]
fn test_suppressed_only_format_yields_empty_tuple() {
    assert_eq!(scan("%*d %*s", "1 x"), Some(vec![]));
    assert_eq!(scan("%*d %*s", "x"), None);
}
