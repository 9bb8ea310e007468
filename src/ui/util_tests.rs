#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Uber", 10), "Uber");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("Hilton", 6), "Hilton");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Social Media Ads Inc", 7), "Social…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Zoom", 0), "");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("Zoom", 1), "…");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(10000000.00)), "$10,000,000.00");
}

#[test]
fn test_format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
    assert_eq!(format_amount(dec!(5)), "$5.00");
}

// ── ListCursor ────────────────────────────────────────────────

#[test]
fn test_cursor_down_scrolls_at_page_edge() {
    let mut c = ListCursor::default();
    for _ in 0..3 {
        c.down(10, 3);
    }
    assert_eq!(c, ListCursor { index: 3, scroll: 1 });
}

#[test]
fn test_cursor_down_stops_at_end() {
    let mut c = ListCursor::default();
    c.down(1, 5);
    assert_eq!(c.index, 0);
    c.down(0, 5);
    assert_eq!(c.index, 0);
}

#[test]
fn test_cursor_up_pulls_scroll() {
    let mut c = ListCursor { index: 3, scroll: 3 };
    c.up();
    assert_eq!(c, ListCursor { index: 2, scroll: 2 });
    c.top();
    c.up();
    assert_eq!(c, ListCursor::default());
}

#[test]
fn test_cursor_bottom() {
    let mut c = ListCursor::default();
    c.bottom(10, 4);
    assert_eq!(c, ListCursor { index: 9, scroll: 6 });
    let mut empty = ListCursor::default();
    empty.bottom(0, 4);
    assert_eq!(empty, ListCursor::default());
}

#[test]
fn test_cursor_clamp_after_shrink() {
    let mut c = ListCursor { index: 7, scroll: 5 };
    c.clamp(3);
    assert_eq!(c, ListCursor { index: 2, scroll: 2 });
    c.clamp(0);
    assert_eq!(c, ListCursor::default());
}
