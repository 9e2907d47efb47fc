//! zh-CN collation for brand and model names.
//!
//! [`compare`] approximates a browser's `localeCompare(_, "zh-CN")` closely
//! enough for sorting result groups:
//!
//! 1. **Primary**: characters compare by class (symbols < digits < Latin <
//!    Han < other scripts). Latin letters compare case-insensitively with
//!    diacritics stripped (`é` weighs as `e`); Han characters compare by
//!    their toneless pinyin reading, then code point.
//! 2. **Accent**: a plain letter sorts before its accented forms.
//! 3. **Case**: lowercase sorts before uppercase at the first difference.
//! 4. **Code point**: raw `char` order, so the ordering is total and
//!    `compare(a, b) == Equal` only when `a == b`.

use pinyin::ToPinyin;
use std::cmp::Ordering;

/// Character class, in sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Symbol,
    Digit,
    Latin,
    Han,
    Other,
}

/// Primary weight of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Primary {
    class: Class,
    reading: &'static str,
    folded: char,
}

fn lower(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Base letter of an accented Latin-1 or Latin Extended-A lowercase letter.
fn base_letter(ch: char) -> char {
    match ch {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => ch,
    }
}

fn primary(ch: char) -> Primary {
    let folded = base_letter(lower(ch));
    if let Some(reading) = ch.to_pinyin() {
        return Primary { class: Class::Han, reading: reading.plain(), folded: ch };
    }
    let class = if ch.is_numeric() {
        Class::Digit
    } else if is_latin(ch) {
        Class::Latin
    } else if is_han(ch) {
        Class::Han
    } else if ch.is_alphabetic() {
        Class::Other
    } else {
        Class::Symbol
    };
    Primary { class, reading: "", folded }
}

fn is_latin(ch: char) -> bool {
    ch.is_ascii_alphabetic() || (ch.is_alphabetic() && ('\u{00C0}'..='\u{024F}').contains(&ch))
}

fn is_han(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch) || ('\u{3400}'..='\u{4DBF}').contains(&ch)
}

/// Accent weight: plain letters before accented ones.
fn accent_weight(ch: char) -> u8 {
    let lowered = lower(ch);
    u8::from(base_letter(lowered) != lowered)
}

/// Case weight: lowercase (and uncased) before uppercase.
fn case_weight(ch: char) -> u8 {
    u8::from(ch.is_uppercase())
}

/// Compare two strings the way a zh-CN locale would sort them.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary)
        .cmp(b.chars().map(primary))
        .then_with(|| a.chars().map(accent_weight).cmp(b.chars().map(accent_weight)))
        .then_with(|| a.chars().map(case_weight).cmp(b.chars().map(case_weight)))
        .then_with(|| a.cmp(b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
