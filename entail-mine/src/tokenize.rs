//! Rule-based tokenization of natural-language text.
//!
//! Tokens are recognized by an ordered list of lexical rules, tried
//! first-match-wins at each position. The rules cover abbreviations,
//! grouped numbers, dates, times, currency, hashtags, clitic pronouns,
//! hyphenated/apostrophized words, dash runs, and ellipses; any other
//! non-whitespace character becomes a token of its own.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lexical rules in precedence order. Earlier rules win.
const RULES: &[&str] = &[
    r"(?:[^\W\d_]\.)+",         // one-letter abbreviation runs, e.g. E.U.A.
    r"\d{1,3}(?:\.\d{3})*,\d+", // numbers in the format 999.999.999,99999
    r"\d{1,3}(?:,\d{3})*\.\d+", // numbers in the format 999,999,999.99999
    r"\d+:\d+",                 // times and proportions
    r"\d+(?:[-\\/]\d+)*",       // dates, e.g. 12/03/2012 or 12-03-2012
    r"[DSds][Rr][Aa]?\.",       // honorifics: dr., sr., sra., dra.
    r"[Mm]\.?[Ss][Cc]\.?",      // M.Sc. with or without capitalization and dots
    r"[Pp][Hh]\.?[Dd]\.?",      // same for Ph.D.
    r"[^\W\d_]{1,2}\$",         // currency symbols
    r"-[^\W\d_]+",              // clitic pronouns with a leading hyphen
    r"\w+(?:[-']\w+)*",         // words with hyphens or apostrophes
    r"-+",                      // dash runs
    r"\.{3,}",                  // ellipses
    r"\S",                      // any other non-space character, alone
];

/// Hashtags and mentions. Valid only right after whitespace or at the start
/// of the text, with precedence between the currency and clitic rules.
const TAG_RULE: &str = r"[#@]\w*[A-Za-z_]+\w*";

/// Index of the slot the tag rule occupies in [`RULES`].
const TAG_SLOT: usize = 9;

fn compile(with_tags: bool) -> Regex {
    let mut branches = RULES[..TAG_SLOT].to_vec();
    if with_tags {
        branches.push(TAG_RULE);
    }
    branches.extend_from_slice(&RULES[TAG_SLOT..]);
    Regex::new(&format!(r"\A(?:{})", branches.join("|"))).unwrap()
}

/// Rules applicable at a whitespace boundary.
static BOUNDARY_RULES: Lazy<Regex> = Lazy::new(|| compile(true));
/// Rules applicable in the middle of a non-whitespace run.
static INNER_RULES: Lazy<Regex> = Lazy::new(|| compile(false));

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());
static SPACED_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r" ([.,;:?!()])").unwrap());

/// Tokenizes the given text, applying preprocessing if requested.
///
/// With `preprocess` set, the text is lower-cased and every digit is replaced
/// by `9` before the rules run, so numeric identity is erased while number
/// shape survives. Without it, tokens keep their surface form.
///
/// Output is deterministic: the same text and flag always produce the same
/// token sequence. Empty input yields an empty sequence.
pub fn tokenize(text: &str, preprocess: bool) -> Vec<String> {
    if preprocess {
        let lowered = text.to_lowercase();
        scan(&DIGITS.replace_all(&lowered, "9"))
    } else {
        scan(text)
    }
}

fn scan(text: &str) -> Vec<String> {
    let mut tokens = vec![];
    for chunk in text.split_whitespace() {
        let mut pos = 0;
        while pos < chunk.len() {
            let rules = if pos == 0 {
                &*BOUNDARY_RULES
            } else {
                &*INNER_RULES
            };
            // the `\S` fallback guarantees a match on any non-empty rest
            let m = rules.find(&chunk[pos..]).unwrap();
            tokens.push(m.as_str().to_owned());
            pos += m.end();
        }
    }
    tokens
}

/// Joins tokens back into a string, dropping the space before punctuation
/// that attaches to the preceding token.
pub fn detokenize<S>(tokens: &[S]) -> String
where
    S: AsRef<str>,
{
    let joined = tokens
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    SPACED_PUNCT.replace_all(&joined, "$1").into_owned()
}
