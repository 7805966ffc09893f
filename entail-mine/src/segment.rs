//! Paragraph-aware sentence splitting.
//!
//! Documents are split into paragraphs on line breaks before any boundary
//! detection runs. Line breaks reliably separate titles and headers from
//! body text, which boundary detectors would otherwise merge into the next
//! sentence. Each paragraph is then segmented by a [`BoundaryDetector`].

use hashbrown::HashSet;

/// Detects sentence boundaries within a single paragraph.
///
/// Implementations receive one paragraph at a time; they never see text
/// spanning a line break.
pub trait BoundaryDetector {
    /// Segments the paragraph into sentence slices, in order.
    fn sentences<'a>(&self, paragraph: &'a str) -> Vec<&'a str>;
}

/// Splits documents into sentences, one paragraph at a time.
pub struct SentenceSplitter<D = RuleDetector> {
    detector: D,
}

impl SentenceSplitter<RuleDetector> {
    /// Creates a splitter with the default rule-based boundary detector.
    pub fn new() -> Self {
        Self {
            detector: RuleDetector::new(),
        }
    }
}

impl Default for SentenceSplitter<RuleDetector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> SentenceSplitter<D>
where
    D: BoundaryDetector,
{
    /// Creates a splitter around the given boundary detector.
    pub const fn with_detector(detector: D) -> Self {
        Self { detector }
    }

    /// Splits the text into sentences, preserving paragraph order and the
    /// order of sentences within each paragraph. No tokenization or case
    /// normalization is applied. Empty paragraphs yield nothing.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = vec![];
        for paragraph in text.split('\n') {
            for sent in self.detector.sentences(paragraph) {
                let sent = sent.trim();
                if !sent.is_empty() {
                    sentences.push(sent.to_owned());
                }
            }
        }
        sentences
    }
}

/// Abbreviations whose trailing dot does not end a sentence, lower-cased and
/// without the dot.
const ABBREVIATIONS: &[&str] = &[
    "dr", "dra", "sr", "sra", "srs", "sras", "prof", "profa", "eng", "exmo", "exma", "av", "jr",
    "etc", "pág", "tel", "núm",
];

/// Rule-based sentence-boundary detection.
///
/// A sentence ends at a run of terminal punctuation (`.`, `!`, `?`, `…`),
/// possibly followed by closing quotes or brackets, when the run is followed
/// by whitespace and the next sentence starts with an upper-case letter, a
/// digit, or opening punctuation. A single dot after a known abbreviation or
/// a lone initial never ends a sentence.
pub struct RuleDetector {
    abbreviations: HashSet<&'static str>,
}

impl RuleDetector {
    /// Creates a detector with the built-in abbreviation list.
    pub fn new() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
        }
    }

    fn is_boundary(&self, chars: &[(usize, char)], run_start: usize, run_end: usize) -> bool {
        if run_end >= chars.len() {
            return true;
        }
        if !chars[run_end].1.is_whitespace() {
            // mid-token dot, e.g. a decimal number or a file name
            return false;
        }
        let terminal_run = chars[run_start..run_end]
            .iter()
            .filter(|(_, c)| is_terminal(*c))
            .count();
        if chars[run_start].1 == '.' && terminal_run == 1 {
            let word: Vec<char> = chars[..run_start]
                .iter()
                .rev()
                .map(|&(_, c)| c)
                .take_while(|c| c.is_alphanumeric())
                .collect();
            if word.len() == 1 && word[0].is_alphabetic() {
                // a lone initial, e.g. "J. Silva"
                return false;
            }
            let word: String = word.iter().rev().collect::<String>().to_lowercase();
            if self.abbreviations.contains(word.as_str()) {
                return false;
            }
        }
        match chars[run_end..].iter().find(|(_, c)| !c.is_whitespace()) {
            Some(&(_, next)) => next.is_uppercase() || next.is_numeric() || is_opening(next),
            None => true,
        }
    }
}

impl Default for RuleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryDetector for RuleDetector {
    fn sentences<'a>(&self, paragraph: &'a str) -> Vec<&'a str> {
        let chars: Vec<(usize, char)> = paragraph.char_indices().collect();
        let mut out = vec![];
        let mut start = 0;
        let mut i = 0;
        while i < chars.len() {
            if !is_terminal(chars[i].1) {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            while j < chars.len() && (is_terminal(chars[j].1) || is_closing(chars[j].1)) {
                j += 1;
            }
            if self.is_boundary(&chars, i, j) {
                let end = chars.get(j).map_or(paragraph.len(), |&(p, _)| p);
                out.push(&paragraph[start..end]);
                while j < chars.len() && chars[j].1.is_whitespace() {
                    j += 1;
                }
                start = chars.get(j).map_or(paragraph.len(), |&(p, _)| p);
            }
            i = j;
        }
        if start < paragraph.len() {
            out.push(&paragraph[start..]);
        }
        out
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closing(c: char) -> bool {
    matches!(c, ')' | ']' | '"' | '\'' | '»' | '”' | '’')
}

fn is_opening(c: char) -> bool {
    matches!(c, '(' | '[' | '"' | '\'' | '«' | '“' | '‘' | '¿' | '¡')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sentences() {
        let splitter = SentenceSplitter::new();
        assert_eq!(
            splitter.split("O menino caiu. A mãe correu."),
            vec!["O menino caiu.", "A mãe correu."]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let splitter = SentenceSplitter::new();
        assert_eq!(
            splitter.split("O Dr. Silva chegou. Todos saíram."),
            vec!["O Dr. Silva chegou.", "Todos saíram."]
        );
    }

    #[test]
    fn test_initials_do_not_split() {
        let splitter = SentenceSplitter::new();
        assert_eq!(
            splitter.split("O autor J. Saramago venceu."),
            vec!["O autor J. Saramago venceu."]
        );
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        let splitter = SentenceSplitter::new();
        assert_eq!(
            splitter.split("A taxa subiu 3.5 pontos. Ninguém reagiu."),
            vec!["A taxa subiu 3.5 pontos.", "Ninguém reagiu."]
        );
    }

    #[test]
    fn test_paragraphs_are_independent() {
        let splitter = SentenceSplitter::new();
        // a title without a final stop stays separate from the body
        assert_eq!(
            splitter.split("Economia em alta\nO PIB cresceu. Analistas comemoram."),
            vec!["Economia em alta", "O PIB cresceu.", "Analistas comemoram."]
        );
    }

    #[test]
    fn test_empty_paragraphs_yield_nothing() {
        let splitter = SentenceSplitter::new();
        assert!(splitter.split("").is_empty());
        assert_eq!(splitter.split("Uma frase.\n\n\n"), vec!["Uma frase."]);
    }

    #[test]
    fn test_terminal_runs_and_quotes() {
        let splitter = SentenceSplitter::new();
        assert_eq!(
            splitter.split("Será?! Ninguém sabe..."),
            vec!["Será?!", "Ninguém sabe..."]
        );
        assert_eq!(
            splitter.split("\"Chega.\" Ele saiu."),
            vec!["\"Chega.\"", "Ele saiu."]
        );
    }
}
