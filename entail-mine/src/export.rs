//! XML export of mined pairs.
//!
//! Pairs are written as an `entailment-corpus` document: one `pair` element
//! per candidate, holding the two sentence texts as `t` (seed) and `h`
//! (candidate) children. Every exported pair starts out unlabeled; the
//! entailment attribute is filled in by a later human-judgement phase.

use std::io::{self, Write};

use crate::miner::CandidatePair;

/// The label given to pairs before human judgement.
const UNLABELED: &str = "UNKNOWN";

struct Entry {
    id: usize,
    cluster: Option<u32>,
    pair: CandidatePair,
}

/// Accumulates candidate pairs and writes them as an XML document.
///
/// Pair ids start at 1 and follow insertion order, so the same set of pairs
/// added in the same order always produces the same document.
#[derive(Default)]
pub struct XmlWriter {
    entries: Vec<Entry>,
}

impl XmlWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends pairs to the document, optionally tagging them all with a
    /// cluster number.
    pub fn add_pairs<I>(&mut self, pairs: I, cluster: Option<u32>)
    where
        I: IntoIterator<Item = CandidatePair>,
    {
        for pair in pairs {
            let id = self.entries.len() + 1;
            self.entries.push(Entry { id, cluster, pair });
        }
    }

    /// Returns the number of accumulated pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if no pairs have been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the XML document.
    pub fn write<W>(&self, mut wtr: W) -> io::Result<()>
    where
        W: Write,
    {
        writeln!(wtr, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(wtr, "<entailment-corpus>")?;
        for entry in &self.entries {
            write!(
                wtr,
                r#"  <pair id="{}" entailment="{}" similarity="{}""#,
                entry.id, UNLABELED, entry.pair.score
            )?;
            if let Some(cluster) = entry.cluster {
                write!(wtr, r#" cluster="{cluster}""#)?;
            }
            writeln!(wtr, ">")?;
            writeln!(
                wtr,
                r#"    <t sentence="{}">{}</t>"#,
                entry.pair.seed_index,
                escape(entry.pair.seed.trim())
            )?;
            writeln!(
                wtr,
                r#"    <h sentence="{}">{}</h>"#,
                entry.pair.candidate_index,
                escape(entry.pair.candidate.trim())
            )?;
            writeln!(wtr, "  </pair>")?;
        }
        writeln!(wtr, "</entailment-corpus>")?;
        Ok(())
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(seed: &str, candidate: &str, i: usize, j: usize, score: f64) -> CandidatePair {
        CandidatePair {
            seed: seed.to_owned(),
            candidate: candidate.to_owned(),
            seed_index: i,
            candidate_index: j,
            score,
        }
    }

    fn render(writer: &XmlWriter) -> String {
        let mut buf = vec![];
        writer.write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut writer = XmlWriter::new();
        writer.add_pairs([pair("Um.", "Dois.", 0, 1, 0.9)], None);
        writer.add_pairs([pair("Três.", "Quatro.", 2, 3, 0.85)], None);
        assert_eq!(writer.len(), 2);
        let xml = render(&writer);
        assert!(xml.contains(r#"<pair id="1" entailment="UNKNOWN" similarity="0.9">"#));
        assert!(xml.contains(r#"<pair id="2" entailment="UNKNOWN" similarity="0.85">"#));
    }

    #[test]
    fn test_sentence_indices_and_trimming() {
        let mut writer = XmlWriter::new();
        writer.add_pairs([pair("  Um gato.  ", "Dois ratos.", 4, 7, 0.88)], None);
        let xml = render(&writer);
        assert!(xml.contains(r#"<t sentence="4">Um gato.</t>"#));
        assert!(xml.contains(r#"<h sentence="7">Dois ratos.</h>"#));
    }

    #[test]
    fn test_cluster_attribute() {
        let mut writer = XmlWriter::new();
        writer.add_pairs([pair("Um.", "Dois.", 0, 1, 0.9)], Some(3));
        let xml = render(&writer);
        assert!(xml.contains(r#"cluster="3""#));
    }

    #[test]
    fn test_escaping() {
        let mut writer = XmlWriter::new();
        writer.add_pairs([pair("a < b & c.", "\"d\" > e.", 0, 1, 0.9)], None);
        let xml = render(&writer);
        assert!(xml.contains("a &lt; b &amp; c."));
        assert!(xml.contains("&quot;d&quot; &gt; e."));
    }

    #[test]
    fn test_empty_document() {
        let writer = XmlWriter::new();
        assert!(writer.is_empty());
        let xml = render(&writer);
        assert!(xml.contains("<entailment-corpus>"));
        assert!(xml.contains("</entailment-corpus>"));
        assert!(!xml.contains("<pair"));
    }
}
