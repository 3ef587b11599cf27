//! Recursive character splitting with overlap
//!
//! Splits text by separator preference (paragraph breaks first, then line
//! breaks, sentence ends, commas, spaces), recursing with the next separator
//! whenever a piece is still over the size limit. The resulting fragments are
//! merged into chunks no larger than the configured size, with a trailing
//! overlap carried into the next chunk to preserve cross-boundary context.

use unicode_segmentation::UnicodeSegmentation;

/// Separator preference order, coarsest first
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", ", ", " "];

/// Text splitter with configurable size and overlap
pub struct RecursiveSplitter {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Overlap between adjacent chunks
    overlap: usize,
}

impl RecursiveSplitter {
    /// Create a new splitter
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Split text into chunks of at most `chunk_size` characters.
    ///
    /// Whitespace-only input yields no chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let fragments = self.fragment(text, SEPARATORS);
        self.merge(&fragments)
    }

    /// Break text into fragments no larger than `chunk_size`, trying each
    /// separator in preference order.
    fn fragment(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let Some((sep, rest)) = separators.split_first() else {
            return self.hard_split(text);
        };

        if !text.contains(sep) {
            return self.fragment(text, rest);
        }

        let mut fragments = Vec::new();
        for piece in split_keeping_separator(text, sep) {
            if piece.len() <= self.chunk_size {
                fragments.push(piece.to_string());
            } else {
                fragments.extend(self.fragment(piece, rest));
            }
        }
        fragments
    }

    /// Last-resort split on grapheme boundaries for separator-free text
    fn hard_split(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();

        for grapheme in text.graphemes(true) {
            if !current.is_empty() && current.len() + grapheme.len() > self.chunk_size {
                pieces.push(std::mem::take(&mut current));
            }
            current.push_str(grapheme);
        }

        if !current.is_empty() {
            pieces.push(current);
        }
        pieces
    }

    /// Greedily merge fragments into chunks, carrying an overlap tail between
    /// adjacent chunks.
    fn merge(&self, fragments: &[String]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for fragment in fragments {
            if !current.is_empty() && current.len() + fragment.len() > self.chunk_size {
                let tail = self.overlap_tail(&current);
                let finished = current.trim().to_string();
                if !finished.is_empty() {
                    chunks.push(finished);
                }

                // Carry the overlap only when it leaves room for the fragment
                current = if tail.len() + fragment.len() <= self.chunk_size {
                    tail
                } else {
                    String::new()
                };
            }
            current.push_str(fragment);
        }

        let finished = current.trim().to_string();
        if !finished.is_empty() {
            chunks.push(finished);
        }
        chunks
    }

    /// Overlap text from the end of a chunk, trimmed back to a sentence or
    /// word boundary when one is in range.
    fn overlap_tail(&self, text: &str) -> String {
        if self.overlap == 0 {
            return String::new();
        }
        if text.len() <= self.overlap {
            return text.to_string();
        }

        let mut start = text.len() - self.overlap;
        while start > 0 && !text.is_char_boundary(start) {
            start -= 1;
        }
        let tail = &text[start..];

        if let Some(pos) = tail.find(". ") {
            return tail[pos + 2..].to_string();
        }
        if let Some(pos) = tail.find(' ') {
            return tail[pos + 1..].to_string();
        }
        tail.to_string()
    }
}

/// Split on a separator, keeping the separator at the end of each piece
fn split_keeping_separator<'a>(text: &'a str, sep: &str) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(sep) {
        let end = start + pos + sep.len();
        pieces.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        let splitter = RecursiveSplitter::new(1000, 200);
        let chunks = splitter.split("A short abstract.");
        assert_eq!(chunks, vec!["A short abstract."]);
    }

    #[test]
    fn whitespace_only_text_yields_no_chunks() {
        let splitter = RecursiveSplitter::new(1000, 200);
        assert!(splitter.split("   \n\n  ").is_empty());
    }

    #[test]
    fn word_level_split_with_overlap() {
        let splitter = RecursiveSplitter::new(20, 10);
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
        let chunks = splitter.split(text);

        assert_eq!(
            chunks,
            vec![
                "alpha bravo charlie",
                "charlie delta echo",
                "echo foxtrot golf",
                "golf hotel india",
                "india juliet",
            ]
        );
    }

    #[test]
    fn every_chunk_respects_size_bound() {
        let splitter = RecursiveSplitter::new(50, 10);
        let text = "Paragraph one has some text.\n\nParagraph two is longer and \
                    contains several sentences. It keeps going, with commas, \
                    and more words. Finally it ends here after a while.";
        let chunks = splitter.split(text);

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.len() <= 50, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn sentences_survive_splitting_intact() {
        let splitter = RecursiveSplitter::new(30, 5);
        let text = "First sentence here. Second sentence there. Third one.";
        let chunks = splitter.split(text);

        for sentence in [
            "First sentence here.",
            "Second sentence there.",
            "Third one.",
        ] {
            assert!(
                chunks.iter().any(|c| c.contains(sentence)),
                "sentence {:?} missing from {:?}",
                sentence,
                chunks
            );
        }
    }

    #[test]
    fn consecutive_chunks_share_overlap_content() {
        let splitter = RecursiveSplitter::new(20, 10);
        let chunks =
            splitter.split("alpha bravo charlie delta echo foxtrot golf hotel india juliet");

        for pair in chunks.windows(2) {
            let first_word = pair[1].split_whitespace().next().unwrap();
            assert!(
                pair[0].contains(first_word),
                "chunks {:?} and {:?} share no overlap",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn separator_free_text_hard_splits_within_bound() {
        let splitter = RecursiveSplitter::new(10, 0);
        let text = "x".repeat(35);
        let chunks = splitter.split(&text);

        assert_eq!(chunks.len(), 4);
        for chunk in &chunks {
            assert!(chunk.len() <= 10);
        }
        assert_eq!(chunks.concat(), text);
    }
}
