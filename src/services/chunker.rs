use std::collections::VecDeque;

use crate::errors::InputError;

pub const PARAGRAPH_SEPARATOR: &str = "\n\n";
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Splits text into chunks of at most `max_size` characters.
///
/// Paragraphs (separated by a blank line) are merged greedily until the next
/// one would overflow the limit. A new chunk starts with the trailing
/// paragraphs of the previous one, as long as they fit in `overlap`
/// characters. Paragraphs that are too long on their own are cut into
/// windows of `max_size` characters that step forward by `max_size - overlap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    max_size: usize,
    overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        TextChunker {
            max_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

impl TextChunker {
    pub fn new(max_size: usize, overlap: usize) -> Result<Self, InputError> {
        if max_size == 0 {
            return Err(InputError::InvalidChunking(
                "max_size must be positive".to_string(),
            ));
        }
        if overlap >= max_size {
            return Err(InputError::InvalidChunking(format!(
                "overlap ({}) must be smaller than max_size ({})",
                overlap, max_size
            )));
        }
        Ok(TextChunker { max_size, overlap })
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let pieces: Vec<String> = text
            .split(PARAGRAPH_SEPARATOR)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .flat_map(|p| self.window(p))
            .collect();

        self.merge(pieces)
    }

    /// Cut a single oversized paragraph into overlapping character windows.
    fn window(&self, paragraph: &str) -> Vec<String> {
        let chars: Vec<char> = paragraph.chars().collect();
        if chars.len() <= self.max_size {
            return vec![paragraph.to_string()];
        }

        let stride = self.max_size - self.overlap;
        let mut windows = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + self.max_size).min(chars.len());
            windows.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += stride;
        }
        windows
    }

    fn merge(&self, pieces: Vec<String>) -> Vec<String> {
        let sep_len = char_len(PARAGRAPH_SEPARATOR);
        let mut chunks = Vec::new();
        let mut current: VecDeque<(String, usize)> = VecDeque::new();
        let mut total = 0;

        let joined_len = |total: usize, count: usize| total + sep_len * count.saturating_sub(1);

        for piece in pieces {
            let len = char_len(&piece);
            let sep = if current.is_empty() { 0 } else { sep_len };

            if !current.is_empty() && joined_len(total, current.len()) + sep + len > self.max_size {
                chunks.push(join(&current));

                // Keep only what fits in the overlap and still leaves room for `piece`.
                while !current.is_empty()
                    && (joined_len(total, current.len()) > self.overlap
                        || joined_len(total, current.len()) + sep_len + len > self.max_size)
                {
                    if let Some((_, dropped)) = current.pop_front() {
                        total -= dropped;
                    }
                }
            }

            total += len;
            current.push_back((piece, len));
        }

        if !current.is_empty() {
            chunks.push(join(&current));
        }

        chunks
    }
}

fn join(pieces: &VecDeque<(String, usize)>) -> String {
    pieces
        .iter()
        .map(|(p, _)| p.as_str())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}
