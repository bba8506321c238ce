//! Converts prepared document blocks into terminal rows
//!
//! A terminal cannot change glyph size, so text size is expressed through the
//! column width: the larger the size, the fewer characters per row. Scroll
//! distance is expressed in the same units, with one row standing for one
//! line height at the current size.

use autocue_core::content::Block;
use autocue_core::settings::MIN_FONT_SIZE;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Narrowest column the prompter will wrap to
pub const MIN_COLUMN_WIDTH: u16 = 20;

/// Line height relative to the text size
const LINE_HEIGHT_FACTOR: f64 = 1.35;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub heading: bool,
}

impl Row {
    fn blank() -> Self {
        Self {
            text: String::new(),
            heading: false,
        }
    }
}

/// Distance units one row stands for at `font_size`
pub fn line_height(font_size: f32) -> f64 {
    f64::from(font_size) * LINE_HEIGHT_FACTOR
}

/// Column width for `font_size` inside a viewport `viewport_width` cells wide
pub fn column_width(viewport_width: u16, font_size: f32) -> u16 {
    if viewport_width <= MIN_COLUMN_WIDTH {
        return viewport_width;
    }
    let scaled = f64::from(viewport_width) * f64::from(MIN_FONT_SIZE) / f64::from(font_size);
    (scaled.round() as u16).clamp(MIN_COLUMN_WIDTH, viewport_width)
}

/// Wrap blocks to `width` cells
pub fn wrap_blocks(blocks: &[Block], width: u16) -> Vec<Row> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();

    for block in blocks {
        match block {
            Block::Blank => rows.push(Row::blank()),
            Block::Heading(text) => {
                rows.extend(wrap_text(text, width).into_iter().map(|text| Row {
                    text,
                    heading: true,
                }));
            }
            Block::Paragraph(text) => {
                rows.extend(wrap_text(text, width).into_iter().map(|text| Row {
                    text,
                    heading: false,
                }));
            }
        }
    }

    rows
}

/// Greedy word wrap. Runs of spaces are preserved inside a row so word
/// spacing survives wrapping; words wider than a row are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for (gap, word) in split_words(text) {
        let gap_width = gap.width();
        let word_width = word.width();

        if current_width > 0 && current_width + gap_width + word_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            current.push_str(gap);
            current_width += gap_width;
        }

        if word_width <= width - current_width {
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        // Word longer than a whole row
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Pairs of (preceding spaces, word)
fn split_words(text: &str) -> Vec<(&str, &str)> {
    let mut parts = Vec::new();
    let mut rest = text.trim_start();

    let mut gap = "";
    while !rest.is_empty() {
        let word_end = rest.find(' ').unwrap_or(rest.len());
        parts.push((gap, &rest[..word_end]));
        rest = &rest[word_end..];

        let gap_end = rest.find(|c: char| c != ' ').unwrap_or(rest.len());
        gap = &rest[..gap_end];
        rest = &rest[gap_end..];
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|row| row.text.as_str()).collect()
    }

    #[test]
    fn test_column_width_scales_with_font_size() {
        assert_eq!(column_width(160, 16.0), 160);
        assert_eq!(column_width(160, 32.0), 80);
        assert_eq!(column_width(160, 96.0), 27);
        assert_eq!(column_width(40, 96.0), MIN_COLUMN_WIDTH);
        assert_eq!(column_width(10, 30.0), 10);
    }

    #[test]
    fn test_line_height() {
        assert!((line_height(30.0) - 40.5).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_simple() {
        let blocks = vec![Block::Paragraph("the quick brown fox jumps".to_string())];
        let rows = wrap_blocks(&blocks, 10);
        assert_eq!(texts(&rows), vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_keeps_word_spacing() {
        let blocks = vec![Block::Paragraph("one   two   three".to_string())];
        let rows = wrap_blocks(&blocks, 10);
        assert_eq!(texts(&rows), vec!["one   two", "three"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let blocks = vec![Block::Paragraph("abcdefghijkl".to_string())];
        let rows = wrap_blocks(&blocks, 5);
        assert_eq!(texts(&rows), vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_headings_and_blanks() {
        let blocks = vec![
            Block::Heading("Intro".to_string()),
            Block::Blank,
            Block::Paragraph("Hi".to_string()),
        ];
        let rows = wrap_blocks(&blocks, 20);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].heading);
        assert_eq!(rows[1], Row::blank());
        assert!(!rows[2].heading);
    }
}
