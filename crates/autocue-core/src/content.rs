//! Document loading and text preparation for the prompter view

use std::path::Path;

pub const DEFAULT_WORD_SPACING: i32 = 1;
pub const MIN_WORD_SPACING: i32 = 1;
pub const MAX_WORD_SPACING: i32 = 8;

/// Width used when flattening HTML; the view re-wraps afterwards
const HTML_RENDER_WIDTH: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    Html,
    Text,
}

/// One logical line of the prepared document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    Blank,
}

/// Determine the document format from the file extension
pub fn detect_format(path: &Path) -> crate::Result<Format> {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "md" | "markdown" => Ok(Format::Markdown),
        "html" | "htm" => Ok(Format::Html),
        "txt" => Ok(Format::Text),
        _ => Err(crate::Error::UnsupportedFileType(format!(".{}", ext))),
    }
}

pub fn load_from_path(path: &Path) -> crate::Result<(String, Format)> {
    let format = detect_format(path)?;
    let text = std::fs::read_to_string(path)?;
    Ok((text, format))
}

pub fn normalize_word_spacing(value: i32) -> i32 {
    value.clamp(MIN_WORD_SPACING, MAX_WORD_SPACING)
}

/// Split a document into display blocks and apply word spacing
pub fn prepare(text: &str, format: Format, word_spacing: i32) -> Vec<Block> {
    let spacing = normalize_word_spacing(word_spacing);

    let blocks = match format {
        Format::Html => {
            let flattened = html2text::from_read(text.as_bytes(), HTML_RENDER_WIDTH)
                .unwrap_or_else(|_| text.to_string());
            parse_markdown(&flattened)
        }
        Format::Markdown => parse_markdown(text),
        Format::Text => text
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    Block::Blank
                } else {
                    Block::Paragraph(line.trim_end().to_string())
                }
            })
            .collect(),
    };

    collapse_blank_lines(blocks)
        .into_iter()
        .map(|block| match block {
            Block::Heading(text) => Block::Heading(stretch_words(&text, spacing)),
            Block::Paragraph(text) => Block::Paragraph(stretch_words(&text, spacing)),
            Block::Blank => Block::Blank,
        })
        .collect()
}

/// Headings lose their `#` markers, everything else is kept as written.
/// html2text emits markdown-style headings too, so HTML goes through here.
fn parse_markdown(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if trimmed.is_empty() {
            blocks.push(Block::Blank);
            continue;
        }
        if in_fence {
            blocks.push(Block::Paragraph(line.trim_end().to_string()));
            continue;
        }

        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
            let title = trimmed[hashes..].trim().trim_end_matches('#').trim_end();
            blocks.push(Block::Heading(title.to_string()));
        } else {
            blocks.push(Block::Paragraph(trimmed.to_string()));
        }
    }

    blocks
}

fn collapse_blank_lines(blocks: Vec<Block>) -> Vec<Block> {
    let mut result: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if block == Block::Blank && matches!(result.last(), None | Some(Block::Blank)) {
            continue;
        }
        result.push(block);
    }
    while result.last() == Some(&Block::Blank) {
        result.pop();
    }
    result
}

fn stretch_words(value: &str, spacing: i32) -> String {
    if spacing <= 1 || value.is_empty() {
        return value.to_string();
    }
    value.replace(' ', &" ".repeat(spacing as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(&PathBuf::from("talk.md")).unwrap(), Format::Markdown);
        assert_eq!(detect_format(&PathBuf::from("TALK.Markdown")).unwrap(), Format::Markdown);
        assert_eq!(detect_format(&PathBuf::from("page.HTM")).unwrap(), Format::Html);
        assert_eq!(detect_format(&PathBuf::from("notes.txt")).unwrap(), Format::Text);
        assert!(matches!(
            detect_format(&PathBuf::from("slides.pdf")),
            Err(crate::Error::UnsupportedFileType(ext)) if ext == ".pdf"
        ));
    }

    #[test]
    fn test_normalize_word_spacing() {
        assert_eq!(normalize_word_spacing(0), 1);
        assert_eq!(normalize_word_spacing(4), 4);
        assert_eq!(normalize_word_spacing(42), 8);
    }

    #[test]
    fn test_prepare_markdown() {
        let blocks = prepare("# Welcome\n\n\n\nGood evening everyone\n", Format::Markdown, 1);
        assert_eq!(
            blocks,
            vec![
                Block::Heading("Welcome".to_string()),
                Block::Blank,
                Block::Paragraph("Good evening everyone".to_string()),
            ]
        );
    }

    #[test]
    fn test_hashtag_is_not_heading() {
        let blocks = prepare("#hashtag", Format::Markdown, 1);
        assert_eq!(blocks, vec![Block::Paragraph("#hashtag".to_string())]);
    }

    #[test]
    fn test_word_spacing_applied() {
        let blocks = prepare("one two three", Format::Text, 3);
        assert_eq!(blocks, vec![Block::Paragraph("one   two   three".to_string())]);
    }

    #[test]
    fn test_prepare_html() {
        let blocks = prepare(
            "<html><body><h1>Title</h1><p>Hello world</p></body></html>",
            Format::Html,
            1,
        );
        assert!(blocks.contains(&Block::Heading("Title".to_string())));
        assert!(blocks.contains(&Block::Paragraph("Hello world".to_string())));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech.md");
        std::fs::write(&path, "hello").unwrap();

        let (text, format) = load_from_path(&path).unwrap();
        assert_eq!(text, "hello");
        assert_eq!(format, Format::Markdown);

        let unsupported = dir.path().join("speech.docx");
        std::fs::write(&unsupported, "hello").unwrap();
        assert!(load_from_path(&unsupported).is_err());
    }
}
