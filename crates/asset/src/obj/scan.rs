//! Line scanner: decode, strip comments, classify by leading directive.

use crate::error::ObjResult;

/// Directives that carry geometry. Everything else (`o`, `g`, `s`,
/// `usemtl`, `mtllib`, `l`, ...) is skipped by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    Position,
    Normal,
    TexCoord,
    Face,
}

impl Directive {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "v" => Some(Self::Position),
            "vn" => Some(Self::Normal),
            "vt" => Some(Self::TexCoord),
            "f" => Some(Self::Face),
            _ => None,
        }
    }
}

/// One classified line. `args` excludes the directive tag itself.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannedLine<'a> {
    /// 1-based, for diagnostics.
    pub line_no: usize,
    pub directive: Directive,
    pub args: Vec<&'a str>,
}

/// Decode raw asset bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode(bytes: &[u8]) -> ObjResult<&str> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.strip_prefix('\u{FEFF}').unwrap_or(text))
}

/// Lazily yield the geometry-carrying lines of `text`.
///
/// Lines end at `\n`, `\r\n` or a lone `\r` (classic Mac exports).
pub fn scan(text: &str) -> impl Iterator<Item = ScannedLine<'_>> {
    lines(text).enumerate().filter_map(|(i, line)| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let mut parts = trimmed.split_whitespace();
        let directive = Directive::from_tag(parts.next()?)?;
        Some(ScannedLine {
            line_no: i + 1,
            directive,
            args: parts.collect(),
        })
    })
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}
