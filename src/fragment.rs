use crate::model::SvgDocument;

/// A `<g>…</g>` subtree lifted out of a source document for embedding in a
/// composed one. Owns its markup; the source document is left untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    markup: String,
}

impl Fragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

/// Return the first group subtree of `doc`, opening tag through matching
/// closing tag, or `None` if the document has no group node.
///
/// The scan balances nested groups, so a group that contains further `<g>`
/// children comes back whole. Source templates are assumed flat enough that
/// the first group found in document order is the intended top-level one.
pub fn extract_fragment(doc: &SvgDocument) -> Option<Fragment> {
    let markup = doc.markup();
    let start = find_group_open(markup)?;

    let mut depth = 0usize;
    let mut i = start;
    while let Some(rel) = markup[i..].find('<') {
        let tag_start = i + rel;
        let tag_end = tag_start + markup[tag_start..].find('>')? + 1;
        let tag = &markup[tag_start..tag_end];

        if is_group_open(tag) {
            if tag.ends_with("/>") {
                if depth == 0 {
                    return Some(Fragment::new(&markup[start..tag_end]));
                }
            } else {
                depth += 1;
            }
        } else if is_group_close(tag) {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(Fragment::new(&markup[start..tag_end]));
            }
        }
        i = tag_end;
    }
    None
}

fn find_group_open(markup: &str) -> Option<usize> {
    let bytes = markup.as_bytes();
    let mut from = 0;
    while let Some(rel) = markup[from..].find("<g") {
        let pos = from + rel;
        // Reject longer tag names such as <glyph> or <gradient>.
        match bytes.get(pos + 2) {
            Some(b'>') | Some(b'/') => return Some(pos),
            Some(c) if c.is_ascii_whitespace() => return Some(pos),
            _ => from = pos + 2,
        }
    }
    None
}

fn is_group_open(tag: &str) -> bool {
    let rest = match tag.strip_prefix("<g") {
        Some(rest) => rest,
        None => return false,
    };
    matches!(rest.as_bytes().first(), Some(b'>') | Some(b'/'))
        || rest.starts_with(|c: char| c.is_ascii_whitespace())
}

fn is_group_close(tag: &str) -> bool {
    let rest = match tag.strip_prefix("</g") {
        Some(rest) => rest,
        None => return false,
    };
    rest.trim_start().starts_with('>')
}
