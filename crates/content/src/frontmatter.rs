// Path: crates/content/src/frontmatter.rs

//! Parsing and rendering of the delimited metadata block at the head of a
//! proposal body.
//!
//! A body begins with a `---` line, followed by `key: value` pairs, closed
//! by another `---` line; everything after that is free-form text. The
//! block is extracted into a map so structured fields (author, status,
//! dates) can be read without re-scanning the body.

use agora_types::app::ParsedDocument;
use agora_types::error::ContentError;
use std::collections::BTreeMap;

const DELIMITER: &str = "---";

/// Splits raw body text into its metadata map and remaining body.
pub fn parse(text: &str) -> Result<ParsedDocument, ContentError> {
    let normalized = text.replace("\r\n", "\n");
    let rest = normalized
        .strip_prefix(DELIMITER)
        .and_then(|r| r.strip_prefix('\n'))
        .ok_or_else(|| ContentError::Malformed("missing metadata block".to_string()))?;

    let Some((block, body)) = split_at_close(rest) else {
        return Err(ContentError::Malformed(
            "unterminated metadata block".to_string(),
        ));
    };

    let mut frontmatter = BTreeMap::new();
    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = line.split_once(':').ok_or_else(|| {
            ContentError::Malformed(format!("metadata line `{}` has no `:`", line))
        })?;
        frontmatter.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(ParsedDocument {
        frontmatter,
        body: body.to_string(),
    })
}

// The closing delimiter must sit on its own line; text after it (minus one
// separating newline) is the body.
fn split_at_close(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches('\n') == DELIMITER {
            let block = rest.get(..offset)?;
            let after = rest.get(offset + line.len()..)?;
            return Some((block, after));
        }
        offset += line.len();
    }
    // A final "---" with no trailing newline.
    if rest.get(offset..) == Some(DELIMITER) {
        let block = rest.get(..offset)?;
        return Some((block, ""));
    }
    None
}

/// Renders a document back to its textual form, metadata block first.
pub fn render(doc: &ParsedDocument) -> String {
    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');
    for (key, value) in &doc.frontmatter {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&doc.body);
    out
}
