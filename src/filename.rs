//! Filename rendering from a template.

use crate::config::FileType;
use crate::error::{Error, Result};

/// Renders `template`, substituting `{original_name}` and
/// `{segment_index}`, then appends `.` + `file_format`'s extension.
///
/// Any other `{placeholder}` in the template is rejected with
/// [`Error::Template`] rather than left unsubstituted or silently dropped.
pub fn format_filename(
    original_name: &str,
    segment_index: usize,
    template: &str,
    file_format: FileType,
) -> Result<String> {
    let rendered = render_placeholders(template, original_name, segment_index)?;
    Ok(format!("{rendered}.{}", file_format.extension()))
}

fn render_placeholders(template: &str, original_name: &str, segment_index: usize) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let close = after_open.find('}').ok_or_else(|| Error::Template {
            template: template.to_string(),
            reason: "unterminated placeholder".to_string(),
        })?;
        let name = &after_open[..close];
        match name {
            "original_name" => out.push_str(original_name),
            "segment_index" => out.push_str(&segment_index.to_string()),
            other => {
                return Err(Error::Template {
                    template: template.to_string(),
                    reason: format!("Missing placeholder: {other}"),
                });
            }
        }
        rest = &after_open[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
