//! Footer stamping.
//!
//! Rewrites the first `<footer>` of an HTML document so that it carries an
//! `updated DD/Mon/YYYY` line. The transform is plain text substitution; the
//! document is never parsed.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Error;

const FOOTER_OPEN: &str = "<footer>";
const FOOTER_CLOSE: &str = "</footer>";
const BODY_CLOSE: &str = "</body>";

/// Format used for the footer date, e.g. `31/Dec/2021`.
pub const DATE_FORMAT: &str = "%d/%b/%Y";

/// Date used when only checking structure.
pub const PLACEHOLDER_STAMP: &str = "unused";

/// Format a timestamp the way it appears in the footer.
pub fn date_stamp(now: DateTime<Utc>) -> String {
    now.format(DATE_FORMAT).to_string()
}

/// Validate a user-supplied date and return it in footer form.
///
/// Anything that does not parse as `DD/Mon/YYYY` is rejected, so markup can
/// never end up inside the stamp.
pub fn parse_date_stamp(input: &str) -> Result<String, Error> {
    let date = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(input.to_string()))?;
    Ok(date.format(DATE_FORMAT).to_string())
}

/// The marker looked for when deciding whether a footer is already current.
fn stamp_marker(stamp: &str) -> String {
    format!("updated {}", stamp)
}

/// Full footer element carrying `stamp`.
fn footer_block(stamp: &str) -> String {
    format!(
        "{}\n<hr>\n<small>{}</small>\n{}",
        FOOTER_OPEN,
        stamp_marker(stamp),
        FOOTER_CLOSE
    )
}

/// Stamp `html` with `stamp`, returning the new text.
///
/// Returns the input unchanged when the first footer already mentions
/// `updated {stamp}`. A document without a footer gets an empty one inserted
/// before its first `</body>`. `source_name` is only used in error messages.
pub fn replace_footer(html: &str, stamp: &str, source_name: &str) -> Result<String, Error> {
    let has_footer = html.contains(FOOTER_OPEN);
    if !has_footer && !html.contains(BODY_CLOSE) {
        return Err(Error::malformed(
            source_name,
            "requires at least a closing </body> tag.",
        ));
    }

    let html = if has_footer {
        html.to_string()
    } else {
        html.replacen(
            BODY_CLOSE,
            &format!("{}{}\n{}", FOOTER_OPEN, FOOTER_CLOSE, BODY_CLOSE),
            1,
        )
    };

    // Both searches succeed on the synthesized footer, so only a real document
    // can trip the unclosed case.
    let open_idx = html
        .find(FOOTER_OPEN)
        .ok_or_else(|| Error::malformed(source_name, "has no <footer> tag."))?;
    let inner_start = open_idx + FOOTER_OPEN.len();
    let close_offset = html[inner_start..]
        .find(FOOTER_CLOSE)
        .ok_or_else(|| Error::malformed(source_name, "has a <footer> without </footer>."))?;
    let inner_end = inner_start + close_offset;

    if html[inner_start..inner_end].contains(&stamp_marker(stamp)) {
        return Ok(html);
    }

    let before = &html[..open_idx];
    let after = &html[inner_end + FOOTER_CLOSE.len()..];
    Ok(format!("{}{}{}", before, footer_block(stamp), after))
}
