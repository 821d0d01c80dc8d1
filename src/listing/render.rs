//! Listing page rendering
//!
//! Output layout:
//! `Available Files:<br/><ul><li><a href='{name}'>{name}</a></li>...</ul><br/>Session: {id}`

use super::{DirEntry, Directory, FileSystem, ListingError, ListingOptions, ResponseSink, SessionValues};

/// Session key whose value is appended to the page
pub const SESSION_ID_KEY: &str = "id";

const HEADER: &str = "Available Files:<br/><ul>";
const FOOTER: &str = "</ul><br/>Session: ";

/// Render the listing for `options` and hand it to `response`.
///
/// A folder that cannot be resolved or enumerated is returned as an error
/// and `response` is left untouched. A missing session id renders as an
/// empty string.
pub fn render_listing<F, S, R>(
    options: &ListingOptions,
    filesystem: &F,
    session: &S,
    response: &mut R,
) -> Result<(), ListingError>
where
    F: FileSystem + ?Sized,
    S: SessionValues + ?Sized,
    R: ResponseSink + ?Sized,
{
    let directory = filesystem.resolve(&options.folder)?;
    let entries = directory.list_children()?;
    let session_id = session.get(SESSION_ID_KEY);

    let body = render_listing_body(&options.replace, &entries, session_id.as_deref());
    response.set_body(body);
    Ok(())
}

/// Build the page body from already enumerated entries
pub fn render_listing_body(replace: &str, entries: &[DirEntry], session_id: Option<&str>) -> String {
    let mut html = String::from(HEADER);

    for entry in entries {
        let name = escape_html(&format!("{replace}{}", entry.entity_name()));
        html.push_str(&format!("<li><a href='{name}'>{name}</a></li>"));
    }

    html.push_str(FOOTER);
    html.push_str(&escape_html(session_id.unwrap_or_default()));
    html
}

/// Escape the characters that could break out of an attribute or element
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
