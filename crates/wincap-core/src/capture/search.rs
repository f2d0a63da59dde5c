//! Default title search, composed from `list_windows` and `capture_window`.
//!
//! Matching policy, part of the service contract:
//! 1. Non-printable characters are removed from the window title (never
//!    from the query). See [`is_printable`].
//! 2. Both sides are lower-cased and the title must contain the query.
//! 3. The first match in enumeration order wins, with no fallback to later
//!    matches even if its capture fails.
//!
//! An enumeration failure is treated as an empty window list, so the search
//! degrades to `WindowNotFound` instead of surfacing the enumeration error.

use image::RgbaImage;
use tracing::{debug, info, warn};
use unicode_general_category::{GeneralCategory, get_general_category};

use super::errors::CaptureError;
use super::traits::WindowCapture;
use super::types::CaptureOptions;
use crate::window::{WindowId, WindowInfo};

/// Whether a character survives title sanitizing.
///
/// Printable means a letter, mark, number, punctuation or symbol by Unicode
/// general category, plus the ASCII space. Controls, format characters
/// (bidi marks and isolates, zero-width characters), private-use and
/// unassigned code points, and every separator other than U+0020 are
/// non-printable.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Remove non-printable characters from a window title.
pub fn sanitize_title(title: &str) -> String {
    title.chars().filter(|c| is_printable(*c)).collect()
}

/// Whether `title` matches `query` under the search policy.
pub fn title_matches(title: &str, query: &str) -> bool {
    sanitize_title(title)
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// First window, in the given order, whose title matches `query`.
pub fn find_first_match<'a>(windows: &'a [WindowInfo], query: &str) -> Option<&'a WindowInfo> {
    windows.iter().find(|w| title_matches(w.title(), query))
}

/// Capture the first window whose title contains `contains`.
///
/// Returns `WindowNotFound` carrying the original query when nothing
/// matches. Capture errors of the matched window propagate unchanged.
pub fn capture_by_title<C: WindowCapture + ?Sized>(
    capturer: &C,
    contains: &str,
    options: CaptureOptions,
) -> Result<RgbaImage, CaptureError> {
    info!(
        event = "core.capture.by_title_started",
        backend = capturer.backend_name(),
        title = contains,
        options = %options
    );

    let windows = match capturer.list_windows() {
        Ok(windows) => windows,
        Err(e) => {
            warn!(
                event = "core.capture.by_title_enumeration_ignored",
                backend = capturer.backend_name(),
                error = %e
            );
            Vec::new()
        }
    };

    let Some(window) = find_first_match(&windows, contains) else {
        debug!(
            event = "core.capture.by_title_not_found",
            title = contains,
            searched = windows.len()
        );
        return Err(CaptureError::WindowNotFound {
            title: contains.to_string(),
        });
    };

    info!(
        event = "core.capture.by_title_matched",
        title = contains,
        window_id = %window.id(),
        window_title = window.title()
    );

    capturer.capture_window(window, options)
}

/// Look up a window by id in a fresh enumeration.
///
/// Unlike the title search, enumeration errors propagate here.
pub fn find_window_by_id<C: WindowCapture + ?Sized>(
    capturer: &C,
    id: WindowId,
) -> Result<WindowInfo, CaptureError> {
    info!(event = "core.window.find_by_id_started", id = %id);

    let window = capturer
        .list_windows()?
        .into_iter()
        .find(|w| w.id() == id)
        .ok_or(CaptureError::WindowNotFoundById { id })?;

    info!(
        event = "core.window.find_by_id_completed",
        id = %id,
        title = window.title()
    );
    Ok(window)
}
