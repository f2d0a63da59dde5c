use std::fmt;

use serde::Serialize;

/// Opaque native identity of an enumerated window.
///
/// Holds a CoreGraphics window number on macOS and an `HWND` value on
/// Windows. A token is only meaningful to the backend that produced it and
/// is not guaranteed to stay valid once the window closes, moves, or
/// resizes. Backends never cache tokens across enumeration calls.
///
/// Serializes for output only. There is no way to build one from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WindowId(u64);

impl WindowId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Snapshot of one window taken at enumeration time.
///
/// Created fresh by every `list_windows` call and never mutated. The title
/// is exactly what the platform reported and may contain non-printable
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowInfo {
    id: WindowId,
    title: String,
    width: u32,
    height: u32,
}

impl WindowInfo {
    pub fn new(id: WindowId, title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id,
            title: title.into(),
            width,
            height,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
}
