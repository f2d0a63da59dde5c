use wincap_core::WindowInfo;
use wincap_core::capture::sanitize_title;

/// Print windows as a box-drawn table: id, size, title.
pub fn print_windows_table(windows: &[WindowInfo]) {
    for line in render_windows_table(windows) {
        println!("{line}");
    }
}

fn render_windows_table(windows: &[WindowInfo]) -> Vec<String> {
    let id_width = windows
        .iter()
        .map(|w| w.id().to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);
    let size_width = windows
        .iter()
        .map(|w| size_label(w).len())
        .max()
        .unwrap_or(4)
        .max(4);
    let title_width = windows
        .iter()
        .map(|w| sanitize_title(w.title()).chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 60);

    let border = |left: &str, mid: &str, right: &str| {
        format!(
            "{left}{}{mid}{}{mid}{}{right}",
            "─".repeat(id_width + 2),
            "─".repeat(size_width + 2),
            "─".repeat(title_width + 2),
        )
    };

    let mut lines = Vec::with_capacity(windows.len() + 4);
    lines.push(border("┌", "┬", "┐"));
    lines.push(format!(
        "│ {:<id_width$} │ {:<size_width$} │ {:<title_width$} │",
        "ID", "Size", "Title"
    ));
    lines.push(border("├", "┼", "┤"));
    for window in windows {
        lines.push(format!(
            "│ {:>id_width$} │ {:>size_width$} │ {} │",
            window.id(),
            size_label(window),
            truncate(&sanitize_title(window.title()), title_width),
        ));
    }
    lines.push(border("└", "┴", "┘"));
    lines
}

fn size_label(window: &WindowInfo) -> String {
    format!("{}x{}", window.width(), window.height())
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Counts characters rather than bytes so multi-byte titles are cut safely.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
