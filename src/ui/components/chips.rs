//! Filter chip row renderer.

use crate::ui::helpers::width;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterChip;

/// Renders active filters as chips, wrapping onto further lines as needed.
///
/// Each chip shows its label and, dimmed after it, the command that removes
/// it. Nothing is rendered when no filter is active.
pub fn render_chips(out: &mut String, chips: &[FilterChip], theme: &Theme, cols: usize) {
    if chips.is_empty() {
        return;
    }

    let mut line_width = 0;
    out.push(' ');
    line_width += 1;

    for chip in chips {
        let label = format!(" {} ", chip.label);
        let hint = format!(" ({}) ", chip.remove_command);
        let chip_width = width(&label) + width(&hint);

        if line_width > 1 && line_width + chip_width > cols {
            out.push_str("\n ");
            line_width = 1;
        }

        out.push_str(&Theme::fg(&theme.colors.chip_fg));
        out.push_str(&Theme::bg(&theme.colors.chip_bg));
        out.push_str(&label);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&hint);
        out.push_str(Theme::reset());
        line_width += chip_width;
    }

    out.push('\n');
}
