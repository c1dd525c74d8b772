//! Horizontal bars: the playback position in the header and the value
//! sliders of the equalizer and track-sync panels.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SLIDER};

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// `width` cells filled to `ratio` with eighth-block resolution.
pub fn bar(ratio: f64, width: usize) -> String {
    let eighths = (ratio.clamp(0.0, 1.0) * width as f64 * 8.0) as usize;
    let full = eighths / 8;
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat('█').take(full));
    if full < width {
        out.push(BLOCKS[eighths % 8]);
        out.extend(std::iter::repeat(' ').take(width - full - 1));
    }
    out
}

pub fn draw_progress(frame: &mut Frame, area: Rect, time: i64, length: i64) {
    if area.width < 4 || area.height == 0 {
        return;
    }
    let left = fmt_time(time);
    let right = fmt_time(length);
    let labels = (left.len() + right.len() + 2) as u16;
    let width = area.width.saturating_sub(labels).max(4) as usize;
    let ratio = if length > 0 {
        time as f64 / length as f64
    } else {
        0.0
    };
    let line = Line::from(vec![
        Span::styled(format!("{left} "), Style::default().fg(C_SECONDARY)),
        Span::styled(bar(ratio, width), Style::default().fg(C_PLAYING)),
        Span::styled(format!(" {right}"), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// `label [████     ] value`
pub fn draw_slider(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    ratio: f64,
    value: &str,
    selected: bool,
) {
    if area.width < 8 || area.height == 0 {
        return;
    }
    let label_w = 18usize;
    let value_w = value.chars().count() + 1;
    let width = (area.width as usize).saturating_sub(label_w + value_w + 2).max(4);
    let (label_style, fill): (Style, Color) = if selected {
        (Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD), C_SLIDER)
    } else {
        (Style::default().fg(C_SECONDARY), C_MUTED)
    };
    let marker = if selected { "▸ " } else { "  " };
    let line = Line::from(vec![
        Span::styled(format!("{marker}{label:<w$}", w = label_w - 2), label_style),
        Span::styled("[", Style::default().fg(C_MUTED)),
        Span::styled(bar(ratio, width), Style::default().fg(fill)),
        Span::styled("]", Style::default().fg(C_MUTED)),
        Span::styled(format!(" {value}"), label_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn fmt_time(secs: i64) -> String {
    let s = secs.max(0);
    let (h, m, s) = (s / 3600, (s % 3600) / 60, s % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar(0.0, 4), "    ");
        assert_eq!(bar(1.0, 4), "████");
        assert_eq!(bar(0.5, 4), "██  ");
        assert_eq!(bar(0.5, 4).chars().count(), 4);
        assert_eq!(bar(2.0, 3), "███");
    }

    #[test]
    fn test_fmt_time() {
        assert_eq!(fmt_time(-3), "0:00");
        assert_eq!(fmt_time(75), "1:15");
        assert_eq!(fmt_time(3725), "1:02:05");
    }
}
