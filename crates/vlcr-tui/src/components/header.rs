//! Header: two rows at the top.
//!
//! Row 1: transport icon, title / artist, connection badge.
//! Row 2: position bar | volume | repeat / random / loop flags | last poll.
//!
//! Not focusable.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use vlcr_core::protocol::PlayState;

use crate::app_state::AppState;
use crate::theme::{
    C_ACCENT, C_MUTED, C_OFFLINE, C_PAUSED, C_PLAYING, C_PRIMARY, C_SECONDARY,
};
use crate::widgets::{scrollable_list::fit_width, slider::draw_progress};

fn transport_icon(state: &AppState) -> (&'static str, Color) {
    if !state.online {
        return ("○", C_OFFLINE);
    }
    match state.status.state {
        PlayState::Playing => ("▶", C_PLAYING),
        PlayState::Paused => ("⏸", C_PAUSED),
        PlayState::Stopped | PlayState::Unknown => ("■", C_MUTED),
    }
}

fn flag(on: bool, label: &'static str) -> Span<'static> {
    let style = if on {
        Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };
    Span::styled(label, style)
}

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // ── Row 1 ─────────────────────────────────────────────────────────────
    let (icon, icon_color) = transport_icon(state);
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(icon, Style::default().fg(icon_color).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
    ];
    match state.now_playing() {
        Some(title) => spans.push(Span::styled(
            fit_width(title, (area.width as usize / 2).max(10)),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled("nothing playing", Style::default().fg(C_MUTED))),
    }
    if let Some(artist) = state.status.artist() {
        spans.push(Span::styled(" · ", Style::default().fg(C_MUTED)));
        spans.push(Span::styled(artist.to_string(), Style::default().fg(C_SECONDARY)));
    }

    let badge = if state.online {
        Span::styled(format!(" {} ", state.endpoint), Style::default().fg(C_PLAYING))
    } else {
        let reason = state.last_error.as_deref().unwrap_or("no answer");
        Span::styled(
            format!(" offline: {reason} "),
            Style::default().fg(C_OFFLINE).add_modifier(Modifier::BOLD),
        )
    };
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(badge.width() as u16)])
        .split(rows[0]);
    frame.render_widget(Paragraph::new(Line::from(spans)), top[0]);
    frame.render_widget(Paragraph::new(Line::from(badge)), top[1]);

    // ── Row 2 ─────────────────────────────────────────────────────────────
    let s = &state.status;
    let polled = state
        .polled_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    let right = Line::from(vec![
        Span::styled(
            format!(" vol {:>3}% ", (state.volume * 100.0).round() as u32),
            Style::default().fg(C_SECONDARY),
        ),
        flag(s.repeat, "R"),
        Span::raw(" "),
        flag(s.random, "Z"),
        Span::raw(" "),
        flag(s.looping, "L"),
        Span::styled(format!("  {polled} "), Style::default().fg(C_MUTED)),
    ]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(right.width() as u16)])
        .split(rows[1]);
    let bar_area = Rect {
        x: bottom[0].x + 1,
        width: bottom[0].width.saturating_sub(2),
        ..bottom[0]
    };
    draw_progress(frame, bar_area, s.time, s.length);
    frame.render_widget(Paragraph::new(right), bottom[1]);
}
