// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::io::{stdout, IsTerminal, Write};

use crossterm::{cursor::MoveTo, ExecutableCommand};

use ratatui::{
    buffer::Buffer,
    prelude::{CrosstermBackend, Position, Rect, Terminal},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Widget},
    TerminalOptions, Viewport,
};

use crate::errors::ProteinScapeError;
use crate::render::composition::Composition;
use crate::render::svg::buffer_to_svg;

pub const CHART_TITLE: &str = "Amino Acid Distribution";
pub const SKY_BLUE: Color = Color::Rgb(135, 206, 235);
pub const CHART_HEIGHT: u16 = 14;

const BAR_WIDTH: u16 = 3;
const BAR_GAP: u16 = 1;
const BORDER_WIDTH: u16 = 1;

pub fn composition_chart(comp: &Composition, color: Color) -> BarChart<'static> {
    let bars: Vec<Bar<'static>> = comp
        .iter()
        .map(|(residue, count)| {
            Bar::default()
                .value(count as u64)
                .label(Line::from(residue.to_string()))
        })
        .collect();
    BarChart::default()
        .block(Block::bordered().title(CHART_TITLE))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .bar_style(Style::new().fg(color))
        .value_style(Style::new().fg(Color::Black).bg(color))
        .label_style(Style::new().fg(Color::Black))
        .data(BarGroup::default().bars(&bars))
}

/// Width needed to show every bar (and the title).
pub fn chart_width(comp: &Composition) -> u16 {
    let n = u16::try_from(comp.len()).unwrap_or(u16::MAX);
    let bars = n
        .saturating_mul(BAR_WIDTH + BAR_GAP)
        .saturating_sub(BAR_GAP);
    let title = CHART_TITLE.len() as u16;
    bars.max(title).saturating_add(2 * BORDER_WIDTH)
}

pub fn chart_buffer(comp: &Composition, color: Color) -> Buffer {
    let area = Rect::new(0, 0, chart_width(comp), CHART_HEIGHT);
    let mut buf = Buffer::empty(area);
    composition_chart(comp, color).render(area, &mut buf);
    buf
}

pub fn chart_svg(comp: &Composition, color: Color) -> String {
    buffer_to_svg(&chart_buffer(comp, color))
}

pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right())
            .map(|x| {
                buf.cell(Position::from((x, y)))
                    .and_then(|cell| cell.symbol().chars().next())
                    .unwrap_or(' ')
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Prints the chart below the current output: drawn with colours in an inline viewport on a
/// terminal, as plain text otherwise (pipes, files).
pub fn print_chart(comp: &Composition, color: Color) -> Result<(), ProteinScapeError> {
    if !stdout().is_terminal() {
        print!("{}", buffer_text(&chart_buffer(comp, color)));
        return Ok(());
    }
    let backend = CrosstermBackend::new(stdout());
    let viewport = Viewport::Inline(CHART_HEIGHT);
    let mut terminal = Terminal::with_options(backend, TerminalOptions { viewport })?;
    let width = chart_width(comp);
    let bottom = terminal
        .draw(|f| {
            let full = f.area();
            let area = Rect::new(full.x, full.y, width.min(full.width), full.height);
            f.render_widget(composition_chart(comp, color), area);
        })?
        .area
        .bottom();
    drop(terminal);
    // Park the cursor on the chart's last row, so the next line goes right below it.
    stdout().execute(MoveTo(0, bottom.saturating_sub(1)))?;
    println!();
    stdout().flush()?;
    Ok(())
}
