// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use ratatui::{
    buffer::{Buffer, Cell},
    prelude::Position,
    style::Color,
};

const FONT_SIZE: u16 = 14;
const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 16;
const FULL_BLOCK: &str = "█";

/// `<svg>` element for a rendered buffer, suitable for inlining in HTML. Full blocks become filled
/// rectangles (so bars are continuous); other symbols become text.
pub fn buffer_to_svg(buf: &Buffer) -> String {
    let area = buf.area;
    let width_px = area.width.saturating_mul(CELL_WIDTH) as u32;
    let height_px = area.height.saturating_mul(CELL_HEIGHT) as u32;
    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
        width_px, height_px, width_px, height_px
    ));
    out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    out.push_str(&format!(
        "<g font-family=\"monospace\" font-size=\"{}\" dominant-baseline=\"hanging\">\n",
        FONT_SIZE
    ));

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let Some(cell) = buf.cell(Position::from((x, y))) else {
                continue;
            };
            let x_px = ((x - area.x) * CELL_WIDTH) as u32;
            let y_px = ((y - area.y) * CELL_HEIGHT) as u32;
            let (r, g, b) = cell_color(cell);
            let color = format!("#{:02x}{:02x}{:02x}", r, g, b);
            if cell.symbol() == FULL_BLOCK {
                out.push_str(&format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
                    x_px, y_px, CELL_WIDTH, CELL_HEIGHT, color
                ));
                continue;
            }
            let ch = cell.symbol().chars().next().unwrap_or(' ');
            if ch == ' ' {
                continue;
            }
            out.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" fill=\"{}\">{}</text>\n",
                x_px,
                y_px,
                color,
                escape_svg_char(ch)
            ));
        }
    }

    out.push_str("</g>\n</svg>\n");
    out
}

// Foreground wins; a background-only cell (e.g. reversed text) uses its background. White or
// unset colours would vanish on the white canvas, so they fall back to black.
fn cell_color(cell: &Cell) -> (u8, u8, u8) {
    for color in [cell.fg, cell.bg] {
        if let Some((r, g, b)) = color_to_rgb(color) {
            if !(r == 255 && g == 255 && b == 255) {
                return (r, g, b);
            }
        }
    }
    (0, 0, 0)
}

fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        Color::Black => Some((0, 0, 0)),
        Color::White => Some((255, 255, 255)),
        Color::Gray => Some((128, 128, 128)),
        Color::DarkGray => Some((64, 64, 64)),
        Color::LightRed => Some((255, 128, 128)),
        Color::LightGreen => Some((128, 255, 128)),
        Color::LightBlue => Some((128, 128, 255)),
        Color::LightYellow => Some((255, 255, 128)),
        Color::LightMagenta => Some((255, 128, 255)),
        Color::LightCyan => Some((128, 255, 255)),
        Color::Red => Some((255, 0, 0)),
        Color::Green => Some((0, 255, 0)),
        Color::Blue => Some((0, 0, 255)),
        Color::Yellow => Some((255, 255, 0)),
        Color::Magenta => Some((255, 0, 255)),
        Color::Cyan => Some((0, 255, 255)),
        _ => None,
    }
}

fn escape_svg_char(ch: char) -> String {
    match ch {
        '&' => String::from("&amp;"),
        '<' => String::from("&lt;"),
        '>' => String::from("&gt;"),
        '"' => String::from("&quot;"),
        '\'' => String::from("&#39;"),
        _ => ch.to_string(),
    }
}

pub fn escape_xml(s: &str) -> String {
    s.chars().map(escape_svg_char).collect()
}
