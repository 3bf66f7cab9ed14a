use crate::braille::BrailleCanvas;
use crate::map::{MapLayers, MountedMap};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the terminal preview of a mounted map
pub fn render(frame: &mut Frame, map: &MountedMap) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_map(frame, map, chunks[0]);
    render_status_bar(frame, map, chunks[1]);
}

fn render_map(frame: &mut Frame, map: &MountedMap, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title(map)),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layers = MapLayers::rasterize(map.projected(), inner.width as usize, inner.height as usize);
    frame.render_widget(MapWidget { layers }, inner);
}

fn title(map: &MountedMap) -> String {
    match map.variant() {
        crate::app::Variant::Australia => "Solar eclipses in Australia".to_string(),
        crate::app::Variant::World => "World".to_string(),
    }
}

/// Braille layers with text labels overlaid
struct MapWidget {
    layers: MapLayers,
}

impl MapWidget {
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                // Blank cells leave whatever is underneath
                if let Some(ch) = canvas.cell(col as usize, row as usize) {
                    buf[(area.x + col, area.y + row)].set_char(ch).set_fg(color);
                }
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_layer(&self.layers.outline, Color::Cyan, area, buf);

        for (rgb, canvas) in &self.layers.bands {
            let color = rgb.map_or(Color::Gray, |[r, g, b]| Color::Rgb(r, g, b));
            Self::render_layer(canvas, color, area, buf);
        }

        Self::render_layer(&self.layers.markers, Color::White, area, buf);

        for label in &self.layers.labels {
            if label.row >= area.height || label.col >= area.width {
                continue;
            }
            let style = match label.rgb {
                Some([r, g, b]) => Style::default().fg(Color::Rgb(r, g, b)).add_modifier(Modifier::BOLD),
                None => Style::default().fg(Color::White),
            };

            let y = area.y + label.row;
            let max_len = (area.width - label.col) as usize;
            for (i, ch) in label.text.chars().take(max_len).enumerate() {
                buf[(area.x + label.col + i as u16, y)].set_char(ch).set_style(style);
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, map: &MountedMap, area: Rect) {
    let projected = map.projected();
    let status = Line::from(vec![
        Span::styled(format!(" {} ", map.variant()), Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(format!(
            " {}x{} | bands: {} | cities: {} ",
            projected.size.x, projected.size.y,
            projected.bands.len(),
            projected.cities.len()
        )),
        Span::styled("q/Esc: quit", Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
