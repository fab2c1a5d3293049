use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

use crate::corpus::markup::Emphasis;
use crate::view::controller::{Highlight, RenderInstruction, RenderItem};
use crate::view::layout::Layout as NodeLayout;

#[derive(Debug)]
pub struct BrowseRenderData<'a> {
    pub instruction: &'a RenderInstruction,
    /// Index into `flat_rows` of the row under the cursor.
    pub cursor_line: Option<usize>,
    pub scroll: u16,
    pub show_help: bool,
    pub message: Option<&'a str>,
    pub demo: bool,
}

/// One line of the catalog pane.
#[derive(Debug)]
pub enum FlatRow<'a> {
    Blank,
    Header(&'a str),
    Item(&'a RenderItem),
}

/// Flatten the grouped render output into pane rows. Focus-hidden records
/// are dropped here, along with any group left empty by that. Cursor and
/// scroll arithmetic in `tui::browse` runs over this same flattening.
pub fn flat_rows(instruction: &RenderInstruction) -> Vec<FlatRow<'_>> {
    let mut rows = Vec::new();
    for group in &instruction.groups {
        let items: Vec<&RenderItem> = group.items.iter().filter(|item| !item.hidden).collect();
        if items.is_empty() {
            continue;
        }
        if !rows.is_empty() {
            rows.push(FlatRow::Blank);
        }
        rows.push(FlatRow::Header(group.category.as_str()));
        for item in items {
            rows.push(FlatRow::Item(item));
        }
    }
    rows
}

pub fn draw(frame: &mut Frame, data: &BrowseRenderData<'_>) {
    let area = frame.area().inner(Margin {
        horizontal: 3,
        vertical: 1,
    });

    let mut title_spans = vec![
        Span::styled("stemma view", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled("[?] help", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled("[q] quit", Style::default().fg(Color::DarkGray)),
    ];
    if data.demo {
        title_spans.push(Span::raw("  "));
        title_spans.push(Span::styled(
            "[DEMO]",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::new(2, 2, 1, 1))
        .title(Line::from(title_spans));
    let outer_inner = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let [panes_area, _gap, status_area] = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length(1),
        Constraint::Length(4),
    ])
    .areas(outer_inner);

    let [left_outer, _, detail_outer] = Layout::horizontal([
        Constraint::Percentage(55),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(panes_area);

    match &data.instruction.layout {
        Some(layout) if data.instruction.graph_mode => {
            render_graph_pane(frame, left_outer, layout, data.instruction);
        }
        _ => render_list_pane(frame, left_outer, data),
    }
    render_detail_pane(frame, detail_outer, data);
    render_status(frame, status_area, data);

    if data.show_help {
        render_help_overlay(frame);
    }
}

fn render_list_pane(frame: &mut Frame, area: Rect, data: &BrowseRenderData<'_>) {
    let rows = flat_rows(data.instruction);
    let item_count = rows
        .iter()
        .filter(|row| matches!(row, FlatRow::Item(_)))
        .count();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(vec![
            Span::styled(
                "CATALOG",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} texts", item_count),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::with_capacity(rows.len());
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No texts match the filter.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (idx, row) in rows.iter().enumerate() {
        match row {
            FlatRow::Blank => lines.push(Line::from("")),
            FlatRow::Header(category) => lines.push(Line::from(Span::styled(
                category.to_uppercase(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))),
            FlatRow::Item(item) => {
                let marker = if data.cursor_line == Some(idx) {
                    "▸ "
                } else {
                    "  "
                };
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Yellow)),
                    Span::styled(item.title.clone(), item_style(item.highlight)),
                    Span::styled(
                        format!("  {}", item_meta(item)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
        }
    }

    let list = Paragraph::new(lines).scroll((data.scroll, 0));
    frame.render_widget(list, inner);
}

fn item_style(highlight: Highlight) -> Style {
    match highlight {
        Highlight::Active => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Highlight::Ancestor => Style::default().fg(Color::Cyan),
        Highlight::Descendant => Style::default().fg(Color::Green),
        Highlight::None => Style::default().fg(Color::White),
    }
}

fn item_meta(item: &RenderItem) -> String {
    let mut meta = item.role.clone();
    if let Some(target) = &item.depends_on {
        meta.push_str(&format!(" → {}", target));
    }
    if let Some(universe) = &item.universe {
        meta.push_str(&format!(" · {}", universe));
    }
    meta
}

fn render_graph_pane(
    frame: &mut Frame,
    area: Rect,
    layout: &NodeLayout,
    instruction: &RenderInstruction,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(vec![
            Span::styled(
                "GRAPH",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} placed", layout.nodes.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: HashMap<&str, &RenderItem> = instruction
        .groups
        .iter()
        .flat_map(|group| group.items.iter())
        .map(|item| (item.id.as_str(), item))
        .collect();
    let visible = |id: &str| items.get(id).is_some_and(|item| !item.hidden);
    let active_id = items
        .values()
        .find(|item| item.highlight == Highlight::Active)
        .map(|item| item.id.clone());

    let placed: Vec<_> = layout
        .nodes
        .iter()
        .filter(|node| visible(&node.id))
        .collect();
    if placed.is_empty() {
        let fallback = Paragraph::new(Line::from(Span::styled(
            "No texts to place.",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(fallback, inner);
        return;
    }

    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y: f64 = 0.0;
    for node in &placed {
        min_x = min_x.min(node.x);
        max_x = max_x.max(node.x);
        max_y = max_y.max(node.y);
    }
    // Leave room for the labels printed to the right of each point.
    let pad_x = ((max_x - min_x) * 0.15).max(60.0);
    let pad_y = 25.0;

    let canvas = Canvas::default()
        .x_bounds([min_x - pad_x, max_x + pad_x])
        .y_bounds([-pad_y, max_y + pad_y])
        .paint(|ctx| {
            // Layout rows grow downward; the canvas y axis grows upward.
            for edge in &layout.edges {
                if !visible(&edge.from_id) || !visible(&edge.to_id) {
                    continue;
                }
                let touches_active = active_id
                    .as_deref()
                    .is_some_and(|id| id == edge.from_id || id == edge.to_id);
                ctx.draw(&CanvasLine {
                    x1: edge.x1,
                    y1: max_y - edge.y1,
                    x2: edge.x2,
                    y2: max_y - edge.y2,
                    color: if touches_active {
                        Color::Yellow
                    } else {
                        Color::DarkGray
                    },
                });
            }
            ctx.layer();
            for node in &placed {
                let Some(item) = items.get(node.id.as_str()) else {
                    continue;
                };
                let label = format!("● {}", truncate_text(&item.title, 18));
                ctx.print(
                    node.x,
                    max_y - node.y,
                    Line::from(Span::styled(label, item_style(item.highlight))),
                );
            }
        });
    frame.render_widget(canvas, inner);
}

fn render_detail_pane(frame: &mut Frame, area: Rect, data: &BrowseRenderData<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(Span::styled(
            "TEXT",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let detail = Paragraph::new(detail_lines(data)).wrap(Wrap { trim: false });
    frame.render_widget(detail, inner);
}

fn detail_lines(data: &BrowseRenderData<'_>) -> Vec<Line<'static>> {
    let Some(detail) = &data.instruction.detail else {
        return vec![
            Line::from(Span::styled(
                "No text selected",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Move with j/k, Enter to select.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
    };

    let mut class = format!("{} · {}", detail.category, detail.role);
    if let Some(universe) = &detail.universe {
        class.push_str(&format!(" · {}", universe));
    }

    let mut lines = vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(class, Style::default().fg(Color::DarkGray))),
    ];
    if let Some(target) = &detail.depends_on {
        lines.push(Line::from(Span::styled(
            format!("depends on: {}", target),
            Style::default().fg(Color::DarkGray),
        )));
    }

    for paragraph in &detail.paragraphs {
        lines.push(Line::from(""));
        let spans = paragraph
            .iter()
            .map(|span| {
                let style = match span.emphasis {
                    Emphasis::Plain => Style::default(),
                    Emphasis::Bold => Style::default().add_modifier(Modifier::BOLD),
                    Emphasis::Italic => Style::default().add_modifier(Modifier::ITALIC),
                    Emphasis::Underline => Style::default().add_modifier(Modifier::UNDERLINED),
                };
                Span::styled(span.text.clone(), style)
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }

    lines
}

fn render_status(frame: &mut Frame, area: Rect, data: &BrowseRenderData<'_>) {
    let mut top = format!("LINK: {}", data.instruction.link);
    if data.instruction.focus_mode {
        top.push_str("   [focus]");
    }
    if data.instruction.graph_mode {
        top.push_str("   [graph]");
    }

    let mut hint_line =
        "enter select · tab next · c/r/u filter · f focus · g graph · ? help · q quit".to_string();
    if let Some(msg) = data.message {
        hint_line.push_str("   ");
        hint_line.push_str(msg);
    }

    let status = Paragraph::new(vec![
        Line::from(Span::styled(
            top,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            hint_line,
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::new(1, 1, 0, 0)),
    );
    frame.render_widget(status, area);
}

fn truncate_text(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return text.chars().take(max_width).collect();
    }
    let mut out = text
        .chars()
        .take(max_width.saturating_sub(3))
        .collect::<String>();
    out.push_str("...");
    out
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 84, 70);
    frame.render_widget(Clear, area);
    let help = Paragraph::new(vec![
        Line::from("CATALOG (left): filtered texts grouped by category"),
        Line::from("  yellow = selected   cyan = its parent   green = its dependents"),
        Line::from(""),
        Line::from("KEYS"),
        Line::from("  j/k or arrows    move the cursor"),
        Line::from("  Enter            select the text under the cursor"),
        Line::from("  Tab              select the next text, wrapping around"),
        Line::from("  c / r / u        cycle the category / role / universe filter"),
        Line::from("  f                focus mode: hide texts outside the selection's lineage"),
        Line::from("  g                graph mode: place texts on the 2-D canvas"),
        Line::from("  Esc/Backspace    clear the selection (or close this help)"),
        Line::from(""),
        Line::from("The LINK line below is shareable; `stemma view --at <link>` restores it."),
    ])
    .block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(vertical[1])[1]
}
