/// Catch the Dip rendering: price chart, markers, score and controls.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::symbols::Marker;
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ControlBar;

use super::actions::*;
use super::logic::score;
use super::state::{DipState, CHART_PADDING, MAX_POINTS};

const LINE_COLOR: Color = Color::Rgb(0x88, 0x84, 0xd8);
const BUY_COLOR: Color = Color::Green;
const DIP_COLOR: Color = Color::Red;

pub fn render(state: &DipState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let is_narrow = is_narrow_layout(area.width);

    // Summary panel: exact fit for the wrapped text plus borders
    let summary_rows = Paragraph::new(summary_lines(state))
        .wrap(Wrap { trim: true })
        .line_count(area.width.saturating_sub(2)) as u16;
    let summary_height = (summary_rows + 2).max(3);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Header
            Constraint::Min(8),                 // Chart
            Constraint::Length(summary_height), // Summary
            Constraint::Length(3),              // Controls
        ])
        .split(area);

    render_header(state, f, chunks[0], is_narrow);
    render_chart(state, f, chunks[1], is_narrow);
    render_summary(state, f, chunks[2]);
    render_controls(state, f, chunks[3], click_state);
}

fn render_header(state: &DipState, f: &mut Frame, area: Rect, is_narrow: bool) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let progress = if state.is_over() {
        Span::styled(
            " Market closed",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!(" Week {}/{}  ${:.2}", state.series.len(), MAX_POINTS, state.last_price()),
            Style::default().fg(Color::White),
        )
    };

    let title = if is_narrow {
        "Catch the Dip"
    } else {
        "Catch the Market Dip"
    };

    let widget = Paragraph::new(Line::from(vec![Span::styled(title, title_style), progress]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// Y axis range: the price range padded on both sides.
pub fn y_bounds(state: &DipState) -> [f64; 2] {
    [
        state.min_price() - CHART_PADDING,
        state.max_price() + CHART_PADDING,
    ]
}

/// X axis labels, spread evenly over the full round.
pub fn x_labels(is_narrow: bool) -> Vec<String> {
    if is_narrow {
        vec!["Week 1".into(), format!("Week {}", MAX_POINTS)]
    } else {
        vec![
            "Week 1".into(),
            format!("Week {}", MAX_POINTS / 2),
            format!("Week {}", MAX_POINTS),
        ]
    }
}

fn render_chart(state: &DipState, f: &mut Frame, area: Rect, is_narrow: bool) {
    let points: Vec<(f64, f64)> = state
        .series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.price))
        .collect();

    let buy_marker: Vec<(f64, f64)> = state
        .buy_index
        .zip(state.buy_point())
        .map(|(i, p)| (i as f64, p.price))
        .into_iter()
        .collect();

    // The dip stays hidden until the round is over
    let dip_marker: Vec<(f64, f64)> = state
        .dip_index
        .zip(state.dip_point())
        .filter(|_| state.is_over())
        .map(|(i, p)| (i as f64, p.price))
        .into_iter()
        .collect();

    let mut datasets = vec![Dataset::default()
        .name("Price")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(LINE_COLOR))
        .data(&points)];

    if !buy_marker.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Your Buy")
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(BUY_COLOR).add_modifier(Modifier::BOLD))
                .data(&buy_marker),
        );
    }
    if !dip_marker.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Dip")
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(DIP_COLOR).add_modifier(Modifier::BOLD))
                .data(&dip_marker),
        );
    }

    let [y_min, y_max] = y_bounds(state);
    let axis_style = Style::default().fg(Color::Gray);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Market "),
        )
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, (MAX_POINTS - 1) as f64])
                .labels(x_labels(is_narrow)),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([y_min, y_max])
                .labels(vec![
                    format!("{:.0}", y_min),
                    format!("{:.0}", (y_min + y_max) / 2.0),
                    format!("{:.0}", y_max),
                ]),
        );

    f.render_widget(chart, area);
}

/// Text under the chart for the current phase of the round.
pub fn summary_lines(state: &DipState) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::Gray);

    if !state.is_over() {
        return match state.buy_point() {
            Some(p) => vec![Line::from(vec![
                Span::styled("Bought at ", dim),
                Span::styled(
                    format!("${:.2}", p.price),
                    Style::default().fg(BUY_COLOR).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" in {}. Waiting for the market to close...", p.label()),
                    dim,
                ),
            ])],
            None => vec![Line::from(Span::styled(
                "Watch the price and buy when you think it has hit bottom.",
                dim,
            ))],
        };
    }

    let Some(dip) = state.dip_point() else {
        return Vec::new();
    };

    let dip_line = Line::from(vec![
        Span::raw("Lowest dip price: "),
        Span::styled(
            format!("${:.2}", dip.price),
            Style::default().fg(DIP_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ({})", dip.label()), dim),
    ]);

    match score(state) {
        Some(s) => {
            let verdict = if s.win {
                Line::from(Span::styled(
                    "Congrats! You caught the dip!",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled("Oops! Try again next time.", dim))
            };
            vec![
                Line::from(vec![
                    Span::raw("Your buy price: "),
                    Span::styled(
                        format!("${:.2}", s.buy_price),
                        Style::default().fg(BUY_COLOR).add_modifier(Modifier::BOLD),
                    ),
                ]),
                dip_line,
                verdict,
            ]
        }
        None => vec![
            dip_line,
            Line::from(Span::styled("You never bought this round.", dim)),
        ],
    }
}

fn render_summary(state: &DipState, f: &mut Frame, area: Rect) {
    let border = if state.is_over() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let widget = Paragraph::new(summary_lines(state))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(widget, area);
}

fn render_controls(
    state: &DipState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let button_style = Style::default()
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let bar = if state.is_over() {
        ControlBar::new("   ").button("[R] Play Again", button_style.bg(Color::Gray), PLAY_AGAIN)
    } else if state.buy_index.is_none() {
        ControlBar::new("   ").button("[B] Buy Now!", button_style.bg(Color::LightBlue), BUY)
    } else {
        ControlBar::new("   ").placeholder(Line::from(Span::styled(
            "Holding. The dip is revealed when the market closes.",
            Style::default().fg(Color::DarkGray),
        )))
    };

    let mut cs = click_state.borrow_mut();
    bar.block(block).render(f, area, &mut cs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dip::state::Phase;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    fn ended(prices: &[f64], buy: Option<usize>, dip: usize) -> DipState {
        let mut s = DipState::from_prices(prices);
        s.buy_index = buy;
        s.dip_index = Some(dip);
        s.phase = Phase::Ended;
        s
    }

    #[test]
    fn y_bounds_pad_price_range() {
        let s = DipState::from_prices(&[30.0, 20.0, 40.0]);
        assert_eq!(y_bounds(&s), [10.0, 50.0]);
    }

    #[test]
    fn y_bounds_single_point() {
        let s = DipState::new(45.0);
        assert_eq!(y_bounds(&s), [35.0, 55.0]);
    }

    #[test]
    fn x_labels_span_round() {
        assert_eq!(x_labels(false), vec!["Week 1", "Week 13", "Week 26"]);
        assert_eq!(x_labels(true), vec!["Week 1", "Week 26"]);
    }

    #[test]
    fn summary_before_buy() {
        let s = DipState::new(45.0);
        let lines = text(&summary_lines(&s));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Watch the price"));
    }

    #[test]
    fn summary_after_buy_hides_dip() {
        let mut s = DipState::from_prices(&[30.0, 20.0]);
        s.buy_index = Some(1);
        let lines = text(&summary_lines(&s));
        assert_eq!(lines, vec!["Bought at $20.00 in Week 2. Waiting for the market to close..."]);
    }

    #[test]
    fn summary_win() {
        let s = ended(&[30.0, 20.0, 40.0], Some(1), 1);
        let lines = text(&summary_lines(&s));
        assert_eq!(
            lines,
            vec![
                "Your buy price: $20.00",
                "Lowest dip price: $20.00 (Week 2)",
                "Congrats! You caught the dip!",
            ]
        );
    }

    #[test]
    fn summary_loss() {
        let s = ended(&[30.0, 20.0, 40.0], Some(0), 1);
        let lines = text(&summary_lines(&s));
        assert_eq!(lines[0], "Your buy price: $30.00");
        assert_eq!(lines[2], "Oops! Try again next time.");
    }

    #[test]
    fn summary_without_buy_only_reveals_dip() {
        let s = ended(&[30.0, 20.0, 40.0], None, 1);
        let lines = text(&summary_lines(&s));
        assert_eq!(
            lines,
            vec!["Lowest dip price: $20.00 (Week 2)", "You never bought this round."]
        );
    }
}
