//! Ratatui-based terminal UI.
//!
//! The TUI shows the dashboard for the session dataset: KPI cards, a grouped
//! bar chart of monthly sales per shop, the shop ranking, and the filter
//! panel (shop and category multi-select plus the ranking direction). Every
//! key press that changes the selection re-runs the pipeline synchronously.

use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};
use tracing::info;

use crate::app::pipeline::{self, RunOutput};
use crate::app::session::Session;
use crate::data::Dataset;
use crate::domain::{Category, DashboardConfig, Shop, SortOrder};
use crate::error::AppError;
use crate::filter::FilterOptions;
use crate::report::{PivotTable, format_yen, format_yen_mean};

mod plotters_chart;

use plotters_chart::{Bar, SalesBarChart};

/// Start the TUI.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    // Build the app first so configuration errors print on a normal terminal.
    let mut app = App::new(&config)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// One selectable row of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterRow {
    Shop(Shop),
    Category(Category),
    Sort,
}

struct App {
    session: Session,
    dataset: Arc<Dataset>,
    options: FilterOptions,
    selected_shops: BTreeSet<Shop>,
    selected_categories: BTreeSet<Category>,
    sort_order: SortOrder,
    cursor: usize,
    show_details: bool,
    detail_offset: usize,
    status: String,
    run: RunOutput,
}

impl App {
    fn new(config: &DashboardConfig) -> Result<Self, AppError> {
        let session = Session::new(config.dataset.clone());
        let dataset = session.dataset()?;
        let options = FilterOptions::from_records(&dataset.records);

        let selected_shops: BTreeSet<Shop> = config
            .shops
            .clone()
            .unwrap_or_else(|| options.shops.clone())
            .into_iter()
            .collect();
        let selected_categories: BTreeSet<Category> = config
            .categories
            .clone()
            .unwrap_or_else(|| options.categories.clone())
            .into_iter()
            .collect();

        let run = pipeline::run(
            &dataset,
            selected_shops.iter().copied(),
            selected_categories.iter().copied(),
            config.sort_order,
        );
        Ok(Self {
            session,
            dataset,
            options,
            selected_shops,
            selected_categories,
            sort_order: config.sort_order,
            cursor: 0,
            show_details: config.show_details,
            detail_offset: 0,
            status: format!("seed {}", config.dataset.seed),
            run,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn rows(&self) -> Vec<FilterRow> {
        let mut rows: Vec<FilterRow> = self.options.shops.iter().map(|s| FilterRow::Shop(*s)).collect();
        rows.extend(self.options.categories.iter().map(|c| FilterRow::Category(*c)));
        rows.push(FilterRow::Sort);
        rows
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                let last = self.rows().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current(),
            KeyCode::Char('s') => {
                self.sort_order = self.sort_order.toggled();
                self.recompute();
                self.status = format!("ranking: {}", self.sort_order.display_name());
            }
            KeyCode::Char('a') => {
                self.selected_shops = self.options.shops.iter().copied().collect();
                self.selected_categories = self.options.categories.iter().copied().collect();
                self.recompute();
                self.status = "selected all".to_string();
            }
            KeyCode::Char('c') => {
                self.selected_shops.clear();
                self.selected_categories.clear();
                self.recompute();
                self.status = "cleared selection".to_string();
            }
            KeyCode::Char('d') => {
                self.show_details = !self.show_details;
                self.detail_offset = 0;
            }
            KeyCode::PageDown => {
                let max = self.run.filtered.len().saturating_sub(1);
                self.detail_offset = (self.detail_offset + 10).min(max);
            }
            KeyCode::PageUp => {
                self.detail_offset = self.detail_offset.saturating_sub(10);
            }
            KeyCode::Char('r') => self.reseed()?,
            _ => {}
        }

        Ok(false)
    }

    fn toggle_current(&mut self) {
        let Some(row) = self.rows().get(self.cursor).copied() else {
            return;
        };
        match row {
            FilterRow::Shop(shop) => {
                if !self.selected_shops.remove(&shop) {
                    self.selected_shops.insert(shop);
                }
                self.status = format!("shop {shop}: {}", on_off(self.selected_shops.contains(&shop)));
            }
            FilterRow::Category(category) => {
                if !self.selected_categories.remove(&category) {
                    self.selected_categories.insert(category);
                }
                self.status = format!(
                    "category {category}: {}",
                    on_off(self.selected_categories.contains(&category))
                );
            }
            FilterRow::Sort => {
                self.sort_order = self.sort_order.toggled();
                self.status = format!("ranking: {}", self.sort_order.display_name());
            }
        }
        self.recompute();
    }

    /// Start a new session with the next seed and reset the selection.
    fn reseed(&mut self) -> Result<(), AppError> {
        let session = self.session.reseeded();
        let dataset = session.dataset()?;
        self.options = FilterOptions::from_records(&dataset.records);
        self.selected_shops = self.options.shops.iter().copied().collect();
        self.selected_categories = self.options.categories.iter().copied().collect();
        self.session = session;
        self.dataset = dataset;
        self.cursor = 0;
        self.detail_offset = 0;
        self.recompute();
        self.status = format!("Resampled records (seed {}).", self.session.config().seed);
        info!(seed = self.session.config().seed, "reseeded session");
        Ok(())
    }

    fn recompute(&mut self) {
        self.run = pipeline::run(
            &self.dataset,
            self.selected_shops.iter().copied(),
            self.selected_categories.iter().copied(),
            self.sort_order,
        );
        let max = self.run.filtered.len().saturating_sub(1);
        self.detail_offset = self.detail_offset.min(max);
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_kpis(frame, chunks[1]);
        self.draw_body(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("dash", Style::default().fg(Color::Cyan)),
            Span::raw(" — sales dashboard"),
        ]));

        let window = self
            .run
            .criteria
            .as_ref()
            .map(|c| format!("{} .. {}", c.window_start(), c.window_end()))
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(Span::styled(
            format!(
                "window (last 30 days): {window} | records: {} of {} | seed: {}",
                self.run.filtered.len(),
                self.dataset.stats.n_records,
                self.session.config().seed,
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_kpis(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let kpis = &self.run.result.kpis;
        let values = [
            ("Total sales", format_yen(kpis.total_amount)),
            ("Average sale", format_yen_mean(kpis.mean_amount)),
            ("Transactions", kpis.transaction_count.to_string()),
        ];
        for ((title, value), rect) in values.into_iter().zip(cards.iter()) {
            let p = Paragraph::new(value)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(p, *rect);
        }
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(area);

        if self.show_details {
            self.draw_details(frame, columns[0]);
        } else {
            self.draw_chart(frame, columns[0]);
        }

        let filter_height = (self.rows().len() as u16).saturating_add(2);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(filter_height)])
            .split(columns[1]);
        self.draw_ranking(frame, side[0]);
        self.draw_filters(frame, side[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Monthly sales by shop")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let pivot = &self.run.result.pivot;
        if pivot.is_empty() {
            let msg = Paragraph::new("No records match the current filters.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        // Last line of the chart area holds the legend.
        let legend_rect = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: inner.height.min(1),
            ..inner
        };
        let plot_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };

        let (bars, x_bounds, y_bounds) = chart_bars(pivot);
        let (chart_rect, insets) = chart_layout(plot_area);
        let widget = SalesBarChart {
            bars: &bars,
            x_bounds,
            y_bounds,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, plot_area, chart_rect, insets, pivot, y_bounds);
        }

        frame.render_widget(Paragraph::new(legend_line(&pivot.shops)), legend_rect);
    }

    fn draw_details(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        // Borders and header take three lines.
        let visible = area.height.saturating_sub(3) as usize;
        let total = self.run.filtered.len();
        let first = (self.detail_offset + 1).min(total);
        let last = total.min(self.detail_offset + visible);
        let title = format!("Records {first}-{last} of {total} (PgUp/PgDn)");
        let rows = self
            .run
            .filtered
            .iter()
            .skip(self.detail_offset)
            .take(visible)
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.date.to_string()),
                    Cell::from(r.shop.display_name()),
                    Cell::from(r.category.display_name()),
                    Cell::from(r.product_name.clone()),
                    Cell::from(format_yen(r.amount)),
                ])
            });

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Min(10),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(vec!["date", "shop", "category", "product", "amount"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn draw_ranking(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = self.run.result.ranking.iter().enumerate().map(|(i, t)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(Span::styled(
                    t.shop.display_name(),
                    Style::default().fg(shop_color(t.shop).1),
                )),
                Cell::from(format_yen(t.amount)),
            ])
        });
        let table = Table::new(
            rows,
            [Constraint::Length(3), Constraint::Length(9), Constraint::Min(10)],
        )
        .header(
            Row::new(vec!["#", "shop", "sales"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title(format!("Shop ranking ({})", self.sort_order.display_name()))
                .borders(Borders::ALL),
        );
        frame.render_widget(table, area);
    }

    fn draw_filters(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .rows()
            .into_iter()
            .map(|row| match row {
                FilterRow::Shop(shop) => ListItem::new(format!(
                    "{} shop: {shop}",
                    checkbox(self.selected_shops.contains(&shop))
                )),
                FilterRow::Category(category) => ListItem::new(format!(
                    "{} category: {category}",
                    checkbox(self.selected_categories.contains(&category))
                )),
                FilterRow::Sort => ListItem::new(format!(
                    "( ) ranking: {}",
                    self.sort_order.display_name()
                )),
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Filters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  Space toggle  s sort  a all  c clear  d details  r reseed  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn checkbox(on: bool) -> &'static str {
    if on { "[x]" } else { "[ ]" }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

/// Fixed palette per shop: Plotters color for bars, Ratatui color for text.
fn shop_color(shop: Shop) -> (RGBColor, Color) {
    let (r, g, b) = match shop {
        Shop::Tokyo => (31, 119, 180),
        Shop::Osaka => (255, 127, 14),
        Shop::Fukuoka => (44, 160, 44),
    };
    (RGBColor(r, g, b), Color::Rgb(r, g, b))
}

fn legend_line(shops: &[Shop]) -> Line<'static> {
    let mut spans = vec![Span::styled("legend: ", Style::default().fg(Color::Gray))];
    for shop in shops {
        spans.push(Span::styled("■ ", Style::default().fg(shop_color(*shop).1)));
        spans.push(Span::raw(format!("{}  ", shop.display_name())));
    }
    Line::from(spans)
}

/// Lay out one group of bars per month.
///
/// Month `i` occupies `[i, i + 1)` on the x axis; its bars fill the middle
/// 80% of that slot, one per pivot column.
fn chart_bars(pivot: &PivotTable) -> (Vec<Bar>, [f64; 2], [f64; 2]) {
    let n_shops = pivot.shops.len().max(1) as f64;
    let group_width = 0.8;
    let bar_width = group_width / n_shops;

    let mut bars = Vec::with_capacity(pivot.months.len() * pivot.shops.len());
    for (i, row) in pivot.cells.iter().enumerate() {
        let left = i as f64 + (1.0 - group_width) / 2.0;
        for (j, (&amount, shop)) in row.iter().zip(&pivot.shops).enumerate() {
            let x0 = left + j as f64 * bar_width;
            bars.push(Bar {
                x0,
                x1: x0 + bar_width,
                value: amount as f64,
                color: shop_color(*shop).0,
            });
        }
    }

    let x_bounds = [0.0, pivot.months.len().max(1) as f64];
    let max = pivot.max_cell() as f64;
    let y_top = if max > 0.0 { max * 1.1 } else { 1.0 };
    (bars, x_bounds, [0.0, y_top])
}

/// Compact yen labels for the y axis (`¥0`, `¥850`, `¥120k`, `¥1.2M`).
fn fmt_axis_yen(v: f64) -> String {
    if v >= 1_000_000.0 {
        format!("¥{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("¥{:.0}k", v / 1_000.0)
    } else {
        format!("¥{v:.0}")
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 1,
        top: 0,
        bottom: 1,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    pivot: &PivotTable,
    y_bounds: [f64; 2],
) {
    let style = Style::default().fg(Color::Gray);

    // Month labels under each group center.
    let n_months = pivot.months.len().max(1);
    let y = chart.y + chart.height;
    if y < inner.y + inner.height {
        for (i, month) in pivot.months.iter().enumerate() {
            let u = (i as f64 + 0.5) / n_months as f64;
            let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let label = month.to_string();
            let label_len = label.len() as u16;
            let start = x.saturating_sub(label_len / 2).max(chart.x);
            let width = label_len.min((chart.x + chart.width).saturating_sub(start));
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width,
                    height: 1,
                },
            );
        }
    }

    let ticks = 5usize;
    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis_yen(y_val);
        let label_len = label.chars().count() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::DatasetConfig;

    fn config() -> DashboardConfig {
        DashboardConfig {
            dataset: DatasetConfig::new(300, 42, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
            shops: None,
            categories: None,
            sort_order: SortOrder::Descending,
            show_details: false,
            chart_width: 40,
        }
    }

    #[test]
    fn starts_with_every_window_option_selected() {
        let app = App::new(&config()).unwrap();
        assert_eq!(app.selected_shops.len(), app.options.shops.len());
        assert_eq!(app.selected_categories.len(), app.options.categories.len());
        assert!(app.run.result.kpis.transaction_count > 0);
        assert_eq!(app.rows().len(), app.options.shops.len() + app.options.categories.len() + 1);
    }

    #[test]
    fn toggling_a_shop_reruns_the_pipeline() {
        let mut app = App::new(&config()).unwrap();
        let before = app.run.result.kpis.total_amount;
        let FilterRow::Shop(shop) = app.rows()[0] else {
            panic!("first row should be a shop");
        };

        app.handle_key(KeyCode::Char(' ')).unwrap();
        assert!(!app.selected_shops.contains(&shop));
        assert!(app.run.filtered.iter().all(|r| r.shop != shop));
        assert!(app.run.result.kpis.total_amount < before);

        app.handle_key(KeyCode::Enter).unwrap();
        assert!(app.selected_shops.contains(&shop));
        assert_eq!(app.run.result.kpis.total_amount, before);
    }

    #[test]
    fn clearing_selection_empties_every_output() {
        let mut app = App::new(&config()).unwrap();
        app.handle_key(KeyCode::Char('c')).unwrap();
        assert!(app.run.filtered.is_empty());
        assert_eq!(app.run.result.kpis.total_amount, 0);
        assert_eq!(app.run.result.kpis.mean_amount, 0.0);
        assert!(app.run.result.ranking.is_empty());

        app.handle_key(KeyCode::Char('a')).unwrap();
        assert!(!app.run.filtered.is_empty());
    }

    #[test]
    fn sort_key_flips_ranking() {
        let mut app = App::new(&config()).unwrap();
        let desc: Vec<Shop> = app.run.result.ranking.iter().map(|t| t.shop).collect();
        app.handle_key(KeyCode::Char('s')).unwrap();
        assert_eq!(app.sort_order, SortOrder::Ascending);
        let asc: Vec<Shop> = app.run.result.ranking.iter().map(|t| t.shop).collect();
        assert_eq!(asc.first(), desc.last());
    }

    #[test]
    fn reseed_replaces_dataset_and_resets_selection() {
        let mut app = App::new(&config()).unwrap();
        app.handle_key(KeyCode::Char('c')).unwrap();
        let old = Arc::clone(&app.dataset);

        app.handle_key(KeyCode::Char('r')).unwrap();
        assert_eq!(app.session.config().seed, 43);
        assert!(!Arc::ptr_eq(&old, &app.dataset));
        assert!(!app.selected_shops.is_empty());
        assert!(!app.run.filtered.is_empty());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = App::new(&config()).unwrap();
        app.handle_key(KeyCode::Up).unwrap();
        assert_eq!(app.cursor, 0);
        for _ in 0..20 {
            app.handle_key(KeyCode::Down).unwrap();
        }
        assert_eq!(app.cursor, app.rows().len() - 1);
        assert_eq!(app.rows()[app.cursor], FilterRow::Sort);
    }

    #[test]
    fn quit_keys_end_the_loop() {
        let mut app = App::new(&config()).unwrap();
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
        assert!(app.handle_key(KeyCode::Esc).unwrap());
    }

    #[test]
    fn bars_are_grouped_per_month() {
        let pivot = PivotTable {
            months: vec![
                crate::domain::YearMonth::new(2025, 2),
                crate::domain::YearMonth::new(2025, 3),
            ],
            shops: vec![Shop::Tokyo, Shop::Fukuoka],
            cells: vec![vec![100, 0], vec![300, 200]],
        };
        let (bars, x_bounds, y_bounds) = chart_bars(&pivot);
        assert_eq!(bars.len(), 4);
        assert_eq!(x_bounds, [0.0, 2.0]);
        assert!((y_bounds[1] - 330.0).abs() < 1e-9);

        assert!((bars[0].x0 - 0.1).abs() < 1e-9);
        assert!((bars[1].x1 - 0.9).abs() < 1e-9);
        assert!(bars[2].x0 >= 1.0 && bars[3].x1 <= 2.0);
        assert_eq!(bars[3].value, 200.0);
        assert_eq!(bars[3].color, shop_color(Shop::Fukuoka).0);
    }

    #[test]
    fn axis_labels_are_compact() {
        assert_eq!(fmt_axis_yen(0.0), "¥0");
        assert_eq!(fmt_axis_yen(850.0), "¥850");
        assert_eq!(fmt_axis_yen(120_000.0), "¥120k");
        assert_eq!(fmt_axis_yen(1_300_000.0), "¥1.3M");
    }
}
