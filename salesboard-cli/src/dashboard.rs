//! Interactive terminal dashboard: chart, filters, reload.
//!
//! Key handling mutates one `App` and every mutation ends in a full
//! `build_view` rebuild. The renderer draws exactly what the view's
//! series selection says to draw and nothing else.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use std::io::{self, Stdout};

use salesboard_core::{
    DashboardQuery, DashboardView, FilterState, ItemTypeFilter, Metric, SalesDataset, YearFilter,
    build_view,
};

use crate::loader::Loader;

struct App {
    dataset: SalesDataset,
    query: DashboardQuery,
    view: DashboardView,
    /// 0 selects ALL, 1..=n selects item_types()[i - 1]
    item_cursor: usize,
    /// 0 selects ALL, 1..=n selects years()[i - 1]
    year_cursor: usize,
    status: String,
    show_help: bool,
}

impl App {
    fn new(dataset: SalesDataset, query: DashboardQuery) -> Self {
        let item_cursor = match &query.filter.item_type {
            ItemTypeFilter::All => 0,
            ItemTypeFilter::Only(item_type) => dataset
                .item_types()
                .iter()
                .position(|t| t == item_type)
                .map(|i| i + 1)
                .unwrap_or(0),
        };
        let year_cursor = match query.filter.year {
            YearFilter::All => 0,
            YearFilter::Only(year) => dataset
                .years()
                .iter()
                .position(|y| *y == year)
                .map(|i| i + 1)
                .unwrap_or(0),
        };

        let mut app = Self {
            view: build_view(dataset.records(), &query),
            status: format!("loaded {} records", dataset.record_count()),
            dataset,
            query,
            item_cursor,
            year_cursor,
            show_help: false,
        };
        app.rebuild();
        app
    }

    fn filter_from_cursors(&self) -> FilterState {
        let mut filter = FilterState::new();
        if self.item_cursor > 0 {
            filter = filter.with_item_type(self.dataset.item_types()[self.item_cursor - 1].clone());
        }
        if self.year_cursor > 0 {
            filter = filter.with_year(self.dataset.years()[self.year_cursor - 1]);
        }
        filter
    }

    /// Re-derive the whole view from the current inputs
    fn rebuild(&mut self) {
        self.query.filter = self.filter_from_cursors();
        self.view = build_view(self.dataset.records(), &self.query);
    }

    fn cycle_item_type(&mut self) {
        self.item_cursor = (self.item_cursor + 1) % (self.dataset.item_types().len() + 1);
        self.rebuild();
    }

    fn cycle_year(&mut self) {
        self.year_cursor = (self.year_cursor + 1) % (self.dataset.years().len() + 1);
        self.rebuild();
    }

    fn cycle_metric(&mut self) {
        self.query.metric = self.query.metric.next();
        self.rebuild();
    }

    fn toggle_show_all(&mut self) {
        self.query.show_all = !self.query.show_all;
        self.rebuild();
    }

    /// Swap in a freshly loaded dataset, keeping the selection where the
    /// new dimension index still has it
    fn apply_dataset(&mut self, dataset: SalesDataset) {
        let filter = self.query.filter.clone();
        self.dataset = dataset;

        self.item_cursor = match &filter.item_type {
            ItemTypeFilter::All => 0,
            ItemTypeFilter::Only(item_type) => self
                .dataset
                .item_types()
                .iter()
                .position(|t| t == item_type)
                .map(|i| i + 1)
                .unwrap_or(0),
        };
        self.year_cursor = match filter.year {
            YearFilter::All => 0,
            YearFilter::Only(year) => self
                .dataset
                .years()
                .iter()
                .position(|y| *y == year)
                .map(|i| i + 1)
                .unwrap_or(0),
        };

        self.status = format!("loaded {} records", self.dataset.record_count());
        self.rebuild();
    }
}

pub async fn run_dashboard(
    mut loader: Loader,
    dataset: SalesDataset,
    query: DashboardQuery,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = dashboard_loop(&mut terminal, &mut loader, dataset, query);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    loader: &mut Loader,
    dataset: SalesDataset,
    query: DashboardQuery,
) -> Result<()> {
    let mut app = App::new(dataset, query);
    let source_label = loader.source().describe();

    loop {
        if let Some(result) = loader.poll() {
            match result {
                Ok(dataset) => app.apply_dataset(dataset),
                Err(err) => app.status = format!("data unavailable: {err:#}"),
            }
        }

        terminal.draw(|f| draw(f, &app, &source_label))?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('t') => app.cycle_item_type(),
                    KeyCode::Char('y') => app.cycle_year(),
                    KeyCode::Char('m') => app.cycle_metric(),
                    KeyCode::Char('a') => app.toggle_show_all(),
                    KeyCode::Char('r') => {
                        loader.request();
                        app.status = "reloading...".to_string();
                    }
                    KeyCode::Char('?') => {
                        app.show_help = !app.show_help;
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn draw(f: &mut ratatui::Frame, app: &App, source_label: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "salesboard",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {source_label}  ")),
        Span::styled(app.status.clone(), Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    if app.view.is_empty() {
        let empty = Paragraph::new(
            "No data for the current selection.\n\
Press t or y to widen the filter, r to reload.",
        )
        .block(Block::default().borders(Borders::ALL).title(chart_title(app)));
        f.render_widget(empty, chunks[1]);
    } else {
        let series_points: Vec<Vec<(f64, f64)>> = app
            .view
            .selection
            .series
            .iter()
            .map(|s| {
                s.points
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, *v))
                    .collect()
            })
            .collect();

        let datasets: Vec<Dataset> = app
            .view
            .selection
            .series
            .iter()
            .zip(series_points.iter())
            .map(|(s, points)| {
                Dataset::default()
                    .name(s.name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(metric_color(s.metric)))
                    .data(points)
            })
            .collect();

        let x_max = (app.view.buckets.len().saturating_sub(1)).max(1) as f64;
        let (y_min, y_max) = y_bounds(&app.view);

        let chart = Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL).title(chart_title(app)))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, x_max])
                    .labels(x_axis_labels(&app.view)),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_min, y_max])
                    .labels(y_axis_labels(y_min, y_max)),
            );
        f.render_widget(chart, chunks[1]);
    }

    let mut lines = vec![Line::from(format!(
        "Months: {}   Item type: {}   Year: {}",
        app.view.totals.months,
        app.query.filter.item_type.label(),
        app.query.filter.year.label(),
    ))];
    for series in &app.view.selection.series {
        lines.push(Line::from(format!(
            "Total {}: {:.2}",
            series.name,
            app.view.totals.total(series.metric)
        )));
    }
    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("summary"));
    f.render_widget(summary, chunks[2]);

    let footer_text = if app.show_help {
        "filters cycle ALL, then each value in order, then back to ALL; reload keeps your selection"
    } else {
        "t=item type  y=year  m=metric  a=all series  r=reload  q=quit  ?=help"
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[3]);
}

fn chart_title(app: &App) -> String {
    let metric = if app.query.show_all {
        "all metrics".to_string()
    } else {
        app.query.metric.label().to_string()
    };
    format!(
        "{} | {} - {}",
        metric,
        app.query.filter.item_type.label(),
        app.query.filter.year.label()
    )
}

fn metric_color(metric: Metric) -> Color {
    match metric {
        Metric::RetailSales => Color::Cyan,
        Metric::RetailTransfers => Color::Yellow,
        Metric::WarehouseSales => Color::Magenta,
    }
}

/// Chart band covering every visible point, zero always included
fn y_bounds(view: &DashboardView) -> (f64, f64) {
    let mut min = 0.0f64;
    let mut max = 0.0f64;
    for series in &view.selection.series {
        for v in &series.points {
            min = min.min(*v);
            max = max.max(*v);
        }
    }
    if max == min {
        max = min + 1.0;
    }
    (min, max)
}

fn x_axis_labels(view: &DashboardView) -> Vec<String> {
    let labels = &view.selection.labels;
    match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].clone()],
        2 => vec![labels[0].clone(), labels[1].clone()],
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

fn y_axis_labels(min: f64, max: f64) -> Vec<String> {
    let mid = min + (max - min) / 2.0;
    vec![
        format!("{min:.0}"),
        format!("{mid:.0}"),
        format!("{max:.0}"),
    ]
}
