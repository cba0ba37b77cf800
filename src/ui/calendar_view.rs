use leavecal::calc::grid::{add_months, month_name, month_weeks};
use leavecal::calc::holiday_calc::holiday_data_between;
use leavecal::calc::{DisplayEvent, add_days, check_request, events_on, expand, month_grid, week_of};
use leavecal::data::{AppSettings, Employee, EventData, LeaveData};
use leavecal::select::{
    ClickOutcome, RangeSelector, Selection, SelectionKey, SlotKey, week_slots,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Timelike};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration as StdDuration;

// Calendar cell colors
const RANGE_COLOR: Color = Color::Indexed(110); // soft blue
const LOCKED_COLOR: Color = Color::Indexed(208); // reddish-orange

const SECTION_BG: Color = Color::Rgb(40, 44, 52);

#[derive(PartialEq, Debug, Default, Clone, Copy)]
enum ViewState {
    #[default]
    Month,
    Week,
    Settings,
}

/// Editable rows of the settings view.
const SETTINGS_FIELDS: [&str; 3] = ["First hour", "Last hour", "Break (min)"];

pub struct App<'a> {
    employee: Employee,
    leave_data: &'a mut LeaveData,
    /// Events expanded into one record per displayed day.
    display_events: Vec<DisplayEvent>,
    selected_date: NaiveDate,
    /// Hour row under the cursor in the week view; `None` is the all-day lane.
    selected_hour: Option<u8>,
    today: NaiveDate,
    day_selector: RangeSelector<NaiveDate>,
    slot_selector: RangeSelector<SlotKey>,
    pub settings: AppSettings,
    view_state: ViewState,
    settings_cursor: usize,
    /// Result of the last action (message, color). Cleared on next keypress.
    status: Option<(String, Color)>,
    data_dir: PathBuf,
}

impl<'a> App<'a> {
    pub fn new(
        employee: Employee,
        leave_data: &'a mut LeaveData,
        event_data: &EventData,
        settings: AppSettings,
        today: NaiveDate,
        data_dir: PathBuf,
    ) -> Self {
        App {
            employee,
            leave_data,
            display_events: expand(&event_data.events),
            selected_date: today,
            selected_hour: None,
            today,
            day_selector: RangeSelector::new(),
            slot_selector: RangeSelector::new(),
            settings,
            view_state: ViewState::Month,
            settings_cursor: 0,
            status: None,
            data_dir,
        }
    }

    fn cursor_slot(&self) -> SlotKey {
        match self.selected_hour {
            Some(h) => SlotKey::at(self.selected_date, h),
            None => SlotKey::all_day(self.selected_date),
        }
    }

    fn move_days(&mut self, n: i64) {
        if let Some(date) = add_days(self.selected_date, n) {
            self.selected_date = date;
        }
    }

    fn move_hour(&mut self, down: bool) {
        let hours = self.settings.hours();
        self.selected_hour = match (self.selected_hour, down) {
            (None, true) => Some(*hours.start()),
            (None, false) => None,
            (Some(h), true) if h < *hours.end() => Some(h + 1),
            (Some(h), false) if h > *hours.start() => Some(h - 1),
            (Some(h), false) if h == *hours.start() => None,
            (keep, _) => keep,
        };
    }

    fn click(&mut self) {
        let locked = self.leave_data.locked_days();
        let outcome = match self.view_state {
            ViewState::Week => {
                let slot = self.cursor_slot();
                describe(self.slot_selector.click(slot, &locked), slot)
            }
            _ => {
                let day = self.selected_date;
                describe(self.day_selector.click(day, &locked), day)
            }
        };
        self.status = outcome;
    }

    fn toggle_half(&mut self, start: bool) {
        let changed = match (self.view_state, start) {
            (ViewState::Week, true) => {
                let half = !self.slot_selector.start_half();
                self.slot_selector.set_start_half(half)
            }
            (ViewState::Week, false) => {
                let half = !self.slot_selector.end_half();
                self.slot_selector.set_end_half(half)
            }
            (_, true) => {
                let half = !self.day_selector.start_half();
                self.day_selector.set_start_half(half)
            }
            (_, false) => {
                let half = !self.day_selector.end_half();
                self.day_selector.set_end_half(half)
            }
        };
        if !changed {
            let needs = if start { "a start day" } else { "a complete range" };
            self.status = Some((format!("Half day needs {needs}"), Color::Yellow));
        }
    }

    fn submit(&mut self) {
        let preview = match self.view_state {
            ViewState::Week => check_request(
                &self.slot_selector.selection(),
                &self.employee,
                &self.leave_data.requests,
            ),
            _ => check_request(
                &self.day_selector.selection(),
                &self.employee,
                &self.leave_data.requests,
            ),
        };
        let next_id = self.leave_data.next_id();
        match preview.and_then(|p| {
            let days = p.days;
            p.into_request(next_id).map(|r| (r, days))
        }) {
            Ok((request, days)) => {
                tracing::info!(
                    id = request.id,
                    start = %request.start,
                    end = %request.end,
                    days,
                    "leave request submitted"
                );
                self.status = Some((
                    format!("Request #{} submitted: {:.1} day(s), pending", request.id, days),
                    Color::Green,
                ));
                self.leave_data.add(request);
                self.day_selector.clear();
                self.slot_selector.clear();
            }
            Err(e) => {
                tracing::warn!(error = %e, "leave request rejected");
                self.status = Some((format!("Not submitted: {e}"), Color::Red));
            }
        }
    }

    fn clear_selection(&mut self) {
        match self.view_state {
            ViewState::Week => self.slot_selector.clear(),
            _ => self.day_selector.clear(),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if self.view_state == ViewState::Settings {
            self.handle_settings_key(code);
            return false;
        }

        // Clear the status message on every keypress
        self.status = None;

        match code {
            KeyCode::Left => self.move_days(-1),
            KeyCode::Right => self.move_days(1),
            KeyCode::Up if self.view_state == ViewState::Week => self.move_hour(false),
            KeyCode::Down if self.view_state == ViewState::Week => self.move_hour(true),
            KeyCode::Up => self.move_days(-7),
            KeyCode::Down => self.move_days(7),
            KeyCode::Enter | KeyCode::Char(' ') => self.click(),
            KeyCode::Char('[') => self.toggle_half(true),
            KeyCode::Char(']') => self.toggle_half(false),
            KeyCode::Char('s') => self.submit(),
            KeyCode::Char('c') | KeyCode::Esc => self.clear_selection(),
            KeyCode::Char('n') => self.selected_date = add_months(self.selected_date, 1),
            KeyCode::Char('p') => self.selected_date = add_months(self.selected_date, -1),
            KeyCode::Char('t') => self.selected_date = self.today,
            KeyCode::Char('w') => {
                self.view_state = match self.view_state {
                    ViewState::Week => ViewState::Month,
                    _ => ViewState::Week,
                };
            }
            KeyCode::Char('o') => {
                self.view_state = ViewState::Settings;
                self.settings_cursor = 0;
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    // ── Settings View ─────────────────────────────────────────────────────────

    fn handle_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q') => {
                self.view_state = ViewState::Month;
                self.clamp_selected_hour();
            }
            KeyCode::Up => self.settings_cursor = self.settings_cursor.saturating_sub(1),
            KeyCode::Down => {
                self.settings_cursor = (self.settings_cursor + 1).min(SETTINGS_FIELDS.len() - 1)
            }
            KeyCode::Left | KeyCode::Char('-') => self.adjust_setting(-1),
            KeyCode::Right | KeyCode::Char('+') => self.adjust_setting(1),
            _ => {}
        }
    }

    /// Applies a one-step change to the field under the cursor, keeping the
    /// previous value when the result would not validate.
    fn adjust_setting(&mut self, step: i32) {
        let mut next = self.settings.clone();
        match self.settings_cursor {
            0 => next.day_start_hour = next.day_start_hour.saturating_add_signed(step as i8),
            1 => next.day_end_hour = next.day_end_hour.saturating_add_signed(step as i8),
            _ => {
                next.break_minutes = next.break_minutes.saturating_add_signed(step * 5);
            }
        }
        match next.validate() {
            Ok(()) => {
                self.settings = next;
                self.status = None;
            }
            Err(e) => self.status = Some((e.to_string(), Color::Red)),
        }
    }

    fn clamp_selected_hour(&mut self) {
        let hours = self.settings.hours();
        if let Some(h) = self.selected_hour {
            self.selected_hour = Some(h.clamp(*hours.start(), *hours.end()));
        }
    }

    fn render_settings_view(&self, f: &mut Frame, area: Rect) {
        let s = &self.settings;
        let values = [
            format!("{:02}:00", s.day_start_hour),
            format!("{:02}:00", s.day_end_hour),
            s.break_minutes.to_string(),
        ];
        let mut rows = vec![section_header("Settings")];
        for (i, (label, value)) in SETTINGS_FIELDS.iter().zip(values).enumerate() {
            let style = if i == self.settings_cursor {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default()
            };
            rows.push(Row::new(vec![plain(format!("  {label}")), plain(value)]).style(style));
        }
        let net = s.default_work_minutes();
        rows.push(spacer());
        rows.push(Row::new(vec![
            plain("  Default day"),
            plain(format!(
                "{}-{} ({}h{:02} net)",
                s.default_start.format("%H:%M"),
                s.default_end.format("%H:%M"),
                net / 60,
                net % 60
            )),
        ]));
        if let Some((msg, color)) = &self.status {
            rows.push(spacer());
            rows.push(Row::new(vec![colored(format!("  {msg}"), *color), plain("")]));
        }
        rows.push(spacer());
        rows.push(Row::new(vec![
            plain("  ↑↓ field   ←→/+- change   Esc back"),
            plain(""),
        ]));

        let table = Table::new(rows, [Constraint::Length(40), Constraint::Min(10)])
            .block(Block::default().borders(Borders::ALL).title(" Settings "));
        f.render_widget(table, area);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self, f: &mut Frame) {
        let size = f.area();
        if self.view_state == ViewState::Settings {
            self.render_settings_view(f, size);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(if self.view_state == ViewState::Week { 72 } else { 36 }),
                Constraint::Min(30),
            ])
            .split(size);

        match self.view_state {
            ViewState::Week => self.render_week(f, chunks[0]),
            _ => self.render_month(f, chunks[0]),
        }
        self.render_side_panel(f, chunks[1]);
    }

    fn render_month(&self, f: &mut Frame, area: Rect) {
        let year = self.selected_date.year();
        let month = self.selected_date.month();
        let grid = match month_grid(year, month) {
            Ok(g) => g,
            Err(e) => {
                f.render_widget(Paragraph::new(e.to_string()), area);
                return;
            }
        };
        let holidays = holiday_data_between(grid[0].date, grid[grid.len() - 1].date);
        let holiday_map = holidays.get_holiday_map();
        let locked = self.leave_data.locked_days();
        let selection = self.day_selector.selection();

        let title = format!("{} {}", month_name(month), year);
        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                format!("{:^27}", title),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Line::from("Mo  Tu  We  Th  Fr  Sa  Su"),
        ];

        for week in month_weeks(&grid) {
            let mut spans = Vec::new();
            for cell in week {
                let date = cell.date;
                let style = calendar_day_style(DayFlags {
                    is_cursor: date == self.selected_date,
                    in_selection: in_selection(&selection, date),
                    is_locked: locked.contains(&date),
                    is_holiday: holiday_map.contains_key(&date),
                    is_today: date == self.today,
                    is_off: !self.employee.work_days.works_on(date),
                    has_event: !events_on(&self.display_events, date).is_empty(),
                    in_month: cell.in_month,
                });
                spans.push(Span::styled(format!("{:2}", Datelike::day(&date)), style));
                spans.push(Span::raw("  "));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("■", Style::default().fg(RANGE_COLOR)),
            Span::raw(" selection  "),
            Span::styled("■", Style::default().fg(LOCKED_COLOR)),
            Span::raw(" approved  "),
            Span::styled("■", Style::default().fg(Color::Green)),
            Span::raw(" holiday"),
        ]));

        let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn render_week(&self, f: &mut Frame, area: Rect) {
        let days = week_of(self.selected_date);
        let locked = self.leave_data.locked_days();
        let selection = self.slot_selector.selection();
        let cursor = self.cursor_slot();

        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(days.iter().map(|d| Cell::from(d.format("%a %d").to_string())))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        // week_slots is day-major; each day contributes the same lanes in order
        let slots = week_slots(self.selected_date, self.settings.hours());
        let per_day: Vec<&[SlotKey]> = slots.chunks(slots.len() / days.len()).collect();
        let rows: Vec<Row> = (0..per_day[0].len())
            .map(|lane| {
                let label = match per_day[0][lane].hour {
                    Some(h) => format!("{h:02}:00"),
                    None => "all day".to_string(),
                };
                let cells = per_day.iter().map(|day_slots| {
                    let slot = day_slots[lane];
                    let text = slot_text(&self.display_events, slot);
                    let style = if slot == cursor {
                        Style::default().fg(Color::Black).bg(Color::White)
                    } else if locked.contains(&slot.day) {
                        Style::default().fg(LOCKED_COLOR)
                    } else if in_selection(&selection, slot) {
                        Style::default().fg(Color::Black).bg(RANGE_COLOR)
                    } else if !self.employee.work_days.works_on(slot.day) {
                        Style::default().add_modifier(Modifier::DIM)
                    } else {
                        Style::default()
                    };
                    Cell::from(text).style(style)
                });
                Row::new(std::iter::once(plain(label)).chain(cells).collect::<Vec<_>>())
            })
            .collect();

        let mut widths = vec![Constraint::Length(8)];
        widths.extend(std::iter::repeat_n(Constraint::Length(8), 7));
        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Week of {} ", days[0].format("%Y-%m-%d"))),
        );
        f.render_widget(table, area);
    }

    fn render_side_panel(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // selection + events
                Constraint::Length(8), // help table
                Constraint::Length(1), // data dir footer
            ])
            .split(area);

        let mut lines: Vec<Line> = Vec::new();

        if let Some((msg, color)) = &self.status {
            lines.push(Line::from(Span::styled(
                msg.clone(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            format!("Leave for {}", self.employee.name),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let (range, days) = match self.view_state {
            ViewState::Week => {
                let s = self.slot_selector.selection();
                (selection_label(&s), s.chargeable_days(&self.employee.work_days))
            }
            _ => {
                let s = self.day_selector.selection();
                (selection_label(&s), s.chargeable_days(&self.employee.work_days))
            }
        };
        let balance = self.employee.vacation_balance;
        let used = self.leave_data.used_days(&self.employee.work_days);
        lines.push(Line::from(format!("  Selection:   {range}")));
        lines.push(Line::from(format!("  Chargeable:  {days:.1}")));
        lines.push(Line::from(format!(
            "  Balance:     {balance:.1} (after: {:.1})",
            balance - days
        )));
        lines.push(Line::from(format!("  Requested:   {used:.1} incl. pending")));
        lines.push(Line::from(""));

        lines.push(Line::from(format!(
            "{}:",
            self.selected_date.format("%a %Y-%m-%d")
        )));
        let holidays = holiday_data_between(self.selected_date, self.selected_date);
        for h in &holidays.holidays {
            lines.push(Line::from(Span::styled(
                format!("  ★ {}", h.name),
                Style::default().fg(Color::Green),
            )));
        }
        if let Some(r) = self
            .leave_data
            .requests
            .iter()
            .find(|r| r.covers(self.selected_date))
        {
            lines.push(Line::from(format!("  Leave #{} ({})", r.id, r.status)));
        }
        let events = events_on(&self.display_events, self.selected_date);
        if events.is_empty() {
            lines.push(Line::from("  (no events)"));
        }
        for e in events {
            lines.push(Line::from(format!("  • {}", event_label(e))));
        }

        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::NONE)),
            chunks[0],
        );

        let view_action = if self.view_state == ViewState::Week {
            "Month view"
        } else {
            "Week view"
        };
        let key_rows: Vec<Row> = vec![
            Row::new(vec!["← → ↑ ↓", "Move", "n / p", "Next/prev month"]),
            Row::new(vec!["Enter/Space", "Pick start/end", "c / Esc", "Clear selection"]),
            Row::new(vec!["[", "Half start day", "]", "Half end day"]),
            Row::new(vec!["s", "Submit request", "t", "Today"]),
            Row::new(vec!["w", view_action, "o", "Settings"]),
            Row::new(vec!["q/Ctrl+C", "Quit", "", ""]),
        ];
        let help_table = Table::new(
            key_rows,
            [
                Constraint::Length(12),
                Constraint::Length(16),
                Constraint::Length(8),
                Constraint::Length(16),
            ],
        )
        .block(Block::default().borders(Borders::NONE))
        .column_spacing(1);
        f.render_widget(help_table, chunks[1]);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Data  ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                self.data_dir.to_string_lossy().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        f.render_widget(footer, chunks[2]);
    }
}

fn describe<K: SelectionKey + std::fmt::Display>(
    outcome: ClickOutcome<K>,
    key: K,
) -> Option<(String, Color)> {
    match outcome {
        ClickOutcome::Accepted(_) => None,
        ClickOutcome::Ignored => Some((
            format!("{} is approved leave", key.day().format("%Y-%m-%d")),
            Color::Yellow,
        )),
        ClickOutcome::Blocked { first_locked } => Some((
            format!(
                "Range to {key} blocked: {} is approved leave",
                first_locked.format("%Y-%m-%d")
            ),
            Color::Red,
        )),
    }
}

fn section_header(title: &str) -> Row<'static> {
    Row::new(vec![
        Cell::from(title.to_string())
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Cell::from(""),
    ])
    .style(Style::default().bg(SECTION_BG))
}

fn spacer() -> Row<'static> {
    Row::new(vec![Cell::from(""), Cell::from("")])
}

/// Plain (unstyled) cell.
fn plain(s: impl Into<String>) -> Cell<'static> {
    Cell::from(s.into())
}

/// Colored cell.
fn colored(s: impl Into<String>, color: Color) -> Cell<'static> {
    Cell::from(s.into()).style(Style::default().fg(color))
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// True when `key` lies inside the current selection, or is its lone start.
pub(crate) fn in_selection<K: SelectionKey>(selection: &Selection<K>, key: K) -> bool {
    match (selection.start, selection.end) {
        (Some(start), Some(end)) => key >= start && key <= end,
        (Some(start), None) => key == start,
        _ => false,
    }
}

pub(crate) fn selection_label<K: SelectionKey + std::fmt::Display>(
    selection: &Selection<K>,
) -> String {
    let half = |h: bool| if h { " ½" } else { "" };
    match (selection.start, selection.end) {
        (Some(start), Some(end)) => format!(
            "{start}{} → {end}{}",
            half(selection.start_half),
            half(selection.end_half)
        ),
        (Some(start), None) => format!("{start}{} → …", half(selection.start_half)),
        _ => "none".to_string(),
    }
}

fn event_label(e: &DisplayEvent) -> String {
    let when = match (e.event.is_all_day, e.event.start_time) {
        (false, Some(t)) => format!("{} ", t.format("%H:%M")),
        _ => String::new(),
    };
    let span = match (e.is_multi_day, e.is_first_day, e.is_last_day) {
        (false, _, _) => "",
        (true, true, _) => " (starts)",
        (true, _, true) => " (ends)",
        (true, false, false) => " (cont.)",
    };
    format!("{when}{}{span}", e.event.title)
}

/// Short cell text for one week-view slot: the first all-day event in the
/// all-day lane, or the first timed event starting within the hour.
fn slot_text(events: &[DisplayEvent], slot: SlotKey) -> String {
    let found = events_on(events, slot.day).into_iter().find(|e| match slot.hour {
        None => e.event.is_all_day,
        Some(h) => {
            !e.event.is_all_day && e.event.start_time.is_some_and(|t| t.hour() == u32::from(h))
        }
    });
    match found {
        Some(e) => e.event.title.chars().take(7).collect(),
        None => String::new(),
    }
}

#[derive(Default, Clone, Copy)]
pub(crate) struct DayFlags {
    pub is_cursor: bool,
    pub in_selection: bool,
    pub is_locked: bool,
    pub is_holiday: bool,
    pub is_today: bool,
    pub is_off: bool,
    pub has_event: bool,
    pub in_month: bool,
}

/// Determines the ratatui `Style` for a month-grid day cell based on its state.
pub(crate) fn calendar_day_style(flags: DayFlags) -> Style {
    let mut s = if flags.is_cursor {
        let bg = if flags.is_locked {
            LOCKED_COLOR
        } else if flags.in_selection {
            RANGE_COLOR
        } else if flags.is_holiday {
            Color::Green
        } else {
            Color::White
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else if flags.is_locked {
        Style::default()
            .fg(LOCKED_COLOR)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if flags.in_selection {
        Style::default().fg(Color::Black).bg(RANGE_COLOR)
    } else if flags.is_holiday {
        Style::default().fg(Color::Green)
    } else if flags.is_off {
        Style::default().add_modifier(Modifier::DIM)
    } else if flags.has_event {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    if flags.is_today && !flags.is_cursor {
        s = s.add_modifier(Modifier::REVERSED);
    }
    if !flags.in_month {
        s = s.add_modifier(Modifier::DIM);
    }
    s
}
