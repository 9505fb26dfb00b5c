//! Main application state, event handling, and rendering.
//!
//! Every search keystroke re-runs the full filter + project cycle; the
//! previous projection is discarded, never patched. Both operations are
//! pure and synchronous, so no debouncing is needed.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};
use ratatui::Frame;

use crate::event::Event;
use crate::model::{Catalog, PatternId};
use crate::search::{filter, highlight, HighlightSegment};
use crate::theme::Theme;
use crate::view::{project, summary, PhaseView, Projection};

/// Return value from event handling.
#[derive(Debug, PartialEq)]
pub enum Action {
    Continue,
    Quit,
}

/// Input mode for modal states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Detail,
    Summary,
    Help,
}

/// A selectable card position within the current projection: the pattern
/// plus the theme context it was reached through (the detail view resolves
/// quotes for exactly this pair).
#[derive(Debug, Clone)]
pub struct CardRef {
    pub pattern_id: PatternId,
    pub theme_code: String,
}

/// Core application state.
pub struct App {
    // Core data — immutable for the session
    pub catalog: Catalog,

    // Current projection
    pub phases: Vec<PhaseView>,
    pub no_results: Option<String>,
    pub cards: Vec<CardRef>,

    // UI state
    pub search_query: String,
    pub mode: InputMode,
    pub selected: usize,
    pub scroll: u16,
    pub detail_scroll: u16,
    pub detail_total_lines: u16,
    pub summary_scroll: u16,

    // Theme
    pub theme: Theme,

    // Status
    pub clock: String,
}

impl App {
    pub fn new(catalog: Catalog, initial_term: String) -> Self {
        let mut app = Self {
            catalog,
            phases: Vec::new(),
            no_results: None,
            cards: Vec::new(),
            search_query: initial_term,
            mode: InputMode::Normal,
            selected: 0,
            scroll: 0,
            detail_scroll: 0,
            detail_total_lines: 0,
            summary_scroll: 0,
            theme: Theme::ember(),
            clock: chrono::Local::now().format("%H:%M:%S").to_string(),
        };
        app.recompute();
        app
    }

    /// Re-run the filter + project cycle for the current search query and
    /// rebuild the flat card list used for selection.
    fn recompute(&mut self) {
        let filtered = filter(&self.catalog, &self.search_query);
        match project(&self.catalog, &filtered, &self.search_query) {
            Projection::Results(phases) => {
                self.cards = phases
                    .iter()
                    .flat_map(|phase| &phase.themes)
                    .flat_map(|theme| {
                        theme.cards.iter().map(|card| CardRef {
                            pattern_id: card.pattern_id.clone(),
                            theme_code: theme.code.clone(),
                        })
                    })
                    .collect();
                self.phases = phases;
                self.no_results = None;
            }
            Projection::NoResults { term } => {
                self.phases = Vec::new();
                self.cards = Vec::new();
                self.no_results = Some(term);
            }
        }
        self.selected = self.selected.min(self.cards.len().saturating_sub(1));
        self.scroll = 0;
    }

    /// Main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
    ) -> color_eyre::Result<()> {
        let mut events = crate::event::EventHandler::new();

        loop {
            // RENDER
            terminal.draw(|frame| self.render(frame))?;

            // WAIT FOR EVENT
            let Some(event) = events.next().await else {
                break;
            };

            // UPDATE
            match self.handle_event(event) {
                Action::Quit => break,
                Action::Continue => {}
            }
        }

        Ok(())
    }

    /// Handle a single event.
    pub fn handle_event(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Tick => {
                self.clock = chrono::Local::now().format("%H:%M:%S").to_string();
                Action::Continue
            }
            Event::Resize(_, _) => Action::Continue,
        }
    }

    /// Handle key events.
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        // Global keys
        match key.code {
            KeyCode::Char('q') if self.mode != InputMode::Search => return Action::Quit,
            KeyCode::Char('?') if self.mode != InputMode::Search => {
                self.mode = if self.mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
                return Action::Continue;
            }
            KeyCode::Esc => {
                match self.mode {
                    InputMode::Search => {
                        self.mode = InputMode::Normal;
                        self.search_query.clear();
                        self.recompute();
                    }
                    InputMode::Detail | InputMode::Summary | InputMode::Help => {
                        self.mode = InputMode::Normal;
                    }
                    InputMode::Normal => {}
                }
                return Action::Continue;
            }
            _ => {}
        }

        match self.mode {
            InputMode::Help => {
                // Any key dismisses
                self.mode = InputMode::Normal;
                Action::Continue
            }
            InputMode::Search => self.handle_search_key(key),
            InputMode::Detail => self.handle_detail_key(key),
            InputMode::Summary => self.handle_summary_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(c) => {
                self.search_query.push(c);
                self.recompute();
            }
            KeyCode::Backspace => {
                self.search_query.pop();
                self.recompute();
            }
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
        Action::Continue
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('d') => {
                self.detail_scroll = self
                    .detail_scroll
                    .saturating_add(1)
                    .min(self.detail_total_lines.saturating_sub(5));
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('u') => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
        Action::Continue
    }

    fn handle_summary_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.summary_scroll = self.summary_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.summary_scroll = self.summary_scroll.saturating_sub(1);
            }
            KeyCode::Char('s') => {
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
        Action::Continue
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.cards.len().saturating_sub(1),
            KeyCode::Enter => {
                if !self.cards.is_empty() {
                    self.detail_scroll = 0;
                    self.mode = InputMode::Detail;
                }
            }
            KeyCode::Char('/') => {
                self.mode = InputMode::Search;
            }
            KeyCode::Char('s') => {
                self.summary_scroll = 0;
                self.mode = InputMode::Summary;
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.next();
            }
            _ => {}
        }
        Action::Continue
    }

    fn select_next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.cards.len() - 1);
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // ─────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Graceful degradation for tiny terminals
        if area.width < 40 || area.height < 10 {
            let msg = Paragraph::new("Terminal too small. Resize to at least 80x24.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.error));
            frame.render_widget(msg, area);
            return;
        }

        let [title_area, stats_area, main_area, status_area] = Layout::vertical([
            Constraint::Length(1), // title bar
            Constraint::Length(1), // stats bar
            Constraint::Fill(1),   // main content
            Constraint::Length(1), // status bar
        ])
        .areas(area);

        self.render_title_bar(frame, title_area);
        self.render_stats_bar(frame, stats_area);
        self.render_status_bar(frame, status_area);

        if self.mode == InputMode::Summary {
            self.render_summary(frame, main_area);
        } else {
            self.render_playbook(frame, main_area);
        }

        // Overlays
        if self.mode == InputMode::Search {
            self.render_search_overlay(frame, area);
        }
        if self.mode == InputMode::Detail {
            self.render_detail_modal(frame, area);
        }
        if self.mode == InputMode::Help {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let left = " ◇ Anti-Pattern Playbook";
        let padding = area
            .width
            .saturating_sub(left.chars().count() as u16 + self.clock.len() as u16 + 1)
            as usize;

        let title = Line::from(vec![
            Span::styled(left, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(padding)),
            Span::raw(&self.clock),
            Span::raw(" "),
        ]);

        frame.render_widget(
            Paragraph::new(title).style(
                Style::default()
                    .bg(self.theme.bar_bg)
                    .fg(self.theme.text_on_bar),
            ),
            area,
        );
    }

    fn render_stats_bar(&self, frame: &mut Frame, area: Rect) {
        let themes_shown: usize = self.phases.iter().map(|p| p.themes.len()).sum();

        let mut spans = vec![
            Span::styled(
                format!(" {} Patterns", self.cards.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(
                format!("{} Themes", themes_shown),
                Style::default().fg(self.theme.accent),
            ),
            Span::raw(" │ "),
            Span::styled(
                format!("{} Phases", self.phases.len()),
                Style::default().fg(self.theme.accent),
            ),
        ];

        if !self.search_query.trim().is_empty() {
            spans.push(Span::raw("  │  "));
            spans.push(Span::styled(
                format!("Search: \"{}\"", self.search_query),
                Style::default().fg(self.theme.warning),
            ));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .style(Style::default().fg(self.theme.text_secondary)),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let theme_name = self.theme.name;

        let shortcuts = Line::from(vec![
            Span::styled(" ↑↓", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Navigate  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Quotes  "),
            Span::styled("/", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Search  "),
            Span::styled("s", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Summary  "),
            Span::styled("t", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Theme  "),
            Span::styled("?", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Help  "),
            Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" Quit  │ {theme_name}")),
        ]);

        frame.render_widget(
            Paragraph::new(shortcuts).style(
                Style::default()
                    .bg(self.theme.bar_bg)
                    .fg(self.theme.text_on_bar),
            ),
            area,
        );
    }

    fn render_playbook(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;

        let block = Block::bordered()
            .border_style(Style::default().fg(theme.border))
            .title(" Playbook ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(term) = &self.no_results {
            let msg = Paragraph::new(vec![
                Line::raw(""),
                Line::styled(
                    format!("No results found for \"{term}\""),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Line::raw(""),
                Line::styled(
                    "Try searching for another keyword.",
                    Style::default().fg(theme.text_secondary),
                ),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(msg, inner);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        let mut selected_line = 0usize;
        let mut card_idx = 0usize;

        for phase in &self.phases {
            lines.push(Line::styled(
                phase.name.clone(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::styled(
                "─".repeat(inner.width.saturating_sub(2) as usize),
                Style::default().fg(theme.border),
            ));

            for theme_view in &phase.themes {
                lines.push(Line::from(vec![
                    Span::styled(
                        theme_view.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  ({})", theme_view.code),
                        Style::default().fg(theme.text_secondary),
                    ),
                ]));
                if !theme_view.description.is_empty() {
                    lines.push(Line::styled(
                        theme_view.description.clone(),
                        Style::default()
                            .fg(theme.text_secondary)
                            .add_modifier(Modifier::ITALIC),
                    ));
                }
                lines.push(Line::raw(""));

                for card in &theme_view.cards {
                    let is_selected = card_idx == self.selected;
                    if is_selected {
                        selected_line = lines.len();
                    }

                    let marker = if is_selected { "▸ " } else { "  " };
                    let mut name_spans = vec![
                        Span::styled(marker, Style::default().fg(theme.accent)),
                        Span::styled(
                            format!("{}  ", card.pattern_id),
                            Style::default()
                                .fg(theme.accent)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ];
                    let name_style = if is_selected {
                        Style::default()
                            .fg(theme.text_primary)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    name_spans.extend(segment_spans(&card.name, name_style, theme));
                    lines.push(Line::from(name_spans));

                    let mut desc_spans = vec![Span::raw("      ")];
                    desc_spans.extend(segment_spans(
                        &card.description,
                        Style::default().fg(theme.text_secondary),
                        theme,
                    ));
                    lines.push(Line::from(desc_spans));
                    lines.push(Line::raw(""));

                    card_idx += 1;
                }
            }
        }

        // Keep the selected card in view.
        let height = inner.height as usize;
        let scroll = self.scroll as usize;
        if selected_line < scroll {
            self.scroll = selected_line as u16;
        } else if height > 4 && selected_line >= scroll + height - 3 {
            self.scroll = (selected_line + 4 - height) as u16;
        }

        let total_lines = lines.len() as u16;
        let paragraph = Paragraph::new(lines).scroll((self.scroll, 0));
        frame.render_widget(paragraph, inner);

        if total_lines > inner.height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
            let mut scrollbar_state =
                ScrollbarState::new(total_lines as usize).position(self.scroll as usize);
            frame.render_stateful_widget(
                scrollbar,
                inner.inner(Margin {
                    vertical: 0,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }

    fn render_summary(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;

        let block = Block::bordered()
            .border_style(Style::default().fg(theme.border))
            .title(" All Patterns ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();
        for pattern in summary(&self.catalog) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", pattern.id),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    pattern.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::styled(
                format!("  {}", pattern.description),
                Style::default().fg(theme.text_secondary),
            ));
            lines.push(Line::raw(""));
        }

        let total_lines = lines.len() as u16;
        self.summary_scroll = self
            .summary_scroll
            .min(total_lines.saturating_sub(inner.height));

        let paragraph = Paragraph::new(lines).scroll((self.summary_scroll, 0));
        frame.render_widget(paragraph, inner);
    }

    fn render_search_overlay(&self, frame: &mut Frame, area: Rect) {
        let search_area = Rect {
            x: area.x + 1,
            y: area.y + 2,
            width: area.width.saturating_sub(2),
            height: 1,
        };

        frame.render_widget(Clear, search_area);

        let search_line = Line::from(vec![
            Span::styled(
                " / ",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(&self.search_query),
            Span::styled("█", Style::default().fg(self.theme.accent)),
        ]);

        frame.render_widget(
            Paragraph::new(search_line).style(
                Style::default()
                    .bg(self.theme.surface)
                    .fg(self.theme.text_primary),
            ),
            search_area,
        );
    }

    fn render_detail_modal(&mut self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;

        let Some(card) = self.cards.get(self.selected) else {
            return;
        };
        let Some(pattern) = self.catalog.pattern(&card.pattern_id) else {
            return;
        };

        let popup_area = centered_rect(70, area.height.saturating_sub(6).min(24), area);
        frame.render_widget(Clear, popup_area);

        let block = Block::bordered()
            .title(format!(" {} ", pattern.id))
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::styled(
            pattern.name.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(
            pattern.description.clone(),
            Style::default().fg(theme.text_secondary),
        ));
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Supporting Quotes",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(
            "─".repeat(inner.width.saturating_sub(2) as usize),
            Style::default().fg(theme.border),
        ));

        let quotes = self
            .catalog
            .resolve_quotes(&card.pattern_id, &card.theme_code);

        if quotes.is_empty() {
            lines.push(Line::styled(
                "No supporting quotes found for this specific context.",
                Style::default().fg(theme.text_secondary),
            ));
        } else {
            for quote in &quotes {
                let mut quote_spans =
                    vec![Span::styled("“", Style::default().fg(theme.text_secondary))];
                quote_spans.extend(segment_spans(
                    &highlight(&quote.text, &self.search_query),
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::ITALIC),
                    theme,
                ));
                quote_spans.push(Span::styled(
                    "”",
                    Style::default().fg(theme.text_secondary),
                ));
                lines.push(Line::from(quote_spans));

                if !quote.author.is_empty() {
                    lines.push(Line::styled(
                        format!("    — {}", quote.author),
                        Style::default().fg(theme.text_secondary),
                    ));
                }
                lines.push(Line::raw(""));
            }
        }

        self.detail_total_lines = lines.len() as u16;

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0));
        frame.render_widget(paragraph, inner);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 16, area);
        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            Line::styled(
                "Keyboard Shortcuts",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::raw("  ↑/k       Move selection up"),
            Line::raw("  ↓/j       Move selection down"),
            Line::raw("  Home/End  First/last pattern"),
            Line::raw("  Enter     Open supporting quotes"),
            Line::raw("  Esc       Close overlay / clear search"),
            Line::raw("  /         Search patterns and quotes"),
            Line::raw("  s         Toggle summary listing"),
            Line::raw("  t         Cycle theme"),
            Line::raw("  ?         Toggle this help"),
            Line::raw("  q         Quit"),
            Line::raw(""),
            Line::styled(
                "Press any key to close",
                Style::default().fg(self.theme.text_secondary),
            ),
        ];

        let help = Paragraph::new(help_text).block(
            Block::bordered()
                .title(" Help ")
                .border_style(Style::default().fg(self.theme.accent))
                .style(Style::default().bg(self.theme.surface)),
        );

        frame.render_widget(help, popup_area);
    }
}

// ─────────────────────────────────────────────────────────
// Standalone helper functions
// ─────────────────────────────────────────────────────────

/// Turn highlight segments into styled spans: emphasised runs get the
/// theme's highlight colours on top of the base style.
fn segment_spans(
    segments: &[HighlightSegment],
    base_style: Style,
    theme: Theme,
) -> Vec<Span<'static>> {
    segments
        .iter()
        .map(|seg| {
            if seg.emphasised {
                Span::styled(
                    seg.text.clone(),
                    Style::default()
                        .bg(theme.highlight_bg)
                        .fg(theme.highlight_fg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(seg.text.clone(), base_style)
            }
        })
        .collect()
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
