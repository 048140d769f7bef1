use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position as CellPos, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{
    Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::{Frame, Terminal};
use tracing::info;

use chat_wm::config::{DockConfig, GridConfig};
use chat_wm::drag::DragController;
use chat_wm::roster::{EmptyState, RosterEntry, RosterGrid};
use chat_wm::window::{ChatDock, DockSnapshot};

const HELP_TEXT: &str = indoc! {"
    chat-wm demo

      type        filter the roster
      Esc         clear search / close popover
      wheel       scroll the roster grid
      click card  open a chat window
      drag title  move a chat window
      [-] / [x]   minimize / close a window
      badge       show queued chats (click to reopen)
      F1          toggle this help
      Ctrl+Q      quit

    Logs go to stderr; run with `2>chat-wm.log`.
"};

#[derive(Debug, Parser)]
#[command(name = "chat-wm", about = "Virtualized roster + floating chat window demo")]
struct Cli {
    /// Number of generated roster entries.
    #[arg(long, default_value_t = 1000)]
    users: usize,
    /// Roster row height in cells.
    #[arg(long, default_value_t = chat_wm::constants::DEFAULT_ROW_HEIGHT)]
    row_height: u16,
    /// Roster card width in cells.
    #[arg(long, default_value_t = chat_wm::constants::DEFAULT_ITEM_WIDTH)]
    item_width: u16,
    /// Hard cap on filtered roster entries.
    #[arg(long, default_value_t = chat_wm::constants::DEFAULT_MAX_ITEMS)]
    max_items: usize,
    /// Chat window width in cells.
    #[arg(long, default_value_t = chat_wm::constants::DEFAULT_WINDOW_WIDTH)]
    window_width: u16,
    /// Chat window height in cells.
    #[arg(long, default_value_t = chat_wm::constants::DEFAULT_WINDOW_HEIGHT)]
    window_height: u16,
}

fn main() -> io::Result<()> {
    chat_wm::tracing_sub::init_default();
    let cli = Cli::parse();
    let mut app = App::new(&cli);
    info!(users = app.users.len(), "chat-wm demo starting");

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;
        if !event::poll(Duration::from_millis(16))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }
                app.handle_key(key.code, key.modifiers);
            }
            Event::Mouse(mouse) => app.handle_mouse(&mouse),
            Event::Resize(..) => {}
            _ => {}
        }
    }
}

#[derive(Debug, Clone)]
struct ChatUser {
    id: u32,
    name: String,
    online: bool,
}

impl RosterEntry for ChatUser {
    type Id = u32;

    fn entry_id(&self) -> u32 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Something the user can click, recorded during draw and hit-tested on the
/// next pointer-down.
#[derive(Debug, Clone, Copy)]
enum Target {
    Card(u32),
    /// A floating window's surface; swallows clicks so they never reach
    /// the roster cards painted underneath.
    WindowBody,
    WindowMinimize(u32),
    WindowClose(u32),
    OverflowBadge,
    QueueEntry(u32),
}

struct FloatingChat {
    controller: DragController,
    queue_index: usize,
}

struct App {
    users: Vec<ChatUser>,
    grid: RosterGrid<ChatUser>,
    dock: ChatDock<u32>,
    chats: BTreeMap<u32, FloatingChat>,
    snapshot: DockSnapshot<u32>,
    screen: Size,
    grid_area: Rect,
    targets: Vec<(Rect, Target)>,
    queue_open: bool,
    help_visible: bool,
}

impl App {
    fn new(cli: &Cli) -> Self {
        let users = generate_users(cli.users);
        let self_id = 0;
        let mut grid = RosterGrid::new(GridConfig {
            row_height: cli.row_height,
            item_width: cli.item_width,
            gap: chat_wm::constants::DEFAULT_GRID_GAP,
            overscan: chat_wm::constants::DEFAULT_OVERSCAN,
            max_items: cli.max_items,
        });
        grid.set_self_id(Some(self_id));
        let dock = ChatDock::new(DockConfig {
            window_width: cli.window_width,
            window_height: cli.window_height,
            ..DockConfig::default()
        });
        Self {
            users,
            grid,
            dock,
            chats: BTreeMap::new(),
            snapshot: DockSnapshot {
                to_show: Vec::new(),
                hidden: Vec::new(),
            },
            screen: Size::new(0, 0),
            grid_area: Rect::default(),
            targets: Vec::new(),
            queue_open: false,
            help_visible: false,
        }
    }

    fn user(&self, id: u32) -> Option<&ChatUser> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Re-derive the visible window set and reconcile the per-window drag
    /// controllers: windows that lost materialization drop theirs, new
    /// slots get one at the stack position, and a changed queue slot
    /// re-homes the window unless the user is mid-drag.
    fn sync_dock(&mut self) {
        let snap = self.dock.visible_set(self.screen.width);
        self.chats
            .retain(|id, _| snap.to_show.iter().any(|w| w.id == *id));
        for win in &snap.to_show {
            let home = self.dock.stack_position(win.queue_index, self.screen);
            match self.chats.get_mut(&win.id) {
                Some(chat) => {
                    if chat.queue_index != win.queue_index {
                        chat.queue_index = win.queue_index;
                        chat.controller.reset_position(home, self.screen);
                    }
                }
                None => {
                    self.chats.insert(
                        win.id,
                        FloatingChat {
                            controller: DragController::new(home, self.dock.window_size()),
                            queue_index: win.queue_index,
                        },
                    );
                }
            }
        }
        self.snapshot = snap;
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::F(1) => self.help_visible = !self.help_visible,
            KeyCode::Esc => {
                if self.help_visible {
                    self.help_visible = false;
                } else if self.queue_open {
                    self.queue_open = false;
                } else {
                    self.grid.clear_search();
                }
            }
            KeyCode::Backspace => {
                let mut term = self.grid.search().to_string();
                term.pop();
                self.grid.set_search(term);
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                let mut term = self.grid.search().to_string();
                term.push(c);
                self.grid.set_search(term);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        // Windows sit above everything else; offer the event to their drag
        // controllers topmost-first (queue index 0 renders last).
        let mut order: Vec<u32> = self.snapshot.to_show.iter().map(|w| w.id).collect();
        order.reverse();
        for id in order {
            if let Some(chat) = self.chats.get_mut(&id)
                && chat.controller.handle_mouse(mouse, self.screen)
            {
                return;
            }
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(target) = self.hit_test(mouse.column, mouse.row) {
                    self.activate(target);
                }
            }
            MouseEventKind::ScrollUp => self.scroll_grid(-1),
            MouseEventKind::ScrollDown => self.scroll_grid(1),
            _ => {}
        }
    }

    fn hit_test(&self, column: u16, row: u16) -> Option<Target> {
        let pos = CellPos::new(column, row);
        self.targets
            .iter()
            .rev() // later-drawn targets win
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, target)| *target)
    }

    fn activate(&mut self, target: Target) {
        match target {
            Target::Card(id) | Target::QueueEntry(id) => {
                self.dock.open(id);
                self.queue_open = false;
            }
            Target::WindowBody => {}
            Target::WindowMinimize(id) => self.dock.toggle_minimize(id),
            Target::WindowClose(id) => self.dock.close(id),
            Target::OverflowBadge => self.queue_open = !self.queue_open,
        }
    }

    /// Wheel scrolling, one row per notch. The grid itself never clamps;
    /// the offset is held to `[0, content_height - view]` here.
    fn scroll_grid(&mut self, delta: isize) {
        let window = self.grid.compute(&self.users);
        let view = self.grid_area.height as usize;
        let max = window.content_height().saturating_sub(view);
        let step = window.row_height as usize;
        let next = if delta < 0 {
            self.grid.scroll_offset().saturating_sub(step)
        } else {
            self.grid.scroll_offset().saturating_add(step)
        };
        self.grid.set_scroll_offset(next.min(max));
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        self.screen = Size::new(area.width, area.height);
        self.targets.clear();
        self.sync_dock();

        let search_area = Rect { height: area.height.min(3), ..area };
        let body = Rect {
            y: area.y + search_area.height,
            height: area.height.saturating_sub(search_area.height + 1),
            ..area
        };
        let status_area = Rect {
            y: body.y + body.height,
            height: area.height.saturating_sub(search_area.height + body.height),
            ..area
        };

        self.draw_search(frame, search_area);

        let grid_block = Block::default().borders(Borders::ALL).title("Roster");
        let inner = grid_block.inner(body);
        frame.render_widget(grid_block, body);
        self.grid_area = inner;
        self.grid.resize(Size::new(
            inner.width.saturating_sub(1), // scrollbar column
            inner.height,
        ));
        // Re-clamp after a shrink so a stale offset can't leave the grid
        // pointing past the content.
        let window = self.grid.compute(&self.users);
        let max = window
            .content_height()
            .saturating_sub(inner.height as usize);
        if self.grid.scroll_offset() > max {
            self.grid.set_scroll_offset(max);
        }

        self.draw_grid(frame, inner);
        self.draw_status(frame, status_area);
        self.draw_windows(frame);
        self.draw_queue(frame, status_area);
        if self.help_visible {
            self.draw_help(frame, area);
        }
    }

    fn draw_search(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let title = if self.grid.search().is_empty() {
            "Search (type to filter)".to_string()
        } else {
            format!("Search: {}", self.grid.search())
        };
        frame.render_widget(Block::default().borders(Borders::ALL).title(title), area);
    }

    fn draw_grid(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let window = self.grid.compute(&self.users);

        if let Some(empty) = window.empty_state() {
            let msg = match empty {
                EmptyState::NoEntries => "Nobody here yet.",
                EmptyState::NoMatches => "No users match the search.",
            };
            frame.render_widget(
                Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }

        let cfg = self.grid.config();
        let offset = self.grid.scroll_offset();
        for (i, user) in window.visible.iter().enumerate() {
            let grid_row = window.rows.start + i / window.columns;
            let col = i % window.columns;
            let y = area.y as i64 + (grid_row * window.row_height as usize) as i64 - offset as i64;
            let x = area.x + col as u16 * (cfg.item_width + cfg.gap);
            if y + (window.row_height as i64) <= area.y as i64
                || y >= (area.y + area.height) as i64
            {
                continue; // overscan row, fully outside
            }
            let card = Rect {
                x,
                y: y.max(area.y as i64) as u16,
                width: cfg.item_width,
                height: window.row_height,
            }
            .intersection(area);
            if card.width == 0 || card.height == 0 {
                continue;
            }
            let presence = if user.online { "●" } else { "○" };
            let style = if user.online {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .title(Line::styled(format!("{presence} {}", user.name), style));
            frame.render_widget(block, card);
            self.targets.push((card, Target::Card(user.id)));
        }

        let view = area.height as usize;
        if window.content_height() > view {
            let mut state = ScrollbarState::new(window.content_height().saturating_sub(view))
                .position(offset)
                .viewport_content_length(view);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut state,
            );
        }
    }

    fn draw_status(&mut self, frame: &mut Frame<'_>, area: Rect) {
        if area.height == 0 {
            return;
        }
        let window = self.grid.compute(&self.users);
        let mut parts = vec![format!(
            "{} shown of {} users",
            window.filtered_len,
            self.users.len().saturating_sub(1)
        )];
        if window.truncated {
            parts.push(format!(
                "list capped at {}; narrow the search",
                self.grid.config().max_items
            ));
        }
        parts.push("F1 help".to_string());
        frame.render_widget(
            Paragraph::new(parts.join("  |  ")).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }

    fn draw_windows(&mut self, frame: &mut Frame<'_>) {
        let screen = Rect::new(0, 0, self.screen.width, self.screen.height);
        // oldest slot first, so the most recent window paints on top
        let mut order = self.snapshot.to_show.clone();
        order.sort_by(|a, b| b.queue_index.cmp(&a.queue_index));
        for win in order {
            let (pos, size) = match self.chats.get(&win.id) {
                Some(chat) => (chat.controller.position(), chat.controller.size()),
                None => continue,
            };
            let rect =
                Rect::new(pos.x, pos.y, size.width, size.height).intersection(screen);
            if rect.width < 5 || rect.height < 2 {
                continue;
            }
            let name = self
                .user(win.id)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| format!("#{}", win.id));
            frame.render_widget(Clear, rect);
            let block = Block::default()
                .borders(Borders::ALL)
                .title(name)
                .title_style(Style::default().add_modifier(Modifier::BOLD));
            let inner = block.inner(rect);
            frame.render_widget(block, rect);
            frame.render_widget(
                Paragraph::new("(no messages yet)")
                    .style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            self.targets.push((rect, Target::WindowBody));

            // title-bar controls: [-][x] in the top-right corner
            let close = Rect::new(rect.right().saturating_sub(3), rect.y, 3, 1);
            let minimize = Rect::new(rect.right().saturating_sub(6), rect.y, 3, 1);
            frame.render_widget(Paragraph::new("[x]"), close);
            frame.render_widget(Paragraph::new("[-]"), minimize);
            self.targets.push((minimize, Target::WindowMinimize(win.id)));
            self.targets.push((close, Target::WindowClose(win.id)));

            // everything left of the controls drags the window
            let handle = Rect {
                width: rect.width.saturating_sub(6),
                ..Rect::new(rect.x, rect.y, rect.width, 1)
            };
            if let Some(chat) = self.chats.get_mut(&win.id) {
                chat.controller.set_handle(handle);
            }
        }
    }

    fn draw_queue(&mut self, frame: &mut Frame<'_>, status_area: Rect) {
        if self.snapshot.hidden.is_empty() {
            self.queue_open = false;
            return;
        }
        let label = format!("[{} queued ▲]", self.snapshot.hidden_count());
        let width = label.len() as u16;
        let badge = Rect {
            x: status_area
                .right()
                .saturating_sub(width),
            y: status_area.y,
            width: width.min(status_area.width),
            height: status_area.height.min(1),
        };
        frame.render_widget(
            Paragraph::new(label).style(Style::default().fg(Color::Yellow)),
            badge,
        );
        self.targets.push((badge, Target::OverflowBadge));

        if !self.queue_open {
            return;
        }
        let rows = self.snapshot.hidden.len() as u16;
        let width = 24u16.min(self.screen.width);
        let popover = Rect {
            x: self.screen.width.saturating_sub(width + 1),
            y: badge.y.saturating_sub(rows + 2),
            width,
            height: rows + 2,
        }
        .intersection(Rect::new(0, 0, self.screen.width, self.screen.height));
        frame.render_widget(Clear, popover);
        let block = Block::default().borders(Borders::ALL).title("Queued chats");
        let inner = block.inner(popover);
        frame.render_widget(block, popover);
        let hidden = self.snapshot.hidden.clone();
        for (i, id) in hidden.iter().enumerate() {
            let line = Rect {
                y: inner.y + i as u16,
                height: 1,
                ..inner
            };
            if line.y >= inner.bottom() {
                break;
            }
            let name = self
                .user(*id)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| format!("#{id}"));
            frame.render_widget(Paragraph::new(name), line);
            self.targets.push((line, Target::QueueEntry(*id)));
        }
    }

    fn draw_help(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let width = 46.min(area.width);
        let height = (HELP_TEXT.lines().count() as u16 + 2).min(area.height);
        let rect = Rect {
            x: (area.width.saturating_sub(width)) / 2,
            y: (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };
        frame.render_widget(Clear, rect);
        let block = Block::default().borders(Borders::ALL).title("Help");
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        frame.render_widget(Paragraph::new(HELP_TEXT), inner);
    }
}

const FIRST_NAMES: [&str; 12] = [
    "alex", "bella", "carlos", "dana", "emil", "farah", "gus", "hana", "ivan", "jade", "kara",
    "liam",
];
const LAST_NAMES: [&str; 10] = [
    "stone", "rivera", "kim", "okafor", "novak", "sato", "mora", "lind", "patel", "cruz",
];


fn generate_users(count: usize) -> Vec<ChatUser> {
    (0..count as u32)
        .map(|id| {
            let first = FIRST_NAMES[id as usize % FIRST_NAMES.len()];
            let last = LAST_NAMES[(id as usize / FIRST_NAMES.len()) % LAST_NAMES.len()];
            ChatUser {
                id,
                name: format!("{first}.{last}.{id:03}"),
                // cheap deterministic scatter
                online: id.wrapping_mul(2_654_435_761) % 5 < 3,
            }
        })
        .collect()
}
