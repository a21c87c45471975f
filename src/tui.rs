//! TUI (Terminal User Interface) front end.
//!
//! # Architecture
//! - `TuiInterface`: owns the terminal and renders a [`BoardDisplay`]
//! - [`run`]: the event loop feeding key presses to the controller
//! - [`drive`]: the same loop over any event stream, with a redraw callback
//!
//! # Event loop
//! One `tokio::select!` waits on three things: the next terminal event, the
//! validation in flight (at most one), and the next timer deadline. Keys that
//! arrive while a word is being checked still reach the controller, which
//! drops them.

use crate::display::{BoardDisplay, Cell, Marker, Outcome};
use crate::error::GameError;
use crate::game_state::{GameController, Key, KeyOutcome};
use crate::word::WORD_LENGTH;
use crate::word_source::Validator;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{Stream, StreamExt};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::time::{Duration, Instant};

const IDLE_TICK_MS: u64 = 500;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const WIN_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

type PendingValidation<'a> = Pin<Box<dyn Future<Output = Result<bool, GameError>> + Send + 'a>>;

/// A terminal event, reduced to what the game cares about.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    Quit,
}

/// Translate a crossterm event. Only key presses count; `Esc` and `Ctrl-C`
/// quit, other chords are dropped.
#[must_use]
pub fn translate_event(event: &Event) -> Option<Input> {
    let Event::Key(key) = event else {
        return None;
    };
    // Release and Repeat events would double every letter
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('c' | 'C') if ctrl => Some(Input::Quit),
        _ if ctrl || alt => None,
        // Garbage from escape sequences when the terminal regains focus
        KeyCode::Char(c) if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD => None,
        KeyCode::Char(c) => Some(Input::Key(Key::from_name(&c.to_string()))),
        KeyCode::Enter => Some(Input::Key(Key::Enter)),
        KeyCode::Backspace => Some(Input::Key(Key::Backspace)),
        other => Some(Input::Key(Key::Other(format!("{other:?}")))),
    }
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");
        Ok(Self { terminal })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    pub fn draw(&mut self, board: &BoardDisplay) -> Result<(), io::Error> {
        self.terminal.draw(|f| Self::render_static(f, board))?;
        Ok(())
    }

    fn draw_or_log(&mut self, board: &BoardDisplay) {
        if let Err(e) = self.draw(board) {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete layout for `board`.
    pub fn render_static(f: &mut Frame, board: &BoardDisplay) {
        let rows = board.rows().count() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                     // Title
                Constraint::Length(rows * ROW_SPACING + 1), // Board
                Constraint::Min(3),                        // Messages
                Constraint::Length(3),                     // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], board);
        Self::render_board(f, chunks[1], board);
        Self::render_messages(f, chunks[2], board);
        Self::render_instructions(f, chunks[3], board);
    }

    fn render_title(f: &mut Frame, area: Rect, board: &BoardDisplay) {
        let style = match board.outcome() {
            Some(Outcome::Won) => WIN_STYLE,
            Some(Outcome::Lost) => LOSS_STYLE,
            None => HEADER_STYLE,
        };
        let title = Paragraph::new(board.title())
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_board(f: &mut Frame, area: Rect, board: &BoardDisplay) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        for (row_index, row) in board.rows().enumerate() {
            let y = inner.y + (row_index as u16 * ROW_SPACING);
            if y >= inner.y + inner.height {
                return;
            }

            let mut spans = vec![Span::raw("  ")];
            for cell in row.iter().take(WORD_LENGTH) {
                spans.push(Span::styled(
                    format!(" {} ", cell.letter.unwrap_or(' ')),
                    Self::cell_style(cell),
                ));
                spans.push(Span::raw(" "));
            }
            f.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect {
                    x: inner.x,
                    y,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }

    /// Invalid wins over the scoring markers so a rejected word flashes red.
    fn cell_style(cell: &Cell) -> Style {
        let (bg, fg) = if cell.has(Marker::Invalid) {
            (Color::Red, Color::White)
        } else if cell.has(Marker::Right) {
            (Color::Green, Color::Black)
        } else if cell.has(Marker::Close) {
            (Color::Yellow, Color::Black)
        } else if cell.has(Marker::Wrong) {
            (Color::Gray, Color::White)
        } else {
            (Color::DarkGray, Color::White)
        };
        Style::default().fg(fg).bg(bg)
    }

    fn render_messages(f: &mut Frame, area: Rect, board: &BoardDisplay) {
        let mut lines = Vec::new();
        if board.is_loading() {
            lines.push(Line::from(Span::styled("Checking word...", INFO_STYLE)));
        }
        if let Some(answer) = board.answer() {
            lines.push(Line::from(Span::styled(answer.to_string(), LOSS_STYLE)));
        }
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, board: &BoardDisplay) {
        let text = if board.outcome().is_some() {
            "ESC: Quit"
        } else {
            "Type a 5-letter word | ENTER: Submit | BACKSPACE: Delete | ESC: Quit"
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Play until the player quits. A failed validation ends the session.
pub async fn run<V>(
    tui: &mut TuiInterface,
    game: &mut GameController<BoardDisplay>,
    validator: &V,
) -> Result<(), GameError>
where
    V: Validator + ?Sized,
{
    drive(EventStream::new(), game, validator, |board| tui.draw_or_log(board)).await
}

/// Feed `events` to the controller until a quit key or the end of the stream.
/// `redraw` sees the board before every wait.
pub async fn drive<S, V, R>(
    mut events: S,
    game: &mut GameController<BoardDisplay>,
    validator: &V,
    mut redraw: R,
) -> Result<(), GameError>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
    V: Validator + ?Sized,
    R: FnMut(&BoardDisplay),
{
    let mut pending: Option<PendingValidation<'_>> = None;

    loop {
        redraw(game.display());
        let wake = game
            .next_timer_deadline()
            .unwrap_or_else(|| Instant::now() + Duration::from_millis(IDLE_TICK_MS));

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => match translate_event(&event) {
                    Some(Input::Quit) => {
                        info_log!("Quit requested");
                        return Ok(());
                    }
                    Some(Input::Key(key)) => {
                        if let KeyOutcome::Submit(word) = game.handle_key(key) {
                            let guess = word.to_string();
                            pending = Some(Box::pin(async move { validator.is_valid(&guess).await }));
                        }
                    }
                    None => {}
                },
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            verdict = async {
                match pending.as_mut() {
                    Some(validation) => validation.await,
                    None => std::future::pending().await,
                }
            }, if pending.is_some() => {
                pending = None;
                game.complete_submission(verdict?);
            },
            _ = tokio::time::sleep_until(wake.into()) => {
                game.run_due_timers(Instant::now());
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::GameDisplay;
    use crate::game_state::{GameSettings, GameStatus};
    use crate::word::Word;
    use crate::word_source::OfflineDictionary;
    use crate::wordbank::load_wordbank_from_str;
    use async_trait::async_trait;
    use crossterm::event::KeyEvent;
    use futures::channel::mpsc::{UnboundedSender, unbounded};
    use ratatui::backend::TestBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen_text(board: &BoardDisplay) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| TuiInterface::render_static(f, board))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_translate_letters_and_controls() {
        assert_eq!(
            translate_event(&press(KeyCode::Char('a'))),
            Some(Input::Key(Key::Letter('A')))
        );
        assert_eq!(
            translate_event(&press(KeyCode::Enter)),
            Some(Input::Key(Key::Enter))
        );
        assert_eq!(
            translate_event(&press(KeyCode::Backspace)),
            Some(Input::Key(Key::Backspace))
        );
        assert_eq!(
            translate_event(&press(KeyCode::Char('7'))),
            Some(Input::Key(Key::Other("7".to_string())))
        );
        assert_eq!(
            translate_event(&press(KeyCode::Tab)),
            Some(Input::Key(Key::Other("Tab".to_string())))
        );
    }

    #[test]
    fn test_translate_quit_keys() {
        assert_eq!(translate_event(&press(KeyCode::Esc)), Some(Input::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate_event(&ctrl_c), Some(Input::Quit));
    }

    #[test]
    fn test_translate_drops_noise() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(translate_event(&release), None);

        let alt = Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT));
        assert_eq!(translate_event(&alt), None);

        assert_eq!(translate_event(&press(KeyCode::Char('\u{FFFD}'))), None);
        assert_eq!(translate_event(&Event::FocusGained), None);
        assert_eq!(translate_event(&Event::Resize(80, 24)), None);
    }

    #[test]
    fn test_render_letters_and_title() {
        let mut board = BoardDisplay::new(6);
        board.set_loading(false);
        board.set_cell_text(0, Some('Q'));
        let text = screen_text(&board);
        assert!(text.contains("WORDLE"));
        assert!(text.contains(" Q "));
        assert!(!text.contains("Checking word..."));
    }

    #[test]
    fn test_render_loading_and_loss() {
        let mut board = BoardDisplay::new(6);
        assert!(screen_text(&board).contains("Checking word..."));

        board.set_loading(false);
        board.set_title("You Lose!");
        board.set_outcome(Outcome::Lost);
        board.reveal_answer("Correct Answer: CRANE");
        let text = screen_text(&board);
        assert!(text.contains("You Lose!"));
        assert!(text.contains("Correct Answer: CRANE"));
    }

    #[test]
    fn test_cell_style_priority() {
        let mut cell = Cell::default();
        assert_eq!(TuiInterface::cell_style(&cell).bg, Some(Color::DarkGray));
        cell.markers.insert(Marker::Close);
        assert_eq!(TuiInterface::cell_style(&cell).bg, Some(Color::Yellow));
        cell.markers.insert(Marker::Invalid);
        assert_eq!(TuiInterface::cell_style(&cell).bg, Some(Color::Red));
    }

    type EventSender = UnboundedSender<io::Result<Event>>;

    fn game(invalid_flash_ms: u64) -> GameController<BoardDisplay> {
        GameController::new(
            Word::parse("CRANE").unwrap(),
            BoardDisplay::new(6),
            GameSettings {
                rows: 6,
                invalid_flash: Duration::from_millis(invalid_flash_ms),
            },
        )
    }

    fn dictionary() -> OfflineDictionary {
        OfflineDictionary::new(load_wordbank_from_str("crane\nslate\ntrace\n")).unwrap()
    }

    fn send(tx: &EventSender, code: KeyCode) {
        tx.unbounded_send(Ok(press(code))).unwrap();
    }

    fn send_word(tx: &EventSender, word: &str) {
        for c in word.chars() {
            send(tx, KeyCode::Char(c));
        }
        send(tx, KeyCode::Enter);
    }

    async fn pause(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test]
    async fn test_loop_scores_guess_and_quits_on_esc() {
        let validator = dictionary();
        let mut game = game(1000);
        let (tx, rx) = unbounded();
        let mut redraws = 0;

        let (result, ()) = tokio::join!(
            drive(rx, &mut game, &validator, |_| redraws += 1),
            async move {
                send_word(&tx, "slate");
                pause(50).await;
                send(&tx, KeyCode::Esc);
            }
        );

        assert!(result.is_ok());
        assert!(redraws > 6);
        assert_eq!(game.display().row_text(0), "SLATE");
        assert!(game.display().cell(1).unwrap().has(Marker::Wrong));
        assert!(game.display().cell(2).unwrap().has(Marker::Right));
        assert!(game.state().guess.is_empty());
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(!game.display().is_loading());
    }

    #[tokio::test]
    async fn test_loop_clears_invalid_flash_on_timer() {
        let validator = dictionary();
        let mut game = game(20);
        let (tx, rx) = unbounded();
        let mut saw_invalid = false;

        let (result, ()) = tokio::join!(
            drive(rx, &mut game, &validator, |board| {
                saw_invalid |= board.cells().iter().any(|c| c.has(Marker::Invalid));
            }),
            async move {
                send_word(&tx, "zzzzz");
                pause(200).await;
                send(&tx, KeyCode::Esc);
            }
        );

        assert!(result.is_ok());
        assert!(saw_invalid);
        assert!(game.display().cells().iter().all(|c| !c.has(Marker::Invalid)));
        assert!(game.next_timer_deadline().is_none());
        assert_eq!(game.state().guess, "ZZZZZ");
        assert_eq!(game.state().cursor, Some(4));
    }

    /// Validator that counts calls and answers only when released.
    struct GatedValidator {
        calls: AtomicUsize,
        gate: tokio::sync::Notify,
    }

    #[async_trait]
    impl Validator for GatedValidator {
        async fn is_valid(&self, _word: &str) -> Result<bool, GameError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_loop_runs_one_validation_and_drops_keys_meanwhile() {
        let validator = GatedValidator {
            calls: AtomicUsize::new(0),
            gate: tokio::sync::Notify::new(),
        };
        let mut game = game(1000);
        let (tx, rx) = unbounded();

        let (result, ()) = tokio::join!(
            drive(rx, &mut game, &validator, |_| {}),
            async {
                send_word(&tx, "slate");
                send(&tx, KeyCode::Char('x'));
                send(&tx, KeyCode::Backspace);
                send(&tx, KeyCode::Enter);
                pause(50).await;
                assert_eq!(validator.calls.load(Ordering::SeqCst), 1);
                validator.gate.notify_one();
                pause(50).await;
                send(&tx, KeyCode::Esc);
            }
        );

        assert!(result.is_ok());
        assert_eq!(validator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(game.display().row_text(0), "SLATE");
        assert_eq!(game.display().row_text(1), "_____");
        assert!(game.display().cell(0).unwrap().has(Marker::Wrong));
        assert!(game.state().guess.is_empty());
        assert_eq!(game.state().cursor, Some(4));
    }

    #[tokio::test]
    async fn test_loop_ends_with_the_stream() {
        let validator = dictionary();
        let mut game = game(1000);
        let (tx, rx) = unbounded();
        send(&tx, KeyCode::Char('c'));
        drop(tx);

        drive(rx, &mut game, &validator, |_| {}).await.unwrap();
        assert_eq!(game.state().guess, "C");
    }

    #[tokio::test]
    async fn test_loop_returns_terminal_errors() {
        let validator = dictionary();
        let mut game = game(1000);
        let (tx, rx) = unbounded();
        tx.unbounded_send(Err(io::Error::other("terminal closed")))
            .unwrap();

        let result = drive(rx, &mut game, &validator, |_| {}).await;
        assert!(matches!(result, Err(GameError::Io(_))));
    }
}
