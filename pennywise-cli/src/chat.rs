use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pennywise_core::{time::now_in, Intent, Reply, Session, Tier};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use std::io::{self, Stdout};
use std::path::PathBuf;

/// One line of conversation on screen.
enum Entry {
    You(String),
    Bot(Reply),
    Note(String),
}

/// Daily transcript under ~/.pennywise/chat/YYYY-MM-DD.md
struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    fn open_today(session: &Session) -> Result<Self> {
        let dir = crate::state::ensure_chat_dir()?;
        let today = now_in(session.settings().timezone).format("%Y-%m-%d");
        Ok(Self {
            path: dir.join(format!("{today}.md")),
        })
    }

    fn append(&self, who: &str, msg: &str) -> Result<()> {
        use std::io::Write;
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            f,
            "- {} [{}] {}",
            chrono::Utc::now().to_rfc3339(),
            who,
            msg.replace('\n', " ")
        )?;
        Ok(())
    }
}

/// Spend and budget health shown above the conversation.
fn status_line(session: &Session) -> String {
    let ledger = session.ledger();
    let mut line = format!(
        "{} transactions | spent {}",
        ledger.len(),
        session.settings().money(ledger.total_spent())
    );
    let over: Vec<&str> = session
        .statuses()
        .iter()
        .filter(|s| s.tier == Tier::Exceeded)
        .map(|s| s.category.label())
        .collect();
    if !over.is_empty() {
        line.push_str(&format!(" | over budget: {}", over.join(", ")));
    }
    line
}

fn intent_color(intent: Intent) -> Color {
    match intent {
        Intent::AddTransaction => Color::Green,
        Intent::BudgetStatus | Intent::Insights => Color::Yellow,
        Intent::Default | Intent::Help => Color::Gray,
        _ => Color::Magenta,
    }
}

pub fn run_chat(session: &mut Session) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chat_loop(&mut terminal, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn chat_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, session: &mut Session) -> Result<()> {
    let now = now_in(session.settings().timezone);
    let mut entries = vec![Entry::Bot(session.reply_at("hi", now))];
    let mut input = String::new();

    let log = ChatLog::open_today(session)?;
    log.append("system", &format!("session_start transactions={}", session.ledger().len()))?;

    loop {
        let status = status_line(session);
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(3),
                ])
                .split(f.area());

            let status_bar = Paragraph::new(status.as_str())
                .style(Style::default().fg(Color::Cyan))
                .block(Block::default().borders(Borders::ALL).title("pennywise"));
            f.render_widget(status_bar, chunks[0]);

            let mut lines: Vec<Line> = Vec::new();
            for e in &entries {
                let (tag, color, text) = match e {
                    Entry::You(t) => ("you", Color::Cyan, t.as_str()),
                    Entry::Bot(r) => ("bot", intent_color(r.intent), r.text.as_str()),
                    Entry::Note(t) => ("--", Color::DarkGray, t.as_str()),
                };
                let mut body = text.lines();
                lines.push(Line::from(vec![
                    Span::styled(format!("{tag}: "), Style::default().fg(color)),
                    Span::raw(body.next().unwrap_or("")),
                ]));
                lines.extend(body.map(Line::raw));
                lines.push(Line::raw(""));
            }
            let history = Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL).title("Enter=send  Esc=quit  /help"))
                .wrap(Wrap { trim: false });
            f.render_widget(history, chunks[1]);

            let input_widget = Paragraph::new(input.as_str())
                .block(Block::default().borders(Borders::ALL).title("message"));
            f.render_widget(input_widget, chunks[2]);
        })?;

        if !event::poll(std::time::Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Esc => break,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Enter => {
                let text = input.trim().to_string();
                input.clear();
                if text.is_empty() {
                    continue;
                }
                log.append("user", &text)?;
                if let Some(note) = handle_slash(&text, &log) {
                    if text == "/clear" {
                        entries.clear();
                    }
                    log.append("system", &note)?;
                    entries.push(Entry::Note(note));
                } else {
                    let reply = session.reply_at(&text, now_in(session.settings().timezone));
                    log.append("assistant", &reply.text)?;
                    entries.push(Entry::You(text));
                    entries.push(Entry::Bot(reply));
                }
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
    }

    log.append("system", &format!("session_end transactions={}", session.ledger().len()))?;
    Ok(())
}

fn handle_slash(input: &str, log: &ChatLog) -> Option<String> {
    let s = input.trim();
    if !s.starts_with('/') {
        return None;
    }
    match s {
        "/help" => Some(
            "Type messages like 'Add 500 for groceries', 'budget', 'summary', 'top', 'tips', 'recent'.\n\
Commands: /help /log /clear"
                .to_string(),
        ),
        "/log" => Some(format!("Transcript: {}", log.path.display())),
        "/clear" => Some("Conversation cleared (ledger kept).".to_string()),
        _ => Some("Unknown command. Try /help".to_string()),
    }
}
