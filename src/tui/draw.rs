use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ThemeKind;
use crate::hit::{study_layout, Control};
use crate::router::View;
use crate::session::Side;
use crate::store::KvStore;
use crate::view::Screen;

use super::App;

// ---------------- Theme ----------------
/// Colors by role: chrome, list cursor, and the two card sides.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub bar: Color,
    pub cursor: Color,
    pub focus: Color,
    pub front: Color,
    pub back: Color,
    pub progress: Color,
    pub alert: Color,
}

pub fn theme_of(kind: ThemeKind) -> Theme {
    match kind {
        ThemeKind::Dark => Theme {
            text: Color::Rgb(228, 226, 218),
            dim: Color::Rgb(128, 132, 140),
            bar: Color::Rgb(28, 32, 38),
            cursor: Color::Rgb(52, 60, 74),
            focus: Color::Rgb(240, 180, 80),
            front: Color::Rgb(110, 190, 230),
            back: Color::Rgb(150, 210, 140),
            progress: Color::Rgb(200, 160, 230),
            alert: Color::Rgb(240, 110, 100),
        },
        ThemeKind::Light => Theme {
            text: Color::Rgb(36, 38, 44),
            dim: Color::Rgb(110, 114, 122),
            bar: Color::Rgb(228, 232, 238),
            cursor: Color::Rgb(200, 214, 232),
            focus: Color::Rgb(196, 120, 0),
            front: Color::Rgb(20, 110, 180),
            back: Color::Rgb(40, 140, 70),
            progress: Color::Rgb(120, 70, 170),
            alert: Color::Rgb(200, 50, 40),
        },
    }
}

// ---------------- Layout ----------------
pub fn ui<S: KvStore>(f: &mut Frame, app: &mut App<S>) {
    // header + main + footer
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, v[0], app);
    match app.session.view() {
        View::DeckList => draw_deck_list(f, v[1], app),
        View::CardList => draw_card_list(f, v[1], app),
        View::Study => draw_study(f, v[1], app),
    }
    draw_footer(f, v[2], app);

    if app.form.is_some() {
        draw_form(f, app);
    }
    if let Some(notice) = app.modal.notice {
        draw_popup(f, app.theme, " Notice ", &notice.to_string());
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1]);
    horiz[1]
}

fn draw_header<S: KvStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let th = app.theme;
    let mut segs = vec![
        Span::styled(
            " Flashcards ",
            Style::default().fg(th.focus).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | view:", Style::default().fg(th.dim)),
        Span::styled(app.session.view().as_str(), Style::default().fg(th.text)),
    ];
    match &app.screen {
        Screen::DeckList { rows } => {
            let cards: usize = rows.iter().map(|r| r.card_count).sum();
            segs.push(Span::styled(" | decks:", Style::default().fg(th.dim)));
            segs.push(Span::styled(
                format!("{} cards:{}", rows.len(), cards),
                Style::default().fg(th.text),
            ));
        }
        Screen::CardList { title, rows } => {
            segs.push(Span::styled(" | deck:", Style::default().fg(th.dim)));
            segs.push(Span::styled(title.clone(), Style::default().fg(th.text)));
            segs.push(Span::styled(
                format!(" ({} cards)", rows.len()),
                Style::default().fg(th.dim),
            ));
        }
        Screen::Study { deck, .. } => {
            segs.push(Span::styled(" | deck:", Style::default().fg(th.dim)));
            segs.push(Span::styled(deck.clone(), Style::default().fg(th.text)));
        }
    }
    let para = Paragraph::new(Line::from(segs)).style(Style::default().bg(th.bar).fg(th.text));
    f.render_widget(para, area);
}

fn draw_footer<S: KvStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let th = app.theme;
    let line = if let Some(msg) = &app.status {
        Line::from(Span::styled(format!(" ! {msg}"), Style::default().fg(th.alert)))
    } else {
        let tips = if app.form.is_some() {
            " [Tab]next field  [Enter]save  [Esc]close "
        } else {
            match app.screen {
                Screen::DeckList { .. } => {
                    " [j/k]move  [Enter/o]open  [n]new deck  [d]delete  [R]reload  [q]quit "
                }
                Screen::CardList { .. } => {
                    " [j/k]move  [n]new card  [d]delete  [s]study  [Esc/b]decks  [q]quit "
                }
                Screen::Study { .. } => {
                    " [Space/click]flip  [h/←]prev  [l/→]next  [Esc/b]cards  [q]quit "
                }
            }
        };
        Line::from(Span::styled(tips, Style::default().fg(th.dim)))
    };
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(th.bar)),
        area,
    );
}

fn list_block(title: String, th: Theme) -> Block<'static> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(th.focus)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(th.dim))
}

fn draw_deck_list<S: KvStore>(f: &mut Frame, area: Rect, app: &mut App<S>) {
    let th = app.theme;
    let Screen::DeckList { rows } = &app.screen else {
        return;
    };
    let block = list_block(" Decks ".into(), th);
    if rows.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "No decks yet. Press n to create one.",
            Style::default().fg(th.dim),
        )))
        .block(block);
        f.render_widget(para, area);
        return;
    }
    let items: Vec<ListItem> = rows
        .iter()
        .map(|r| {
            let count = if r.card_count == 1 {
                "1 card".to_string()
            } else {
                format!("{} cards", r.card_count)
            };
            ListItem::new(Line::from(vec![
                Span::styled(r.name.clone(), Style::default().fg(th.text)),
                Span::styled(format!("  ({count})"), Style::default().fg(th.dim)),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(th.cursor))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_card_list<S: KvStore>(f: &mut Frame, area: Rect, app: &mut App<S>) {
    let th = app.theme;
    let Screen::CardList { title, rows } = &app.screen else {
        return;
    };
    let block = list_block(format!(" {title} "), th);
    if rows.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "No cards yet. Press n to add one.",
            Style::default().fg(th.dim),
        )))
        .block(block);
        f.render_widget(para, area);
        return;
    }
    let items: Vec<ListItem> = rows
        .iter()
        .map(|r| ListItem::new(Span::styled(r.front.clone(), Style::default().fg(th.text))))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(th.cursor))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_study<S: KvStore>(f: &mut Frame, area: Rect, app: &mut App<S>) {
    let th = app.theme;
    let Screen::Study {
        text,
        side,
        progress,
        ..
    } = &app.screen
    else {
        return;
    };
    let region = centered_rect(70, area.height.saturating_mul(3) / 4, area);
    let layout = study_layout(region);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(th.dim))
        .title_top(
            Line::from(Span::styled(
                format!(" {progress} "),
                Style::default().fg(th.progress),
            ))
            .right_aligned(),
        );
    f.render_widget(block, region);

    if let Some(text_area) = layout.tree.area(layout.text) {
        let (label, color) = match side {
            Side::Front => ("FRONT", th.front),
            Side::Back => ("BACK", th.back),
        };
        let pad = text_area.height.saturating_sub(3) / 2;
        let mut lines: Vec<Line> = vec![Line::from(Span::styled(
            label,
            Style::default().fg(color),
        ))];
        lines.extend((0..pad).map(|_| Line::from("")));
        lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )));
        let para = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        f.render_widget(para, text_area);
    }

    let study = app.session.study();
    let count = app
        .session
        .open_deck()
        .map(|d| d.cards.len())
        .unwrap_or(0);
    for c in [Control::Prev, Control::Next, Control::Back] {
        let Some(rect) = layout.tree.area(layout.control(c)) else {
            continue;
        };
        let enabled = match c {
            Control::Prev => study.index > 0,
            Control::Next => study.index + 1 < count,
            Control::Back => true,
        };
        let style = if enabled {
            Style::default().fg(th.focus)
        } else {
            Style::default().fg(th.dim)
        };
        f.render_widget(
            Paragraph::new(Span::styled(format!("[ {} ]", c.label()), style)),
            rect,
        );
    }

    app.study_layout = Some(layout);
}

fn draw_form<S: KvStore>(f: &mut Frame, app: &mut App<S>) {
    let th = app.theme;
    let Some(form) = app.form.as_mut() else {
        return;
    };
    let height = form.fields.len() as u16 * 3 + 2;
    let area = centered_rect(60, height, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(form.title(), Style::default().fg(th.focus)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(th.dim));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); form.fields.len()])
        .split(inner);
    let focus = form.focus;
    let labels: Vec<&'static str> = (0..form.fields.len()).map(|i| form.label(i)).collect();
    for (i, field) in form.fields.iter_mut().enumerate() {
        let border = if i == focus { th.focus } else { th.dim };
        field.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", labels[i])),
        );
        field.set_cursor_style(if i == focus {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });
        f.render_widget(&*field, rows[i]);
    }
}

fn draw_popup(f: &mut Frame, th: Theme, title: &str, msg: &str) {
    let area = centered_rect(50, 5, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(title.to_string(), Style::default().fg(th.alert)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(th.alert));
    let lines = vec![
        Line::from(Span::styled(msg.to_string(), Style::default().fg(th.text))),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(th.dim),
        )),
    ];
    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(para, area);
}
