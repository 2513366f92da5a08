use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::{App, PaneFocus, format_countdown};
use crate::catalog::{Case, Rarity};
use crate::inventory::SkinInstance;
use crate::opening::OpeningPhase;
use crate::upgrade::{UpgradeOutcome, WheelPhase};

pub fn draw(f: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(9)])
        .split(f.size());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[0]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    draw_cases(f, left_chunks[0], app);
    draw_upgrade(f, left_chunks[1], app);
    draw_locker(f, right_chunks[0], app);
    draw_profile(f, right_chunks[1], app);

    let footer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(6)])
        .split(chunks[1]);

    draw_ticker(f, footer[0], app);
    draw_footer(f, footer[1], app);
}

fn draw_cases(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = pane_block("Cases", app.focus == PaneFocus::Cases);
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let segments = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    draw_case_showcase(f, segments[0], app);
    draw_case_list(f, segments[1], app);
}

fn draw_case_showcase(f: &mut Frame<'_>, area: Rect, app: &App) {
    match app.opening.phase() {
        OpeningPhase::Idle => {
            let placeholder = Paragraph::new("Pick a case below and press Enter to crack it.")
                .wrap(Wrap { trim: true });
            f.render_widget(placeholder, area);
        }
        OpeningPhase::Opening { case, remaining } => {
            let gauge = Gauge::default()
                .block(Block::default().title(case.name.as_str()))
                .ratio(app.opening.progress())
                .gauge_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .bg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                )
                .label(format_countdown(*remaining));
            f.render_widget(gauge, area);
        }
        OpeningPhase::Resolved { won } => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("{} {}", won.icon, won.name),
                    Style::default()
                        .fg(rarity_color(won.rarity))
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(
                        won.rarity.label(),
                        Style::default().fg(rarity_color(won.rarity)),
                    ),
                    Span::raw("  ·  "),
                    Span::styled(
                        format!("{}₵", won.price),
                        Style::default().fg(Color::LightGreen),
                    ),
                ]),
                Line::from(Span::styled(
                    "Enter to tuck it into the locker",
                    Style::default().fg(Color::Gray),
                )),
            ];
            let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
    }
}

fn draw_case_list(f: &mut Frame<'_>, area: Rect, app: &App) {
    let balance = app.wallet.balance();
    let items: Vec<ListItem> = app
        .catalog
        .cases()
        .iter()
        .enumerate()
        .map(|(idx, case)| {
            let mut item = ListItem::new(vec![build_case_line(case, balance)]);
            if idx == app.case_cursor {
                item = item.style(Style::default().fg(Color::Yellow));
            }
            item
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    state.select(Some(app.case_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn build_case_line(case: &Case, balance: u64) -> Line<'static> {
    let price_color = if balance >= case.price {
        Color::LightGreen
    } else {
        Color::Red
    };
    let ceiling = case.pool.iter().map(|s| s.price).max().unwrap_or(0);
    Line::from(vec![
        Span::styled(case.name.clone(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(format!("{}₵", case.price), Style::default().fg(price_color)),
        Span::styled(
            format!("  {} skins, up to {}₵", case.pool.len(), ceiling),
            Style::default().fg(Color::Gray),
        ),
    ])
}

fn draw_upgrade(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = pane_block("Upgrade Wheel", app.focus == PaneFocus::Upgrade);
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let segments = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    draw_wheel_status(f, segments[0], app);
    draw_stake_list(f, segments[1], app);
}

fn draw_wheel_status(f: &mut Frame<'_>, area: Rect, app: &App) {
    match app.wheel.phase() {
        WheelPhase::Idle => {
            let lines = vec![
                Line::from("Stake a skin on a 50/50 flip."),
                Line::from(Span::styled(
                    "A win climbs one rarity tier, a loss keeps the stake.",
                    Style::default().fg(Color::Gray),
                )),
            ];
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
        }
        WheelPhase::Spinning { stake, remaining } => {
            let gauge = Gauge::default()
                .block(Block::default().title(format!("{} on the wheel", stake.name)))
                .ratio(app.wheel.progress())
                .gauge_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .bg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                )
                .label(format_countdown(*remaining));
            f.render_widget(gauge, area);
        }
        WheelPhase::Settled { outcome } => {
            let lines = match outcome {
                UpgradeOutcome::Escalated(skin) => vec![
                    Line::from(Span::styled(
                        format!("✦ {} {}", skin.icon, skin.name),
                        Style::default()
                            .fg(rarity_color(skin.rarity))
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        Span::styled(
                            skin.rarity.label(),
                            Style::default().fg(rarity_color(skin.rarity)),
                        ),
                        Span::raw("  ·  "),
                        Span::styled(
                            format!("{}₵", skin.price),
                            Style::default().fg(Color::LightGreen),
                        ),
                    ]),
                    Line::from(Span::styled(
                        "Enter to re-arm the wheel",
                        Style::default().fg(Color::Gray),
                    )),
                ],
                UpgradeOutcome::Lost => vec![
                    Line::from(Span::styled(
                        "The wheel kept the stake.",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        "Enter to re-arm the wheel",
                        Style::default().fg(Color::Gray),
                    )),
                ],
            };
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
        }
    }
}

fn draw_stake_list(f: &mut Frame<'_>, area: Rect, app: &App) {
    if app.inventory.is_empty() {
        let placeholder =
            Paragraph::new("Locker is empty. Crack a case first.").wrap(Wrap { trim: true });
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .inventory
        .iter()
        .enumerate()
        .map(|(idx, skin)| {
            let mut item = ListItem::new(vec![Line::from(vec![
                Span::styled(
                    format!("{} {}", skin.icon, skin.name),
                    Style::default().fg(rarity_color(skin.rarity)),
                ),
                Span::styled(
                    format!("  {} · {}₵", skin.rarity.label(), skin.price),
                    Style::default().fg(Color::Gray),
                ),
            ])]);
            if idx == app.stake_cursor {
                item = item.style(Style::default().fg(Color::Yellow));
            }
            item
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    state.select(Some(app.stake_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_locker(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = pane_block("Locker", app.focus == PaneFocus::Inventory);
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);

    if app.inventory.is_empty() {
        let paragraph =
            Paragraph::new("Locker empty. Cracked skins land here.").wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner);
        return;
    }

    let segments = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let mut tier_spans: Vec<Span> = Vec::new();
    for rarity in Rarity::ALL {
        let initial = rarity.label().chars().next().unwrap_or('?');
        tier_spans.push(Span::styled(
            format!("{}:{}", initial, app.inventory.count_by_rarity(rarity)),
            Style::default().fg(rarity_color(rarity)),
        ));
        tier_spans.push(Span::raw(" "));
    }
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Items ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{}", app.inventory.len())),
            Span::raw("  |  Value "),
            Span::styled(
                format!("{}₵", app.inventory.total_value()),
                Style::default().fg(Color::LightGreen),
            ),
        ]),
        Line::from(tier_spans),
    ]);
    f.render_widget(header, segments[0]);

    let visible_height = segments[1].height as usize;
    let start = app.inventory_scroll.min(app.inventory.len());
    let end = (start + visible_height).min(app.inventory.len());
    let items: Vec<ListItem> = app
        .inventory
        .iter()
        .skip(start)
        .take(end - start)
        .map(build_locker_row)
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::NONE))
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(list, segments[1]);
}

fn build_locker_row(skin: &SkinInstance) -> ListItem<'static> {
    let timestamp = skin.acquired_local().format("%H:%M:%S");
    let line = Line::from(vec![
        Span::styled(timestamp.to_string(), Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(
            format!("{} {}", skin.icon, skin.name),
            Style::default().fg(rarity_color(skin.rarity)),
        ),
        Span::raw("  "),
        Span::styled(
            skin.rarity.label(),
            Style::default().fg(rarity_color(skin.rarity)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{}₵", skin.price),
            Style::default().fg(Color::LightGreen),
        ),
    ]);
    ListItem::new(vec![line])
}

fn draw_profile(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = pane_block("Profile", app.focus == PaneFocus::Profile);
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let legendaries = app.inventory.count_by_rarity(Rarity::Legendary);
    let epics = app.inventory.count_by_rarity(Rarity::Epic);
    let lines = vec![
        Line::from(vec![
            Span::styled("Balance ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}₵", app.wallet.balance()),
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Skins ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{}", app.inventory.len())),
            Span::raw("  |  ★"),
            Span::styled(
                format!("{}", legendaries),
                Style::default().fg(rarity_color(Rarity::Legendary)),
            ),
            Span::raw("  ✦"),
            Span::styled(
                format!("{}", epics),
                Style::default().fg(rarity_color(Rarity::Epic)),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Admin top-up",
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::raw("Amount: "),
            Span::styled(
                format!("{}▌", app.admin_input),
                Style::default().fg(Color::LightCyan),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner);
}

fn draw_ticker(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .title("Ticker")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let mut spans = Vec::new();
    spans.push(Span::styled(
        format!("Balance {}₵", app.wallet.balance()),
        Style::default().fg(Color::LightGreen),
    ));
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Locker {}", app.inventory.len()),
        Style::default().fg(Color::LightCyan),
    ));
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Value {}₵", app.inventory.total_value()),
        Style::default().fg(Color::Yellow),
    ));
    match app.opening.phase() {
        OpeningPhase::Opening { .. } => {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                "reveal running",
                Style::default().fg(Color::Magenta),
            ));
        }
        OpeningPhase::Resolved { .. } => {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                "drop waiting",
                Style::default().fg(Color::Yellow),
            ));
        }
        OpeningPhase::Idle => {}
    }
    match app.wheel.phase() {
        WheelPhase::Spinning { .. } => {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                "wheel spinning",
                Style::default().fg(Color::Magenta),
            ));
        }
        WheelPhase::Settled { .. } => {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                "spin settled",
                Style::default().fg(Color::Yellow),
            ));
        }
        WheelPhase::Idle => {}
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);
    f.render_widget(paragraph, inner);
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Keys & Feed")
        .border_style(Style::default().fg(Color::Gray));
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let instruction_lines = vec![
        Line::from("Tab cycle focus | Q quit"),
        Line::from("Cases: ↑↓ select  Enter crack/collect"),
        Line::from("Upgrade: ↑↓ pick stake  Enter spin/re-arm  |  Locker: ↑↓ scroll"),
        Line::from("Profile: digits amount  Enter credit  Esc clear"),
    ];
    let instruction = Paragraph::new(instruction_lines).wrap(Wrap { trim: true });
    f.render_widget(instruction, columns[0]);

    let mut message_lines: Vec<Line> = Vec::new();
    for msg in app.messages.iter() {
        message_lines.push(Line::from(Span::raw(msg.clone())));
    }
    if message_lines.is_empty() {
        message_lines.push(Line::from(Span::styled(
            "Quiet so far...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let feed = Paragraph::new(message_lines).wrap(Wrap { trim: true });
    f.render_widget(feed, columns[1]);
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::Gray,
        Rarity::Uncommon => Color::Green,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
        Rarity::Legendary => Color::Yellow,
    }
}

fn pane_block<'a>(title: &'a str, focused: bool) -> Block<'a> {
    let border_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .title(Span::styled(title, Style::default().fg(Color::White)))
        .borders(Borders::ALL)
        .border_style(border_style)
}
