use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use roster_core::domain::RegistrationPhase;
use roster_core::repositories::RosterStore;
use roster_core::services::{GateStatus, Pacer, RandomSource};

use crate::app::{App, Parameter, Screen};
use crate::theme::Theme;

// Paced work blocks the draw loop, so the indicator is static
const BUSY_MARK: &str = "◔";

pub fn render<S, R, P>(frame: &mut Frame, app: &App<S, R, P>)
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    let theme = Theme::default();

    match &app.screen {
        Screen::Registration => render_registration(frame, app, &theme),
        Screen::AdminGate => render_admin_gate(frame, app, &theme),
        Screen::Dashboard => render_dashboard(frame, app, &theme),
        Screen::ConfirmClear => {
            render_dashboard(frame, app, &theme);
            render_confirm_clear(frame, app.roster.participants().len(), &theme);
        }
        Screen::Message(msg, is_error) => {
            match app.message_backdrop() {
                Screen::Registration => render_registration(frame, app, &theme),
                Screen::AdminGate => render_admin_gate(frame, app, &theme),
                _ => render_dashboard(frame, app, &theme),
            }
            render_message(frame, msg, *is_error, &theme);
        }
    }
}

fn render_registration<S, R, P>(frame: &mut Frame, app: &App<S, R, P>, theme: &Theme)
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(" NODE ENTRY ")
        .title_style(theme.title);

    frame.render_widget(block, area);

    let card = center_rect(area, 60, 14);

    match app.registered() {
        Some(participant) => {
            let badge = theme.group_badge(participant.group_number);
            let text = Paragraph::new(vec![
                Line::from(Span::styled("✔ ASSIGNMENT COMPLETE", theme.success)),
                Line::raw(""),
                Line::from(vec![
                    Span::styled("Welcome, ", theme.muted),
                    Span::styled(participant.name.as_str(), theme.normal),
                ]),
                Line::raw(""),
                Line::from(Span::styled("TEAM ID", theme.muted)),
                Line::from(Span::styled(format!("[ {} ]", participant.group_number), badge)),
                Line::raw(""),
                Line::from(vec![
                    Span::styled("Your teammates are participants assigned to ", theme.normal),
                    Span::styled(format!("Group #{}", participant.group_number), theme.accent),
                ]),
                Line::from(Span::styled(participant.id.as_str(), theme.muted)),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

            frame.render_widget(text, card);
        }
        None => {
            let layout = Layout::default()
                .constraints([
                    Constraint::Length(2), // Prompt
                    Constraint::Length(3), // Input
                    Constraint::Length(2), // Error
                    Constraint::Length(2), // Action
                    Constraint::Min(0),
                ])
                .split(card);

            let prompt = Paragraph::new("Enter your identity to receive group assignment")
                .style(theme.muted)
                .alignment(Alignment::Center);
            frame.render_widget(prompt, layout[0]);

            let rejected = matches!(app.registration, RegistrationPhase::DuplicateRejected(_));
            let input_display = if app.name_input.is_empty() {
                Span::styled("e.g. ALEX RIVERA", theme.muted)
            } else {
                Span::styled(app.name_input.to_uppercase(), theme.title)
            };
            let input = Paragraph::new(Line::from(input_display)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if rejected { theme.danger } else { theme.border })
                    .title(" Full Identity Name "),
            );
            frame.render_widget(input, layout[1]);

            if rejected {
                let error = Paragraph::new("⚠ IDENTITY ALREADY REGISTERED")
                    .style(theme.danger)
                    .alignment(Alignment::Left);
                frame.render_widget(error, layout[2]);
            }

            let action = match &app.registration {
                RegistrationPhase::Validating(_) => Line::from(vec![
                    Span::styled(BUSY_MARK, theme.title),
                    Span::styled(" Assigning group...", theme.title),
                ]),
                _ if app.can_submit_name() => {
                    Line::from(Span::styled("[ Enter ] Initialize Registration", theme.selected))
                }
                _ => Line::from(Span::styled("[ Enter ] Initialize Registration", theme.muted)),
            };
            frame.render_widget(Paragraph::new(action).alignment(Alignment::Center), layout[3]);
        }
    }

    let footer_area = footer_rect(area);
    let hints = if app.registered().is_some() {
        vec![(" Enter ", "New Registration"), (" Tab ", "Admin"), (" Esc ", "Quit")]
    } else {
        vec![(" Enter ", "Register"), (" Tab ", "Admin"), (" Esc ", "Quit")]
    };
    frame.render_widget(key_hints(&hints, theme), footer_area);
}

fn render_admin_gate<S, R, P>(frame: &mut Frame, app: &App<S, R, P>, theme: &Theme)
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(" NOVAGROUP ADMIN ")
        .title_style(theme.title);

    frame.render_widget(block, area);

    let card = center_rect(area, 50, 9);
    let layout = Layout::default()
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Status
            Constraint::Min(0),
        ])
        .split(card);

    let masked = "•".repeat(app.passcode_input.chars().count());
    let input = Paragraph::new(if masked.is_empty() {
        Span::styled("Enter Secure Code", theme.muted)
    } else {
        Span::styled(masked, theme.title)
    })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(" Access Credentials "),
    );
    frame.render_widget(input, layout[0]);

    let (status_style, prefix) = match app.gate_status {
        GateStatus::Idle => (theme.normal, ""),
        GateStatus::Checking => (theme.warning, BUSY_MARK),
        GateStatus::Granted => (theme.success, "✔"),
        GateStatus::Denied => (theme.danger, "✖"),
    };
    let status = Paragraph::new(format!("{} {}", prefix, app.gate_status.as_str()).trim().to_string())
        .style(status_style)
        .alignment(Alignment::Center);
    frame.render_widget(status, layout[2]);

    frame.render_widget(
        key_hints(&[(" Enter ", "Authorize"), (" Esc ", "Back")], theme),
        footer_rect(area),
    );
}

fn render_dashboard<S, R, P>(frame: &mut Frame, app: &App<S, R, P>, theme: &Theme)
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(" NOVAGROUP ADMIN · Group Nodes ")
        .title_style(theme.title);

    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Length(6), // Parameters
            Constraint::Min(5),    // Groups
            Constraint::Length(1), // Footer
        ])
        .split(inner_rect(area, 1));

    render_parameters(frame, app, theme, inner[0]);

    if app.roster.participants().is_empty() {
        let p = Paragraph::new(vec![
            Line::raw(""),
            Line::from(Span::styled("AWAITING REGISTRATIONS", theme.muted)),
            Line::from(Span::styled(
                "Switch to registration mode to let participants join.",
                theme.muted,
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border));
        frame.render_widget(p, inner[1]);
    } else {
        render_groups(frame, app, theme, inner[1]);
    }

    frame.render_widget(
        key_hints(
            &[
                (" Tab ", "Focus"),
                (" ←/→ ", "Adjust"),
                (" ↑/↓ ", "Scroll"),
                (" e ", "Export"),
                (" c ", "Clear"),
                (" r ", "Registration"),
                (" q ", "Quit"),
            ],
            theme,
        ),
        inner[2],
    );
}

fn render_parameters<S, R, P>(frame: &mut Frame, app: &App<S, R, P>, theme: &Theme, area: Rect)
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    let config = app.roster.config();
    let registered = app.roster.participants().len();
    let stale = app.roster.stale_count();

    let param_line = |param: Parameter, value: u32| {
        let style = if app.focus == param { theme.selected } else { theme.normal };
        Line::from(vec![
            Span::styled(format!(" {:<32}", param.label()), style),
            Span::styled(format!(" ◀ {:>3} ▶ ", value), style),
        ])
    };

    let mut lines = vec![
        param_line(Parameter::ExpectedParticipants, config.expected_participant_count),
        param_line(Parameter::TargetGroupSize, config.target_group_size),
        Line::from(vec![
            Span::styled(" Calculated Active Groups         ", theme.muted),
            Span::styled(format!("{}", config.active_group_count), theme.title),
            Span::styled("    Registered / Capacity  ", theme.muted),
            Span::styled(
                format!("{} / {}", registered, config.expected_participant_count),
                theme.title,
            ),
        ]),
    ];

    if stale > 0 {
        lines.push(Line::from(Span::styled(
            format!(" {} registered participants hold a group number above the active count", stale),
            theme.warning,
        )));
    }

    let params = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(" System Parameters ")
            .title_style(theme.title),
    );
    frame.render_widget(params, area);
}

fn render_groups<S, R, P>(frame: &mut Frame, app: &App<S, R, P>, theme: &Theme, area: Rect)
where
    S: RosterStore,
    R: RandomSource,
    P: Pacer,
{
    let groups = app.roster.groups();

    let rows: Vec<Row> = groups
        .iter()
        .skip(app.group_offset)
        .map(|group| {
            let members = if group.is_empty() {
                Span::styled("Empty", theme.muted)
            } else {
                Span::styled(
                    group
                        .members
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    theme.normal,
                )
            };
            Row::new(vec![
                Cell::from(Span::styled(format!("#{}", group.number), theme.group_badge(group.number))),
                Cell::from(format!("{}", group.len())),
                Cell::from(members),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(6), Constraint::Length(7), Constraint::Min(10)],
    )
    .header(Row::new(vec!["Group", "Units", "Members"]).style(theme.muted))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(format!(" Groups ({}) ", groups.len()))
            .title_style(theme.title),
    );

    frame.render_widget(table, area);
}

fn render_confirm_clear(frame: &mut Frame, count: usize, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 8);

    // Clear background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.danger)
        .title(" ⚠️  Purge All Registrations ")
        .title_style(theme.danger);

    frame.render_widget(block, area);

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("Registrations: "),
            Span::styled(count.to_string(), theme.title),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" [Y] ", theme.key_hint),
            Span::styled("Yes, Purge", theme.danger),
            Span::raw("    "),
            Span::styled(" [N] ", theme.key_hint),
            Span::raw("Cancel"),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(text, inner_rect(area, 1));
}

fn render_message(frame: &mut Frame, msg: &str, is_error: bool, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 6);

    frame.render_widget(Clear, area);

    let style = if is_error {
        theme.danger
    } else {
        theme.success
    };
    let title = if is_error {
        " ❌ Error "
    } else {
        " ✅ Success "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
        .title_style(style);

    frame.render_widget(block, area);

    let text = Paragraph::new(vec![
        Line::raw(msg),
        Line::raw(""),
        Line::from(Span::styled("Press any key to continue", theme.muted)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(text, inner_rect(area, 1));
}

fn key_hints<'a>(hints: &[(&'a str, &'a str)], theme: &Theme) -> Paragraph<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, theme.key_hint));
        spans.push(Span::styled(*label, theme.muted));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

// Helper: bottom line inside the outer border
fn footer_rect(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(2),
        width: area.width.saturating_sub(2),
        height: 1,
    }
}

// Helper: shrink rect by margin
fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

// Helper: center a popup
fn center_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = height.min(area.height);
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    Rect {
        x: area.x + x,
        y: area.y + y,
        width,
        height,
    }
}
