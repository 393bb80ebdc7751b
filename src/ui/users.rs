use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::api::UserRecord;
use crate::app::{AppState, EditField, EditForm, ModalState};
use crate::format::{
    DisplayMode, address_line, capitalize_first, display_name, format_dob, full_name,
};

/// One visible list row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub name: String,
    pub gender: String,
    pub email: String,
    pub country: String,
}

impl UserRow {
    pub fn from_record(user: &UserRecord, mode: DisplayMode) -> Self {
        Self {
            name: display_name(user, mode).to_string(),
            gender: capitalize_first(&user.gender),
            email: user.email.clone(),
            country: user.location.country.clone(),
        }
    }
}

/// Project the whole store into rows, in store order.
pub fn project_rows(users: &[UserRecord], mode: DisplayMode) -> Vec<UserRow> {
    users.iter().map(|u| UserRow::from_record(u, mode)).collect()
}

/// Everything the detail view shows for one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub picture: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cell: String,
    pub dob: String,
    pub gender: String,
    pub address: String,
}

impl DetailView {
    pub fn from_record(user: &UserRecord) -> Self {
        Self {
            picture: user.picture.large.clone(),
            full_name: full_name(user),
            email: user.email.clone(),
            phone: user.phone.clone(),
            cell: user.cell.clone(),
            dob: format_dob(&user.dob.date),
            gender: capitalize_first(&user.gender),
            address: address_line(user),
        }
    }

    fn lines(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Name", self.full_name.as_str()),
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
            ("Cell", self.cell.as_str()),
            ("Born", self.dob.as_str()),
            ("Gender", self.gender.as_str()),
            ("Address", self.address.as_str()),
            ("Picture", self.picture.as_str()),
        ]
    }
}

pub const DETAIL_ACTIONS: [&str; 3] = ["Edit", "Delete", "Close"];

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    app.list_area = area;
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let block = Block::default()
        .title(format!("Users ({})", app.rows.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if app.rows.is_empty() {
        let hint = if app.is_loading() {
            "Loading users…"
        } else {
            "No users. Enter a count above and press Enter."
        };
        let p = Paragraph::new(hint)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let start = page_start(app);
    let end = (start + app.rows_per_page).min(app.rows.len());
    let slice = &app.rows[start..end];

    let rows = slice.iter().enumerate().map(|(i, r)| {
        let style = if start + i == app.cursor {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(r.name.clone()),
            Cell::from(r.gender.clone()),
            Cell::from(r.email.clone()),
            Cell::from(r.country.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(15),
        Constraint::Percentage(35),
        Constraint::Percentage(25),
    ];
    let header = Row::new(vec![app.display_mode.label(), "Gender", "Email", "Country"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}

/// Index of the first row on the cursor's page.
pub fn page_start(app: &AppState) -> usize {
    let rpp = app.rows_per_page.max(1);
    (app.cursor / rpp) * rpp
}

/// Map a screen row inside the list to a row index, if it hits one.
pub fn row_at(app: &AppState, y: u16) -> Option<usize> {
    // border + header
    let first = app.list_area.y.saturating_add(2);
    let last = app.list_area.y + app.list_area.height.saturating_sub(1);
    if y < first || y >= last {
        return None;
    }
    let index = page_start(app) + usize::from(y - first);
    (index < app.rows.len()).then_some(index)
}

pub fn render_detail_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::Detail { selected } = state else {
        return;
    };
    let Some(user) = app.selected_user.and_then(|i| app.store.get(i)) else {
        return;
    };
    let view = DetailView::from_record(user);

    let width = 76u16.min(area.width.saturating_sub(4)).max(40);
    let rect = crate::ui::components::centered_rect(width, 14, area);

    let mut lines: Vec<Line> = view
        .lines()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:>8}: "),
                    Style::default().fg(app.theme.title),
                ),
                Span::raw(value.to_string()),
            ])
        })
        .collect();
    lines.push(Line::raw(""));

    let mut buttons = Vec::new();
    for (idx, label) in DETAIL_ACTIONS.iter().enumerate() {
        if idx == *selected {
            buttons.push(Span::styled(
                format!("[{label}]"),
                Style::default()
                    .fg(app.theme.highlight_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            buttons.push(Span::raw(format!(" {label} ")));
        }
        buttons.push(Span::raw("   "));
    }
    lines.push(Line::from(buttons));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("User (e: edit, d: delete, Esc: close)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_edit_modal(f: &mut Frame, area: Rect, app: &AppState, form: &EditForm) {
    let width = 70u16.min(area.width.saturating_sub(4)).max(40);
    let height = (EditField::ALL.len() as u16 + 4).min(area.height);
    let rect = crate::ui::components::centered_rect(width, height, area);

    let mut lines: Vec<Line> = Vec::with_capacity(EditField::ALL.len() + 2);
    for (idx, (field, value)) in EditField::ALL.iter().zip(&form.values).enumerate() {
        let active = idx == form.selected;
        let marker = if active { "▶ " } else { "  " };
        let label_style = if active {
            Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.title)
        };
        let mut spans = vec![
            Span::raw(marker),
            Span::styled(format!("{:<27}", field.label()), label_style),
            Span::raw(value.clone()),
        ];
        if active {
            spans.push(Span::styled("█", Style::default().fg(app.theme.highlight_fg)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Empty field keeps the current value. Enter: save  Esc: cancel",
        Style::default().fg(app.theme.muted),
    )));

    let p = Paragraph::new(lines).block(
        Block::default()
            .title("Edit user")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_projection_follows_display_mode() {
        let mut u = UserRecord::default();
        u.name.first = "jane".into();
        u.name.last = "roe".into();
        u.gender = "female".into();
        u.email = "Jane.Roe@Example.com".into();
        u.location.country = "norway".into();

        let first = project_rows(std::slice::from_ref(&u), DisplayMode::FirstName);
        assert_eq!(first[0].name, "jane");
        let last = project_rows(std::slice::from_ref(&u), DisplayMode::LastName);
        assert_eq!(
            last[0],
            UserRow {
                name: "roe".into(),
                gender: "Female".into(),
                email: "Jane.Roe@Example.com".into(),
                country: "norway".into(),
            }
        );
    }

    #[test]
    fn row_hit_testing() {
        let mut app = AppState::default();
        let mut u = UserRecord::default();
        u.name.first = "a".into();
        app.store.replace_all(vec![u.clone(), u.clone(), u]);
        app.render_rows();
        app.list_area = Rect::new(0, 5, 80, 10);
        app.rows_per_page = 7;

        assert_eq!(row_at(&app, 6), None); // header
        assert_eq!(row_at(&app, 7), Some(0));
        assert_eq!(row_at(&app, 9), Some(2));
        assert_eq!(row_at(&app, 10), None); // past the last row
    }
}
