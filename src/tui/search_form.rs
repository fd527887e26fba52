//! Search form for the route, dates, passengers and cabin class.
//!
//! The form keeps one text buffer per field and emits a [`CriteriaUpdate`]
//! for every edit; [`AppState`](super::AppState) applies it to the criteria.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use super::component::Component;
use super::Theme;
use crate::models::{suggest_locations, CabinClass, CriteriaField, CriteriaUpdate, SearchCriteria};

/// Most suggestions shown below a route field.
const MAX_SUGGESTIONS: usize = 5;

/// Search form state.
#[derive(Debug, Clone)]
pub struct SearchForm {
    /// Field receiving input
    pub active_field: CriteriaField,
    /// Whether the form has keyboard focus
    pub focused: bool,
    departure: String,
    destination: String,
    departure_date: String,
    return_date: String,
    passengers: String,
    cabin_class: CabinClass,
}

impl SearchForm {
    /// Creates a form showing the given criteria.
    #[must_use]
    pub fn new(criteria: &SearchCriteria) -> Self {
        Self {
            active_field: CriteriaField::Departure,
            focused: true,
            departure: criteria.departure.clone(),
            destination: criteria.destination.clone(),
            departure_date: criteria.departure_date.clone(),
            return_date: criteria.return_date.clone().unwrap_or_default(),
            passengers: criteria.passengers.to_string(),
            cabin_class: criteria.cabin_class,
        }
    }

    /// Move to the next field.
    pub fn next_field(&mut self) {
        self.active_field = step(self.active_field, 1);
    }

    /// Move to the previous field.
    pub fn previous_field(&mut self) {
        self.active_field = step(self.active_field, CriteriaField::ALL.len() - 1);
    }

    /// Text shown for a field.
    #[must_use]
    pub fn text(&self, field: CriteriaField) -> &str {
        match field {
            CriteriaField::Departure => &self.departure,
            CriteriaField::Destination => &self.destination,
            CriteriaField::DepartureDate => &self.departure_date,
            CriteriaField::ReturnDate => &self.return_date,
            CriteriaField::Passengers => &self.passengers,
            CriteriaField::CabinClass => self.cabin_class.label(),
        }
    }

    /// Location suggestions for the active route field.
    ///
    /// Empty when the field is not a route field or already holds an exact match.
    #[must_use]
    pub fn suggestions(&self) -> Vec<&'static str> {
        let input = match self.active_field {
            CriteriaField::Departure => &self.departure,
            CriteriaField::Destination => &self.destination,
            _ => return Vec::new(),
        };
        let mut suggestions = suggest_locations(input);
        if suggestions.len() == 1 && suggestions[0] == input.as_str() {
            suggestions.clear();
        }
        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }

    /// Update describing the current content of a text field.
    fn text_update(&self, field: CriteriaField) -> CriteriaUpdate {
        match field {
            CriteriaField::Departure => CriteriaUpdate::Departure(self.departure.clone()),
            CriteriaField::Destination => CriteriaUpdate::Destination(self.destination.clone()),
            CriteriaField::DepartureDate => {
                CriteriaUpdate::DepartureDate(self.departure_date.clone())
            }
            CriteriaField::ReturnDate => CriteriaUpdate::ReturnDate(
                Some(self.return_date.clone()).filter(|date| !date.trim().is_empty()),
            ),
            // An empty or oversized count fails validation at submission
            CriteriaField::Passengers => {
                CriteriaUpdate::Passengers(self.passengers.parse().unwrap_or(0))
            }
            CriteriaField::CabinClass => CriteriaUpdate::CabinClass(self.cabin_class),
        }
    }

    fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.active_field {
            CriteriaField::Departure => Some(&mut self.departure),
            CriteriaField::Destination => Some(&mut self.destination),
            CriteriaField::DepartureDate => Some(&mut self.departure_date),
            CriteriaField::ReturnDate => Some(&mut self.return_date),
            CriteriaField::Passengers => Some(&mut self.passengers),
            CriteriaField::CabinClass => None,
        }
    }

    fn accepts(&self, c: char) -> bool {
        match self.active_field {
            CriteriaField::DepartureDate | CriteriaField::ReturnDate => {
                c.is_ascii_digit() || c == '-'
            }
            CriteriaField::Passengers => c.is_ascii_digit(),
            CriteriaField::CabinClass => false,
            _ => true,
        }
    }

    fn set_cabin(&mut self, cabin: CabinClass) -> Option<CriteriaUpdate> {
        self.cabin_class = cabin;
        Some(CriteriaUpdate::CabinClass(cabin))
    }

    fn render_field(&self, f: &mut Frame, area: Rect, field: CriteriaField, theme: &Theme) {
        let is_active = self.focused && self.active_field == field;

        let (style, border_style) = if is_active {
            (
                Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
                Style::default().fg(theme.active),
            )
        } else {
            (
                Style::default().fg(theme.text),
                Style::default().fg(theme.inactive),
            )
        };

        let value = self.text(field);
        let display_value = match field {
            CriteriaField::CabinClass if is_active => format!("◀ {value} ▶"),
            CriteriaField::CabinClass => value.to_string(),
            _ if is_active => format!("{value}_"),
            CriteriaField::DepartureDate | CriteriaField::ReturnDate if value.is_empty() => {
                "YYYY-MM-DD".to_string()
            }
            _ => value.to_string(),
        };
        let style = if value.is_empty() && !is_active {
            style.fg(theme.text_muted)
        } else {
            style
        };

        let paragraph = Paragraph::new(display_value).style(style).block(
            Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(paragraph, area);
    }

    fn render_suggestions(&self, f: &mut Frame, anchor: Rect, theme: &Theme) {
        let suggestions = self.suggestions();
        if !self.focused || suggestions.is_empty() {
            return;
        }

        let height = suggestions.len() as u16 + 2;
        let area = Rect {
            x: anchor.x,
            y: anchor.y + anchor.height,
            width: anchor.width,
            height,
        }
        .intersection(f.area());

        let items: Vec<ListItem> = suggestions
            .iter()
            .enumerate()
            .map(|(i, location)| {
                let style = if i == 0 {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(Line::from(Span::styled(*location, style)))
            })
            .collect();

        f.render_widget(Clear, area);
        f.render_widget(
            List::new(items).block(
                Block::default()
                    .title(" → to accept ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent))
                    .style(Style::default().bg(theme.surface)),
            ),
            area,
        );
    }
}

/// Field `offset` places after `field`, wrapping around.
fn step(field: CriteriaField, offset: usize) -> CriteriaField {
    let all = CriteriaField::ALL;
    let index = all.iter().position(|f| *f == field).unwrap_or(0);
    all[(index + offset) % all.len()]
}

impl Component for SearchForm {
    type Event = CriteriaUpdate;

    fn handle_input(&mut self, key: KeyEvent) -> Option<CriteriaUpdate> {
        let field = self.active_field;

        match (key.code, key.modifiers) {
            (KeyCode::Left, _) if field == CriteriaField::CabinClass => {
                self.set_cabin(self.cabin_class.previous())
            }
            (KeyCode::Right | KeyCode::Char(' '), _) if field == CriteriaField::CabinClass => {
                self.set_cabin(self.cabin_class.next())
            }
            (KeyCode::Right, _) => {
                let suggestion = self.suggestions().first().copied()?;
                let buffer = self.buffer_mut()?;
                *buffer = suggestion.to_string();
                Some(self.text_update(field))
            }
            (KeyCode::Backspace, _) => {
                self.buffer_mut()?.pop()?;
                Some(self.text_update(field))
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.buffer_mut()?.clear();
                Some(self.text_update(field))
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) if self.accepts(c) => {
                self.buffer_mut()?.push(c);
                Some(self.text_update(field))
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Search Flights ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if self.focused {
                theme.primary
            } else {
                theme.inactive
            }));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(inner);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(30),
                Constraint::Percentage(50),
            ])
            .split(rows[1]);

        let areas = [top[0], top[1], top[2], top[3], bottom[0], bottom[1]];
        for (field, field_area) in CriteriaField::ALL.into_iter().zip(areas) {
            self.render_field(f, field_area, field, theme);
        }

        let hint = if self.focused {
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
                Span::styled(" search  ", Style::default().fg(theme.text_muted)),
                Span::styled("Tab", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::styled(" next field  ", Style::default().fg(theme.text_muted)),
                Span::styled("Esc", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::styled(" results", Style::default().fg(theme.text_muted)),
            ])
        } else {
            Line::from(Span::styled(
                "Press / to edit the search",
                Style::default().fg(theme.text_muted),
            ))
        };
        f.render_widget(
            Paragraph::new(hint).block(Block::default().borders(Borders::ALL)),
            bottom[2],
        );

        // Drawn last so the list overlaps the fields below
        let anchor = match self.active_field {
            CriteriaField::Departure => Some(top[0]),
            CriteriaField::Destination => Some(top[1]),
            _ => None,
        };
        if let Some(anchor) = anchor {
            self.render_suggestions(f, anchor, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut SearchForm, text: &str) -> Option<CriteriaUpdate> {
        let mut last = None;
        for c in text.chars() {
            last = form.handle_input(key(KeyCode::Char(c)));
        }
        last
    }

    #[test]
    fn test_typing_emits_single_field_updates() {
        let mut form = SearchForm::new(&SearchCriteria::new());
        assert_eq!(
            type_text(&mut form, "Paris"),
            Some(CriteriaUpdate::Departure("Paris".to_string()))
        );

        form.next_field();
        assert_eq!(
            type_text(&mut form, "Tokyo"),
            Some(CriteriaUpdate::Destination("Tokyo".to_string()))
        );
        assert_eq!(
            form.handle_input(key(KeyCode::Backspace)),
            Some(CriteriaUpdate::Destination("Toky".to_string()))
        );
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = SearchForm::new(&SearchCriteria::new());
        form.previous_field();
        assert_eq!(form.active_field, CriteriaField::CabinClass);
        form.next_field();
        assert_eq!(form.active_field, CriteriaField::Departure);
    }

    #[test]
    fn test_suggestions_accept() {
        let mut form = SearchForm::new(&SearchCriteria::new());
        type_text(&mut form, "lon");
        assert_eq!(form.suggestions(), vec!["London (LHR)"]);

        assert_eq!(
            form.handle_input(key(KeyCode::Right)),
            Some(CriteriaUpdate::Departure("London (LHR)".to_string()))
        );
        // Exact match hides the list
        assert!(form.suggestions().is_empty());
    }

    #[test]
    fn test_date_and_passenger_fields_filter_characters() {
        let mut form = SearchForm::new(&SearchCriteria::new());
        form.active_field = CriteriaField::DepartureDate;
        assert_eq!(form.handle_input(key(KeyCode::Char('x'))), None);
        assert_eq!(
            type_text(&mut form, "2024-06-01"),
            Some(CriteriaUpdate::DepartureDate("2024-06-01".to_string()))
        );

        form.active_field = CriteriaField::Passengers;
        assert_eq!(
            form.handle_input(key(KeyCode::Backspace)),
            Some(CriteriaUpdate::Passengers(0))
        );
        assert_eq!(
            form.handle_input(key(KeyCode::Char('3'))),
            Some(CriteriaUpdate::Passengers(3))
        );
    }

    #[test]
    fn test_empty_return_date_is_one_way() {
        let mut criteria = SearchCriteria::new();
        criteria.return_date = Some("2".to_string());
        let mut form = SearchForm::new(&criteria);
        form.active_field = CriteriaField::ReturnDate;
        assert_eq!(
            form.handle_input(key(KeyCode::Backspace)),
            Some(CriteriaUpdate::ReturnDate(None))
        );
    }

    #[test]
    fn test_cabin_cycles() {
        let mut form = SearchForm::new(&SearchCriteria::new());
        form.active_field = CriteriaField::CabinClass;
        assert_eq!(
            form.handle_input(key(KeyCode::Right)),
            Some(CriteriaUpdate::CabinClass(CabinClass::Premium))
        );
        assert_eq!(
            form.handle_input(key(KeyCode::Left)),
            Some(CriteriaUpdate::CabinClass(CabinClass::Economy))
        );
        assert_eq!(form.handle_input(key(KeyCode::Char('a'))), None);
    }
}
