//! Font dialog: family, style and size lists with a sample line.

use crate::config::{FontConfig, FontStyle};
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::terminal::Attrs;
use crate::ui::layout::Rect;
use crate::ui::modal::{ModalAction, ModalDialog, ModalResult};
use crate::ui::theme::Theme;

use super::{button_at, cycle_focus, draw_buttons, draw_frame};

const FAMILIES: [&str; 6] = [
    "Cascadia Mono",
    "Consolas",
    "Courier New",
    "Lucida Console",
    "Lucida Sans Typewriter",
    "MS Gothic",
];
const SIZES: [u16; 16] = [8, 9, 10, 11, 12, 14, 16, 18, 20, 22, 24, 26, 28, 36, 48, 72];
const BUTTONS: [&str; 2] = ["OK", "Cancel"];
const LIST_ROWS: u16 = 8;
const FAMILY: usize = 0;
const STYLE: usize = 1;
const SIZE: usize = 2;
const OK: usize = 3;
const CONTROLS: usize = 5;

/// A scrolling single-selection list
struct ListBox {
    items: Vec<String>,
    selected: usize,
}

impl ListBox {
    fn new(items: Vec<String>, selected: usize) -> Self {
        Self { items, selected }
    }

    fn top(&self) -> usize {
        (self.selected + 1).saturating_sub(LIST_ROWS as usize)
    }

    fn handle_key(&mut self, event: &InputEvent) {
        let last = self.items.len().saturating_sub(1);
        self.selected = match event {
            InputEvent::CursorUp => self.selected.saturating_sub(1),
            InputEvent::CursorDown => (self.selected + 1).min(last),
            InputEvent::PageUp => self.selected.saturating_sub(LIST_ROWS as usize),
            InputEvent::PageDown => (self.selected + LIST_ROWS as usize).min(last),
            InputEvent::Home => 0,
            InputEvent::End => last,
            _ => self.selected,
        };
    }

    /// Select the visible row under a click
    fn click(&mut self, row_offset: u16) {
        let index = self.top() + row_offset as usize;
        if index < self.items.len() {
            self.selected = index;
        }
    }

    fn draw(&self, screen: &mut Screen, theme: &Theme, row: u16, col: u16, width: u16, focused: bool) {
        let top = self.top();
        for r in 0..LIST_ROWS {
            let index = top + r as usize;
            let selected = index == self.selected;
            let (fg, bg) = match (selected, focused) {
                (true, true) => (theme.list_selected_fg, theme.list_selected_bg),
                (true, false) => (theme.field_selection_fg, theme.field_selection_bg),
                _ => (theme.field_fg, theme.field_bg),
            };
            screen.fill(row + r, col, width, 1, ' ', fg, bg);
            if let Some(item) = self.items.get(index) {
                let text: String = item.chars().take(width as usize).collect();
                screen.write_str(row + r, col, &text, fg, bg);
            }
        }
    }
}

pub struct FontDialog {
    families: ListBox,
    styles: ListBox,
    sizes: ListBox,
    focus: usize,
}

impl FontDialog {
    pub fn new(current: &FontConfig) -> Self {
        let mut families: Vec<String> = FAMILIES.iter().map(|f| f.to_string()).collect();
        if !families.contains(&current.family) {
            families.push(current.family.clone());
            families.sort();
        }
        let family_index = families.iter().position(|f| *f == current.family).unwrap_or(0);

        let style_index = FontStyle::ALL.iter().position(|s| *s == current.style).unwrap_or(0);
        let styles = FontStyle::ALL.iter().map(|s| s.to_string()).collect();

        let mut sizes: Vec<u16> = SIZES.to_vec();
        if !sizes.contains(&current.size) {
            sizes.push(current.size);
            sizes.sort_unstable();
        }
        let size_index = sizes.iter().position(|s| *s == current.size).unwrap_or(0);

        Self {
            families: ListBox::new(families, family_index),
            styles: ListBox::new(styles, style_index),
            sizes: ListBox::new(sizes.iter().map(|s| s.to_string()).collect(), size_index),
            focus: FAMILY,
        }
    }

    /// The font currently selected in the lists
    pub fn font(&self) -> FontConfig {
        FontConfig {
            family: self.families.items[self.families.selected].clone(),
            style: FontStyle::ALL[self.styles.selected],
            size: self.sizes.items[self.sizes.selected].parse().unwrap_or(12),
        }
    }

    /// Column and width of each list
    fn columns(area: Rect) -> [(u16, u16); 3] {
        [(area.x + 2, 24), (area.x + 28, 14), (area.x + 44, 8)]
    }

    fn list_mut(&mut self, index: usize) -> Option<&mut ListBox> {
        match index {
            FAMILY => Some(&mut self.families),
            STYLE => Some(&mut self.styles),
            SIZE => Some(&mut self.sizes),
            _ => None,
        }
    }

    fn handle_click(&mut self, area: Rect, row: u16, col: u16) -> ModalResult {
        let list_top = area.y + 3;
        if row >= list_top && row < list_top + LIST_ROWS {
            for (index, (start, width)) in Self::columns(area).into_iter().enumerate() {
                if col >= start && col < start + width {
                    self.focus = index;
                    if let Some(list) = self.list_mut(index) {
                        list.click(row - list_top);
                    }
                }
            }
            return ModalResult::Continue;
        }
        match button_at(area, &BUTTONS, area.y + 14, row, col) {
            Some(0) => ModalResult::Action(ModalAction::Font(self.font())),
            Some(_) => ModalResult::Close,
            None => ModalResult::Continue,
        }
    }
}

impl ModalDialog for FontDialog {
    fn size(&self) -> (u16, u16) {
        (56, 16)
    }

    fn draw(&self, screen: &mut Screen, theme: &Theme, area: Rect) {
        draw_frame(screen, theme, area, "Font");
        screen.set_cursor_visible(false);

        let [family_col, style_col, size_col] = Self::columns(area);
        let labels = [("Font:", family_col), ("Font style:", style_col), ("Size:", size_col)];
        for (label, (col, _)) in labels {
            screen.write_str(area.y + 2, col, label, theme.dialog_fg, theme.dialog_bg);
        }
        let list_top = area.y + 3;
        self.families.draw(screen, theme, list_top, family_col.0, family_col.1, self.focus == FAMILY);
        self.styles.draw(screen, theme, list_top, style_col.0, style_col.1, self.focus == STYLE);
        self.sizes.draw(screen, theme, list_top, size_col.0, size_col.1, self.focus == SIZE);

        let font = self.font();
        let attrs = Attrs { bold: font.style.is_bold(), italic: font.style.is_italic() };
        let sample_row = area.y + 12;
        screen.write_str(sample_row, area.x + 2, "Sample:", theme.dialog_fg, theme.dialog_bg);
        for (i, ch) in "AaBbYyZz".chars().enumerate() {
            screen.set_styled(sample_row, area.x + 10 + i as u16, ch, theme.text_fg, theme.text_bg, attrs);
        }
        let detail = format!("{} {}pt", font.family, font.size);
        screen.write_str(sample_row, area.x + 20, &detail, theme.dialog_fg, theme.dialog_bg);

        draw_buttons(screen, theme, area, area.y + 14, &BUTTONS, self.focus.checked_sub(OK));
    }

    fn handle_event(&mut self, event: &InputEvent, area: Rect) -> ModalResult {
        if let Some(focus) = cycle_focus(self.focus, CONTROLS, event) {
            self.focus = focus;
            return ModalResult::Continue;
        }
        match event {
            InputEvent::Escape => ModalResult::Close,
            InputEvent::Enter if self.focus == OK + 1 => ModalResult::Close,
            InputEvent::Enter => ModalResult::Action(ModalAction::Font(self.font())),
            InputEvent::MouseClick { row, col } => self.handle_click(area, *row, *col),
            _ => {
                let focus = self.focus;
                if let Some(list) = self.list_mut(focus) {
                    list.handle_key(event);
                }
                ModalResult::Continue
            }
        }
    }

    fn title(&self) -> &str {
        "Font"
    }
}
