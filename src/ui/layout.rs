//! Screen layout: menu bar, text window and status bar

/// Represents a rectangular region in 1-based screen coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, row: u16, col: u16) -> bool {
        row >= self.y && row < self.y + self.height && col >= self.x && col < self.x + self.width
    }

    /// A `width` x `height` rect centered on a screen, shrunk to fit
    pub fn centered(width: u16, height: u16, screen_width: u16, screen_height: u16) -> Self {
        let width = width.min(screen_width.saturating_sub(2)).max(1);
        let height = height.min(screen_height.saturating_sub(2)).max(1);
        Self {
            x: (screen_width.saturating_sub(width)) / 2 + 1,
            y: (screen_height.saturating_sub(height)) / 2 + 1,
            width,
            height,
        }
    }

    /// The area inside a one-cell border
    pub fn inner(&self) -> Rect {
        Rect {
            x: self.x + 1,
            y: self.y + 1,
            width: self.width.saturating_sub(2),
            height: self.height.saturating_sub(2),
        }
    }
}

/// Where each part of the main screen goes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MainLayout {
    pub menu_bar: Rect,
    /// Bordered window whose top border carries the title
    pub window: Rect,
    /// Text area inside the window border
    pub text: Rect,
    pub status_bar: Option<Rect>,
}

pub fn main_layout(width: u16, height: u16, show_status_bar: bool) -> MainLayout {
    let menu_bar = Rect::new(1, 1, width, 1);
    let status_rows = if show_status_bar && height > 3 { 1 } else { 0 };
    let window = Rect::new(1, 2, width, height.saturating_sub(1 + status_rows));
    let status_bar = (status_rows == 1).then(|| Rect::new(1, height, width, 1));
    MainLayout {
        menu_bar,
        window,
        text: window.inner(),
        status_bar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_layout_with_status_bar() {
        let layout = main_layout(80, 25, true);
        assert_eq!(layout.menu_bar, Rect::new(1, 1, 80, 1));
        assert_eq!(layout.window, Rect::new(1, 2, 80, 23));
        assert_eq!(layout.text, Rect::new(2, 3, 78, 21));
        assert_eq!(layout.status_bar, Some(Rect::new(1, 25, 80, 1)));
    }

    #[test]
    fn test_main_layout_without_status_bar() {
        let layout = main_layout(80, 25, false);
        assert_eq!(layout.window.height, 24);
        assert_eq!(layout.status_bar, None);
    }

    #[test]
    fn test_centered_rect_fits_screen() {
        let rect = Rect::centered(50, 10, 80, 25);
        assert_eq!(rect, Rect::new(16, 8, 50, 10));
        assert!(rect.contains(8, 16));
        assert!(!rect.contains(18, 16));
        let small = Rect::centered(50, 10, 30, 8);
        assert_eq!((small.width, small.height), (28, 6));
    }
}
