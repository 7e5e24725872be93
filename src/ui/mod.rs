//! UI components for the Notepad window

pub mod dialogs;
pub mod layout;
pub mod menubar;
pub mod modal;
pub mod statusbar;
pub mod textarea;
pub mod textfield;
pub mod theme;

pub use layout::{main_layout, MainLayout, Rect};
pub use menubar::{MenuAction, MenuBar, MenuCommand};
pub use modal::{ModalAction, ModalDialog, ModalResult};
pub use statusbar::StatusBar;
pub use textarea::TextArea;
pub use theme::Theme;
