//! Interactive selection: vertical and horizontal menus and a date picker
//!
//! A [`Menu`] holds presentation settings only. Each call to
//! [`Menu::interactive`], [`Menu::horizontal`] or [`Menu::date_picker`]
//! builds its own state, hides the cursor for the duration of the loop and
//! redraws in place after every key.

pub mod date;
pub mod layout;
pub mod list;
pub mod selection;

pub use date::{DateField, DateFieldState};
pub use selection::Selectable;

use crate::ansi::{Alignment, Color, StyleAttr};
use crate::config::MenuTheme;
use crate::error::{Error, Result};
use crate::markup::strip_formatting;
use crate::term::Terminal;
use crate::text::StyledText;
use layout::Placement;

/// Colour and style attributes applied to one option
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionStyle {
    pub color: Option<Color>,
    pub styles: Vec<StyleAttr>,
}

impl OptionStyle {
    pub fn reverse() -> Self {
        Self {
            color: None,
            styles: vec![StyleAttr::Reverse],
        }
    }

    pub fn is_set(&self) -> bool {
        self.color.is_some() || !self.styles.is_empty()
    }

    /// Expand markup in `line` and wrap it in this style's codes
    pub fn apply(&self, line: &str) -> String {
        let mut text = StyledText::new(line);
        if let Some(color) = self.color {
            text = text.color(color);
        }
        text.styles(self.styles.iter().copied())
            .render_at(usize::MAX)
            .unwrap_or_default()
    }
}

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Text as supplied, markup included
    pub display: String,
    /// Stripped, lowercased text used for leader-key search
    pub match_key: String,
}

impl MenuOption {
    pub fn new(display: impl Into<String>) -> Self {
        let display = display.into();
        let match_key = strip_formatting(&display).to_lowercase();
        Self { display, match_key }
    }
}

/// The options of one menu call and the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub options: Vec<MenuOption>,
    pub header: Option<String>,
    selected: usize,
}

impl MenuState {
    /// Fails with [`Error::EmptyMenu`] when there is nothing to select
    pub fn new<S: AsRef<str>>(options: &[S], header: Option<&str>) -> Result<Self> {
        if options.is_empty() {
            return Err(Error::EmptyMenu);
        }
        Ok(Self {
            options: options.iter().map(|o| MenuOption::new(o.as_ref())).collect(),
            header: header.map(str::to_string),
            selected: 0,
        })
    }

    pub fn selected_option(&self) -> &MenuOption {
        &self.options[self.selected]
    }

    /// Jump to the first option starting with `key`, ignoring case.
    ///
    /// Returns whether a match was found; the selection is unchanged
    /// otherwise.
    pub fn jump_to_leader(&mut self, key: char) -> bool {
        let needle: String = key.to_lowercase().collect();
        match self
            .options
            .iter()
            .position(|option| option.match_key.starts_with(&needle))
        {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub fn displays(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.display.as_str()).collect()
    }
}

impl Selectable for MenuState {
    fn count(&self) -> usize {
        self.options.len()
    }

    fn selected(&self) -> usize {
        self.selected
    }

    fn set_selected(&mut self, index: usize) {
        self.selected = index;
    }
}

/// Presentation settings shared by every kind of menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    option_alignment: Alignment,
    menu_alignment: Alignment,
    option_style: OptionStyle,
    selected_style: OptionStyle,
    erase: bool,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            option_alignment: Alignment::Left,
            menu_alignment: Alignment::Left,
            option_style: OptionStyle::default(),
            selected_style: OptionStyle::default(),
            erase: false,
        }
    }
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings from a loaded theme
    pub fn from_config(theme: &MenuTheme) -> Self {
        Self {
            option_alignment: theme.option_alignment,
            menu_alignment: theme.menu_alignment,
            option_style: OptionStyle {
                color: theme.option_color,
                styles: theme.option_styles.clone(),
            },
            selected_style: OptionStyle {
                color: theme.selected_color,
                styles: theme.selected_styles.clone(),
            },
            erase: theme.erase,
        }
    }

    pub fn option_align(mut self, alignment: Alignment) -> Self {
        self.option_alignment = alignment;
        self
    }

    pub fn option_left(self) -> Self {
        self.option_align(Alignment::Left)
    }

    pub fn option_right(self) -> Self {
        self.option_align(Alignment::Right)
    }

    pub fn option_centre(self) -> Self {
        self.option_align(Alignment::Centre)
    }

    pub fn menu_align(mut self, alignment: Alignment) -> Self {
        self.menu_alignment = alignment;
        self
    }

    pub fn menu_left(self) -> Self {
        self.menu_align(Alignment::Left)
    }

    pub fn menu_right(self) -> Self {
        self.menu_align(Alignment::Right)
    }

    pub fn menu_centre(self) -> Self {
        self.menu_align(Alignment::Centre)
    }

    pub fn color_option(mut self, color: Color) -> Self {
        self.option_style.color = Some(color);
        self
    }

    pub fn color_selected(mut self, color: Color) -> Self {
        self.selected_style.color = Some(color);
        self
    }

    pub fn style_option(mut self, style: StyleAttr) -> Self {
        self.option_style.styles.push(style);
        self
    }

    pub fn style_selected(mut self, style: StyleAttr) -> Self {
        self.selected_style.styles.push(style);
        self
    }

    /// Erase the menu from the screen once a choice is made
    pub fn erase(mut self) -> Self {
        self.erase = true;
        self
    }

    pub fn erases(&self) -> bool {
        self.erase
    }

    fn placement(&self) -> Placement {
        Placement {
            options: self.option_alignment,
            menu: self.menu_alignment,
        }
    }

    /// Configured selected style, or reverse video when none was set
    fn effective_selected_style(&self) -> OptionStyle {
        if self.selected_style.is_set() {
            self.selected_style.clone()
        } else {
            OptionStyle::reverse()
        }
    }

    /// Run a vertical menu and return the chosen option as supplied
    pub fn interactive<T, S>(&self, term: &mut T, options: &[S], header: Option<&str>) -> Result<String>
    where
        T: Terminal + ?Sized,
        S: AsRef<str>,
    {
        let state = MenuState::new(options, header)?;
        list::run(self, term, state, list::Orientation::Vertical)
    }

    /// Run a menu laid out on one line and return the chosen option
    pub fn horizontal<T, S>(&self, term: &mut T, options: &[S], header: Option<&str>) -> Result<String>
    where
        T: Terminal + ?Sized,
        S: AsRef<str>,
    {
        let state = MenuState::new(options, header)?;
        list::run(self, term, state, list::Orientation::Horizontal)
    }

    /// Pick a date starting from `date`, returned as `YYYY-MM-DD`.
    ///
    /// An unparseable `date` is reported on stderr and returned unchanged.
    pub fn date_picker<T: Terminal + ?Sized>(&self, term: &mut T, date: &str, header: Option<&str>) -> Result<String> {
        date::run(self, term, date, header)
    }
}
