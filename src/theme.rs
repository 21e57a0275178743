//! Theme definitions for ThemeSwitch
//!
//! Each theme is a complete style bundle: color scheme, heading typography and
//! page layout. Themes are Minimalist (default), Dark Professional and
//! Colorful Fun.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

// ==================== ThemeId Enum ====================

/// Theme identifier for type-safe theme selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ThemeId {
    #[default]
    #[serde(rename = "theme1")]
    Minimalist,
    #[serde(rename = "theme2")]
    DarkProfessional,
    #[serde(rename = "theme3")]
    ColorfulFun,
}

impl ThemeId {
    /// Get the display name of the theme
    pub fn name(&self) -> &'static str {
        match self {
            ThemeId::Minimalist => "Minimalist",
            ThemeId::DarkProfessional => "Dark Professional",
            ThemeId::ColorfulFun => "Colorful Fun",
        }
    }

    /// Get the description of the theme
    pub fn description(&self) -> &'static str {
        match self {
            ThemeId::Minimalist => "Clean, light design with sans-serif typography and subtle shadows.",
            ThemeId::DarkProfessional => "Dark, elegant design with serif fonts and sidebar navigation.",
            ThemeId::ColorfulFun => "Vibrant, playful design with gradients and monospace fonts.",
        }
    }

    /// Get the ID string for this theme (the persisted value)
    pub fn id(&self) -> &'static str {
        match self {
            ThemeId::Minimalist => "theme1",
            ThemeId::DarkProfessional => "theme2",
            ThemeId::ColorfulFun => "theme3",
        }
    }

    /// Strict lookup by persisted id (`theme1`..`theme3`), no aliases
    pub fn from_id(id: &str) -> Option<ThemeId> {
        Self::all().iter().copied().find(|t| t.id() == id)
    }

    /// Short feature bullets shown in the theme showcase
    pub fn highlights(&self) -> [&'static str; 3] {
        match self {
            ThemeId::Minimalist => ["Clean typography", "Light color scheme", "Standard layout"],
            ThemeId::DarkProfessional => ["Serif typography", "Dark color scheme", "Sidebar layout"],
            ThemeId::ColorfulFun => ["Monospace typography", "Gradient colors", "Card-based layout"],
        }
    }

    /// Get all available theme IDs
    pub fn all() -> &'static [ThemeId] {
        &[ThemeId::Minimalist, ThemeId::DarkProfessional, ThemeId::ColorfulFun]
    }

    /// Style bundle for this theme
    pub fn styles(&self) -> &'static StyleBundle {
        match self {
            ThemeId::Minimalist => &MINIMALIST,
            ThemeId::DarkProfessional => &DARK_PROFESSIONAL,
            ThemeId::ColorfulFun => &COLORFUL_FUN,
        }
    }
}

impl FromStr for ThemeId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "theme1" | "minimalist" => Ok(ThemeId::Minimalist),
            "theme2" | "dark" | "professional" | "dark-professional" => {
                Ok(ThemeId::DarkProfessional)
            }
            "theme3" | "colorful" | "fun" | "colorful-fun" => Ok(ThemeId::ColorfulFun),
            _ => Err(()),
        }
    }
}

impl Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ==================== Layout ====================

/// How a theme arranges the landing page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLayout {
    /// Centered column, two cards per row
    Standard,
    /// Navigation sidebar on the left, one card per row
    Sidebar,
    /// Card grid, three cards per row
    Grid,
}

impl PageLayout {
    /// Number of product cards per row
    pub fn columns(&self) -> usize {
        match self {
            PageLayout::Standard => 2,
            PageLayout::Sidebar => 1,
            PageLayout::Grid => 3,
        }
    }
}

// ==================== StyleBundle Struct ====================

/// Complete style bundle for one theme
#[derive(Clone, Debug)]
pub struct StyleBundle {
    /// Theme identifier
    pub id: ThemeId,
    /// Page arrangement
    pub layout: PageLayout,

    // ==================== Background Colors ====================
    /// Page background
    pub bg: Color,
    /// Card / panel background
    pub bg_card: Color,
    /// Header and navigation background
    pub bg_header: Color,
    /// Selected item background
    pub bg_highlight: Color,

    // ==================== Text Colors ====================
    /// Page title
    pub title: Color,
    /// Section headings
    pub subtitle: Color,
    /// Body copy
    pub text: Color,
    /// Secondary copy inside cards
    pub text_muted: Color,
    /// Navigation links and logo
    pub nav: Color,

    // ==================== Accents ====================
    /// Prices, links and emphasis
    pub accent: Color,
    /// Primary button background
    pub button: Color,
    /// Category badge background
    pub badge_bg: Color,
    /// Category badge foreground
    pub badge_fg: Color,
    /// Card border
    pub border: Color,
    /// Focused element border
    pub border_focus: Color,

    // ==================== Semantic Colors ====================
    pub success: Color,
    pub error: Color,
    pub loading: Color,
    pub star: Color,

    // ==================== Typography ====================
    /// Modifier applied to titles and headings
    pub heading_modifier: Modifier,
    /// Modifier applied to body copy
    pub body_modifier: Modifier,
}

impl StyleBundle {
    /// Whole-page base style
    pub fn style_page(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    /// Style for the page title
    pub fn style_title(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(self.heading_modifier)
    }

    /// Style for section headings
    pub fn style_subtitle(&self) -> Style {
        Style::default()
            .fg(self.subtitle)
            .add_modifier(self.heading_modifier)
    }

    /// Style for body copy
    pub fn style_text(&self) -> Style {
        Style::default().fg(self.text).add_modifier(self.body_modifier)
    }

    /// Style for muted copy
    pub fn style_text_muted(&self) -> Style {
        Style::default()
            .fg(self.text_muted)
            .add_modifier(self.body_modifier)
    }

    /// Style for the header bar
    pub fn style_header(&self) -> Style {
        Style::default().fg(self.nav).bg(self.bg_header)
    }

    /// Style for the logo
    pub fn style_logo(&self) -> Style {
        Style::default()
            .fg(self.nav)
            .bg(self.bg_header)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for an inactive navigation link
    pub fn style_nav(&self) -> Style {
        Style::default().fg(self.nav).bg(self.bg_header)
    }

    /// Style for the active navigation link
    pub fn style_nav_active(&self) -> Style {
        Style::default()
            .fg(self.nav)
            .bg(self.bg_header)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Style for card backgrounds
    pub fn style_card(&self) -> Style {
        Style::default().bg(self.bg_card)
    }

    /// Style for card titles
    pub fn style_card_title(&self) -> Style {
        Style::default()
            .fg(self.subtitle)
            .add_modifier(self.heading_modifier)
    }

    /// Style for card borders
    pub fn style_border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for focused/selected borders
    pub fn style_border_focus(&self) -> Style {
        Style::default()
            .fg(self.border_focus)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for prices and highlights
    pub fn style_accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for primary buttons
    pub fn style_button(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(self.button)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for disabled buttons
    pub fn style_button_disabled(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(75, 85, 99))
            .bg(Color::Rgb(156, 163, 175))
    }

    /// Style for category badges
    pub fn style_badge(&self) -> Style {
        Style::default().fg(self.badge_fg).bg(self.badge_bg)
    }

    /// Style for selected items
    pub fn style_selected(&self) -> Style {
        Style::default()
            .bg(self.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for form inputs
    pub fn style_input(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg_card)
    }

    /// Style for the input cursor
    pub fn style_cursor(&self) -> Style {
        Style::default().fg(self.bg_card).bg(self.accent)
    }

    /// Style for success banners
    pub fn style_success(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    /// Style for error text
    pub fn style_error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Style for warnings
    pub fn style_warning(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(217, 119, 6))
            .add_modifier(Modifier::BOLD)
    }

    /// Style for loading indicators
    pub fn style_loading(&self) -> Style {
        Style::default().fg(self.loading)
    }

    /// Style for rating stars
    pub fn style_star(&self) -> Style {
        Style::default().fg(self.star)
    }

    /// Style for key hints
    pub fn style_key(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}

// ==================== Theme Definitions ====================

/// Minimalist theme - light grays with a blue accent
pub const MINIMALIST: StyleBundle = StyleBundle {
    id: ThemeId::Minimalist,
    layout: PageLayout::Standard,
    bg: Color::Rgb(249, 250, 251),
    bg_card: Color::Rgb(255, 255, 255),
    bg_header: Color::Rgb(255, 255, 255),
    bg_highlight: Color::Rgb(239, 246, 255),
    title: Color::Rgb(31, 41, 55),
    subtitle: Color::Rgb(55, 65, 81),
    text: Color::Rgb(75, 85, 99),
    text_muted: Color::Rgb(107, 114, 128),
    nav: Color::Rgb(75, 85, 99),
    accent: Color::Rgb(37, 99, 235),
    button: Color::Rgb(37, 99, 235),
    badge_bg: Color::Rgb(219, 234, 254),
    badge_fg: Color::Rgb(30, 64, 175),
    border: Color::Rgb(229, 231, 235),
    border_focus: Color::Rgb(59, 130, 246),
    success: Color::Rgb(22, 101, 52),
    error: Color::Rgb(220, 38, 38),
    loading: Color::Rgb(75, 85, 99),
    star: Color::Rgb(250, 204, 21),
    heading_modifier: Modifier::empty(),
    body_modifier: Modifier::empty(),
};

/// Dark Professional theme - dark grays, serif-like bold headings
pub const DARK_PROFESSIONAL: StyleBundle = StyleBundle {
    id: ThemeId::DarkProfessional,
    layout: PageLayout::Sidebar,
    bg: Color::Rgb(17, 24, 39),
    bg_card: Color::Rgb(31, 41, 55),
    bg_header: Color::Rgb(17, 24, 39),
    bg_highlight: Color::Rgb(55, 65, 81),
    title: Color::Rgb(255, 255, 255),
    subtitle: Color::Rgb(255, 255, 255),
    text: Color::Rgb(209, 213, 219),
    text_muted: Color::Rgb(156, 163, 175),
    nav: Color::Rgb(209, 213, 219),
    accent: Color::Rgb(147, 197, 253),
    button: Color::Rgb(59, 130, 246),
    badge_bg: Color::Rgb(30, 58, 138),
    badge_fg: Color::Rgb(191, 219, 254),
    border: Color::Rgb(55, 65, 81),
    border_focus: Color::Rgb(96, 165, 250),
    success: Color::Rgb(187, 247, 208),
    error: Color::Rgb(248, 113, 113),
    loading: Color::Rgb(209, 213, 219),
    star: Color::Rgb(250, 204, 21),
    heading_modifier: Modifier::BOLD,
    body_modifier: Modifier::empty(),
};

/// Colorful Fun theme - purple and pink with playful headings
pub const COLORFUL_FUN: StyleBundle = StyleBundle {
    id: ThemeId::ColorfulFun,
    layout: PageLayout::Grid,
    bg: Color::Rgb(243, 232, 255),
    bg_card: Color::Rgb(252, 231, 243),
    bg_header: Color::Rgb(236, 72, 153),
    bg_highlight: Color::Rgb(233, 213, 255),
    title: Color::Rgb(147, 51, 234),
    subtitle: Color::Rgb(107, 33, 168),
    text: Color::Rgb(126, 34, 206),
    text_muted: Color::Rgb(147, 51, 234),
    nav: Color::Rgb(255, 255, 255),
    accent: Color::Rgb(219, 39, 119),
    button: Color::Rgb(168, 85, 247),
    badge_bg: Color::Rgb(233, 213, 255),
    badge_fg: Color::Rgb(107, 33, 168),
    border: Color::Rgb(233, 213, 255),
    border_focus: Color::Rgb(168, 85, 247),
    success: Color::Rgb(22, 101, 52),
    error: Color::Rgb(220, 38, 38),
    loading: Color::Rgb(147, 51, 234),
    star: Color::Rgb(234, 179, 8),
    heading_modifier: Modifier::BOLD.union(Modifier::ITALIC),
    body_modifier: Modifier::empty(),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_id_parse() {
        assert_eq!("theme1".parse::<ThemeId>().unwrap(), ThemeId::Minimalist);
        assert_eq!("theme2".parse::<ThemeId>().unwrap(), ThemeId::DarkProfessional);
        assert_eq!("theme3".parse::<ThemeId>().unwrap(), ThemeId::ColorfulFun);
        assert_eq!("Minimalist".parse::<ThemeId>().unwrap(), ThemeId::Minimalist);
        assert_eq!("dark".parse::<ThemeId>().unwrap(), ThemeId::DarkProfessional);
        assert_eq!(" colorful ".parse::<ThemeId>().unwrap(), ThemeId::ColorfulFun);
        assert!("theme4".parse::<ThemeId>().is_err());
        assert!("".parse::<ThemeId>().is_err());
    }

    #[test]
    fn test_from_id_is_strict() {
        assert_eq!(ThemeId::from_id("theme2"), Some(ThemeId::DarkProfessional));
        assert_eq!(ThemeId::from_id("dark"), None);
        assert_eq!(ThemeId::from_id("Theme1"), None);
    }

    #[test]
    fn test_theme_id_display() {
        assert_eq!(ThemeId::Minimalist.to_string(), "theme1");
        assert_eq!(ThemeId::DarkProfessional.to_string(), "theme2");
        assert_eq!(ThemeId::ColorfulFun.to_string(), "theme3");
    }

    #[test]
    fn test_default_is_first() {
        assert_eq!(ThemeId::default(), ThemeId::all()[0]);
        assert_eq!(ThemeId::all().len(), 3);
    }

    #[test]
    fn test_serde_uses_persisted_ids() {
        let json = serde_json::to_string(&ThemeId::ColorfulFun).unwrap();
        assert_eq!(json, "\"theme3\"");
        let parsed: ThemeId = serde_json::from_str("\"theme2\"").unwrap();
        assert_eq!(parsed, ThemeId::DarkProfessional);
    }

    #[test]
    fn test_styles_match_id() {
        for id in ThemeId::all() {
            assert_eq!(id.styles().id, *id);
        }
    }

    #[test]
    fn test_layouts() {
        assert_eq!(ThemeId::Minimalist.styles().layout, PageLayout::Standard);
        assert_eq!(ThemeId::DarkProfessional.styles().layout, PageLayout::Sidebar);
        assert_eq!(ThemeId::ColorfulFun.styles().layout, PageLayout::Grid);
        assert_eq!(PageLayout::Grid.columns(), 3);
        assert_eq!(PageLayout::Sidebar.columns(), 1);
    }

    #[test]
    fn test_typography_differs() {
        assert!(MINIMALIST.style_title().add_modifier.is_empty());
        assert!(DARK_PROFESSIONAL
            .style_title()
            .add_modifier
            .contains(Modifier::BOLD));
        assert!(COLORFUL_FUN
            .style_title()
            .add_modifier
            .contains(Modifier::ITALIC));
    }

    #[test]
    fn test_minimalist_colors() {
        let t = &MINIMALIST;
        assert!(matches!(t.bg, Color::Rgb(249, 250, 251)));
        assert!(matches!(t.accent, Color::Rgb(37, 99, 235)));
    }

    #[test]
    fn test_dark_professional_colors() {
        let t = &DARK_PROFESSIONAL;
        assert!(matches!(t.bg, Color::Rgb(17, 24, 39)));
        assert!(matches!(t.accent, Color::Rgb(147, 197, 253)));
    }

    #[test]
    fn test_colorful_fun_colors() {
        let t = &COLORFUL_FUN;
        assert!(matches!(t.bg_header, Color::Rgb(236, 72, 153)));
        assert!(matches!(t.accent, Color::Rgb(219, 39, 119)));
    }

    #[test]
    fn test_style_constructors() {
        for id in ThemeId::all() {
            let t = id.styles();
            let _ = t.style_page();
            let _ = t.style_header();
            let _ = t.style_nav_active();
            let _ = t.style_card();
            let _ = t.style_button();
            let _ = t.style_badge();
            let _ = t.style_error();
            let _ = t.style_success();
            assert_eq!(t.style_accent().fg, Some(t.accent));
        }
    }
}
