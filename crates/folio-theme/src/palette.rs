#![forbid(unsafe_code)]

//! The complete color table.
//!
//! [`Palette`] has one field per [`Role`], and [`PALETTES`] has one palette per
//! [`Theme`]. Adding a role without giving every theme a color, or adding a
//! theme without a palette, does not compile.

use ratatui::style::Color;

use crate::Theme;

/// Semantic element roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    PageBg,
    NavBg,
    NavText,
    HeaderBg,
    HeaderText,
    CardBg,
    CardBorder,
    Title,
    BodyText,
    MutedText,
    Accent,
    Link,
    InputBg,
    InputText,
    InputBorder,
    InputFocusBorder,
    ErrorText,
    SuccessText,
    TagBg,
    TagText,
    FeaturedBadge,
    ProgressFill,
    ProgressTrack,
}

impl Role {
    pub const ALL: [Role; 23] = [
        Role::PageBg,
        Role::NavBg,
        Role::NavText,
        Role::HeaderBg,
        Role::HeaderText,
        Role::CardBg,
        Role::CardBorder,
        Role::Title,
        Role::BodyText,
        Role::MutedText,
        Role::Accent,
        Role::Link,
        Role::InputBg,
        Role::InputText,
        Role::InputBorder,
        Role::InputFocusBorder,
        Role::ErrorText,
        Role::SuccessText,
        Role::TagBg,
        Role::TagText,
        Role::FeaturedBadge,
        Role::ProgressFill,
        Role::ProgressTrack,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Role::PageBg => "page-background",
            Role::NavBg => "nav-background",
            Role::NavText => "nav-text",
            Role::HeaderBg => "header-background",
            Role::HeaderText => "header-text",
            Role::CardBg => "card-background",
            Role::CardBorder => "card-border",
            Role::Title => "title",
            Role::BodyText => "body-text",
            Role::MutedText => "muted-text",
            Role::Accent => "accent",
            Role::Link => "link",
            Role::InputBg => "input-background",
            Role::InputText => "input-text",
            Role::InputBorder => "input-border",
            Role::InputFocusBorder => "input-focus-border",
            Role::ErrorText => "error-text",
            Role::SuccessText => "success-text",
            Role::TagBg => "tag-background",
            Role::TagText => "tag-text",
            Role::FeaturedBadge => "featured-badge",
            Role::ProgressFill => "progress-fill",
            Role::ProgressTrack => "progress-track",
        }
    }
}

/// Colors for every role of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub page_bg: Color,
    pub nav_bg: Color,
    pub nav_text: Color,
    pub header_bg: Color,
    pub header_text: Color,
    pub card_bg: Color,
    pub card_border: Color,
    pub title: Color,
    pub body_text: Color,
    pub muted_text: Color,
    pub accent: Color,
    pub link: Color,
    pub input_bg: Color,
    pub input_text: Color,
    pub input_border: Color,
    pub input_focus_border: Color,
    pub error_text: Color,
    pub success_text: Color,
    pub tag_bg: Color,
    pub tag_text: Color,
    pub featured_badge: Color,
    pub progress_fill: Color,
    pub progress_track: Color,
}

impl Palette {
    pub const fn get(&self, role: Role) -> Color {
        match role {
            Role::PageBg => self.page_bg,
            Role::NavBg => self.nav_bg,
            Role::NavText => self.nav_text,
            Role::HeaderBg => self.header_bg,
            Role::HeaderText => self.header_text,
            Role::CardBg => self.card_bg,
            Role::CardBorder => self.card_border,
            Role::Title => self.title,
            Role::BodyText => self.body_text,
            Role::MutedText => self.muted_text,
            Role::Accent => self.accent,
            Role::Link => self.link,
            Role::InputBg => self.input_bg,
            Role::InputText => self.input_text,
            Role::InputBorder => self.input_border,
            Role::InputFocusBorder => self.input_focus_border,
            Role::ErrorText => self.error_text,
            Role::SuccessText => self.success_text,
            Role::TagBg => self.tag_bg,
            Role::TagText => self.tag_text,
            Role::FeaturedBadge => self.featured_badge,
            Role::ProgressFill => self.progress_fill,
            Role::ProgressTrack => self.progress_track,
        }
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(r, g, b)
}

/// One palette per theme, indexed by [`Theme::index`].
pub const PALETTES: [Palette; Theme::COUNT] = [
    // Light: purple on lavender.
    Palette {
        page_bg: rgb(250, 245, 255),
        nav_bg: rgb(88, 28, 135),
        nav_text: rgb(255, 255, 255),
        header_bg: rgb(147, 51, 234),
        header_text: rgb(255, 255, 255),
        card_bg: rgb(255, 255, 255),
        card_border: rgb(192, 132, 252),
        title: rgb(88, 28, 135),
        body_text: rgb(55, 65, 81),
        muted_text: rgb(107, 114, 128),
        accent: rgb(236, 72, 153),
        link: rgb(126, 34, 206),
        input_bg: rgb(255, 255, 255),
        input_text: rgb(31, 41, 55),
        input_border: rgb(209, 213, 219),
        input_focus_border: rgb(147, 51, 234),
        error_text: rgb(220, 38, 38),
        success_text: rgb(22, 163, 74),
        tag_bg: rgb(243, 232, 255),
        tag_text: rgb(107, 33, 168),
        featured_badge: rgb(202, 138, 4),
        progress_fill: rgb(236, 72, 153),
        progress_track: rgb(233, 213, 255),
    },
    // Dark: slate with violet accents.
    Palette {
        page_bg: rgb(17, 24, 39),
        nav_bg: rgb(3, 7, 18),
        nav_text: rgb(229, 231, 235),
        header_bg: rgb(49, 46, 129),
        header_text: rgb(243, 244, 246),
        card_bg: rgb(31, 41, 55),
        card_border: rgb(75, 85, 99),
        title: rgb(196, 181, 253),
        body_text: rgb(209, 213, 219),
        muted_text: rgb(156, 163, 175),
        accent: rgb(244, 114, 182),
        link: rgb(167, 139, 250),
        input_bg: rgb(55, 65, 81),
        input_text: rgb(243, 244, 246),
        input_border: rgb(75, 85, 99),
        input_focus_border: rgb(167, 139, 250),
        error_text: rgb(248, 113, 113),
        success_text: rgb(74, 222, 128),
        tag_bg: rgb(76, 29, 149),
        tag_text: rgb(237, 233, 254),
        featured_badge: rgb(250, 204, 21),
        progress_fill: rgb(167, 139, 250),
        progress_track: rgb(55, 65, 81),
    },
    // Ocean: deep blues and teals.
    Palette {
        page_bg: rgb(8, 47, 73),
        nav_bg: rgb(12, 74, 110),
        nav_text: rgb(224, 242, 254),
        header_bg: rgb(14, 116, 144),
        header_text: rgb(240, 249, 255),
        card_bg: rgb(7, 89, 133),
        card_border: rgb(56, 189, 248),
        title: rgb(186, 230, 253),
        body_text: rgb(224, 242, 254),
        muted_text: rgb(125, 211, 252),
        accent: rgb(45, 212, 191),
        link: rgb(103, 232, 249),
        input_bg: rgb(12, 74, 110),
        input_text: rgb(240, 249, 255),
        input_border: rgb(2, 132, 199),
        input_focus_border: rgb(45, 212, 191),
        error_text: rgb(253, 164, 175),
        success_text: rgb(110, 231, 183),
        tag_bg: rgb(19, 78, 74),
        tag_text: rgb(153, 246, 228),
        featured_badge: rgb(253, 224, 71),
        progress_fill: rgb(45, 212, 191),
        progress_track: rgb(12, 74, 110),
    },
];

/// Color of `role` under `theme`. Total over both inputs.
pub const fn resolve(theme: Theme, role: Role) -> Color {
    PALETTES[theme.index()].get(role)
}
