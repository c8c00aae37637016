//! Service icon names.
//!
//! Services store a free-form icon name. Rendering only knows a closed set of
//! glyphs, so names resolve through [`ServiceIcon::resolve`] which maps a few
//! legacy names onto the closest glyph and falls back to [`ServiceIcon::FileCheck`].

use serde::{Deserialize, Serialize};

/// Closed set of glyphs a service card can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServiceIcon {
    BookOpen,
    FileText,
    Users,
    GraduationCap,
    Plane,
    #[default]
    FileCheck,
}

impl ServiceIcon {
    /// Every selectable icon, in the order the admin form lists them.
    pub const ALL: [Self; 6] = [
        Self::BookOpen,
        Self::FileText,
        Self::Users,
        Self::GraduationCap,
        Self::Plane,
        Self::FileCheck,
    ];

    /// Resolve a stored icon name. Unknown names fall back to the default.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        match name.trim() {
            "BookOpen" | "Brain" => Self::BookOpen,
            "FileText" | "TrendingUp" => Self::FileText,
            "Users" => Self::Users,
            "GraduationCap" => Self::GraduationCap,
            "Plane" => Self::Plane,
            _ => Self::FileCheck,
        }
    }

    /// The canonical stored name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BookOpen => "BookOpen",
            Self::FileText => "FileText",
            Self::Users => "Users",
            Self::GraduationCap => "GraduationCap",
            Self::Plane => "Plane",
            Self::FileCheck => "FileCheck",
        }
    }

    /// Text glyph rendered in place of an icon font.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::BookOpen => "📖",
            Self::FileText => "📄",
            Self::Users => "👥",
            Self::GraduationCap => "🎓",
            Self::Plane => "✈️",
            Self::FileCheck => "✅",
        }
    }
}

impl std::fmt::Display for ServiceIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_names() {
        for icon in ServiceIcon::ALL {
            assert_eq!(ServiceIcon::resolve(icon.name()), icon);
        }
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(ServiceIcon::resolve("Brain"), ServiceIcon::BookOpen);
        assert_eq!(ServiceIcon::resolve("TrendingUp"), ServiceIcon::FileText);
        assert_eq!(ServiceIcon::resolve("Settings"), ServiceIcon::FileCheck);
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        assert_eq!(ServiceIcon::resolve(""), ServiceIcon::FileCheck);
        assert_eq!(ServiceIcon::resolve("Rocket"), ServiceIcon::FileCheck);
    }
}
