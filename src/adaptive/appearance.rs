/// A named host appearance, e.g. `NSAppearanceNameDarkAqua` or a desktop theme name.
///
/// Only the name matters: an appearance is dark when its name contains `dark`, ignoring case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Appearance {
    name: String,
}

impl Appearance {
    /// Standard light appearance name.
    pub const AQUA: &'static str = "NSAppearanceNameAqua";
    /// Standard dark appearance name.
    pub const DARK_AQUA: &'static str = "NSAppearanceNameDarkAqua";

    /// An appearance with an arbitrary identifier.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The standard light appearance.
    pub fn light() -> Self {
        Self::named(Self::AQUA)
    }

    /// The standard dark appearance.
    pub fn dark() -> Self {
        Self::named(Self::DARK_AQUA)
    }

    /// Identifier this appearance was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the identifier contains `dark` (case-insensitive).
    pub fn is_dark(&self) -> bool {
        self.name.to_lowercase().contains("dark")
    }

    /// Light or dark classification.
    pub fn mode(&self) -> AppearanceMode {
        if self.is_dark() {
            AppearanceMode::Dark
        } else {
            AppearanceMode::Light
        }
    }
}

/// The two variants an adaptive image is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppearanceMode {
    /// Light menu bar: template pixels are drawn black.
    Light,
    /// Dark menu bar: template pixels are drawn white.
    Dark,
}

/// Draw-time source of the ambient appearance, injected by the host integration.
pub trait AppearanceProvider {
    /// Appearance scoped to the current drawing operation, if the host has one.
    fn drawing_appearance(&self) -> Option<Appearance> {
        None
    }

    /// Effective appearance of the application as a whole.
    fn application_appearance(&self) -> Appearance;

    /// Drawing appearance, falling back to the application appearance.
    fn current(&self) -> Appearance {
        self.drawing_appearance()
            .unwrap_or_else(|| self.application_appearance())
    }
}

/// Provider that always reports the same appearance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedAppearance(pub Appearance);

impl AppearanceProvider for FixedAppearance {
    fn application_appearance(&self) -> Appearance {
        self.0.clone()
    }
}

impl<F> AppearanceProvider for F
where
    F: Fn() -> Appearance,
{
    fn application_appearance(&self) -> Appearance {
        self()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/adaptive/appearance.rs"]
mod tests;
