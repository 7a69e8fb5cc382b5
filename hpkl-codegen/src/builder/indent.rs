//! Indentation configuration for code generation.

const SPACES: &str = "        ";

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width, at most 8.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation, the default for both Java and Kotlin output.
    pub const TWO_SPACES: Self = Self::Spaces(2);

    /// 4-space indentation.
    pub const FOUR_SPACES: Self = Self::Spaces(4);

    /// Parse the configured indentation text.
    ///
    /// Accepts a single tab or one to eight spaces.
    pub fn parse(text: &str) -> Option<Self> {
        if text == "\t" {
            return Some(Self::Tab);
        }
        let width = text.len();
        if (1..=SPACES.len()).contains(&width) && text.bytes().all(|b| b == b' ') {
            Some(Self::Spaces(width as u8))
        } else {
            None
        }
    }

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(width) => &SPACES[..(*width as usize).clamp(1, SPACES.len())],
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TWO_SPACES
    }
}
