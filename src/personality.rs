use std::fmt;
use std::str::FromStr;

/// Tone directive attached to every outbound user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Personality {
    #[default]
    Friendly,
    Professional,
    Funny,
}

impl Personality {
    pub const ALL: [Personality; 3] = [Self::Friendly, Self::Professional, Self::Funny];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Friendly => "Friendly",
            Self::Professional => "Professional",
            Self::Funny => "Funny",
        }
    }

    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            Self::Friendly => "Be friendly and encouraging.",
            Self::Professional => "Be professional and concise.",
            Self::Funny => "Be humorous and witty.",
        }
    }

    #[must_use]
    pub fn labels() -> Vec<String> {
        Self::ALL
            .iter()
            .map(|personality| personality.label().to_string())
            .collect()
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Personality {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|personality| personality.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "Unknown personality '{wanted}'. Choose one of: {}",
                    Self::labels().join(", ")
                )
            })
    }
}
