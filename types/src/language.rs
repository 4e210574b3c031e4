/// Language the dialogue session is conducted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Swedish,
}

impl Language {
    /// ISO 639-3 code sent to the connector.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Swedish => "swe",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "eng" | "en" => Ok(Language::English),
            "swedish" | "swe" | "sv" => Ok(Language::Swedish),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}
