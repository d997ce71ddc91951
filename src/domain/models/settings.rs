use std::fmt;

/// Interface language. Parsing is case-insensitive and falls back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppLanguage {
    AZ,
    EN,
}

impl AppLanguage {
    pub const ALL: [AppLanguage; 2] = [AppLanguage::AZ, AppLanguage::EN];

    pub fn name(&self) -> &'static str {
        match self {
            AppLanguage::AZ => "AZ",
            AppLanguage::EN => "EN",
        }
    }

    pub fn of(value: &str) -> Self {
        let upper = value.to_uppercase();
        Self::ALL.into_iter().find(|lang| lang.name() == upper).unwrap_or(AppLanguage::EN)
    }
}

impl fmt::Display for AppLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of the launch check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashStatus {
    Registered(String),
    NotRegistered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parsing_is_case_insensitive_with_english_fallback() {
        assert_eq!(AppLanguage::of("az"), AppLanguage::AZ);
        assert_eq!(AppLanguage::of("EN"), AppLanguage::EN);
        assert_eq!(AppLanguage::of("ru"), AppLanguage::EN);
        assert_eq!(AppLanguage::of(""), AppLanguage::EN);
    }
}
