use cadence_application::TokenVocabulary;

/// Merge tokens every workspace offers.
pub const DEFAULT_TOKENS: [&str; 6] = [
    "{{contact.first_name}}",
    "{{contact.last_name}}",
    "{{contact.email}}",
    "{{contact.phone}}",
    "{{contact.owner}}",
    "{{account.name}}",
];

/// Token vocabulary backed by a fixed list.
#[derive(Debug, Clone)]
pub struct StaticTokenVocabulary {
    tokens: Vec<String>,
}

impl StaticTokenVocabulary {
    /// Creates a vocabulary of the default tokens followed by `extra` ones.
    ///
    /// Blank and repeated tokens are skipped.
    #[must_use]
    pub fn with_extra_tokens<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: Vec<String> = DEFAULT_TOKENS
            .iter()
            .map(|token| (*token).to_owned())
            .collect();
        for token in extra {
            let token = token.into().trim().to_owned();
            if !token.is_empty() && !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        Self { tokens }
    }
}

impl Default for StaticTokenVocabulary {
    fn default() -> Self {
        Self::with_extra_tokens(Vec::<String>::new())
    }
}

impl TokenVocabulary for StaticTokenVocabulary {
    fn tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }
}

#[cfg(test)]
mod tests {
    use cadence_application::TokenVocabulary;

    use super::{DEFAULT_TOKENS, StaticTokenVocabulary};

    #[test]
    fn extra_tokens_follow_defaults_once() {
        let vocabulary = StaticTokenVocabulary::with_extra_tokens([
            "{{deal.stage}}",
            " ",
            "{{contact.owner}}",
            "{{deal.stage}}",
        ]);

        let tokens = vocabulary.tokens();
        assert_eq!(tokens.len(), DEFAULT_TOKENS.len() + 1);
        assert_eq!(tokens.last().map(String::as_str), Some("{{deal.stage}}"));
    }
}
