use {
    crate::domain::eth,
    std::collections::HashMap,
};

/// The symbol to address registry clients trade against. Built once at
/// startup from configuration and read-only afterwards.
#[derive(Debug)]
pub struct Registry(HashMap<String, eth::TokenAddress>);

impl Registry {
    pub fn new(entries: impl IntoIterator<Item = (String, eth::TokenAddress)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn resolve(&self, symbol: &str) -> Option<eth::TokenAddress> {
        self.0.get(symbol).copied()
    }
}
