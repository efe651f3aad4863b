//! Store configuration.

/// Configuration shared by entity stores.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether collections are written as indented JSON.
    pub pretty_print: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty_print: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether collections are written as indented JSON.
    #[must_use]
    pub const fn pretty_print(mut self, value: bool) -> Self {
        self.pretty_print = value;
        self
    }
}
