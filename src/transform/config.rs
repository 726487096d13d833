use clap::ValueEnum;
use std::fmt;

/// Where a declaration is moved to.
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ScopeMode {
    /// The nearest enclosing function body, or the program.
    Function,
    /// The nearest enclosing `{ ... }` block, function body, or the program.
    Block,
}

/// Shape of the declarations inserted at the top of a scope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeaderStyle {
    /// `var a; var b;`
    PerName,
    /// `var a, b;`
    Combined,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoistConfig {
    pub scope: ScopeMode,
    pub header: HeaderStyle,
}

impl HoistConfig {
    pub fn new() -> Self {
        HoistConfig {
            scope: ScopeMode::Function,
            header: HeaderStyle::PerName,
        }
    }

    pub fn with_scope(mut self, scope: ScopeMode) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_header(mut self, header: HeaderStyle) -> Self {
        self.header = header;
        self
    }
}

impl Default for HoistConfig {
    fn default() -> Self {
        HoistConfig::new()
    }
}

impl fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScopeMode::Function => write!(f, "function"),
            ScopeMode::Block => write!(f, "block"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_function_scope() {
        let config = HoistConfig::default();
        assert_eq!(config.scope, ScopeMode::Function);
        assert_eq!(config.header, HeaderStyle::PerName);
    }

    #[test]
    fn scope_names_match_display() {
        for mode in ScopeMode::value_variants() {
            assert_eq!(ScopeMode::from_str(&mode.to_string(), false), Ok(*mode));
        }
        assert!(ScopeMode::from_str("module", false).is_err());
    }
}
