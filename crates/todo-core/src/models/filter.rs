use crate::models::Todo;

/// Client-side completion filter. Never mutates the underlying list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Open,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Open, Filter::Completed];

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Open => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn apply(&self, todos: &[Todo]) -> Vec<Todo> {
        todos.iter().filter(|t| self.matches(t)).cloned().collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Open => "Open",
            Filter::Completed => "Completed",
        }
    }

    /// Next filter in selector order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Filter::All => Filter::Open,
            Filter::Open => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "open" => Ok(Filter::Open),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(format!("unknown filter: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Filter::All.next(), Filter::Open);
        assert_eq!(Filter::Completed.next(), Filter::All);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Completed".parse::<Filter>(), Ok(Filter::Completed));
        assert!("closed".parse::<Filter>().is_err());
    }
}
