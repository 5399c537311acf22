use std::fmt;

pub const CHAMPION_SEPARATOR: &str = "|";

/// Order-independent identity of a five-champion team, qualified by role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamKey {
    champions: String,
    role: String,
}

impl TeamKey {
    pub fn new(roster: &[String], role: &str) -> Self {
        let mut sorted: Vec<&str> = roster.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        TeamKey {
            champions: sorted.join(CHAMPION_SEPARATOR),
            role: role.to_string(),
        }
    }

    pub fn champions(&self) -> &str {
        &self.champions
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

impl fmt::Display for TeamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.champions, self.role)
    }
}
