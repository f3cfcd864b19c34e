use serde::{Deserialize, Serialize};

/// Membership category chosen at registration.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MemberType {
    #[default]
    Regular,
    Associate,
    Honorary,
}

impl MemberType {
    pub const ALL: [MemberType; 3] = [Self::Regular, Self::Associate, Self::Honorary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Associate => "Associate",
            Self::Honorary => "Honorary",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            Self::Regular => "Full membership",
            Self::Associate => "Associate member",
            Self::Honorary => "Honorary member",
        }
    }
}

impl std::fmt::Display for MemberType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for MemberType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for MemberType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "associate" => Ok(Self::Associate),
            "honorary" => Ok(Self::Honorary),
            _ => Err(format!("invalid member type: {}", s)),
        }
    }
}
