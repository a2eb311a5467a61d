// src/models/staff.rs
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffMember {
    pub ign: String,
    pub role: String,
}

/// Known staff names shown with presence badges, plus the owner badge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffRoster {
    members: Vec<StaffMember>,
    owner: Option<String>,
}

impl StaffRoster {
    /// Parses `Name:Role,Name2:Role2`. A name without a role gets "Staff".
    pub fn parse(raw: &str) -> Self {
        let members = raw
            .split(',')
            .filter_map(|entry| {
                let entry = entry.trim();
                if entry.is_empty() {
                    return None;
                }
                let (ign, role) = entry.split_once(':').unwrap_or((entry, "Staff"));
                let ign = ign.trim();
                if ign.is_empty() {
                    return None;
                }
                let role = match role.trim() {
                    "" => "Staff",
                    r => r,
                };
                Some(StaffMember { ign: ign.to_string(), role: role.to_string() })
            })
            .collect();

        Self { members, owner: None }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        let owner = owner.trim();
        self.owner = if owner.is_empty() { None } else { Some(owner.to_string()) };
        self
    }

    pub fn members(&self) -> &[StaffMember] {
        &self.members
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

/// IGNs are case-insensitive in Minecraft.
pub fn is_online(ign: &str, online_names: &[String]) -> bool {
    online_names.iter().any(|name| name.eq_ignore_ascii_case(ign))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roster_entries() {
        let roster = StaffRoster::parse("Steve:Admin, Alex:Moderator,,Notch");
        let igns: Vec<_> = roster.members().iter().map(|m| m.ign.as_str()).collect();
        assert_eq!(igns, ["Steve", "Alex", "Notch"]);
        assert_eq!(roster.members()[1].role, "Moderator");
        assert_eq!(roster.members()[2].role, "Staff");
    }

    #[test]
    fn blank_owner_is_ignored() {
        assert_eq!(StaffRoster::default().with_owner("  ").owner(), None);
        assert_eq!(StaffRoster::default().with_owner("Herobrine").owner(), Some("Herobrine"));
    }

    #[test]
    fn presence_ignores_case() {
        let names = vec!["Steve".to_string(), "alex".to_string()];
        assert!(is_online("steve", &names));
        assert!(is_online("Alex", &names));
        assert!(!is_online("Notch", &names));
    }
}
