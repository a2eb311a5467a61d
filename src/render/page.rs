// src/render/page.rs
use serde::Serialize;

use crate::models::staff::StaffRoster;
use crate::render::{player_count_text, Presence, RenderTarget, RosterView, REFRESH_IDLE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffBadge {
    pub ign: String,
    pub role: String,
    pub presence: Presence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerBadge {
    pub ign: String,
    pub presence: Presence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshControl {
    pub enabled: bool,
    pub label: String,
}

/// In-memory copy of everything the fan page displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub address: String,
    pub connection: Presence,
    pub hero: String,
    pub version: String,
    pub player_count: String,
    pub roster: RosterView,
    pub staff: Vec<StaffBadge>,
    pub owner: Option<OwnerBadge>,
    pub refresh: RefreshControl,
}

impl PageState {
    pub fn new(address: &str, staff: &StaffRoster) -> Self {
        Self {
            address: address.to_string(),
            connection: Presence::Offline,
            hero: "Checking server status…".to_string(),
            version: "Version Unknown".to_string(),
            player_count: player_count_text(0, 0),
            roster: RosterView::Loading,
            staff: staff
                .members()
                .iter()
                .map(|m| StaffBadge {
                    ign: m.ign.clone(),
                    role: m.role.clone(),
                    presence: Presence::Offline,
                })
                .collect(),
            owner: staff.owner().map(|ign| OwnerBadge {
                ign: ign.to_string(),
                presence: Presence::Offline,
            }),
            refresh: RefreshControl {
                enabled: true,
                label: REFRESH_IDLE.to_string(),
            },
        }
    }
}

impl RenderTarget for PageState {
    fn set_connection(&mut self, presence: Presence) {
        self.connection = presence;
    }

    fn set_hero(&mut self, text: &str) {
        self.hero = text.to_string();
    }

    fn set_version(&mut self, text: &str) {
        self.version = text.to_string();
    }

    fn set_player_count(&mut self, text: &str) {
        self.player_count = text.to_string();
    }

    fn set_roster(&mut self, roster: RosterView) {
        self.roster = roster;
    }

    // Badges only exist for names declared at startup. One name may hold
    // several roles, and each of its badges follows the same presence.
    fn set_staff_badge(&mut self, ign: &str, presence: Presence) {
        for badge in self.staff.iter_mut().filter(|b| b.ign == ign) {
            badge.presence = presence;
        }
    }

    fn set_owner_badge(&mut self, presence: Presence) {
        if let Some(owner) = self.owner.as_mut() {
            owner.presence = presence;
        }
    }

    fn set_refresh_control(&mut self, enabled: bool, label: &str) {
        self.refresh.enabled = enabled;
        self.refresh.label = label.to_string();
    }
}
