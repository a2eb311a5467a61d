// src/render/mod.rs
pub mod html;
pub mod page;

use serde::Serialize;

use crate::avatar::AvatarService;
use crate::models::staff::{is_online, StaffRoster};
use crate::models::status::StatusResponse;

pub const HERO_ONLINE: &str = "Server is online ✔";
pub const HERO_OFFLINE: &str = "Server is offline ✖";
pub const HERO_FAILED: &str = "Failed to fetch status.";

pub const NO_PLAYERS: &str = "No players online.";
pub const PLAYERS_HIDDEN: &str = "Players are online but the server has hidden the player list.";
pub const LOAD_FAILED: &str = "Failed to load server info. Try again later.";

pub const REFRESH_IDLE: &str = "⟳";
pub const REFRESH_BUSY: &str = "…";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    Offline,
}

impl Presence {
    pub fn of(ign: &str, online_names: &[String]) -> Self {
        if is_online(ign, online_names) {
            Self::Online
        } else {
            Self::Offline
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCard {
    pub name: String,
    pub avatar_url: String,
}

/// Contents of the player roster area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RosterView {
    Loading,
    NoPlayers,
    Hidden,
    Failed,
    Players { cards: Vec<PlayerCard> },
}

impl RosterView {
    /// Placeholder text, if the roster is not showing cards.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some("Loading players…"),
            Self::NoPlayers => Some(NO_PLAYERS),
            Self::Hidden => Some(PLAYERS_HIDDEN),
            Self::Failed => Some(LOAD_FAILED),
            Self::Players { .. } => None,
        }
    }
}

/// The display regions a status poll writes to.
pub trait RenderTarget {
    fn set_connection(&mut self, presence: Presence);
    fn set_hero(&mut self, text: &str);
    fn set_version(&mut self, text: &str);
    fn set_player_count(&mut self, text: &str);
    fn set_roster(&mut self, roster: RosterView);
    fn set_staff_badge(&mut self, ign: &str, presence: Presence);
    fn set_owner_badge(&mut self, presence: Presence);
    fn set_refresh_control(&mut self, enabled: bool, label: &str);
}

pub fn version_text(version: Option<&str>) -> String {
    match version {
        Some(v) => format!("Version {}", v),
        None => "Version Unknown".to_string(),
    }
}

pub fn player_count_text(online: u32, max: u32) -> String {
    format!("{} / {} players", online, max)
}

/// Writes a full successful poll result. Every region it owns is
/// overwritten, so repeating it with the same input changes nothing.
pub fn render_status<T: RenderTarget>(
    target: &mut T,
    status: &StatusResponse,
    staff: &StaffRoster,
    avatars: &AvatarService,
) {
    target.set_version(&version_text(status.version.as_deref()));

    let names = if status.online {
        target.set_connection(Presence::Online);
        target.set_hero(HERO_ONLINE);
        target.set_player_count(&player_count_text(status.players.online, status.players.max));
        target.set_roster(roster_for(status, avatars));
        status.players.names()
    } else {
        target.set_connection(Presence::Offline);
        target.set_hero(HERO_OFFLINE);
        target.set_player_count(&player_count_text(0, 0));
        target.set_roster(RosterView::NoPlayers);
        Vec::new()
    };

    for member in staff.members() {
        target.set_staff_badge(&member.ign, Presence::of(&member.ign, &names));
    }
    if let Some(owner) = staff.owner() {
        target.set_owner_badge(Presence::of(owner, &names));
    }
}

fn roster_for(status: &StatusResponse, avatars: &AvatarService) -> RosterView {
    if status.players.online == 0 {
        return RosterView::NoPlayers;
    }
    if status.players.list.is_empty() {
        return RosterView::Hidden;
    }
    let cards = status
        .players
        .list
        .iter()
        .map(|player| PlayerCard {
            name: player.name().to_string(),
            avatar_url: avatars.url_for(player.name()),
        })
        .collect();
    RosterView::Players { cards }
}

/// Failed poll: only the roster and hero change.
pub fn render_failure<T: RenderTarget>(target: &mut T) {
    target.set_roster(RosterView::Failed);
    target.set_hero(HERO_FAILED);
}

pub fn render_busy<T: RenderTarget>(target: &mut T) {
    target.set_refresh_control(false, REFRESH_BUSY);
}

pub fn render_idle<T: RenderTarget>(target: &mut T) {
    target.set_refresh_control(true, REFRESH_IDLE);
}
