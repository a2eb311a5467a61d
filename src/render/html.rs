// src/render/html.rs
use std::fmt::Write;

use crate::clipboard::CopyOutcome;
use crate::config::ServerAddress;
use crate::effects::{
    parallax_transform, NAV_SHRINK_CLASS, NAV_SHRINK_OFFSET, PARALLAX_MAX_PX, REVEAL_CLASS,
    REVEAL_THRESHOLD, REVEAL_VISIBLE_CLASS,
};
use crate::render::page::PageState;
use crate::render::{Presence, RosterView};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn presence_class(presence: Presence) -> &'static str {
    match presence {
        Presence::Online => "online",
        Presence::Offline => "offline",
    }
}

fn roster_html(roster: &RosterView) -> String {
    match roster {
        RosterView::Players { cards } => {
            let mut out = String::from(r#"<div class="player-grid">"#);
            for card in cards {
                let name = escape(&card.name);
                let _ = write!(
                    out,
                    r#"<div class="player-card"><img class="player-avatar" alt="{name}" src="{src}"><div>{name}</div></div>"#,
                    name = name,
                    src = escape(&card.avatar_url),
                );
            }
            out.push_str("</div>");
            out
        }
        other => format!(
            r#"<p class="muted">{}</p>"#,
            escape(other.message().unwrap_or_default())
        ),
    }
}

fn staff_html(page: &PageState) -> String {
    let mut out = String::new();
    if let Some(owner) = &page.owner {
        let _ = write!(
            out,
            r#"<div class="staff-card owner"><span class="staff-name">{ign}</span><span class="staff-role">Owner</span><span id="owner-status" class="badge {class}">{label}</span></div>"#,
            ign = escape(&owner.ign),
            class = presence_class(owner.presence),
            label = owner.presence.label(),
        );
    }
    for badge in &page.staff {
        let _ = write!(
            out,
            r#"<div class="staff-card"><span class="staff-name">{ign}</span><span class="staff-role">{role}</span><span class="badge staff-status {class}" data-ign="{ign}">{label}</span></div>"#,
            ign = escape(&badge.ign),
            role = escape(&badge.role),
            class = presence_class(badge.presence),
            label = badge.presence.label(),
        );
    }
    out
}

/// JSON string literal safe to embed inside a `<script>` element.
fn js_string(raw: &str) -> String {
    serde_json::to_string(raw)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

fn client_script(address: &ServerAddress) -> String {
    format!(
        r#"<script>
const REVEAL_THRESHOLD = {reveal};
const NAV_SHRINK_OFFSET = {nav};
const PARALLAX_MAX_PX = {parallax};
function copyIP() {{
  navigator.clipboard.writeText({address})
    .then(() => alert({copied}))
    .catch(() => alert({failed}));
}}
document.getElementById("refresh-btn").addEventListener("click", (e) => {{
  e.target.disabled = true;
  fetch("/api/refresh", {{ method: "POST" }}).finally(() => location.reload());
}});
const observer = new IntersectionObserver((entries) => {{
  entries.forEach((entry) => {{
    if (entry.isIntersecting && entry.intersectionRatio >= REVEAL_THRESHOLD) {{
      entry.target.classList.add("{visible}");
      observer.unobserve(entry.target);
    }}
  }});
}}, {{ threshold: REVEAL_THRESHOLD }});
document.querySelectorAll(".{reveal_class}").forEach((el) => observer.observe(el));
const nav = document.getElementById("nav");
window.addEventListener("scroll", () => {{
  nav.classList.toggle("{shrink}", window.scrollY > NAV_SHRINK_OFFSET);
}});
const bg = document.getElementById("bg-image");
window.addEventListener("mousemove", (e) => {{
  const cx = window.innerWidth / 2;
  const cy = window.innerHeight / 2;
  const clamp = (v) => Math.max(-1, Math.min(1, v));
  const x = -clamp((e.clientX - cx) / cx) * PARALLAX_MAX_PX;
  const y = -clamp((e.clientY - cy) / cy) * PARALLAX_MAX_PX;
  bg.style.transform = `{transform}`;
}});
</script>"#,
        reveal = REVEAL_THRESHOLD,
        nav = NAV_SHRINK_OFFSET,
        parallax = PARALLAX_MAX_PX,
        address = js_string(address.as_str()),
        copied = js_string(&CopyOutcome::Copied.alert_message(address)),
        failed = js_string(&CopyOutcome::Failed.alert_message(address)),
        visible = REVEAL_VISIBLE_CLASS,
        reveal_class = REVEAL_CLASS,
        shrink = NAV_SHRINK_CLASS,
        transform = parallax_transform("${x}", "${y}"),
    )
}

/// Renders the whole fan page from a state snapshot.
pub fn render_page(page: &PageState, address: &ServerAddress, year: i32) -> String {
    let refresh_disabled = if page.refresh.enabled { "" } else { " disabled" };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{address}</title>
</head>
<body>
<div id="bg-image" style="transform: {transform}"></div>
<nav id="nav" class="nav"><span class="brand">{address}</span></nav>
<header class="hero {reveal}">
  <p id="hero-online">{hero}</p>
  <button class="ip" onclick="copyIP()"><span id="ip-text">{address}</span></button>
</header>
<section id="status" class="{reveal}">
  <span id="online-dot" class="dot {dot}"></span>
  <span id="online-text">{connection}</span>
  <span id="version-badge" class="badge">{version}</span>
  <span id="player-count">{count}</span>
  <button id="refresh-btn"{refresh_disabled}>{refresh_label}</button>
</section>
<section id="players" class="{reveal}">
  <div id="players-content">{roster}</div>
</section>
<section id="staff" class="{reveal}">{staff}</section>
<footer>&copy; <span id="year">{year}</span> &middot; {address}</footer>
{script}
</body>
</html>
"#,
        address = escape(address.as_str()),
        transform = parallax_transform(0, 0),
        reveal = REVEAL_CLASS,
        hero = escape(&page.hero),
        dot = presence_class(page.connection),
        connection = page.connection.label(),
        version = escape(&page.version),
        count = escape(&page.player_count),
        refresh_disabled = refresh_disabled,
        refresh_label = escape(&page.refresh.label),
        roster = roster_html(&page.roster),
        staff = staff_html(page),
        year = year,
        script = client_script(address),
    )
}
