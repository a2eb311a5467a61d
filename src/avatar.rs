// src/avatar.rs
use reqwest::Url;

/// Builds player-head image URLs. The images are only referenced from the
/// page, never fetched here.
#[derive(Debug, Clone)]
pub struct AvatarService {
    base: String,
    size: u32,
}

impl AvatarService {
    pub fn new(base: impl Into<String>, size: u32) -> Self {
        Self { base: base.into(), size }
    }

    pub fn url_for(&self, name: &str) -> String {
        let size = self.size.to_string();
        match Url::parse(&self.base) {
            Ok(mut url) if !url.cannot_be_a_base() => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(name).push(&size);
                }
                url.to_string()
            }
            // Relative or odd bases are joined as plain text.
            _ => format!("{}/{}/{}", self.base.trim_end_matches('/'), encode_segment(name), size),
        }
    }
}

fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_mc_heads_url() {
        let avatars = AvatarService::new("https://mc-heads.net/avatar", 64);
        assert_eq!(avatars.url_for("Alice"), "https://mc-heads.net/avatar/Alice/64");
    }

    #[test]
    fn trailing_slash_in_base() {
        let avatars = AvatarService::new("https://mc-heads.net/avatar/", 32);
        assert_eq!(avatars.url_for("Bob"), "https://mc-heads.net/avatar/Bob/32");
    }

    #[test]
    fn names_are_encoded() {
        let avatars = AvatarService::new("https://mc-heads.net/avatar", 64);
        let url = avatars.url_for("a b/c");
        assert_eq!(url, "https://mc-heads.net/avatar/a%20b%2Fc/64");
    }

    #[test]
    fn relative_base_is_joined() {
        let avatars = AvatarService::new("/avatars/", 16);
        assert_eq!(avatars.url_for("x y"), "/avatars/x%20y/16");
    }
}
