use serde::{Deserialize, Serialize};

/// A peer supporter suggested to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerProfile {
    pub id: String,
    /// Emoji avatar
    pub avatar: String,
    pub description: String,
    /// How well the peer matches the user, 0-100
    pub match_percentage: u8,
    pub is_online: bool,
    pub specialties: Vec<String>,
}

impl PeerProfile {
    /// Orders peers for display: online first, then by match percentage.
    pub fn sort_for_display(peers: &mut [PeerProfile]) {
        peers.sort_by(|a, b| {
            b.is_online
                .cmp(&a.is_online)
                .then(b.match_percentage.cmp(&a.match_percentage))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(id: &str, online: bool, pct: u8) -> PeerProfile {
        PeerProfile {
            id: id.to_string(),
            avatar: String::new(),
            description: String::new(),
            match_percentage: pct,
            is_online: online,
            specialties: vec![],
        }
    }

    #[test]
    fn test_sort_for_display() {
        let mut peers = vec![peer("a", false, 99), peer("b", true, 80), peer("c", true, 90)];
        PeerProfile::sort_for_display(&mut peers);
        let ids: Vec<_> = peers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }
}
