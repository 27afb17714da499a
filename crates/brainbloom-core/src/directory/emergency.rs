use serde::Serialize;

/// A hotline shown on the emergency screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmergencyContact {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub phone: &'static str,
}

/// Fixed emergency contacts, most general first.
pub const EMERGENCY_CONTACTS: [EmergencyContact; 3] = [
    EmergencyContact {
        title: "988 Suicide & Crisis Lifeline",
        subtitle: "24/7 free and confidential support",
        phone: "988",
    },
    EmergencyContact {
        title: "Crisis Text Line",
        subtitle: "Text HOME to 741741",
        phone: "741741",
    },
    EmergencyContact {
        title: "Emergency Services",
        subtitle: "For immediate danger",
        phone: "911",
    },
];

/// Phone number behind a crisis-alert action label, if the action is a call.
pub fn phone_for_action(action: &str) -> Option<&'static str> {
    match action {
        "Call 988" => Some("988"),
        "Contact Emergency Services" => Some("911"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CRISIS_ALERT_ACTIONS;

    #[test]
    fn test_call_actions_map_to_numbers() {
        let phones: Vec<_> = CRISIS_ALERT_ACTIONS
            .iter()
            .map(|a| phone_for_action(a))
            .collect();
        assert_eq!(phones, vec![Some("988"), Some("911"), None]);
    }
}
