use serde::{Deserialize, Serialize};

/// Reports start their life waiting for moderation.
pub const REPORT_STATUS_PENDING: &str = "pending";

/// The closed set of reasons a host can report a profile for. The wire
/// codes match what the moderation backlog expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportReason {
    FakeProfile,
    InappropriateContent,
    Scam,
    BadBehavior,
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 5] = [
        ReportReason::FakeProfile,
        ReportReason::InappropriateContent,
        ReportReason::Scam,
        ReportReason::BadBehavior,
        ReportReason::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ReportReason::FakeProfile => "fake_profile",
            ReportReason::InappropriateContent => "inappropriate_content",
            ReportReason::Scam => "scam",
            ReportReason::BadBehavior => "bad_behavior",
            ReportReason::Other => "other",
        }
    }

    /// Spanish label shown next to the radio button.
    pub fn label(self) -> &'static str {
        match self {
            ReportReason::FakeProfile => "Perfil falso o suplantación de identidad",
            ReportReason::InappropriateContent => "Contenido inapropiado",
            ReportReason::Scam => "Intento de estafa",
            ReportReason::BadBehavior => "Mal comportamiento no reportado en reseñas",
            ReportReason::Other => "Otro motivo",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|reason| reason.code() == code)
    }
}

/// Insert payload for the `reports` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReport {
    pub renter_id: String,
    pub reporter_id: String,
    pub reason: String,
    pub additional_info: String,
    pub status: String,
}

/// Row shape of the `reports` table as returned after an insert.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ReportRow {
    pub id: Option<String>,
    pub renter_id: Option<String>,
    pub reporter_id: Option<String>,
    pub reason: Option<String>,
    pub additional_info: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_round_trip() {
        for reason in ReportReason::ALL {
            assert_eq!(ReportReason::from_code(reason.code()), Some(reason));
        }
        assert_eq!(ReportReason::from_code("spam"), None);
    }

    #[test]
    fn every_reason_has_a_label() {
        for reason in ReportReason::ALL {
            assert!(!reason.label().is_empty());
        }
        assert_eq!(ReportReason::Other.label(), "Otro motivo");
    }
}
