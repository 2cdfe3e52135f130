//! Member Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::serde_helpers;

/// Teaching level declared on the application form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeachingLevel {
    EarlyChildhood,
    Primary,
    Secondary,
}

impl TeachingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeachingLevel::EarlyChildhood => "early-childhood",
            TeachingLevel::Primary => "primary",
            TeachingLevel::Secondary => "secondary",
        }
    }

    /// Label shown on directory cards
    pub fn display_name(&self) -> &'static str {
        match self {
            TeachingLevel::EarlyChildhood => "Early Childhood",
            TeachingLevel::Primary => "Primary",
            TeachingLevel::Secondary => "Secondary",
        }
    }
}

impl std::fmt::Display for TeachingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown teaching level: {0}")]
pub struct ParseTeachingLevelError(pub String);

impl FromStr for TeachingLevel {
    type Err = ParseTeachingLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "early-childhood" => Ok(TeachingLevel::EarlyChildhood),
            "primary" => Ok(TeachingLevel::Primary),
            "secondary" => Ok(TeachingLevel::Secondary),
            other => Err(ParseTeachingLevelError(other.to_string())),
        }
    }
}

/// Which attachments were selected at submission time.
///
/// Only presence is recorded, file content never leaves the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentFlags {
    pub passport_photo: bool,
    pub staff_id: bool,
    pub id_card: bool,
}

impl AttachmentFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.passport_photo || self.staff_id || self.id_card
    }
}

/// Member entity: one accepted registration.
///
/// Field names follow the persisted JSON layout (camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub teaching_level: TeachingLevel,
    pub state: String,
    pub lga: String,
    pub school: String,
    #[serde(deserialize_with = "serde_helpers::flexible_u32")]
    pub years_experience: u32,
    pub qualification: String,
    #[serde(default, deserialize_with = "serde_helpers::empty_string_as_none")]
    pub trcn: Option<String>,
    pub id_type: String,
    pub id_number: String,
    pub photo_consent: bool,
    pub has_passport_photo: bool,
    pub has_staff_id: bool,
    pub has_id_card: bool,
    pub registration_date: DateTime<Utc>,
}

impl Member {
    pub fn attachments(&self) -> AttachmentFlags {
        AttachmentFlags {
            passport_photo: self.has_passport_photo,
            staff_id: self.has_staff_id,
            id_card: self.has_id_card,
        }
    }
}

/// Create member payload (validated form fields, no id yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub teaching_level: TeachingLevel,
    pub state: String,
    pub lga: String,
    pub school: String,
    pub years_experience: u32,
    pub qualification: String,
    pub trcn: Option<String>,
    pub id_type: String,
    pub id_number: String,
    pub photo_consent: bool,
}

impl MemberCreate {
    /// Build the immutable record. The caller owns id allocation and the
    /// consent rule; nothing is re-checked here.
    pub fn into_member(
        self,
        id: u64,
        attachments: AttachmentFlags,
        registration_date: DateTime<Utc>,
    ) -> Member {
        Member {
            id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            teaching_level: self.teaching_level,
            state: self.state,
            lga: self.lga,
            school: self.school,
            years_experience: self.years_experience,
            qualification: self.qualification,
            trcn: self.trcn,
            id_type: self.id_type,
            id_number: self.id_number,
            photo_consent: self.photo_consent,
            has_passport_photo: attachments.passport_photo,
            has_staff_id: attachments.staff_id,
            has_id_card: attachments.id_card,
            registration_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teaching_level_parse_and_display() {
        assert_eq!(
            "early-childhood".parse::<TeachingLevel>().unwrap(),
            TeachingLevel::EarlyChildhood
        );
        assert_eq!(TeachingLevel::Secondary.display_name(), "Secondary");
        assert!("tertiary".parse::<TeachingLevel>().is_err());
    }

    #[test]
    fn test_member_reads_legacy_layout() {
        // Older page builds stored the raw form values
        let json = r#"{
            "id": 1717171717171,
            "fullName": "Ada Obi",
            "email": "ada@example.com",
            "phone": "08030000000",
            "teachingLevel": "primary",
            "state": "lagos",
            "lga": "Ikeja",
            "school": "Gra Primary",
            "yearsExperience": "7",
            "qualification": "NCE",
            "trcn": "",
            "idType": "nin",
            "idNumber": "12345678901",
            "photoConsent": false,
            "hasPassportPhoto": false,
            "hasStaffId": true,
            "hasIdCard": false,
            "registrationDate": "2024-05-31T15:48:37.171Z"
        }"#;

        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.years_experience, 7);
        assert_eq!(member.trcn, None);
        assert_eq!(member.teaching_level, TeachingLevel::Primary);
        assert!(member.attachments().staff_id);
        assert!(member.attachments().any());
    }

    #[test]
    fn test_member_serializes_camel_case() {
        let create = MemberCreate {
            full_name: "Ada Obi".into(),
            email: "ada@example.com".into(),
            phone: "0803".into(),
            teaching_level: TeachingLevel::EarlyChildhood,
            state: "lagos".into(),
            lga: "Ikeja".into(),
            school: "Gra Primary".into(),
            years_experience: 3,
            qualification: "B.Ed".into(),
            trcn: Some("TRCN-1".into()),
            id_type: "nin".into(),
            id_number: "1".into(),
            photo_consent: true,
        };
        let member = create.into_member(1, AttachmentFlags::none(), Utc::now());
        let value = serde_json::to_value(&member).unwrap();

        assert_eq!(value["fullName"], "Ada Obi");
        assert_eq!(value["teachingLevel"], "early-childhood");
        assert_eq!(value["yearsExperience"], 3);
        assert_eq!(value["hasPassportPhoto"], false);
    }
}
