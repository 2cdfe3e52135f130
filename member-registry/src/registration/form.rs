//! Form field parsing
//!
//! Fields arrive as the browser would post them: input name to raw string,
//! checkboxes present only when ticked.

use shared::{AttachmentFlags, MemberCreate, TeachingLevel};
use std::collections::HashMap;

use crate::error::ValidationError;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_YEARS_EXPERIENCE, is_checked, validate_count,
    validate_email, validate_optional_text, validate_required_text,
};

/// Raw submitted fields keyed by input name
pub type FormFields = HashMap<String, String>;

pub const PHOTO_CONSENT_FIELD: &str = "photoConsent";

fn field<'a>(fields: &'a FormFields, name: &str) -> Option<&'a str> {
    fields.get(name).map(String::as_str)
}

/// A passport photo may only be submitted together with consent
pub fn ensure_consent(photo_consent: bool, attachments: AttachmentFlags) -> Result<(), ValidationError> {
    if attachments.passport_photo && !photo_consent {
        return Err(ValidationError::ConsentRequired);
    }
    Ok(())
}

pub fn consent_given(fields: &FormFields) -> bool {
    is_checked(field(fields, PHOTO_CONSENT_FIELD))
}

/// Validate every field and build the create payload
pub fn parse_fields(fields: &FormFields) -> Result<MemberCreate, ValidationError> {
    let required = |name: &'static str, max: usize| validate_required_text(field(fields, name), name, max);

    let full_name = required("fullName", MAX_NAME_LEN)?;
    let email = validate_email(field(fields, "email"))?;
    let phone = required("phone", MAX_SHORT_TEXT_LEN)?;

    let level_raw = required("teachingLevel", MAX_SHORT_TEXT_LEN)?;
    let teaching_level = level_raw
        .parse::<TeachingLevel>()
        .map_err(|e| ValidationError::InvalidTeachingLevel(e.0))?;

    let state = required("state", MAX_SHORT_TEXT_LEN)?;
    let lga = required("lga", MAX_SHORT_TEXT_LEN)?;
    let school = required("school", MAX_NAME_LEN)?;
    let years_experience = validate_count(
        field(fields, "yearsExperience"),
        "yearsExperience",
        MAX_YEARS_EXPERIENCE,
    )?;
    let qualification = required("qualification", MAX_NAME_LEN)?;
    let trcn = validate_optional_text(field(fields, "trcn"), "trcn", MAX_SHORT_TEXT_LEN)?;
    let id_type = required("idType", MAX_SHORT_TEXT_LEN)?;
    let id_number = required("idNumber", MAX_SHORT_TEXT_LEN)?;

    Ok(MemberCreate {
        full_name,
        email,
        phone,
        teaching_level,
        state,
        lga,
        school,
        years_experience,
        qualification,
        trcn,
        id_type,
        id_number,
        photo_consent: consent_given(fields),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn fields(name: &str, state: &str, school: &str) -> FormFields {
        [
            ("fullName", name),
            ("email", "teacher@example.com"),
            ("phone", "08030000000"),
            ("teachingLevel", "primary"),
            ("state", state),
            ("lga", "Central"),
            ("school", school),
            ("yearsExperience", "6"),
            ("qualification", "NCE"),
            ("trcn", ""),
            ("idType", "nin"),
            ("idNumber", "12345678901"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_parse_complete_form() {
        let mut form = fields("  Ada Obi ", "lagos", "Gra Primary");
        form.insert(PHOTO_CONSENT_FIELD.into(), "on".into());

        let create = parse_fields(&form).unwrap();
        assert_eq!(create.full_name, "Ada Obi");
        assert_eq!(create.teaching_level, TeachingLevel::Primary);
        assert_eq!(create.years_experience, 6);
        assert_eq!(create.trcn, None);
        assert!(create.photo_consent);
    }

    #[test]
    fn test_missing_and_invalid_fields_are_named() {
        let mut form = fields("Ada", "lagos", "Gra Primary");
        form.remove("lga");
        let err = parse_fields(&form).unwrap_err();
        assert_eq!(err.focus_target(), Some("lga"));

        let mut form = fields("Ada", "lagos", "Gra Primary");
        form.insert("teachingLevel".into(), "tertiary".into());
        assert!(matches!(
            parse_fields(&form),
            Err(ValidationError::InvalidTeachingLevel(level)) if level == "tertiary"
        ));

        let mut form = fields("Ada", "lagos", "Gra Primary");
        form.insert("yearsExperience".into(), "-2".into());
        assert_eq!(
            parse_fields(&form).unwrap_err().focus_target(),
            Some("yearsExperience")
        );
    }

    #[test]
    fn test_consent_only_matters_with_photo() {
        let photo = AttachmentFlags {
            passport_photo: true,
            ..AttachmentFlags::none()
        };
        let staff_id = AttachmentFlags {
            staff_id: true,
            ..AttachmentFlags::none()
        };

        assert!(matches!(
            ensure_consent(false, photo),
            Err(ValidationError::ConsentRequired)
        ));
        assert!(ensure_consent(true, photo).is_ok());
        assert!(ensure_consent(false, staff_id).is_ok());
        assert!(ensure_consent(true, AttachmentFlags::none()).is_ok());
    }
}
