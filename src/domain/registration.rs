use crate::entities::user_registrations;

use super::present;

/// Public registration form as sent by the event site.
#[derive(serde::Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub motivation: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub linkedin_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRegistration {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub preferred_theme: Option<String>,
    pub experience_level: Option<String>,
    pub technical_skills: Option<String>,
    pub motivation: Option<String>,
    pub linkedin_post_link: Option<String>,
    pub linkedin_post_screenshot_url: Option<String>,
    pub payment_screenshot_url: Option<String>,
}

impl NewUserRegistration {
    /// Email is the only mandatory field: it is the identity used for duplicate detection.
    pub fn parse(submission: RegistrationSubmission) -> Result<Self, String> {
        let email = present(submission.email).ok_or_else(|| "Email is required".to_string())?;

        Ok(Self {
            first_name: present(submission.first_name),
            last_name: present(submission.last_name),
            email,
            phone: present(submission.phone),
            organization: present(submission.organization),
            role: present(submission.role),
            preferred_theme: present(submission.theme),
            experience_level: present(submission.experience),
            technical_skills: present(submission.skills),
            motivation: present(submission.motivation),
            linkedin_post_link: present(submission.linkedin_link),
            linkedin_post_screenshot_url: None,
            payment_screenshot_url: None,
        })
    }
}

/// Administrative edit of a registration, keyed by column name.
///
/// Screenshot URLs cannot be sent by clients; they are only set when a
/// replacement file is uploaded. Blank values leave the column untouched.
#[derive(serde::Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RegistrationChanges {
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub preferred_theme: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub experience_level: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub technical_skills: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub motivation: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub linkedin_post_link: Option<String>,
    #[serde(skip_deserializing)]
    pub linkedin_post_screenshot_url: Option<String>,
    #[serde(skip_deserializing)]
    pub payment_screenshot_url: Option<String>,
}

impl RegistrationChanges {
    pub fn apply_to(self, record: &mut user_registrations::Model) {
        fn merge(target: &mut Option<String>, value: Option<String>) {
            if let Some(value) = present(value) {
                *target = Some(value);
            }
        }

        if let Some(email) = present(self.email) {
            record.email = email;
        }
        merge(&mut record.first_name, self.first_name);
        merge(&mut record.last_name, self.last_name);
        merge(&mut record.phone, self.phone);
        merge(&mut record.organization, self.organization);
        merge(&mut record.role, self.role);
        merge(&mut record.preferred_theme, self.preferred_theme);
        merge(&mut record.experience_level, self.experience_level);
        merge(&mut record.technical_skills, self.technical_skills);
        merge(&mut record.motivation, self.motivation);
        merge(&mut record.linkedin_post_link, self.linkedin_post_link);
        merge(
            &mut record.linkedin_post_screenshot_url,
            self.linkedin_post_screenshot_url,
        );
        merge(&mut record.payment_screenshot_url, self.payment_screenshot_url);
    }
}
