use crate::entities::campus_ambassadors;

use super::present;

const ALL_FIELDS_REQUIRED: &str = "All fields are required: name, college, linkedin, phone, email";

/// Body of a public campus ambassador application.
#[derive(serde::Deserialize, Debug, Default, Clone)]
pub struct AmbassadorSubmission {
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub college: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAmbassadorApplication {
    pub name: String,
    pub college_name: String,
    pub linkedin_url: String,
    pub phone: String,
    pub email: String,
}

impl NewAmbassadorApplication {
    pub fn parse(submission: AmbassadorSubmission) -> Result<Self, String> {
        let AmbassadorSubmission {
            name,
            college,
            linkedin,
            phone,
            email,
        } = submission;

        match (
            present(name),
            present(college),
            present(linkedin),
            present(phone),
            present(email),
        ) {
            (Some(name), Some(college_name), Some(linkedin_url), Some(phone), Some(email)) => {
                Ok(Self {
                    name,
                    college_name,
                    linkedin_url,
                    phone,
                    email,
                })
            }
            _ => Err(ALL_FIELDS_REQUIRED.to_string()),
        }
    }
}

/// Administrative edit of an ambassador application.
///
/// Only the stored data fields can change; any other key in the body is rejected
/// while deserializing.
#[derive(serde::Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct AmbassadorChanges {
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub name: Option<String>,
    #[serde(alias = "college")]
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub college_name: Option<String>,
    #[serde(alias = "linkedin")]
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "super::scalar_text")]
    pub email: Option<String>,
}

impl AmbassadorChanges {
    /// A field that is sent must carry a value; clearing a required column is not allowed.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("name", &self.name),
            ("college_name", &self.college_name),
            ("linkedin_url", &self.linkedin_url),
            ("phone", &self.phone),
            ("email", &self.email),
        ];
        let blank: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(format!("Fields cannot be empty: {}", blank.join(", ")))
        }
    }

    pub fn apply_to(self, record: &mut campus_ambassadors::Model) {
        if let Some(name) = present(self.name) {
            record.name = name;
        }
        if let Some(college_name) = present(self.college_name) {
            record.college_name = college_name;
        }
        if let Some(linkedin_url) = present(self.linkedin_url) {
            record.linkedin_url = linkedin_url;
        }
        if let Some(phone) = present(self.phone) {
            record.phone = phone;
        }
        if let Some(email) = present(self.email) {
            record.email = email;
        }
    }
}
