use serde::{Deserialize, Serialize};

/// Student profile record. Upsert semantics: absent fields are left untouched
/// by the backend, so everything scalar is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub year_of_study: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub career_goals: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub preferred_job_roles: Vec<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
}

impl StudentProfile {
    /// Complete means every required scalar is filled and the student listed
    /// at least one skill and one interest. Preferred roles/locations are not
    /// required.
    pub fn is_complete(&self) -> bool {
        let filled = |field: &Option<String>| {
            field
                .as_deref()
                .map(str::trim)
                .is_some_and(|value| !value.is_empty())
        };

        filled(&self.first_name)
            && filled(&self.last_name)
            && filled(&self.phone)
            && filled(&self.college)
            && filled(&self.course)
            && filled(&self.year_of_study)
            && filled(&self.gpa)
            && filled(&self.career_goals)
            && filled(&self.profile_picture)
            && !self.skills.is_empty()
            && !self.interests.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub company_website: Option<String>,
}
