use std::fmt;

use serde::{Deserialize, Serialize};

/// How a field is edited in the companion markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Choice(&'static [&'static str]),
}

/// The eight input controls of the prediction form.
///
/// A field's [`id`](FormField::id) doubles as its element identifier and its
/// key in the request body, so the markup contract and the wire format cannot
/// drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Iq,
    Cgpa,
    PrevSemResult,
    AcademicPerformance,
    InternshipExperience,
    ExtraCurricularScore,
    CommunicationSkills,
    ProjectsCompleted,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Iq,
        FormField::Cgpa,
        FormField::PrevSemResult,
        FormField::AcademicPerformance,
        FormField::InternshipExperience,
        FormField::ExtraCurricularScore,
        FormField::CommunicationSkills,
        FormField::ProjectsCompleted,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Iq => "iq",
            Self::Cgpa => "cgpa",
            Self::PrevSemResult => "prev_sem_result",
            Self::AcademicPerformance => "academic_performance",
            Self::InternshipExperience => "internship_experience",
            Self::ExtraCurricularScore => "extra_curricular_score",
            Self::CommunicationSkills => "communication_skills",
            Self::ProjectsCompleted => "projects_completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Iq => "IQ Score",
            Self::Cgpa => "CGPA",
            Self::PrevSemResult => "Previous Semester Result",
            Self::AcademicPerformance => "Academic Performance",
            Self::InternshipExperience => "Internship Experience",
            Self::ExtraCurricularScore => "Extra Curricular Score",
            Self::CommunicationSkills => "Communication Skills",
            Self::ProjectsCompleted => "Projects Completed",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Self::Iq => "e.g. 110",
            Self::Cgpa => "0 - 10",
            Self::PrevSemResult => "0 - 10",
            Self::AcademicPerformance => "1 - 10",
            Self::InternshipExperience => "Select...",
            Self::ExtraCurricularScore => "0 - 10",
            Self::CommunicationSkills => "1 - 10",
            Self::ProjectsCompleted => "0 - 5",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::InternshipExperience => FieldKind::Choice(&["Yes", "No"]),
            _ => FieldKind::Numeric,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Values captured from the form on submit, sent verbatim as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub iq: String,
    pub cgpa: String,
    pub prev_sem_result: String,
    pub academic_performance: String,
    pub internship_experience: String,
    pub extra_curricular_score: String,
    pub communication_skills: String,
    pub projects_completed: String,
}

impl InputRecord {
    /// Builds a record by reading every field through `read`.
    pub fn collect(mut read: impl FnMut(FormField) -> String) -> Self {
        Self {
            iq: read(FormField::Iq),
            cgpa: read(FormField::Cgpa),
            prev_sem_result: read(FormField::PrevSemResult),
            academic_performance: read(FormField::AcademicPerformance),
            internship_experience: read(FormField::InternshipExperience),
            extra_curricular_score: read(FormField::ExtraCurricularScore),
            communication_skills: read(FormField::CommunicationSkills),
            projects_completed: read(FormField::ProjectsCompleted),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Iq => &self.iq,
            FormField::Cgpa => &self.cgpa,
            FormField::PrevSemResult => &self.prev_sem_result,
            FormField::AcademicPerformance => &self.academic_performance,
            FormField::InternshipExperience => &self.internship_experience,
            FormField::ExtraCurricularScore => &self.extra_curricular_score,
            FormField::CommunicationSkills => &self.communication_skills,
            FormField::ProjectsCompleted => &self.projects_completed,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Iq => &mut self.iq,
            FormField::Cgpa => &mut self.cgpa,
            FormField::PrevSemResult => &mut self.prev_sem_result,
            FormField::AcademicPerformance => &mut self.academic_performance,
            FormField::InternshipExperience => &mut self.internship_experience,
            FormField::ExtraCurricularScore => &mut self.extra_curricular_score,
            FormField::CommunicationSkills => &mut self.communication_skills,
            FormField::ProjectsCompleted => &mut self.projects_completed,
        }
    }
}
