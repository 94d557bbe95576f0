/// Which parts of a submission a notification renders, and how it is styled.
///
/// The three presets correspond to the form variants that have been deployed; choosing
/// one changes rendering and the subject line only, never validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateProfile {
    pub name: &'static str,
    pub styling: Styling,
    /// Years in business and monthly revenue.
    pub business_metrics: bool,
    /// Date of birth and both postal addresses.
    pub addresses: bool,
    pub business_start_date: bool,
    pub custom_fields: bool,
    /// Prefix the company in the subject with the applicant's full name.
    pub subject_names_applicant: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Styling {
    Plain,
    Cards,
}

impl TemplateProfile {
    pub const PRESETS: [&'static str; 3] = ["basic", "standard", "detailed"];

    pub fn basic() -> Self {
        Self {
            name: "basic",
            styling: Styling::Plain,
            business_metrics: false,
            addresses: false,
            business_start_date: false,
            custom_fields: false,
            subject_names_applicant: false,
        }
    }

    pub fn standard() -> Self {
        Self {
            name: "standard",
            styling: Styling::Cards,
            business_metrics: true,
            ..Self::basic()
        }
    }

    pub fn detailed() -> Self {
        Self {
            name: "detailed",
            addresses: true,
            business_start_date: true,
            custom_fields: true,
            subject_names_applicant: true,
            ..Self::standard()
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::basic()),
            "standard" => Some(Self::standard()),
            "detailed" => Some(Self::detailed()),
            _ => None,
        }
    }
}

impl Default for TemplateProfile {
    fn default() -> Self {
        Self::standard()
    }
}
