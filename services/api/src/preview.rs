use capwaze_intake::error::AppError;
use capwaze_intake::intake::{
    ApplicationSubmission, IntakeError, NotificationDocument, TemplateProfile,
};
use chrono::Local;
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProfileArg {
    Basic,
    #[default]
    Standard,
    Detailed,
}

impl ProfileArg {
    fn profile(self) -> TemplateProfile {
        match self {
            ProfileArg::Basic => TemplateProfile::basic(),
            ProfileArg::Standard => TemplateProfile::standard(),
            ProfileArg::Detailed => TemplateProfile::detailed(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// JSON file holding a form submission
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Template profile used to render the notification
    #[arg(long, value_enum, default_value_t = ProfileArg::Standard)]
    pub(crate) profile: ProfileArg,
    /// Print only the subject line
    #[arg(long)]
    pub(crate) subject_only: bool,
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_preview(&args, &mut out)
}

/// Validate and render a saved submission without sending anything.
pub(crate) fn render_preview(args: &PreviewArgs, out: &mut impl Write) -> Result<(), AppError> {
    let raw = std::fs::read(&args.input)?;
    let submission: ApplicationSubmission = serde_json::from_slice(&raw)?;
    submission.validate().map_err(IntakeError::MissingFields)?;

    let document =
        NotificationDocument::assemble(&submission, &args.profile.profile(), &Local::now())
            .map_err(IntakeError::from)?;

    writeln!(out, "Subject: {}", document.subject)?;
    if !args.subject_only {
        writeln!(out)?;
        write!(out, "{}", document.html)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn submission_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write submission");
        file
    }

    const COMPLETE: &str = r#"{
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "j@x.com",
        "phone": "555-1234",
        "company": "Acme",
        "fundingAmount": "$50,000"
    }"#;

    #[test]
    fn preview_prints_subject_and_html() {
        let file = submission_file(COMPLETE);
        let args = PreviewArgs {
            input: file.path().to_path_buf(),
            profile: ProfileArg::Detailed,
            subject_only: false,
        };

        let mut out = Vec::new();
        render_preview(&args, &mut out).expect("preview renders");
        let text = String::from_utf8(out).expect("utf8 output");

        assert!(text.starts_with("Subject: 🔥 New CapWaze Lead: Jane Doe - Acme ($50,000)\n"));
        assert!(text.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn subject_only_skips_html() {
        let file = submission_file(COMPLETE);
        let args = PreviewArgs {
            input: file.path().to_path_buf(),
            profile: ProfileArg::Standard,
            subject_only: true,
        };

        let mut out = Vec::new();
        render_preview(&args, &mut out).expect("preview renders");
        assert_eq!(
            String::from_utf8(out).expect("utf8 output"),
            "Subject: 🔥 New CapWaze Lead: Acme ($50,000)\n"
        );
    }

    #[test]
    fn incomplete_submission_is_reported() {
        let file = submission_file(r#"{ "firstName": "Jane" }"#);
        let args = PreviewArgs {
            input: file.path().to_path_buf(),
            profile: ProfileArg::Basic,
            subject_only: true,
        };

        let err = render_preview(&args, &mut Vec::new()).expect_err("missing fields");
        assert!(err
            .to_string()
            .contains("lastName, email, phone, company, fundingAmount"));
    }
}
