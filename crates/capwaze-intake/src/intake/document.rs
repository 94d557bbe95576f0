use std::fmt::Write as _;

use chrono::{DateTime, TimeZone};

use super::format::{
    escape_html, format_address, format_date, format_timestamp, multiline_html,
    or_placeholder, FieldCategory,
};
use super::submission::ApplicationSubmission;
use super::template::{Styling, TemplateProfile};

/// Label identifying where notifications originate.
pub const SOURCE_LABEL: &str = "CapWaze Contact Form";
const SUBJECT_PREFIX: &str = "🔥 New CapWaze Lead:";

const CARD_STYLES: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
.container { max-width: 600px; margin: 0 auto; padding: 20px; }
.header { background: linear-gradient(135deg, #10B981, #34D399); color: white; padding: 20px; border-radius: 8px 8px 0 0; text-align: center; }
.content { background: #f8f9fa; padding: 20px; }
.section { background: white; margin: 15px 0; padding: 15px; border-radius: 8px; border-left: 4px solid #10B981; }
.section h3 { color: #10B981; margin-top: 0; }
.label { font-weight: bold; color: #10B981; }
.value { margin-left: 10px; }
.footer { background: #e5e7eb; padding: 15px; border-radius: 0 0 8px 8px; text-align: center; color: #6b7280; font-size: 14px; }";

const PLAIN_STYLES: &str = "\
body { font-family: Arial, sans-serif; color: #333; }
.label { font-weight: bold; }
.value { margin-left: 6px; }";

/// A rendered notification ready to hand to a [`Mailer`](super::Mailer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDocument {
    pub subject: String,
    pub html: String,
}

/// Error raised while writing the document body.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write notification body")]
    Write(#[from] std::fmt::Error),
    #[error("failed to render custom field: {0}")]
    CustomField(#[from] serde_json::Error),
}

struct Section {
    icon: &'static str,
    heading: &'static str,
    rows: Vec<Row>,
}

struct Row {
    label: &'static str,
    value: Cell,
}

enum Cell {
    Text(String),
    Strong(String),
    Link { scheme: &'static str, target: String },
}

impl Row {
    fn text(label: &'static str, value: String) -> Self {
        Self {
            label,
            value: Cell::Text(value),
        }
    }
}

impl NotificationDocument {
    /// Render `submission` under `profile`, stamping the footer with `assembled_at`.
    pub fn assemble<Tz>(
        submission: &ApplicationSubmission,
        profile: &TemplateProfile,
        assembled_at: &DateTime<Tz>,
    ) -> Result<Self, RenderError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let sections = sections(submission, profile)?;
        let html = render_html(
            &sections,
            submission.additional_info.as_deref(),
            profile.styling,
            &format_timestamp(assembled_at),
        )?;

        Ok(Self {
            subject: subject_line(submission, profile),
            html,
        })
    }
}

pub fn subject_line(submission: &ApplicationSubmission, profile: &TemplateProfile) -> String {
    let company = submission.company.as_deref().unwrap_or_default();
    let amount = submission.funding_amount.as_deref().unwrap_or_default();

    if profile.subject_names_applicant {
        format!(
            "{SUBJECT_PREFIX} {} - {company} ({amount})",
            submission.full_name()
        )
    } else {
        format!("{SUBJECT_PREFIX} {company} ({amount})")
    }
}

fn sections(
    submission: &ApplicationSubmission,
    profile: &TemplateProfile,
) -> Result<Vec<Section>, RenderError> {
    let personal = |value: &Option<String>| or_placeholder(value.as_deref(), FieldCategory::Personal);
    let business = |value: &Option<String>| or_placeholder(value.as_deref(), FieldCategory::Business);

    let mut contact = vec![
        Row::text("Name", submission.full_name()),
        Row {
            label: "Email",
            value: Cell::Link {
                scheme: "mailto",
                target: personal(&submission.email),
            },
        },
        Row {
            label: "Phone",
            value: Cell::Link {
                scheme: "tel",
                target: personal(&submission.phone),
            },
        },
        Row::text("Company", business(&submission.company)),
    ];
    if profile.addresses {
        contact.push(Row::text(
            "Date of Birth",
            format_date(submission.date_of_birth.as_deref()),
        ));
        contact.push(Row::text(
            "Home Address",
            format_address(
                submission.street.as_deref(),
                submission.city.as_deref(),
                submission.state.as_deref(),
                submission.zip_code.as_deref(),
            ),
        ));
    }

    let mut details = vec![Row::text("Business Type", business(&submission.business_type))];
    if profile.business_metrics {
        details.push(Row::text(
            "Years in Business",
            business(&submission.business_age),
        ));
        details.push(Row::text(
            "Monthly Revenue",
            business(&submission.monthly_revenue),
        ));
    }
    if profile.business_start_date {
        details.push(Row::text(
            "Business Start Date",
            format_date(submission.business_start_date.as_deref()),
        ));
    }
    if profile.addresses {
        details.push(Row::text(
            "Business Address",
            format_address(
                submission.business_street.as_deref(),
                submission.business_city.as_deref(),
                submission.business_state.as_deref(),
                submission.business_zip.as_deref(),
            ),
        ));
    }

    let funding = vec![
        Row {
            label: "Funding Amount",
            value: Cell::Strong(business(&submission.funding_amount)),
        },
        Row::text("Use of Funds", business(&submission.use_of_funds)),
        Row::text("Timeframe", business(&submission.timeframe)),
    ];

    let mut sections = vec![
        Section {
            icon: "👤",
            heading: "Contact Information",
            rows: contact,
        },
        Section {
            icon: "🏢",
            heading: "Business Details",
            rows: details,
        },
        Section {
            icon: "💰",
            heading: "Funding Information",
            rows: funding,
        },
    ];

    if profile.custom_fields {
        let mut rows = Vec::new();
        for (label, value) in [
            ("Custom Field 1", &submission.custom_field1),
            ("Custom Field 2", &submission.custom_field2),
        ] {
            let rendered = match value {
                Some(serde_json::Value::String(text)) => text.clone(),
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => serde_json::to_string(other)?,
            };
            if !rendered.is_empty() {
                rows.push(Row::text(label, rendered));
            }
        }
        if !rows.is_empty() {
            sections.push(Section {
                icon: "🗂️",
                heading: "Other Details",
                rows,
            });
        }
    }

    Ok(sections)
}

fn render_html(
    sections: &[Section],
    additional_info: Option<&str>,
    styling: Styling,
    timestamp: &str,
) -> Result<String, std::fmt::Error> {
    let styles = match styling {
        Styling::Cards => CARD_STYLES,
        Styling::Plain => PLAIN_STYLES,
    };

    let mut html = String::with_capacity(4096);
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html>")?;
    writeln!(html, "<head>\n<meta charset=\"utf-8\">\n<style>\n{styles}\n</style>\n</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<div class=\"container\">")?;
    writeln!(html, "<div class=\"header\">")?;
    writeln!(html, "<h1>🚀 New CapWaze Application</h1>")?;
    writeln!(html, "<p>A new funding application has been submitted</p>")?;
    writeln!(html, "</div>")?;
    writeln!(html, "<div class=\"content\">")?;

    for section in sections {
        writeln!(html, "<div class=\"section\">")?;
        writeln!(html, "<h3>{} {}</h3>", section.icon, section.heading)?;
        for row in &section.rows {
            write!(
                html,
                "<p><span class=\"label\">{}:</span><span class=\"value\">",
                row.label
            )?;
            match &row.value {
                Cell::Text(value) => write!(html, "{}", escape_html(value))?,
                Cell::Strong(value) => write!(html, "<strong>{}</strong>", escape_html(value))?,
                Cell::Link { scheme, target } => {
                    let target = escape_html(target);
                    write!(html, "<a href=\"{scheme}:{target}\">{target}</a>")?
                }
            }
            writeln!(html, "</span></p>")?;
        }
        writeln!(html, "</div>")?;
    }

    if let Some(info) = additional_info.filter(|info| !info.is_empty()) {
        writeln!(html, "<div class=\"section\">")?;
        writeln!(html, "<h3>📝 Additional Information</h3>")?;
        writeln!(html, "<p>{}</p>", multiline_html(info))?;
        writeln!(html, "</div>")?;
    }

    writeln!(html, "</div>")?;
    writeln!(html, "<div class=\"footer\">")?;
    writeln!(html, "<p><strong>Submitted:</strong> {timestamp}</p>")?;
    writeln!(html, "<p><strong>Source:</strong> {SOURCE_LABEL}</p>")?;
    writeln!(html, "</div>")?;
    writeln!(html, "</div>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;

    Ok(html)
}
