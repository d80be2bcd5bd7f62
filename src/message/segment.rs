//! Decorative segments of an opinionated message
//!
//! Each segment (pipeline breadcrumb, fly-watch instructions, git summary) is
//! rendered from built-in markup unless `message_type_config` disables it or
//! replaces it with custom text.

use serde::{Deserialize, Serialize};

const SPACE: &str = "&nbsp;";
const NEWLINE: &str = "<br>";

/// How a single segment is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentSetting {
    Default,
    Disabled,
    Custom(String),
}

impl SegmentSetting {
    /// Interpret an override value; `enabled` / `disabled` match case-insensitively
    pub fn from_override(value: Option<&str>) -> Self {
        match value {
            None => SegmentSetting::Default,
            Some(v) if v.eq_ignore_ascii_case("enabled") => SegmentSetting::Default,
            Some(v) if v.eq_ignore_ascii_case("disabled") => SegmentSetting::Disabled,
            Some(v) => SegmentSetting::Custom(v.to_string()),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, SegmentSetting::Disabled)
    }

    /// Markup for this segment given its built-in rendering
    pub fn render(&self, default_markup: impl FnOnce() -> String) -> String {
        match self {
            SegmentSetting::Default => default_markup(),
            SegmentSetting::Disabled => String::new(),
            SegmentSetting::Custom(text) => text.clone(),
        }
    }
}

/// `message_type_config` overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fly_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_info: Option<String>,
}

impl SegmentConfig {
    pub fn pipeline_info(&self) -> SegmentSetting {
        SegmentSetting::from_override(self.pipeline_info.as_deref())
    }

    pub fn fly_info(&self) -> SegmentSetting {
        SegmentSetting::from_override(self.fly_info.as_deref())
    }

    pub fn git_info(&self) -> SegmentSetting {
        SegmentSetting::from_override(self.git_info.as_deref())
    }
}

fn icon(src: &str, size: u32) -> String {
    format!(
        r#"<img src="${{ATC_EXTERNAL_URL}}/public/images/{}" alt="" width="{}" height="{}">"#,
        src, size, size
    )
}

fn link(href: &str, body: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, href, body)
}

const TEAM_URL: &str = "${ATC_EXTERNAL_URL}/?search=team: ${BUILD_TEAM_NAME}";
const PIPELINE_URL: &str =
    "${ATC_EXTERNAL_URL}/teams/${BUILD_TEAM_NAME}/pipelines/${BUILD_PIPELINE_NAME}";

/// Favicon for a status category, first element on the line
pub fn status_icon(icon_name: &str) -> String {
    icon(&format!("favicon-{}.png", icon_name), 24)
}

/// team / pipeline / job breadcrumb with links into the Concourse UI
pub fn default_pipeline_info() -> String {
    let job_url = format!("{}/jobs/${{BUILD_JOB_NAME}}/builds/${{BUILD_NAME}}", PIPELINE_URL);

    [
        icon("baseline-people-24px.svg", 16),
        link(TEAM_URL, "<b>${BUILD_TEAM_NAME}</b>"),
        SPACE.repeat(2),
        icon("ic-breadcrumb-pipeline.svg", 16),
        link(PIPELINE_URL, "<b>${BUILD_PIPELINE_NAME}</b>"),
        SPACE.repeat(2),
        icon("ic-breadcrumb-job.svg", 16),
        link(&job_url, "<b>${BUILD_JOB_NAME} #${BUILD_NAME}</b>"),
        icon("baseline-keyboard-arrow-right-24px.svg", 16),
    ]
    .concat()
}

/// Instructions for following the build with `fly`
pub fn default_fly_info() -> String {
    let download = |platform: &str, logo: &str| {
        link(
            &format!(
                "${{ATC_EXTERNAL_URL}}/api/v1/cli?arch=amd64&platform={}",
                platform
            ),
            &icon(logo, 16),
        )
    };
    let terminal = icon("ic-terminal.svg", 16);

    [
        NEWLINE.to_string(),
        "<i>To watch this build in your terminal using</i>&nbsp;<code><b>fly</b></code>".to_string(),
        SPACE.repeat(2),
        download("darwin", "apple-logo-grey-ic.svg"),
        download("windows", "windows-logo-grey-ic.svg"),
        download("linux", "linxus-logo-grey-ic.svg"),
        NEWLINE.to_string(),
        terminal.clone(),
        SPACE.to_string(),
        "<code>fly -t ${BUILD_TEAM_NAME} login ${ATC_EXTERNAL_URL} -n ${BUILD_TEAM_NAME} --insecure</code>"
            .to_string(),
        NEWLINE.to_string(),
        terminal,
        SPACE.to_string(),
        "<code>fly -t ${BUILD_TEAM_NAME} watch -b ${BUILD_ID}</code>".to_string(),
    ]
    .concat()
}

/// Committer and commit summary, filled from the `GIT_*` tokens
pub fn default_git_info() -> String {
    format!(
        "Changes by ${{GIT_COMMITTER}}.{}- [${{GIT_SHORT_REF}}] ${{GIT_COMMIT_MESSAGE}}",
        NEWLINE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_parsing() {
        assert_eq!(SegmentSetting::from_override(None), SegmentSetting::Default);
        assert_eq!(SegmentSetting::from_override(Some("enabled")), SegmentSetting::Default);
        assert_eq!(SegmentSetting::from_override(Some("ENABLED")), SegmentSetting::Default);
        assert_eq!(SegmentSetting::from_override(Some("disabled")), SegmentSetting::Disabled);
        assert_eq!(SegmentSetting::from_override(Some("DiSaBlEd")), SegmentSetting::Disabled);
        assert_eq!(
            SegmentSetting::from_override(Some("some custom text")),
            SegmentSetting::Custom("some custom text".to_string())
        );
    }

    #[test]
    fn test_render() {
        let default = || "DEFAULT".to_string();
        assert_eq!(SegmentSetting::Default.render(default), "DEFAULT");
        assert_eq!(SegmentSetting::Disabled.render(default), "");
        assert_eq!(SegmentSetting::Custom("x".to_string()).render(default), "x");
    }

    #[test]
    fn test_status_icon_markup() {
        assert_eq!(
            status_icon("failed"),
            r#"<img src="${ATC_EXTERNAL_URL}/public/images/favicon-failed.png" alt="" width="24" height="24">"#
        );
    }

    #[test]
    fn test_pipeline_info_markup() {
        let markup = default_pipeline_info();
        assert!(markup.starts_with(
            r#"<img src="${ATC_EXTERNAL_URL}/public/images/baseline-people-24px.svg" alt="" width="16" height="16">"#
        ));
        assert!(markup.contains(
            r#"<a href="${ATC_EXTERNAL_URL}/teams/${BUILD_TEAM_NAME}/pipelines/${BUILD_PIPELINE_NAME}/jobs/${BUILD_JOB_NAME}/builds/${BUILD_NAME}"><b>${BUILD_JOB_NAME} #${BUILD_NAME}</b></a>"#
        ));
        assert!(markup.ends_with(
            r#"<img src="${ATC_EXTERNAL_URL}/public/images/baseline-keyboard-arrow-right-24px.svg" alt="" width="16" height="16">"#
        ));
    }

    #[test]
    fn test_fly_info_markup() {
        let markup = default_fly_info();
        assert!(markup.starts_with("<br><i>To watch this build"));
        assert!(markup.contains("platform=windows"));
        assert!(markup.ends_with("<code>fly -t ${BUILD_TEAM_NAME} watch -b ${BUILD_ID}</code>"));
    }

    #[test]
    fn test_git_info_markup() {
        assert_eq!(
            default_git_info(),
            "Changes by ${GIT_COMMITTER}.<br>- [${GIT_SHORT_REF}] ${GIT_COMMIT_MESSAGE}"
        );
    }
}
