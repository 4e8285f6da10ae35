//! Mail client launchers.

use super::{apple_mail_script, to_mailto_url, MailDraft, MailError};
use log::{info, warn};

/// Channel that accepted the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailHandoff {
    AppleMail,
    MailtoUrl,
}

/// Opens a composer pre-filled with a draft.
pub trait MailClient {
    fn compose(&self, draft: &MailDraft) -> Result<MailHandoff, MailError>;
}

/// Uses the desktop's own mail integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMailClient;

impl MailClient for SystemMailClient {
    fn compose(&self, draft: &MailDraft) -> Result<MailHandoff, MailError> {
        if cfg!(target_os = "macos") {
            match run_osascript(&apple_mail_script(draft)) {
                Ok(()) => {
                    info!("event=mail_handoff module=mail status=ok channel=apple_mail");
                    return Ok(MailHandoff::AppleMail);
                }
                Err(err) => {
                    warn!(
                        "event=mail_handoff module=mail status=fallback channel=apple_mail error={err}"
                    );
                }
            }
        }

        match open::that(to_mailto_url(draft)) {
            Ok(()) => {
                info!("event=mail_handoff module=mail status=ok channel=mailto");
                Ok(MailHandoff::MailtoUrl)
            }
            Err(err) => {
                warn!("event=mail_handoff module=mail status=error channel=mailto error={err}");
                Err(MailError::Launch(err.to_string()))
            }
        }
    }
}

fn run_osascript(script: &str) -> Result<(), String> {
    let status = std::process::Command::new("osascript")
        .arg("-e")
        .arg(script)
        .status()
        .map_err(|err| err.to_string())?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("osascript exited with {status}"))
    }
}
