use super::MailDraft;

/// Returns a `mailto:` URL with percent-encoded recipient, subject and body.
///
/// The recipient keeps its `@`; every other reserved character is encoded
/// so a stored address cannot add headers of its own.
pub fn to_mailto_url(draft: &MailDraft) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        urlencoding::encode(&draft.to).replace("%40", "@"),
        urlencoding::encode(&draft.subject),
        urlencoding::encode(&draft.body)
    )
}
