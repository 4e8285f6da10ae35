use super::MailDraft;

/// Builds the AppleScript that opens a visible, unsent message in Mail.
pub fn apple_mail_script(draft: &MailDraft) -> String {
    format!(
        r#"tell application "Mail"
    set newMessage to make new outgoing message with properties {{subject:"{subject}", content:"{body}", visible:true}}
    tell newMessage
        make new to recipient at end of to recipients with properties {{address:"{to}"}}
    end tell
    activate
end tell"#,
        subject = escape_applescript(&draft.subject),
        body = escape_applescript(&draft.body),
        to = escape_applescript(&draft.to),
    )
}

fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
