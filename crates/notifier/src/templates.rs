//! Email templates.
//!
//! Each renderer returns a [`RenderedEmail`] (subject + HTML body). Interpolated
//! values come from user-controlled records and are HTML-escaped.

/// Subject line and HTML body of a rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Query string appended to every listing link so clicks are attributed to email.
const UTM_PARAMS: &str = "utm_source=superteamearn&utm_medium=email&utm_campaign=notifications";

/// Public URL of a bounty listing. An empty slug still yields a usable link
/// to the listings index.
pub fn listing_link(app_base_url: &str, slug: &str) -> String {
    format!(
        "{}/listings/bounties/{}/?{}",
        app_base_url.trim_end_matches('/'),
        slug,
        UTM_PARAMS
    )
}

/// Reminder to a sponsor whose bounty deadline passed a week ago without winners.
pub fn deadline_exceeded_week(name: &str, bounty_name: &str, link: &str) -> RenderedEmail {
    let html = layout(&format!(
        "<p>Hey {name},</p>\
         <p>The deadline for your listing <strong>{bounty}</strong> passed over a week ago, \
         and the winners haven't been announced yet.</p>\
         <p>Your applicants are waiting to hear back. Please review the submissions and \
         announce the winners as soon as you can.</p>\
         <p><a href=\"{link}\">Review submissions</a></p>",
        name = escape(name),
        bounty = escape(bounty_name),
        link = escape(link),
    ));

    RenderedEmail {
        subject: "Winner Announcement for Your Earn Bounty Is Due!".to_string(),
        html,
    }
}

/// Confirmation to a submitter that their entry was received.
pub fn submission_received(name: &str, bounty_name: &str) -> RenderedEmail {
    let html = layout(&format!(
        "<p>Hey {name},</p>\
         <p>Nice work! Your submission for <strong>{bounty}</strong> has been received.</p>\
         <p>We'll let you know as soon as the winners are announced.</p>",
        name = escape(name),
        bounty = escape(bounty_name),
    ));

    RenderedEmail {
        subject: "Submission Received!".to_string(),
        html,
    }
}

/// Notice to a sponsor that a new submission came in for their listing.
pub fn new_submission(name: &str, bounty_name: &str, link: &str) -> RenderedEmail {
    let html = layout(&format!(
        "<p>Hey {name},</p>\
         <p>Your listing <strong>{bounty}</strong> just received a new submission.</p>\
         <p><a href=\"{link}\">View submissions</a></p>",
        name = escape(name),
        bounty = escape(bounty_name),
        link = escape(link),
    ));

    RenderedEmail {
        subject: "New Bounty Submission Received".to_string(),
        html,
    }
}

fn layout(content: &str) -> String {
    format!(
        "<!DOCTYPE html><html><body style=\"font-family: sans-serif; color: #1e293b;\">\
         {content}\
         <p>Best,<br/>Superteam Earn</p>\
         </body></html>"
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_link() {
        assert_eq!(
            listing_link("https://earn.superteam.fun/", "design-a-logo"),
            "https://earn.superteam.fun/listings/bounties/design-a-logo/?utm_source=superteamearn&utm_medium=email&utm_campaign=notifications"
        );
    }

    #[test]
    fn test_listing_link_empty_slug() {
        assert!(listing_link("https://earn.superteam.fun", "").contains("/listings/bounties//?"));
    }

    #[test]
    fn test_deadline_template_contents() {
        let email = deadline_exceeded_week("Sam", "Design a logo", "https://x/l");
        assert_eq!(
            email.subject,
            "Winner Announcement for Your Earn Bounty Is Due!"
        );
        assert!(email.html.contains("Hey Sam,"));
        assert!(email.html.contains("Design a logo"));
        assert!(email.html.contains("href=\"https://x/l\""));
    }

    #[test]
    fn test_submission_subjects() {
        assert_eq!(submission_received("A", "B").subject, "Submission Received!");
        assert_eq!(
            new_submission("A", "B", "L").subject,
            "New Bounty Submission Received"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let email = submission_received("<b>Eve</b>", "Tom & Jerry");
        assert!(email.html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(email.html.contains("Tom &amp; Jerry"));
        assert!(!email.html.contains("<b>Eve"));
    }
}
