use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome message shown above an admin tab after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Codes carried through `?notice=` after a plain form post.
const NOTICES: &[(&str, NoticeKind, &str)] = &[
    ("settings_saved", NoticeKind::Success, "Website settings saved!"),
    ("settings_failed", NoticeKind::Error, "Failed to save settings"),
    ("banner_added", NoticeKind::Success, "Banner added!"),
    ("banner_add_failed", NoticeKind::Error, "Failed to add banner"),
    ("banner_updated", NoticeKind::Success, "Banner updated!"),
    ("banner_update_failed", NoticeKind::Error, "Failed to update banner"),
    ("banner_deleted", NoticeKind::Success, "Banner deleted!"),
    ("banner_delete_failed", NoticeKind::Error, "Failed to delete banner"),
    ("page_added", NoticeKind::Success, "Page added!"),
    ("page_add_failed", NoticeKind::Error, "Failed to add page"),
    ("page_deleted", NoticeKind::Success, "Page deleted!"),
    ("page_delete_failed", NoticeKind::Error, "Failed to delete page"),
    ("activity_added", NoticeKind::Success, "Activity added!"),
    ("activity_add_failed", NoticeKind::Error, "Failed to add activity"),
    ("activity_deleted", NoticeKind::Success, "Activity deleted!"),
    ("activity_delete_failed", NoticeKind::Error, "Failed to delete activity"),
    ("promotion_added", NoticeKind::Success, "Promotion added!"),
    ("promotion_add_failed", NoticeKind::Error, "Failed to add promotion"),
    ("promotion_updated", NoticeKind::Success, "Promotion updated!"),
    ("promotion_update_failed", NoticeKind::Error, "Failed to update promotion"),
    ("promotion_deleted", NoticeKind::Success, "Promotion deleted!"),
    ("promotion_delete_failed", NoticeKind::Error, "Failed to delete promotion"),
    ("history_saved", NoticeKind::Success, "History content saved!"),
    ("history_failed", NoticeKind::Error, "Failed to save history"),
    ("transaction_added", NoticeKind::Success, "Transaction added successfully!"),
    ("transaction_add_failed", NoticeKind::Error, "Failed to add transaction"),
    ("transaction_deleted", NoticeKind::Success, "Transaction deleted!"),
    ("transaction_delete_failed", NoticeKind::Error, "Failed to delete transaction"),
    ("member_updated", NoticeKind::Success, "Member status updated!"),
    ("member_update_failed", NoticeKind::Error, "Failed to update member"),
    ("member_deleted", NoticeKind::Success, "Member deleted!"),
    ("member_delete_failed", NoticeKind::Error, "Failed to delete member"),
];

pub const DUPLICATE_SLUG: &str = "page_duplicate_slug";

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Resolves a notice code. `detail` fills in codes that name something,
    /// such as the duplicated slug.
    pub fn from_code(code: &str, detail: Option<&str>) -> Option<Self> {
        if code == DUPLICATE_SLUG {
            let slug = detail.unwrap_or_default();
            return Some(Self::new(
                NoticeKind::Warning,
                format!("Page added, but another page already uses the slug '{}'.", slug),
            ));
        }

        NOTICES
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, kind, message)| Self::new(*kind, *message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_resolve_to_messages() {
        let notice = Notice::from_code("banner_add_failed", None).unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Failed to add banner");

        assert!(Notice::from_code("nope", None).is_none());
    }

    #[test]
    fn duplicate_slug_names_the_slug() {
        let notice = Notice::from_code(DUPLICATE_SLUG, Some("about-us")).unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert!(notice.message.contains("'about-us'"));
    }
}
