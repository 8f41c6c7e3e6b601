use std::fmt;

use serde::Serialize;

use crate::error::UnknownPage;

pub const HOMEPAGE_TITLE: &str = "SmartKempapuraAI - AI-Powered Tutoring for ICSE & CBSE Students";
pub const CONTACT_TITLE: &str = "Contact Us - SmartKempapuraAI";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Homepage,
    Contact,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Homepage, Page::Contact];

    pub fn as_str(self) -> &'static str {
        match self {
            Page::Homepage => "homepage",
            Page::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Homepage => HOMEPAGE_TITLE,
            Page::Contact => CONTACT_TITLE,
        }
    }

    /// DOM id of the section that renders this page.
    pub fn element_id(self) -> &'static str {
        match self {
            Page::Homepage => "homepage",
            Page::Contact => "contact-page",
        }
    }

    pub fn other(self) -> Page {
        match self {
            Page::Homepage => Page::Contact,
            Page::Contact => Page::Homepage,
        }
    }

    /// Resolves a location hash such as `#contact` to a page. Empty or
    /// unknown hashes resolve to `None`.
    pub fn from_hash(hash: &str) -> Option<Page> {
        let raw = hash.trim().trim_start_matches('#').trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse().ok()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = UnknownPage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("homepage") || value.eq_ignore_ascii_case("home") {
            Ok(Page::Homepage)
        } else if value.eq_ignore_ascii_case("contact") || value.eq_ignore_ascii_case("contact-page") {
            Ok(Page::Contact)
        } else {
            Err(UnknownPage(value.to_string()))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewChange {
    pub from: Page,
    pub to: Page,
    pub title: &'static str,
    pub focus_first_field: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    current: Page,
}

impl ViewState {
    pub fn new(initial: Page) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.current == page
    }

    pub fn show(&mut self, target: Page) -> ViewChange {
        let from = self.current;
        self.current = target;
        ViewChange {
            from,
            to: target,
            title: target.title(),
            focus_first_field: target == Page::Contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_page_is_active() {
        let mut view = ViewState::default();
        for target in [Page::Contact, Page::Homepage, Page::Contact, Page::Contact] {
            view.show(target);
            let active = Page::ALL.iter().filter(|page| view.is_active(**page)).count();
            assert_eq!(active, 1);
            assert!(view.is_active(target));
            assert!(!view.is_active(target.other()));
        }
    }

    #[test]
    fn hash_parsing() {
        assert_eq!(Page::from_hash("#contact"), Some(Page::Contact));
        assert_eq!(Page::from_hash("#contact-page"), Some(Page::Contact));
        assert_eq!(Page::from_hash("#Home"), Some(Page::Homepage));
        assert_eq!(Page::from_hash("#"), None);
        assert_eq!(Page::from_hash("#courses"), None);
    }

    #[test]
    fn unknown_page_names_the_input() {
        let err = "pricing".parse::<Page>().unwrap_err();
        assert_eq!(err, UnknownPage("pricing".to_string()));
        assert_eq!(err.to_string(), "unknown page 'pricing'");
        let _: &dyn std::error::Error = &err;
    }
}
