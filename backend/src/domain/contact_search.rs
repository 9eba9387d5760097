//! Contact listing criteria and paging.
//!
//! A listing is always scoped to one owner; the criteria here only narrow
//! that set further. Both storage adapters consume the same normalised
//! [`ContactSearch`]: the in-memory store through [`ContactSearch::matches`],
//! SQL storage through [`like_pattern`].

use pagination::{PageNumber, PageRequest};
use serde::Deserialize;
use utoipa::IntoParams;

use super::contact::Contact;

/// Raw listing query string.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactQuery {
    /// 1-based page; absent or below 1 selects the first page.
    pub page: Option<i64>,
    /// Case-insensitive substring of first or last name.
    pub name: Option<String>,
    /// Case-insensitive substring of email.
    pub email: Option<String>,
    /// Case-sensitive substring of phone.
    pub phone: Option<String>,
}

impl ContactQuery {
    /// Split into normalised criteria and a fixed-size page request.
    pub fn into_parts(self) -> (ContactSearch, PageRequest) {
        let request = PageRequest::with_default_size(PageNumber::from_requested(self.page));
        (ContactSearch::new(self.name, self.email, self.phone), request)
    }
}

/// Normalised substring criteria. Empty strings impose no constraint.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactSearch {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

impl ContactSearch {
    /// Build criteria, dropping empty filters.
    pub fn new(name: Option<String>, email: Option<String>, phone: Option<String>) -> Self {
        Self {
            name: non_empty(name),
            email: non_empty(email),
            phone: non_empty(phone),
        }
    }

    /// Name filter.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Email filter.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Phone filter.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Whether `contact` satisfies every supplied criterion.
    ///
    /// # Examples
    /// ```
    /// use contact_directory::domain::{Contact, ContactId, ContactSearch};
    ///
    /// let contact = Contact {
    ///     id: ContactId::new(1),
    ///     first_name: "test10".into(),
    ///     last_name: Some("test10".into()),
    ///     email: Some("test10@pzn.com".into()),
    ///     phone: Some("0809000010".into()),
    /// };
    /// assert!(ContactSearch::new(Some("TEST1".into()), None, None).matches(&contact));
    /// assert!(!ContactSearch::new(None, None, Some("0809000011".into())).matches(&contact));
    /// ```
    pub fn matches(&self, contact: &Contact) -> bool {
        let name_ok = self.name.as_deref().is_none_or(|n| {
            contains_ignore_case(Some(&contact.first_name), n)
                || contains_ignore_case(contact.last_name.as_deref(), n)
        });
        let email_ok = self
            .email
            .as_deref()
            .is_none_or(|e| contains_ignore_case(contact.email.as_deref(), e));
        let phone_ok = self
            .phone
            .as_deref()
            .is_none_or(|p| contact.phone.as_deref().is_some_and(|phone| phone.contains(p)));
        name_ok && email_ok && phone_ok
    }
}

/// Escape `term` for a `LIKE`/`ILIKE` containment pattern using `\` as the
/// escape character.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
