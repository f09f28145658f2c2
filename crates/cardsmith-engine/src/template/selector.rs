use std::fmt;
use std::str::FromStr;

use super::TemplateError;

/// Addresses one element of a template.
///
/// Supported forms: `#id`, `tag#id` and a bare `tag`. Compound, attribute and
/// combinator selectors are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
}

impl Selector {
    const UNSUPPORTED: &'static [char] = &['.', '[', ']', '>', '+', '~', ',', '*', ':'];

    pub fn id(id: impl Into<String>) -> Self {
        Self {
            tag: None,
            id: Some(id.into()),
        }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            id: None,
        }
    }

    /// Whether an element with this local name and `id` attribute matches.
    pub fn matches(&self, local_name: &str, id: Option<&str>) -> bool {
        let tag_ok = self.tag.as_deref().is_none_or(|t| t == local_name);
        let id_ok = match &self.id {
            Some(want) => id == Some(want.as_str()),
            None => true,
        };
        tag_ok && id_ok
    }
}

impl FromStr for Selector {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TemplateError::InvalidSelector(s.to_string());
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.contains(char::is_whitespace)
            || trimmed.contains(Self::UNSUPPORTED)
        {
            return Err(invalid());
        }

        match trimmed.split_once('#') {
            Some((_, "")) => Err(invalid()),
            Some((_, id)) if id.contains('#') => Err(invalid()),
            Some(("", id)) => Ok(Self::id(id)),
            Some((tag, id)) => Ok(Self {
                tag: Some(tag.to_string()),
                id: Some(id.to_string()),
            }),
            None => Ok(Self::tag(trimmed)),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        Ok(())
    }
}
