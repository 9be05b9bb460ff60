use scraper::{ElementRef, Selector};

use crate::domain::profile::{element_text, or_not_available, NOT_AVAILABLE};

/// Separator priority for the "company · employment-type" span of a
/// flat entry. Checked in this order, first hit wins. The bare `.`
/// truncates abbreviated names ("A.B.C. Inc." becomes "A"); kept as-is
/// for output compatibility.
const COMPANY_SEPARATORS: [char; 3] = ['·', '.', '•'];

#[derive(Debug, Clone, PartialEq)]
pub struct EmploymentEntry {
    pub company: String,
    pub title: String,
    pub duration: String,
    pub description: String,
}

impl Default for EmploymentEntry {
    fn default() -> Self {
        EmploymentEntry {
            company: NOT_AVAILABLE.to_string(),
            title: NOT_AVAILABLE.to_string(),
            duration: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
        }
    }
}

/// One top-level item of the experience list, classified before any
/// field extraction happens.
enum ExperienceItem<'a> {
    /// One employer with several nested roles. Company and duration
    /// come from the item itself and are shared by every role unless a
    /// role carries its own duration.
    Grouped {
        company: Option<String>,
        shared_duration: Option<String>,
        roles: Vec<ElementRef<'a>>,
    },
    Single(ElementRef<'a>),
}

/// Walk the top-level items of the section's outer list in document
/// order (the page renders most recent first) and emit one entry per
/// role. Grouped items expand in place. Every per-field lookup is
/// independent; whatever is missing degrades to the sentinel.
pub fn classify_entries(section: ElementRef<'_>) -> Vec<EmploymentEntry> {
    let list_selector = Selector::parse("ul").unwrap();

    let Some(outer_list) = section.select(&list_selector).next() else {
        return vec![];
    };

    let mut entries = Vec::new();
    for item in child_items(outer_list) {
        match classify_item(item, &list_selector) {
            ExperienceItem::Grouped {
                company,
                shared_duration,
                roles,
            } => {
                for role in roles {
                    entries.push(extract_grouped_role(role, &company, &shared_duration));
                }
            }
            ExperienceItem::Single(item) => entries.push(extract_single(item)),
        }
    }
    entries
}

fn classify_item<'a>(item: ElementRef<'a>, list_selector: &Selector) -> ExperienceItem<'a> {
    let roles = item
        .select(list_selector)
        .next()
        .map(child_items)
        .unwrap_or_default();

    if roles.is_empty() {
        return ExperienceItem::Single(item);
    }
    // The company header spans sit before the nested role list, so the
    // item's first visible span and first duration caption belong to
    // the group.
    ExperienceItem::Grouped {
        company: first_visible_span(item),
        shared_duration: first_duration_caption(item),
        roles,
    }
}

fn extract_grouped_role(
    role: ElementRef<'_>,
    company: &Option<String>,
    shared_duration: &Option<String>,
) -> EmploymentEntry {
    let duration = first_duration_caption(role).or_else(|| shared_duration.clone());

    EmploymentEntry {
        company: or_not_available(company.clone()),
        title: or_not_available(first_visible_span(role)),
        duration: or_not_available(duration),
        description: or_not_available(description_text(role)),
    }
}

fn extract_single(item: ElementRef<'_>) -> EmploymentEntry {
    let spans = visible_spans(item);

    let (title, company) = match spans.as_slice() {
        [] => (None, None),
        [title] => (Some(title.clone()), None),
        [title, company_raw, ..] => (Some(title.clone()), Some(split_company(company_raw))),
    };

    EmploymentEntry {
        company: or_not_available(company),
        title: or_not_available(title),
        duration: or_not_available(first_duration_caption(item)),
        description: or_not_available(description_text(item)),
    }
}

/// Company is whatever precedes the highest-priority separator present
/// in the combined "company · employment-type" string. No separator
/// means the whole string is the company.
pub fn split_company(raw: &str) -> String {
    for separator in COMPANY_SEPARATORS {
        if let Some((company, _)) = raw.split_once(separator) {
            return company.trim().to_string();
        }
    }
    raw.trim().to_string()
}

/// Direct `<li>` children of a list element.
fn child_items(list: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "li")
        .collect()
}

fn visible_spans(scope: ElementRef<'_>) -> Vec<String> {
    let selector = Selector::parse(r#"span[aria-hidden="true"]"#).unwrap();
    scope
        .select(&selector)
        .map(|span| element_text(span).trim().to_string())
        .collect()
}

fn first_visible_span(scope: ElementRef<'_>) -> Option<String> {
    visible_spans(scope).into_iter().next()
}

fn first_duration_caption(scope: ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse(r#"span.pvs-entity__caption-wrapper[aria-hidden="true"]"#).unwrap();
    scope.select(&selector).next().map(element_text)
}

/// Description lives in a "show more" expandable block. Prefer the
/// rendered variant, fall back to the screen-reader copy.
fn description_text(scope: ElementRef<'_>) -> Option<String> {
    let rendered = Selector::parse(r#"div.inline-show-more-text span[aria-hidden="true"]"#).unwrap();
    let hidden = Selector::parse("div.inline-show-more-text span.visually-hidden").unwrap();

    scope
        .select(&rendered)
        .next()
        .or_else(|| scope.select(&hidden).next())
        .map(element_text)
}
