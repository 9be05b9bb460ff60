use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::domain::experience::classify_entries;

/// Marker for a field the page did not provide. Distinct from an empty
/// string: a record always carries all 12 fields, each either real text
/// or this value.
pub const NOT_AVAILABLE: &str = "NA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub url: String,
    pub name: String,
    #[serde(rename = "profiletitle")]
    pub profile_title: String,
    pub about: String,
    #[serde(rename = "currentcompany")]
    pub current_company: String,
    #[serde(rename = "currentjobtitle")]
    pub current_job_title: String,
    #[serde(rename = "currentjobduration")]
    pub current_job_duration: String,
    #[serde(rename = "currentjobdescription")]
    pub current_job_description: String,
    #[serde(rename = "lastcompany")]
    pub last_company: String,
    #[serde(rename = "lastjobtitle")]
    pub last_job_title: String,
    #[serde(rename = "lastjobduration")]
    pub last_job_duration: String,
    #[serde(rename = "lastjobdescription")]
    pub last_job_description: String,
}

impl ProfileRecord {
    pub fn not_available(url: &str) -> Self {
        let na = || NOT_AVAILABLE.to_string();
        ProfileRecord {
            url: url.to_string(),
            name: na(),
            profile_title: na(),
            about: na(),
            current_company: na(),
            current_job_title: na(),
            current_job_duration: na(),
            current_job_description: na(),
            last_company: na(),
            last_job_title: na(),
            last_job_duration: na(),
            last_job_description: na(),
        }
    }
}

/// Collapse runs of whitespace (newlines included) to single spaces and
/// trim the ends. Total over all inputs; the sentinel passes through
/// untouched.
pub fn sanitize_text(value: &str) -> String {
    if value == NOT_AVAILABLE {
        return value.to_string();
    }
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Default-on-absence combinator: a missing or whitespace-only lookup
/// result becomes the sentinel, anything else is sanitized.
pub fn or_not_available(value: Option<String>) -> String {
    value
        .map(|t| sanitize_text(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// First `<section>` whose `<h2>` carries a text node equal to
/// `heading`. Profiles legitimately omit sections, so `None` is an
/// expected outcome rather than an error.
pub fn find_section<'a>(document: &'a Html, heading: &str) -> Option<ElementRef<'a>> {
    let section_selector = Selector::parse("section").unwrap();
    let heading_selector = Selector::parse("h2").unwrap();

    document.select(&section_selector).find(|section| {
        section
            .select(&heading_selector)
            .any(|h2| h2.text().any(|text| text.trim() == heading))
    })
}

pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// Build a full record from a rendered page's source. Every field
/// lookup is independently best-effort; a page that renders at all
/// always yields a complete record.
pub fn extract_profile(page_source: &str, url: &str) -> ProfileRecord {
    let document = Html::parse_document(page_source);
    let h1_selector = Selector::parse("h1").unwrap();
    let headline_selector = Selector::parse("div.text-body-medium.break-words").unwrap();
    let visible_span_selector = Selector::parse(r#"span[aria-hidden="true"]"#).unwrap();

    let name = or_not_available(document.select(&h1_selector).next().map(element_text));
    let mut profile_title =
        or_not_available(document.select(&headline_selector).next().map(element_text));

    let about = or_not_available(find_section(&document, "About").map(|section| {
        section
            .select(&visible_span_selector)
            .map(element_text)
            .collect::<Vec<_>>()
            .join(" ")
    }));

    let entries = match find_section(&document, "Experience") {
        Some(section) => classify_entries(section),
        None => {
            log::info!("No experience section found on {}", url);
            vec![]
        }
    };
    // Slot 0 is the current job, slot 1 the previous one. Anything
    // beyond that is dropped.
    let current = entries.first().cloned().unwrap_or_default();
    let previous = entries.get(1).cloned().unwrap_or_default();

    if profile_title == NOT_AVAILABLE && current.title != NOT_AVAILABLE {
        profile_title = current.title.clone();
    }

    ProfileRecord {
        url: url.to_string(),
        name,
        profile_title,
        about,
        current_company: current.company,
        current_job_title: current.title,
        current_job_duration: current.duration,
        current_job_description: current.description,
        last_company: previous.company,
        last_job_title: previous.title,
        last_job_duration: previous.duration,
        last_job_description: previous.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_whitespace() {
        assert_eq!(sanitize_text("  Jane \n\t Doe  "), "Jane Doe");
        assert_eq!(sanitize_text("single"), "single");
    }

    #[test]
    fn sentinel_is_a_fixed_point() {
        assert_eq!(sanitize_text(NOT_AVAILABLE), NOT_AVAILABLE);
        assert_eq!(or_not_available(Some(NOT_AVAILABLE.to_string())), NOT_AVAILABLE);
    }

    #[test]
    fn absent_and_blank_values_become_the_sentinel() {
        assert_eq!(or_not_available(None), NOT_AVAILABLE);
        assert_eq!(or_not_available(Some("   \n ".to_string())), NOT_AVAILABLE);
    }

    #[test]
    fn find_section_matches_heading_exactly() {
        let document = Html::parse_document(
            r#"<section><h2>About</h2><span aria-hidden="true">Hello</span></section>"#,
        );
        assert!(find_section(&document, "About").is_some());
        assert!(find_section(&document, "Experience").is_none());
        assert!(find_section(&document, "about").is_none());
    }

    const FULL_PROFILE: &str = r#"
        <html><body>
        <h1> Jane   Doe </h1>
        <div class="text-body-medium break-words">Staff Engineer</div>
        <section>
          <h2>About</h2>
          <span aria-hidden="true">Builds scraping</span>
          <span aria-hidden="true">pipelines.</span>
        </section>
        <section>
          <h2>Experience</h2>
          <ul>
            <li>
              <span aria-hidden="true">Software Engineer</span>
              <span aria-hidden="true">Acme Corp · Full-time</span>
              <span class="pvs-entity__caption-wrapper" aria-hidden="true">Jan 2020 - Present</span>
              <div class="inline-show-more-text"><span aria-hidden="true">Shipping things</span></div>
            </li>
            <li>
              <span aria-hidden="true">Junior Engineer</span>
              <span aria-hidden="true">Initech · Contract</span>
              <span class="pvs-entity__caption-wrapper" aria-hidden="true">2018 - 2020</span>
            </li>
          </ul>
        </section>
        </body></html>
    "#;

    #[test]
    fn extracts_a_complete_record() {
        let record = extract_profile(FULL_PROFILE, "https://example.com/in/jane");

        assert_eq!(record.url, "https://example.com/in/jane");
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.profile_title, "Staff Engineer");
        assert_eq!(record.about, "Builds scraping pipelines.");
        assert_eq!(record.current_job_title, "Software Engineer");
        assert_eq!(record.current_company, "Acme Corp");
        assert_eq!(record.current_job_duration, "Jan 2020 - Present");
        assert_eq!(record.current_job_description, "Shipping things");
        assert_eq!(record.last_job_title, "Junior Engineer");
        assert_eq!(record.last_company, "Initech");
        assert_eq!(record.last_job_duration, "2018 - 2020");
        assert_eq!(record.last_job_description, NOT_AVAILABLE);
    }

    #[test]
    fn headline_falls_back_to_current_job_title() {
        let page = r#"
            <h1>Omar Khan</h1>
            <section>
              <h2>Experience</h2>
              <ul>
                <li><span aria-hidden="true">Senior Engineer</span></li>
              </ul>
            </section>
        "#;
        let record = extract_profile(page, "https://example.com/in/omar");

        assert_eq!(record.profile_title, "Senior Engineer");
        assert_eq!(record.current_job_title, "Senior Engineer");
        assert_eq!(record.current_company, NOT_AVAILABLE);
    }

    #[test]
    fn missing_experience_section_leaves_job_fields_not_available() {
        let record = extract_profile("<h1>Jane Doe</h1>", "https://example.com/in/jane");

        for field in [
            &record.current_company,
            &record.current_job_title,
            &record.current_job_duration,
            &record.current_job_description,
            &record.last_company,
            &record.last_job_title,
            &record.last_job_duration,
            &record.last_job_description,
        ] {
            assert_eq!(field, NOT_AVAILABLE);
        }
        assert_eq!(record.name, "Jane Doe");
    }
}
