use crate::hosting::{Client, Fetch, RepoSpec};
use ohno::app_err;
use regex::Regex;

const LOG_TARGET: &str = "    license";

/// Keywords whose presence marks a license as compatible. Product policy:
/// extend this list rather than adding per-call-site checks.
const COMPATIBLE_LICENSES: &[&str] = &["lgpl", "mit", "bsd", "apache", "mpl", "eclipse", "artistic"];

/// Name of the license file probed at the repository root.
const LICENSE_FILE: &str = "LICENSE";

/// Binary license-compatibility score.
///
/// Checks the README's license section first, then falls back to a root
/// `LICENSE` file; the fallback also runs when the README cannot be fetched at
/// all. "No compatible license detected" is a confident 0; an error is
/// returned only when a transport failure left the question unanswered.
pub async fn compute(client: &Client, spec: &RepoSpec) -> crate::Result<f64> {
    let mut transport_failure = None;

    match client.readme(spec).await {
        Fetch::Found(readme) => {
            if let Some(section) = extract_section(&readme, "license")
                && contains_compatible_license(section)
            {
                log::info!(target: LOG_TARGET, "compatible license found in README of {spec}");
                return Ok(1.0);
            }
        }
        Fetch::Missing => {
            log::debug!(target: LOG_TARGET, "no README found for {spec}, checking {LICENSE_FILE} file");
        }
        Fetch::Failed(e) => {
            log::debug!(target: LOG_TARGET, "could not fetch README for {spec}: {e:#}");
            transport_failure = Some(e);
        }
    }

    match client.file_content(spec, LICENSE_FILE).await {
        Fetch::Found(body) => {
            if contains_compatible_license(&body) {
                log::info!(target: LOG_TARGET, "compatible license found in {LICENSE_FILE} file of {spec}");
                return Ok(1.0);
            }
            // The whole file was examined; no match is a confident result.
            Ok(0.0)
        }
        Fetch::Missing => {
            // Both sources exhausted. Confident only if the README lookup
            // itself did not fail in transit.
            match transport_failure {
                Some(e) => Err(e),
                None => Ok(0.0),
            }
        }
        Fetch::Failed(e) => Err(app_err!("fetching {LICENSE_FILE} file for {spec}: {e:#}")),
    }
}

/// Extract the body of a markdown section whose header matches `header_name`
/// (case-insensitive): the text after the header up to the next header or end
/// of document.
///
/// This is the seam for the parsing strategy; the regex could be replaced by a
/// real markdown walk without touching the probe.
#[must_use]
pub fn extract_section<'a>(markdown: &'a str, header_name: &str) -> Option<&'a str> {
    let pattern = format!(r"(?is)#\s*{}\s*(.*?)(?:\n#|$)", regex::escape(header_name));
    let re = Regex::new(&pattern).ok()?;
    re.captures(markdown).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

fn contains_compatible_license(text: &str) -> bool {
    let lowered = text.to_lowercase();
    COMPATIBLE_LICENSES.iter().any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_section_basic() {
        let markdown = "# Intro\nhello\n\n## License\nLicensed under the MIT License\n\n## Other\nmore";
        let section = extract_section(markdown, "license").unwrap();

        assert!(section.contains("MIT License"));
        assert!(!section.contains("more"));
    }

    #[test]
    fn test_extract_section_case_insensitive() {
        let markdown = "## LICENSE\nApache-2.0";
        let section = extract_section(markdown, "license").unwrap();

        assert!(section.contains("Apache-2.0"));
    }

    #[test]
    fn test_extract_section_at_end_of_document() {
        let markdown = "# Project\nstuff\n\n# License\nBSD 3-Clause";
        let section = extract_section(markdown, "license").unwrap();

        assert!(section.contains("BSD 3-Clause"));
    }

    #[test]
    fn test_extract_section_absent() {
        let markdown = "# Project\nno licensing info here";
        assert!(extract_section(markdown, "license").is_none());
    }

    #[test]
    fn test_compatible_license_keywords() {
        assert!(contains_compatible_license("Licensed under the MIT License"));
        assert!(contains_compatible_license("APACHE 2.0"));
        assert!(contains_compatible_license("Mozilla Public License (MPL)"));
        assert!(contains_compatible_license("GNU LGPL v2.1"));
        assert!(!contains_compatible_license("GPL-3.0-only"));
        assert!(!contains_compatible_license("proprietary, all rights reserved"));
    }

    #[test]
    fn test_keyword_match_inside_section_only() {
        // MIT mentioned outside the license section must not count.
        let markdown = "# About\nWe started at MIT.\n\n## License\nGPL-3.0";
        let section = extract_section(markdown, "license").unwrap();

        assert!(!contains_compatible_license(section));
    }
}
