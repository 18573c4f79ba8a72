//! Extraction of release lines from the release root index page

use regex::Regex;

use crate::version::error::FetchError;
use crate::version::semver::ReleaseLine;

/// Directory name prefix used on the release root, e.g. `Blender4.1/`
pub const DIRECTORY_PREFIX: &str = "Blender";

/// Extracts every bare `Blender<major>.<minor>` directory name from `page`.
///
/// Entries come back in document order, duplicates included (an HTML index
/// usually names each directory twice, once in the href and once as text).
/// Suffixed directories such as `Blender2.79b` are not bare and are skipped.
///
/// Callers treat the last entry as the newest line, which only holds while
/// the upstream index lists directories in ascending order.
pub fn extract_release_lines(page: &str) -> Result<Vec<ReleaseLine>, FetchError> {
    let pattern = Regex::new(&format!(
        r"{}(\d+)\.(\d+)\b",
        regex::escape(DIRECTORY_PREFIX)
    ))?;

    pattern
        .captures_iter(page)
        .map(|caps| {
            let major = parse_component(&caps[1])?;
            let minor = parse_component(&caps[2])?;
            Ok(ReleaseLine::new(major, minor))
        })
        .collect()
}

pub(crate) fn parse_component(digits: &str) -> Result<u64, FetchError> {
    digits
        .parse()
        .map_err(|_| FetchError::Parse(digits.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_release_lines_keeps_document_order() {
        let page = "Blender4.0 Blender4.1 Blender3.6";

        let lines = extract_release_lines(page).unwrap();

        assert_eq!(
            lines,
            vec![
                ReleaseLine::new(4, 0),
                ReleaseLine::new(4, 1),
                ReleaseLine::new(3, 6),
            ]
        );
        // Last entry is "latest" by convention, even when out of order
        assert_eq!(lines.last(), Some(&ReleaseLine::new(3, 6)));
    }

    #[test]
    fn extract_release_lines_reads_apache_style_index() {
        let page = r#"<html><body><pre>
<a href="Blender2.79/">Blender2.79/</a>      22-Sep-2017 10:00    -
<a href="Blender2.79b/">Blender2.79b/</a>    22-Mar-2018 10:00    -
<a href="Blender3.6/">Blender3.6/</a>        27-Jun-2023 10:00    -
<a href="Blender4.10/">Blender4.10/</a>      01-Jan-2026 10:00    -
</pre></body></html>"#;

        let lines = extract_release_lines(page).unwrap();

        assert_eq!(
            lines,
            vec![
                ReleaseLine::new(2, 79),
                ReleaseLine::new(2, 79),
                ReleaseLine::new(3, 6),
                ReleaseLine::new(3, 6),
                ReleaseLine::new(4, 10),
                ReleaseLine::new(4, 10),
            ]
        );
    }

    #[test]
    fn extract_release_lines_ignores_other_names() {
        let page = r#"<a href="BlenderBenchmark2.0/">BlenderBenchmark2.0/</a>
<a href="blender-4.1.0-linux-x64.tar.xz">blender-4.1.0-linux-x64.tar.xz</a>"#;

        assert!(extract_release_lines(page).unwrap().is_empty());
    }

    #[test]
    fn extract_release_lines_rejects_oversized_numbers() {
        let page = "Blender4.99999999999999999999999";

        assert!(matches!(
            extract_release_lines(page),
            Err(FetchError::Parse(_))
        ));
    }
}
