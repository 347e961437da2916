pub mod chart;

use crate::config::ReportConfig;
use crate::error::HarvestError;
use crate::results::{HarvestResults, UrlKeywordMap};
use std::io::Write;
use std::path::PathBuf;

/// Prints per-URL keyword summaries and charts the most frequent keywords
pub struct Reporter {
    config: ReportConfig,
}

impl Reporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Write the report to stdout and render the chart.
    ///
    /// Returns the chart path, or `None` when no keyword was found and the
    /// chart was skipped.
    pub fn report(&self, results: &HarvestResults) -> Result<Option<PathBuf>, HarvestError> {
        let stdout = std::io::stdout();
        self.report_to(results, &mut stdout.lock())
    }

    /// Same as `report`, writing the text part to `out`
    pub fn report_to<W: Write>(
        &self,
        results: &HarvestResults,
        out: &mut W,
    ) -> Result<Option<PathBuf>, HarvestError> {
        writeln!(out, "Top keywords from each site:\n")?;
        write!(out, "{}", format_url_keywords(&results.url_keywords))?;

        if results.frequencies.is_empty() {
            ::log::warn!("No keywords extracted, skipping chart");
            writeln!(
                out,
                "No keywords were extracted from any page; skipping the chart."
            )?;
            return Ok(None);
        }

        let top = results.frequencies.most_common(self.config.top_n);
        writeln!(out, "Top {} keywords:", top.len())?;
        for (lemma, count) in &top {
            writeln!(out, "  {:<20} {}", lemma, count)?;
        }

        chart::render_bar_chart(
            &top,
            &self.config.chart_path,
            &self.config.chart_title,
            (self.config.width, self.config.height),
        )?;

        ::log::info!("Chart written to {}", self.config.chart_path.display());
        writeln!(out, "\nChart saved to {}", self.config.chart_path.display())?;

        Ok(Some(self.config.chart_path.clone()))
    }
}

/// One block per URL: the URL, then its keywords comma-joined
pub fn format_url_keywords(url_keywords: &UrlKeywordMap) -> String {
    url_keywords
        .iter()
        .map(|(url, keywords)| format!("{}\n → {}\n\n", url, keywords.join(", ")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::PageKeywords;

    fn results() -> HarvestResults {
        let mut results = HarvestResults::default();
        for (url, words) in [
            ("https://a.example", vec!["crime", "report", "crime"]),
            ("https://b.example", vec!["theft"]),
        ] {
            let page = PageKeywords {
                url: url.to_string(),
                keywords: words.into_iter().map(String::from).collect(),
            };
            results.record(&page, 5);
        }
        results
    }

    #[test]
    fn test_format_url_keywords() {
        let text = format_url_keywords(&results().url_keywords);
        assert_eq!(
            text,
            "https://a.example\n → crime, report, crime\n\nhttps://b.example\n → theft\n\n"
        );
    }

    #[test]
    fn test_empty_results_skip_chart() {
        let path = std::env::temp_dir().join(format!("yield-keywords-skip-{}.svg", std::process::id()));
        let reporter = Reporter::new(ReportConfig {
            chart_path: path.clone(),
            ..ReportConfig::default()
        });

        let mut out = Vec::new();
        let outcome = reporter.report_to(&HarvestResults::default(), &mut out).unwrap();

        assert_eq!(outcome, None);
        assert!(!path.exists());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("skipping the chart"));
    }

    #[test]
    fn test_report_lists_top_keywords_and_writes_chart() {
        let path = std::env::temp_dir().join(format!("yield-keywords-report-{}.svg", std::process::id()));
        let reporter = Reporter::new(ReportConfig {
            top_n: 1,
            chart_path: path.clone(),
            ..ReportConfig::default()
        });

        let mut out = Vec::new();
        let outcome = reporter.report_to(&results(), &mut out).unwrap();

        assert_eq!(outcome, Some(path.clone()));
        assert!(path.exists());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Top 1 keywords:"));
        assert!(text.contains("crime"));
        assert!(!text.contains("  theft"));
        let _ = std::fs::remove_file(&path);
    }
}
