use crate::error::HarvestError;
use plotters::prelude::*;
use std::path::Path;

/// Categorical palette sampled from viridis
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(68, 1, 84),
    RGBColor(72, 40, 120),
    RGBColor(62, 74, 137),
    RGBColor(49, 104, 142),
    RGBColor(38, 130, 142),
    RGBColor(31, 158, 137),
    RGBColor(53, 183, 121),
    RGBColor(109, 205, 89),
    RGBColor(180, 222, 44),
    RGBColor(253, 231, 37),
];

/// Draws a vertical bar chart of keyword counts into an SVG file.
///
/// Bars keep the order of `counts`. Fails with `EmptyFrequency` when there is
/// nothing to draw.
pub fn render_bar_chart(
    counts: &[(String, usize)],
    path: &Path,
    title: &str,
    size: (u32, u32),
) -> Result<(), HarvestError> {
    if counts.is_empty() {
        return Err(HarvestError::EmptyFrequency);
    }

    let chart_error = |e: &dyn std::fmt::Display| HarvestError::Chart(e.to_string());

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| chart_error(&e))?;

    let max_count = counts.iter().map(|(_, count)| *count).max().unwrap_or(0) as u32;
    // headroom above the tallest bar
    let y_max = max_count + (max_count / 10).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(90)
        .y_label_area_size(50)
        .build_cartesian_2d((0..counts.len()).into_segmented(), 0u32..y_max)
        .map_err(|e| chart_error(&e))?;

    let label_for = |value: &SegmentValue<usize>| match value {
        SegmentValue::CenterOf(i) => counts
            .get(*i)
            .map(|(lemma, _)| lemma.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(counts.len())
        .x_label_formatter(&label_for)
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Feature")
        .y_desc("Count")
        .draw()
        .map_err(|e| chart_error(&e))?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            let color = PALETTE[i % PALETTE.len()];
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), *count as u32),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))
        .map_err(|e| chart_error(&e))?;

    root.present().map_err(|e| chart_error(&e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_render_writes_svg() {
        let path = std::env::temp_dir().join(format!("yield-keywords-chart-{}.svg", std::process::id()));
        let counts = vec![
            ("crime".to_string(), 5),
            ("report".to_string(), 5),
            ("theft".to_string(), 3),
        ];

        render_bar_chart(&counts, &path, "Test chart", (640, 320)).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("crime"));
        assert!(svg.contains("Test chart"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_render_empty_is_an_error() {
        let path = std::env::temp_dir().join("yield-keywords-never-written.svg");
        let result = render_bar_chart(&[], &path, "Empty", (640, 320));

        assert!(matches!(result, Err(HarvestError::EmptyFrequency)));
        assert!(!path.exists());
    }
}
