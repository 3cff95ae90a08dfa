//! Cohort-flow chart rendering
//!
//! Renders the cohort flow as a horizontal bar chart: one bar per stage,
//! first stage on top, annotated with the sample size and the number of
//! rows excluded at that stage.

use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::pipeline::cohort::CohortFlow;

const CHART_WIDTH: u32 = 1200;
const CHART_HEIGHT: u32 = 600;

/// Bars where nothing was excluded.
const KEPT_COLOR: RGBColor = RGBColor(46, 204, 113);
/// Bars where rows were excluded at the stage.
const EXCLUDED_COLOR: RGBColor = RGBColor(231, 76, 60);

/// Render the cohort-flow bar chart to a PNG file.
pub fn render_cohort_flow_chart(flow: &CohortFlow, path: &Path) -> Result<()> {
    anyhow::ensure!(!flow.is_empty(), "Cohort flow is empty; nothing to chart");

    draw(flow, path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to render cohort flow chart to '{}': {}",
            path.display(),
            e
        )
    })
}

fn draw(flow: &CohortFlow, path: &Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stages = flow.stages();
    let max_n = stages.iter().map(|s| s.n).max().unwrap_or(0).max(1) as f64;
    let x_max = max_n * 1.15;

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Cohort Flow: From Raw Data to Analysis Sample",
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(240)
        .build_cartesian_2d(0f64..x_max, (0..stages.len()).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Sample Size (N)")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .y_labels(stages.len())
        .y_label_formatter(&|segment: &SegmentValue<usize>| match segment {
            SegmentValue::CenterOf(i) if *i < stages.len() => {
                stages[stages.len() - 1 - *i].stage.clone()
            }
            _ => String::new(),
        })
        .draw()?;

    for (i, stage) in stages.iter().enumerate() {
        // First stage goes on the top row.
        let row = stages.len() - 1 - i;
        let color = if stage.excluded == 0 {
            KEPT_COLOR
        } else {
            EXCLUDED_COLOR
        };

        let bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(row)),
                (stage.n as f64, SegmentValue::Exact(row + 1)),
            ],
            color.mix(0.7).filled(),
        );
        chart.draw_series(std::iter::once(bar))?;

        let outline = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(row)),
                (stage.n as f64, SegmentValue::Exact(row + 1)),
            ],
            BLACK.stroke_width(2),
        );
        chart.draw_series(std::iter::once(outline))?;

        let count_label = Text::new(
            format!("N={}", stage.n),
            (stage.n as f64 / 2.0, SegmentValue::CenterOf(row)),
            ("sans-serif", 20).into_font().color(&WHITE),
        );
        chart.draw_series(std::iter::once(count_label))?;

        if stage.excluded > 0 {
            let excluded_label = Text::new(
                format!("(-{})", stage.excluded),
                (
                    stage.n as f64 + max_n * 0.02,
                    SegmentValue::CenterOf(row),
                ),
                ("sans-serif", 18).into_font().color(&EXCLUDED_COLOR),
            );
            chart.draw_series(std::iter::once(excluded_label))?;
        }
    }

    root.present()?;
    Ok(())
}
