//! Rendu SVG d'un graphique de cycle de vie mis en page.

use std::path::Path;

use lifecycle_core::{ChartError, ChartModel, VersionRow};

const FONT_FAMILY: &str = "DejaVu Sans, Verdana, sans-serif";
const GRID_COLOR: &str = "#b0b0b0";
const AXIS_TEXT_COLOR: &str = "#333333";
const CHIP_HEIGHT: f64 = 20.0;
const LEGEND_BOX_WIDTH: f64 = 300.0;
const LEGEND_ENTRY_HEIGHT: f64 = 24.0;

/// Produit le document SVG complet du graphique.
pub fn render_svg(model: &ChartModel) -> String {
    let mut svg = String::with_capacity(16 * 1024);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" \
         viewBox=\"0 0 {:.0} {:.0}\" font-family=\"{}\">\n",
        model.width, model.height, model.width, model.height, FONT_FAMILY
    ));
    svg.push_str(&format!(
        "<rect width=\"{:.0}\" height=\"{:.0}\" fill=\"#ffffff\"/>\n",
        model.width, model.height
    ));

    render_title(model, &mut svg);
    render_grid(model, &mut svg);
    render_bars(model, &mut svg);
    render_today_line(model, &mut svg);
    render_row_labels(model, &mut svg);
    render_axis(model, &mut svg);
    render_legend(model, &mut svg);

    svg.push_str("</svg>\n");
    svg
}

/// Rend le graphique et l'écrit sur disque.
pub fn write_svg(model: &ChartModel, path: &Path) -> Result<(), ChartError> {
    let document = render_svg(model);
    std::fs::write(path, document)?;
    tracing::info!(path = %path.display(), "graphique SVG écrit");
    Ok(())
}

fn render_title(model: &ChartModel, svg: &mut String) {
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"36\" text-anchor=\"middle\" font-size=\"19\" \
         fill=\"#1f1f1f\">{}</text>\n",
        model.width / 2.0,
        xml_escape(&model.title)
    ));
}

fn render_grid(model: &ChartModel, svg: &mut String) {
    for tick in &model.ticks {
        svg.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{top:.2}\" x2=\"{x:.2}\" y2=\"{bottom:.2}\" \
             stroke=\"{color}\" stroke-dasharray=\"4 4\" opacity=\"0.6\"/>\n",
            x = tick.x,
            top = model.plot.top,
            bottom = model.plot.bottom,
            color = GRID_COLOR
        ));
    }
}

fn render_bars(model: &ChartModel, svg: &mut String) {
    for row in &model.rows {
        for segment in &row.segments {
            // Un segment inversé se dessine vers la gauche plutôt que
            // d'être rejeté.
            let (x, width) = if segment.width < 0.0 {
                (segment.x + segment.width, -segment.width)
            } else {
                (segment.x, segment.width)
            };
            svg.push_str(&format!(
                "<rect class=\"bar\" x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" \
                 height=\"{height:.2}\" fill=\"{color}\" fill-opacity=\"{opacity}\"/>\n",
                x = x,
                y = row.y,
                width = width,
                height = row.height,
                color = segment.color,
                opacity = segment.opacity
            ));
        }
    }
}

fn render_today_line(model: &ChartModel, svg: &mut String) {
    svg.push_str(&format!(
        "<line class=\"today\" x1=\"{x:.2}\" y1=\"{top:.2}\" x2=\"{x:.2}\" y2=\"{bottom:.2}\" \
         stroke=\"#000000\" stroke-width=\"2\" stroke-dasharray=\"8 5\"/>\n",
        x = model.today.x,
        top = model.plot.top,
        bottom = model.plot.bottom
    ));
}

fn render_row_labels(model: &ChartModel, svg: &mut String) {
    for row in &model.rows {
        let chip_width = chip_width(row);
        let chip_x = model.plot.left + 4.0;
        let center_y = row.y + row.height / 2.0;
        svg.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" \
             rx=\"6\" fill=\"{color}\"/>\n",
            x = chip_x,
            y = center_y - CHIP_HEIGHT / 2.0,
            width = chip_width,
            height = CHIP_HEIGHT,
            color = row.label_color
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" font-size=\"12\" \
             font-weight=\"bold\" fill=\"#000000\">{label}</text>\n",
            x = chip_x + chip_width / 2.0,
            y = center_y + 4.0,
            label = xml_escape(&row.version)
        ));
    }
}

fn chip_width(row: &VersionRow) -> f64 {
    10.0 * row.version.chars().count() as f64 + 14.0
}

fn render_axis(model: &ChartModel, svg: &mut String) {
    for tick in &model.ticks {
        svg.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{bottom:.2}\" x2=\"{x:.2}\" y2=\"{end:.2}\" \
             stroke=\"{color}\"/>\n",
            x = tick.x,
            bottom = model.plot.bottom,
            end = model.plot.bottom + 5.0,
            color = AXIS_TEXT_COLOR
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" font-size=\"12\" \
             fill=\"{color}\">{label}</text>\n",
            x = tick.x,
            y = model.plot.bottom + 22.0,
            color = AXIS_TEXT_COLOR,
            label = xml_escape(&tick.label)
        ));
    }
}

fn render_legend(model: &ChartModel, svg: &mut String) {
    if model.legend.is_empty() {
        return;
    }

    let box_height = LEGEND_ENTRY_HEIGHT * model.legend.len() as f64 + 12.0;
    let box_x = model.plot.right - LEGEND_BOX_WIDTH - 10.0;
    let box_y = model.plot.top + 10.0;

    svg.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" \
         fill=\"#ffffff\" fill-opacity=\"0.9\" stroke=\"#cccccc\"/>\n",
        x = box_x,
        y = box_y,
        width = LEGEND_BOX_WIDTH,
        height = box_height
    ));

    for (index, entry) in model.legend.iter().enumerate() {
        let entry_y = box_y + 8.0 + index as f64 * LEGEND_ENTRY_HEIGHT;
        svg.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"14\" height=\"14\" fill=\"{color}\"/>\n",
            x = box_x + 10.0,
            y = entry_y,
            color = entry.color
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" font-size=\"12\" fill=\"{color}\">{label}</text>\n",
            x = box_x + 32.0,
            y = entry_y + 11.0,
            color = AXIS_TEXT_COLOR,
            label = xml_escape(&entry.label)
        ));
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
