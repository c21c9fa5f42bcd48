//! Plain-text rendering of detection results for the terminal.

use std::fmt::Write;

use crate::analysis::Analysis;
use crate::predictions::{ConfidenceBand, RankedPrediction};
use crate::suggestions::{Difficulty, ProjectSuggestion};

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const GREY: &str = "\x1b[90m";

/// Components listed per project before the rest is summarized as `+N`.
const VISIBLE_COMPONENTS: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Emit ANSI colours
    pub color: bool,
    /// Width of a probability bar in cells
    pub bar_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            bar_width: 30,
        }
    }
}

impl RenderOptions {
    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", style, text, RESET)
        } else {
            text.to_string()
        }
    }
}

fn band_style(band: ConfidenceBand) -> &'static str {
    match band {
        ConfidenceBand::Strong => GREEN,
        ConfidenceBand::Good => CYAN,
        ConfidenceBand::Fair => YELLOW,
        ConfidenceBand::Weak => GREY,
    }
}

/// ANSI colour for a project's difficulty badge.
pub fn difficulty_style(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => GREEN,
        Difficulty::Intermediate => YELLOW,
        Difficulty::Advanced => RED,
    }
}

/// A bar of `width` cells filled in proportion to `probability`.
pub fn render_bar(probability: f32, width: usize) -> String {
    let filled = ((probability.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_prediction_row(out: &mut String, ranked: &RankedPrediction, name_width: usize, options: &RenderOptions) {
    let prediction = &ranked.prediction;
    let marker = if ranked.below_threshold { "·" } else { "✔" };
    let bar = options.paint(
        band_style(ConfidenceBand::for_prediction(prediction)),
        &render_bar(prediction.probability, options.bar_width),
    );
    let row = format!(
        "  {} {:<width$}  {}  {:>5.1}%",
        marker,
        prediction.class_name,
        bar,
        prediction.percentage(),
        width = name_width
    );
    if ranked.below_threshold && options.color {
        let _ = writeln!(out, "{}{}{}", DIM, row, RESET);
    } else {
        let _ = writeln!(out, "{}", row);
    }
}

/// Renders the ranked predictions and a detection summary.
pub fn render_analysis(analysis: &Analysis, options: &RenderOptions) -> String {
    let mut out = String::new();
    let top = match analysis.top() {
        Some(top) => top,
        None => return out,
    };

    let _ = writeln!(
        out,
        "Primary detection: {}  {:.1}%",
        options.paint(BOLD, &top.class_name),
        top.percentage()
    );
    let _ = writeln!(out);

    let name_width = analysis
        .predictions
        .iter()
        .map(|r| r.prediction.class_name.chars().count())
        .max()
        .unwrap_or(0);
    for ranked in &analysis.predictions {
        render_prediction_row(&mut out, ranked, name_width, options);
    }
    let _ = writeln!(out);

    if analysis.has_detections() {
        let _ = writeln!(
            out,
            "Detected: {} ({} project ideas)",
            analysis.detected.join(", "),
            analysis.projects.len()
        );
    } else {
        let _ = writeln!(out, "No components detected with high confidence.");
        let _ = writeln!(out, "Try a clearer image or different angle.");
    }
    out
}

/// Renders project suggestion cards.
pub fn render_suggestions(projects: &[&ProjectSuggestion], options: &RenderOptions) -> String {
    let mut out = String::new();
    if projects.is_empty() {
        return out;
    }

    let _ = writeln!(out, "{}", options.paint(BOLD, "Suggested projects"));
    for project in projects {
        let _ = writeln!(
            out,
            "  {} {} [{}]",
            project.icon,
            project.title,
            options.paint(difficulty_style(project.difficulty), project.difficulty.label())
        );
        let _ = writeln!(out, "     {}", project.description);

        let shown: Vec<&str> = project.components.iter().take(VISIBLE_COMPONENTS).copied().collect();
        let hidden = project.components.len().saturating_sub(VISIBLE_COMPONENTS);
        if hidden > 0 {
            let _ = writeln!(out, "     Components: {} +{}", shown.join(", "), hidden);
        } else {
            let _ = writeln!(out, "     Components: {}", shown.join(", "));
        }
    }
    out
}
