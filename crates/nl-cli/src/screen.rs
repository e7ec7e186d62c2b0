use clap::ValueEnum;
use nl_core::Phase;
use nl_runner::{BaselinePanel, DisplayState, NeuroSymbolicPanel, Screen, Section};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Busy lines and alerts go to stderr. Panels go to stdout as they arrive in
/// text mode; json mode prints nothing until the run is over.
pub struct TerminalScreen {
    format: Format,
}

impl TerminalScreen {
    pub fn new(format: Format) -> Self {
        Self { format }
    }
}

impl Screen for TerminalScreen {
    fn set_busy(&self, phase: Option<Phase>) {
        if let Some(phase) = phase {
            eprintln!("… {}", phase.busy_message());
        }
    }

    fn refresh(&self, section: Section, display: &DisplayState) {
        if self.format == Format::Json {
            return;
        }
        if let Some(text) = render_section(section, display) {
            println!("{text}\n");
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn heading(title: &str, model: Option<&str>) -> String {
    match model {
        Some(model) => format!("== {title} ({model}) =="),
        None => format!("== {title} =="),
    }
}

fn baseline_text(panel: &BaselinePanel) -> String {
    let mut out = heading("Baseline LLM", panel.model.as_deref());
    out.push('\n');
    out.push_str(&panel.output);
    out.push_str("\n\n");
    out.push_str(&panel.validation.to_string());
    if let Some(seating) = &panel.guessed_seating {
        out.push_str("\n\n");
        out.push_str(&seating.to_string());
    }
    out
}

fn neurosymbolic_text(panel: &NeuroSymbolicPanel) -> String {
    format!(
        "{}\n{}\n\nStructured representation:\n{}",
        heading("Neuro-Symbolic Solver", panel.model.as_deref()),
        panel.solution_count,
        panel.structured
    )
}

/// Text for the section that just changed, if it has anything to show.
pub fn render_section(section: Section, display: &DisplayState) -> Option<String> {
    match section {
        Section::Cleared => None,
        Section::Baseline => display.baseline.as_ref().map(baseline_text),
        Section::NeuroSymbolic => display.neurosymbolic.as_ref().map(neurosymbolic_text),
        Section::Seating => display.seating.as_ref().map(|s| s.to_string()),
    }
}
