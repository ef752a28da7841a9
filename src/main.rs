use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use interventions_panel::{
    config::PanelFixture,
    controller::InterventionsController,
    script::{self, ScriptStep},
    view::{html, MarkupDocument},
};
use tracing_subscriber::EnvFilter;

/// Render a student's interventions panel and replay scripted interactions against it.
#[derive(Debug, Parser)]
#[command(name = "interventions-panel", version)]
struct Cli {
    /// Panel fixture: student_id, interventions, educators, datepicker_options
    #[arg(long)]
    fixture: PathBuf,

    /// JSON array of steps to replay after the initial render
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write final markup here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let fixture = PanelFixture::load(&cli.fixture)?;
    let templates = html::template_set()?;
    let mut controller =
        InterventionsController::mount(fixture.into_options(templates), MarkupDocument::new());

    let steps = match &cli.script {
        Some(path) => script::load_script(path)?,
        None => Vec::new(),
    };
    for (index, step) in steps.iter().enumerate() {
        replay_step(&mut controller, index, step);
    }

    let markup = controller.surface().to_html();
    match &cli.output {
        Some(path) => std::fs::write(path, &markup)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", markup),
    }
    Ok(())
}

/// A failing step is reported and skipped; later steps still run.
fn replay_step(
    controller: &mut InterventionsController<MarkupDocument>,
    index: usize,
    step: &ScriptStep,
) {
    if let ScriptStep::Type { form, field, value } = step {
        let form = *form;
        if !controller.surface_mut().type_input(form, field, value) {
            tracing::warn!(step = index, form = form.class_name(), "form not rendered");
        }
        return;
    }

    let Some(event) = step.to_event() else {
        tracing::warn!(step = index, ?step, "step has no usable target");
        return;
    };
    if let Err(e) = controller.handle_event(&event) {
        tracing::warn!(step = index, error = %e, "step failed");
    }
}
