use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, FormController, PredictionClient, SubmitOutcome};
use shared::domain::InputRecord;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::TerminalView;

/// Submit one placement prediction and print the result.
#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the prediction service.
    #[arg(long)]
    server_url: Option<String>,
    /// TOML settings file (defaults to ./predictor.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "")]
    iq: String,
    #[arg(long, default_value = "")]
    cgpa: String,
    #[arg(long, default_value = "")]
    prev_sem_result: String,
    #[arg(long, default_value = "")]
    academic_performance: String,
    /// "Yes" or "No".
    #[arg(long, default_value = "")]
    internship_experience: String,
    #[arg(long, default_value = "")]
    extra_curricular_score: String,
    #[arg(long, default_value = "")]
    communication_skills: String,
    #[arg(long, default_value = "")]
    projects_completed: String,
}

impl Args {
    fn input_record(&self) -> InputRecord {
        InputRecord {
            iq: self.iq.clone(),
            cgpa: self.cgpa.clone(),
            prev_sem_result: self.prev_sem_result.clone(),
            academic_performance: self.academic_performance.clone(),
            internship_experience: self.internship_experience.clone(),
            extra_curricular_score: self.extra_curricular_score.clone(),
            communication_skills: self.communication_skills.clone(),
            projects_completed: self.projects_completed.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load predictor settings")?;
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
    }
    let client = PredictionClient::new(&settings).context("failed to build prediction client")?;
    tracing::debug!(endpoint = %client.endpoint(), "prediction endpoint resolved");

    let view = Arc::new(TerminalView::new(args.input_record()));
    let controller = FormController::new(Arc::clone(&view), client, &settings);

    let outcome = controller.submit().await;
    if let Some(panel) = view.render() {
        print!("{panel}");
    }

    Ok(match outcome {
        SubmitOutcome::Displayed => ExitCode::SUCCESS,
        SubmitOutcome::Failed | SubmitOutcome::Ignored => ExitCode::FAILURE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::FormView;
    use shared::domain::FormField;

    #[test]
    fn flags_map_onto_matching_fields() {
        let args = Args::parse_from([
            "predict",
            "--iq",
            "115",
            "--cgpa",
            "9.0",
            "--prev-sem-result",
            "8.0",
            "--academic-performance",
            "8",
            "--internship-experience",
            "Yes",
            "--extra-curricular-score",
            "5",
            "--communication-skills",
            "7",
            "--projects-completed",
            "2",
        ]);
        let view = TerminalView::new(args.input_record());

        assert_eq!(view.field_value(FormField::Iq), "115");
        assert_eq!(view.field_value(FormField::PrevSemResult), "8.0");
        assert_eq!(view.field_value(FormField::InternshipExperience), "Yes");
        assert_eq!(view.field_value(FormField::ProjectsCompleted), "2");
    }

    #[test]
    fn omitted_flags_are_sent_empty() {
        let args = Args::parse_from(["predict", "--server-url", "http://10.1.1.1:5000"]);
        assert_eq!(args.input_record(), InputRecord::default());
        assert_eq!(args.server_url.as_deref(), Some("http://10.1.1.1:5000"));
    }
}
