//! lumina: practice records and progress reports for integrative therapy.
//!
//! Records live as JSON files under the configured data directory. Every
//! subcommand prints its result as pretty JSON on stdout; logs go to stderr.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use commands::Context;
use config::LogFormat;

#[derive(Parser)]
#[command(name = "lumina")]
#[command(about = "Questionnaire scoring, progress and phase tracking for a therapy practice")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "LUMINA_CONFIG")]
    config: Option<PathBuf>,

    /// Therapist user id the command acts on behalf of
    #[arg(long, env = "LUMINA_THERAPIST")]
    therapist: Option<Uuid>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default configuration file
    Init,
    /// Print the active questionnaire catalog
    Catalog,
    /// Manage patients
    #[command(subcommand)]
    Patient(PatientCommand),
    /// Score an answers file and record the analysis
    Analyze {
        #[arg(long)]
        patient: Uuid,
        /// JSON object of question id to answer
        #[arg(long)]
        answers: PathBuf,
    },
    /// Comparison, progress and phase report for a patient
    Results {
        #[arg(long)]
        patient: Uuid,
    },
    /// Protocol phase
    #[command(subcommand)]
    Phase(PhaseCommand),
    /// Create a public link to an analysis report
    Share {
        #[arg(long)]
        patient: Uuid,
        #[arg(long)]
        analysis: Uuid,
    },
    /// Open a shared report by its token
    Shared {
        #[arg(long)]
        token: Uuid,
    },
}

#[derive(clap::Args)]
struct PatientFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    birth_date: Option<jiff::civil::Date>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    profession: Option<String>,
    #[arg(long)]
    marital_status: Option<String>,
}

#[derive(Subcommand)]
enum PatientCommand {
    Add(PatientFields),
    Update {
        #[arg(long)]
        id: Uuid,
        #[command(flatten)]
        fields: PatientFields,
    },
    List {
        /// Only patients whose name or email contains this text
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        #[arg(long)]
        id: Uuid,
    },
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum PhaseCommand {
    Show {
        #[arg(long)]
        patient: Uuid,
    },
    Set {
        #[arg(long)]
        patient: Uuid,
        #[arg(long, allow_negative_numbers = true)]
        phase: i64,
    },
}

fn init_tracing(format: LogFormat) -> eyre::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new("lumina=info")?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;
    init_tracing(config.log_format)?;

    if let Command::Init = cli.command {
        let path = match cli.config {
            Some(path) => path,
            None => config::default_config_path()?,
        };
        config::save_config(&config, &path)?;
        return commands::print_json(&config);
    }

    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");
    let ctx = Context::new(config, cli.therapist)?;

    match cli.command {
        Command::Init => Ok(()),
        Command::Catalog => commands::catalog(&ctx),
        Command::Patient(cmd) => match cmd {
            PatientCommand::Add(fields) => commands::add_patient(&ctx, fields.into()).await,
            PatientCommand::Update { id, fields } => {
                commands::update_patient(&ctx, id, fields.into()).await
            }
            PatientCommand::List { search } => {
                commands::list_patients(&ctx, search.as_deref()).await
            }
            PatientCommand::Show { id } => commands::show_patient(&ctx, id).await,
            PatientCommand::Delete { id } => commands::delete_patient(&ctx, id).await,
        },
        Command::Analyze { patient, answers } => commands::analyze(&ctx, patient, &answers).await,
        Command::Results { patient } => commands::results(&ctx, patient).await,
        Command::Phase(cmd) => match cmd {
            PhaseCommand::Show { patient } => commands::show_phase(&ctx, patient).await,
            PhaseCommand::Set { patient, phase } => commands::set_phase(&ctx, patient, phase).await,
        },
        Command::Share { patient, analysis } => commands::share(&ctx, patient, analysis).await,
        Command::Shared { token } => commands::shared(&ctx, token).await,
    }
}

impl From<PatientFields> for lumina_core::models::patient::PatientDetails {
    fn from(f: PatientFields) -> Self {
        Self {
            name: f.name,
            email: f.email,
            phone: f.phone,
            birth_date: f.birth_date,
            address: f.address,
            gender: f.gender,
            profession: f.profession,
            marital_status: f.marital_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_phase_set() {
        let patient = Uuid::new_v4();
        let cli = Cli::try_parse_from([
            "lumina",
            "phase",
            "set",
            "--patient",
            &patient.to_string(),
            "--phase",
            "7",
        ])
        .unwrap();

        match cli.command {
            Command::Phase(PhaseCommand::Set { patient: p, phase }) => {
                assert_eq!(p, patient);
                assert_eq!(phase, 7);
            }
            _ => panic!("expected phase set"),
        }
    }

    #[test]
    fn parses_patient_birth_date() {
        let cli = Cli::try_parse_from([
            "lumina",
            "patient",
            "add",
            "--name",
            "Ana",
            "--birth-date",
            "1990-04-12",
        ])
        .unwrap();

        match cli.command {
            Command::Patient(PatientCommand::Add(fields)) => {
                assert_eq!(fields.birth_date, Some(jiff::civil::date(1990, 4, 12)));
            }
            _ => panic!("expected patient add"),
        }
    }

    #[test]
    fn parses_patient_list_search() {
        let cli = Cli::try_parse_from(["lumina", "patient", "list", "--search", "ana"]).unwrap();
        match cli.command {
            Command::Patient(PatientCommand::List { search }) => {
                assert_eq!(search.as_deref(), Some("ana"));
            }
            _ => panic!("expected patient list"),
        }

        let cli = Cli::try_parse_from(["lumina", "patient", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Patient(PatientCommand::List { search: None })
        ));
    }

    #[test]
    fn parses_extended_patient_fields() {
        let cli = Cli::try_parse_from([
            "lumina",
            "patient",
            "add",
            "--name",
            "Ana",
            "--address",
            "Rua das Flores, 10",
            "--gender",
            "feminino",
            "--marital-status",
            "casada",
        ])
        .unwrap();

        let Command::Patient(PatientCommand::Add(fields)) = cli.command else {
            panic!("expected patient add");
        };
        let details = lumina_core::models::patient::PatientDetails::from(fields);
        assert_eq!(details.address.as_deref(), Some("Rua das Flores, 10"));
        assert_eq!(details.gender.as_deref(), Some("feminino"));
        assert_eq!(details.marital_status.as_deref(), Some("casada"));
    }
}
